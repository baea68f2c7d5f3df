//! Prediction service trait for pluggable sleep models.
//!
//! A service maps the three form features to an estimated actual sleep
//! duration. Services are selected via `model.json` and loaded at startup.

use serde::Serialize;
use thiserror::Error;

/// Feature triple fed to a prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepFeatures {
    /// Wake-up time in seconds since midnight.
    pub wake: f64,
    /// Desired sleep in hours.
    pub estimated_sleep: f64,
    /// Caffeine cups per day.
    pub coffee: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub actual_sleep_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("prediction service unavailable: {0}")]
    Unavailable(String),
    #[error("feature {feature} = {value} is outside the trained domain")]
    OutOfDomain { feature: &'static str, value: f64 },
    #[error("prediction service returned unusable duration: {0} seconds")]
    InvalidOutput(f64),
}

/// Trait for services that predict actual sleep from form features.
///
/// Implementations must be deterministic for a given feature triple.
pub trait PredictionService: Send + Sync + std::fmt::Debug {
    fn predict(&self, features: &SleepFeatures) -> Result<Prediction, PredictionError>;

    /// Short identifier reported by the health endpoint.
    fn name(&self) -> &str;

    fn is_available(&self) -> bool {
        true
    }
}
