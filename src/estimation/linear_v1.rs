//! Linear V1 sleep model.
//!
//! Formula: actual_sleep = intercept + wake_coefficient * wake
//!     + estimated_sleep_coefficient * estimated_sleep + coffee_coefficient * coffee

use crate::estimation::model::{Prediction, PredictionError, PredictionService, SleepFeatures};
use crate::inputs::{
    CAFFEINE_MAX_CUPS, CAFFEINE_MIN_CUPS, SLEEP_GOAL_MAX_HOURS, SLEEP_GOAL_MIN_HOURS,
};
use serde::Deserialize;
use std::ops::RangeBounds;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Linear V1 model parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearV1Params {
    pub intercept: f64,
    pub wake_coefficient: f64,
    pub estimated_sleep_coefficient: f64,
    pub coffee_coefficient: f64,
}

impl Default for LinearV1Params {
    fn default() -> Self {
        Self {
            intercept: 0.0,
            wake_coefficient: 0.0,
            estimated_sleep_coefficient: 3600.0,
            coffee_coefficient: 240.0, // 4 extra minutes per cup
        }
    }
}

#[derive(Debug)]
pub struct LinearV1Model {
    pub params: LinearV1Params,
}

impl LinearV1Model {
    pub fn new(params: LinearV1Params) -> Self {
        Self { params }
    }

    pub fn with_defaults() -> Self {
        Self::new(LinearV1Params::default())
    }
}

impl PredictionService for LinearV1Model {
    fn predict(&self, features: &SleepFeatures) -> Result<Prediction, PredictionError> {
        check_domain("wake", features.wake, 0.0..SECONDS_PER_DAY)?;
        check_domain(
            "estimated_sleep",
            features.estimated_sleep,
            SLEEP_GOAL_MIN_HOURS..=SLEEP_GOAL_MAX_HOURS,
        )?;
        check_domain(
            "coffee",
            features.coffee,
            f64::from(CAFFEINE_MIN_CUPS)..=f64::from(CAFFEINE_MAX_CUPS),
        )?;

        let actual_sleep_seconds = self.params.intercept
            + self.params.wake_coefficient * features.wake
            + self.params.estimated_sleep_coefficient * features.estimated_sleep
            + self.params.coffee_coefficient * features.coffee;

        Ok(Prediction {
            actual_sleep_seconds,
        })
    }

    fn name(&self) -> &str {
        "linear_v1"
    }
}

fn check_domain(
    feature: &'static str,
    value: f64,
    domain: impl RangeBounds<f64>,
) -> Result<(), PredictionError> {
    if domain.contains(&value) {
        Ok(())
    } else {
        Err(PredictionError::OutOfDomain { feature, value })
    }
}
