use crate::estimation::model::{Prediction, PredictionError, PredictionService, SleepFeatures};

/// Stands in for a model that failed to load; every prediction fails.
#[derive(Debug, Clone)]
pub struct UnavailableModel {
    reason: String,
}

impl UnavailableModel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PredictionService for UnavailableModel {
    fn predict(&self, _features: &SleepFeatures) -> Result<Prediction, PredictionError> {
        Err(PredictionError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}
