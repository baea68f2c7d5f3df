use crate::estimation::model::{Prediction, PredictionError, PredictionService, SleepFeatures};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    Returns { actual_sleep_seconds: f64 },
    Fails(PredictionError),
}

/// Programmable prediction service that records every query it receives.
#[derive(Debug)]
pub struct MockPredictionService {
    behavior: MockBehavior,
    calls: Mutex<Vec<SleepFeatures>>,
}

impl MockPredictionService {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(actual_sleep_seconds: f64) -> Self {
        Self::new(MockBehavior::Returns {
            actual_sleep_seconds,
        })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Fails(PredictionError::Unavailable(
            "mock failure".to_string(),
        )))
    }

    /// Feature triples seen so far, oldest first.
    pub fn calls(&self) -> Vec<SleepFeatures> {
        match self.calls.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PredictionService for MockPredictionService {
    fn predict(&self, features: &SleepFeatures) -> Result<Prediction, PredictionError> {
        match self.calls.lock() {
            Ok(mut guard) => guard.push(*features),
            Err(poisoned) => poisoned.into_inner().push(*features),
        }
        match &self.behavior {
            MockBehavior::Returns {
                actual_sleep_seconds,
            } => Ok(Prediction {
                actual_sleep_seconds: *actual_sleep_seconds,
            }),
            MockBehavior::Fails(err) => Err(err.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
