use crate::bedtime::{BedtimeEstimator, ClockStyle};
use crate::estimation::model::PredictionService;
use crate::estimation::unavailable::UnavailableModel;
use crate::inputs::SleepInputs;
use std::sync::Arc;
use tokio::sync::watch;

/// Session state behind the form: the three inputs plus the loaded service.
#[derive(Debug)]
pub struct AppState {
    inputs: SleepInputs,
    inputs_tx: watch::Sender<SleepInputs>,
    service: Arc<dyn PredictionService>,
    clock: ClockStyle,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_service(
            Arc::new(UnavailableModel::new("no model loaded")),
            ClockStyle::default(),
        )
    }

    pub fn with_service(service: Arc<dyn PredictionService>, clock: ClockStyle) -> Self {
        let inputs = SleepInputs::default();
        let (inputs_tx, _inputs_rx) = watch::channel(inputs);
        Self {
            inputs,
            inputs_tx,
            service,
            clock,
        }
    }

    pub fn inputs(&self) -> &SleepInputs {
        &self.inputs
    }

    pub fn subscribe_inputs(&self) -> watch::Receiver<SleepInputs> {
        self.inputs_tx.subscribe()
    }

    /// Replaces the inputs and notifies subscribers, even when none are listening.
    pub fn set_inputs(&mut self, inputs: SleepInputs) {
        self.inputs = inputs;
        self.inputs_tx.send_replace(inputs);
    }

    pub fn service(&self) -> &Arc<dyn PredictionService> {
        &self.service
    }

    /// Swaps the prediction service. Later estimates use the new one.
    pub fn set_service(&mut self, service: Arc<dyn PredictionService>) {
        self.service = service;
    }

    pub fn estimator(&self) -> BedtimeEstimator {
        BedtimeEstimator::new(Arc::clone(&self.service), self.clock)
    }

    /// Bedtime for the current inputs, recomputed on every call.
    pub fn recommended_bedtime(&self) -> String {
        self.estimator().estimate(&self.inputs)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
