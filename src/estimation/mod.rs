use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub mod linear_v1;
pub mod mock;
pub mod model;
pub mod unavailable;

use linear_v1::{LinearV1Model, LinearV1Params};
use model::PredictionService;
use unavailable::UnavailableModel;

// Model Factory
pub fn create_model(config: &ModelFile) -> Result<Box<dyn PredictionService>, ModelFileError> {
    match config.model.as_str() {
        "linear_v1" => {
            let params: LinearV1Params = serde_json::from_value(config.params.clone())?;
            Ok(Box::new(LinearV1Model::new(params)))
        }
        other => Err(ModelFileError::Invalid(format!("unknown model: {other}"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct ModelFile {
    pub model: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum ModelFileError {
    #[error("failed to read model file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model file: {0}")]
    Invalid(String),
}

pub fn load_model_from_path(
    path: impl AsRef<Path>,
) -> Result<Box<dyn PredictionService>, ModelFileError> {
    let contents = std::fs::read_to_string(path)?;
    let config: ModelFile = serde_json::from_str(&contents)?;
    create_model(&config)
}

/// Loads the configured model, or an `UnavailableModel` carrying the reason it
/// could not be loaded. Bedtime requests then report the fallback message.
pub fn load_service(path: Option<&Path>) -> Arc<dyn PredictionService> {
    match path {
        Some(path) => match load_model_from_path(path) {
            Ok(model) => {
                info!(path = %path.display(), model = model.name(), "Prediction model loaded");
                Arc::from(model)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load prediction model");
                Arc::new(UnavailableModel::new(e.to_string()))
            }
        },
        None => {
            warn!("No model path configured, predictions unavailable");
            Arc::new(UnavailableModel::new("no model configured"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::model::SleepFeatures;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_model_path(tag: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
        let unique = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        Ok(std::env::temp_dir().join(format!("better-rest-model-{tag}-{unique}.json")))
    }

    #[test]
    fn bundled_model_file_loads_linear_v1() -> Result<(), Box<dyn std::error::Error>> {
        let model = load_model_from_path("config/model.json")?;

        assert_eq!(model.name(), "linear_v1");
        let prediction = model.predict(&SleepFeatures {
            wake: 25_200.0,
            estimated_sleep: 8.0,
            coffee: 1.0,
        })?;
        assert_eq!(prediction.actual_sleep_seconds, 29_040.0);
        Ok(())
    }

    #[test]
    fn networked_models_are_not_offered() -> Result<(), Box<dyn std::error::Error>> {
        let config: ModelFile = serde_json::from_str(
            r#"{"model": "remote", "params": {"endpoint": "http://127.0.0.1:9/predict"}}"#,
        )?;

        let result = create_model(&config);

        assert!(matches!(result, Err(ModelFileError::Invalid(message)) if message == "unknown model: remote"));
        Ok(())
    }

    #[test]
    fn unknown_model_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
        let config: ModelFile = serde_json::from_str(r#"{"model": "forest_v9"}"#)?;

        let result = create_model(&config);

        assert!(matches!(result, Err(ModelFileError::Invalid(message)) if message == "unknown model: forest_v9"));
        Ok(())
    }

    #[test]
    fn missing_params_fail_to_parse() -> Result<(), Box<dyn std::error::Error>> {
        let config: ModelFile =
            serde_json::from_str(r#"{"model": "linear_v1", "params": {"intercept": 1.0}}"#)?;

        let result = create_model(&config);

        assert!(matches!(result, Err(ModelFileError::Parse(_))));
        Ok(())
    }

    #[test]
    fn missing_file_returns_read_error() -> Result<(), Box<dyn std::error::Error>> {
        let path = temp_model_path("missing")?;

        let result = load_model_from_path(&path);

        assert!(matches!(result, Err(ModelFileError::Read(_))));
        Ok(())
    }

    #[test]
    fn load_service_falls_back_to_unavailable_model() -> Result<(), Box<dyn std::error::Error>> {
        let path = temp_model_path("broken")?;
        fs::write(&path, "{ not json")?;

        let service = load_service(Some(&path));
        let _ = fs::remove_file(&path);

        assert_eq!(service.name(), "unavailable");
        assert!(!service.is_available());
        Ok(())
    }

    #[test]
    fn load_service_without_path_is_unavailable() {
        let service = load_service(None);

        assert!(!service.is_available());
    }
}
