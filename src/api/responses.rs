use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BedtimeSuccessResponse {
    pub wake_time: String,
    pub sleep_goal_hours: f64,
    pub caffeine_cups: u8,
    pub bedtime: String,
    pub status: BedtimeStatus,
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum BedtimeStatus {
    Ok,
    Error,
}

/// Partial form edit; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputsUpdateRequest {
    #[serde(default)]
    pub wake_time: Option<String>,
    #[serde(default)]
    pub sleep_goal_hours: Option<f64>,
    #[serde(default)]
    pub caffeine_cups: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiErrorResponse {
    pub error_code: ApiErrorCode,
    pub error_message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    InvalidInput,
    InternalError,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Ko,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthSuccessResponse {
    pub status: HealthStatus,
    pub model: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OptionsResponse {
    pub wake_time: WakeTimeOptions,
    pub sleep_goal: SleepGoalOptions,
    pub caffeine_cups: CaffeineOptions,
}

#[derive(Debug, Serialize)]
pub struct WakeTimeOptions {
    pub default: String,
    pub format: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SleepGoalOptions {
    pub min_hours: f64,
    pub max_hours: f64,
    pub step_hours: f64,
    pub default_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct CaffeineOptions {
    pub min: u8,
    pub max: u8,
    pub default: u8,
    pub labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bedtime_response_serializes_lowercase_status() {
        let response = BedtimeSuccessResponse {
            wake_time: "07:00".to_string(),
            sleep_goal_hours: 8.0,
            caffeine_cups: 1,
            bedtime: "11:00 PM".to_string(),
            status: BedtimeStatus::Ok,
            timestamp: "2026-01-11T12:30:00Z".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize bedtime response");
        assert_eq!(
            value,
            json!({
                "wake_time": "07:00",
                "sleep_goal_hours": 8.0,
                "caffeine_cups": 1,
                "bedtime": "11:00 PM",
                "status": "ok",
                "timestamp": "2026-01-11T12:30:00Z"
            })
        );
    }

    #[test]
    fn error_response_uses_screaming_snake_case_code() {
        let response = ApiErrorResponse {
            error_code: ApiErrorCode::InvalidInput,
            error_message: "caffeine cups 0 is outside 1..=20".to_string(),
            timestamp: "2026-01-11T12:32:00Z".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize error response");
        assert_eq!(
            value,
            json!({
                "error_code": "INVALID_INPUT",
                "error_message": "caffeine cups 0 is outside 1..=20",
                "timestamp": "2026-01-11T12:32:00Z"
            })
        );
    }

    #[test]
    fn health_response_serializes_status() {
        let response = HealthSuccessResponse {
            status: HealthStatus::Ko,
            model: "unavailable".to_string(),
            timestamp: "2026-01-11T12:33:00Z".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize health response");
        assert_eq!(
            value,
            json!({
                "status": "ko",
                "model": "unavailable",
                "timestamp": "2026-01-11T12:33:00Z"
            })
        );
    }

    #[test]
    fn update_request_accepts_partial_bodies() {
        let request: InputsUpdateRequest =
            serde_json::from_value(json!({ "caffeine_cups": 4 })).expect("partial body");

        assert_eq!(request.caffeine_cups, Some(4));
        assert!(request.wake_time.is_none());
        assert!(request.sleep_goal_hours.is_none());
    }

    #[test]
    fn update_request_rejects_unknown_fields() {
        let result: Result<InputsUpdateRequest, _> =
            serde_json::from_value(json!({ "coffee": 4 }));

        assert!(result.is_err());
    }
}
