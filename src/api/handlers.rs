use crate::api::responses::{
    ApiErrorCode, ApiErrorResponse, BedtimeStatus, BedtimeSuccessResponse, CaffeineOptions,
    HealthStatus, HealthSuccessResponse, InputsUpdateRequest, OptionsResponse, SleepGoalOptions,
    WakeTimeOptions,
};
use crate::bedtime::FALLBACK_MESSAGE;
use crate::error::InputError;
use crate::inputs::{
    CAFFEINE_MAX_CUPS, CAFFEINE_MIN_CUPS, CaffeineCups, DEFAULT_CAFFEINE_CUPS,
    DEFAULT_SLEEP_GOAL_HOURS, SLEEP_GOAL_MAX_HOURS, SLEEP_GOAL_MIN_HOURS, SLEEP_GOAL_STEP_HOURS,
    SleepGoalHours, SleepInputs, WakeTime,
};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, info, warn};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
enum TimestampError {
    Format(time::error::Format),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Format(err) => write!(f, "timestamp format error: {err}"),
        }
    }
}

pub enum BedtimeResponse {
    Success(BedtimeSuccessResponse),
    Error {
        status: StatusCode,
        body: ApiErrorResponse,
    },
}

impl IntoResponse for BedtimeResponse {
    fn into_response(self) -> Response {
        match self {
            BedtimeResponse::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            BedtimeResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

pub async fn get_bedtime(State(state): State<Arc<RwLock<AppState>>>) -> impl IntoResponse {
    build_bedtime_response(state, SystemTime::now())
}

/// Malformed bodies are answered with the same `INVALID_INPUT` shape as
/// out-of-range values, never axum's plain-text rejection.
pub async fn put_inputs(
    State(state): State<Arc<RwLock<AppState>>>,
    payload: Result<Json<InputsUpdateRequest>, JsonRejection>,
) -> impl IntoResponse {
    match payload {
        Ok(Json(update)) => build_update_response(state, update, SystemTime::now()),
        Err(rejection) => rejected_body(&rejection, SystemTime::now()),
    }
}

pub enum HealthResponse {
    Ok(HealthSuccessResponse),
    Unavailable(HealthSuccessResponse),
    Error {
        status: StatusCode,
        body: ApiErrorResponse,
    },
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        match self {
            HealthResponse::Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            HealthResponse::Unavailable(body) => {
                (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
            }
            HealthResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

pub async fn get_health(State(state): State<Arc<RwLock<AppState>>>) -> impl IntoResponse {
    build_health_response(state, SystemTime::now())
}

pub async fn get_options() -> Json<OptionsResponse> {
    Json(build_options_response())
}

fn build_bedtime_response(state: Arc<RwLock<AppState>>, now: SystemTime) -> BedtimeResponse {
    let (inputs, estimator) = match state.read() {
        Ok(guard) => (*guard.inputs(), guard.estimator()),
        Err(_) => {
            return internal_error("/api/bedtime", "state lock poisoned while reading inputs");
        }
    };

    let bedtime = estimator.estimate(&inputs);
    bedtime_success(&inputs, bedtime, now, "/api/bedtime")
}

fn build_update_response(
    state: Arc<RwLock<AppState>>,
    update: InputsUpdateRequest,
    now: SystemTime,
) -> BedtimeResponse {
    let (inputs, estimator) = {
        let mut guard = match state.write() {
            Ok(guard) => guard,
            Err(_) => {
                return internal_error("/api/inputs", "state lock poisoned while updating inputs");
            }
        };

        let inputs = match apply_update(guard.inputs(), &update) {
            Ok(inputs) => inputs,
            Err(err) => {
                drop(guard);
                return invalid_input(err.to_string(), now);
            }
        };
        guard.set_inputs(inputs);
        (inputs, guard.estimator())
    };

    let bedtime = estimator.estimate(&inputs);
    info!(
        wake_time = %inputs.wake_time,
        sleep_goal_hours = inputs.sleep_goal.hours(),
        caffeine_cups = inputs.caffeine.get(),
        bedtime = %bedtime,
        "Form inputs updated"
    );

    bedtime_success(&inputs, bedtime, now, "/api/inputs")
}

/// Validates every field before anything is applied.
fn apply_update(
    current: &SleepInputs,
    update: &InputsUpdateRequest,
) -> Result<SleepInputs, InputError> {
    let mut inputs = *current;
    if let Some(wake_time) = update.wake_time.as_deref() {
        inputs.wake_time = wake_time.parse::<WakeTime>()?;
    }
    if let Some(hours) = update.sleep_goal_hours {
        inputs.sleep_goal = SleepGoalHours::new(hours)?;
    }
    if let Some(cups) = update.caffeine_cups {
        inputs.caffeine = CaffeineCups::new(cups)?;
    }
    Ok(inputs)
}

fn bedtime_success(
    inputs: &SleepInputs,
    bedtime: String,
    now: SystemTime,
    route: &str,
) -> BedtimeResponse {
    let status = if bedtime == FALLBACK_MESSAGE {
        BedtimeStatus::Error
    } else {
        BedtimeStatus::Ok
    };

    match format_timestamp(now) {
        Ok(timestamp) => BedtimeResponse::Success(BedtimeSuccessResponse {
            wake_time: inputs.wake_time.to_string(),
            sleep_goal_hours: inputs.sleep_goal.hours(),
            caffeine_cups: inputs.caffeine.get(),
            bedtime,
            status,
            timestamp,
        }),
        Err(_err) => internal_error(route, "timestamp formatting failure"),
    }
}

fn invalid_input(message: String, now: SystemTime) -> BedtimeResponse {
    match format_timestamp(now) {
        Ok(timestamp) => BedtimeResponse::Error {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ApiErrorResponse {
                error_code: ApiErrorCode::InvalidInput,
                error_message: message,
                timestamp,
            },
        },
        Err(_err) => internal_error("/api/inputs", "timestamp formatting failure"),
    }
}

fn rejected_body(rejection: &JsonRejection, now: SystemTime) -> BedtimeResponse {
    warn!(status = %rejection.status(), reason = %rejection.body_text(), "Rejected inputs body");
    invalid_input(rejection.body_text(), now)
}

fn internal_error(route: &str, message: &str) -> BedtimeResponse {
    error!(route = route, message = message, "Internal error while handling request");
    BedtimeResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: internal_error_body(),
    }
}

fn internal_error_body() -> ApiErrorResponse {
    let formatted = format_timestamp(SystemTime::now()).unwrap_or_else(|err| {
        error!(error = %err, "Failed to format internal error timestamp");
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
    });
    ApiErrorResponse {
        error_code: ApiErrorCode::InternalError,
        error_message: INTERNAL_ERROR_MESSAGE.to_string(),
        timestamp: formatted,
    }
}

fn format_timestamp(timestamp: SystemTime) -> Result<String, TimestampError> {
    let datetime = OffsetDateTime::from(timestamp);
    datetime.format(&Rfc3339).map_err(TimestampError::Format)
}

fn build_health_response(state: Arc<RwLock<AppState>>, now: SystemTime) -> HealthResponse {
    let (available, model) = match state.read() {
        Ok(guard) => (
            guard.service().is_available(),
            guard.service().name().to_string(),
        ),
        Err(_) => {
            error!(
                message = "state lock poisoned while reading model",
                "Internal error while handling /api/health"
            );
            return HealthResponse::Error {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: internal_error_body(),
            };
        }
    };

    let timestamp = match format_timestamp(now) {
        Ok(formatted) => formatted,
        Err(_) => {
            return HealthResponse::Error {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: internal_error_body(),
            };
        }
    };

    if available {
        HealthResponse::Ok(HealthSuccessResponse {
            status: HealthStatus::Ok,
            model,
            timestamp,
        })
    } else {
        HealthResponse::Unavailable(HealthSuccessResponse {
            status: HealthStatus::Ko,
            model,
            timestamp,
        })
    }
}

fn build_options_response() -> OptionsResponse {
    OptionsResponse {
        wake_time: WakeTimeOptions {
            default: WakeTime::default().to_string(),
            format: "HH:MM",
        },
        sleep_goal: SleepGoalOptions {
            min_hours: SLEEP_GOAL_MIN_HOURS,
            max_hours: SLEEP_GOAL_MAX_HOURS,
            step_hours: SLEEP_GOAL_STEP_HOURS,
            default_hours: DEFAULT_SLEEP_GOAL_HOURS,
        },
        caffeine_cups: CaffeineOptions {
            min: CAFFEINE_MIN_CUPS,
            max: CAFFEINE_MAX_CUPS,
            default: DEFAULT_CAFFEINE_CUPS,
            labels: CaffeineCups::choices().map(|cups| cups.label()).collect(),
        },
    }
}
