//! Bedtime derivation: form inputs in, short time-of-day string out.
//!
//! The estimator turns the three inputs into model features, asks the
//! prediction service for the achievable sleep, and subtracts it from the wake
//! time on a calendar date so that results before midnight come out right.
//! Any failure collapses into [`FALLBACK_MESSAGE`].

use crate::estimation::model::{PredictionError, PredictionService};
use crate::inputs::SleepInputs;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::{date, format_description};
use time::{Date, Duration, PrimitiveDateTime, Time};
use tracing::warn;

pub const FALLBACK_MESSAGE: &str = "Error: Unable to calculate bedtime.";

/// Longest sleep a service may report before its answer is rejected.
pub const MAX_SLEEP_SECONDS: f64 = 86_400.0;

const ANCHOR_DATE: Date = date!(2024-01-02);

const TWELVE_HOUR_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period]");
const TWENTY_FOUR_HOUR_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ClockStyle {
    /// "11:00 PM"
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// "23:00"
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl ClockStyle {
    pub fn format(self, time: Time) -> Result<String, time::error::Format> {
        match self {
            ClockStyle::TwelveHour => time.format(TWELVE_HOUR_FORMAT),
            ClockStyle::TwentyFourHour => time.format(TWENTY_FOUR_HOUR_FORMAT),
        }
    }
}

#[derive(Debug, Error)]
pub enum BedtimeError {
    #[error(transparent)]
    PredictionUnavailable(#[from] PredictionError),
    #[error("bedtime arithmetic out of range")]
    Arithmetic,
    #[error("failed to format bedtime: {0}")]
    Format(#[from] time::error::Format),
}

#[derive(Debug, Clone)]
pub struct BedtimeEstimator {
    service: Arc<dyn PredictionService>,
    clock: ClockStyle,
}

impl BedtimeEstimator {
    pub fn new(service: Arc<dyn PredictionService>, clock: ClockStyle) -> Self {
        Self { service, clock }
    }

    /// Recommended bedtime as a time of day.
    pub fn try_estimate(&self, inputs: &SleepInputs) -> Result<Time, BedtimeError> {
        let prediction = self.service.predict(&inputs.features())?;
        let actual_sleep_seconds = prediction.actual_sleep_seconds;
        if !(0.0..=MAX_SLEEP_SECONDS).contains(&actual_sleep_seconds) {
            return Err(PredictionError::InvalidOutput(actual_sleep_seconds).into());
        }

        let wake = PrimitiveDateTime::new(ANCHOR_DATE, inputs.wake_time.as_time());
        let bedtime = wake
            .checked_sub(Duration::seconds_f64(actual_sleep_seconds))
            .ok_or(BedtimeError::Arithmetic)?;
        Ok(bedtime.time())
    }

    /// Recommended bedtime formatted for display, or [`FALLBACK_MESSAGE`].
    ///
    /// Never fails; errors are logged and replaced by the fallback.
    pub fn estimate(&self, inputs: &SleepInputs) -> String {
        let formatted = self
            .try_estimate(inputs)
            .and_then(|bedtime| self.clock.format(bedtime).map_err(BedtimeError::from));

        match formatted {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    error = %err,
                    service = self.service.name(),
                    wake_time = %inputs.wake_time,
                    sleep_goal_hours = inputs.sleep_goal.hours(),
                    caffeine_cups = inputs.caffeine.get(),
                    "Unable to calculate bedtime"
                );
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}
