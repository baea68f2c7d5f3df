//! Validated form inputs: wake-up time, sleep goal and caffeine intake.
//!
//! Out-of-range values are rejected here so they never reach the estimator.

use crate::error::InputError;
use crate::estimation::model::SleepFeatures;
use std::fmt;
use std::str::FromStr;
use time::Time;
use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, time};

pub const SLEEP_GOAL_MIN_HOURS: f64 = 4.0;
pub const SLEEP_GOAL_MAX_HOURS: f64 = 12.0;
pub const SLEEP_GOAL_STEP_HOURS: f64 = 0.25;
pub const DEFAULT_SLEEP_GOAL_HOURS: f64 = 8.0;

pub const CAFFEINE_MIN_CUPS: u8 = 1;
pub const CAFFEINE_MAX_CUPS: u8 = 20;
pub const DEFAULT_CAFFEINE_CUPS: u8 = 1;

pub const DEFAULT_WAKE_TIME: Time = time!(7:00);

const WAKE_TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

/// Hour and minute of the desired wake-up; seconds are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeTime(Time);

impl WakeTime {
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, InputError> {
        Time::from_hms(hour, minute, 0)
            .map(Self)
            .map_err(|err| InputError::WakeTime(err.to_string()))
    }

    pub fn hour(&self) -> u8 {
        self.0.hour()
    }

    pub fn minute(&self) -> u8 {
        self.0.minute()
    }

    pub fn seconds_since_midnight(&self) -> u32 {
        u32::from(self.hour()) * 3600 + u32::from(self.minute()) * 60
    }

    pub fn as_time(&self) -> Time {
        self.0
    }
}

impl Default for WakeTime {
    fn default() -> Self {
        Self(DEFAULT_WAKE_TIME)
    }
}

impl FromStr for WakeTime {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = Time::parse(s.trim(), WAKE_TIME_FORMAT)
            .map_err(|err| InputError::WakeTime(format!("{s:?}: {err}")))?;
        Self::from_hm(parsed.hour(), parsed.minute())
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Desired sleep in hours, on a 0.25 grid within `4.0..=12.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SleepGoalHours(f64);

impl SleepGoalHours {
    pub fn new(hours: f64) -> Result<Self, InputError> {
        if !(SLEEP_GOAL_MIN_HOURS..=SLEEP_GOAL_MAX_HOURS).contains(&hours) {
            return Err(InputError::SleepGoalOutOfRange(hours));
        }
        if (hours / SLEEP_GOAL_STEP_HOURS).fract() != 0.0 {
            return Err(InputError::SleepGoalOffStep(hours));
        }
        Ok(Self(hours))
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    /// One stepper press up, saturating at the maximum.
    pub fn increment(self) -> Self {
        Self((self.0 + SLEEP_GOAL_STEP_HOURS).min(SLEEP_GOAL_MAX_HOURS))
    }

    /// One stepper press down, saturating at the minimum.
    pub fn decrement(self) -> Self {
        Self((self.0 - SLEEP_GOAL_STEP_HOURS).max(SLEEP_GOAL_MIN_HOURS))
    }

    pub fn label(&self) -> String {
        format!("{} hours", self.0)
    }
}

impl Default for SleepGoalHours {
    fn default() -> Self {
        Self(DEFAULT_SLEEP_GOAL_HOURS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CaffeineCups(u8);

impl CaffeineCups {
    pub fn new(cups: u32) -> Result<Self, InputError> {
        match u8::try_from(cups) {
            Ok(cups) if (CAFFEINE_MIN_CUPS..=CAFFEINE_MAX_CUPS).contains(&cups) => Ok(Self(cups)),
            _ => Err(InputError::CaffeineOutOfRange(cups)),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Every value the cups picker offers, in ascending order.
    pub fn choices() -> impl Iterator<Item = CaffeineCups> {
        (CAFFEINE_MIN_CUPS..=CAFFEINE_MAX_CUPS).map(CaffeineCups)
    }

    pub fn label(&self) -> String {
        if self.0 == 1 {
            "1 cup".to_string()
        } else {
            format!("{} cups", self.0)
        }
    }
}

impl Default for CaffeineCups {
    fn default() -> Self {
        Self(DEFAULT_CAFFEINE_CUPS)
    }
}

/// The three form values for one session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SleepInputs {
    pub wake_time: WakeTime,
    pub sleep_goal: SleepGoalHours,
    pub caffeine: CaffeineCups,
}

impl SleepInputs {
    pub fn new(wake_time: WakeTime, sleep_goal: SleepGoalHours, caffeine: CaffeineCups) -> Self {
        Self {
            wake_time,
            sleep_goal,
            caffeine,
        }
    }

    pub fn features(&self) -> SleepFeatures {
        SleepFeatures {
            wake: f64::from(self.wake_time.seconds_since_midnight()),
            estimated_sleep: self.sleep_goal.hours(),
            coffee: f64::from(self.caffeine.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form_defaults() {
        let inputs = SleepInputs::default();

        assert_eq!(inputs.wake_time.to_string(), "07:00");
        assert_eq!(inputs.sleep_goal.hours(), 8.0);
        assert_eq!(inputs.caffeine.get(), 1);
    }

    #[test]
    fn sleep_goal_accepts_range_bounds() {
        assert!(SleepGoalHours::new(4.0).is_ok());
        assert!(SleepGoalHours::new(12.0).is_ok());
        assert!(SleepGoalHours::new(7.75).is_ok());
    }

    #[test]
    fn sleep_goal_rejects_out_of_range_and_off_step() {
        assert_eq!(
            SleepGoalHours::new(3.75),
            Err(InputError::SleepGoalOutOfRange(3.75))
        );
        assert_eq!(
            SleepGoalHours::new(12.25),
            Err(InputError::SleepGoalOutOfRange(12.25))
        );
        assert_eq!(
            SleepGoalHours::new(8.1),
            Err(InputError::SleepGoalOffStep(8.1))
        );
        assert!(SleepGoalHours::new(f64::NAN).is_err());
    }

    #[test]
    fn stepper_saturates_at_bounds() -> Result<(), InputError> {
        let max = SleepGoalHours::new(12.0)?;
        let min = SleepGoalHours::new(4.0)?;

        assert_eq!(max.increment(), max);
        assert_eq!(min.decrement(), min);
        assert_eq!(SleepGoalHours::default().increment().hours(), 8.25);
        assert_eq!(SleepGoalHours::default().decrement().hours(), 7.75);
        Ok(())
    }

    #[test]
    fn caffeine_range_is_one_to_twenty() {
        assert!(CaffeineCups::new(0).is_err());
        assert!(CaffeineCups::new(21).is_err());
        assert!(CaffeineCups::new(300).is_err());

        let choices: Vec<u8> = CaffeineCups::choices().map(|cups| cups.get()).collect();
        assert_eq!(choices.len(), 20);
        assert_eq!(choices.first(), Some(&1));
        assert_eq!(choices.last(), Some(&20));
    }

    #[test]
    fn wake_time_parses_and_converts_to_seconds() -> Result<(), InputError> {
        let wake: WakeTime = "06:30".parse()?;

        assert_eq!(wake.hour(), 6);
        assert_eq!(wake.minute(), 30);
        assert_eq!(wake.seconds_since_midnight(), 23_400);
        assert_eq!(wake.to_string(), "06:30");
        Ok(())
    }

    #[test]
    fn wake_time_rejects_garbage() {
        assert!("25:00".parse::<WakeTime>().is_err());
        assert!("seven".parse::<WakeTime>().is_err());
        assert!(WakeTime::from_hm(7, 60).is_err());
    }

    #[test]
    fn features_cast_cups_to_real() -> Result<(), InputError> {
        let inputs = SleepInputs::new(
            WakeTime::from_hm(7, 0)?,
            SleepGoalHours::new(8.0)?,
            CaffeineCups::new(20)?,
        );

        let features = inputs.features();

        assert_eq!(features.wake, 25_200.0);
        assert_eq!(features.estimated_sleep, 8.0);
        assert_eq!(features.coffee, 20.0);
        Ok(())
    }

    #[test]
    fn labels_read_like_the_form() -> Result<(), InputError> {
        assert_eq!(SleepGoalHours::new(8.25)?.label(), "8.25 hours");
        assert_eq!(SleepGoalHours::default().label(), "8 hours");
        assert_eq!(CaffeineCups::default().label(), "1 cup");
        assert_eq!(CaffeineCups::new(3)?.label(), "3 cups");
        Ok(())
    }
}
