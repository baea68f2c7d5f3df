use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("state lock poisoned")]
    StateLock,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("sleep goal {0} hours is outside 4.0..=12.0")]
    SleepGoalOutOfRange(f64),
    #[error("sleep goal {0} hours is not a multiple of 0.25")]
    SleepGoalOffStep(f64),
    #[error("caffeine cups {0} is outside 1..=20")]
    CaffeineOutOfRange(u32),
    #[error("invalid wake time: {0}")]
    WakeTime(String),
}
