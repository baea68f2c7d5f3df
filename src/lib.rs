pub mod api;
pub mod bedtime;
pub mod config;
pub mod error;
pub mod estimation;
pub mod inputs;
pub mod state;
