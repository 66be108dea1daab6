pub mod config;
pub mod error;
pub mod guests;
pub mod telemetry;
