pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
pub mod workflows;
