pub mod analytics;
pub mod chat;
pub mod config;
pub mod error;
pub mod telemetry;
