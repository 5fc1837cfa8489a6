pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod recommend;
pub mod sources;
pub mod telemetry;
