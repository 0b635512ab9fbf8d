//! Driver crate for the book recommendation pipeline.
//!
//! This crate contains the driver that runs every stage of the pipeline in
//! order, and the configuration it is built from.

pub mod config;
pub mod orchestrator;

pub use config::{ConfigError, GraphConfig, PipelineConfig, RemoteConfig};
pub use orchestrator::{PipelineDriver, PipelineError, PipelineReport};
