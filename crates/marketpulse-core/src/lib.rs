//! Shared run configuration for the MarketPulse pipelines.
//!
//! A run is a stateless batch: a ticker set, a closed date interval, a set
//! of news source files, and output paths. Everything is resolved up front
//! into a [`RunConfig`] and passed by reference into the pipeline entry
//! points; there is no process-wide mutable state.

pub mod config;

pub use config::{
    load_run_config, load_run_config_from_env, ConfigError, NewsSourceConfig, RunConfig,
};
