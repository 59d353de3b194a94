//! Shared configuration and errors for the pathwatch workspace.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`Config`] and its sections ([`WatchConfig`], [`PathConfig`], [`LogConfig`])
//! - [`ConfigError`] for loading and validation failures

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{Config, LogConfig, PathConfig, WatchConfig};
pub use error::ConfigError;
