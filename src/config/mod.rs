//! Configuration module for the Wolof TTS demo.
//!
//! Provides CLI argument parsing, device selection and the model catalog.

#[allow(clippy::module_inception)]
mod config;
pub mod models;

pub use config::{AppConfig, Provider};
