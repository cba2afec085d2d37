//! Core error types for mindpulse-core.
//!
//! This module defines the error hierarchy using thiserror. Flow errors never
//! mutate the session: a rejected event leaves the journey exactly where it was.

use std::path::PathBuf;
use thiserror::Error;

use crate::flow::Screen;

/// Core error type for mindpulse-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Journey flow errors
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised by the journey flow controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The event has no transition from the current screen.
    #[error("'{event}' is not available on the {screen} screen")]
    UnexpectedEvent { screen: Screen, event: &'static str },

    /// Email failed the `local@domain.tld` shape check.
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    /// A recording was submitted while the previous one is still being analyzed.
    #[error("an analysis is already in progress")]
    AnalysisInFlight,

    /// `finish_analysis` was called without a recording in flight.
    #[error("no analysis is pending")]
    NoAnalysisPending,

    /// The analysis task terminated without producing a result.
    #[error("analysis task ended unexpectedly: {0}")]
    AnalysisAborted(String),

    /// A background task was requested outside a tokio runtime.
    #[error("no async runtime available: {0}")]
    RuntimeUnavailable(String),

    /// The therapy screen needs an analysis result to pick an exercise.
    #[error("no analysis result is available for this day")]
    MissingAnalysis,

    /// The audio capture collaborator could not provide a recording.
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Failures of the audio capture collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The user (or the platform) refused microphone access.
    #[error("microphone permission denied")]
    PermissionDenied,

    /// No usable input device.
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),
}

impl CaptureError {
    /// The single user-visible notice for a failed capture attempt.
    pub fn notice(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied | CaptureError::DeviceUnavailable(_) => {
                "Could not access microphone. Please grant permission."
            }
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
