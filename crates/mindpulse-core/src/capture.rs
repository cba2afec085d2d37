//! Boundary to the audio capture collaborator.
//!
//! The core never looks inside a [`Recording`]; only its arrival matters.

use crate::error::CaptureError;
use crate::exercise::{Phase, PhasePlan};

/// Length of the voice journal window.
pub const RECORDING_WINDOW_SECS: u32 = 10;

/// Opaque captured audio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recording(Vec<u8>);

impl Recording {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Supplies a recording when the user finishes speaking.
pub trait AudioCapture {
    fn capture(&mut self) -> Result<Recording, CaptureError>;
}

/// Countdown shown while recording: one ten-second phase, one cycle.
pub fn recording_window() -> PhasePlan {
    PhasePlan::new(
        vec![Phase::new("recording", RECORDING_WINDOW_SECS).with_cue("Listening")],
        1,
    )
    .unwrap_or_else(|_| unreachable!("recording window is a valid plan"))
}

/// Capture stand-in that returns a silent buffer, or a fixed failure.
#[derive(Debug, Clone, Default)]
pub struct SilentCapture {
    failure: Option<CaptureError>,
    attempts: u32,
}

impl SilentCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every attempt fails with `error`.
    pub fn failing(error: CaptureError) -> Self {
        Self {
            failure: Some(error),
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl AudioCapture for SilentCapture {
    fn capture(&mut self) -> Result<Recording, CaptureError> {
        self.attempts += 1;
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(Recording::new(vec![0; 16_000])),
        }
    }
}
