//! # MindPulse Core Library
//!
//! Business logic for the MindPulse wellness journey. The CLI (and any other
//! front end) is a thin layer that forwards user actions into this crate and
//! renders the events it returns.
//!
//! ## Architecture
//!
//! - **Flow**: the journey state machine. A pure `Session::apply` transition
//!   wrapped by [`FlowController`], which also runs the mock analysis
//! - **Exercise**: the phased countdown behind every breathing exercise, its
//!   self-driving tokio runner, and the guided (prompt-by-prompt) exercises
//! - **Analysis**: fabricated voice analysis drawn from a fixed profile table
//! - **Storage**: TOML-based configuration; journey state is never persisted
//!
//! ## Key Components
//!
//! - [`FlowController`]: owns the session, one method per screen-exit event
//! - [`PhasedCountdown`]: pure countdown state machine
//! - [`ExerciseTimer`]: owned, cancel-on-drop ticking task
//! - [`RandomSource`]: the single seam for randomness

pub mod analysis;
pub mod assessment;
pub mod capture;
pub mod error;
pub mod events;
pub mod exercise;
pub mod flow;
pub mod journal;
pub mod random;
pub mod storage;

pub use analysis::{Analysis, AnalysisResult, CognitiveLoad, MockAnalyzer};
pub use assessment::{Assessment, StressLevel};
pub use capture::{AudioCapture, Recording};
pub use error::{CaptureError, ConfigError, CoreError, FlowError, Result, ValidationError};
pub use events::Event;
pub use exercise::{
    ActiveExercise, ExerciseKind, ExerciseTimer, GuidedExercise, PhasePlan, PhasedCountdown,
};
pub use flow::{FlowController, Screen, Session};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use storage::Config;
