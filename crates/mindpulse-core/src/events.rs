use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::CognitiveLoad;
use crate::exercise::{CountdownState, ExerciseKind};
use crate::flow::Screen;

/// Every state change in the system produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    // ── Journey flow ────────────────────────────────────────────────
    JourneyStarted {
        at: DateTime<Utc>,
    },
    AssessmentCompleted {
        score: u32,
        at: DateTime<Utc>,
    },
    EmailAccepted {
        email: String,
        at: DateTime<Utc>,
    },
    /// Recording handed over; the mock analysis is in flight.
    AnalysisStarted {
        day_number: u32,
        delay_ms: u64,
        at: DateTime<Utc>,
    },
    AnalysisCompleted {
        day_number: u32,
        calmness_score: u32,
        cognitive_load: CognitiveLoad,
        emotion: String,
        recommended_exercise: ExerciseKind,
        at: DateTime<Utc>,
    },
    TherapyStarted {
        exercise: ExerciseKind,
        at: DateTime<Utc>,
    },
    TherapyCompleted {
        at: DateTime<Utc>,
    },
    DayAdvanced {
        day_number: u32,
        at: DateTime<Utc>,
    },
    SubscriptionOffered {
        day_number: u32,
        improvement_score: u32,
        at: DateTime<Utc>,
    },
    /// Restart from the subscription screen back to the landing page.
    JourneyRestarted {
        at: DateTime<Utc>,
    },
    /// Redo today's recording from the results or therapy screen.
    DayRestarted {
        from: Screen,
        day_number: u32,
        at: DateTime<Utc>,
    },

    // ── Exercise timer ──────────────────────────────────────────────
    ExerciseStarted {
        total_cycles: u32,
        phase_count: usize,
        at: DateTime<Utc>,
    },
    PhaseAdvanced {
        phase_index: usize,
        phase_name: String,
        duration_secs: u32,
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
    CycleCompleted {
        cycles_completed: u32,
        total_cycles: u32,
        at: DateTime<Utc>,
    },
    ExerciseCompleted {
        cycles_completed: u32,
        skipped: bool,
        at: DateTime<Utc>,
    },
    CountdownSnapshot {
        state: CountdownState,
        phase_index: usize,
        phase_name: String,
        seconds_remaining: u32,
        cycles_completed: u32,
        total_cycles: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Stable snake_case name of the variant, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Event::JourneyStarted { .. } => "journey_started",
            Event::AssessmentCompleted { .. } => "assessment_completed",
            Event::EmailAccepted { .. } => "email_accepted",
            Event::AnalysisStarted { .. } => "analysis_started",
            Event::AnalysisCompleted { .. } => "analysis_completed",
            Event::TherapyStarted { .. } => "therapy_started",
            Event::TherapyCompleted { .. } => "therapy_completed",
            Event::DayAdvanced { .. } => "day_advanced",
            Event::SubscriptionOffered { .. } => "subscription_offered",
            Event::JourneyRestarted { .. } => "journey_restarted",
            Event::DayRestarted { .. } => "day_restarted",
            Event::ExerciseStarted { .. } => "exercise_started",
            Event::PhaseAdvanced { .. } => "phase_advanced",
            Event::CycleCompleted { .. } => "cycle_completed",
            Event::ExerciseCompleted { .. } => "exercise_completed",
            Event::CountdownSnapshot { .. } => "countdown_snapshot",
        }
    }
}
