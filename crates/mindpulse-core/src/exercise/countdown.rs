//! Phased countdown state machine.
//!
//! Pure and clock-free: every `tick()` stands for one elapsed second. The
//! self-driving wrapper lives in [`super::runner`].
//!
//! ## State Transitions
//!
//! ```text
//! Running -> Completed      (last phase of the last cycle reaches zero)
//! Running -> Skipped        (skip)
//! ```
//!
//! Both terminal states are absorbing: `tick()` and `skip()` return `None`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::plan::{Phase, PhasePlan};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Running,
    Completed,
    Skipped,
}

impl CountdownState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CountdownState::Running)
    }
}

/// Countdown over a [`PhasePlan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhasedCountdown {
    plan: PhasePlan,
    state: CountdownState,
    phase_index: usize,
    seconds_remaining: u32,
    cycles_completed: u32,
    /// Number of phases that ran down to zero.
    phases_elapsed: u32,
}

impl PhasedCountdown {
    /// Starts at the first phase with its full duration.
    pub fn new(plan: PhasePlan) -> Self {
        let seconds_remaining = plan.phases().first().map(|p| p.duration_secs).unwrap_or(0);
        Self {
            plan,
            state: CountdownState::Running,
            phase_index: 0,
            seconds_remaining,
            cycles_completed: 0,
            phases_elapsed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.plan.phases().get(self.phase_index)
    }

    pub fn phase_name(&self) -> &str {
        self.current_phase().map(|p| p.name.as_str()).unwrap_or_default()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    pub fn phases_elapsed(&self) -> u32 {
        self.phases_elapsed
    }

    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One elapsed second.
    ///
    /// Returns `Some(Event::PhaseAdvanced)` when a phase ends and the next
    /// one begins, `Some(Event::ExerciseCompleted)` exactly once when the
    /// final cycle ends, and `None` otherwise.
    pub fn tick(&mut self) -> Option<Event> {
        if self.is_terminal() {
            return None;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining > 0 {
            return None;
        }

        self.phases_elapsed += 1;
        let mut next = self.phase_index + 1;
        if next >= self.plan.phases().len() {
            next = 0;
            self.cycles_completed += 1;
        }

        if self.cycles_completed >= self.plan.total_cycles() {
            self.state = CountdownState::Completed;
            self.phase_index = 0;
            return Some(Event::ExerciseCompleted {
                cycles_completed: self.cycles_completed,
                skipped: false,
                at: Utc::now(),
            });
        }

        self.phase_index = next;
        let phase = &self.plan.phases()[next];
        self.seconds_remaining = phase.duration_secs;
        Some(Event::PhaseAdvanced {
            phase_index: next,
            phase_name: phase.name.clone(),
            duration_secs: phase.duration_secs,
            cycles_completed: self.cycles_completed,
            at: Utc::now(),
        })
    }

    /// Early exit. Fires the completion event once; later calls are no-ops.
    pub fn skip(&mut self) -> Option<Event> {
        if self.is_terminal() {
            return None;
        }
        self.state = CountdownState::Skipped;
        self.seconds_remaining = 0;
        Some(Event::ExerciseCompleted {
            cycles_completed: self.cycles_completed,
            skipped: true,
            at: Utc::now(),
        })
    }
}
