mod countdown;
mod guided;
mod kind;
mod plan;
mod runner;

use std::time::Duration;

pub use countdown::{CountdownState, PhasedCountdown};
pub use guided::{GuidedExercise, GuidedStep};
pub use kind::{ExerciseKind, ExerciseProgram};
pub use plan::{Phase, PhasePlan, DEFAULT_CYCLES};
pub use runner::{Completion, CountdownView, ExerciseTimer, DEFAULT_TICK};

/// An exercise instance owned by the therapy screen.
///
/// Timed exercises hold a running [`ExerciseTimer`]; dropping the value
/// cancels its ticks.
#[derive(Debug)]
pub enum ActiveExercise {
    Timed {
        kind: ExerciseKind,
        timer: ExerciseTimer,
    },
    Guided {
        kind: ExerciseKind,
        exercise: GuidedExercise,
    },
}

impl ActiveExercise {
    /// Instantiate `kind`. Timed programs start ticking immediately and fail
    /// outside a tokio runtime. `cycles` overrides the preset count.
    pub fn launch(kind: ExerciseKind, tick: Duration, cycles: Option<u32>) -> crate::Result<Self> {
        Ok(match kind.program() {
            ExerciseProgram::Timed { plan } => {
                let plan = match cycles {
                    Some(n) => plan.with_cycles(n)?,
                    None => plan,
                };
                ActiveExercise::Timed {
                    kind,
                    timer: ExerciseTimer::start(plan, tick)?,
                }
            }
            ExerciseProgram::Guided { steps } => ActiveExercise::Guided {
                kind,
                exercise: GuidedExercise::new(steps),
            },
        })
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            ActiveExercise::Timed { kind, .. } | ActiveExercise::Guided { kind, .. } => *kind,
        }
    }

    /// Early exit for either program type. Returns `true` if the request was
    /// accepted.
    pub fn skip(&mut self) -> bool {
        match self {
            ActiveExercise::Timed { timer, .. } => timer.skip(),
            ActiveExercise::Guided { exercise, .. } => exercise.skip(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn launch_picks_program_by_kind() {
        let timed = ActiveExercise::launch(ExerciseKind::BoxBreathing, DEFAULT_TICK, Some(2)).unwrap();
        match timed {
            ActiveExercise::Timed { mut timer, .. } => {
                assert_eq!(timer.view().total_cycles, 2);
                let done = timer.completed().await.unwrap();
                assert_eq!(done.cycles_completed, 2);
            }
            other => panic!("expected timed exercise, got {other:?}"),
        }

        let guided = ActiveExercise::launch(ExerciseKind::Grounding, DEFAULT_TICK, None).unwrap();
        assert_eq!(guided.kind(), ExerciseKind::Grounding);
        assert!(matches!(guided, ActiveExercise::Guided { ref exercise, .. } if exercise.len() == 5));
    }

    #[tokio::test]
    async fn zero_cycle_override_is_rejected() {
        assert!(ActiveExercise::launch(ExerciseKind::PacedBreathing, DEFAULT_TICK, Some(0)).is_err());
    }
}
