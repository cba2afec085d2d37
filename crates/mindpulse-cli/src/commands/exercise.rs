use std::time::Duration;

use clap::Subcommand;
use mindpulse_core::exercise::{ExerciseProgram, ExerciseTimer, GuidedExercise};
use mindpulse_core::{ActiveExercise, Config, ExerciseKind};
use serde_json::json;

use super::{print_json, print_json_pretty, runtime, CliResult};

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// List the exercise catalogue
    List,
    /// Run one exercise, printing its events as JSON lines
    Run {
        /// Exercise slug or title (e.g. "box-breathing")
        kind: ExerciseKind,
        /// Tick period in milliseconds (defaults to exercise.tick_ms)
        #[arg(long)]
        tick_ms: Option<u64>,
        /// Override the number of breathing cycles
        #[arg(long)]
        cycles: Option<u32>,
        /// Skip the exercise after this many ticks
        #[arg(long)]
        skip_after: Option<u32>,
    },
}

pub fn run(action: ExerciseAction) -> CliResult {
    match action {
        ExerciseAction::List => {
            let catalogue: Vec<_> = ExerciseKind::ALL
                .into_iter()
                .map(|kind| match kind.program() {
                    ExerciseProgram::Timed { plan } => json!({
                        "slug": kind.slug(),
                        "title": kind.title(),
                        "timed": true,
                        "phases": plan.phases(),
                        "total_cycles": plan.total_cycles(),
                        "total_secs": plan.total_secs(),
                    }),
                    ExerciseProgram::Guided { steps } => json!({
                        "slug": kind.slug(),
                        "title": kind.title(),
                        "timed": false,
                        "steps": steps,
                    }),
                })
                .collect();
            print_json_pretty(&catalogue)?;
        }
        ExerciseAction::Run {
            kind,
            tick_ms,
            cycles,
            skip_after,
        } => {
            let config = Config::load()?;
            let tick = Duration::from_millis(tick_ms.unwrap_or(config.exercise.tick_ms).max(1));
            let cycles = cycles.unwrap_or(config.exercise.total_cycles);
            runtime()?.block_on(run_exercise(kind, tick, cycles, skip_after))?;
        }
    }
    Ok(())
}

async fn run_exercise(kind: ExerciseKind, tick: Duration, cycles: u32, skip_after: Option<u32>) -> CliResult {
    match ActiveExercise::launch(kind, tick, Some(cycles))? {
        ActiveExercise::Timed { timer, .. } => run_timed(timer, tick, skip_after).await,
        ActiveExercise::Guided { exercise, .. } => walk_guided(exercise, skip_after),
    }
}

/// Print events and a countdown snapshot per tick until the timer's event
/// queue closes.
async fn run_timed(mut timer: ExerciseTimer, tick: Duration, skip_after: Option<u32>) -> CliResult {
    let mut view = timer.watch();
    let mut watching = true;
    let skip_timer = tokio::time::sleep(tick * skip_after.unwrap_or(0));
    tokio::pin!(skip_timer);
    let mut skip_pending = skip_after.is_some();

    loop {
        tokio::select! {
            biased;
            () = &mut skip_timer, if skip_pending => {
                skip_pending = false;
                timer.skip();
            }
            event = timer.next_event() => match event {
                Some(event) => print_json(&event)?,
                None => break,
            },
            changed = view.changed(), if watching => match changed {
                Ok(()) => {
                    let snapshot = view.borrow_and_update().snapshot();
                    print_json(&snapshot)?;
                }
                Err(_) => watching = false,
            },
        }
    }
    if let Some(done) = timer.completed().await {
        print_json(&json!({ "completed": done }))?;
    }
    Ok(())
}

fn walk_guided(mut exercise: GuidedExercise, skip_after: Option<u32>) -> CliResult {
    let mut shown = 0;
    while let Some(step) = exercise.current() {
        if skip_after.is_some_and(|n| shown >= n) {
            exercise.skip();
            break;
        }
        print_json(&json!({
            "step": exercise.step_index() + 1,
            "of": exercise.len(),
            "prompt": step.prompt,
            "slots": step.slots,
        }))?;
        shown += 1;
        exercise.advance();
    }
    print_json(&json!({
        "completed": {
            "steps": exercise.len(),
            "skipped": exercise.was_skipped(),
        }
    }))?;
    Ok(())
}
