//! Self-driving exercise timer.
//!
//! Wraps a [`PhasedCountdown`] in a spawned task that ticks once per
//! interval. The task owns the countdown; callers observe it through a
//! `watch` channel, read events from an unbounded `mpsc` channel and learn
//! about completion through a `oneshot`, so completion is delivered at most
//! once by construction.
//!
//! Dropping the [`ExerciseTimer`] aborts the task. No tick can fire after the
//! owning screen is gone.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::countdown::{CountdownState, PhasedCountdown};
use super::plan::PhasePlan;
use crate::error::FlowError;
use crate::events::Event;

/// Default tick period: one second per countdown step.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Read-only view of a running countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownView {
    pub state: CountdownState,
    pub phase_index: usize,
    pub phase_name: String,
    pub cue: String,
    pub seconds_remaining: u32,
    pub cycles_completed: u32,
    pub total_cycles: u32,
}

impl From<&PhasedCountdown> for CountdownView {
    fn from(countdown: &PhasedCountdown) -> Self {
        Self {
            state: countdown.state(),
            phase_index: countdown.phase_index(),
            phase_name: countdown.phase_name().to_string(),
            cue: countdown
                .current_phase()
                .map(|p| p.cue.clone())
                .unwrap_or_default(),
            seconds_remaining: countdown.seconds_remaining(),
            cycles_completed: countdown.cycles_completed(),
            total_cycles: countdown.plan().total_cycles(),
        }
    }
}

impl CountdownView {
    /// The view as a `CountdownSnapshot` event.
    pub fn snapshot(&self) -> Event {
        Event::CountdownSnapshot {
            state: self.state,
            phase_index: self.phase_index,
            phase_name: self.phase_name.clone(),
            seconds_remaining: self.seconds_remaining,
            cycles_completed: self.cycles_completed,
            total_cycles: self.total_cycles,
            at: Utc::now(),
        }
    }
}

/// How the exercise ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub cycles_completed: u32,
    pub skipped: bool,
}

#[derive(Debug)]
enum Control {
    Skip,
}

/// Owned handle to a running countdown task.
#[derive(Debug)]
pub struct ExerciseTimer {
    view: watch::Receiver<CountdownView>,
    events: mpsc::UnboundedReceiver<Event>,
    control: mpsc::Sender<Control>,
    completion: Option<oneshot::Receiver<Completion>>,
    task: JoinHandle<()>,
}

impl ExerciseTimer {
    /// Spawn the ticking task on the current tokio runtime.
    pub fn start(plan: PhasePlan, tick: Duration) -> crate::Result<Self> {
        let runtime =
            Handle::try_current().map_err(|e| FlowError::RuntimeUnavailable(e.to_string()))?;
        let countdown = PhasedCountdown::new(plan);
        let (view_tx, view) = watch::channel(CountdownView::from(&countdown));
        let (event_tx, events) = mpsc::unbounded_channel();
        let (control, control_rx) = mpsc::channel(1);
        let (done_tx, done_rx) = oneshot::channel();

        let task = runtime.spawn(drive(countdown, tick, view_tx, event_tx, control_rx, done_tx));

        Ok(Self {
            view,
            events,
            control,
            completion: Some(done_rx),
            task,
        })
    }

    pub fn view(&self) -> CountdownView {
        self.view.borrow().clone()
    }

    /// A receiver that is notified on every change.
    pub fn watch(&self) -> watch::Receiver<CountdownView> {
        self.view.clone()
    }

    /// Next timer event, or `None` once the task has finished and the
    /// queue is drained.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<Event> {
        self.events.try_recv().ok()
    }

    /// Request an early exit. Returns `false` when the timer has already
    /// finished or a skip is already queued.
    ///
    /// `true` only means the request was queued: if the final tick lands
    /// first the run still ends with `skipped: false`. The [`Completion`]
    /// from [`completed`](Self::completed) is what actually happened.
    pub fn skip(&self) -> bool {
        self.control.try_send(Control::Skip).is_ok()
    }

    /// Wait for the exercise to end. Yields `Some` exactly once.
    pub async fn completed(&mut self) -> Option<Completion> {
        let rx = self.completion.take()?;
        rx.await.ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel pending ticks and release the task.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ExerciseTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn drive(
    mut countdown: PhasedCountdown,
    tick: Duration,
    view_tx: watch::Sender<CountdownView>,
    event_tx: mpsc::UnboundedSender<Event>,
    mut control_rx: mpsc::Receiver<Control>,
    done_tx: oneshot::Sender<Completion>,
) {
    let _ = event_tx.send(Event::ExerciseStarted {
        total_cycles: countdown.plan().total_cycles(),
        phase_count: countdown.plan().phases().len(),
        at: Utc::now(),
    });

    let mut ticker = interval_at(Instant::now() + tick, tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let completion = loop {
        let event = tokio::select! {
            _ = ticker.tick() => countdown.tick(),
            Some(Control::Skip) = control_rx.recv() => countdown.skip(),
        };

        if let Some(event) = event {
            debug!(event = event.name(), remaining = countdown.seconds_remaining(), "countdown");
            if closes_cycle(&event) {
                let _ = event_tx.send(Event::CycleCompleted {
                    cycles_completed: countdown.cycles_completed(),
                    total_cycles: countdown.plan().total_cycles(),
                    at: Utc::now(),
                });
            }
            let _ = event_tx.send(event);
        }
        view_tx.send_replace(CountdownView::from(&countdown));

        if countdown.is_terminal() {
            break Completion {
                cycles_completed: countdown.cycles_completed(),
                skipped: countdown.state() == CountdownState::Skipped,
            };
        }
    };

    let _ = done_tx.send(completion);
}

fn closes_cycle(event: &Event) -> bool {
    matches!(
        event,
        Event::PhaseAdvanced { phase_index: 0, .. } | Event::ExerciseCompleted { skipped: false, .. }
    )
}
