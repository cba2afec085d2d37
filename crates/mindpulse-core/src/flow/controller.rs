//! Flow controller.
//!
//! Owns the [`Session`] and exposes one operation per screen-exit event. Each
//! operation runs the pure transition, stores the successor and returns the
//! resulting [`Event`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut flow = FlowController::new(&Config::default(), Box::new(ThreadRandom));
//! flow.start()?;
//! flow.complete_assessment(9)?;
//! flow.submit_email("x@y.com")?;
//! flow.recording_complete(recording)?;   // spawns the mock analysis
//! flow.finish_analysis().await?;         // -> results
//! ```

use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::session::{FlowEvent, Session};
use super::screen::Screen;
use crate::analysis::{Analysis, MockAnalyzer};
use crate::capture::{AudioCapture, Recording};
use crate::error::FlowError;
use crate::events::Event;
use crate::exercise::{ActiveExercise, ExerciseKind};
use crate::random::RandomSource;
use crate::storage::Config;

const DAY_PROMPTS: [&str; 5] = [
    "What's been weighing on your mind recently?",
    "How are you feeling compared to yesterday?",
    "What emotions are you noticing today?",
    "What's one thing that went well today?",
    "How has your week been?",
];

/// Prompt shown on the voice screen for `day` (1-based).
pub fn day_prompt(day: u32) -> &'static str {
    let index = (day.max(1) as usize - 1).min(DAY_PROMPTS.len() - 1);
    DAY_PROMPTS[index]
}

pub struct FlowController {
    session: Session,
    analyzer: MockAnalyzer,
    rng: Box<dyn RandomSource>,
    pending: Option<JoinHandle<Analysis>>,
    tick: Duration,
    total_cycles: u32,
    improvement_score: u32,
}

impl std::fmt::Debug for FlowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowController")
            .field("session", &self.session)
            .field("analyzer", &self.analyzer)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl FlowController {
    pub fn new(config: &Config, rng: Box<dyn RandomSource>) -> Self {
        Self {
            session: Session::new(config.journey.days),
            analyzer: MockAnalyzer::from_config(&config.analysis),
            rng,
            pending: None,
            tick: config.exercise.tick(),
            total_cycles: config.exercise.total_cycles,
            improvement_score: config.journey.improvement_score,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn day_prompt(&self) -> &'static str {
        day_prompt(self.session.day_number())
    }

    /// Placeholder shown on the subscription screen; not derived from history.
    pub fn improvement_score(&self) -> u32 {
        self.improvement_score
    }

    /// `true` once the in-flight analysis has finished its delay.
    pub fn analysis_ready(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| h.is_finished())
    }

    // ── Transitions ──────────────────────────────────────────────────

    fn apply(&mut self, event: FlowEvent) -> Result<(), FlowError> {
        let from = self.session.screen();
        match self.session.apply(&event) {
            Ok(next) => {
                debug!(%from, to = %next.screen(), event = event.name(), "transition");
                self.session = next;
                Ok(())
            }
            Err(err) => {
                warn!(screen = %from, event = event.name(), error = %err, "transition rejected");
                Err(err)
            }
        }
    }

    pub fn start(&mut self) -> Result<Event, FlowError> {
        self.apply(FlowEvent::Start)?;
        info!("journey started");
        Ok(Event::JourneyStarted { at: Utc::now() })
    }

    pub fn complete_assessment(&mut self, score: u32) -> Result<Event, FlowError> {
        self.apply(FlowEvent::CompleteAssessment { score })?;
        Ok(Event::AssessmentCompleted {
            score,
            at: Utc::now(),
        })
    }

    /// No transition (and nothing stored) unless `email` is well formed.
    pub fn submit_email(&mut self, email: &str) -> Result<Event, FlowError> {
        self.apply(FlowEvent::SubmitEmail {
            email: email.to_string(),
        })?;
        Ok(Event::EmailAccepted {
            email: email.to_string(),
            at: Utc::now(),
        })
    }

    /// Ask the capture collaborator for a recording and hand it over.
    ///
    /// A capture failure is reported once and never retried.
    pub fn record(&mut self, capture: &mut dyn AudioCapture) -> Result<Event, FlowError> {
        if self.session.screen() != Screen::Voice {
            return Err(FlowError::UnexpectedEvent {
                screen: self.session.screen(),
                event: FlowEvent::BeginAnalysis.name(),
            });
        }
        if self.session.is_analyzing() {
            return Err(FlowError::AnalysisInFlight);
        }
        let recording = capture.capture().map_err(|err| {
            warn!(error = %err, notice = err.notice(), "audio capture failed");
            FlowError::Capture(err)
        })?;
        self.recording_complete(recording)
    }

    /// Start the mock analysis for `recording`.
    ///
    /// The draw happens now and a spawned task holds it for the configured
    /// delay. The task is not cancelled if the caller stops waiting. Fails
    /// with `RuntimeUnavailable` outside a tokio runtime.
    pub fn recording_complete(&mut self, recording: Recording) -> Result<Event, FlowError> {
        let runtime =
            Handle::try_current().map_err(|e| FlowError::RuntimeUnavailable(e.to_string()))?;
        self.apply(FlowEvent::BeginAnalysis)?;

        let analysis = self.analyzer.draw(self.rng.as_mut());
        let delay = self.analyzer.delay();
        debug!(bytes = recording.len(), ?delay, "analysis started");
        self.pending = Some(runtime.spawn(MockAnalyzer::settle(delay, analysis)));

        Ok(Event::AnalysisStarted {
            day_number: self.session.day_number(),
            delay_ms: delay.as_millis() as u64,
            at: Utc::now(),
        })
    }

    /// Wait for the in-flight analysis and move to the results screen.
    ///
    /// Safe to call again if a previous wait was abandoned. If the task died
    /// (e.g. its runtime shut down) the recording control is released so the
    /// user can record again.
    pub async fn finish_analysis(&mut self) -> Result<Event, FlowError> {
        let handle = self.pending.as_mut().ok_or(FlowError::NoAnalysisPending)?;
        let joined = handle.await;
        self.pending = None;

        let analysis = match joined {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(error = %err, "analysis task ended without a result");
                self.apply(FlowEvent::AbortAnalysis)?;
                return Err(FlowError::AnalysisAborted(err.to_string()));
            }
        };
        let event = Event::AnalysisCompleted {
            day_number: self.session.day_number(),
            calmness_score: analysis.calmness_score,
            cognitive_load: analysis.result.cognitive_load,
            emotion: analysis.result.emotion.clone(),
            recommended_exercise: analysis.result.recommended_exercise,
            at: Utc::now(),
        };
        self.apply(FlowEvent::CompleteAnalysis { analysis })?;
        info!(day = self.session.day_number(), "analysis complete");
        Ok(event)
    }

    pub fn start_therapy(&mut self) -> Result<Event, FlowError> {
        let exercise = self
            .session
            .analysis()
            .map(|a| a.recommended_exercise)
            .ok_or(FlowError::MissingAnalysis)?;
        self.apply(FlowEvent::StartTherapy)?;
        Ok(Event::TherapyStarted {
            exercise,
            at: Utc::now(),
        })
    }

    /// Instantiate the exercise for the therapy screen: `kind`, or the
    /// recommended one when `None`. Timed exercises start ticking at once.
    pub fn launch_exercise(&self, kind: Option<ExerciseKind>) -> crate::Result<ActiveExercise> {
        if self.session.screen() != Screen::Therapy {
            return Err(FlowError::UnexpectedEvent {
                screen: self.session.screen(),
                event: "launch_exercise",
            }
            .into());
        }
        let kind = match kind {
            Some(kind) => kind,
            None => self
                .session
                .analysis()
                .map(|a| a.recommended_exercise)
                .ok_or(FlowError::MissingAnalysis)?,
        };
        debug!(exercise = kind.slug(), "launching exercise");
        ActiveExercise::launch(kind, self.tick, Some(self.total_cycles))
    }

    pub fn complete_therapy(&mut self) -> Result<Event, FlowError> {
        self.apply(FlowEvent::CompleteTherapy)?;
        Ok(Event::TherapyCompleted { at: Utc::now() })
    }

    /// "Continue tomorrow" from the calendar.
    pub fn continue_journey(&mut self) -> Result<Event, FlowError> {
        self.apply(FlowEvent::Continue)?;
        let day_number = self.session.day_number();
        if self.session.screen() == Screen::Subscription {
            info!(day_number, "journey finished, offering subscription");
            Ok(Event::SubscriptionOffered {
                day_number,
                improvement_score: self.improvement_score,
                at: Utc::now(),
            })
        } else {
            info!(day_number, "next day");
            Ok(Event::DayAdvanced {
                day_number,
                at: Utc::now(),
            })
        }
    }

    /// Restart today's recording (results/therapy) or the whole journey
    /// (subscription).
    pub fn restart(&mut self) -> Result<Event, FlowError> {
        let from = self.session.screen();
        self.apply(FlowEvent::Restart)?;
        if from == Screen::Subscription {
            info!("journey restarted");
            Ok(Event::JourneyRestarted { at: Utc::now() })
        } else {
            Ok(Event::DayRestarted {
                from,
                day_number: self.session.day_number(),
                at: Utc::now(),
            })
        }
    }
}
