//! Journey session and its pure transition function.
//!
//! ```text
//! landing -> assessment -> email -> voice -> results -> therapy -> calendar
//!                                     ^                               |
//!                                     +------- continue (day < N) ----+
//!                                                                     |
//!                       landing <- restart <- subscription <- (day >= N)
//! ```
//!
//! `Session::apply` never mutates; a rejected event returns an error and the
//! caller keeps the old value.

use serde::{Deserialize, Serialize};

use super::email::is_valid_email;
use super::screen::Screen;
use crate::analysis::{Analysis, AnalysisResult};
use crate::error::FlowError;

/// Days in the free journey before the upsell.
pub const DEFAULT_JOURNEY_DAYS: u32 = 5;

/// A screen-exit event with the data the exiting screen produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    Start,
    CompleteAssessment { score: u32 },
    SubmitEmail { email: String },
    /// Recording received; the analysis is now in flight.
    BeginAnalysis,
    /// The in-flight analysis produced its draw.
    CompleteAnalysis { analysis: Analysis },
    /// The in-flight analysis ended without a result.
    AbortAnalysis,
    StartTherapy,
    CompleteTherapy,
    Continue,
    Restart,
}

impl FlowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::Start => "start",
            FlowEvent::CompleteAssessment { .. } => "complete_assessment",
            FlowEvent::SubmitEmail { .. } => "submit_email",
            FlowEvent::BeginAnalysis => "recording_complete",
            FlowEvent::CompleteAnalysis { .. } => "analysis_complete",
            FlowEvent::AbortAnalysis => "analysis_aborted",
            FlowEvent::StartTherapy => "start_therapy",
            FlowEvent::CompleteTherapy => "complete_therapy",
            FlowEvent::Continue => "continue",
            FlowEvent::Restart => "restart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    screen: Screen,
    assessment_score: u32,
    user_email: String,
    day_number: u32,
    journey_days: u32,
    analysis: Option<AnalysisResult>,
    calmness_score: u32,
    has_journaled: bool,
    analyzing: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_JOURNEY_DAYS)
    }
}

impl Session {
    /// Fresh session on the landing screen. `journey_days` is the day on
    /// which "continue" leads to the subscription screen.
    pub fn new(journey_days: u32) -> Self {
        Self {
            screen: Screen::Landing,
            assessment_score: 0,
            user_email: String::new(),
            day_number: 1,
            journey_days: journey_days.max(1),
            analysis: None,
            calmness_score: 0,
            has_journaled: false,
            analyzing: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn assessment_score(&self) -> u32 {
        self.assessment_score
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn day_number(&self) -> u32 {
        self.day_number
    }

    pub fn journey_days(&self) -> u32 {
        self.journey_days
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn calmness_score(&self) -> u32 {
        self.calmness_score
    }

    pub fn has_journaled(&self) -> bool {
        self.has_journaled
    }

    /// While set, the recording control must be disabled.
    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    // ── Transition ───────────────────────────────────────────────────

    /// The successor session for `event`, or why there is none.
    pub fn apply(&self, event: &FlowEvent) -> Result<Session, FlowError> {
        let mut next = self.clone();
        match (self.screen, event) {
            (Screen::Landing, FlowEvent::Start) => {
                next.screen = Screen::Assessment;
            }
            (Screen::Assessment, FlowEvent::CompleteAssessment { score }) => {
                next.assessment_score = *score;
                next.screen = Screen::Email;
            }
            (Screen::Email, FlowEvent::SubmitEmail { email }) => {
                if !is_valid_email(email) {
                    return Err(FlowError::InvalidEmail(email.clone()));
                }
                next.user_email = email.clone();
                next.screen = Screen::Voice;
            }
            (Screen::Voice, FlowEvent::BeginAnalysis) => {
                if self.analyzing {
                    return Err(FlowError::AnalysisInFlight);
                }
                next.analyzing = true;
            }
            (Screen::Voice, FlowEvent::CompleteAnalysis { analysis }) => {
                if !self.analyzing {
                    return Err(FlowError::NoAnalysisPending);
                }
                next.analyzing = false;
                next.calmness_score = analysis.calmness_score;
                next.analysis = Some(analysis.result.clone());
                next.has_journaled = true;
                next.screen = Screen::Results;
            }
            (Screen::Voice, FlowEvent::AbortAnalysis) => {
                if !self.analyzing {
                    return Err(FlowError::NoAnalysisPending);
                }
                next.analyzing = false;
            }
            (Screen::Results, FlowEvent::StartTherapy) => {
                next.screen = Screen::Therapy;
            }
            (Screen::Therapy, FlowEvent::CompleteTherapy) => {
                next.screen = Screen::Calendar;
            }
            (Screen::Calendar, FlowEvent::Continue) => {
                if self.day_number >= self.journey_days {
                    next.screen = Screen::Subscription;
                } else {
                    next.day_number += 1;
                    next.clear_day();
                    next.screen = Screen::Voice;
                }
            }
            (Screen::Subscription, FlowEvent::Restart) => {
                next.day_number = 1;
                next.clear_day();
                next.screen = Screen::Landing;
            }
            (Screen::Results | Screen::Therapy, FlowEvent::Restart) => {
                next.clear_day();
                next.screen = Screen::Voice;
            }
            (screen, event) => {
                return Err(FlowError::UnexpectedEvent {
                    screen,
                    event: event.name(),
                });
            }
        }
        Ok(next)
    }

    fn clear_day(&mut self) {
        self.analysis = None;
        self.has_journaled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MockAnalyzer;
    use crate::random::ScriptedRandom;

    fn analysis() -> Analysis {
        MockAnalyzer::default().draw(&mut ScriptedRandom::new(vec![10, 1]))
    }

    fn run(session: &Session, events: &[FlowEvent]) -> Session {
        events
            .iter()
            .fold(session.clone(), |s, e| s.apply(e).expect("valid transition"))
    }

    fn to_calendar() -> Vec<FlowEvent> {
        vec![
            FlowEvent::Start,
            FlowEvent::CompleteAssessment { score: 9 },
            FlowEvent::SubmitEmail {
                email: "x@y.com".into(),
            },
            FlowEvent::BeginAnalysis,
            FlowEvent::CompleteAnalysis {
                analysis: analysis(),
            },
            FlowEvent::StartTherapy,
            FlowEvent::CompleteTherapy,
        ]
    }

    #[test]
    fn linear_path_reaches_calendar() {
        let session = run(&Session::default(), &to_calendar());
        assert_eq!(session.screen(), Screen::Calendar);
        assert_eq!(session.assessment_score(), 9);
        assert_eq!(session.user_email(), "x@y.com");
        assert_eq!(session.calmness_score(), 40);
        assert!(session.has_journaled());
        assert!(!session.is_analyzing());
        assert_eq!(
            session.analysis().map(|a| a.emotion.as_str()),
            Some("Agitation / Frustration")
        );
    }

    #[test]
    fn continue_increments_day_and_clears_result() {
        let calendar = run(&Session::default(), &to_calendar());
        let next = calendar.apply(&FlowEvent::Continue).unwrap();
        assert_eq!(next.screen(), Screen::Voice);
        assert_eq!(next.day_number(), 2);
        assert!(next.analysis().is_none());
        assert!(!next.has_journaled());
    }

    #[test]
    fn continue_on_last_day_offers_subscription() {
        let mut session = run(&Session::new(1), &to_calendar());
        session = session.apply(&FlowEvent::Continue).unwrap();
        assert_eq!(session.screen(), Screen::Subscription);
        assert_eq!(session.day_number(), 1);

        let restarted = session.apply(&FlowEvent::Restart).unwrap();
        assert_eq!(restarted.screen(), Screen::Landing);
        assert_eq!(restarted.day_number(), 1);
        assert!(restarted.analysis().is_none());
    }

    #[test]
    fn restart_from_results_returns_to_voice() {
        let events = &to_calendar()[..5];
        let results = run(&Session::default(), events);
        assert_eq!(results.screen(), Screen::Results);
        let voice = results.apply(&FlowEvent::Restart).unwrap();
        assert_eq!(voice.screen(), Screen::Voice);
        assert!(voice.analysis().is_none());
        assert!(!voice.has_journaled());
        assert_eq!(voice.user_email(), "x@y.com");
    }

    #[test]
    fn invalid_email_leaves_session_untouched() {
        let email = run(
            &Session::default(),
            &[FlowEvent::Start, FlowEvent::CompleteAssessment { score: 3 }],
        );
        let err = email
            .apply(&FlowEvent::SubmitEmail {
                email: "not-an-email".into(),
            })
            .unwrap_err();
        assert_eq!(err, FlowError::InvalidEmail("not-an-email".into()));
        assert_eq!(email.screen(), Screen::Email);
        assert_eq!(email.user_email(), "");
    }

    #[test]
    fn duplicate_recording_is_rejected() {
        let voice = run(&Session::default(), &to_calendar()[..3]);
        let analyzing = voice.apply(&FlowEvent::BeginAnalysis).unwrap();
        assert!(analyzing.is_analyzing());
        assert_eq!(
            analyzing.apply(&FlowEvent::BeginAnalysis),
            Err(FlowError::AnalysisInFlight)
        );
        assert_eq!(
            voice.apply(&FlowEvent::CompleteAnalysis {
                analysis: analysis()
            }),
            Err(FlowError::NoAnalysisPending)
        );
    }

    #[test]
    fn aborted_analysis_allows_a_new_recording() {
        let voice = run(&Session::default(), &to_calendar()[..3]);
        let analyzing = voice.apply(&FlowEvent::BeginAnalysis).unwrap();
        let released = analyzing.apply(&FlowEvent::AbortAnalysis).unwrap();
        assert_eq!(released.screen(), Screen::Voice);
        assert!(!released.is_analyzing());
        assert!(!released.has_journaled());
        assert!(released.apply(&FlowEvent::BeginAnalysis).is_ok());

        assert_eq!(
            voice.apply(&FlowEvent::AbortAnalysis),
            Err(FlowError::NoAnalysisPending)
        );
    }

    #[test]
    fn events_off_the_table_are_rejected() {
        let landing = Session::default();
        for event in [
            FlowEvent::StartTherapy,
            FlowEvent::Continue,
            FlowEvent::Restart,
            FlowEvent::CompleteTherapy,
        ] {
            assert!(matches!(
                landing.apply(&event),
                Err(FlowError::UnexpectedEvent {
                    screen: Screen::Landing,
                    ..
                })
            ));
        }
    }
}
