//! Property tests for the countdown, the transition function and the mock
//! analysis.

use mindpulse_core::analysis::PROFILES;
use mindpulse_core::exercise::{CountdownState, Phase, PhasePlan, PhasedCountdown};
use mindpulse_core::flow::{FlowEvent, Session};
use mindpulse_core::{Event, MockAnalyzer, Screen, SeededRandom};
use proptest::prelude::*;

fn plan_strategy() -> impl Strategy<Value = PhasePlan> {
    (proptest::collection::vec(1u32..6, 1..6), 1u32..7).prop_map(|(durations, cycles)| {
        let phases = durations
            .into_iter()
            .enumerate()
            .map(|(i, secs)| Phase::new(format!("phase-{i}"), secs))
            .collect();
        PhasePlan::new(phases, cycles).unwrap()
    })
}

/// Event kinds the strategy can fire; payloads are filled in by `build_event`.
#[derive(Debug, Clone, Copy)]
enum Kind {
    Start,
    Assessment(u32),
    GoodEmail,
    BadEmail,
    Record,
    Analysis(u64),
    Abort,
    Therapy,
    Complete,
    Continue,
    Restart,
}

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Start),
        (0u32..13).prop_map(Kind::Assessment),
        Just(Kind::GoodEmail),
        Just(Kind::BadEmail),
        Just(Kind::Record),
        any::<u64>().prop_map(Kind::Analysis),
        Just(Kind::Abort),
        Just(Kind::Therapy),
        Just(Kind::Complete),
        Just(Kind::Continue),
        Just(Kind::Restart),
    ]
}

fn build_event(kind: Kind) -> FlowEvent {
    match kind {
        Kind::Start => FlowEvent::Start,
        Kind::Assessment(score) => FlowEvent::CompleteAssessment { score },
        Kind::GoodEmail => FlowEvent::SubmitEmail {
            email: "a@b.co".into(),
        },
        Kind::BadEmail => FlowEvent::SubmitEmail {
            email: "a@b".into(),
        },
        Kind::Record => FlowEvent::BeginAnalysis,
        Kind::Analysis(seed) => FlowEvent::CompleteAnalysis {
            analysis: MockAnalyzer::default().draw(&mut SeededRandom::new(seed)),
        },
        Kind::Abort => FlowEvent::AbortAnalysis,
        Kind::Therapy => FlowEvent::StartTherapy,
        Kind::Complete => FlowEvent::CompleteTherapy,
        Kind::Continue => FlowEvent::Continue,
        Kind::Restart => FlowEvent::Restart,
    }
}

/// Reference model of the transition table: the successor screen, or `None`
/// when the event is rejected.
fn expected_screen(session: &Session, kind: Kind) -> Option<Screen> {
    match (session.screen(), kind) {
        (Screen::Landing, Kind::Start) => Some(Screen::Assessment),
        (Screen::Assessment, Kind::Assessment(_)) => Some(Screen::Email),
        (Screen::Email, Kind::GoodEmail) => Some(Screen::Voice),
        (Screen::Voice, Kind::Record) if !session.is_analyzing() => Some(Screen::Voice),
        (Screen::Voice, Kind::Analysis(_)) if session.is_analyzing() => Some(Screen::Results),
        (Screen::Voice, Kind::Abort) if session.is_analyzing() => Some(Screen::Voice),
        (Screen::Results, Kind::Therapy) => Some(Screen::Therapy),
        (Screen::Therapy, Kind::Complete) => Some(Screen::Calendar),
        (Screen::Calendar, Kind::Continue) => Some(if session.day_number() >= session.journey_days() {
            Screen::Subscription
        } else {
            Screen::Voice
        }),
        (Screen::Subscription, Kind::Restart) => Some(Screen::Landing),
        (Screen::Results | Screen::Therapy, Kind::Restart) => Some(Screen::Voice),
        _ => None,
    }
}

proptest! {
    #[test]
    fn prop_countdown_ends_after_every_phase_of_every_cycle(plan in plan_strategy()) {
        let expected_endings = plan.total_cycles() * plan.phases().len() as u32;
        let expected_ticks = plan.total_secs();
        let phase_count = plan.phases().len();
        let total_cycles = plan.total_cycles();
        let mut countdown = PhasedCountdown::new(plan);

        let mut ticks = 0u64;
        let mut completions = 0;
        while !countdown.is_terminal() {
            if let Some(Event::ExerciseCompleted { .. }) = countdown.tick() {
                completions += 1;
            }
            ticks += 1;
            prop_assert!(countdown.phase_index() < phase_count);
            prop_assert!(countdown.cycles_completed() <= total_cycles);
            prop_assert!(ticks <= expected_ticks);
        }

        prop_assert_eq!(ticks, expected_ticks);
        prop_assert_eq!(countdown.phases_elapsed(), expected_endings);
        prop_assert_eq!(countdown.cycles_completed(), total_cycles);
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(countdown.state(), CountdownState::Completed);

        prop_assert!(countdown.tick().is_none());
        prop_assert!(countdown.skip().is_none());
    }

    #[test]
    fn prop_skip_completes_once_at_any_point(plan in plan_strategy(), ticks in 0u64..40) {
        let mut countdown = PhasedCountdown::new(plan);
        let mut completions = 0;
        for _ in 0..ticks {
            if let Some(Event::ExerciseCompleted { .. }) = countdown.tick() {
                completions += 1;
            }
        }
        for _ in 0..2 {
            if let Some(Event::ExerciseCompleted { .. }) = countdown.skip() {
                completions += 1;
            }
        }
        prop_assert!(countdown.is_terminal());
        prop_assert_eq!(completions, 1);
    }

    #[test]
    fn prop_transitions_follow_the_table(kinds in proptest::collection::vec(kind_strategy(), 0..60)) {
        let mut session = Session::default();
        for kind in kinds {
            let event = build_event(kind);
            let expected = expected_screen(&session, kind);
            let first = session.apply(&event);
            let second = session.apply(&event);
            prop_assert_eq!(&first, &second);

            match (first, expected) {
                (Ok(next), Some(screen)) => {
                    prop_assert_eq!(next.screen(), screen);
                    session = next;
                }
                (Err(_), None) => {}
                (outcome, expected) => {
                    prop_assert!(false, "{:?} on {:?}: got {:?}, expected {:?}",
                        kind, session.screen(), outcome.map(|s| s.screen()), expected);
                }
            }
            prop_assert!(session.day_number() >= 1);
            prop_assert!(session.day_number() <= session.journey_days());
        }
    }

    #[test]
    fn prop_analysis_draws_are_consistent(seed in any::<u64>()) {
        let analysis = MockAnalyzer::default().draw(&mut SeededRandom::new(seed));
        prop_assert!((30..70).contains(&analysis.calmness_score));
        let profile = PROFILES
            .iter()
            .find(|p| p.emotion == analysis.result.emotion)
            .expect("drawn from the table");
        prop_assert_eq!(profile.load, analysis.result.cognitive_load);
        prop_assert_eq!(profile.exercise, analysis.result.recommended_exercise);
    }
}
