//! End-to-end journey: landing through five days to the subscription offer.
//!
//! Runs under paused tokio time, so the analysis delay and the exercise
//! ticks complete instantly in virtual time.

use std::time::Duration;

use mindpulse_core::capture::SilentCapture;
use mindpulse_core::exercise::{ExerciseTimer, PhasePlan, DEFAULT_TICK};
use mindpulse_core::{
    ActiveExercise, Assessment, Config, Event, ExerciseKind, FlowController, FlowError, Screen,
    ScriptedRandom,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn controller() -> FlowController {
    // calmness draw 17 -> 47, profile draw 1 -> Paced Breathing
    FlowController::new(&Config::default(), Box::new(ScriptedRandom::new(vec![17, 1])))
}

/// voice -> results -> therapy -> calendar, skipping the exercise itself.
async fn journal_one_day(flow: &mut FlowController) {
    assert_eq!(flow.screen(), Screen::Voice);
    flow.record(&mut SilentCapture::new()).unwrap();
    flow.finish_analysis().await.unwrap();
    assert_eq!(flow.screen(), Screen::Results);
    flow.start_therapy().unwrap();
    flow.complete_therapy().unwrap();
    assert_eq!(flow.screen(), Screen::Calendar);
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn full_journey_reaches_subscription() {
    let mut flow = controller();
    assert_eq!(flow.screen(), Screen::Landing);

    flow.start().unwrap();
    assert_eq!(flow.screen(), Screen::Assessment);

    let mut assessment = Assessment::new();
    assert_eq!(assessment.answer(2).unwrap(), None);
    assert_eq!(assessment.answer(3).unwrap(), None);
    let score = assessment.answer(4).unwrap().expect("last answer yields the score");
    assert_eq!(score, 9);
    flow.complete_assessment(score).unwrap();
    assert_eq!(flow.screen(), Screen::Email);
    assert_eq!(flow.session().assessment_score(), 9);

    flow.submit_email("x@y.com").unwrap();
    assert_eq!(flow.screen(), Screen::Voice);
    assert_eq!(flow.session().user_email(), "x@y.com");

    let started = tokio::time::Instant::now();
    flow.record(&mut SilentCapture::new()).unwrap();
    assert!(flow.session().is_analyzing());
    flow.finish_analysis().await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert_eq!(flow.screen(), Screen::Results);

    let calmness = flow.session().calmness_score();
    assert!((30..70).contains(&calmness));
    let result = flow.session().analysis().expect("analysis stored");
    assert!(!result.recommended_exercise.title().is_empty());
    assert_eq!(result.recommended_exercise, ExerciseKind::PacedBreathing);

    flow.start_therapy().unwrap();
    assert_eq!(flow.screen(), Screen::Therapy);

    let exercise = flow
        .launch_exercise(Some(ExerciseKind::BoxBreathing))
        .unwrap();
    let ActiveExercise::Timed { mut timer, kind } = exercise else {
        panic!("box breathing is timed");
    };
    assert_eq!(kind, ExerciseKind::BoxBreathing);
    assert_eq!(timer.view().phase_name, "inhale");
    let exercise_started = tokio::time::Instant::now();
    let completion = timer.completed().await.expect("box breathing completes");
    assert_eq!(exercise_started.elapsed(), Duration::from_secs(80));
    assert_eq!(completion.cycles_completed, 5);
    assert!(!completion.skipped);

    let mut phase_endings = 0;
    let mut completions = 0;
    while let Some(event) = timer.try_next_event() {
        match event {
            Event::PhaseAdvanced { .. } => phase_endings += 1,
            Event::ExerciseCompleted { .. } => {
                phase_endings += 1;
                completions += 1;
            }
            _ => {}
        }
    }
    assert_eq!(phase_endings, 20);
    assert_eq!(completions, 1);
    drop(timer);

    flow.complete_therapy().unwrap();
    assert_eq!(flow.screen(), Screen::Calendar);

    for expected_day in 2..=5 {
        match flow.continue_journey().unwrap() {
            Event::DayAdvanced { day_number, .. } => assert_eq!(day_number, expected_day),
            other => panic!("expected DayAdvanced, got {other:?}"),
        }
        assert!(flow.session().analysis().is_none());
        assert!(!flow.session().has_journaled());
        journal_one_day(&mut flow).await;
    }

    match flow.continue_journey().unwrap() {
        Event::SubscriptionOffered {
            day_number,
            improvement_score,
            ..
        } => {
            assert_eq!(day_number, 5);
            assert_eq!(improvement_score, 16);
        }
        other => panic!("expected SubscriptionOffered, got {other:?}"),
    }
    assert_eq!(flow.screen(), Screen::Subscription);

    flow.restart().unwrap();
    assert_eq!(flow.screen(), Screen::Landing);
    assert_eq!(flow.session().day_number(), 1);
    assert!(flow.session().analysis().is_none());
}

#[tokio::test(start_paused = true)]
async fn recommended_exercise_drives_therapy_completion() {
    let mut flow = controller();
    flow.start().unwrap();
    flow.complete_assessment(0).unwrap();
    flow.submit_email("a@b.co").unwrap();
    flow.record(&mut SilentCapture::new()).unwrap();
    flow.finish_analysis().await.unwrap();
    flow.start_therapy().unwrap();

    let exercise = flow.launch_exercise(None).unwrap();
    let ActiveExercise::Timed { mut timer, kind } = exercise else {
        panic!("paced breathing is timed");
    };
    assert_eq!(kind, ExerciseKind::PacedBreathing);
    let completion = timer.completed().await.unwrap();
    assert_eq!(completion.cycles_completed, 5);
    flow.complete_therapy().unwrap();
    assert_eq!(flow.screen(), Screen::Calendar);
}

#[tokio::test]
async fn invalid_email_blocks_the_flow() {
    let mut flow = controller();
    flow.start().unwrap();
    flow.complete_assessment(12).unwrap();

    for bad in ["", "x", "x@y", "x@@y.com", "x y@z.com"] {
        assert!(matches!(
            flow.submit_email(bad),
            Err(FlowError::InvalidEmail(_))
        ));
        assert_eq!(flow.screen(), Screen::Email);
        assert_eq!(flow.session().user_email(), "");
    }

    flow.submit_email("a@b.co").unwrap();
    assert_eq!(flow.screen(), Screen::Voice);
}

#[tokio::test(start_paused = true)]
async fn skipping_the_exercise_still_completes_once() {
    let mut timer = ExerciseTimer::start(PhasePlan::paced_breathing(), DEFAULT_TICK).unwrap();
    tokio::time::sleep(Duration::from_secs(7)).await;
    assert!(timer.skip());
    let _ = timer.skip();

    let completion = timer.completed().await.unwrap();
    assert!(completion.skipped);
    assert!(timer.completed().await.is_none());

    let mut completions = 0;
    while let Some(event) = timer.next_event().await {
        if matches!(event, Event::ExerciseCompleted { .. }) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
}
