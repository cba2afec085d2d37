use clap::Args;
use mindpulse_core::capture::{recording_window, SilentCapture};
use mindpulse_core::{
    ActiveExercise, Assessment, Config, Event, FlowController, RandomSource, SeededRandom,
    ThreadRandom,
};
use serde_json::json;
use tracing::info;

use super::{print_json, runtime, CliResult};

#[derive(Args)]
pub struct JourneyArgs {
    /// Seed for reproducible analyses
    #[arg(long)]
    pub seed: Option<u64>,
    /// Email submitted on the email screen
    #[arg(long, default_value = "you@example.com")]
    pub email: String,
    /// Assessment answers as option indices, one per question
    #[arg(long, value_delimiter = ',', default_value = "2,2,2")]
    pub answers: Vec<u32>,
    /// No analysis delay and a 1 ms exercise tick
    #[arg(long)]
    pub fast: bool,
}

pub fn run(args: JourneyArgs) -> CliResult {
    let mut config = Config::load()?;
    if args.fast {
        config.analysis.delay_secs = 0.0;
        config.exercise.tick_ms = 1;
    }
    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let flow = FlowController::new(&config, rng);
    runtime()?.block_on(walk(flow, &args))
}

async fn walk(mut flow: FlowController, args: &JourneyArgs) -> CliResult {
    let score = Assessment::score_all(&args.answers)?;

    print_json(&flow.start()?)?;
    print_json(&flow.complete_assessment(score)?)?;
    print_json(&flow.submit_email(&args.email)?)?;

    loop {
        print_json(&json!({
            "day_number": flow.session().day_number(),
            "prompt": flow.day_prompt(),
            "recording_secs": recording_window().total_secs(),
        }))?;
        print_json(&flow.record(&mut SilentCapture::new())?)?;
        print_json(&flow.finish_analysis().await?)?;
        print_json(&flow.start_therapy()?)?;

        match flow.launch_exercise(None)? {
            ActiveExercise::Timed { mut timer, .. } => {
                while let Some(event) = timer.next_event().await {
                    print_json(&event)?;
                }
            }
            ActiveExercise::Guided { mut exercise, kind } => {
                while let Some(step) = exercise.current() {
                    print_json(&json!({ "exercise": kind, "prompt": step.prompt }))?;
                    exercise.advance();
                }
            }
        }

        print_json(&flow.complete_therapy()?)?;
        let event = flow.continue_journey()?;
        print_json(&event)?;
        if matches!(event, Event::SubscriptionOffered { .. }) {
            break;
        }
    }

    info!(
        days = flow.session().day_number(),
        email = flow.session().user_email(),
        "journey finished"
    );
    print_json(&json!({ "session": flow.session() }))?;
    Ok(())
}
