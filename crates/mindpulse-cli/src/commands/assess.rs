use clap::Args;
use mindpulse_core::assessment::QUESTIONS;
use mindpulse_core::{Assessment, StressLevel};
use serde_json::json;

use super::{print_json_pretty, CliResult};

#[derive(Args)]
pub struct AssessArgs {
    /// Comma-separated option indices, one per question (e.g. "2,3,4")
    #[arg(value_delimiter = ',')]
    pub answers: Vec<u32>,
}

pub fn run(args: AssessArgs) -> CliResult {
    let score = Assessment::score_all(&args.answers)?;
    let answers: Vec<_> = QUESTIONS
        .iter()
        .zip(&args.answers)
        .map(|(q, &option)| {
            json!({
                "question": q.text,
                "answer": q.options[option as usize],
            })
        })
        .collect();

    print_json_pretty(&json!({
        "score": score,
        "stress_level": StressLevel::classify(score),
        "answers": answers,
    }))?;
    Ok(())
}
