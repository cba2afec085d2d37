use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use mindpulse_core::journal::{generate_history, month_grid};
use mindpulse_core::{RandomSource, SeededRandom, ThreadRandom};
use serde_json::json;

use super::{print_json_pretty, CliResult};

#[derive(Args)]
pub struct JournalArgs {
    /// Seed for reproducible history
    #[arg(long)]
    pub seed: Option<u64>,
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

pub fn run(args: JournalArgs) -> CliResult {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let mut rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    let entries = generate_history(today, rng.as_mut());
    let grid = month_grid(today.year(), today.month(), &entries);
    print_json_pretty(&json!({
        "today": today,
        "entries": entries,
        "month": {
            "year": today.year(),
            "month": today.month(),
            "days": grid,
        },
    }))?;
    Ok(())
}
