use std::time::Duration;

use clap::Args;
use mindpulse_core::{Config, MockAnalyzer, RandomSource, SeededRandom, ThreadRandom};

use super::{print_json_pretty, runtime, CliResult};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,
    /// Return immediately instead of waiting out the analysis delay
    #[arg(long)]
    pub no_delay: bool,
}

pub fn run(args: AnalyzeArgs) -> CliResult {
    let config = Config::load()?;
    let mut analyzer = MockAnalyzer::from_config(&config.analysis);
    if args.no_delay {
        analyzer = analyzer.with_delay(Duration::ZERO);
    }
    let mut rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    let analysis = analyzer.draw(rng.as_mut());
    let analysis = runtime()?.block_on(MockAnalyzer::settle(analyzer.delay(), analysis));
    print_json_pretty(&analysis)?;
    Ok(())
}
