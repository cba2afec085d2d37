use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mindpulse", version, about = "MindPulse wellness journey CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole journey end to end, printing each event as JSON
    Journey(commands::journey::JourneyArgs),
    /// Score the stress assessment
    Assess(commands::assess::AssessArgs),
    /// Draw one mock voice analysis
    Analyze(commands::analyze::AnalyzeArgs),
    /// Therapy exercises
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// Fabricated journal history and month grid
    Journal(commands::journal::JournalArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MINDPULSE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("mindpulse=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Journey(args) => commands::journey::run(args),
        Commands::Assess(args) => commands::assess::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Exercise { action } => commands::exercise::run(action),
        Commands::Journal(args) => commands::journal::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
