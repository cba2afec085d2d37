pub mod analyze;
pub mod assess;
pub mod config;
pub mod exercise;
pub mod journal;
pub mod journey;

use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Single-threaded runtime with the timer driver, for commands that wait on
/// the analysis delay or an exercise countdown.
pub(crate) fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

pub(crate) fn print_json_pretty<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
