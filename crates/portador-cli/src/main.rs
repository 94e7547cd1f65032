//! Portador CLI - synchronous AM demodulation from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portador")]
#[command(author, version, about = "Portador AM receiver CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover baseband audio from an AM recording
    Demodulate(commands::demodulate::DemodulateArgs),

    /// Estimate the carrier and list spectral peaks
    Analyze(commands::analyze::AnalyzeArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),

    /// Print the effective receiver parameters as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demodulate(args) => commands::demodulate::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
