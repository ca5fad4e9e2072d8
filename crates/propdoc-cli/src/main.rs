//! CLI application for property document field extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, parse, process, simulate};

/// Property document extraction - structured fields from bills, leases, budgets and certificates
#[derive(Parser)]
#[command(name = "propdoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a single document via the intelligence service
    Process(process::ProcessArgs),

    /// Extract fields from multiple documents
    Batch(batch::BatchArgs),

    /// Parse a saved service response offline
    Parse(parse::ParseArgs),

    /// Print a simulated extraction
    Simulate(simulate::SimulateArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Parse(args) => parse::run(args, config_path),
        Commands::Simulate(args) => simulate::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
