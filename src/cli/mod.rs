mod args;
mod config;
mod global;
mod handlers;

use args::{ConfigAction, DecodeArgs, EncodeArgs};
use clap::{Parser, Subcommand};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "chroma-qr")]
#[command(version)]
#[command(about = "Encode text into colored square codes and decode them back", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text into an image
    Encode(EncodeArgs),
    /// Decode an image back into text
    Decode(DecodeArgs),
    /// Inspect alphabets and settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let config = config::load_registry(&cli.global)?;

    match cli.command {
        Commands::Encode(args) => handlers::encode::handle(args, &cli.global, &config),
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &config),
        Commands::Config { action } => handlers::config::handle(action, &cli.global, &config),
    }
}

fn init_logging(global: &GlobalArgs) {
    let log_level = if global.debug {
        tracing::Level::DEBUG
    } else if global.verbose {
        tracing::Level::INFO
    } else if global.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    // RUST_LOG, when set, replaces the flag-derived level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();
}
