use std::error::Error;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use commands::{
    construct::{self, ConstructArgs},
    sample::{self, SampleArgs},
    version::{self, VersionArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ng-sim", about = "Constrained directed-graph null-model generator")]
struct Cli {
    /// Log verbosity when RUST_LOG is unset.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one matrix meeting the degree sequences and fixed pattern of an instance.
    Construct(ConstructArgs),
    /// Construct a seed matrix and run the configured sampler from it.
    Sample(SampleArgs),
    /// Print version information.
    Version(VersionArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Construct(args) => construct::run(&args),
        Command::Sample(args) => sample::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
