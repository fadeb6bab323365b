//! im-correlate CLI
//!
//! Match email addresses to author names and print the result as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use im_correlate::{
    correlate, explain, load_list, ConsumptionMode, CorrelateError, CorrelateOptions,
    CorrelationConfig, Strictness,
};

#[derive(Parser)]
#[command(
    name = "im-correlate",
    version,
    about = "Infer the author name behind each email address"
)]
struct Cli {
    /// Configuration file (TOML); defaults to <config dir>/im-correlate/config.toml if present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every scored pass
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match every email against every name
    Match {
        /// File with one email per line, or a JSON array ("-" for stdin)
        #[arg(long)]
        emails: PathBuf,

        /// File with one name per line, or a JSON array ("-" for stdin)
        #[arg(long)]
        names: PathBuf,

        /// Report names as given instead of ASCII-folded
        #[arg(long)]
        keep_original: bool,

        /// Characters kept from the local-part
        #[arg(long, value_enum)]
        strictness: Option<StrictnessArg>,

        /// How matched probes are removed from the local-part
        #[arg(long, value_enum)]
        consumption: Option<ConsumptionArg>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Show the per-pass score of one email against one name
    Explain {
        email: String,
        name: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrictnessArg {
    Alphabetic,
    Word,
}

impl From<StrictnessArg> for Strictness {
    fn from(arg: StrictnessArg) -> Self {
        match arg {
            StrictnessArg::Alphabetic => Strictness::Alphabetic,
            StrictnessArg::Word => Strictness::Word,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ConsumptionArg {
    Global,
    SpanLocal,
}

impl From<ConsumptionArg> for ConsumptionMode {
    fn from(arg: ConsumptionArg) -> Self {
        match arg {
            ConsumptionArg::Global => ConsumptionMode::Global,
            ConsumptionArg::SpanLocal => ConsumptionMode::SpanLocal,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CorrelateError> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Match {
            emails,
            names,
            keep_original,
            strictness,
            consumption,
            compact,
        } => {
            if let Some(strictness) = strictness {
                config.strictness = strictness.into();
            }
            if let Some(consumption) = consumption {
                config.consumption = consumption.into();
            }

            let emails = load_list(&emails)?;
            let names = load_list(&names)?;
            let options = CorrelateOptions {
                keep_original,
                verbose: cli.verbose,
                config,
            };
            let report = correlate(&emails, &names, &options)?;
            tracing::info!(
                matched = report.owners.len(),
                skipped_emails = report.skipped_emails,
                skipped_names = report.skipped_names,
                "correlation finished"
            );

            let owners = report.owners.email_owners();
            let json = if compact {
                serde_json::to_string(&owners)?
            } else {
                serde_json::to_string_pretty(&owners)?
            };
            println!("{json}");
        }
        Command::Explain { email, name } => match explain(&email, &name, &config)? {
            Some(breakdown) => println!("{}", serde_json::to_string_pretty(&breakdown)?),
            None => eprintln!("Nothing to score: email needs an '@' and name must not be blank"),
        },
        Command::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<CorrelationConfig, CorrelateError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match dirs::config_dir().map(|dir| dir.join("im-correlate").join("config.toml")) {
            Some(default) if default.exists() => default,
            _ => return Ok(CorrelationConfig::default()),
        },
    };

    tracing::debug!(path = %path.display(), "loading config");
    let text = std::fs::read_to_string(&path).map_err(|source| CorrelateError::Io {
        path: path.clone(),
        source,
    })?;
    CorrelationConfig::from_toml(&text)
}
