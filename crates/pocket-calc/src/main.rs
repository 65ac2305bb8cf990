//! pocket-calc: replay button presses through the calculator engine
//!
//! ## Usage
//!
//! ```bash
//! pocket-calc 5 + 3 =              # one line per press
//! pocket-calc --json 6 / 0 =       # JSON readouts
//! pocket-calc --percent of-operand 2 0 0 % 1 5 =
//! RUST_LOG=debug pocket-calc 1 . 5 ±
//! ```

use clap::{Parser, ValueEnum};
use pocket_calc::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Replay calculator button presses and print what the display shows
#[derive(Debug, Parser)]
#[command(name = "pocket-calc", version, about)]
struct Cli {
    /// Button labels to press, in order (0-9 . + - * / % = C CE ±)
    #[arg(required = true, allow_hyphen_values = true)]
    buttons: Vec<String>,

    /// JSON engine configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Meaning of the % key (overrides the config file)
    #[arg(long, value_enum)]
    percent: Option<PercentArg>,

    /// Print one JSON object per press
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PercentArg {
    /// `a % b` is an error
    Reject,
    /// `a % b` is `a * b / 100`
    OfOperand,
}

impl From<PercentArg> for PercentMode {
    fn from(arg: PercentArg) -> Self {
        match arg {
            PercentArg::Reject => Self::Reject,
            PercentArg::OfOperand => Self::OfOperand,
        }
    }
}

#[derive(Debug, Serialize)]
struct Step<'a> {
    button: &'a str,
    #[serde(flatten)]
    readout: Readout,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> CalcResult<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(percent) = cli.percent {
        config = config.with_percent(percent.into());
    }
    Ok(config)
}

fn run(cli: &Cli) -> CalcResult<()> {
    let mut engine = CalculatorEngine::with_config(build_config(cli)?)?;
    let keypad = Keypad::new();

    for button in &cli.buttons {
        let readout = keypad.press(button, &mut engine)?;
        if cli.json {
            let step = Step { button, readout };
            let line = serde_json::to_string(&step)
                .map_err(|e| CalcError::config(format!("cannot encode output: {e}")))?;
            println!("{line}");
        } else {
            println!("{button:>3} | {:>16} | {}", readout.history, readout.display);
        }
    }

    if !cli.json && !engine.tape().is_empty() {
        println!("--- tape ---");
        println!("{}", engine.tape().export_formatted());
    }
    Ok(())
}
