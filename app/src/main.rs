// In app/src/main.rs

use anyhow::Result;
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::TimeStep;
use engine::Simulation;
use rust_decimal::Decimal;
use std::io::{self, Write};
use tracing_subscriber::prelude::*;

mod report;
mod shell;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "An interactive investment portfolio simulator.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plays the interactive menu (the default).
    Play {
        /// Player name. Asked for on start-up when omitted.
        #[arg(short, long)]
        name: Option<String>,

        /// Starting cash. Asked for on start-up when omitted.
        #[arg(short, long)]
        balance: Option<Decimal>,

        /// Fixed seed for reproducible prices.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Advances time non-interactively and prints the history.
    Simulate {
        /// Step size: 1H, 4H, 1D, 1W or 1M.
        #[arg(short, long, default_value = "1D")]
        step: TimeStep,

        /// Number of steps to run.
        #[arg(short, long, default_value_t = 30)]
        count: u32,

        /// Starting cash. Defaults to `simulation.initial_balance`.
        #[arg(short, long)]
        balance: Option<Decimal>,

        /// Fixed seed for reproducible prices.
        #[arg(long)]
        seed: Option<u64>,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting investment simulator");

    match cli.command.unwrap_or(Commands::Play {
        name: None,
        balance: None,
        seed: None,
    }) {
        Commands::Play { name, balance, seed } => play(settings, name, balance, seed)?,
        Commands::Simulate {
            step,
            count,
            balance,
            seed,
        } => simulate(settings, step, count, balance, seed)?,
    }

    tracing::info!("Investment simulator has finished successfully.");
    Ok(())
}

/// Logs go to stderr so they never interleave with the menu on stdout.
fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::WARN);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn apply_overrides(settings: &mut Settings, balance: Option<Decimal>, seed: Option<u64>) -> Result<()> {
    if let Some(balance) = balance {
        if balance < Decimal::ZERO {
            anyhow::bail!("Initial balance cannot be negative, got {balance}");
        }
        settings.simulation.initial_balance = balance;
    }
    if seed.is_some() {
        settings.simulation.seed = seed;
    }
    Ok(())
}

// --- "Play" Subcommand Logic ---

fn play(mut settings: Settings, name: Option<String>, balance: Option<Decimal>, seed: Option<u64>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    writeln!(output, "Welcome to the Interactive Investment Simulator!")?;

    let player = match name {
        Some(name) => name,
        None => shell::prompt(&mut input, &mut output, "Enter your name: ")?
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Investor".to_string()),
    };

    let balance = match balance {
        Some(balance) => Some(balance),
        None => ask_balance(&mut input, &mut output, settings.simulation.initial_balance)?,
    };
    apply_overrides(&mut settings, balance, seed)?;

    let simulation = Simulation::from_settings(&settings)?;
    shell::Shell::new(simulation, player, input, output).run()
}

/// Re-asks until the answer is a non-negative amount; an empty answer keeps
/// the configured default.
fn ask_balance(
    input: &mut impl io::BufRead,
    output: &mut impl Write,
    default: Decimal,
) -> Result<Option<Decimal>> {
    loop {
        let label = format!("Enter your initial balance [{}]: ", report::money(default));
        let Some(answer) = shell::prompt(input, output, &label)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.trim_start_matches('$').replace(',', "").parse::<Decimal>() {
            Ok(balance) if balance >= Decimal::ZERO => return Ok(Some(balance)),
            _ => writeln!(output, "Please enter a valid non-negative amount.")?,
        }
    }
}

// --- "Simulate" Subcommand Logic ---

fn simulate(
    mut settings: Settings,
    step: TimeStep,
    count: u32,
    balance: Option<Decimal>,
    seed: Option<u64>,
) -> Result<()> {
    apply_overrides(&mut settings, balance, seed)?;
    let mut simulation = Simulation::from_settings(&settings)?;
    let mut output = io::stdout().lock();

    for _ in 0..count {
        let advanced = simulation.advance_time(step);
        report::advance(&mut output, &advanced)?;
    }

    report::history(&mut output, simulation.history())?;
    report::summary(&mut output, &simulation.summary())?;
    Ok(())
}
