//! cyber-calc — terminal front end for the calculator engine.
//!
//! Each stdin line is a run of keys: named keys (`Enter`, `Escape`,
//! `Backspace`, `plusminus`) as whole words, everything else one character
//! per key. The display is printed after every line.
//!
//! ```bash
//! echo "12*3=" | cyber-calc
//! RUST_LOG=debug cyber-calc --history
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cyberpunk_calc_core::{CalculatorEngine, EngineConfig, InputToken, PressResult};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cyber-calc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON engine config (max_digits, decimal_places, history_limit, display_max_chars)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the calculation history on exit
    #[arg(long)]
    history: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    let mut engine = CalculatorEngine::with_config(config)?;

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        for word in line.split_whitespace() {
            feed_word(&mut engine, word);
        }
        let equation = engine.equation().unwrap_or_default();
        writeln!(out, "{equation:>16} | {}", engine.display())?;
    }

    if cli.history {
        for line in engine.history().iter() {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn feed_word(engine: &mut CalculatorEngine, word: &str) {
    if word.chars().count() > 1 {
        if let Some(token) = InputToken::from_key(word).or_else(|| InputToken::from_action(word)) {
            report(engine.press(token));
            return;
        }
    }
    for ch in word.chars() {
        match engine.press_key(&ch.to_string()) {
            Some(result) => report(result),
            None => warn!(key = %ch, "ignored unmapped key"),
        }
    }
}

fn report(result: PressResult) {
    if let Err(err) = result {
        warn!(error = %err, "input failed");
    }
}
