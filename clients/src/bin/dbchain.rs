//! `dbchain` — Computes a minimum-weight double-base chain for an integer.
//!
//! Prints the elapsed time, the chain weight and the chain itself:
//!
//! ```text
//! $ dbchain 23
//! # Time: 41 microseconds
//! # Minimum of 2
//! 2^(3)*3^(1) - 2^(0)*3^(0)
//! ```
//!
//! **Usage:**
//! ```text
//! dbchain [--bits <N>] [--radix <auto|dec|hex>] [--pruning <exhaustive|dominated>]
//!         [--format <text|json>] [-v...] [-q] <VALUE>
//! ```
//!
//! Exits non-zero if the value cannot be parsed or is wider than `--bits`.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::time::Instant;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use dbchain::{
    Chain, ChainEngine, ChainParams, Pruning, Radix, Term, Weight, DEFAULT_MAX_BITS,
    MAX_SUPPORTED_BITS,
};
use serde::Serialize;
use tracing::info;

/// Compute a minimum-weight double-base chain.
#[derive(Parser, Debug)]
#[command(
    name = "dbchain",
    about = "Find a shortest signed sum of 2^i*3^j terms equal to an integer"
)]
struct Args {
    /// Non-negative integer, decimal or hexadecimal.
    value: String,

    /// Widest accepted input in bits (at most 8192).
    #[arg(long, default_value_t = DEFAULT_MAX_BITS, value_parser = bits_parser())]
    bits: usize,

    /// Radix of VALUE; `auto` reads a `0x` prefix as hexadecimal.
    #[arg(long, value_enum, default_value_t = RadixArg::Auto)]
    radix: RadixArg,

    /// Dominated-state strategy.
    #[arg(long, value_enum, default_value_t = PruningArg::Dominated)]
    pruning: PruningArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RadixArg {
    Auto,
    Dec,
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PruningArg {
    Exhaustive,
    Dominated,
}

impl From<PruningArg> for Pruning {
    fn from(arg: PruningArg) -> Self {
        match arg {
            PruningArg::Exhaustive => Self::Exhaustive,
            PruningArg::Dominated => Self::Dominated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Args {
    /// Installs a stderr subscriber; `RUST_LOG` overrides the `-v` level.
    fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    fn params(&self) -> ChainParams {
        ChainParams::new(self.bits).with_pruning(self.pruning.into())
    }
}

fn bits_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..=MAX_SUPPORTED_BITS as u64)
}

/// Splits an optional `0x` prefix off `text` and picks the radix.
fn resolve_radix(text: &str, radix: RadixArg) -> (&str, Radix) {
    let stripped = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"));
    match (radix, stripped) {
        (RadixArg::Dec, _) => (text, Radix::Decimal),
        (RadixArg::Hex, Some(digits)) | (RadixArg::Auto, Some(digits)) => {
            (digits, Radix::Hexadecimal)
        }
        (RadixArg::Hex, None) => (text, Radix::Hexadecimal),
        (RadixArg::Auto, None) => (text, Radix::Decimal),
    }
}

/// JSON shape of one run.
#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    weight: Weight,
    doublings: usize,
    triplings: usize,
    elapsed_us: u128,
    terms: &'a [Term],
}

fn render_text(chain: &Chain, elapsed_us: u128) -> String {
    format!(
        "# Time: {elapsed_us} microseconds\n# Minimum of {}\n{chain}",
        chain.weight()
    )
}

fn render_json(input: &str, chain: &Chain, elapsed_us: u128) -> Result<String> {
    let report = Report {
        input,
        weight: chain.weight(),
        doublings: chain.doublings(),
        triplings: chain.triplings(),
        elapsed_us,
        terms: chain.terms(),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize report")
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.init_logging();

    let mut engine = ChainEngine::new(args.params())
        .with_context(|| format!("Failed to size the engine for {} bits", args.bits))?;
    let (digits, radix) = resolve_radix(args.value.trim(), args.radix);
    let n = engine
        .parse(digits, radix)
        .with_context(|| format!("Failed to parse {radix} value '{}'", args.value))?;
    info!(bits = n.bit_len(), %radix, "parsed input");

    let start = Instant::now();
    let chain = engine
        .chain(&n)
        .with_context(|| format!("Failed to compute a chain for '{}'", args.value))?;
    let elapsed_us = start.elapsed().as_micros();
    info!(weight = chain.weight(), elapsed_us = ?elapsed_us, "chain found");

    let output = match args.format {
        Format::Text => render_text(&chain, elapsed_us),
        Format::Json => render_json(&args.value, &chain, elapsed_us)?,
    };
    println!("{output}");

    Ok(())
}
