//! Command-line interface for letcalc.
//!
//! Evaluates one expression given on the command line, or every non-empty
//! line of a file, and prints the results of each on one tab-separated line.
//! Diagnostics are logged at `warn` level to stderr; `--quiet` silences them.

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use letcalc::{Calculator, DiagnosticSink, LogSink};
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Do not report diagnostics
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates a single expression
    Eval {
        /// Expression to evaluate, e.g. "add(2,3)"
        expression: String,
    },
    /// Evaluates every non-empty line of a file
    Parse {
        /// Input file with one expression per line
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn run<S: DiagnosticSink>(calc: &mut Calculator<S>, expression: &str) -> Result<()> {
    println!("Running calculator for expression: '{expression}'.");
    let eval = calc
        .evaluate(expression)
        .with_context(|| format!("evaluating {expression:?}"))?;
    if !eval.results.is_empty() {
        let line: Vec<_> = eval.results.iter().map(i64::to_string).collect();
        println!("{}", line.join("\t"));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut calc = Calculator::with_sink(LogSink).context("can't create calculator")?;

    match args.command {
        Commands::Eval { expression } => run(&mut calc, &expression)?,
        Commands::Parse { input } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("can't read {}", input.display()))?;
            for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                run(&mut calc, line)?;
            }
        }
    }
    Ok(())
}
