//! `serviette`: find the triple whose components contain the most
//! occurrences of a digit, among all triples whose sum and product are
//! written with a restricted digit set.
//!
//! Usage: `serviette [--bound N] [--digits 24] [--score-digit 4] [--dir PATH] [--verify]`
//!
//! Output: key=value lines on stdout. Diagnostics go to stderr via `tracing`
//! (`RUST_LOG` controls the filter, default `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serviette_harness::config::{EngineConfigV1, DEFAULT_RUN_DIR};
use serviette_harness::engine::{run_in_dir, EngineError};
use serviette_harness::run_dir::verify_run_dir;
use serviette_kernel::digits::DigitSet;
use serviette_search::log_writer::DEFAULT_FLUSH_EVERY_OUTER;
use serviette_search::params::{DEFAULT_BOUND, DEFAULT_DIGITS};
use serviette_search::scorer::DEFAULT_SCORE_DIGIT;
use serviette_search::select::SelectError;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "serviette", version)]
struct Args {
    /// Exclusive upper bound for each component of (a, b, c).
    #[arg(long, env = "SERVIETTE_BOUND", default_value_t = DEFAULT_BOUND)]
    bound: u32,

    /// Digits allowed in the sum and the product, e.g. "24". May be empty.
    #[arg(long, env = "SERVIETTE_DIGITS", default_value = DEFAULT_DIGITS)]
    digits: DigitSet,

    /// Digit counted when scoring a triple.
    #[arg(long, env = "SERVIETTE_SCORE_DIGIT", default_value_t = DEFAULT_SCORE_DIGIT)]
    score_digit: char,

    /// Run directory holding the result log and its manifest.
    #[arg(long, env = "SERVIETTE_DIR", default_value = DEFAULT_RUN_DIR)]
    dir: PathBuf,

    /// Flush the result log after this many values of `a`.
    #[arg(long, default_value_t = DEFAULT_FLUSH_EVERY_OUTER)]
    flush_every: u32,

    /// Verify the run directory against its manifest after selecting.
    #[arg(long)]
    verify: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let config = EngineConfigV1 {
        dir: args.dir,
        bound: args.bound,
        digits: args.digits,
        score_digit: args.score_digit,
        flush_every_outer: args.flush_every,
    };
    let params = config.params();
    let dir = config.dir.clone();

    let report = match run_in_dir(config) {
        Ok(report) => report,
        Err(EngineError::Select(SelectError::NoCandidatesFound)) => {
            tracing::warn!("no triple satisfies the digit constraint");
            println!("best=none");
            return ExitCode::from(2);
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            return ExitCode::FAILURE;
        }
    };

    println!("best={}", report.best.triple);
    println!("score={}", report.best.score);
    println!("position={}", report.best.position);
    println!("enumerated={}", report.enumerated);

    if args.verify {
        match verify_run_dir(&dir) {
            Ok(manifest) => {
                if !manifest.matches_params(&params) {
                    tracing::error!(
                        manifest_bound = manifest.bound,
                        manifest_digits = %manifest.digit_set,
                        "run directory was produced for different parameters"
                    );
                    return ExitCode::FAILURE;
                }
                println!("log_digest={}", manifest.log_digest);
                println!("record_count={}", manifest.record_count);
                println!("manifest_digest={}", manifest.digest());
            }
            Err(e) => {
                tracing::error!(error = %e, "run directory verification failed");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
