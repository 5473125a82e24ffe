//! diabsvm console front-end
//!
//! Trains the classifier once at startup, then reads one line of eight
//! measurements per request from stdin and prints the predicted result.

use clap::Parser;
use diabsvm::api::{PipelineBuilder, Session, DEFAULT_DATASET};
use diabsvm::core::{PipelineError, Result, FEATURE_NAMES};
use diabsvm::utils::split_fields;
use env_logger::Env;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "diabsvm")]
#[command(about = "Diabetes risk prediction with a linear SVM")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Labeled CSV dataset
    #[arg(long, default_value = DEFAULT_DATASET)]
    data: PathBuf,

    /// Seed for the stratified train/held-out split
    #[arg(long, default_value = "2")]
    seed: u64,

    /// Fraction of each class held out from training
    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    /// Regularization parameter C
    #[arg(short = 'C', long, default_value = "1.0")]
    c: f64,

    /// Convergence tolerance
    #[arg(short, long, default_value = "0.001")]
    epsilon: f64,

    /// Maximum solver iterations
    #[arg(short, long, default_value = "100000")]
    max_iterations: usize,

    /// Print the configuration and fitted model summary as JSON, then exit
    #[arg(long)]
    info: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let session = match start_session(&cli) {
        Ok(session) => session,
        Err(e) => {
            error!("Error: {e}");
            if matches!(e, PipelineError::DatasetNotFound { .. }) {
                error!("Make sure the dataset file exists at {:?}", cli.data);
            }
            process::exit(1);
        }
    };

    if cli.info {
        if let Err(e) = print_info(&session) {
            error!("Error: {e}");
            process::exit(1);
        }
        return;
    }

    if let Err(e) = serve(&session, io::stdin().lock(), io::stdout().lock()) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn start_session(cli: &Cli) -> Result<Session> {
    info!("Training on {:?}", cli.data);
    PipelineBuilder::new()
        .with_seed(cli.seed)
        .with_test_ratio(cli.test_ratio)
        .with_c(cli.c)
        .with_epsilon(cli.epsilon)
        .with_max_iterations(cli.max_iterations)
        .start(&cli.data)
}

fn print_info(session: &Session) -> Result<()> {
    let summary = serde_json::json!({
        "config": session.config(),
        "scaler": session.scaler(),
        "model": session.info(),
    });
    let text = serde_json::to_string_pretty(&summary)
        .map_err(|e| PipelineError::UnexpectedError(e.to_string()))?;
    println!("{text}");
    Ok(())
}

/// Answer one request per input line until EOF
///
/// Request errors are reported on the output and never end the loop.
fn serve<R: BufRead, W: Write>(session: &Session, input: R, mut output: W) -> io::Result<()> {
    writeln!(
        output,
        "Enter {} values per line: {}",
        FEATURE_NAMES.len(),
        FEATURE_NAMES.join(", ")
    )?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match session.predict_raw(&split_fields(&line)) {
            Ok(label) => writeln!(output, "Result: {}", label.describe())?,
            Err(PipelineError::InvalidInput(msg)) => writeln!(
                output,
                "Input error: {msg}. Please enter valid numbers in all fields."
            )?,
            Err(e) => writeln!(output, "Error: {e}")?,
        }
        output.flush()?;
    }

    Ok(())
}
