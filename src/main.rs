//! cptnet - learn the parameters of a binary Bayesian network and infer unknown values
//!
//! Usage:
//!   cptnet estimate <STRUCTURE> <TRAINING>           # write the learned CPTs to output.csv
//!   cptnet predict <STRUCTURE> <TRAINING> <TEST>     # fill in the `?` of each test row
//!   cptnet sample <STRUCTURE> <TRAINING> -n 1000     # draw synthetic training data

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cptnet::data::{self, TokenPolicy};
use cptnet::pipeline;
use cptnet::{ForwardSampler, Sampler};

#[derive(Parser)]
#[command(name = "cptnet")]
#[command(version)]
#[command(about = "Learn CPTs of a binary Bayesian network and infer unknown values")]
struct Cli {
    /// Read any token other than `1` as false instead of rejecting it
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train the network and write its conditional probability tables
    Estimate {
        /// Structure definition, one `NAME: PARENT...` line per variable
        #[arg(value_name = "STRUCTURE")]
        structure: PathBuf,

        /// Training data with a header of variable names
        #[arg(value_name = "TRAINING")]
        training: PathBuf,

        #[arg(short, long, default_value = "output.csv", value_name = "FILE")]
        output: PathBuf,
    },

    /// Train the network and infer the unknown value of every test row
    Predict {
        #[arg(value_name = "STRUCTURE")]
        structure: PathBuf,

        #[arg(value_name = "TRAINING")]
        training: PathBuf,

        /// Test data with exactly one `?` per row
        #[arg(value_name = "TEST")]
        test: PathBuf,

        #[arg(short, long, default_value = "completedTest.csv", value_name = "FILE")]
        output: PathBuf,
    },

    /// Train the network and draw samples from it
    Sample {
        #[arg(value_name = "STRUCTURE")]
        structure: PathBuf,

        #[arg(value_name = "TRAINING")]
        training: PathBuf,

        /// Number of samples to draw
        #[arg(short = 'n', long, default_value_t = 1000)]
        count: usize,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, default_value = "samples.csv", value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", failure_message(&e));
        process::exit(1);
    }
}

/// The full context chain of a fatal error, printed whatever the log level
fn failure_message(e: &anyhow::Error) -> String {
    format!("error: {:#}", e)
}

fn run(cli: Cli) -> Result<()> {
    let policy = if cli.lenient { TokenPolicy::Lenient } else { TokenPolicy::Strict };

    match cli.command {
        Command::Estimate { structure, training, output } => {
            let network = pipeline::train_from_files(&structure, &training, policy)
                .context("training failed")?;

            data::write_file(&output, |buf| data::write_estimates(&network, buf))
                .context("writing estimates failed")?;
        },

        Command::Predict { structure, training, test, output } => {
            let network = pipeline::train_from_files(&structure, &training, policy)
                .context("training failed")?;
            let test_set = data::read_test(&test, &network, policy)
                .with_context(|| format!("reading {} failed", test.display()))?;
            let predictions = pipeline::predict(&network, &test_set)
                .context("inference failed")?;

            data::write_file(&output, |buf| data::write_predictions(&test_set, &predictions, buf))
                .context("writing predictions failed")?;
        },

        Command::Sample { structure, training, count, seed, output } => {
            let network = pipeline::train_from_files(&structure, &training, policy)
                .context("training failed")?;
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let samples = ForwardSampler::new(&network, rng).samples(count)?;

            data::write_file(&output, |buf| data::write_samples(&network, &samples, buf))
                .context("writing samples failed")?;
        },
    }

    Ok(())
}
