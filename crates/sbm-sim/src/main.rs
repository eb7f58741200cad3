use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    generate::{self, GenerateArgs},
    marginalize::{self, MarginalizeArgs},
    maximize::{self, MaximizeArgs},
    run::{self, RunArgs},
};
use env_logger::Env;

mod commands;
mod output;

#[derive(Parser, Debug)]
#[command(
    name = "sbm-sim",
    version,
    about = "MCMC inference for the stochastic block model"
)]
struct Cli {
    /// Log run set-up and summaries to stderr.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample the posterior and print the most frequent block of every vertex.
    Marginalize(MarginalizeArgs),
    /// Anneal towards a maximum a posteriori partition and print it.
    Maximize(MaximizeArgs),
    /// Execute a run described by a YAML configuration.
    Run(RunArgs),
    /// Sample a random graph from the block model.
    Generate(GenerateArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Marginalize(args) => marginalize::run(&args),
        Command::Maximize(args) => maximize::run(&args),
        Command::Run(args) => run::run(&args),
        Command::Generate(args) => generate::run(&args),
    }
}
