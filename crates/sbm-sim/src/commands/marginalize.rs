use std::error::Error;

use clap::Args;
use sbm_mcmc::RunMode;

use super::{execute, ChainArgs, ProblemArgs};

#[derive(Args, Debug)]
pub struct MarginalizeArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,
    #[command(flatten)]
    pub chain: ChainArgs,
    /// Steps discarded before sampling.
    #[arg(short = 'b', long = "burn-in", default_value_t = 1000)]
    pub burn_in: usize,
    /// Number of samples.
    #[arg(short = 't', long = "sampling-steps", default_value_t = 1000)]
    pub sampling_steps: usize,
    /// Steps between two samples.
    #[arg(short = 'f', long = "sampling-frequency", default_value_t = 10)]
    pub sampling_frequency: usize,
}

pub fn run(args: &MarginalizeArgs) -> Result<(), Box<dyn Error>> {
    let config = args.chain.to_config(RunMode::Marginalize {
        burn_in: args.burn_in,
        sample_every: args.sampling_frequency,
        samples: args.sampling_steps,
    });
    execute(&args.problem, &config)
}
