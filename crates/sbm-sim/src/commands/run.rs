use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use log::info;
use sbm_mcmc::RunConfig;

use super::{execute, ProblemArgs};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML configuration describing the run.
    #[arg(long)]
    pub config: PathBuf,
    #[command(flatten)]
    pub problem: ProblemArgs,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = RunConfig::load(&args.config)?;
    config.validate()?;
    info!("configuration loaded from {}", args.config.display());
    execute(&args.problem, &config)
}
