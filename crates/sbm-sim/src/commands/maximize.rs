use std::error::Error;

use clap::Args;
use sbm_mcmc::{CoolingSchedule, RunMode};

use super::{execute, ChainArgs, ProblemArgs};

#[derive(Args, Debug)]
pub struct MaximizeArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,
    #[command(flatten)]
    pub chain: ChainArgs,
    /// Number of annealing steps.
    #[arg(short = 't', long = "sampling-steps", default_value_t = 1000)]
    pub sampling_steps: usize,
    /// Cooling schedule: exponential, linear, logarithmic or constant.
    #[arg(short = 'c', long = "cooling-schedule", default_value = "exponential")]
    pub cooling_schedule: String,
    /// Schedule parameters; defaults depend on the schedule when omitted.
    #[arg(
        short = 'a',
        long = "cooling-schedule-kwargs",
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub cooling_schedule_kwargs: Vec<f64>,
}

pub fn run(args: &MaximizeArgs) -> Result<(), Box<dyn Error>> {
    let schedule = CoolingSchedule::from_name(
        &args.cooling_schedule,
        &args.cooling_schedule_kwargs,
        args.sampling_steps,
    )?;
    let config = args.chain.to_config(RunMode::Maximize {
        duration: args.sampling_steps,
        schedule,
    });
    execute(&args.problem, &config)
}
