use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use log::info;
use sbm_core::{ModelKind, RngHandle};
use sbm_graph::gen_stochastic_block;
use sbm_graph::io::{write_adjacency, write_edge_list};

use super::edge_probabilities;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Block sizes of the planted partition.
    #[arg(short = 'n', long = "sizes", num_args = 1.., required = true)]
    pub sizes: Vec<usize>,
    /// Edge probabilities: g*g values in row-major order, or p_in p_out with --use-ppm.
    #[arg(
        short = 'P',
        long = "probabilities",
        num_args = 1..,
        required = true,
        allow_negative_numbers = true
    )]
    pub probabilities: Vec<f64>,
    /// Read the probabilities as (p_in, p_out).
    #[arg(short = 'u', long = "use-ppm")]
    pub use_ppm: bool,
    /// Seed of the random stream.
    #[arg(short = 'd', long, default_value_t = 42)]
    pub seed: u64,
    /// Print adjacency lists instead of an edge list.
    #[arg(long)]
    pub adjacency: bool,
    /// Output file; stdout when absent.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let model = if args.use_ppm {
        ModelKind::Ppm
    } else {
        ModelKind::Sbm
    };
    let p = edge_probabilities(&args.probabilities, model, args.sizes.len())?;
    let mut rng = RngHandle::from_seed(args.seed);
    let graph = gen_stochastic_block(&args.sizes, &p, &mut rng)?;
    info!(
        "generated {} vertices and {} edges with seed {}",
        graph.vertex_count(),
        graph.edge_count(),
        args.seed
    );

    let mut writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    if args.adjacency {
        write_adjacency(&graph, &mut writer)?;
    } else {
        write_edge_list(&graph, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}
