use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use ng_graph::construct_graph;
use ng_mcmc::{run as run_sampler, SampleConfig};
use tracing::info;

use super::{write_json, Instance};

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// YAML sampling configuration; omitted fields take their defaults.
    #[arg(long)]
    pub config: PathBuf,
    /// JSON instance the seed matrix is constructed from.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output directory for `samples.json` and `summary.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &SampleArgs) -> Result<(), Box<dyn Error>> {
    let config = SampleConfig::load(&args.config)?;
    let instance = Instance::load(&args.input)?;
    let fixed = instance.fixed_matrix()?;
    let seed_matrix = construct_graph(
        &instance.out_degree,
        &instance.in_degree,
        &fixed,
        &config.structure,
    )?;

    let output = run_sampler(&config, seed_matrix, fixed)?;
    fs::create_dir_all(&args.out)?;
    let samples: Vec<Vec<Vec<i64>>> = output.samples.iter().map(|m| m.to_rows()).collect();
    write_json(&args.out.join("samples.json"), &samples)?;
    fs::write(args.out.join("summary.json"), output.summary.to_json_pretty()?)?;
    info!(
        samples = samples.len(),
        mixing = output.summary.mixing,
        out = %args.out.display(),
        "sampling run written"
    );
    println!("mixing={:.6}", output.summary.mixing);
    Ok(())
}
