use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use ng_graph::{construct_graph, StructureConfig};
use tracing::info;

use super::{write_json, Instance};

#[derive(Args, Debug)]
pub struct ConstructArgs {
    /// JSON instance with `out_degree`, `in_degree` and optional `fixed`.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Destination for the matrix rows; printed to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Forbid diagonal cells of square instances.
    #[arg(long)]
    pub loopless: bool,
}

pub fn run(args: &ConstructArgs) -> Result<(), Box<dyn Error>> {
    let instance = Instance::load(&args.input)?;
    let fixed = instance.fixed_matrix()?;
    let structure = StructureConfig {
        allow_self_loops: !args.loopless,
    };
    let matrix = construct_graph(&instance.out_degree, &instance.in_degree, &fixed, &structure)?;
    let rows = matrix.to_rows();
    match &args.out {
        Some(path) => {
            write_json(path, &rows)?;
            info!(path = %path.display(), "matrix written");
        }
        None => println!("{}", serde_json::to_string(&rows)?),
    }
    Ok(())
}
