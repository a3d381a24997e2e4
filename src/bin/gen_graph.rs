//! Writes a random network in edge-list format.
//!
//! Without all three positional arguments, file name, number of nodes and number of edges
//! are asked for on stdin.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use wgraphs::{gens::*, io::*, prelude::*};

#[derive(Parser)]
#[command(name = "gen_graph")]
#[command(about = "Generates random directed networks without self-loops", long_about = None)]
struct Cli {
    /// Output file
    file: Option<PathBuf>,
    /// Number of nodes
    nodes: Option<NumNodes>,
    /// Number of distinct edges
    edges: Option<NumEdges>,
    /// Seed of the random generator; random if omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Smallest capacity (inclusive)
    #[arg(long, default_value_t = DEFAULT_MIN_WEIGHT)]
    min_weight: Weight,
    /// Largest capacity (exclusive)
    #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT)]
    max_weight: Weight,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (file, graph) = match generate(Cli::parse()) {
        Ok(generated) => generated,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(1);
        }
    };

    if let Err(err) = graph.try_write_edge_list_file(&file) {
        eprintln!("Failed to open '{}': {err}", file.display());
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

fn generate(cli: Cli) -> Result<(PathBuf, WeightedDigraph)> {
    let (file, n, m) = match (cli.file, cli.nodes, cli.edges) {
        (Some(file), Some(n), Some(m)) => (file, n, m),
        _ => (
            PathBuf::from(prompt("File: ")?),
            prompt("Number of nodes: ")?
                .parse()
                .context("Invalid number of nodes")?,
            prompt("Number of edges: ")?
                .parse()
                .context("Invalid number of edges")?,
        ),
    };

    ensure!(
        cli.min_weight < cli.max_weight,
        "Invalid weight range {}..{}",
        cli.min_weight,
        cli.max_weight
    );

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("Generating {n} nodes and {m} edges with seed {seed}");

    let rng = &mut Pcg64Mcg::seed_from_u64(seed);
    let graph = WeightedDigraph::random_network_with_weights(
        rng,
        n,
        m,
        cli.min_weight..cli.max_weight,
    );

    Ok((file, graph))
}

/// Prints `message` and reads the next whitespace separated token from stdin
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    for line in io::stdin().lock().lines() {
        if let Some(token) = line?.split_whitespace().next() {
            return Ok(token.to_owned());
        }
    }

    bail!("Unexpected end of input while waiting for an answer to '{}'", message.trim())
}
