//! Computes a maximum flow with Ford-Fulkerson and Edmonds-Karp and compares both.
//!
//! Missing arguments are asked for on stdin. Exit codes:
//! `1` the graph cannot be read, `2` invalid source, `3` invalid sink,
//! `4` the algorithms disagree, `5` any other flow error.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use thiserror::Error;
use wgraphs::{algo::*, io::*, prelude::*};

#[derive(Parser)]
#[command(name = "maxflow")]
#[command(about = "Maximum flow using Ford-Fulkerson and Edmonds-Karp", long_about = None)]
struct Cli {
    /// Graph in edge-list format
    file: Option<PathBuf>,
    /// Source node index
    source: Option<String>,
    /// Sink node index
    sink: Option<String>,
    /// Algorithms to run
    #[arg(long, value_enum, default_value_t = AlgorithmChoice::Both)]
    algorithm: AlgorithmChoice,
    /// Abort a run after this many augmentations
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Skip checking conservation and capacity bounds of the computed flows
    #[arg(long)]
    no_verify: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmChoice {
    Both,
    FordFulkerson,
    EdmondsKarp,
}

#[derive(Debug, Error)]
enum UsageError {
    #[error("Invalid source node {0}")]
    Source(String),
    #[error("Invalid sink node {0}")]
    Sink(String),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(usage) = err.downcast_ref::<UsageError>() {
        return match usage {
            UsageError::Source(_) => 2,
            UsageError::Sink(_) => 3,
        };
    }

    match err.downcast_ref::<FlowError>() {
        None => 1,
        Some(FlowError::SourceOutOfRange { .. }) => 2,
        Some(FlowError::SinkOutOfRange { .. } | FlowError::SourceIsSink { .. }) => 3,
        Some(FlowError::AlgorithmMismatch { .. }) => 4,
        Some(_) => 5,
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = match cli.file {
        Some(file) => file,
        None => {
            println!("Maxflow using Ford-Fulkerson and Edmonds-Karp");
            println!("---------------------------------------------\n");
            PathBuf::from(prompt("Enter filepath: ")?)
        }
    };

    let graph = WeightedDigraph::try_read_edge_list_file(&file)
        .with_context(|| format!("Failed to read graph from '{}'", file.display()))?;
    println!(
        "'{}' contains {} nodes.",
        file.display(),
        graph.number_of_nodes()
    );

    let source = match cli.source {
        Some(source) => source,
        None => prompt("Source (s) node index: ")?,
    };
    let source = match source.parse::<Node>() {
        Ok(u) if graph.contains_node(u) => u,
        _ => return Err(UsageError::Source(source).into()),
    };

    let sink = match cli.sink {
        Some(sink) => sink,
        None => prompt("Sink (t) node index:   ")?,
    };
    println!("\ns={source}\nt={sink}\n");
    let sink = match sink.parse::<Node>() {
        Ok(v) if graph.contains_node(v) && v != source => v,
        _ => return Err(UsageError::Sink(sink).into()),
    };

    let max_flow = MaxFlow::new(&graph, source, sink)?
        .max_iterations(cli.max_iterations)
        .verify(!cli.no_verify);

    let algorithm = match cli.algorithm {
        AlgorithmChoice::Both => return compare(&max_flow),
        AlgorithmChoice::FordFulkerson => Algorithm::FordFulkerson,
        AlgorithmChoice::EdmondsKarp => Algorithm::EdmondsKarp,
    };

    let report = max_flow
        .timed(algorithm)
        .with_context(|| format!("{algorithm} failed"))?;
    print_report(&report);
    Ok(())
}

/// Runs both algorithms, prints both reports and fails if the values differ
fn compare(max_flow: &MaxFlow<'_, WeightedDigraph>) -> Result<()> {
    let check = CrossCheck {
        depth_first: max_flow
            .timed(Algorithm::FordFulkerson)
            .context("Ford-Fulkerson failed")?,
        breadth_first: max_flow
            .timed(Algorithm::EdmondsKarp)
            .context("Edmonds-Karp failed")?,
    };

    print_report(&check.depth_first);
    print_report(&check.breadth_first);
    println!("EK is {}% faster than FF.\n", check.speedup_percent());

    if check.depth_first.value != check.breadth_first.value {
        let mismatch = FlowError::AlgorithmMismatch {
            depth_first: check.depth_first.value,
            breadth_first: check.breadth_first.value,
        };
        return Err(anyhow::Error::new(mismatch).context("FF result does not match EK result"));
    }

    println!("FF and EK agree on a maximum flow of {}.", check.value());
    Ok(())
}

fn print_report(report: &RunReport) {
    let name = report.algorithm.abbreviation();
    let ns = report.elapsed.as_nanos();

    println!("{name} result: {}", report.value);
    println!("{name} ns:     {ns}");
    println!("{name} ms:     {}", ns as f64 / 1_000_000.0);
    println!("{name} passes: {}", report.iterations);
    println!("{name} f*/p:   {}\n", report.flow_per_iteration());
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
