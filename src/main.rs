use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use log::info;

use crate::analysis::distance::length_histogram;
use crate::analysis::stats::degree_stats;
use crate::core::graph::AdjacencyGraph;
use crate::format::adjacency::{read_adjacency, write_adjacency};
use crate::format::points::{read_points, write_points};
use crate::generate::config::{
    DEFAULT_BOUNDS, DEFAULT_DEGREE_RANGE, DEFAULT_POINT_COUNT, GeneratorConfig,
};
use crate::generate::synthetic::{generate, rng_for};

pub mod analysis;
pub mod core;
pub mod format;
pub mod generate;

/// Random spatial KNN graphs and their edge-length distribution
#[derive(Parser, Debug)]
#[command(name = "spatialgraph", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate random 3D points and connect each to its nearest neighbors
    Generate(GenerateArgs),
    /// Print the self-edge count and log2 histogram of edge lengths
    Analyze {
        /// Adjacency edge file to analyze
        edge_file: PathBuf,

        /// Also write the histogram as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
    /// Print out-degree statistics of an edge file
    Stats {
        edge_file: PathBuf,

        /// Point file whose point count must match the edge file
        #[arg(long, value_name = "FILE")]
        points: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// File to save point data to
    point_file: PathBuf,

    /// File to save edge data to
    edge_file: PathBuf,

    #[arg(long, default_value_t = DEFAULT_POINT_COUNT)]
    points: usize,

    #[arg(long, default_value_t = DEFAULT_BOUNDS.0, allow_negative_numbers = true)]
    min_coord: f64,

    #[arg(long, default_value_t = DEFAULT_BOUNDS.1, allow_negative_numbers = true)]
    max_coord: f64,

    #[arg(long, default_value_t = DEFAULT_DEGREE_RANGE.0)]
    min_degree: usize,

    #[arg(long, default_value_t = DEFAULT_DEGREE_RANGE.1)]
    max_degree: usize,

    /// Random seed for a reproducible graph
    #[arg(long)]
    seed: Option<u64>,
}

impl From<&GenerateArgs> for GeneratorConfig {
    fn from(args: &GenerateArgs) -> Self {
        GeneratorConfig {
            point_count: args.points,
            bounds: (args.min_coord, args.max_coord),
            degree_range: (args.min_degree, args.max_degree),
            seed: args.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(&args),
        Command::Analyze { edge_file, csv } => run_analyze(&edge_file, csv.as_deref()),
        Command::Stats { edge_file, points } => run_stats(&edge_file, points.as_deref()),
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let cfg = GeneratorConfig::from(args);
    let out = generate(&cfg, &mut rng_for(&cfg))?;

    let file = File::create(&args.point_file)
        .with_context(|| format!("creating {}", args.point_file.display()))?;
    write_points(&out.points, BufWriter::new(file))
        .with_context(|| format!("writing {}", args.point_file.display()))?;

    let file = File::create(&args.edge_file)
        .with_context(|| format!("creating {}", args.edge_file.display()))?;
    write_adjacency(&out.graph, BufWriter::new(file))
        .with_context(|| format!("writing {}", args.edge_file.display()))?;

    print!("{}", degree_stats(&out.graph));
    Ok(())
}

fn load_graph(path: &Path) -> anyhow::Result<AdjacencyGraph> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let graph =
        read_adjacency(BufReader::new(file)).with_context(|| format!("reading {}", path.display()))?;
    info!(
        "loaded {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn run_analyze(edge_file: &Path, csv_file: Option<&Path>) -> anyhow::Result<()> {
    let graph = load_graph(edge_file)?;
    let histogram = length_histogram(&graph);
    info!("binned {} edge lengths", histogram.total());

    print!("{histogram}");

    if let Some(path) = csv_file {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        histogram
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn run_stats(edge_file: &Path, point_file: Option<&Path>) -> anyhow::Result<()> {
    let graph = load_graph(edge_file)?;

    if let Some(path) = point_file {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let points = read_points(BufReader::new(file))
            .with_context(|| format!("reading {}", path.display()))?;
        if points.len() != graph.node_count() {
            bail!(
                "{} has {} points but {} has {} nodes",
                path.display(),
                points.len(),
                edge_file.display(),
                graph.node_count()
            );
        }
    }

    print!("{}", degree_stats(&graph));
    Ok(())
}
