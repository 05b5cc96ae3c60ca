//! `btb` - BowTieBuilder pathway reconstruction from tab-separated files.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{info, LevelFilter};

use bowtie_builder::io::{check_inputs, read_network, read_node_list, write_pathway};
use bowtie_builder::pathway::{reconstruct, BuilderConfig};
use bowtie_builder::report::RunReport;
use bowtie_builder::{InteractionNetwork, Result};

/// BowTieBuilder pathway reconstruction
#[derive(Parser, Debug)]
#[command(name = "btb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the edges file
    #[arg(long)]
    edges: PathBuf,

    /// Path to the sources file
    #[arg(long)]
    sources: PathBuf,

    /// Path to the targets file
    #[arg(long)]
    targets: PathBuf,

    /// Path to the output file that will be written
    #[arg(long)]
    output: PathBuf,

    /// Also write a JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,

    /// Stop after this many absorbed paths
    #[arg(long, env = "BTB_MAX_ITERATIONS")]
    max_iterations: Option<usize>,

    /// Stop after this many seconds
    #[arg(long, env = "BTB_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Increase logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn builder_config(&self) -> BuilderConfig {
        let mut config = BuilderConfig::new();
        if let Some(iterations) = self.max_iterations {
            config = config.with_max_iterations(iterations);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_deadline(Duration::from_secs(secs));
        }
        config
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<()> {
    check_inputs(&cli.edges, &cli.sources, &cli.targets)?;

    let edges = read_network(&cli.edges)?;
    let sources = read_node_list(&cli.sources)?;
    let targets = read_node_list(&cli.targets)?;
    let network = InteractionNetwork::build(edges, sources.iter().chain(&targets).cloned())?;
    info!(
        "Network has {} nodes and {} edges; {} sources, {} targets",
        network.vertex_count(),
        network.edge_count(),
        sources.len(),
        targets.len()
    );

    let reconstruction = reconstruct(&network, &sources, &targets, cli.builder_config())?;
    write_pathway(&cli.output, &reconstruction.pathway, &network)?;

    if let Some(path) = &cli.report {
        RunReport::new(&reconstruction, &network)?.write(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
