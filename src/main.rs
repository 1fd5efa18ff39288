//! Command-line interface for schema-eval
//!
//! # Usage Examples
//!
//! ```bash
//! # Ten rows, one JSON object per line
//! schema-eval generate --schema demos/owner.yaml --count 10
//!
//! # Reproduce a previous run
//! SCHEMA_EVAL_SEED=7 schema-eval generate -s demos/owner.yaml -n 10
//!
//! # List eager and lazy leaves
//! schema-eval classify --schema demos/owner.yaml
//! ```
//!
//! Set `RUST_LOG=debug` to see how the schema is split and evaluated.

use clap::{Parser, Subcommand};
use schema_eval::{run_classify, run_generate, ClassifyArgs, GenerateArgs};
use std::io;

#[derive(Parser)]
#[command(name = "schema-eval")]
#[command(about = "Generate synthetic rows from a two-phase YAML schema")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the schema and write rows as JSON lines to stdout
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Show which leaves are evaluated eagerly and which lazily
    Classify {
        #[command(flatten)]
        args: ClassifyArgs,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Generate { args } => run_generate(&args, &mut out),
        Commands::Classify { args } => run_classify(&args, &mut out),
    }
}
