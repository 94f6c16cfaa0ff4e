//! Phenograph CLI
//!
//! Drives genotype-to-phenotype association shaping from the command line:
//! - `materialize`: association records (JSON) → statements (JSON lines)
//! - `id`: print the derived association id for one tuple
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `info`).

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use phenograph_assoc::AssociationConfig;
use phenograph_graph::MemoryGraph;
use phenograph_vocab::TermTable;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod pipeline;

use pipeline::{build_association, AssociationRecord};

#[derive(Parser)]
#[command(name = "phenograph")]
#[command(
    author,
    version,
    about = "Phenograph: genotype-to-phenotype association statements"
)]
struct Cli {
    /// Association settings (JSON; missing fields use defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Vocabulary overrides (JSON object of term name → CURIE)
    #[arg(long, global = true)]
    vocab: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Materialize association records into statements.
    Materialize {
        /// Input records (JSON array)
        input: PathBuf,
        /// Output statements (JSON lines); stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the derived id of one association.
    Id {
        /// Source ("defined by") of the association
        source: String,
        subject: String,
        object: String,
        /// Relation CURIE (default: the vocabulary's "has phenotype")
        #[arg(long)]
        relation: Option<String>,
        #[arg(long)]
        environment: Option<String>,
        /// Start stage
        #[arg(long)]
        start: Option<String>,
        /// End stage
        #[arg(long)]
        end: Option<String>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AssociationConfig> {
    let Some(path) = path else {
        return Ok(AssociationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    AssociationConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn load_vocab(path: Option<&Path>) -> Result<TermTable> {
    match path {
        Some(path) => TermTable::builtin_with_overrides(path)
            .with_context(|| format!("failed to load vocabulary {}", path.display())),
        None => Ok(TermTable::builtin()),
    }
}

fn cmd_materialize(
    vocab: &TermTable,
    config: &AssociationConfig,
    input: &Path,
    out: Option<&Path>,
) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read records {}", input.display()))?;
    let records: Vec<AssociationRecord> = serde_json::from_str(&text)
        .with_context(|| format!("invalid records file {}", input.display()))?;

    let mut graph = MemoryGraph::new();
    let summary = pipeline::run(vocab, config, &records, &mut graph);

    match out {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            graph.write_json_lines(&mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            graph.write_json_lines(&mut writer)?;
            writer.flush()?;
        }
    }

    tracing::info!(
        records = records.len(),
        materialized = summary.materialized,
        failed = summary.failed,
        statements = summary.statements,
        "materialization finished"
    );

    if summary.failed > 0 {
        return Err(anyhow!(
            "{} of {} records failed to materialize",
            summary.failed,
            records.len()
        ));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = load_config(cli.config.as_deref())?;
    let vocab = load_vocab(cli.vocab.as_deref())?;

    match cli.command {
        Commands::Materialize { input, out } => {
            cmd_materialize(&vocab, &config, &input, out.as_deref())?;
        }
        Commands::Id {
            source,
            subject,
            object,
            relation,
            environment,
            start,
            end,
        } => {
            let record = AssociationRecord {
                source,
                subject,
                object,
                relation,
                start_stage: start,
                end_stage: end,
                environment,
                ..Default::default()
            };
            let assoc = build_association(&vocab, &config, &record)?;
            println!("{}", assoc.make_g2p_id());
        }
    }

    Ok(())
}
