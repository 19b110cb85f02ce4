use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use penalcode_core::search::DEFAULT_MAX_RESULTS;
use penalcode_core::{Pipeline, ReferenceRegistry};
use penalcode_store::CLEANED_FILE;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod display;

#[derive(Parser)]
#[command(name = "penalcode", version, about = "Clean and classify penal-code offense records")]
struct Cli {
    /// Registry JSON replacing the built-in NYS Penal Law tables.
    #[arg(long, global = true, env = "PENALCODE_REGISTRY")]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter, validate, and normalise raw offenses; write cleaned set and report.
    Clean {
        /// JSON array of raw offense records.
        #[arg(long, short, env = "PENALCODE_INPUT")]
        input: PathBuf,

        /// Directory for cleaned_offenses.json and offense_cleanup_report.json.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Also write the cleaned set as Parquet.
        #[arg(long)]
        parquet: Option<PathBuf>,
    },

    /// Keyword search over a cleaned offense file (name, citation, class).
    Search {
        query: String,

        #[arg(long, short, default_value = CLEANED_FILE)]
        input: PathBuf,

        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        limit: usize,

        /// Print matches as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective reference registry as JSON.
    Registry,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("PENALCODE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Clean {
            input,
            out_dir,
            parquet,
        } => {
            let raw = penalcode_store::read_offenses(&input)
                .with_context(|| format!("reading offenses from {}", input.display()))?;

            let registry = load_registry(cli.registry.as_deref())?;
            let output = Pipeline::new(registry).run(raw);

            let paths = penalcode_store::write_outputs(&out_dir, &output)
                .with_context(|| format!("writing outputs to {}", out_dir.display()))?;

            if let Some(path) = parquet {
                penalcode_store::write_cleaned_parquet(&path, &output.cleaned)
                    .with_context(|| format!("writing parquet to {}", path.display()))?;
            }

            display::print_summary(&output.summary, &paths);
        }
        Command::Search {
            query,
            input,
            limit,
            json,
        } => {
            let cleaned = penalcode_store::read_cleaned(&input)
                .with_context(|| format!("reading cleaned offenses from {}", input.display()))?;
            let hits = penalcode_core::search(&cleaned, &query, limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                display::print_results(&query, &hits);
            }
        }
        Command::Registry => {
            let registry = load_registry(cli.registry.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&registry)?);
        }
    }

    Ok(())
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<ReferenceRegistry> {
    let registry = match path {
        Some(p) => penalcode_store::read_registry(p)
            .with_context(|| format!("loading registry from {}", p.display()))?,
        None => {
            info!("using built-in NYS Penal Law registry");
            ReferenceRegistry::builtin()
        }
    };

    let unreachable = registry.unreachable_vfo_sections();
    if !unreachable.is_empty() {
        warn!(
            sections = ?unreachable,
            "VFO sections missing from valid sections; records on them will be rejected"
        );
    }
    Ok(registry)
}
