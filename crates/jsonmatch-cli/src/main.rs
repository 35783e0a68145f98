//! The `jsonmatch` binary: a thin driver over `jsonmatch-core`.
//!
//! Discovers JSON documents in a directory, runs the selected matching
//! strategy, and prints the resulting groups to stdout as JSON. All
//! diagnostics go to stderr via `tracing`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use jsonmatch_core::{n_way_match, CostModelKind, Document, Group, MatchConfig, Strategy};

mod error;
mod io;

use error::CliError;

#[derive(Parser)]
#[command(name = "jsonmatch", about = "Cross-document JSON component matching")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match components across the JSON documents in a directory
    Match {
        /// Directory scanned (non-recursively) for .json/.JSON files
        dir: PathBuf,

        /// Matching strategy
        #[arg(long, value_enum, default_value_t = StrategyArg::Pivot)]
        strategy: StrategyArg,

        /// Drop matches whose tree edit distance exceeds this
        #[arg(long, default_value_t = 25.0)]
        cost_thresh: f64,

        /// Serialize object keys in sorted order before comparing
        #[arg(long)]
        sort_keys: bool,

        /// Use the text-aware cost model instead of unit costs
        #[arg(long)]
        text_aware: bool,
    },

    /// Print the jsonmatch-core library version
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Largest document against every other
    Pivot,
    /// Every ordered document pair
    AllPairs,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Pivot => Strategy::Pivot,
            StrategyArg::AllPairs => Strategy::AllPairs,
        }
    }
}

impl std::fmt::Display for StrategyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pivot => f.write_str("pivot"),
            Self::AllPairs => f.write_str("all-pairs"),
        }
    }
}

/// One component in the printed output.
#[derive(Serialize)]
struct GroupEntry {
    /// Document id (position in the sorted file list).
    doc: usize,
    /// Component index within that document.
    comp: usize,
    /// Cost of the match that pulled this component into the group.
    cost: f64,
    /// Source file name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Match {
            dir,
            strategy,
            cost_thresh,
            sort_keys,
            text_aware,
        } => {
            let documents = io::load_documents(&dir)?;
            tracing::debug!(documents = documents.len(), "documents loaded");

            let config = MatchConfig {
                cost_thresh,
                sort_keys,
                cost_model: if text_aware {
                    CostModelKind::TextAware
                } else {
                    CostModelKind::Unit
                },
                ..MatchConfig::default()
            };

            let groups = n_way_match(&documents, strategy.into(), &config)
                .map_err(|e| CliError::Engine {
                    detail: e.to_string(),
                })?;

            let rendered = render_groups(&groups, &documents);
            println!(
                "{}",
                serde_json::to_string_pretty(&rendered).map_err(|e| CliError::Engine {
                    detail: e.to_string(),
                })?
            );
            Ok(())
        }
        Command::Version => {
            println!("{}", jsonmatch_core::version());
            Ok(())
        }
    }
}

fn render_groups(groups: &[Group], documents: &[Document]) -> Vec<Vec<GroupEntry>> {
    groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|c| GroupEntry {
                    doc: c.doc_id,
                    comp: c.comp_id,
                    cost: c.cost,
                    name: documents.get(c.doc_id).and_then(|d| d.name.clone()),
                })
                .collect()
        })
        .collect()
}
