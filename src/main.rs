use anyhow::Result;
use clap::{Parser, Subcommand};
use jdig::engine::CodeIndex;
use jdig::index::snapshot::SnapshotStore;
use jdig::index::stats;
use jdig::output;
use jdig::query::fuzzy::DEFAULT_THRESHOLD;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jdig")]
#[command(about = "Reverse token index with fuzzy lookup for Java codebases")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan codebase roots and persist a new snapshot
    Index {
        /// Root directories to scan
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// Version namespace for snapshots (e.g. a release tag)
        #[arg(long, default_value = "default")]
        tag: String,

        /// Override the snapshot storage root
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Exact lookup: which files contain a token
    Lookup {
        /// Token to look up
        token: String,

        #[arg(long, default_value = "default")]
        tag: String,

        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Fuzzy lookup: indexed tokens similar to the query
    Fuzzy {
        /// Approximate token
        token: String,

        /// Minimum similarity score (0-100)
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        #[arg(long, default_value = "default")]
        tag: String,

        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Count source files under the given roots
    Count {
        /// Root directories to scan
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
    },
    /// Show statistics for the newest snapshot of a version
    Stats {
        #[arg(long, default_value = "default")]
        tag: String,

        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List versions present under the storage root
    List {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Index { dirs, tag, data_dir } => {
            let mut engine = CodeIndex::with_store(dirs, &tag, open_store(data_dir)?)?;
            let report = engine.process_codebase()?;

            println!(
                "Indexed {} of {} files ({} tokens)",
                report.files_indexed, report.files_seen, engine.token_count()
            );
            if let Some(timestamp) = engine.timestamp() {
                println!("Snapshot: {}", timestamp);
            }
            for skip in &report.skipped {
                eprintln!("warning: skipped {}: {}", skip.path.display(), skip.reason);
            }
        }
        Commands::Lookup { token, tag, data_dir } => {
            let engine = CodeIndex::with_store(Vec::new(), &tag, open_store(data_dir)?)?;
            let files = engine.lookup(&token);
            output::print_lookup(&token, files)?;
            if files.is_empty() {
                output::print_suggestion(&token, engine.best_match(&token))?;
            }
        }
        Commands::Fuzzy {
            token,
            threshold,
            tag,
            data_dir,
        } => {
            let engine = CodeIndex::with_store(Vec::new(), &tag, open_store(data_dir)?)?;
            let matches = engine.matches_above(&token, threshold);
            output::print_fuzzy_matches(&token, &matches)?;
        }
        Commands::Count { dirs } => {
            let engine = CodeIndex::with_store(dirs, "default", SnapshotStore::open_default()?)?;
            println!("{}", engine.count_source_files());
        }
        Commands::Stats { tag, data_dir } => {
            stats::show_stats(&open_store(data_dir)?, &tag)?;
        }
        Commands::List { data_dir } => {
            stats::list_versions(&open_store(data_dir)?)?;
        }
    }

    Ok(())
}

fn open_store(data_dir: Option<PathBuf>) -> Result<SnapshotStore> {
    match data_dir {
        Some(dir) => Ok(SnapshotStore::new(dir)),
        None => SnapshotStore::open_default(),
    }
}
