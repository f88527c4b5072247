//! essaylens CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "essaylens", version, about = "Heuristic essay scoring and feedback")]
struct Cli {
    /// SQLite database path (overrides config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate essay text and persist the assessment
    Evaluate {
        /// Inline essay text
        #[arg(long, conflicts_with = "files")]
        text: Option<String>,

        /// One or more files containing essay text
        files: Vec<PathBuf>,

        /// Institution label attached to the submission
        #[arg(long)]
        university: Option<String>,

        /// Academic level: undergrad or mba
        #[arg(long)]
        level: Option<String>,

        /// Seed for reproducible scoring noise
        #[arg(long)]
        seed: Option<u64>,

        /// Max concurrent evaluations for multi-file runs (default from config)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Emit the stored submission as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored submissions
    List {
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Rows per page (max 50)
        #[arg(long)]
        limit: Option<u32>,

        /// Filter by status: draft, evaluated, archived
        #[arg(long)]
        status: Option<String>,

        /// Filter by level: undergrad or mba
        #[arg(long)]
        level: Option<String>,

        /// Sort field: created_at, updated_at, word_count, overall_score
        #[arg(long, default_value = "created_at")]
        sort_by: String,

        /// Sort order: asc or desc
        #[arg(long, default_value = "desc")]
        sort_order: String,

        /// Emit the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one submission
    Show {
        /// Submission id
        id: String,

        /// Emit the submission as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update fields of a submission (never re-evaluates)
    Update {
        /// Submission id
        id: String,

        /// Replacement essay text (recomputes word/char counts)
        #[arg(long)]
        text: Option<String>,

        /// Replacement institution label
        #[arg(long)]
        university: Option<String>,

        /// New level: undergrad or mba
        #[arg(long)]
        level: Option<String>,

        /// New status: draft, evaluated, archived
        #[arg(long)]
        status: Option<String>,

        /// Emit the updated submission as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a submission
    Delete {
        /// Submission id
        id: String,
    },

    /// Corpus-wide statistics
    Stats {
        /// Emit statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Liveness and store connectivity check
    Health,

    /// Create a starter essaylens.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("essaylens=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let settings = commands::Settings {
        db: cli.db,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Evaluate {
            text,
            files,
            university,
            level,
            seed,
            parallelism,
            json,
        } => {
            commands::evaluate::execute(
                &settings,
                text,
                files,
                university,
                level,
                seed,
                parallelism,
                json,
            )
            .await
        }
        Commands::List {
            page,
            limit,
            status,
            level,
            sort_by,
            sort_order,
            json,
        } => {
            commands::list::execute(&settings, page, limit, status, level, sort_by, sort_order, json)
                .await
        }
        Commands::Show { id, json } => commands::show::execute(&settings, id, json).await,
        Commands::Update {
            id,
            text,
            university,
            level,
            status,
            json,
        } => commands::update::execute(&settings, id, text, university, level, status, json).await,
        Commands::Delete { id } => commands::delete::execute(&settings, id).await,
        Commands::Stats { json } => commands::stats::execute(&settings, json).await,
        Commands::Health => commands::health::execute(&settings).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
