//! `tally` - terminal front end for chess-tally.
//!
//! `tally dashboard` prints the scoreboard. `tally admin ...` maintains the
//! records once unlocked with `tally admin login --pin <PIN>`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use tally_cli::{AdminPanel, Dashboard};
use tally_core::config::TallyConfig;
use tally_core::db::Database;
use tally_core::domain::{AccessGate, RecordStore};

#[derive(Parser)]
#[command(name = "tally", about = "Head-to-head chess score tracker")]
struct Cli {
    /// Directory holding storage.db (defaults to $TALLY_DATA_DIR or ~/.config/chess-tally)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// When omitted, shows the dashboard.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show scores, win rates, recent games and charts.
    Dashboard {
        /// Number of recent games to list.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Maintain game records (requires an unlocked session).
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Unlock the admin commands for the session window.
    Login {
        #[arg(long)]
        pin: String,
    },
    /// End the admin session.
    Logout,
    /// Record a finished game.
    Add {
        /// Date of play, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Game number on that date.
        #[arg(long)]
        number: String,
        /// nithin, vishvesh or draw.
        #[arg(long)]
        winner: String,
    },
    /// Delete a game by id.
    Delete { id: i64 },
    /// List every game, newest first.
    List,
    /// Show aggregate counts.
    Stats,
    /// Write all games and statistics to a JSON file.
    Export {
        /// Output file. Defaults to chess-games-<date>.json in the current directory.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Delete every game.
    Clear {
        /// Confirm that all data should be deleted.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TallyConfig::from_env(cli.data_dir);

    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");

    let db = Arc::new(
        Database::open(config.db_path())
            .with_context(|| format!("opening {}", config.db_path().display()))?,
    );
    let store = RecordStore::load(Arc::clone(&db))?;

    match cli.command.unwrap_or(Commands::Dashboard { limit: None }) {
        Commands::Dashboard { limit } => {
            let mut dashboard = Dashboard::new(store, limit.unwrap_or(config.recent_limit));
            print!("{}", dashboard.render());
        }
        Commands::Admin { action } => {
            let gate = AccessGate::from_config(db, &config);
            let mut panel = AdminPanel::new(store, gate);
            run_admin(&mut panel, action)?;
        }
    }

    Ok(())
}

fn run_admin(panel: &mut AdminPanel, action: AdminAction) -> anyhow::Result<()> {
    let output = match action {
        AdminAction::Login { pin } => panel.login(&pin)?,
        AdminAction::Logout => panel.logout()?,
        AdminAction::Add {
            date,
            number,
            winner,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive().to_string());
            panel.add(&date, &number, &winner)?
        }
        AdminAction::Delete { id } => panel.delete(id)?,
        AdminAction::List => panel.list()?,
        AdminAction::Stats => panel.stats()?,
        AdminAction::Export { out } => {
            let cwd = std::env::current_dir().context("resolving current directory")?;
            let (path, message) = panel.export(out.as_deref(), &cwd)?;
            format!("{} ({})", message, path.display())
        }
        AdminAction::Clear { yes } => panel.clear(yes)?,
    };

    println!("{}", output.trim_end());
    Ok(())
}
