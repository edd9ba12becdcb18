// Draft formula lab entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the draft dataset and, if configured, precomputed leaderboards
// 4. Build LabState and spawn the app task
// 5. Run the TUI until the user quits

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use draftlab_core::config;
use draftlab_core::loader::{load_draft_players, load_original_leaderboards};
use draftlab_tui::app::{self, LabState, OriginalBoards};
use draftlab_tui::tui;

const LOG_FILE: &str = "draftlab.log";
const DEFAULT_LOG_FILTER: &str = "draftlab=info,warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Draft formula lab starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: mode={}, leaderboard size {}",
        config.scoring.mode.label(),
        config.scoring.leaderboard_size
    );

    let players = load_draft_players(Path::new(&config.data_paths.draft))
        .with_context(|| format!("failed to load draft data from {}", config.data_paths.draft))?;
    if players.is_empty() {
        warn!("Draft dataset {} has no usable rows", config.data_paths.draft);
    }
    info!("Loaded {} players", players.len());

    let original = config
        .data_paths
        .leaderboards
        .as_deref()
        .and_then(load_precomputed);

    let export_dir = std::env::current_dir()?.join("exports");
    let state = LabState::new(config, players, original, export_dir);

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, state).await {
            error!("Application loop error: {}", e);
        }
    });

    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Draft formula lab shut down cleanly");
    Ok(())
}

/// Precomputed boards are optional: a missing or unreadable file only
/// disables the `o` view.
fn load_precomputed(path: &str) -> Option<OriginalBoards> {
    match load_original_leaderboards(Path::new(path)) {
        Ok(boards) => {
            let rows: usize = boards.values().map(Vec::len).sum();
            info!("Loaded {} precomputed leaderboard rows from {}", rows, path);
            Some(boards)
        }
        Err(e) => {
            warn!("Precomputed leaderboards unavailable: {}", e);
            None
        }
    }
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
///
/// Logs go to `logs/` under the working directory, or the platform data
/// directory when that cannot be created.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = log_dir()?;
    let log_file = std::fs::File::create(log_dir.join(LOG_FILE))
        .with_context(|| format!("failed to create log file in {}", log_dir.display()))?;

    let filter = EnvFilter::try_from_env("DRAFTLAB_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

fn log_dir() -> anyhow::Result<std::path::PathBuf> {
    let local = std::env::current_dir()?.join("logs");
    if std::fs::create_dir_all(&local).is_ok() {
        return Ok(local);
    }

    let dirs = directories::ProjectDirs::from("", "", "draftlab")
        .context("no writable log directory")?;
    let fallback = dirs.data_dir().join("logs");
    std::fs::create_dir_all(&fallback)
        .with_context(|| format!("failed to create {}", fallback.display()))?;
    Ok(fallback)
}
