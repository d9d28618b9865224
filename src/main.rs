// taskdeck/src/main.rs

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use taskdeck::store::SharedStore;
use taskdeck::{Config, Menu, TaskStore, http_server};

#[derive(Parser)]
#[command(
    name = "taskdeck",
    version,
    about = "Task list with an interactive menu and an HTTP API"
)]
struct Args {
    /// Task data file (overrides config; default tasks.json)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Bind address for the HTTP API (overrides config; default 127.0.0.1:8080)
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(Path::new("."));
    cfg.apply_cli(args.data, args.addr);
    let data_path = cfg.data_path();
    let addr = cfg.http_addr();

    let store = TaskStore::load(&data_path)
        .with_context(|| format!("load task file {}", data_path.display()))?;
    info!(tasks = store.len(), file = %data_path.display(), "task store loaded");
    let store: SharedStore = store.shared();

    let mut server = tokio::spawn(http_server::serve(addr, store.clone()));
    let menu_store = store.clone();
    let mut menu = tokio::task::spawn_blocking(move || Menu::over_stdio(menu_store).run());

    tokio::select! {
        res = &mut menu => {
            res.context("menu thread")??;
            server.abort();
        }
        res = &mut server => {
            res.context("http server task")??;
            bail!("http server stopped unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, saving tasks");
            persist(&store, &data_path)?;
            // The menu thread is parked on a blocking stdin read; a normal
            // runtime shutdown would wait on it forever.
            std::process::exit(0);
        }
    }

    persist(&store, &data_path)?;
    info!(file = %data_path.display(), "tasks saved");
    Ok(())
}

/// Snapshot under the lock, write after releasing it.
fn persist(store: &SharedStore, path: &Path) -> Result<()> {
    let snapshot = store.lock().clone();
    snapshot
        .save(path)
        .with_context(|| format!("save task file {}", path.display()))
}
