// taskdeck/src/layered_config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

const DEFAULT_DATA_PATH: &str = "tasks.json";
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8080";

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub http: HttpConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HttpConfig {
    pub addr: Option<String>,
}

fn merge(a: &mut Config, b: &Config) {
    let overlay = |dst: &mut Option<String>, src: &Option<String>| {
        if src.is_some() {
            *dst = src.clone();
        }
    };
    if b.data.path.is_some() {
        a.data.path = b.data.path.clone();
    }
    overlay(&mut a.http.addr, &b.http.addr);
}

fn config_paths(workspace_root: &Path) -> (Option<PathBuf>, PathBuf) {
    let user = ProjectDirs::from("dev", "earthlings", "taskdeck")
        .map(|p| p.config_dir().join("config.toml"));
    let workspace = workspace_root.join("taskdeck.toml");
    (user, workspace)
}

impl Config {
    /// Loads user-scope then workspace-scope config; later layers win.
    /// Missing files are skipped silently; unreadable ones are skipped with
    /// a warning. Config is advisory, unlike the task data file whose
    /// corruption is fatal.
    pub fn load(workspace_root: &Path) -> Self {
        let (user, workspace) = config_paths(workspace_root);
        let mut merged = Config::default();
        for path in user.iter().chain(std::iter::once(&workspace)) {
            if let Some(layer) = Self::read_file(path) {
                merge(&mut merged, &layer);
            }
        }
        merged
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let text = fs::read_to_string(path).ok()?;
        match toml::from_str(&text) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!("skipping config {}: {e}", path.display());
                None
            }
        }
    }

    /// CLI flags act as the highest-precedence overlay.
    pub fn apply_cli(&mut self, data: Option<PathBuf>, addr: Option<String>) {
        let patch = Config {
            data: DataConfig { path: data },
            http: HttpConfig { addr },
        };
        merge(self, &patch);
    }

    pub fn data_path(&self) -> PathBuf {
        self.data
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
    }

    pub fn http_addr(&self) -> String {
        self.http
            .addr
            .clone()
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string())
    }
}
