use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
const DEFAULT_STORAGE_BACKEND: &str = "native_db";
const DEFAULT_STORAGE_LOCATION: &str = "~/.local/share/kitchen";

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to (default: 127.0.0.1:8080)
    pub listen: Option<String>,

    /// Directory served for every path outside of the API prefix
    pub static_dir: Option<String>,

    /// Log output format, "text" or "json" (default: text)
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Storage backend, "native_db" or "in_memory" (default: native_db)
    pub backend: Option<String>,

    /// Where the kitchen database will be located (default: ~/.local/share/kitchen)
    pub location: Option<String>,
}

impl ServerConfig {
    pub fn get_listen(&self) -> String {
        self.listen
            .clone()
            .unwrap_or_else(|| DEFAULT_LISTEN.to_owned())
    }

    pub fn get_static_dir(&self) -> Option<PathBuf> {
        self.static_dir
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
    }

    pub fn get_log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_default()
    }
}

impl StorageConfig {
    pub fn get_backend(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_STORAGE_BACKEND)
    }

    /// Gets the storage location with `~` expanded.
    pub fn get_storage_location(&self) -> PathBuf {
        let path_str = self
            .location
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_LOCATION);
        let expanded_path = shellexpand::tilde(path_str);
        PathBuf::from(expanded_path.as_ref())
    }
}
