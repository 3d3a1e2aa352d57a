pub mod config;
pub mod load_config;

pub use config::{Config, LogFormat, ServerConfig, StorageConfig};
pub use load_config::{load, load_or_default};
