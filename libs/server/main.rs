use clap::{Parser, Subcommand};
use directories_next::ProjectDirs;
use std::path::PathBuf;

mod commands {
    pub mod serve;
    pub mod version;
}
mod http;
mod tracing;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(commands::serve::Command),
    /// Print the server version
    Version(commands::version::Command),
}

impl Command {
    pub async fn execute(self, config: kitchen_config::Config) -> eyre::Result<()> {
        use commands::*;
        match self {
            Self::Serve(o) => serve::handle(o, config).await?,
            Self::Version(o) => version::handle(o, config).await?,
        };

        Ok(())
    }
}

// Note: for uniformity, we dont use clap `default_value` or `default_value_t` options
#[derive(Parser, Debug)]
#[command(
    name = "kitchen",
    version,
    long_about = Some("Track daily reports, tasks, chores and pomodoros over a REST API.")
)]
struct Args {
    /// Path of configuration file (default: "~/.config/kitchen/config.toml")
    #[arg(short, long)]
    config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn get_default_config_path() -> eyre::Result<String> {
        let proj_dirs = ProjectDirs::from("", "", "kitchen")
            .ok_or_else(|| eyre::eyre!("Project directories could not be found."))?;
        let config_path: PathBuf = proj_dirs.config_dir().join("config.toml");

        config_path
            .to_str()
            .map(|t| t.to_owned())
            .ok_or_else(|| eyre::eyre!("couldn't convert os path to string"))
    }

    /// Loads the configuration file. Returns whether a file was found: a
    /// missing default file falls back to defaults, an explicit one must exist.
    fn load_config(&self) -> eyre::Result<(kitchen_config::Config, bool)> {
        let (config_path, explicit) = match &self.config {
            Some(path) => (shellexpand::full(path)?.into_owned(), true),
            None => (Self::get_default_config_path()?, false),
        };

        let loaded = if explicit {
            kitchen_config::load(&config_path).map(|config| (config, true))
        } else {
            kitchen_config::load_or_default(&config_path)
        };

        loaded.map_err(|e| {
            eyre::eyre!(
                "An error occured when trying to open the configuration file '{}': {}",
                config_path,
                e
            )
        })
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let (config, found) = args.load_config()?;
    tracing::setup(config.server.get_log_format())?;
    if !found {
        ::tracing::warn!("no configuration file found, using defaults");
    }

    args.command.execute(config).await?;
    Ok(())
}
