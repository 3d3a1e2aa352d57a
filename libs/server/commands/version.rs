use clap::Args;

use kitchen_config::Config;

#[derive(Args, Debug)]
pub struct Command {}

pub async fn handle(_: Command, _config: Config) -> eyre::Result<()> {
    println!("kitchen {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
