mod cli;
mod cli_cmds;
mod config;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
