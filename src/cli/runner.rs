use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::{Cli, Commands};
use crate::cli_cmds::*;
use crate::config::Config;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    init_tracing(&config);

    let ctx = Context {
        store_path: cli.store.unwrap_or_else(|| config.store_path()),
        as_of: cli.as_of.unwrap_or_else(|| Local::now().date_naive()),
        json: cli.json,
        analysis: config.analysis.clone(),
    };
    debug!(store = %ctx.store_path.display(), as_of = %ctx.as_of, "starting");

    match cli.command {
        Commands::Pick { color, date, notes } => {
            cmd_pick(&ctx, color, date, notes).await?;
        }
        Commands::Wheel { dx, dy, radius } => {
            cmd_wheel(&ctx, dx, dy, radius)?;
        }
        Commands::Show { date } => {
            cmd_show(&ctx, date)?;
        }
        Commands::List { from, to } => {
            cmd_list(&ctx, from, to)?;
        }
        Commands::Classify { color } => {
            cmd_classify(&ctx, color)?;
        }
        Commands::Mix { period } => {
            cmd_mix(&ctx, period.into())?;
        }
        Commands::Trend { days } => {
            cmd_trend(&ctx, days)?;
        }
        Commands::Frequency { top } => {
            cmd_frequency(&ctx, top)?;
        }
        Commands::Analysis => {
            cmd_analysis(&ctx)?;
        }
        Commands::Stats { action } => {
            cmd_stats(&ctx, action)?;
        }
        Commands::Pref { action } => {
            cmd_pref(&ctx, action)?;
        }
        Commands::Clear { yes } => {
            cmd_clear(&ctx, yes)?;
        }
    }

    Ok(())
}
