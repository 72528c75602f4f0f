mod analysis_cmds;
mod entry_cmds;
mod pref_cmds;
mod stats_cmds;

pub use analysis_cmds::{cmd_analysis, cmd_frequency, cmd_mix, cmd_trend};
pub use entry_cmds::{cmd_classify, cmd_clear, cmd_list, cmd_pick, cmd_show, cmd_wheel};
pub use pref_cmds::cmd_pref;
pub use stats_cmds::cmd_stats;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use huelog::mood::PaletteEntry;
use huelog::JsonEntryStore;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::AnalysisConfig;

/// Settings shared by every command of one invocation
pub struct Context {
    pub store_path: PathBuf,
    /// Reference date; today unless `--as-of` was given
    pub as_of: NaiveDate,
    pub json: bool,
    pub analysis: AnalysisConfig,
}

impl Context {
    pub fn open_store(&self) -> Result<JsonEntryStore> {
        JsonEntryStore::open(&self.store_path).with_context(|| {
            format!("Failed to open entry store at {}", self.store_path.display())
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `Red · energy · intensity 9 · 🔥 warm`
fn swatch_line(entry: &PaletteEntry) -> String {
    format!(
        "{} · {} · intensity {} · {} {}",
        entry.display_name(),
        entry.mood,
        entry.intensity,
        entry.warmth.emoji(),
        entry.warmth
    )
}

/// Horizontal bar scaled so `max` fills `width` cells
fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "█".repeat((value * width).div_ceil(max))
}
