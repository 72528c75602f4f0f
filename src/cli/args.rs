use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use huelog::mood::PaletteEntry;
use huelog::stats::Period;
use huelog::{parse_date, Rgb};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huelog")]
#[command(author = "MrMattias")]
#[command(version)]
#[command(about = "Daily color mood diary with mixture, trend and frequency analysis")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Entry store file (defaults to the configured path)
    #[arg(short, long, global = true)]
    pub(crate) store: Option<PathBuf>,

    /// Reference date for analysis, YYYY-MM-DD (defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Record the color of the day
    Pick {
        /// Hex color (#RRGGBB) or palette name
        #[arg(value_parser = parse_color)]
        color: Rgb,
        /// Day to record (defaults to the reference date)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Optional note for the day
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Color under a point of the color wheel, relative to its center
    Wheel {
        /// Horizontal offset from the center
        #[arg(allow_negative_numbers = true)]
        dx: f32,
        /// Vertical offset from the center
        #[arg(allow_negative_numbers = true)]
        dy: f32,
        /// Wheel radius
        #[arg(short, long, default_value = "140")]
        radius: f32,
    },
    /// Show the entry for a day
    Show {
        /// Day to show (defaults to the reference date)
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List recorded entries
    List {
        /// First day to include
        #[arg(short, long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        /// Last day to include (defaults to the reference date)
        #[arg(short, long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Classify a color against the mood palette
    Classify {
        /// Hex color (#RRGGBB) or palette name
        #[arg(value_parser = parse_color)]
        color: Rgb,
    },
    /// Blend the colors of a period into one
    Mix {
        /// Period to blend
        #[arg(short, long, value_enum, default_value_t = PeriodArg::Daily)]
        period: PeriodArg,
    },
    /// Intensity trend over recent days
    Trend {
        /// Days to cover (defaults to the configured window)
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Most picked palette colors
    Frequency {
        /// Number of colors to list (defaults to the configured count)
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Full analysis of the last 30 days
    Analysis,
    /// Weekly, monthly and completion statistics
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },
    /// Manage user preferences
    Pref {
        #[command(subcommand)]
        action: PrefAction,
    },
    /// Delete all entries and statistics
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum StatsAction {
    /// Stats for the week containing a day
    Week {
        /// Any day of the week (defaults to the reference date)
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Trend and summary for a month
    Month {
        /// Month as YYYY-MM (defaults to the reference month)
        month: Option<String>,
    },
    /// How regularly entries have been recorded
    Completion,
}

#[derive(Subcommand)]
pub(crate) enum PrefAction {
    /// Show one preference, or all of them
    Get {
        /// Preference key
        key: Option<String>,
    },
    /// Set a preference (JSON value, or plain text)
    Set {
        /// Preference key
        key: String,
        /// New value
        value: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum PeriodArg {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Daily => Period::Daily,
            PeriodArg::Weekly => Period::Weekly,
            PeriodArg::Monthly => Period::Monthly,
            PeriodArg::Yearly => Period::Yearly,
        }
    }
}

/// Accept a hex color or the name of a palette swatch
fn parse_color(s: &str) -> Result<Rgb, String> {
    if let Some(entry) = PaletteEntry::by_key(s) {
        return Ok(entry.hex);
    }
    s.parse::<Rgb>()
        .map_err(|e| format!("{e} (expected #RRGGBB or a palette color name)"))
}
