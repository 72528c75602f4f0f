//! Calendar aggregates built on top of the engine
//!
//! Weekly stats and monthly trends are what the background refresher keeps
//! up to date in the store. The rest (month summary, weekday pattern,
//! completion, analysis report) is computed on demand for display.

use crate::entry::ColorEntry;
use crate::frequency::{self, ColorFrequency};
use crate::insight;
use crate::mixture::{self, MixtureResult};
use crate::trend::{self, TrendDirection, TrendResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days the analysis report looks back from the reference day
pub const ANALYSIS_WINDOW_DAYS: i64 = 30;

/// Most recent entries used for the weekly trend inside the report
const WEEKLY_TREND_ENTRIES: usize = 7;

/// Swatches listed per monthly trend
const MONTHLY_TOP_COLORS: usize = 3;

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN)
}

/// Sunday of the week containing `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date)
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX)
}

/// First and last day of the month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

/// `YYYY-MM` key for the month containing `date`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Inclusive range read by the analysis report: the reference day and the
/// [`ANALYSIS_WINDOW_DAYS`] days before it
pub fn analysis_window(as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = as_of
        .checked_sub_days(Days::new(ANALYSIS_WINDOW_DAYS.unsigned_abs()))
        .unwrap_or(NaiveDate::MIN);
    (start, as_of)
}

fn mean_mood(entries: &[ColorEntry]) -> f64 {
    entries.iter().map(|e| f64::from(e.mood_score)).sum::<f64>() / entries.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    /// Mean stored mood score
    pub average_score: f64,
    pub dominant_color: String,
    /// Number of distinct swatches picked
    pub color_variety: usize,
    pub total_entries: usize,
}

/// Stats for the week starting at `week_start`, computed from whatever
/// entries the caller selected for it
pub fn weekly_stats(entries: &[ColorEntry], week_start: NaiveDate) -> Option<WeeklyStats> {
    if entries.is_empty() {
        return None;
    }

    let freq = frequency::frequency(entries);
    Some(WeeklyStats {
        week_start,
        average_score: mean_mood(entries),
        dominant_color: freq.dominant()?.key.to_string(),
        color_variety: freq.distinct(),
        total_entries: entries.len(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// `YYYY-MM`
    pub month: String,
    #[serde(default)]
    pub trend_direction: Option<TrendDirection>,
    pub average_score: f64,
    /// Up to three most picked swatch keys
    pub dominant_colors: Vec<String>,
    /// Share of the palette used this month
    pub color_diversity: f64,
    pub total_entries: usize,
}

pub fn monthly_trend(entries: &[ColorEntry], month: &str) -> Option<MonthlyTrend> {
    if entries.is_empty() {
        return None;
    }

    let freq = frequency::frequency(entries);
    Some(MonthlyTrend {
        month: month.to_string(),
        trend_direction: trend::analyze_trend(entries).map(|t| t.direction),
        average_score: mean_mood(entries),
        dominant_colors: freq
            .top_n(MONTHLY_TOP_COLORS)
            .into_iter()
            .map(|(entry, _)| entry.key.to_string())
            .collect(),
        color_diversity: freq.diversity(),
        total_entries: entries.len(),
    })
}

/// Calendar footer for a month view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub total_days: usize,
    /// Rounded mean mood score
    pub average_score: u8,
    pub dominant_color: String,
    pub color_variety: usize,
}

pub fn month_summary(entries: &[ColorEntry]) -> Option<MonthSummary> {
    if entries.is_empty() {
        return None;
    }

    let freq = frequency::frequency(entries);
    Some(MonthSummary {
        total_days: entries.len(),
        average_score: mean_mood(entries).round().clamp(0.0, 255.0) as u8,
        dominant_color: freq.dominant()?.key.to_string(),
        color_variety: freq.distinct(),
    })
}

/// Mean mood score per weekday, Monday first. Weekdays without entries are 0.
pub fn weekday_pattern(entries: &[ColorEntry]) -> [f64; 7] {
    let mut sums = [0.0f64; 7];
    let mut counts = [0usize; 7];

    for entry in entries {
        let day = entry.date.weekday().num_days_from_monday() as usize;
        sums[day] += f64::from(entry.mood_score);
        counts[day] += 1;
    }

    let mut pattern = [0.0f64; 7];
    for day in 0..7 {
        if counts[day] > 0 {
            pattern[day] = sums[day] / counts[day] as f64;
        }
    }
    pattern
}

/// How regularly the diary has been kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionStats {
    pub total_days: usize,
    pub days_since_start: i64,
    /// Rounded percentage of days with an entry since the first one
    pub completion_rate: u32,
    pub start_date: Option<NaiveDate>,
}

pub fn completion(entries: &[ColorEntry], as_of: NaiveDate) -> CompletionStats {
    let start_date = entries.iter().map(|e| e.date).min();
    let days_since_start = start_date
        .map(|start| (as_of - start).num_days())
        .unwrap_or(0);
    let completion_rate = if days_since_start > 0 {
        (entries.len() as f64 / days_since_start as f64 * 100.0).round() as u32
    } else {
        0
    };

    CompletionStats {
        total_days: entries.len(),
        days_since_start,
        completion_rate,
        start_date,
    }
}

/// Everything shown on the analysis view for a recent window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total_days: usize,
    /// Trend over the seven most recent entries
    pub weekly_trend: Option<TrendResult>,
    pub mixture: Option<MixtureResult>,
    pub frequency: ColorFrequency,
    pub weekday_pattern: [f64; 7],
    pub average_mood: f64,
    pub insights: Vec<String>,
}

/// Analyze the entries of a window (usually the last
/// [`ANALYSIS_WINDOW_DAYS`] days). Returns `None` when there is nothing to
/// analyze.
pub fn analysis_report(entries: &[ColorEntry], as_of: NaiveDate) -> Option<AnalysisReport> {
    if entries.is_empty() {
        return None;
    }

    let mut recent = entries.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(WEEKLY_TREND_ENTRIES);
    let weekly_trend = trend::analyze_trend(&recent);

    let freq = frequency::frequency(entries);
    let average_mood = mean_mood(entries);
    let insights = insight::personal_insights(
        weekly_trend.as_ref().map(|t| t.consistency),
        freq.distinct(),
        average_mood,
    );

    Some(AnalysisReport {
        total_days: entries.len(),
        weekly_trend,
        mixture: mixture::mix(entries, as_of),
        frequency: freq,
        weekday_pattern: weekday_pattern(entries),
        average_mood,
        insights,
    })
}

/// Mixture period relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Everything picked so far
    #[default]
    Daily,
    /// Monday of this week up to the reference date
    Weekly,
    /// First of this month up to the reference date
    Monthly,
    /// January 1st up to the reference date
    Yearly,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Daily, Period::Weekly, Period::Monthly, Period::Yearly];

    /// Inclusive date range covered as of `as_of`
    pub fn range(&self, as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Period::Daily => NaiveDate::MIN,
            Period::Weekly => week_start(as_of),
            Period::Monthly => month_bounds(as_of).0,
            Period::Yearly => NaiveDate::from_ymd_opt(as_of.year(), 1, 1).unwrap_or(as_of),
        };
        (start, as_of)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Period::Daily => "Daily Mixture",
            Period::Weekly => "Weekly Mixture",
            Period::Monthly => "Monthly Mixture",
            Period::Yearly => "Yearly Mixture",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Period::Daily => "Mixture of all colors you have selected so far",
            Period::Weekly => "Mixture of colors you selected this week",
            Period::Monthly => "Mixture of colors you selected this month",
            Period::Yearly => "Mixture of colors you selected this year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::PaletteEntry;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pick(date: &str, key: &str) -> ColorEntry {
        ColorEntry::new(day(date), PaletteEntry::by_key(key).unwrap().hex, None)
    }

    #[test]
    fn test_week_bounds_start_monday() {
        // 2024-06-12 is a Wednesday
        assert_eq!(week_start(day("2024-06-12")), day("2024-06-10"));
        assert_eq!(week_end(day("2024-06-12")), day("2024-06-16"));
        // Sunday belongs to the week that started the previous Monday
        assert_eq!(week_start(day("2024-06-16")), day("2024-06-10"));
        assert_eq!(week_start(day("2024-06-10")), day("2024-06-10"));
    }

    #[test]
    fn test_week_bounds_at_calendar_limits() {
        assert_eq!(week_start(NaiveDate::MIN), NaiveDate::MIN);
        assert_eq!(week_end(NaiveDate::MAX), NaiveDate::MAX);
        assert!(week_start(NaiveDate::MAX) <= NaiveDate::MAX);
    }

    #[test]
    fn test_analysis_window_spans_thirty_days_back() {
        assert_eq!(analysis_window(day("2024-06-30")), (day("2024-05-31"), day("2024-06-30")));
        assert_eq!(analysis_window(NaiveDate::MIN), (NaiveDate::MIN, NaiveDate::MIN));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(day("2024-02-14")), (day("2024-02-01"), day("2024-02-29")));
        assert_eq!(month_bounds(day("2023-12-31")), (day("2023-12-01"), day("2023-12-31")));
        assert_eq!(month_key(day("2024-02-14")), "2024-02");
    }

    #[test]
    fn test_weekly_stats() {
        let entries = [
            pick("2024-06-10", "red"),
            pick("2024-06-11", "blue"),
            pick("2024-06-12", "blue"),
        ];
        let stats = weekly_stats(&entries, day("2024-06-10")).unwrap();
        assert_eq!(stats.dominant_color, "blue");
        assert_eq!(stats.color_variety, 2);
        assert_eq!(stats.total_entries, 3);
        assert!((stats.average_score - 17.0 / 3.0).abs() < 1e-12);
        assert!(weekly_stats(&[], day("2024-06-10")).is_none());
    }

    #[test]
    fn test_monthly_trend() {
        let entries = [
            pick("2024-06-01", "white"),
            pick("2024-06-02", "white"),
            pick("2024-06-03", "yellow"),
            pick("2024-06-04", "red"),
            pick("2024-06-05", "green"),
        ];
        let trend = monthly_trend(&entries, "2024-06").unwrap();
        assert_eq!(trend.trend_direction, Some(TrendDirection::Increasing));
        assert_eq!(trend.dominant_colors, vec!["white", "red", "yellow"]);
        assert!((trend.color_diversity - 0.4).abs() < 1e-12);
        assert_eq!(trend.total_entries, 5);
    }

    #[test]
    fn test_month_summary() {
        let entries = [pick("2024-06-01", "pink"), pick("2024-06-02", "green")];
        let summary = month_summary(&entries).unwrap();
        // (6 + 5) / 2 = 5.5 -> 6
        assert_eq!(summary.average_score, 6);
        assert_eq!(summary.dominant_color, "green");
        assert_eq!(summary.color_variety, 2);
        assert!(month_summary(&[]).is_none());
    }

    #[test]
    fn test_weekday_pattern() {
        let entries = [
            pick("2024-06-10", "red"),   // Monday, 9
            pick("2024-06-17", "white"), // Monday, 2
            pick("2024-06-16", "green"), // Sunday, 5
        ];
        let pattern = weekday_pattern(&entries);
        assert_eq!(pattern[0], 5.5);
        assert_eq!(pattern[6], 5.0);
        assert_eq!(pattern[3], 0.0);
    }

    #[test]
    fn test_completion() {
        let entries = [pick("2024-06-01", "red"), pick("2024-06-05", "red")];
        let stats = completion(&entries, day("2024-06-11"));
        assert_eq!(stats.days_since_start, 10);
        assert_eq!(stats.completion_rate, 20);
        assert_eq!(stats.start_date, Some(day("2024-06-01")));

        let empty = completion(&[], day("2024-06-11"));
        assert_eq!(empty.total_days, 0);
        assert_eq!(empty.completion_rate, 0);
        assert_eq!(empty.start_date, None);
    }

    #[test]
    fn test_analysis_report_uses_most_recent_week_for_trend() {
        let mut entries = Vec::new();
        // Older high-energy days, then a calm recent week
        for d in 1..=10 {
            entries.push(pick(&format!("2024-06-{d:02}"), "red"));
        }
        for d in 11..=17 {
            entries.push(pick(&format!("2024-06-{d:02}"), "blue"));
        }

        let report = analysis_report(&entries, day("2024-06-17")).unwrap();
        let trend = report.weekly_trend.unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.consistency, 1.0);
        assert_eq!(report.total_days, 17);
        assert_eq!(report.frequency.count("red"), 10);
        assert!(report.mixture.is_some());
        assert!(report.insights.iter().any(|i| i.contains("emotional stability")));
        assert!(analysis_report(&[], day("2024-06-17")).is_none());
    }

    #[test]
    fn test_period_ranges() {
        let as_of = day("2024-06-12");
        assert_eq!(Period::Weekly.range(as_of), (day("2024-06-10"), as_of));
        assert_eq!(Period::Monthly.range(as_of), (day("2024-06-01"), as_of));
        assert_eq!(Period::Yearly.range(as_of), (day("2024-01-01"), as_of));
        assert_eq!(Period::Daily.range(as_of).0, NaiveDate::MIN);
    }
}
