use anyhow::Result;
use chrono::{Days, NaiveDate};
use huelog::stats::{self, Period, ANALYSIS_WINDOW_DAYS};
use huelog::{frequency, insight, mixture, trend, EntryStore};
use serde_json::json;

use super::{bar, print_json, swatch_line, Context};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn cmd_mix(ctx: &Context, period: Period) -> Result<()> {
    let (start, end) = period.range(ctx.as_of);
    let entries = ctx.open_store()?.entries_in_range(start, end)?;
    let mixture = mixture::mix(&entries, ctx.as_of);
    let plain = mixture::plain_average(&entries);

    if ctx.json {
        return print_json(&json!({
            "period": period,
            "as_of": ctx.as_of,
            "mixture": mixture,
            "plain_average": plain,
        }));
    }

    println!("{}", period.title());
    println!("{}", period.description());
    println!();

    let Some(mixture) = mixture else {
        println!("No colors selected for this period yet.");
        return Ok(());
    };

    let balance = &mixture.color_balance;
    println!(
        "  Mixed color:   {} (closest: {})",
        mixture.mixed_color,
        swatch_line(mixture.closest)
    );
    println!(
        "  Intensity:     {} {}/10",
        insight::mood_emoji(mixture.average_intensity),
        mixture.average_intensity
    );
    println!(
        "  Warmth:        {} {} (warm {} · cool {} · neutral {})",
        mixture.dominant_warmth.emoji(),
        mixture.dominant_warmth,
        balance.warm,
        balance.cool,
        balance.neutral
    );
    println!("  Entries:       {}", mixture.total_entries);
    if let Some(plain) = plain {
        println!(
            "  Plain average: {} (score {})",
            plain.mixed_color, plain.average_score
        );
    }
    println!();
    println!("{}", mixture.interpretation);
    for recommendation in &mixture.recommendations {
        println!("  • {}", recommendation);
    }

    Ok(())
}

/// First day of a window of `days` days ending at `as_of`
fn window_start(as_of: NaiveDate, days: u32) -> NaiveDate {
    as_of
        .checked_sub_days(Days::new(u64::from(days.max(1) - 1)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn cmd_trend(ctx: &Context, days: Option<u32>) -> Result<()> {
    let days = days.unwrap_or(ctx.analysis.trend_window_days).max(1);
    let entries = ctx
        .open_store()?
        .entries_in_range(window_start(ctx.as_of, days), ctx.as_of)?;
    let result = trend::analyze_trend(&entries);

    if ctx.json {
        return print_json(&json!({
            "days": days,
            "as_of": ctx.as_of,
            "entries": entries.len(),
            "trend": result,
        }));
    }

    let Some(result) = result else {
        println!("No entries in the last {} days.", days);
        return Ok(());
    };

    println!(
        "Trend over the last {} days ({} entries)",
        days,
        entries.len()
    );
    println!(
        "  Direction:    {} {}",
        result.direction.arrow(),
        result.direction
    );
    println!("  Average:      {:.1}/10", result.average_score);
    println!(
        "  Range:        {}-{}",
        result.score_range.min, result.score_range.max
    );
    println!("  Consistency:  {:.0}%", result.consistency * 100.0);

    Ok(())
}

pub fn cmd_frequency(ctx: &Context, top: Option<usize>) -> Result<()> {
    let entries = ctx
        .open_store()?
        .entries_in_range(NaiveDate::MIN, ctx.as_of)?;
    let freq = frequency::frequency(&entries);
    let top = freq.top_n(top.unwrap_or(ctx.analysis.top_colors));

    if ctx.json {
        let top: Vec<_> = top
            .iter()
            .map(|(entry, count)| json!({ "color": entry.key, "count": count }))
            .collect();
        return print_json(&json!({
            "total": freq.total(),
            "distinct": freq.distinct(),
            "diversity": freq.diversity(),
            "top": top,
        }));
    }

    if freq.is_empty() {
        println!("No entries recorded.");
        return Ok(());
    }

    println!(
        "Most picked colors ({} entries, {} of 10 swatches)",
        freq.total(),
        freq.distinct()
    );
    let max = top.first().map(|(_, count)| *count).unwrap_or(0);
    for (rank, (entry, count)) in top.iter().enumerate() {
        println!(
            "  {}. {:<7} {:<20} {}",
            rank + 1,
            entry.display_name(),
            bar(*count, max, 20),
            count
        );
    }

    Ok(())
}

pub fn cmd_analysis(ctx: &Context) -> Result<()> {
    let (start, end) = stats::analysis_window(ctx.as_of);
    let entries = ctx.open_store()?.entries_in_range(start, end)?;
    let report = stats::analysis_report(&entries, ctx.as_of);

    if ctx.json {
        return print_json(&report);
    }

    let Some(report) = report else {
        println!(
            "No entries in the last {} days. Pick a color to get started.",
            ANALYSIS_WINDOW_DAYS
        );
        return Ok(());
    };

    println!(
        "Analysis of the last {} days ({} entries)",
        ANALYSIS_WINDOW_DAYS, report.total_days
    );
    println!();

    if let Some(trend) = &report.weekly_trend {
        println!("Weekly trend");
        println!(
            "  {} {} · average {:.1} · consistency {:.0}%",
            trend.direction.arrow(),
            trend.direction,
            trend.average_score,
            trend.consistency * 100.0
        );
    }

    if let Some(mixture) = &report.mixture {
        println!("Color mixture");
        println!(
            "  {} · closest {}",
            mixture.mixed_color,
            mixture.closest.display_name()
        );
        println!("  {}", mixture.interpretation);
    }

    println!("Favorite colors");
    for (entry, count) in report.frequency.top_n(3) {
        println!("  {:<7} {}", entry.display_name(), count);
    }

    println!("Weekday pattern");
    for (day, average) in WEEKDAYS.iter().zip(report.weekday_pattern) {
        let cells = average.round() as usize;
        println!("  {} {:<10} {:.1}", day, bar(cells, 10, 10), average);
    }

    println!(
        "Average mood: {} {:.1}/10",
        insight::mood_emoji(report.average_mood.round() as u8),
        report.average_mood
    );

    if !report.insights.is_empty() {
        println!();
        println!("Insights");
        for line in &report.insights {
            println!("  • {}", line);
        }
    }

    if let Some(mixture) = &report.mixture {
        println!();
        println!("Recommendations");
        for line in &mixture.recommendations {
            println!("  • {}", line);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_start_is_inclusive() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(window_start(as_of, 7), NaiveDate::from_ymd_opt(2024, 6, 24).unwrap());
        assert_eq!(window_start(as_of, 30), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(window_start(as_of, 0), as_of);
    }

    #[test]
    fn test_window_start_clamps_to_calendar_start() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(window_start(as_of, 4_000_000_000), NaiveDate::MIN);
        assert_eq!(window_start(as_of, u32::MAX), NaiveDate::MIN);
        assert_eq!(window_start(NaiveDate::MIN, 2), NaiveDate::MIN);
    }
}
