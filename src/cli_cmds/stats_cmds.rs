use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use huelog::stats::{self, MonthlyTrend, WeeklyStats};
use huelog::{AggregateStore, EntryStore, JsonEntryStore};
use serde_json::json;

use super::Context;
use crate::cli::StatsAction;

pub fn cmd_stats(ctx: &Context, action: StatsAction) -> Result<()> {
    let store = ctx.open_store()?;

    match action {
        StatsAction::Week { date } => show_week(ctx, &store, date.unwrap_or(ctx.as_of)),
        StatsAction::Month { month } => {
            let first = match month {
                Some(month) => parse_month(&month)?,
                None => stats::month_bounds(ctx.as_of).0,
            };
            show_month(ctx, &store, first)
        }
        StatsAction::Completion => {
            let entries = store.entries_in_range(NaiveDate::MIN, ctx.as_of)?;
            let completion = stats::completion(&entries, ctx.as_of);

            if ctx.json {
                return super::print_json(&completion);
            }

            println!("Total days:        {}", completion.total_days);
            if let Some(start) = completion.start_date {
                println!("First entry:       {}", start);
            }
            println!("Days since start:  {}", completion.days_since_start);
            println!("Completion rate:   {}%", completion.completion_rate);
            Ok(())
        }
    }
}

/// `YYYY-MM` to the first day of that month
fn parse_month(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))
}

/// Stored weekly stats, recomputed from entries when the background refresh
/// has not written them yet
fn week_stats(store: &JsonEntryStore, date: NaiveDate) -> Result<Option<WeeklyStats>> {
    let week_start = stats::week_start(date);
    if let Some(stored) = store.weekly(week_start)? {
        return Ok(Some(stored));
    }

    let entries = store.entries_in_range(week_start, stats::week_end(date))?;
    Ok(stats::weekly_stats(&entries, week_start))
}

fn month_trend(store: &JsonEntryStore, first: NaiveDate) -> Result<Option<MonthlyTrend>> {
    let key = stats::month_key(first);
    if let Some(stored) = store.monthly(&key)? {
        return Ok(Some(stored));
    }

    let (start, end) = stats::month_bounds(first);
    let entries = store.entries_in_range(start, end)?;
    Ok(stats::monthly_trend(&entries, &key))
}

fn show_week(ctx: &Context, store: &JsonEntryStore, date: NaiveDate) -> Result<()> {
    let week = week_stats(store, date)?;

    if ctx.json {
        return super::print_json(&week);
    }

    let week_start = stats::week_start(date);
    let Some(week) = week else {
        println!("No entries for the week of {}", week_start);
        return Ok(());
    };

    println!("Week of {} to {}", week_start, stats::week_end(date));
    println!("  Entries:        {}", week.total_entries);
    println!("  Average score:  {:.1}", week.average_score);
    println!("  Dominant color: {}", week.dominant_color);
    println!("  Color variety:  {}", week.color_variety);

    Ok(())
}

fn show_month(ctx: &Context, store: &JsonEntryStore, first: NaiveDate) -> Result<()> {
    let trend = month_trend(store, first)?;
    let (start, end) = stats::month_bounds(first);
    let summary = stats::month_summary(&store.entries_in_range(start, end)?);

    if ctx.json {
        return super::print_json(&json!({ "trend": trend, "summary": summary }));
    }

    let Some(trend) = trend else {
        println!("No entries for {}", first.format("%B %Y"));
        return Ok(());
    };

    println!("{}", first.format("%B %Y"));
    println!("  Entries:         {}", trend.total_entries);
    if let Some(direction) = trend.trend_direction {
        println!("  Trend:           {} {}", direction.arrow(), direction);
    }
    println!("  Average score:   {:.1}", trend.average_score);
    println!("  Top colors:      {}", trend.dominant_colors.join(", "));
    println!("  Color diversity: {:.0}%", trend.color_diversity * 100.0);
    if let Some(summary) = summary {
        println!(
            "  Days recorded {}, average {}/10, mostly {}, {} colors",
            summary.total_days, summary.average_score, summary.dominant_color, summary.color_variety
        );
    }

    Ok(())
}
