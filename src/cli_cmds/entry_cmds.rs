use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use huelog::{insight, mood, ColorEntry, EntryStore, Rgb, StatsRefresher, Wheel};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use super::{print_json, swatch_line, Context};

pub async fn cmd_pick(
    ctx: &Context,
    color: Rgb,
    date: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<()> {
    let date = date.unwrap_or(ctx.as_of);
    let store = Arc::new(Mutex::new(ctx.open_store()?));

    let (previous, entry) = {
        let mut store = store.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = store.get_entry(date)?;
        let entry = store
            .save_entry(date, color, notes)
            .context("Failed to save entry")?;
        (previous, entry)
    };

    // Aggregates for the touched week and month are rebuilt off the write path
    let (refresher, worker) = StatsRefresher::spawn(Arc::clone(&store));
    if !refresher.enqueue(date) {
        warn!(%date, "stats refresh worker is gone, aggregates not refreshed");
    }
    refresher.shutdown();
    let refreshed = worker.await.context("Stats refresh worker failed")?;
    debug!(refreshed, "stats refresh drained");

    if ctx.json {
        return print_json(&entry);
    }

    let swatch = entry.swatch();
    println!("✓ Saved {} for {}", entry.color, entry.date);
    if let Some(previous) = previous {
        println!("  (replaced {})", previous.color);
    }
    println!("  {}", swatch_line(swatch));
    println!("  {}", mood::describe(swatch).analysis_text);

    Ok(())
}

pub fn cmd_wheel(ctx: &Context, dx: f32, dy: f32, radius: f32) -> Result<()> {
    if radius.is_nan() || radius <= 0.0 {
        bail!("Wheel radius must be positive, got {}", radius);
    }

    let color = Wheel::new(radius).color_at(dx, dy);
    let analysis = mood::analyze(color);

    if ctx.json {
        return print_json(&analysis);
    }

    println!("{} → {}", color, swatch_line(analysis.entry));
    Ok(())
}

pub fn cmd_show(ctx: &Context, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or(ctx.as_of);
    let entry = ctx.open_store()?.get_entry(date)?;

    if ctx.json {
        return print_json(&entry);
    }

    match entry {
        Some(entry) => {
            println!("{}", entry.date.format("%A, %B %-d, %Y"));
            println!("  Color: {}", entry.color);
            println!("  {}", swatch_line(entry.swatch()));
            println!(
                "  Mood:  {} {}/10",
                insight::mood_emoji(entry.mood_score),
                entry.mood_score
            );
            if let Some(notes) = &entry.notes {
                println!("  Notes: {}", notes);
            }
        }
        None => println!("No entry for {}", date),
    }

    Ok(())
}

pub fn cmd_list(ctx: &Context, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let from = from.unwrap_or(NaiveDate::MIN);
    let to = to.unwrap_or(ctx.as_of);
    let entries = ctx.open_store()?.entries_in_range(from, to)?;

    if ctx.json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No entries recorded.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", list_line(entry));
    }
    println!();
    println!("{} entries", entries.len());

    Ok(())
}

fn list_line(entry: &ColorEntry) -> String {
    let mut line = format!(
        "{}  {}  {:<7} {:>2}/10",
        entry.date,
        entry.color,
        entry.swatch().key,
        entry.mood_score
    );
    if let Some(notes) = &entry.notes {
        line.push_str("  ");
        line.push_str(notes);
    }
    line
}

pub fn cmd_classify(ctx: &Context, color: Rgb) -> Result<()> {
    let analysis = mood::analyze(color);

    if ctx.json {
        return print_json(&analysis);
    }

    println!("{} is closest to {}", color, analysis.entry.hex);
    println!("  {}", swatch_line(analysis.entry));
    println!();
    println!("{}", analysis.description.analysis_text);
    for suggestion in &analysis.description.suggestions {
        println!("  • {}", suggestion);
    }

    Ok(())
}

pub fn cmd_clear(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        println!(
            "This deletes every entry and statistic in {}.",
            ctx.store_path.display()
        );
        println!("Run again with --yes to confirm.");
        return Ok(());
    }

    let mut store = ctx.open_store()?;
    let count = store.all_entries()?.len();
    store.clear().context("Failed to clear entry store")?;
    println!("✓ Cleared {} entries", count);

    Ok(())
}
