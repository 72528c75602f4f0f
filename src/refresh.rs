//! Background recompute of weekly stats and monthly trends
//!
//! Writers enqueue the date they touched and move on. A single worker task
//! drains the queue and rewrites the aggregates for that date's week and
//! month. Readers may see stale aggregates until the job for a write lands;
//! a failed job is logged and dropped, never reported back to the writer.

use crate::entry::ColorEntry;
use crate::error::Result;
use crate::stats;
use crate::store::{AggregateStore, EntryStore};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshJob {
    pub date: NaiveDate,
}

/// Handle for queueing refresh jobs. Cloneable; the worker exits once every
/// handle is dropped and the queue is drained.
#[derive(Debug, Clone)]
pub struct StatsRefresher {
    tx: mpsc::UnboundedSender<RefreshJob>,
}

impl StatsRefresher {
    /// Spawn the worker on the current tokio runtime. The join handle
    /// resolves to the number of jobs that completed successfully.
    pub fn spawn<S>(store: Arc<Mutex<S>>) -> (Self, JoinHandle<usize>)
    where
        S: EntryStore + AggregateStore + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<RefreshJob>();

        let handle = tokio::spawn(async move {
            let mut completed = 0;
            while let Some(job) = rx.recv().await {
                let store = Arc::clone(&store);
                let outcome =
                    tokio::task::spawn_blocking(move || run_job(&store, job.date)).await;

                match outcome {
                    Ok(Ok(())) => {
                        completed += 1;
                        debug!(date = %job.date, "refreshed aggregates");
                    }
                    Ok(Err(err)) => {
                        warn!(date = %job.date, "aggregate refresh failed: {err}");
                    }
                    Err(err) => {
                        warn!(date = %job.date, "aggregate refresh task aborted: {err}");
                    }
                }
            }
            completed
        });

        (Self { tx }, handle)
    }

    /// Queue a refresh for `date`. Returns false if the worker is gone.
    pub fn enqueue(&self, date: NaiveDate) -> bool {
        self.tx.send(RefreshJob { date }).is_ok()
    }

    /// Stop accepting jobs from this handle; pending jobs still run
    pub fn shutdown(self) {
        drop(self.tx);
    }
}

fn run_job<S>(store: &Mutex<S>, date: NaiveDate) -> Result<()>
where
    S: EntryStore + AggregateStore,
{
    let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
    refresh_date(&mut *guard, date)
}

/// Recompute the weekly stats and monthly trend covering `date`.
/// Periods that no longer have entries are left untouched.
pub fn refresh_date<S>(store: &mut S, date: NaiveDate) -> Result<()>
where
    S: EntryStore + AggregateStore + ?Sized,
{
    let week_start = stats::week_start(date);
    let week: Vec<ColorEntry> = store.entries_in_range(week_start, stats::week_end(date))?;
    if let Some(weekly) = stats::weekly_stats(&week, week_start) {
        store.put_weekly(weekly)?;
    }

    let (month_start, month_end) = stats::month_bounds(date);
    let month: Vec<ColorEntry> = store.entries_in_range(month_start, month_end)?;
    if let Some(monthly) = stats::monthly_trend(&month, &stats::month_key(date)) {
        store.put_monthly(monthly)?;
    }

    Ok(())
}
