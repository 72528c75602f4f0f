//! Dated entry persistence
//!
//! The analysis functions never touch storage; callers fetch entries through
//! [`EntryStore`] and hand plain slices to the engine. Two backends are
//! provided: an in-memory map and a pretty-printed JSON document on disk.

use crate::color::Rgb;
use crate::entry::ColorEntry;
use crate::error::{Error, Result};
use crate::stats::{MonthlyTrend, WeeklyStats};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source of dated color entries
pub trait EntryStore {
    fn get_entry(&self, date: NaiveDate) -> Result<Option<ColorEntry>>;

    /// Entries with `start <= date <= end`. Order is not guaranteed by the
    /// trait; both built-in stores return ascending dates.
    fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ColorEntry>>;

    fn all_entries(&self) -> Result<Vec<ColorEntry>>;

    /// Insert or replace the entry for its date, returning the replaced one
    fn put_entry(&mut self, entry: ColorEntry) -> Result<Option<ColorEntry>>;

    /// Remove every entry and derived aggregate
    fn clear(&mut self) -> Result<()>;

    /// Record the day's pick. The mood score comes from the nearest swatch;
    /// an existing pick for the same date is replaced.
    fn save_entry(
        &mut self,
        date: NaiveDate,
        color: Rgb,
        notes: Option<String>,
    ) -> Result<ColorEntry> {
        let entry = ColorEntry::new(date, color, notes);
        if let Some(previous) = self.put_entry(entry.clone())? {
            info!(
                %date,
                previous = %previous.color,
                color = %entry.color,
                "replaced existing entry for date"
            );
        } else {
            info!(%date, color = %entry.color, mood_score = entry.mood_score, "saved entry");
        }
        Ok(entry)
    }
}

/// Storage for derived weekly/monthly aggregates
pub trait AggregateStore {
    fn put_weekly(&mut self, stats: WeeklyStats) -> Result<()>;
    fn put_monthly(&mut self, trend: MonthlyTrend) -> Result<()>;
    fn weekly(&self, week_start: NaiveDate) -> Result<Option<WeeklyStats>>;
    /// `month` is `YYYY-MM`
    fn monthly(&self, month: &str) -> Result<Option<MonthlyTrend>>;
}

/// Current store format version — bump when the serialized shape changes
const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    entries: BTreeMap<NaiveDate, ColorEntry>,
    #[serde(default)]
    weekly_stats: BTreeMap<NaiveDate, WeeklyStats>,
    #[serde(default)]
    monthly_trends: BTreeMap<String, MonthlyTrend>,
    #[serde(default)]
    preferences: BTreeMap<String, serde_json::Value>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            entries: BTreeMap::new(),
            weekly_stats: BTreeMap::new(),
            monthly_trends: BTreeMap::new(),
            preferences: BTreeMap::new(),
        }
    }
}

impl StoreDocument {
    fn range(&self, start: NaiveDate, end: NaiveDate) -> Vec<ColorEntry> {
        if start > end {
            return Vec::new();
        }
        self.entries.range(start..=end).map(|(_, e)| e.clone()).collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.weekly_stats.clear();
        self.monthly_trends.clear();
    }
}

/// Volatile store, mostly for tests and one-shot analysis
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    doc: StoreDocument,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = ColorEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.doc.entries.insert(entry.date, entry);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.doc.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.entries.is_empty()
    }
}

impl EntryStore for MemoryStore {
    fn get_entry(&self, date: NaiveDate) -> Result<Option<ColorEntry>> {
        Ok(self.doc.entries.get(&date).cloned())
    }

    fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ColorEntry>> {
        Ok(self.doc.range(start, end))
    }

    fn all_entries(&self) -> Result<Vec<ColorEntry>> {
        Ok(self.doc.entries.values().cloned().collect())
    }

    fn put_entry(&mut self, entry: ColorEntry) -> Result<Option<ColorEntry>> {
        Ok(self.doc.entries.insert(entry.date, entry))
    }

    fn clear(&mut self) -> Result<()> {
        self.doc.clear();
        Ok(())
    }
}

impl AggregateStore for MemoryStore {
    fn put_weekly(&mut self, stats: WeeklyStats) -> Result<()> {
        self.doc.weekly_stats.insert(stats.week_start, stats);
        Ok(())
    }

    fn put_monthly(&mut self, trend: MonthlyTrend) -> Result<()> {
        self.doc.monthly_trends.insert(trend.month.clone(), trend);
        Ok(())
    }

    fn weekly(&self, week_start: NaiveDate) -> Result<Option<WeeklyStats>> {
        Ok(self.doc.weekly_stats.get(&week_start).cloned())
    }

    fn monthly(&self, month: &str) -> Result<Option<MonthlyTrend>> {
        Ok(self.doc.monthly_trends.get(month).cloned())
    }
}

/// Entry store backed by a single JSON file, rewritten after each change
#[derive(Debug)]
pub struct JsonEntryStore {
    path: PathBuf,
    doc: StoreDocument,
}

impl JsonEntryStore {
    /// Default location under the platform data directory
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "huelog", "huelog")
            .map(|dirs| dirs.data_dir().join("entries.json"))
            .unwrap_or_else(|| PathBuf::from("/tmp/huelog/entries.json"))
    }

    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let doc = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let doc: StoreDocument =
                serde_json::from_str(&content).map_err(|source| Error::Json {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path.display(), entries = doc.entries.len(), "loaded entry store");
            doc
        } else {
            StoreDocument::default()
        };

        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let io_err = |source: std::io::Error| Error::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(&self.doc).map_err(|source| Error::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content).map_err(io_err)?;

        Ok(())
    }

    /// Stored user preference, if any
    pub fn preference(&self, key: &str) -> Option<&serde_json::Value> {
        self.doc.preferences.get(key)
    }

    pub fn preferences(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.doc.preferences.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn set_preference(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        self.doc.preferences.insert(key.to_string(), value);
        self.persist()
    }
}

impl EntryStore for JsonEntryStore {
    fn get_entry(&self, date: NaiveDate) -> Result<Option<ColorEntry>> {
        Ok(self.doc.entries.get(&date).cloned())
    }

    fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ColorEntry>> {
        Ok(self.doc.range(start, end))
    }

    fn all_entries(&self) -> Result<Vec<ColorEntry>> {
        Ok(self.doc.entries.values().cloned().collect())
    }

    fn put_entry(&mut self, entry: ColorEntry) -> Result<Option<ColorEntry>> {
        let previous = self.doc.entries.insert(entry.date, entry);
        self.persist()?;
        Ok(previous)
    }

    fn clear(&mut self) -> Result<()> {
        self.doc.clear();
        self.persist()
    }
}

impl AggregateStore for JsonEntryStore {
    fn put_weekly(&mut self, stats: WeeklyStats) -> Result<()> {
        self.doc.weekly_stats.insert(stats.week_start, stats);
        self.persist()
    }

    fn put_monthly(&mut self, trend: MonthlyTrend) -> Result<()> {
        self.doc.monthly_trends.insert(trend.month.clone(), trend);
        self.persist()
    }

    fn weekly(&self, week_start: NaiveDate) -> Result<Option<WeeklyStats>> {
        Ok(self.doc.weekly_stats.get(&week_start).cloned())
    }

    fn monthly(&self, month: &str) -> Result<Option<MonthlyTrend>> {
        Ok(self.doc.monthly_trends.get(month).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::TrendDirection;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn red() -> Rgb {
        Rgb::new(0xFF, 0x3B, 0x30)
    }

    #[test]
    fn test_memory_save_replaces_same_date() {
        let mut store = MemoryStore::new();
        store.save_entry(day("2024-04-01"), red(), None).unwrap();
        let saved = store
            .save_entry(day("2024-04-01"), Rgb::new(0, 0x7A, 0xFF), Some("later".into()))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(saved.mood_score, 4);
        assert_eq!(store.get_entry(day("2024-04-01")).unwrap(), Some(saved));
        assert_eq!(store.get_entry(day("2024-04-02")).unwrap(), None);
    }

    #[test]
    fn test_range_is_inclusive_and_ordered() {
        let mut store = MemoryStore::new();
        for d in ["2024-04-05", "2024-04-01", "2024-04-03", "2024-05-01"] {
            store.save_entry(day(d), red(), None).unwrap();
        }

        let dates: Vec<_> = store
            .entries_in_range(day("2024-04-01"), day("2024-04-05"))
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec![day("2024-04-01"), day("2024-04-03"), day("2024-04-05")]);

        assert!(store
            .entries_in_range(day("2024-04-05"), day("2024-04-01"))
            .unwrap()
            .is_empty());
        assert_eq!(store.all_entries().unwrap().len(), 4);
    }

    #[test]
    fn test_json_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("entries.json");

        {
            let mut store = JsonEntryStore::open(&path).unwrap();
            store
                .save_entry(day("2024-04-01"), red(), Some("sunny".into()))
                .unwrap();
            store.save_entry(day("2024-04-02"), Rgb::new(0, 0, 0), None).unwrap();
            store
                .set_preference("reminder", serde_json::json!({ "hour": 21 }))
                .unwrap();
        }

        let store = JsonEntryStore::open(&path).unwrap();
        let entries = store.all_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].notes.as_deref(), Some("sunny"));
        assert_eq!(entries[1].mood_score, 3);
        assert_eq!(
            store.preference("reminder"),
            Some(&serde_json::json!({ "hour": 21 }))
        );
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonEntryStore::open(&path), Err(Error::Json { .. })));
    }

    #[test]
    fn test_clear_keeps_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        let mut store = JsonEntryStore::open(&path).unwrap();
        store.save_entry(day("2024-04-01"), red(), None).unwrap();
        store.set_preference("theme", serde_json::json!("dark")).unwrap();
        store
            .put_weekly(WeeklyStats {
                week_start: day("2024-04-01"),
                average_score: 9.0,
                dominant_color: "red".into(),
                color_variety: 1,
                total_entries: 1,
            })
            .unwrap();

        store.clear().unwrap();

        let reopened = JsonEntryStore::open(&path).unwrap();
        assert!(reopened.all_entries().unwrap().is_empty());
        assert!(reopened.weekly(day("2024-04-01")).unwrap().is_none());
        assert_eq!(reopened.preference("theme"), Some(&serde_json::json!("dark")));
    }

    #[test]
    fn test_aggregates() {
        let mut store = MemoryStore::new();
        let trend = MonthlyTrend {
            month: "2024-04".into(),
            trend_direction: Some(TrendDirection::Stable),
            average_score: 5.0,
            dominant_colors: vec!["green".into()],
            color_diversity: 0.1,
            total_entries: 3,
        };
        store.put_monthly(trend.clone()).unwrap();
        assert_eq!(store.monthly("2024-04").unwrap(), Some(trend));
        assert_eq!(store.monthly("2024-05").unwrap(), None);
    }
}
