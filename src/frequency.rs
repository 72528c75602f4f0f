//! Swatch occurrence counts for "most selected color" reporting

use crate::entry::ColorEntry;
use crate::mood::{self, PaletteEntry, PALETTE, PALETTE_SIZE};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Per-swatch counts, indexed in palette order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorFrequency {
    counts: [usize; PALETTE_SIZE],
}

impl ColorFrequency {
    /// Count for a swatch key (0 for unknown keys)
    pub fn count(&self, key: &str) -> usize {
        PALETTE
            .iter()
            .position(|e| e.key == key)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }

    /// Swatches with at least one pick, in palette order
    pub fn iter(&self) -> impl Iterator<Item = (&'static PaletteEntry, usize)> + '_ {
        PALETTE
            .iter()
            .zip(self.counts.iter().copied())
            .filter(|(_, count)| *count > 0)
    }

    /// Up to `n` swatches by descending count; ties keep palette order
    pub fn top_n(&self, n: usize) -> Vec<(&'static PaletteEntry, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Most picked swatch, earliest in palette order on ties
    pub fn dominant(&self) -> Option<&'static PaletteEntry> {
        self.top_n(1).first().map(|(entry, _)| *entry)
    }

    /// Number of different swatches picked
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|c| **c > 0).count()
    }

    /// Share of the palette that was used at least once
    pub fn diversity(&self) -> f64 {
        self.distinct() as f64 / PALETTE_SIZE as f64
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Serialize for ColorFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.distinct()))?;
        for (entry, count) in self.iter() {
            map.serialize_entry(entry.key, &count)?;
        }
        map.end()
    }
}

/// Tally swatches over `entries`
pub fn frequency(entries: &[ColorEntry]) -> ColorFrequency {
    let mut freq = ColorFrequency::default();
    for entry in entries {
        freq.counts[mood::classify_index(entry.color)] += 1;
    }
    freq
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entries(picks: &[(&str, usize)]) -> Vec<ColorEntry> {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        picks.iter()
            .flat_map(|(key, n)| {
                let hex = PaletteEntry::by_key(key).unwrap().hex;
                std::iter::repeat(ColorEntry::new(date, hex, None)).take(*n)
            })
            .collect()
    }

    #[test]
    fn test_counts() {
        let freq = frequency(&entries(&[("green", 1), ("red", 3), ("blue", 3)]));
        assert_eq!(freq.count("red"), 3);
        assert_eq!(freq.count("blue"), 3);
        assert_eq!(freq.count("green"), 1);
        assert_eq!(freq.count("pink"), 0);
        assert_eq!(freq.count("teal"), 0);
        assert_eq!(freq.total(), 7);
        assert_eq!(freq.distinct(), 3);
        assert!((freq.diversity() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_dominant_tie_uses_palette_order() {
        // blue is inserted first but red precedes it in the palette
        for _ in 0..3 {
            let freq = frequency(&entries(&[("blue", 3), ("green", 1), ("red", 3)]));
            assert_eq!(freq.dominant().unwrap().key, "red");
        }
    }

    #[test]
    fn test_top_n_order() {
        let freq = frequency(&entries(&[("gray", 2), ("white", 5), ("pink", 2), ("red", 1)]));
        let keys: Vec<_> = freq.top_n(3).iter().map(|(e, c)| (e.key, *c)).collect();
        assert_eq!(keys, vec![("white", 5), ("pink", 2), ("gray", 2)]);
        assert_eq!(freq.top_n(10).len(), 4);
        assert!(freq.top_n(0).is_empty());
    }

    #[test]
    fn test_empty() {
        let freq = frequency(&[]);
        assert!(freq.is_empty());
        assert!(freq.dominant().is_none());
        assert_eq!(freq.diversity(), 0.0);
    }

    #[test]
    fn test_serializes_as_key_map() {
        let freq = frequency(&entries(&[("yellow", 2), ("black", 1)]));
        let json = serde_json::to_value(&freq).unwrap();
        assert_eq!(json, serde_json::json!({ "yellow": 2, "black": 1 }));
    }
}
