use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::mood::{self, PaletteEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's color pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub date: NaiveDate,
    #[serde(rename = "color_hex")]
    pub color: Rgb,
    /// Intensity of the nearest swatch at the time of the pick (1-10)
    pub mood_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ColorEntry {
    /// Build an entry, scoring the mood from the nearest swatch
    pub fn new(date: NaiveDate, color: Rgb, notes: Option<String>) -> Self {
        Self {
            date,
            color,
            mood_score: mood::classify(color).intensity,
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }

    pub fn swatch(&self) -> &'static PaletteEntry {
        mood::classify(self.color)
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scores_from_swatch() {
        let date = parse_date("2024-03-05").unwrap();
        let entry = ColorEntry::new(date, Rgb::new(255, 204, 0), Some("  ".into()));
        assert_eq!(entry.mood_score, 8);
        assert_eq!(entry.swatch().key, "yellow");
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-12-31 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert!(matches!(parse_date("2024-13-01"), Err(Error::InvalidDate(_))));
        assert!(parse_date("31/12/2024").is_err());
    }

    #[test]
    fn test_serde_shape() {
        let date = parse_date("2024-01-02").unwrap();
        let entry = ColorEntry::new(date, Rgb::new(0, 122, 255), Some("rainy".into()));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["date"], "2024-01-02");
        assert_eq!(value["color_hex"], "#007AFF");
        assert_eq!(value["mood_score"], 4);
        assert_eq!(value["notes"], "rainy");
    }
}
