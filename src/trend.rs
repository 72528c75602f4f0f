//! Direction and steadiness of daily intensity over a window of entries

use crate::entry::ColorEntry;
use crate::mood;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-over-half change in mean intensity needed to call a trend
const TREND_THRESHOLD: f64 = 1.0;

/// Standard deviation at which consistency bottoms out
const CONSISTENCY_CEILING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn from_difference(difference: f64) -> Self {
        if difference > TREND_THRESHOLD {
            TrendDirection::Increasing
        } else if difference < -TREND_THRESHOLD {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "↗",
            TrendDirection::Decreasing => "↘",
            TrendDirection::Stable => "→",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub average_score: f64,
    pub score_range: ScoreRange,
    /// 1.0 = identical intensity every day, 0.0 = widely scattered
    pub consistency: f64,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Analyze entries in any order. Returns `None` for an empty slice.
///
/// The halves are `ceil(n/2)` earliest samples and the samples from
/// `floor(n/2)` on, so an odd count shares its middle sample.
pub fn analyze_trend(entries: &[ColorEntry]) -> Option<TrendResult> {
    if entries.is_empty() {
        return None;
    }

    let mut samples: Vec<(NaiveDate, u8)> = entries
        .iter()
        .map(|e| (e.date, mood::classify(e.color).intensity))
        .collect();
    samples.sort_by_key(|(date, _)| *date);

    let scores: Vec<f64> = samples.iter().map(|(_, s)| f64::from(*s)).collect();
    let n = scores.len();
    let first_half = &scores[..n.div_ceil(2)];
    let second_half = &scores[n / 2..];
    let difference = mean(second_half) - mean(first_half);

    let min = samples.iter().map(|(_, s)| *s).min().unwrap_or(0);
    let max = samples.iter().map(|(_, s)| *s).max().unwrap_or(0);

    Some(TrendResult {
        direction: TrendDirection::from_difference(difference),
        average_score: mean(&scores),
        score_range: ScoreRange { min, max },
        consistency: consistency(&scores),
    })
}

/// `1 - population_stddev / 5`, clamped to `[0, 1]`. Empty input is
/// perfectly consistent.
pub fn consistency(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 1.0;
    }

    let avg = mean(scores);
    let variance = scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / scores.len() as f64;

    (1.0 - variance.sqrt() / CONSISTENCY_CEILING).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    /// One entry per day, colored by a swatch with the given intensity
    fn series(intensities: &[u8]) -> Vec<ColorEntry> {
        intensities
            .iter()
            .enumerate()
            .map(|(i, &intensity)| {
                let hex = match intensity {
                    2 => Rgb::new(0xFF, 0xFF, 0xFF),
                    3 => Rgb::new(0x00, 0x00, 0x00),
                    4 => Rgb::new(0x00, 0x7A, 0xFF),
                    5 => Rgb::new(0x34, 0xC7, 0x59),
                    8 => Rgb::new(0xFF, 0xCC, 0x00),
                    9 => Rgb::new(0xFF, 0x3B, 0x30),
                    other => panic!("no swatch fixture for intensity {other}"),
                };
                ColorEntry::new(start() + Duration::days(i as i64), hex, None)
            })
            .collect()
    }

    #[test]
    fn test_empty_is_none() {
        assert!(analyze_trend(&[]).is_none());
    }

    #[test]
    fn test_constant_week_is_stable_and_fully_consistent() {
        let result = analyze_trend(&series(&[5; 7])).unwrap();
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.consistency, 1.0);
        assert_eq!(result.average_score, 5.0);
        assert_eq!(result.score_range, ScoreRange { min: 5, max: 5 });
    }

    #[test]
    fn test_increasing_with_overlapping_halves() {
        let result = analyze_trend(&series(&[2, 2, 2, 2, 8, 8, 8])).unwrap();
        assert_eq!(result.direction, TrendDirection::Increasing);
        assert_eq!(result.score_range, ScoreRange { min: 2, max: 8 });
        assert!((result.average_score - 32.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_decreasing() {
        let result = analyze_trend(&series(&[9, 9, 8, 3, 2, 2])).unwrap();
        assert_eq!(result.direction, TrendDirection::Decreasing);
    }

    #[test]
    fn test_sorts_by_date_before_splitting() {
        let mut entries = series(&[2, 2, 2, 2, 8, 8, 8]);
        entries.reverse();
        let result = analyze_trend(&entries).unwrap();
        assert_eq!(result.direction, TrendDirection::Increasing);
    }

    #[test]
    fn test_small_difference_is_stable() {
        // halves [4, 5] and [5, 5] share the middle sample: 5 - 4.5 = 0.5
        let result = analyze_trend(&series(&[4, 5, 5])).unwrap();
        assert_eq!(result.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_single_entry() {
        let result = analyze_trend(&series(&[9])).unwrap();
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.consistency, 1.0);
    }

    #[test]
    fn test_consistency_bounds() {
        assert_eq!(consistency(&[]), 1.0);
        // stddev of [0, 10] is 5 -> 0
        assert_eq!(consistency(&[0.0, 10.0]), 0.0);
        // stddev of [0, 20] is 10 -> clamped at 0
        assert_eq!(consistency(&[0.0, 20.0]), 0.0);
        // stddev of [4, 6] is 1 -> 0.8
        assert!((consistency(&[4.0, 6.0]) - 0.8).abs() < 1e-12);
    }
}
