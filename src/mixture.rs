//! Recency-weighted color mixtures
//!
//! Each entry's channels and swatch intensity are scaled by a step-function
//! weight based on its age, summed, and divided by the plain entry count.
//! Dividing by the count rather than the weight total biases older
//! histories toward darker mixes; historical mixtures depend on it.

use crate::color::Rgb;
use crate::entry::ColorEntry;
use crate::insight;
use crate::mood::{self, PaletteEntry, Warmth};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Weight of an entry dated `date` when mixing as of `as_of`.
/// Entries dated after `as_of` count as recent.
pub fn recency_weight(date: NaiveDate, as_of: NaiveDate) -> f64 {
    let days = (as_of - date).num_days();
    if days <= 7 {
        1.0
    } else if days <= 30 {
        0.8
    } else if days <= 90 {
        0.6
    } else {
        0.4
    }
}

/// Unweighted warmth tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarmthBalance {
    pub warm: usize,
    pub cool: usize,
    pub neutral: usize,
}

impl WarmthBalance {
    pub fn record(&mut self, warmth: Warmth) {
        match warmth {
            Warmth::Warm => self.warm += 1,
            Warmth::Cool => self.cool += 1,
            Warmth::Neutral => self.neutral += 1,
        }
    }

    /// Warm or cool only when strictly ahead of both others, neutral
    /// otherwise. A warm/cool tie is neutral even with zero neutral picks.
    pub fn dominant(&self) -> Warmth {
        if self.warm > self.cool && self.warm > self.neutral {
            Warmth::Warm
        } else if self.cool > self.warm && self.cool > self.neutral {
            Warmth::Cool
        } else {
            Warmth::Neutral
        }
    }

    pub fn total(&self) -> usize {
        self.warm + self.cool + self.neutral
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixtureResult {
    pub mixed_color: Rgb,
    pub average_intensity: u8,
    pub dominant_warmth: Warmth,
    pub color_balance: WarmthBalance,
    pub total_entries: usize,
    /// Swatch nearest to the mixed color
    pub closest: &'static PaletteEntry,
    pub interpretation: String,
    pub recommendations: Vec<String>,
}

fn round_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Mix `entries` as of `as_of`. Returns `None` for an empty slice.
pub fn mix(entries: &[ColorEntry], as_of: NaiveDate) -> Option<MixtureResult> {
    if entries.is_empty() {
        return None;
    }

    let (mut r, mut g, mut b, mut intensity) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    let mut balance = WarmthBalance::default();

    for entry in entries {
        let swatch = mood::classify(entry.color);
        let weight = recency_weight(entry.date, as_of);

        r += f64::from(entry.color.r) * weight;
        g += f64::from(entry.color.g) * weight;
        b += f64::from(entry.color.b) * weight;
        intensity += f64::from(swatch.intensity) * weight;

        balance.record(swatch.warmth);
    }

    let count = entries.len() as f64;
    let mixed_color = Rgb::new(
        round_channel(r / count),
        round_channel(g / count),
        round_channel(b / count),
    );
    let average_intensity = round_channel(intensity / count);
    let dominant_warmth = balance.dominant();

    debug!(
        entries = entries.len(),
        mixed = %mixed_color,
        average_intensity,
        dominant = %dominant_warmth,
        "computed mixture"
    );

    Some(MixtureResult {
        mixed_color,
        average_intensity,
        dominant_warmth,
        color_balance: balance,
        total_entries: entries.len(),
        closest: mood::classify(mixed_color),
        interpretation: insight::interpretation(average_intensity, dominant_warmth),
        recommendations: insight::recommendations(average_intensity, dominant_warmth),
    })
}

/// Unweighted blend of everything picked so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainMixture {
    pub mixed_color: Rgb,
    /// Rounded mean of stored mood scores
    pub average_score: u8,
    pub total_entries: usize,
}

pub fn plain_average(entries: &[ColorEntry]) -> Option<PlainMixture> {
    if entries.is_empty() {
        return None;
    }

    let count = entries.len() as f64;
    let sum = |channel: fn(&ColorEntry) -> u8| -> f64 {
        entries.iter().map(|e| f64::from(channel(e))).sum::<f64>()
    };

    Some(PlainMixture {
        mixed_color: Rgb::new(
            round_channel(sum(|e| e.color.r) / count),
            round_channel(sum(|e| e.color.g) / count),
            round_channel(sum(|e| e.color.b) / count),
        ),
        average_score: round_channel(sum(|e| e.mood_score) / count),
        total_entries: entries.len(),
    })
}
