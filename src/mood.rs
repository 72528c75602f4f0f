//! Fixed mood palette and nearest-swatch classification
//!
//! Every color maps to one of ten canonical swatches by plain Euclidean
//! distance in RGB space. There is no distance cutoff: even a color far from
//! all swatches lands on the closest one.

use crate::color::{ColorError, Rgb};
use crate::insight;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Temperature family of a swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Warmth {
    Warm,
    Cool,
    Neutral,
}

impl Warmth {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Warmth::Warm => "warm",
            Warmth::Cool => "cool",
            Warmth::Neutral => "neutral",
        }
    }

    /// Get the emoji for display
    pub fn emoji(&self) -> &'static str {
        match self {
            Warmth::Warm => "🔥",
            Warmth::Cool => "❄️",
            Warmth::Neutral => "⚖️",
        }
    }
}

impl fmt::Display for Warmth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One swatch of the mood palette
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub key: &'static str,
    pub hex: Rgb,
    pub mood: &'static str,
    /// Energy level, 1-10
    pub intensity: u8,
    pub warmth: Warmth,
}

impl PaletteEntry {
    /// Look up a swatch by its key
    pub fn by_key(key: &str) -> Option<&'static PaletteEntry> {
        PALETTE.iter().find(|entry| entry.key.eq_ignore_ascii_case(key))
    }

    /// Capitalized key for display
    pub fn display_name(&self) -> String {
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

pub const PALETTE_SIZE: usize = 10;

/// The palette in canonical order. Classification and frequency ties
/// resolve to whichever swatch comes first here.
pub static PALETTE: [PaletteEntry; PALETTE_SIZE] = [
    PaletteEntry {
        key: "red",
        hex: Rgb::new(0xFF, 0x3B, 0x30),
        mood: "energy",
        intensity: 9,
        warmth: Warmth::Warm,
    },
    PaletteEntry {
        key: "blue",
        hex: Rgb::new(0x00, 0x7A, 0xFF),
        mood: "calmness",
        intensity: 4,
        warmth: Warmth::Cool,
    },
    PaletteEntry {
        key: "yellow",
        hex: Rgb::new(0xFF, 0xCC, 0x00),
        mood: "happiness",
        intensity: 8,
        warmth: Warmth::Warm,
    },
    PaletteEntry {
        key: "green",
        hex: Rgb::new(0x34, 0xC7, 0x59),
        mood: "balance",
        intensity: 5,
        warmth: Warmth::Neutral,
    },
    PaletteEntry {
        key: "purple",
        hex: Rgb::new(0xAF, 0x52, 0xDE),
        mood: "creativity",
        intensity: 7,
        warmth: Warmth::Cool,
    },
    PaletteEntry {
        key: "orange",
        hex: Rgb::new(0xFF, 0x95, 0x00),
        mood: "enthusiasm",
        intensity: 8,
        warmth: Warmth::Warm,
    },
    PaletteEntry {
        key: "pink",
        hex: Rgb::new(0xFF, 0x2D, 0x92),
        mood: "love",
        intensity: 6,
        warmth: Warmth::Warm,
    },
    PaletteEntry {
        key: "black",
        hex: Rgb::new(0x00, 0x00, 0x00),
        mood: "power",
        intensity: 3,
        warmth: Warmth::Neutral,
    },
    PaletteEntry {
        key: "white",
        hex: Rgb::new(0xFF, 0xFF, 0xFF),
        mood: "purity",
        intensity: 2,
        warmth: Warmth::Neutral,
    },
    PaletteEntry {
        key: "gray",
        hex: Rgb::new(0x8E, 0x8E, 0x93),
        mood: "neutral",
        intensity: 3,
        warmth: Warmth::Neutral,
    },
];

/// Index into [`PALETTE`] of the swatch nearest to `color`
pub(crate) fn classify_index(color: Rgb) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;

    for (index, entry) in PALETTE.iter().enumerate() {
        let distance = color.distance_squared(entry.hex);
        // Strict comparison keeps the earliest swatch on ties
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }

    best
}

/// Nearest palette swatch to `color`
pub fn classify(color: Rgb) -> &'static PaletteEntry {
    let entry = &PALETTE[classify_index(color)];
    debug!(color = %color, swatch = entry.key, "classified color");
    entry
}

/// Parse a hex string and classify it. Malformed input is an error,
/// never a silent fallback swatch.
pub fn classify_hex(hex: &str) -> Result<&'static PaletteEntry, ColorError> {
    Ok(classify(hex.parse()?))
}

/// Templated text for a single swatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub analysis_text: String,
    pub suggestions: Vec<String>,
}

/// Describe a swatch: energy/warmth sentence plus rebalancing nudges
pub fn describe(entry: &PaletteEntry) -> Description {
    let analysis_text = format!(
        "This {}-themed color shows a {} energy level and evokes a {} feeling.",
        entry.mood,
        insight::intensity_text(entry.intensity),
        insight::warmth_text(entry.warmth)
    );

    let mut suggestions = Vec::new();
    match entry.warmth {
        Warmth::Warm if entry.intensity > 7 => suggestions
            .push("You are choosing very warm colors. Try a cool color for balance.".to_string()),
        Warmth::Cool if entry.intensity < 4 => suggestions.push(
            "You are choosing low-energy colors. A more vibrant color might boost your mood."
                .to_string(),
        ),
        _ => {}
    }
    suggestions.push(format!(
        "If you want to try a different emotion from the {} theme, you can prefer {} colors.",
        entry.mood,
        insight::opposite_suggestion(entry.warmth)
    ));

    Description {
        analysis_text,
        suggestions,
    }
}

/// Full analysis of one picked color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorAnalysis {
    pub color: Rgb,
    pub entry: &'static PaletteEntry,
    #[serde(flatten)]
    pub description: Description,
}

pub fn analyze(color: Rgb) -> ColorAnalysis {
    let entry = classify(color);
    ColorAnalysis {
        color,
        entry,
        description: describe(entry),
    }
}
