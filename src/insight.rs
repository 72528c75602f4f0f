//! Rule tables that turn intensity/warmth/consistency numbers into short
//! natural-language text. Everything here is a fixed mapping.

use crate::mood::Warmth;

/// Qualitative bucket for a 1-10 intensity
pub fn intensity_text(intensity: u8) -> &'static str {
    match intensity {
        8.. => "very high",
        6..=7 => "high",
        4..=5 => "moderate",
        _ => "low",
    }
}

pub fn warmth_text(warmth: Warmth) -> &'static str {
    match warmth {
        Warmth::Warm => "warm and energetic",
        Warmth::Cool => "cool and calm",
        Warmth::Neutral => "balanced",
    }
}

/// The color family on the other side of `warmth`
pub fn opposite_suggestion(warmth: Warmth) -> &'static str {
    match warmth {
        Warmth::Warm => "cool colors like blue, purple",
        Warmth::Cool => "warm colors like red, yellow",
        Warmth::Neutral => "vibrant",
    }
}

/// Energy tier of a mixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyTier {
    High,
    Balanced,
    Calm,
}

impl EnergyTier {
    pub fn from_intensity(intensity: u8) -> Self {
        match intensity {
            7.. => EnergyTier::High,
            5..=6 => EnergyTier::Balanced,
            _ => EnergyTier::Calm,
        }
    }
}

/// Two-sentence reading of a mixture: energy tier, then warmth framing
pub fn interpretation(intensity: u8, warmth: Warmth) -> String {
    let energy = match EnergyTier::from_intensity(intensity) {
        EnergyTier::High => "You are in a high-energy period.",
        EnergyTier::Balanced => "You appear to be in a balanced mood period.",
        EnergyTier::Calm => "You may be in a calm and peaceful period.",
    };
    let framing = match warmth {
        Warmth::Warm => "Warm colors show that you feel social and outgoing.",
        Warmth::Cool => "Cool colors indicate an introspective and thoughtful period.",
        Warmth::Neutral => "Neutral colors reflect a balanced and steady approach.",
    };
    format!("{energy} {framing}")
}

/// Activity nudges for a mixture. May be empty for mid-range neutral mixes.
pub fn recommendations(intensity: u8, warmth: Warmth) -> Vec<String> {
    let mut out = Vec::new();

    if intensity > 7 {
        out.push("Try calm activities to balance your high energy level.".to_string());
    } else if intensity < 4 {
        out.push("You can do active hobbies or sports to increase your energy level.".to_string());
    }

    match warmth {
        Warmth::Warm => out.push("Focusing on social activities might be good for you.".to_string()),
        Warmth::Cool => {
            out.push("Introspective activities and meditation can be beneficial.".to_string())
        }
        Warmth::Neutral => {}
    }

    out
}

/// Observations over an analysis window.
///
/// `consistency` is the weekly trend consistency when a trend exists,
/// `distinct_colors` the number of swatches used, `average_mood` the mean
/// stored mood score.
pub fn personal_insights(
    consistency: Option<f64>,
    distinct_colors: usize,
    average_mood: f64,
) -> Vec<String> {
    let mut insights = Vec::new();

    match consistency {
        Some(c) if c > 0.8 => insights.push(
            "Your mood is quite consistent. This is a sign of emotional stability!".to_string(),
        ),
        Some(c) if c < 0.4 => insights.push(
            "There is variety in your mood. This may be the natural rhythm of life.".to_string(),
        ),
        _ => {}
    }

    if distinct_colors >= 7 {
        insights.push(
            "Your color choices are very diverse. You have a creative and flexible approach."
                .to_string(),
        );
    } else if distinct_colors <= 3 {
        insights.push(
            "You prefer certain colors. This is a sign of a consistent personality.".to_string(),
        );
    }

    if average_mood >= 7.0 {
        insights.push(
            "You generally choose high-energy colors. You are in a positive period!".to_string(),
        );
    } else if average_mood <= 4.0 {
        insights.push(
            "You prefer calmer colors. You may be going through a peaceful period.".to_string(),
        );
    }

    insights
}

pub fn mood_emoji(intensity: u8) -> &'static str {
    match intensity {
        8.. => "🔥",
        6..=7 => "😊",
        4..=5 => "😌",
        _ => "😴",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_buckets() {
        assert_eq!(intensity_text(1), "low");
        assert_eq!(intensity_text(3), "low");
        assert_eq!(intensity_text(4), "moderate");
        assert_eq!(intensity_text(5), "moderate");
        assert_eq!(intensity_text(6), "high");
        assert_eq!(intensity_text(7), "high");
        assert_eq!(intensity_text(8), "very high");
        assert_eq!(intensity_text(10), "very high");
    }

    #[test]
    fn test_interpretation_tiers() {
        assert_eq!(
            interpretation(7, Warmth::Warm),
            "You are in a high-energy period. Warm colors show that you feel social and outgoing."
        );
        assert!(interpretation(5, Warmth::Cool).starts_with("You appear to be in a balanced"));
        assert!(interpretation(4, Warmth::Neutral).starts_with("You may be in a calm"));
        assert!(interpretation(4, Warmth::Neutral).ends_with("balanced and steady approach."));
    }

    #[test]
    fn test_recommendations() {
        assert_eq!(recommendations(5, Warmth::Neutral), Vec::<String>::new());

        let high_warm = recommendations(8, Warmth::Warm);
        assert_eq!(high_warm.len(), 2);
        assert!(high_warm[0].contains("calm activities"));
        assert!(high_warm[1].contains("social activities"));

        // 7 is high-energy for interpretation but not above the nudge cutoff
        assert_eq!(recommendations(7, Warmth::Cool).len(), 1);

        let low = recommendations(3, Warmth::Neutral);
        assert_eq!(low.len(), 1);
        assert!(low[0].contains("active hobbies"));
    }

    #[test]
    fn test_personal_insights() {
        let insights = personal_insights(Some(0.9), 2, 8.0);
        assert_eq!(insights.len(), 3);
        assert!(insights[0].contains("emotional stability"));
        assert!(insights[1].contains("consistent personality"));
        assert!(insights[2].contains("positive period"));

        assert!(personal_insights(Some(0.6), 5, 5.5).is_empty());
        assert!(personal_insights(None, 5, 5.5).is_empty());

        let varied = personal_insights(Some(0.2), 8, 3.0);
        assert!(varied[0].contains("natural rhythm"));
        assert!(varied[1].contains("very diverse"));
        assert!(varied[2].contains("peaceful period"));
    }

    #[test]
    fn test_mood_emoji() {
        assert_eq!(mood_emoji(9), "🔥");
        assert_eq!(mood_emoji(6), "😊");
        assert_eq!(mood_emoji(4), "😌");
        assert_eq!(mood_emoji(2), "😴");
    }
}
