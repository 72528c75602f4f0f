//! Color mood diary engine.
//!
//! One color is picked per day. Each pick is classified against a fixed
//! ten-color palette that carries a mood, an intensity (1-10) and a warmth.
//! From the history the crate derives recency-weighted color mixtures,
//! trend and consistency of intensity, palette frequencies, weekly and
//! monthly aggregates, and rule-based insight text.
//!
//! All analysis functions are pure and take the reference date explicitly.
//! Persistence lives behind [`store::EntryStore`]; [`refresh`] keeps the
//! stored aggregates up to date in the background.

pub mod color;
pub mod entry;
pub mod error;
pub mod frequency;
pub mod insight;
pub mod mixture;
pub mod mood;
pub mod refresh;
pub mod stats;
pub mod store;
pub mod trend;
pub mod wheel;

pub use color::{ColorError, Rgb};
pub use entry::{parse_date, ColorEntry};
pub use error::{Error, Result};
pub use frequency::{frequency, ColorFrequency};
pub use mixture::{mix, MixtureResult};
pub use mood::{classify, classify_hex, PaletteEntry, Warmth, PALETTE};
pub use refresh::StatsRefresher;
pub use stats::Period;
pub use store::{AggregateStore, EntryStore, JsonEntryStore, MemoryStore};
pub use trend::{analyze_trend, TrendDirection, TrendResult};
pub use wheel::Wheel;
