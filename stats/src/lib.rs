pub mod config;
pub mod gaps;
pub mod import;
pub mod lists;
pub mod ranking;
pub mod running;
pub mod streaks;

pub use config::Settings;
pub use gaps::{calculate_gaps, calculate_gaps_at, GapLists};
pub use lists::{dimension_lists, DimensionLists, LastFmUrls};
pub use ranking::{get_streak_top10, get_top10, Top10Format};
pub use running::{RunningStats, StatsBuilder};
pub use streaks::{absorb, Absorbed, StreakItem};

pub use scrobble_model::{
    day_index, day_span, Dimension, PlayRecord, Streak, StreakBoundary, StreakStack, Timestamp,
    Top10Item,
};
