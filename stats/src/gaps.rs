use chrono::Local;
use scrobble_model::{Dimension, Streak, StreakStack, Timestamp, Top10Item};
use std::collections::{HashMap, HashSet};

use crate::config::Settings;
use crate::ranking::get_streak_top10;
use crate::running::RunningStats;
use crate::streaks::StreakItem;

/// Ranked gap and ongoing lists for one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct GapLists {
    pub gaps: Vec<Top10Item>,
    pub ongoing: Vec<Top10Item>,
}

/// Gap and ongoing lists for `dimension`, measured against the latest
/// absorbed event (or the current time when nothing was absorbed yet).
pub fn calculate_gaps(
    stats: &RunningStats,
    dimension: Dimension,
    settings: &Settings,
    url: &dyn Fn(&Streak) -> String,
) -> GapLists {
    let end_date = stats
        .last_date()
        .unwrap_or_else(|| Local::now().fixed_offset());
    let dim = stats.dimension(dimension);
    calculate_gaps_at(end_date, &dim.seen, &dim.gaps, dimension, settings, url)
}

/// Same as [`calculate_gaps`] with an explicit end date for ongoing streaks.
pub fn calculate_gaps_at(
    end_date: Timestamp,
    seen: &HashMap<String, StreakItem>,
    between: &StreakStack,
    dimension: Dimension,
    settings: &Settings,
    url: &dyn Fn(&Streak) -> String,
) -> GapLists {
    let threshold = settings.threshold();

    let mut qualifying: Vec<&StreakItem> = seen
        .values()
        .filter(|item| item.scrobble_count() >= threshold)
        .collect();
    qualifying.sort_by(|a, b| a.key.cmp(&b.key));

    let qualifying_keys: HashSet<&str> =
        qualifying.iter().map(|item| item.key.as_str()).collect();
    let gap_streaks = between.iter().filter(|s| {
        threshold == 0 || qualifying_keys.contains(dimension.boundary_key(s.start()).as_str())
    });

    let gaps = get_streak_top10(
        gap_streaks,
        settings.list_size,
        &|s| format!("{} ({} days)", dimension.boundary_name(s.start()), s.length() - 1),
        Some(url),
    );

    let ongoing_streaks: Vec<Streak> = qualifying
        .iter()
        .map(|item| {
            let start = item.between_streak.start().clone();
            let end = dimension.boundary_from(&start, end_date);
            Streak::ongoing(start, end)
        })
        .collect();

    let ongoing = get_streak_top10(
        &ongoing_streaks,
        settings.list_size,
        &|s| format!("{} ({} days)", dimension.boundary_name(s.start()), s.length()),
        Some(url),
    );

    tracing::debug!(
        "{} {}: {} of {} entities qualify, {} gaps, {} ongoing",
        dimension.label(),
        end_date.format("%Y-%m-%d"),
        qualifying.len(),
        seen.len(),
        gaps.len(),
        ongoing.len()
    );

    GapLists { gaps, ongoing }
}
