use scrobble_model::{day_index, Dimension, PlayRecord, Streak, StreakStack, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;

use crate::streaks::{longest_streak, StreakItem};

/// Per-dimension accumulation.
#[derive(Debug, Clone, Default)]
pub struct DimensionStats {
    pub seen: HashMap<String, StreakItem>,
    /// Closed streaks in the order they were closed.
    pub streaks: StreakStack,
    /// Gaps between consecutive streaks of the same entity.
    pub gaps: StreakStack,
}

impl DimensionStats {
    fn absorb(&mut self, dimension: Dimension, record: &PlayRecord) {
        let key = dimension.record_key(record);
        match self.seen.get_mut(&key) {
            Some(item) => {
                if let Some((closed, gap)) = item.record(record.clone()) {
                    self.streaks.push(closed);
                    self.gaps.push(gap);
                }
            }
            None => {
                self.seen.insert(key, StreakItem::new(dimension, record.clone()));
            }
        }
    }
}

/// Running statistics over every event absorbed so far.
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    pub first: Option<PlayRecord>,
    pub last: Option<PlayRecord>,
    pub scrobble_count: u64,
    pub artists: DimensionStats,
    pub albums: DimensionStats,
    pub tracks: DimensionStats,
    days: Vec<i64>,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event, which must not predate the previous one.
    pub fn absorb(&mut self, record: PlayRecord) {
        if self.first.is_none() {
            self.first = Some(record.clone());
        }
        self.scrobble_count += 1;

        let day = day_index(&record.date);
        if self.days.last() != Some(&day) {
            self.days.push(day);
        }

        for dimension in Dimension::ALL {
            self.dimension_mut(dimension).absorb(dimension, &record);
        }
        self.last = Some(record);
    }

    pub fn dimension(&self, dimension: Dimension) -> &DimensionStats {
        match dimension {
            Dimension::ArtistOnly => &self.artists,
            Dimension::ArtistAlbum => &self.albums,
            Dimension::ArtistTrack => &self.tracks,
        }
    }

    fn dimension_mut(&mut self, dimension: Dimension) -> &mut DimensionStats {
        match dimension {
            Dimension::ArtistOnly => &mut self.artists,
            Dimension::ArtistAlbum => &mut self.albums,
            Dimension::ArtistTrack => &mut self.tracks,
        }
    }

    pub fn last_date(&self) -> Option<Timestamp> {
        self.last.as_ref().map(|record| record.date)
    }

    /// Closed streaks followed by every entity's open candidate, ordered by
    /// entity key.
    pub fn all_streaks(&self, dimension: Dimension) -> Vec<&Streak> {
        let stats = self.dimension(dimension);
        let mut open: Vec<&StreakItem> = stats.seen.values().collect();
        open.sort_by(|a, b| a.key.cmp(&b.key));

        stats
            .streaks
            .iter()
            .chain(open.into_iter().map(|item| &item.between_streak))
            .collect()
    }

    /// Number of distinct days with at least one play.
    pub fn days_active(&self) -> usize {
        let mut days = self.days.clone();
        days.sort_unstable();
        days.dedup();
        days.len()
    }

    /// Longest run of consecutive days with any play at all.
    pub fn longest_listening_streak(&self) -> u32 {
        longest_streak(&self.days)
    }
}

/// Owns the running statistics and publishes a fresh snapshot per update.
/// A published snapshot is never mutated afterwards.
#[derive(Debug, Default)]
pub struct StatsBuilder {
    current: Arc<RunningStats>,
}

impl StatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<RunningStats> {
        Arc::clone(&self.current)
    }

    /// Absorb a batch of events and publish the result.
    pub fn absorb_all(
        &mut self,
        records: impl IntoIterator<Item = PlayRecord>,
    ) -> Arc<RunningStats> {
        let stats = Arc::make_mut(&mut self.current);
        let before = stats.scrobble_count;
        for record in records {
            stats.absorb(record);
        }
        tracing::debug!(
            "published stats with {} new scrobbles ({} total)",
            stats.scrobble_count - before,
            stats.scrobble_count
        );
        self.snapshot()
    }
}
