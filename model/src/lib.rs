use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};

/// Event time in the offset that was local when the event was ingested.
pub type Timestamp = DateTime<FixedOffset>;

/// Filler for boundary fields that do not take part in a dimension.
pub const PLACEHOLDER: &str = "?";

const KEY_SEPARATOR: char = '\u{1f}';

/// One recorded listening event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub artist: String,
    #[serde(default)]
    pub album: String,
    pub track: String,
    pub date: Timestamp,
}

impl PlayRecord {
    pub fn new(
        artist: impl Into<String>,
        album: impl Into<String>,
        track: impl Into<String>,
        date: Timestamp,
    ) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            track: track.into(),
            date,
        }
    }
}

/// Identity values and date at one end of a streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakBoundary {
    pub artist: String,
    pub album: String,
    pub track: String,
    pub date: Timestamp,
}

/// Identity granularity used to group plays into streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    ArtistOnly,
    ArtistAlbum,
    ArtistTrack,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::ArtistOnly,
        Dimension::ArtistAlbum,
        Dimension::ArtistTrack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ArtistOnly => "artists",
            Self::ArtistAlbum => "albums",
            Self::ArtistTrack => "tracks",
        }
    }

    /// The second identity field, if this dimension has one.
    fn detail<'a>(self, album: &'a str, track: &'a str) -> Option<&'a str> {
        match self {
            Self::ArtistOnly => None,
            Self::ArtistAlbum => Some(album),
            Self::ArtistTrack => Some(track),
        }
    }

    /// Grouping key. Fields are joined with U+001F so that no two distinct
    /// field combinations produce the same key.
    pub fn key(self, artist: &str, album: &str, track: &str) -> String {
        match self.detail(album, track) {
            Some(detail) => format!("{artist}{KEY_SEPARATOR}{detail}"),
            None => artist.to_string(),
        }
    }

    pub fn record_key(self, record: &PlayRecord) -> String {
        self.key(&record.artist, &record.album, &record.track)
    }

    pub fn boundary_key(self, boundary: &StreakBoundary) -> String {
        self.key(&boundary.artist, &boundary.album, &boundary.track)
    }

    /// Display label, e.g. `"Artist - Album"`.
    pub fn name(self, artist: &str, album: &str, track: &str) -> String {
        match self.detail(album, track) {
            Some(detail) => format!("{artist} - {detail}"),
            None => artist.to_string(),
        }
    }

    pub fn boundary_name(self, boundary: &StreakBoundary) -> String {
        self.name(&boundary.artist, &boundary.album, &boundary.track)
    }

    /// Snapshot of a play for this dimension. Fields outside the dimension
    /// carry [`PLACEHOLDER`].
    pub fn boundary(self, record: &PlayRecord) -> StreakBoundary {
        self.boundary_at(&record.artist, &record.album, &record.track, record.date)
    }

    /// Boundary at `date` carrying the identity of `from`.
    pub fn boundary_from(self, from: &StreakBoundary, date: Timestamp) -> StreakBoundary {
        self.boundary_at(&from.artist, &from.album, &from.track, date)
    }

    fn boundary_at(
        self,
        artist: &str,
        album: &str,
        track: &str,
        date: Timestamp,
    ) -> StreakBoundary {
        let keep = |field: &str, kept: bool| {
            if kept {
                field.to_string()
            } else {
                PLACEHOLDER.to_string()
            }
        };
        StreakBoundary {
            artist: artist.to_string(),
            album: keep(album, self == Self::ArtistAlbum),
            track: keep(track, self == Self::ArtistTrack),
            date,
        }
    }
}

/// Whole-day index of a timestamp in its own offset.
pub fn day_index(date: &Timestamp) -> i64 {
    i64::from(date.date_naive().num_days_from_ce())
}

/// Inclusive day span between two timestamps, never less than 1.
pub fn day_span(start: &Timestamp, end: &Timestamp) -> u32 {
    let span = day_index(end) - day_index(start) + 1;
    u32::try_from(span.max(1)).unwrap_or(u32::MAX)
}

/// A run of days between two boundaries. The length is derived from the
/// boundaries on every change, so it cannot go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak {
    start: StreakBoundary,
    end: StreakBoundary,
    length: u32,
    ongoing: bool,
}

impl Streak {
    pub fn new(start: StreakBoundary, end: StreakBoundary) -> Self {
        let length = day_span(&start.date, &end.date);
        Self {
            start,
            end,
            length,
            ongoing: false,
        }
    }

    /// Single-day streak starting and ending at `boundary`.
    pub fn single(boundary: StreakBoundary) -> Self {
        Self::new(boundary.clone(), boundary)
    }

    /// Tail streak that is still running as of `end`.
    pub fn ongoing(start: StreakBoundary, end: StreakBoundary) -> Self {
        let mut streak = Self::new(start, end);
        streak.ongoing = true;
        streak
    }

    pub fn start(&self) -> &StreakBoundary {
        &self.start
    }

    pub fn end(&self) -> &StreakBoundary {
        &self.end
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn is_ongoing(&self) -> bool {
        self.ongoing
    }

    pub fn set_end(&mut self, end: StreakBoundary) {
        self.end = end;
        StreakStack::calc_length(self);
    }

    /// Temporal midpoint between start and end.
    pub fn midpoint(&self) -> Timestamp {
        let start = self.start.date;
        start + self.end.date.signed_duration_since(start) / 2
    }
}

/// Closed streaks for one ranking dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakStack {
    streaks: Vec<Streak>,
}

impl StreakStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calc_length(streak: &mut Streak) {
        streak.length = day_span(&streak.start.date, &streak.end.date);
    }

    pub fn push(&mut self, streak: Streak) {
        debug_assert!(streak.start.date <= streak.end.date);
        self.streaks.push(streak);
    }

    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Streak> {
        self.streaks.iter()
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }
}

impl<'a> IntoIterator for &'a StreakStack {
    type Item = &'a Streak;
    type IntoIter = std::slice::Iter<'a, Streak>;

    fn into_iter(self) -> Self::IntoIter {
        self.streaks.iter()
    }
}

/// One display-ready row of a ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Top10Item {
    pub name: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
