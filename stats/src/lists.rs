use scrobble_model::{Dimension, Streak, Top10Item};
use serde::Serialize;

use crate::config::Settings;
use crate::gaps::calculate_gaps;
use crate::ranking::{get_streak_top10, get_top10, Top10Format};
use crate::running::RunningStats;
use crate::streaks::StreakItem;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Links into a user's last.fm library.
#[derive(Debug, Clone)]
pub struct LastFmUrls {
    pub username: String,
}

impl LastFmUrls {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn root(&self) -> String {
        format!("https://www.last.fm/user/{}/library", escape(&self.username))
    }

    pub fn artist(&self, artist: &str) -> String {
        format!("{}/music/{}", self.root(), escape(artist))
    }

    pub fn album(&self, artist: &str, album: &str) -> String {
        format!("{}/{}", self.artist(artist), escape(album))
    }

    pub fn track(&self, artist: &str, track: &str) -> String {
        format!("{}/_/{}", self.artist(artist), escape(track))
    }

    /// Library page of the entity a streak belongs to.
    pub fn streak(&self, dimension: Dimension, streak: &Streak) -> String {
        let start = streak.start();
        match dimension {
            Dimension::ArtistOnly => self.artist(&start.artist),
            Dimension::ArtistAlbum => self.album(&start.artist, &start.album),
            Dimension::ArtistTrack => self.track(&start.artist, &start.track),
        }
    }

    /// One month of the library for a `"<Mon> <year>"` label such as
    /// `"Mar 2021"`. Unknown labels fall back to the library root.
    pub fn month(&self, month: &str) -> String {
        let mut parts = month.split(' ');
        let (Some(name), Some(year)) = (parts.next(), parts.next()) else {
            return self.root();
        };
        match MONTHS.iter().position(|m| *m == name) {
            Some(index) => format!(
                "{}?from={}-{}-01&rangetype=1month",
                self.root(),
                year,
                index + 1
            ),
            None => self.root(),
        }
    }
}

/// Path segment encoding in the style last.fm uses: spaces become `+`.
fn escape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b' ' => out.push('+'),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Every ranked list for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionLists {
    pub by_scrobbles: Vec<Top10Item>,
    pub streaks: Vec<Top10Item>,
    pub gaps: Vec<Top10Item>,
    pub ongoing: Vec<Top10Item>,
}

pub fn dimension_lists(
    stats: &RunningStats,
    dimension: Dimension,
    settings: &Settings,
    urls: &LastFmUrls,
) -> DimensionLists {
    let dim = stats.dimension(dimension);
    let streak_url = |s: &Streak| urls.streak(dimension, s);

    let score = |item: &StreakItem| item.scrobble_count() as f64;
    let name = |item: &StreakItem, _: f64| item.name.clone();
    let description = |item: &StreakItem, amount: f64| {
        format!("{amount} scrobbles, {} streaks", item.streaks().count())
    };
    let url = |item: &StreakItem| urls.streak(dimension, &item.between_streak);
    let date = |item: &StreakItem| item.between_streak.end().date;
    let by_scrobbles = get_top10(
        &dim.seen,
        settings.list_size,
        &Top10Format {
            score: &score,
            name: &name,
            description: &description,
            url: Some(&url),
            date: Some(&date),
        },
    );

    let streaks = get_streak_top10(
        stats.all_streaks(dimension),
        settings.list_size,
        &|s| format!("{} ({} days)", dimension.boundary_name(s.start()), s.length()),
        Some(&streak_url),
    );

    let gaps = calculate_gaps(stats, dimension, settings, &streak_url);

    DimensionLists {
        by_scrobbles,
        streaks,
        gaps: gaps.gaps,
        ongoing: gaps.ongoing,
    }
}
