use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use scrobble_model::PlayRecord;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ExportFile {
    username: String,
    scrobbles: Vec<ExportScrobble>,
}

#[derive(Debug, Deserialize)]
struct ExportScrobble {
    artist: String,
    #[serde(default)]
    album: Option<String>,
    track: String,
    /// Milliseconds since the Unix epoch.
    date: i64,
}

/// A user's scrobbles, oldest first.
#[derive(Debug, Clone)]
pub struct Export {
    pub username: String,
    pub scrobbles: Vec<PlayRecord>,
}

/// Read a JSON export from disk.
pub fn load_export(path: &Path) -> Result<Export> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_export(&raw, &Local).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse a JSON export, placing every event in `tz`. Events whose time
/// cannot be represented are skipped.
pub fn parse_export<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<Export> {
    let file: ExportFile = serde_json::from_str(raw)?;
    let total = file.scrobbles.len();

    let mut scrobbles: Vec<PlayRecord> = file
        .scrobbles
        .into_iter()
        .filter_map(|s| {
            let Some(date) = tz.timestamp_millis_opt(s.date).single() else {
                tracing::warn!(
                    "skipping scrobble of {} - {} with invalid date {}",
                    s.artist,
                    s.track,
                    s.date
                );
                return None;
            };
            Some(PlayRecord {
                artist: s.artist,
                album: s.album.unwrap_or_default(),
                track: s.track,
                date: date.fixed_offset(),
            })
        })
        .collect();
    scrobbles.sort_by_key(|record| record.date);

    tracing::info!(
        "loaded {} of {} scrobbles for {}",
        scrobbles.len(),
        total,
        file.username
    );

    Ok(Export {
        username: file.username,
        scrobbles,
    })
}
