use scrobble_model::{Streak, Timestamp, Top10Item};
use std::collections::HashMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How to score and format the values of a keyed map.
pub struct Top10Format<'a, T> {
    pub score: &'a dyn Fn(&T) -> f64,
    pub name: &'a dyn Fn(&T, f64) -> String,
    pub description: &'a dyn Fn(&T, f64) -> String,
    pub url: Option<&'a dyn Fn(&T) -> String>,
    pub date: Option<&'a dyn Fn(&T) -> Timestamp>,
}

/// Rank the values of `count_map` by descending score and keep the first
/// `list_size`. Equal scores are ordered by ascending key.
pub fn get_top10<T>(
    count_map: &HashMap<String, T>,
    list_size: usize,
    format: &Top10Format<'_, T>,
) -> Vec<Top10Item> {
    if list_size == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(&String, &T, f64)> = count_map
        .iter()
        .map(|(key, item)| (key, item, (format.score)(item)))
        .collect();
    scored.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(b.0)));
    scored.truncate(list_size);

    scored
        .into_iter()
        .map(|(_, item, amount)| Top10Item {
            name: (format.name)(item, amount),
            amount,
            description: Some((format.description)(item, amount)),
            url: format.url.map(|url| url(item)),
            date: format.date.map(|date| date(item)),
        })
        .collect()
}

/// Rank streaks by descending length and keep the first `list_size`.
/// Streaks of equal length keep their input order.
pub fn get_streak_top10<'s>(
    streaks: impl IntoIterator<Item = &'s Streak>,
    list_size: usize,
    name: &dyn Fn(&Streak) -> String,
    url: Option<&dyn Fn(&Streak) -> String>,
) -> Vec<Top10Item> {
    if list_size == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<&Streak> = streaks.into_iter().collect();
    ranked.sort_by(|a, b| b.length().cmp(&a.length()));
    ranked.truncate(list_size);

    ranked
        .into_iter()
        .map(|streak| Top10Item {
            name: name(streak),
            amount: f64::from(streak.length()),
            description: Some(describe(streak)),
            url: url.map(|url| url(streak)),
            date: Some(streak.midpoint()),
        })
        .collect()
}

/// `"<start> - <end>"`, with `?` as the end of an ongoing streak.
pub fn describe(streak: &Streak) -> String {
    let start = streak.start().date.format(DATE_FORMAT);
    if streak.is_ongoing() {
        format!("{start} - ?")
    } else {
        format!("{start} - {}", streak.end().date.format(DATE_FORMAT))
    }
}
