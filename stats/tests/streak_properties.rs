use chrono::{Duration, FixedOffset, TimeZone};
use proptest::prelude::*;
use scrobble_stats::{
    calculate_gaps_at, day_index, day_span, get_streak_top10, get_top10, Dimension, PlayRecord,
    RunningStats, Settings, Streak, StreakItem, Timestamp, Top10Format,
};
use std::collections::{BTreeSet, HashMap};

fn at(day: i64, minute: i64) -> Timestamp {
    let base = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .unwrap();
    base + Duration::days(day) + Duration::minutes(minute)
}

fn plays(days: &[(i64, i64)]) -> Vec<PlayRecord> {
    let mut plays: Vec<PlayRecord> = days
        .iter()
        .map(|&(day, minute)| PlayRecord::new("Artist", "Album", "Track", at(day, minute)))
        .collect();
    plays.sort_by_key(|p| p.date);
    plays
}

fn item(plays: Vec<PlayRecord>) -> StreakItem {
    let mut plays = plays.into_iter();
    let mut item = StreakItem::new(Dimension::ArtistOnly, plays.next().unwrap());
    for play in plays {
        item.record(play);
    }
    item
}

fn days_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..60, 0i64..1440), 1..80)
}

proptest! {
    #[test]
    fn streaks_cover_exactly_the_played_days(days in days_strategy()) {
        let played: BTreeSet<i64> = plays(&days).iter().map(|p| day_index(&p.date)).collect();
        let item = item(plays(&days));

        let mut covered = BTreeSet::new();
        let mut previous_end: Option<i64> = None;
        for streak in item.streaks() {
            let start = day_index(&streak.start().date);
            let end = day_index(&streak.end().date);
            prop_assert!(start <= end);
            prop_assert_eq!(streak.length(), day_span(&streak.start().date, &streak.end().date));
            prop_assert_eq!(i64::from(streak.length()), end - start + 1);
            if let Some(previous) = previous_end {
                prop_assert!(start - previous > 1);
            }
            previous_end = Some(end);
            covered.extend(start..=end);
        }
        prop_assert_eq!(covered, played);
        prop_assert_eq!(item.gaps.len(), item.closed.len());
    }

    #[test]
    fn streak_ranking_is_sorted_and_bounded(days in days_strategy(), list_size in 0usize..15) {
        let item = item(plays(&days));
        let streaks: Vec<&Streak> = item.streaks().collect();
        let top = get_streak_top10(streaks.iter().copied(), list_size, &|_| String::new(), None);

        prop_assert_eq!(top.len(), list_size.min(streaks.len()));
        prop_assert!(top.windows(2).all(|w| w[0].amount >= w[1].amount));
    }

    #[test]
    fn keyed_ranking_is_sorted_and_bounded(
        counts in prop::collection::hash_map("[a-z]{1,6}", 0u32..500, 0..40),
        list_size in 0usize..20,
    ) {
        let counts: HashMap<String, u32> = counts;
        let score = |v: &u32| f64::from(*v);
        let name = |v: &u32, _: f64| v.to_string();
        let description = |_: &u32, _: f64| String::new();
        let format = Top10Format {
            score: &score,
            name: &name,
            description: &description,
            url: None,
            date: None,
        };

        let top = get_top10(&counts, list_size, &format);
        prop_assert_eq!(top.len(), list_size.min(counts.len()));
        prop_assert!(top.windows(2).all(|w| w[0].amount >= w[1].amount));
        prop_assert_eq!(top.clone(), get_top10(&counts, list_size, &format));
    }

    #[test]
    fn gap_lists_are_deterministic(
        events in prop::collection::vec((0usize..4, 0i64..30, 0i64..1440), 1..60),
        min_scrobbles in 0u32..6,
    ) {
        let artists = ["A", "B", "C", "D"];
        let mut records: Vec<PlayRecord> = events
            .iter()
            .map(|&(artist, day, minute)| {
                PlayRecord::new(artists[artist], "Album", "Track", at(day, minute))
            })
            .collect();
        records.sort_by_key(|r| r.date);

        let mut stats = RunningStats::new();
        for record in records {
            stats.absorb(record);
        }
        let settings = Settings { list_size: 10, min_scrobbles };
        let dim = stats.dimension(Dimension::ArtistOnly);
        let end = stats.last_date().unwrap();
        let url = |s: &Streak| s.start().artist.clone();

        let dimension = Dimension::ArtistOnly;
        let first = calculate_gaps_at(end, &dim.seen, &dim.gaps, dimension, &settings, &url);
        let second = calculate_gaps_at(end, &dim.seen, &dim.gaps, dimension, &settings, &url);
        prop_assert_eq!(&first, &second);

        let qualifying = dim
            .seen
            .values()
            .filter(|item| item.scrobble_count() >= min_scrobbles as usize)
            .count();
        prop_assert_eq!(first.ongoing.len(), qualifying.min(10));
        for item in &first.ongoing {
            prop_assert!(item.description.as_deref().unwrap().ends_with(" - ?"));
        }
    }
}

#[test]
fn documented_example_days() {
    let item = item(plays(&[(1, 0), (2, 0), (3, 0), (7, 0), (8, 0)]));
    let lengths: Vec<u32> = item.streaks().map(Streak::length).collect();
    assert_eq!(lengths, vec![3, 2]);
    assert_eq!(item.closed.len(), 1);
}

#[test]
fn repeated_same_day_plays() {
    let item = item(plays(&[(5, 10), (5, 300), (5, 900), (6, 10)]));
    assert!(item.closed.is_empty());
    assert_eq!(item.between_streak.length(), 2);
}

#[test]
fn ongoing_streak_ends_at_last_event() {
    let mut stats = RunningStats::new();
    for record in plays(&[(1, 0), (2, 0)]) {
        stats.absorb(record);
    }
    stats.absorb(PlayRecord::new("Other", "Album", "Track", at(9, 0)));

    let dim = stats.dimension(Dimension::ArtistOnly);
    let end = stats.last_date().unwrap();
    let lists = calculate_gaps_at(
        end,
        &dim.seen,
        &dim.gaps,
        Dimension::ArtistOnly,
        &Settings::default(),
        &|_| String::new(),
    );

    assert_eq!(lists.ongoing[0].name, "Artist (9 days)");
    assert_eq!(lists.ongoing[0].description.as_deref(), Some("2020-01-02 - ?"));
    assert!(lists.gaps.is_empty());
}
