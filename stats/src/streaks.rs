use scrobble_model::{day_index, Dimension, PlayRecord, Streak, StreakBoundary};

/// Result of feeding one play into an entity's open streak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Absorbed {
    /// Streak that was broken by this play.
    pub closed: Option<Streak>,
    /// Interval from the end of the closed streak to this play.
    pub gap: Option<Streak>,
    /// Open candidate after this play.
    pub open: Streak,
}

/// Advance an entity's open streak by one play.
///
/// A play on the day after the candidate's end extends it, a play on the
/// same day only moves the end boundary forward in time, and a play more
/// than one day later closes the candidate and opens a new one. Plays dated
/// before the candidate's end leave it unchanged.
pub fn absorb(open: Option<&Streak>, boundary: StreakBoundary) -> Absorbed {
    let Some(current) = open else {
        return Absorbed {
            closed: None,
            gap: None,
            open: Streak::single(boundary),
        };
    };

    let diff = day_index(&boundary.date) - day_index(&current.end().date);
    if diff > 1 {
        let gap = Streak::new(current.end().clone(), boundary.clone());
        return Absorbed {
            closed: Some(current.clone()),
            gap: Some(gap),
            open: Streak::single(boundary),
        };
    }

    let mut next = current.clone();
    if boundary.date > current.end().date {
        next.set_end(boundary);
    }
    Absorbed {
        closed: None,
        gap: None,
        open: next,
    }
}

/// Everything accumulated for one tracked entity.
#[derive(Debug, Clone)]
pub struct StreakItem {
    pub name: String,
    pub key: String,
    pub dimension: Dimension,
    pub scrobbles: Vec<PlayRecord>,
    /// The currently open candidate streak.
    pub between_streak: Streak,
    pub closed: Vec<Streak>,
    pub gaps: Vec<Streak>,
}

impl StreakItem {
    pub fn new(dimension: Dimension, first: PlayRecord) -> Self {
        let boundary = dimension.boundary(&first);
        Self {
            name: dimension.name(&first.artist, &first.album, &first.track),
            key: dimension.record_key(&first),
            dimension,
            between_streak: Streak::single(boundary),
            scrobbles: vec![first],
            closed: Vec::new(),
            gaps: Vec::new(),
        }
    }

    /// Record one more play. Returns the streak and gap closed by it, if any.
    pub fn record(&mut self, play: PlayRecord) -> Option<(Streak, Streak)> {
        let boundary = self.dimension.boundary(&play);
        self.scrobbles.push(play);

        let absorbed = absorb(Some(&self.between_streak), boundary);
        self.between_streak = absorbed.open;
        match (absorbed.closed, absorbed.gap) {
            (Some(closed), Some(gap)) => {
                tracing::debug!(
                    "closed {} day streak for {}, {} days until the next play",
                    closed.length(),
                    self.name,
                    gap.length() - 1
                );
                self.closed.push(closed.clone());
                self.gaps.push(gap.clone());
                Some((closed, gap))
            }
            _ => None,
        }
    }

    pub fn scrobble_count(&self) -> usize {
        self.scrobbles.len()
    }

    /// Closed streaks followed by the open candidate.
    pub fn streaks(&self) -> impl Iterator<Item = &Streak> {
        self.closed.iter().chain(std::iter::once(&self.between_streak))
    }
}

/// Length of the longest run of consecutive days in `days`, which need not
/// be sorted or distinct.
pub fn longest_streak(days: &[i64]) -> u32 {
    let mut days = days.to_vec();
    days.sort_unstable();
    days.dedup();

    let mut longest = 0;
    let mut current = 0;

    for i in 0..days.len() {
        if i > 0 && days[i] - days[i - 1] == 1 {
            current += 1;
        } else {
            longest = longest.max(current);
            current = 1;
        }
    }

    longest.max(current)
}
