use anyhow::{Context, Result};

pub const DEFAULT_LIST_SIZE: usize = 10;

/// Externally supplied list settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Top-N cutoff for every ranked list.
    pub list_size: usize,
    /// Entities with fewer plays are left out of gap and ongoing lists.
    /// 0 disables the filter.
    pub min_scrobbles: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            list_size: DEFAULT_LIST_SIZE,
            min_scrobbles: 0,
        }
    }
}

impl Settings {
    /// Read `LIST_SIZE` and `MIN_SCROBBLES` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("LIST_SIZE").ok().as_deref(),
            std::env::var("MIN_SCROBBLES").ok().as_deref(),
        )
    }

    fn from_vars(list_size: Option<&str>, min_scrobbles: Option<&str>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(raw) = list_size.map(str::trim).filter(|s| !s.is_empty()) {
            let size: i64 = raw
                .parse()
                .with_context(|| format!("LIST_SIZE must be an integer, got {raw:?}"))?;
            settings.list_size = usize::try_from(size.max(0)).unwrap_or(usize::MAX);
        }

        if let Some(raw) = min_scrobbles.map(str::trim).filter(|s| !s.is_empty()) {
            settings.min_scrobbles = raw.parse().with_context(|| {
                format!("MIN_SCROBBLES must be a non-negative integer, got {raw:?}")
            })?;
        }

        Ok(settings)
    }

    pub(crate) fn threshold(&self) -> usize {
        self.min_scrobbles as usize
    }
}
