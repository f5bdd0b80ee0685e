#[cfg(test)]
mod memory;
mod store;
mod uri;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

use crate::types::AppInfo;

#[cfg(test)]
pub(crate) use memory::MemoryIndex;
pub(crate) use store::{LocalIndex, default_index_dir};
pub(crate) use uri::QueryTarget;

pub(crate) const DEFAULT_UPDATE_HISTORY_DAYS: u32 = 14;
pub(crate) const MAX_UPDATE_HISTORY_DAYS: u32 = 365;

/// Labels of the synthetic categories shown ahead of the data categories.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CategorySentinels {
    pub(crate) all: String,
    pub(crate) recently_updated: String,
    pub(crate) whats_new: String,
}

impl Default for CategorySentinels {
    fn default() -> Self {
        Self {
            all: "All".to_string(),
            recently_updated: "Recently Updated".to_string(),
            whats_new: "What's New".to_string(),
        }
    }
}

/// The span "recently updated" and "newly added" are measured against.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HistoryWindow {
    pub(crate) now: DateTime<Utc>,
    pub(crate) days: u32,
}

impl HistoryWindow {
    pub(crate) fn new(now: DateTime<Utc>, days: u32) -> Self {
        Self {
            now,
            days: clamp_history_days(days),
        }
    }

    pub(crate) fn since(&self) -> DateTime<Utc> {
        self.now - Duration::days(i64::from(self.days))
    }

    pub(crate) fn contains(&self, timestamp: Option<DateTime<Utc>>) -> bool {
        timestamp.is_some_and(|ts| ts >= self.since())
    }
}

pub(crate) fn clamp_history_days(days: u32) -> u32 {
    days.clamp(1, MAX_UPDATE_HISTORY_DAYS)
}

/// Read access to the application index.
pub(crate) trait AppIndex: Send + Sync {
    fn sentinels(&self) -> &CategorySentinels;

    /// Sentinels first, then every data category.
    fn categories(&self) -> Vec<String>;

    fn query(&self, target: &QueryTarget, window: &HistoryWindow) -> Result<Vec<AppInfo>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn history_window_clamps_days() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(HistoryWindow::new(now, 0).days, 1);
        assert_eq!(HistoryWindow::new(now, 9000).days, MAX_UPDATE_HISTORY_DAYS);
    }

    #[test]
    fn history_window_includes_its_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
        let window = HistoryWindow::new(now, 14);
        let edge = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert!(window.contains(Some(edge)));
        assert!(!window.contains(Some(edge - Duration::seconds(1))));
        assert!(!window.contains(None));
    }
}
