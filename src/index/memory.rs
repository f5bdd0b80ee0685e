use std::sync::Mutex;

use anyhow::{Result, bail};

use crate::index::store::select_apps;
use crate::index::{AppIndex, CategorySentinels, HistoryWindow, QueryTarget};
use crate::types::AppInfo;

/// In-process index for exercising callers without touching the disk.
pub(crate) struct MemoryIndex {
    sentinels: CategorySentinels,
    categories: Vec<String>,
    apps: Vec<AppInfo>,
    failure: Mutex<Option<String>>,
}

impl MemoryIndex {
    pub(crate) fn new(categories: &[&str], apps: Vec<AppInfo>) -> Self {
        Self {
            sentinels: CategorySentinels::default(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            apps,
            failure: Mutex::new(None),
        }
    }

    pub(crate) fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }
}

impl AppIndex for MemoryIndex {
    fn sentinels(&self) -> &CategorySentinels {
        &self.sentinels
    }

    fn categories(&self) -> Vec<String> {
        let mut categories = vec![
            self.sentinels.whats_new.clone(),
            self.sentinels.recently_updated.clone(),
            self.sentinels.all.clone(),
        ];
        categories.extend(self.categories.iter().cloned());
        categories
    }

    fn query(&self, target: &QueryTarget, window: &HistoryWindow) -> Result<Vec<AppInfo>> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            bail!(message);
        }
        Ok(select_apps(self.apps.clone(), target, window))
    }
}
