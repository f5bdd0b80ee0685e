use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub struct AppInfo {
    pub package_name: String,
    pub name: String,
    pub summary: String,
    pub categories: Vec<String>,
    pub repository: String,
    pub added: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub name_lower: Arc<str>,
}

pub(crate) fn lowercase_cache(value: &str) -> Arc<str> {
    if value.is_empty() {
        Arc::<str>::from("")
    } else {
        Arc::<str>::from(value.to_lowercase())
    }
}

impl AppInfo {
    pub(crate) fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.package_name
        } else {
            &self.name
        }
    }

    pub(crate) fn in_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    /// Updated after it was first added, i.e. not just a fresh listing.
    pub(crate) fn has_update(&self) -> bool {
        match (self.added, self.last_updated) {
            (Some(added), Some(updated)) => updated > added,
            _ => false,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_app(
    package_name: &str,
    name: &str,
    categories: &[&str],
    added: Option<DateTime<Utc>>,
    last_updated: Option<DateTime<Utc>>,
) -> AppInfo {
    AppInfo {
        package_name: package_name.to_string(),
        name: name.to_string(),
        summary: format!("{} summary", name),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        repository: "F-Droid".to_string(),
        added,
        last_updated,
        name_lower: lowercase_cache(name),
    }
}
