use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::index::{AppIndex, CategorySentinels, HistoryWindow, QueryTarget};
use crate::types::{AppInfo, lowercase_cache};

const INDEX_FILE_EXTENSION: &str = "json";
const INDEX_MAX_DEPTH: usize = 3;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoIndexFile {
    #[serde(default)]
    repo: RepoHeader,
    #[serde(default)]
    apps: Vec<RepoAppEntry>,
}

#[derive(Default, Deserialize)]
struct RepoHeader {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoAppEntry {
    package_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    added: Option<i64>,
    #[serde(default)]
    last_updated: Option<i64>,
}

/// Repository index files kept on local disk, one JSON document per repo.
///
/// Files are re-read on every query so a refreshed index shows up on the
/// next category change. The category list is captured once, when the index
/// is opened.
pub(crate) struct LocalIndex {
    dir: PathBuf,
    sentinels: CategorySentinels,
    data_categories: Vec<String>,
}

impl LocalIndex {
    pub(crate) fn open(dir: impl Into<PathBuf>, sentinels: CategorySentinels) -> Self {
        let dir = dir.into();
        let data_categories = match load_apps(&dir) {
            Ok(apps) => collect_categories(&apps),
            Err(err) => {
                warn!("Failed to read index at {}: {:#}", dir.display(), err);
                Vec::new()
            }
        };
        debug!(
            dir = %dir.display(),
            categories = data_categories.len(),
            "opened local index"
        );

        Self {
            dir,
            sentinels,
            data_categories,
        }
    }
}

impl AppIndex for LocalIndex {
    fn sentinels(&self) -> &CategorySentinels {
        &self.sentinels
    }

    fn categories(&self) -> Vec<String> {
        let mut categories = Vec::with_capacity(self.data_categories.len() + 3);
        categories.push(self.sentinels.whats_new.clone());
        categories.push(self.sentinels.recently_updated.clone());
        categories.push(self.sentinels.all.clone());
        categories.extend(self.data_categories.iter().cloned());
        categories
    }

    fn query(&self, target: &QueryTarget, window: &HistoryWindow) -> Result<Vec<AppInfo>> {
        let apps = load_apps(&self.dir)?;
        Ok(select_apps(apps, target, window))
    }
}

pub(crate) fn select_apps(
    apps: Vec<AppInfo>,
    target: &QueryTarget,
    window: &HistoryWindow,
) -> Vec<AppInfo> {
    let mut selected: Vec<AppInfo> = match target {
        QueryTarget::All => apps,
        QueryTarget::RecentlyUpdated => apps
            .into_iter()
            .filter(|app| app.has_update() && window.contains(app.last_updated))
            .collect(),
        QueryTarget::NewlyAdded => apps
            .into_iter()
            .filter(|app| window.contains(app.added))
            .collect(),
        QueryTarget::Category(label) => apps
            .into_iter()
            .filter(|app| app.in_category(label))
            .collect(),
    };

    match target {
        QueryTarget::RecentlyUpdated => selected.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then_with(|| by_name(a, b))
        }),
        QueryTarget::NewlyAdded => {
            selected.sort_by(|a, b| b.added.cmp(&a.added).then_with(|| by_name(a, b)))
        }
        QueryTarget::All | QueryTarget::Category(_) => selected.sort_by(by_name),
    }

    selected
}

fn by_name(a: &AppInfo, b: &AppInfo) -> std::cmp::Ordering {
    a.name_lower
        .cmp(&b.name_lower)
        .then_with(|| a.package_name.cmp(&b.package_name))
}

fn collect_categories(apps: &[AppInfo]) -> Vec<String> {
    let mut categories: Vec<String> = apps
        .iter()
        .flat_map(|app| app.categories.iter())
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    categories.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    categories.dedup();
    categories
}

/// Reads every repository file under `dir`. A missing directory is an empty
/// index; a file that fails to parse is skipped.
pub(crate) fn load_apps(dir: &Path) -> Result<Vec<AppInfo>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut by_package: HashMap<String, AppInfo> = HashMap::new();
    for entry in WalkDir::new(dir).max_depth(INDEX_MAX_DEPTH).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(err).with_context(|| format!("failed to read {}", dir.display()));
            }
            Err(err) => {
                warn!("Skipping unreadable index entry: {}", err);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(INDEX_FILE_EXTENSION)
        {
            continue;
        }

        let apps = match load_repo_file(path) {
            Ok(apps) => apps,
            Err(err) => {
                warn!("Skipping index file {}: {:#}", path.display(), err);
                continue;
            }
        };

        for app in apps {
            let keep_existing = by_package
                .get(&app.package_name)
                .is_some_and(|existing| existing.last_updated >= app.last_updated);
            if !keep_existing {
                by_package.insert(app.package_name.clone(), app);
            }
        }
    }

    Ok(by_package.into_values().collect())
}

fn load_repo_file(path: &Path) -> Result<Vec<AppInfo>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: RepoIndexFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let repository = if file.repo.name.trim().is_empty() {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        file.repo.name.trim().to_string()
    };

    let apps = file
        .apps
        .into_iter()
        .filter(|entry| !entry.package_name.trim().is_empty())
        .map(|entry| {
            let package_name = entry.package_name.trim().to_string();
            let name = entry
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| package_name.clone());
            // Same labels the chooser lists, so category queries match them.
            let categories = entry
                .categories
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
            AppInfo {
                name_lower: lowercase_cache(&name),
                package_name,
                name,
                summary: entry.summary.unwrap_or_default().trim().to_string(),
                categories,
                repository: repository.clone(),
                added: entry.added.and_then(DateTime::<Utc>::from_timestamp_millis),
                last_updated: entry
                    .last_updated
                    .and_then(DateTime::<Utc>::from_timestamp_millis),
            }
        })
        .collect();

    Ok(apps)
}

pub(crate) fn default_index_dir(configured: Option<&str>) -> Option<PathBuf> {
    if let Some(configured) = configured {
        let trimmed = configured.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Ok(custom) = env::var("DROIDSHELF_INDEX_DIR") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Ok(data_home) = env::var("XDG_DATA_HOME") {
        let trimmed = data_home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join("droidshelf").join("repos"));
        }
    }

    if let Ok(home) = env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(
                PathBuf::from(trimmed)
                    .join(".local")
                    .join("share")
                    .join("droidshelf")
                    .join("repos"),
            );
        }
    }

    None
}
