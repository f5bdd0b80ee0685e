use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::categories::icon_name_for_app;
use crate::helpers::format_relative_time;
use crate::index::HistoryWindow;
use crate::preferences::Preferences;
use crate::types::AppInfo;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RowBadge {
    New,
    Updated,
}

impl RowBadge {
    pub(crate) fn label(self) -> &'static str {
        match self {
            RowBadge::New => "New",
            RowBadge::Updated => "Updated",
        }
    }
}

/// What one list row shows.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AppRow {
    pub(crate) package_name: String,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) icon_name: &'static str,
    pub(crate) badge: Option<RowBadge>,
    pub(crate) updated_caption: Option<String>,
}

pub(crate) fn render_row(app: &AppInfo, window: &HistoryWindow) -> AppRow {
    let badge = if window.contains(app.added) {
        Some(RowBadge::New)
    } else if app.has_update() && window.contains(app.last_updated) {
        Some(RowBadge::Updated)
    } else {
        None
    };

    let subtitle = if app.summary.is_empty() {
        app.package_name.clone()
    } else {
        app.summary.clone()
    };

    AppRow {
        package_name: app.package_name.clone(),
        title: app.display_name().to_string(),
        subtitle,
        icon_name: icon_name_for_app(app),
        badge,
        updated_caption: app
            .last_updated
            .map(|ts| format!("Updated {}", format_relative_time(ts, window.now))),
    }
}

type RedrawHook = Box<dyn Fn(&[AppRow])>;

/// Holds the current result set and turns it into rows.
///
/// The result set is `None` until the first load lands and again after the
/// loader is reset. Rows are rendered on every refresh so badge state
/// follows the update history preference without a new query.
pub(crate) struct AppListAdapter {
    preferences: Preferences,
    apps: RefCell<Option<Vec<AppInfo>>>,
    redraw: RefCell<Option<RedrawHook>>,
    refreshes: Cell<usize>,
}

impl AppListAdapter {
    pub(crate) fn new(preferences: Preferences, apps: Option<Vec<AppInfo>>) -> Self {
        Self {
            preferences,
            apps: RefCell::new(apps),
            redraw: RefCell::new(None),
            refreshes: Cell::new(0),
        }
    }

    pub(crate) fn set_redraw_hook(&self, hook: impl Fn(&[AppRow]) + 'static) {
        *self.redraw.borrow_mut() = Some(Box::new(hook));
    }

    /// Replaces the result set, returning the previous one, and refreshes.
    pub(crate) fn swap_apps(&self, apps: Option<Vec<AppInfo>>) -> Option<Vec<AppInfo>> {
        let previous = self.apps.replace(apps);
        self.notify_data_set_changed();
        previous
    }

    pub(crate) fn has_result(&self) -> bool {
        self.apps.borrow().is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.apps.borrow().as_ref().map_or(0, Vec::len)
    }

    pub(crate) fn app_at(&self, position: usize) -> Option<AppInfo> {
        self.apps
            .borrow()
            .as_ref()
            .and_then(|apps| apps.get(position).cloned())
    }

    #[cfg(test)]
    pub(crate) fn refresh_count(&self) -> usize {
        self.refreshes.get()
    }

    pub(crate) fn render_rows_at(&self, now: DateTime<Utc>) -> Vec<AppRow> {
        let window = HistoryWindow::new(now, self.preferences.update_history_days());
        self.apps
            .borrow()
            .as_ref()
            .map(|apps| apps.iter().map(|app| render_row(app, &window)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn notify_data_set_changed(&self) {
        self.refreshes.set(self.refreshes.get() + 1);
        trace!(refreshes = self.refreshes.get(), rows = self.len(), "list refreshed");
        let redraw = self.redraw.borrow();
        if let Some(hook) = redraw.as_ref() {
            let rows = self.render_rows_at(Utc::now());
            hook(&rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppSettings;
    use crate::types::sample_app;
    use chrono::{Duration, TimeZone};
    use std::rc::Rc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> Option<DateTime<Utc>> {
        Some(now() - Duration::days(days))
    }

    #[test]
    fn badges_follow_history_window() {
        let window = HistoryWindow::new(now(), 14);
        let fresh = sample_app("a.fresh", "Fresh", &[], days_ago(2), days_ago(2));
        let updated = sample_app("a.updated", "Updated", &[], days_ago(200), days_ago(5));
        let stale = sample_app("a.stale", "Stale", &[], days_ago(200), days_ago(100));

        assert_eq!(render_row(&fresh, &window).badge, Some(RowBadge::New));
        assert_eq!(render_row(&updated, &window).badge, Some(RowBadge::Updated));
        assert_eq!(render_row(&stale, &window).badge, None);
        assert_eq!(
            render_row(&updated, &window).updated_caption.as_deref(),
            Some("Updated 5 days ago")
        );
    }

    #[test]
    fn empty_summary_falls_back_to_package_name() {
        let window = HistoryWindow::new(now(), 14);
        let mut app = sample_app("org.example.bare", "Bare", &["Games"], None, None);
        app.summary.clear();
        let row = render_row(&app, &window);
        assert_eq!(row.subtitle, "org.example.bare");
        assert_eq!(row.icon_name, "applications-games-symbolic");
        assert!(row.updated_caption.is_none());
    }

    #[test]
    fn rendering_reads_current_preference() {
        let prefs = Preferences::in_memory(AppSettings::default());
        let app = sample_app("a.updated", "Updated", &[], days_ago(200), days_ago(20));
        let adapter = AppListAdapter::new(prefs.clone(), Some(vec![app]));

        assert_eq!(adapter.render_rows_at(now())[0].badge, None);
        prefs.set_update_history_days(30);
        assert_eq!(adapter.render_rows_at(now())[0].badge, Some(RowBadge::Updated));
    }

    #[test]
    fn swap_returns_previous_result_and_redraws() {
        let prefs = Preferences::in_memory(AppSettings::default());
        let adapter = AppListAdapter::new(prefs, None);
        let drawn = Rc::new(Cell::new(usize::MAX));
        let drawn_clone = Rc::clone(&drawn);
        adapter.set_redraw_hook(move |rows| drawn_clone.set(rows.len()));

        assert!(!adapter.has_result());
        let first = vec![sample_app("a.one", "One", &[], None, None)];
        assert!(adapter.swap_apps(Some(first.clone())).is_none());
        assert_eq!(drawn.get(), 1);
        assert_eq!(adapter.len(), 1);
        assert_eq!(adapter.app_at(0).map(|a| a.package_name), Some("a.one".to_string()));

        assert_eq!(adapter.swap_apps(None), Some(first));
        assert_eq!(drawn.get(), 0);
        assert!(adapter.app_at(0).is_none());
        assert_eq!(adapter.refresh_count(), 2);
    }
}
