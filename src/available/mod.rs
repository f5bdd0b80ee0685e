mod adapter;
mod loader;
mod selection;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use chrono::Utc;
use once_cell::unsync::OnceCell;
use tracing::{debug, warn};

use crate::index::{AppIndex, HistoryWindow, QueryTarget};
use crate::preferences::{ListenerId, Preferences};
use crate::types::AppInfo;
use selection::CategorySelection;

pub(crate) use adapter::{AppListAdapter, AppRow};
pub(crate) use loader::{AVAILABLE_APPS_LOADER, LoadFinished, LoadRequest, RowLoader, ThreadLoader};

/// The "available apps" screen: a category chooser driving a list query.
///
/// Selection changes restart the loader before returning, so the active
/// query always matches the selection. The adapter is created on first use
/// and subscribes once to update history changes, which only redraw.
pub(crate) struct AvailableApps<L: RowLoader> {
    index: Arc<dyn AppIndex>,
    loader: L,
    preferences: Preferences,
    categories: Vec<String>,
    selection: RefCell<CategorySelection>,
    adapter: OnceCell<Rc<AppListAdapter>>,
    adapter_listener: Cell<Option<ListenerId>>,
    last_error: RefCell<Option<String>>,
}

impl<L: RowLoader> AvailableApps<L> {
    pub(crate) fn new(index: Arc<dyn AppIndex>, loader: L, preferences: Preferences) -> Self {
        let categories = index.categories();
        Self {
            index,
            loader,
            preferences,
            categories,
            selection: RefCell::new(CategorySelection::default()),
            adapter: OnceCell::new(),
            adapter_listener: Cell::new(None),
            last_error: RefCell::new(None),
        }
    }

    pub(crate) fn categories(&self) -> &[String] {
        &self.categories
    }

    pub(crate) fn loader(&self) -> &L {
        &self.loader
    }

    pub(crate) fn selected_category(&self) -> Option<String> {
        self.selection.borrow().current().map(str::to_string)
    }

    pub(crate) fn on_category_changed(&self, category: Option<&str>) {
        self.selection.borrow_mut().set(category);
        match category {
            Some(label) => debug!("Category '{}' selected.", label),
            None => debug!("Select empty category."),
        }
        self.restart_loader();
    }

    pub(crate) fn on_category_selected(&self, category: &str) {
        self.on_category_changed(Some(category));
    }

    pub(crate) fn on_selection_cleared(&self) {
        self.on_category_changed(None);
    }

    pub(crate) fn resolve_query_target(&self) -> QueryTarget {
        self.selection
            .borrow()
            .query_target(self.index.sentinels())
    }

    pub(crate) fn adapter(&self) -> Rc<AppListAdapter> {
        let adapter = self.adapter.get_or_init(|| {
            let adapter = Rc::new(AppListAdapter::new(self.preferences.clone(), None));
            let weak = Rc::downgrade(&adapter);
            let id = self.preferences.register_update_history_listener(move || {
                if let Some(adapter) = weak.upgrade() {
                    adapter.notify_data_set_changed();
                }
            });
            self.adapter_listener.set(Some(id));
            adapter
        });
        Rc::clone(adapter)
    }

    pub(crate) fn restart_loader(&self) -> u64 {
        let request = LoadRequest {
            target: self.resolve_query_target(),
            window: HistoryWindow::new(Utc::now(), self.preferences.update_history_days()),
        };
        self.loader.restart(AVAILABLE_APPS_LOADER, request)
    }

    pub(crate) fn on_load_finished(&self, result: Result<Vec<AppInfo>, String>) {
        let apps = match result {
            Ok(apps) => {
                self.last_error.replace(None);
                apps
            }
            Err(err) => {
                warn!("Failed to load applications: {}", err);
                self.last_error.replace(Some(err));
                Vec::new()
            }
        };
        self.adapter().swap_apps(Some(apps));
    }

    pub(crate) fn on_loader_reset(&self) {
        if let Some(adapter) = self.adapter.get() {
            adapter.swap_apps(None);
        }
    }

    pub(crate) fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }
}

impl<L: RowLoader> Drop for AvailableApps<L> {
    fn drop(&mut self) {
        if let Some(id) = self.adapter_listener.take() {
            self.preferences.unregister_update_history_listener(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::loader::LoaderId;
    use super::*;
    use crate::index::MemoryIndex;
    use crate::settings::AppSettings;
    use crate::types::sample_app;

    #[derive(Default)]
    struct RecordingLoader {
        requests: RefCell<Vec<(LoaderId, QueryTarget, u32)>>,
    }

    impl RowLoader for RecordingLoader {
        fn restart(&self, id: LoaderId, request: LoadRequest) -> u64 {
            let mut requests = self.requests.borrow_mut();
            requests.push((id, request.target, request.window.days));
            requests.len() as u64
        }
    }

    impl RecordingLoader {
        fn targets(&self) -> Vec<QueryTarget> {
            self.requests
                .borrow()
                .iter()
                .map(|(_, target, _)| target.clone())
                .collect()
        }
    }

    fn view(preferences: Preferences) -> AvailableApps<RecordingLoader> {
        let index = Arc::new(MemoryIndex::new(
            &["Games", "Writing"],
            vec![sample_app("a.chess", "Chess", &["Games"], None, None)],
        ));
        AvailableApps::new(index, RecordingLoader::default(), preferences)
    }

    fn prefs() -> Preferences {
        Preferences::in_memory(AppSettings::default())
    }

    #[test]
    fn categories_come_from_the_index_in_order() {
        let view = view(prefs());
        assert_eq!(
            view.categories(),
            ["What's New", "Recently Updated", "All", "Games", "Writing"]
        );
    }

    #[test]
    fn every_selection_change_restarts_with_matching_target() {
        let view = view(prefs());
        view.on_category_selected("Games");
        view.on_category_selected("Recently Updated");
        view.on_category_selected("What's New");
        view.on_category_selected("All");
        view.on_selection_cleared();

        assert_eq!(
            view.loader().targets(),
            vec![
                QueryTarget::Category("Games".to_string()),
                QueryTarget::RecentlyUpdated,
                QueryTarget::NewlyAdded,
                QueryTarget::All,
                QueryTarget::All,
            ]
        );
        assert!(
            view.loader()
                .requests
                .borrow()
                .iter()
                .all(|(id, _, _)| *id == AVAILABLE_APPS_LOADER)
        );
    }

    #[test]
    fn clearing_after_games_targets_all() {
        let view = view(prefs());
        view.on_category_selected("Games");
        assert_eq!(
            view.resolve_query_target(),
            QueryTarget::Category("Games".to_string())
        );
        view.on_selection_cleared();
        assert_eq!(view.resolve_query_target(), QueryTarget::All);
        assert_eq!(view.selected_category(), None);
    }

    #[test]
    fn restart_carries_current_history_window() {
        let preferences = prefs();
        let view = view(preferences.clone());
        preferences.set_update_history_days(45);
        view.on_category_selected("What's New");
        assert_eq!(view.loader().requests.borrow()[0].2, 45);
    }

    #[test]
    fn adapter_is_memoized() {
        let view = view(prefs());
        let first = view.adapter();
        let second = view.adapter();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn repeated_adapter_calls_register_one_listener() {
        let preferences = prefs();
        let view = view(preferences.clone());
        let other_hits = Rc::new(Cell::new(0));
        let other_hits_clone = Rc::clone(&other_hits);
        preferences.register_update_history_listener(move || {
            other_hits_clone.set(other_hits_clone.get() + 1)
        });

        let adapter = view.adapter();
        view.adapter();
        view.adapter();
        assert_eq!(preferences.update_history_listener_count(), 2);

        preferences.set_update_history_days(3);
        assert_eq!(adapter.refresh_count(), 1);
        assert_eq!(other_hits.get(), 1);
        // Redraws do not re-query.
        assert!(view.loader().requests.borrow().is_empty());
    }

    #[test]
    fn load_results_land_in_adapter() {
        let view = view(prefs());
        view.on_load_finished(Ok(vec![sample_app("a.one", "One", &[], None, None)]));
        assert_eq!(view.adapter().len(), 1);
        assert!(view.last_error().is_none());

        view.on_load_finished(Err("disk gone".to_string()));
        assert_eq!(view.adapter().len(), 0);
        assert!(view.adapter().has_result());
        assert_eq!(view.last_error().as_deref(), Some("disk gone"));

        view.on_loader_reset();
        assert!(!view.adapter().has_result());
    }

    #[test]
    fn dropping_the_view_unsubscribes_its_adapter() {
        let preferences = prefs();
        {
            let view = view(preferences.clone());
            view.adapter();
            assert_eq!(preferences.update_history_listener_count(), 1);
        }
        assert_eq!(preferences.update_history_listener_count(), 0);
    }
}
