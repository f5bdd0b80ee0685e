use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::index::clamp_history_days;
use crate::settings::{AppSettings, app_settings_path, load_app_settings_from, save_app_settings_to};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct ListenerId(u64);

type ChangeListener = Rc<dyn Fn()>;

struct PreferencesInner {
    settings: RefCell<AppSettings>,
    path: Option<PathBuf>,
    update_history_listeners: RefCell<Vec<(ListenerId, ChangeListener)>>,
    next_listener: Cell<u64>,
}

/// Shared handle to the application settings.
///
/// Cloning is cheap and every clone observes the same values and listeners.
/// Listeners registered for the update history fire whenever
/// `update_history_days` changes, however it was changed.
#[derive(Clone)]
pub(crate) struct Preferences {
    inner: Rc<PreferencesInner>,
}

impl Preferences {
    /// Settings backed by the user's settings file.
    pub(crate) fn load() -> Self {
        let path = app_settings_path();
        let settings = path
            .as_deref()
            .map(load_app_settings_from)
            .unwrap_or_default();
        Self::new(settings, path)
    }

    /// Settings that are never written to disk.
    #[cfg(test)]
    pub(crate) fn in_memory(settings: AppSettings) -> Self {
        Self::new(settings, None)
    }

    fn new(settings: AppSettings, path: Option<PathBuf>) -> Self {
        Self {
            inner: Rc::new(PreferencesInner {
                settings: RefCell::new(settings),
                path,
                update_history_listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(1),
            }),
        }
    }

    pub(crate) fn snapshot(&self) -> AppSettings {
        self.inner.settings.borrow().clone()
    }

    pub(crate) fn update_history_days(&self) -> u32 {
        self.inner.settings.borrow().update_history_days
    }

    pub(crate) fn set_update_history_days(&self, days: u32) -> bool {
        self.update(|settings| settings.update_history_days = days)
    }

    /// Applies `change` and persists the result. Returns whether the update
    /// history window moved.
    pub(crate) fn update(&self, change: impl FnOnce(&mut AppSettings)) -> bool {
        let (before, after) = {
            let mut settings = self.inner.settings.borrow_mut();
            let before = settings.update_history_days;
            change(&mut *settings);
            settings.update_history_days = clamp_history_days(settings.update_history_days);
            (before, settings.update_history_days)
        };

        self.persist();

        if before == after {
            return false;
        }
        debug!(from = before, to = after, "update history window changed");
        self.notify_update_history();
        true
    }

    pub(crate) fn register_update_history_listener(
        &self,
        listener: impl Fn() + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .update_history_listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub(crate) fn unregister_update_history_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.update_history_listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    #[cfg(test)]
    pub(crate) fn update_history_listener_count(&self) -> usize {
        self.inner.update_history_listeners.borrow().len()
    }

    fn notify_update_history(&self) {
        // Listeners may register or unregister while running.
        let listeners: Vec<ChangeListener> = self
            .inner
            .update_history_listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn persist(&self) {
        let Some(path) = self.inner.path.as_deref() else {
            return;
        };
        if let Err(err) = save_app_settings_to(path, &self.inner.settings.borrow()) {
            warn!("Failed to save settings: {:#}", err);
        }
    }
}
