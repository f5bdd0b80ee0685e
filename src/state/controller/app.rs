use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::glib::{self, Propagation};

use crate::available::{AvailableApps, ThreadLoader};
use crate::index::MAX_UPDATE_HISTORY_DAYS;
use crate::preferences::Preferences;
use crate::settings::ThemePreference;
use crate::state::types::AppMessage;
use crate::ui::AppWidgets;

pub(crate) struct AppController {
    pub(crate) widgets: AppWidgets,
    pub(crate) available: AvailableApps<ThreadLoader>,
    pub(crate) preferences: Preferences,
    pub(crate) index_dir: PathBuf,
    pub(crate) app: adw::Application,
    pub(crate) window: adw::ApplicationWindow,
    pub(crate) preferences_window: RefCell<Option<adw::PreferencesWindow>>,
}

impl AppController {
    pub(crate) fn new(
        widgets: AppWidgets,
        available: AvailableApps<ThreadLoader>,
        preferences: Preferences,
        index_dir: PathBuf,
        app: adw::Application,
        window: adw::ApplicationWindow,
    ) -> Self {
        Self {
            widgets,
            available,
            preferences,
            index_dir,
            app,
            window,
            preferences_window: RefCell::new(None),
        }
    }

    pub(crate) fn setup_connections(self: &Rc<Self>) {
        self.widgets.available.list.connect_row_activated(glib::clone!(
            #[weak(rename_to = controller)]
            self,
            move |_, row| {
                controller.on_available_row_activated(row.index());
            }
        ));
    }

    pub(crate) fn handle_message(self: &Rc<Self>, msg: AppMessage) {
        match msg {
            AppMessage::AppsLoaded(finished) => {
                self.finish_apps_load(finished);
            }
        }
    }

    pub(crate) fn show_toast(&self, message: &str) {
        let toast = adw::Toast::new(message);
        toast.set_timeout(4);
        self.widgets.toast_overlay.add_toast(toast);
    }

    pub(crate) fn save_window_state(&self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.preferences.update(|settings| {
            settings.window_width = Some(width);
            settings.window_height = Some(height);
        });
    }

    pub(crate) fn show_preferences(self: &Rc<Self>) {
        if let Some(existing) = self.preferences_window.borrow().as_ref() {
            existing.present();
            return;
        }

        let prefs = adw::PreferencesWindow::builder()
            .transient_for(&self.window)
            .modal(true)
            .title("Preferences")
            .build();
        prefs.set_application(Some(&self.app));
        self.preferences_window.replace(Some(prefs.clone()));

        {
            let controller = Rc::downgrade(self);
            prefs.connect_close_request(move |_| {
                if let Some(controller) = controller.upgrade() {
                    controller.preferences_window.replace(None);
                }
                Propagation::Proceed
            });
        }

        let settings = self.preferences.snapshot();
        let general_page = adw::PreferencesPage::builder().title("General").build();

        let appearance_group = adw::PreferencesGroup::builder()
            .title("Appearance")
            .build();
        let theme_labels: Vec<&str> = ThemePreference::ALL.iter().map(|t| t.label()).collect();
        let theme_model = gtk::StringList::new(&theme_labels);
        let theme_combo = adw::ComboRow::builder()
            .title("Style")
            .model(&theme_model)
            .build();
        theme_combo.set_selected(settings.theme_preference.position());
        appearance_group.add(&theme_combo);
        general_page.add(&appearance_group);

        let lists_group = adw::PreferencesGroup::builder()
            .title("Application Lists")
            .description("Apps added or updated within this window are marked in the list.")
            .build();
        let history_row =
            adw::SpinRow::with_range(1.0, f64::from(MAX_UPDATE_HISTORY_DAYS), 1.0);
        history_row.set_title("Days to show new and updated apps");
        history_row.set_value(f64::from(settings.update_history_days));
        lists_group.add(&history_row);

        let index_row = adw::ActionRow::builder()
            .title("Index directory")
            .subtitle(glib::markup_escape_text(&self.index_dir.display().to_string()).as_str())
            .build();
        index_row.set_subtitle_selectable(true);
        lists_group.add(&index_row);
        general_page.add(&lists_group);

        prefs.add(&general_page);

        let preferences = self.preferences.clone();
        theme_combo.connect_selected_notify(move |row| {
            let theme = ThemePreference::from_position(row.selected());
            theme.apply(&adw::StyleManager::default());
            preferences.update(|settings| settings.theme_preference = theme);
        });

        let preferences = self.preferences.clone();
        history_row.connect_value_notify(move |row| {
            let days = row.value().round().max(1.0) as u32;
            preferences.set_update_history_days(days);
        });

        prefs.present();
    }
}
