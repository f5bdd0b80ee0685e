use std::rc::Rc;

use gtk4 as gtk;

use gtk::prelude::*;
use tracing::debug;

use crate::available::LoadFinished;
use crate::helpers::populate_app_list;
use crate::state::controller::AppController;
use crate::types::AppInfo;

impl AppController {
    /// Binds the adapter to the list widget, restores the last category and
    /// issues the first load.
    pub(crate) fn start_available_list(self: &Rc<Self>) {
        let adapter = self.available.adapter();
        let list = self.widgets.available.list.clone();
        adapter.set_redraw_hook(move |rows| populate_app_list(&list, rows));

        let dropdown = &self.widgets.available.category_dropdown;
        if let Some(label) = self.preferences.snapshot().last_category {
            if let Some(position) = self.available.categories().iter().position(|c| *c == label) {
                dropdown.set_selected(position as u32);
            }
        }

        // Connected after restoring so the restore does not load twice.
        let controller_weak = Rc::downgrade(self);
        dropdown.connect_selected_notify(move |dropdown| {
            if let Some(controller) = controller_weak.upgrade() {
                controller.on_category_position_changed(dropdown.selected());
            }
        });

        self.on_category_position_changed(dropdown.selected());
    }

    pub(crate) fn on_category_position_changed(self: &Rc<Self>, position: u32) {
        let category = if position == gtk::INVALID_LIST_POSITION {
            None
        } else {
            self.available.categories().get(position as usize).cloned()
        };

        self.set_available_loading(true);
        match category.as_deref() {
            Some(label) => self.available.on_category_selected(label),
            None => self.available.on_selection_cleared(),
        }

        let remembered = self.available.selected_category();
        self.preferences
            .update(move |settings| settings.last_category = remembered);
    }

    pub(crate) fn finish_apps_load(self: &Rc<Self>, finished: LoadFinished) {
        let LoadFinished {
            loader,
            generation,
            target,
            result,
        } = finished;

        if !self.available.loader().is_current(loader, generation) {
            debug!(generation, uri = %target.uri(), "dropping superseded load");
            return;
        }

        self.set_available_loading(false);
        self.available.on_load_finished(result);
        self.widgets.available.scroller.vadjustment().set_value(0.0);
        self.update_available_status();

        if let Some(error) = self.available.last_error() {
            self.show_toast(&format!("Could not load applications: {}", error));
        }
    }

    fn set_available_loading(&self, loading: bool) {
        let spinner = &self.widgets.available.spinner;
        spinner.set_visible(loading);
        if loading {
            spinner.start();
        } else {
            spinner.stop();
        }
    }

    fn update_available_status(&self) {
        let label = &self.widgets.available.status_label;
        let adapter = self.available.adapter();

        if let Some(error) = self.available.last_error() {
            label.set_text(&error);
            label.add_css_class("error");
            label.set_visible(true);
            return;
        }

        label.remove_css_class("error");
        let count = adapter.len();
        if !adapter.has_result() || count == 0 {
            label.set_visible(false);
            return;
        }
        label.set_text(&format!(
            "{} application{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        label.set_visible(true);
    }

    pub(crate) fn on_available_row_activated(self: &Rc<Self>, position: i32) {
        let Some(app) = usize::try_from(position)
            .ok()
            .and_then(|position| self.available.adapter().app_at(position))
        else {
            return;
        };
        debug!(package = %app.package_name, "application activated");
        self.show_app_summary(&app);
    }

    fn show_app_summary(&self, app: &AppInfo) {
        let mut body = String::new();
        if !app.summary.is_empty() {
            body.push_str(&app.summary);
            body.push_str("\n\n");
        }
        body.push_str(&format!("Package: {}\n", app.package_name));
        if !app.repository.is_empty() {
            body.push_str(&format!("Repository: {}\n", app.repository));
        }
        if !app.categories.is_empty() {
            body.push_str(&format!("Categories: {}\n", app.categories.join(", ")));
        }
        if let Some(updated) = app.last_updated {
            body.push_str(&format!("Last updated: {}", updated.format("%Y-%m-%d")));
        }

        let dialog = gtk::MessageDialog::builder()
            .text(app.display_name())
            .secondary_text(body.trim_end())
            .message_type(gtk::MessageType::Info)
            .modal(true)
            .build();
        dialog.set_transient_for(Some(&self.window));
        dialog.add_button("Close", gtk::ResponseType::Close);
        dialog.set_default_response(gtk::ResponseType::Close);
        dialog.connect_response(|dlg, _| dlg.close());
        dialog.present();
    }
}
