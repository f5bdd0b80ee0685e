mod available;
mod categories;
mod helpers;
mod index;
mod logging;
mod preferences;
mod settings;
mod state;
mod types;
mod ui;

use adw::prelude::*;
use gtk4::gio;
use gtk4::glib;
use libadwaita as adw;

use crate::ui::build_ui;

const APP_ID: &str = "org.droidshelf.Droidshelf";

fn main() -> glib::ExitCode {
    logging::init_logging();
    adw::init().expect("Failed to initialize libadwaita");

    let app = adw::Application::builder()
        .application_id(APP_ID)
        .flags(gio::ApplicationFlags::FLAGS_NONE)
        .build();

    app.connect_activate(build_ui);

    app.run()
}
