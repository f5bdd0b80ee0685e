use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::{gio, glib};
use tracing::{info, warn};

use crate::available::{AVAILABLE_APPS_LOADER, AvailableApps, ThreadLoader};
use crate::index::{AppIndex, CategorySentinels, LocalIndex, default_index_dir};
use crate::preferences::Preferences;
use crate::state::controller::AppController;
use crate::state::types::AppMessage;
use crate::ui::{AvailableWidgets, build_available_page};

const MESSAGE_POLL_INTERVAL: Duration = Duration::from_millis(40);

pub(crate) struct AppWidgets {
    pub(crate) toast_overlay: adw::ToastOverlay,
    pub(crate) available: AvailableWidgets,
}

pub(crate) fn build_ui(app: &adw::Application) {
    let preferences = Preferences::load();
    let settings = preferences.snapshot();

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Droidshelf")
        .default_width(settings.window_width.unwrap_or(520))
        .default_height(settings.window_height.unwrap_or(760))
        .build();

    settings.theme_preference.apply(&adw::StyleManager::default());

    let toast_overlay = adw::ToastOverlay::new();
    window.set_content(Some(&toast_overlay));

    let root_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
    toast_overlay.set_child(Some(&root_box));

    let header_bar = adw::HeaderBar::new();
    let title = adw::WindowTitle::new("Droidshelf", "Available");
    header_bar.set_title_widget(Some(&title));

    let menu = gio::Menu::new();
    menu.append(Some("Preferences"), Some("app.preferences"));
    menu.append(Some("Quit"), Some("app.quit"));
    let menu_button = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu)
        .tooltip_text("Main menu")
        .build();
    header_bar.pack_end(&menu_button);
    root_box.append(&header_bar);

    let index_dir = default_index_dir(settings.index_dir.as_deref()).unwrap_or_else(|| {
        warn!("Unable to determine index directory, falling back to ./repos");
        PathBuf::from("repos")
    });
    info!("Reading application index from {}", index_dir.display());
    let index: Arc<dyn AppIndex> =
        Arc::new(LocalIndex::open(index_dir.clone(), CategorySentinels::default()));

    let (sender, receiver) = mpsc::channel::<AppMessage>();
    let loader = ThreadLoader::new(Arc::clone(&index), sender);
    let available = AvailableApps::new(index, loader, preferences.clone());

    let (available_page, available_widgets) = build_available_page(available.categories());
    root_box.append(&available_page);

    let widgets = AppWidgets {
        toast_overlay,
        available: available_widgets,
    };

    let controller = Rc::new(AppController::new(
        widgets,
        available,
        preferences,
        index_dir,
        app.clone(),
        window.clone(),
    ));

    let receiver = Rc::new(RefCell::new(receiver));
    {
        let controller_weak = Rc::downgrade(&controller);
        glib::timeout_add_local(MESSAGE_POLL_INTERVAL, move || {
            let Some(controller) = controller_weak.upgrade() else {
                return glib::ControlFlow::Break;
            };
            let receiver = receiver.borrow();
            while let Ok(msg) = receiver.try_recv() {
                controller.handle_message(msg);
            }
            glib::ControlFlow::Continue
        });
    }

    let preferences_action = gio::SimpleAction::new("preferences", None);
    {
        let controller_weak = Rc::downgrade(&controller);
        preferences_action.connect_activate(move |_, _| {
            if let Some(controller) = controller_weak.upgrade() {
                controller.show_preferences();
            }
        });
    }
    app.add_action(&preferences_action);
    app.set_accels_for_action("app.preferences", &["<Control>comma"]);

    let quit_action = gio::SimpleAction::new("quit", None);
    quit_action.connect_activate(glib::clone!(
        #[weak]
        window,
        move |_, _| {
            window.close();
        }
    ));
    app.add_action(&quit_action);
    app.set_accels_for_action("app.quit", &["<Control>q"]);

    controller.setup_connections();
    controller.start_available_list();

    // The close handler owns the controller until the window closes, then
    // lets it drop so the adapter's preference listener is released.
    let owner = RefCell::new(Some(controller));
    window.connect_close_request(move |win| {
        if let Some(controller) = owner.borrow_mut().take() {
            controller.save_window_state(win.width(), win.height());
            controller.available.loader().destroy(AVAILABLE_APPS_LOADER);
            controller.available.on_loader_reset();
        }
        glib::Propagation::Proceed
    });

    window.present();
}
