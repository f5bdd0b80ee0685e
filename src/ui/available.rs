use gtk4 as gtk;

use gtk::prelude::*;

pub(crate) struct AvailableWidgets {
    pub(crate) category_dropdown: gtk::DropDown,
    pub(crate) spinner: gtk::Spinner,
    pub(crate) status_label: gtk::Label,
    pub(crate) list: gtk::ListBox,
    pub(crate) scroller: gtk::ScrolledWindow,
}

/// Category chooser stacked above the scrollable application list.
pub(crate) fn build_page(categories: &[String]) -> (gtk::Box, AvailableWidgets) {
    let container = gtk::Box::builder()
        .orientation(gtk::Orientation::Vertical)
        .spacing(6)
        .build();
    container.set_vexpand(true);
    container.set_margin_top(6);
    container.set_margin_start(12);
    container.set_margin_end(12);

    let labels: Vec<&str> = categories.iter().map(String::as_str).collect();
    let model = gtk::StringList::new(&labels);
    let category_dropdown = gtk::DropDown::builder()
        .model(&model)
        .hexpand(true)
        .build();
    category_dropdown.set_widget_name("category-chooser");
    category_dropdown.set_tooltip_text(Some("Filter applications by category"));

    let spinner = gtk::Spinner::new();
    spinner.set_visible(false);
    spinner.set_valign(gtk::Align::Center);

    let chooser_row = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(6)
        .build();
    chooser_row.append(&category_dropdown);
    chooser_row.append(&spinner);

    let status_label = gtk::Label::builder()
        .halign(gtk::Align::Start)
        .wrap(true)
        .build();
    status_label.add_css_class("dim-label");
    status_label.set_visible(false);

    let list = gtk::ListBox::new();
    list.set_selection_mode(gtk::SelectionMode::None);
    list.set_activate_on_single_click(true);
    list.add_css_class("boxed-list");
    list.set_valign(gtk::Align::Start);

    let placeholder = gtk::Label::builder()
        .label("No applications in this category.")
        .margin_top(24)
        .margin_bottom(24)
        .build();
    placeholder.add_css_class("dim-label");
    list.set_placeholder(Some(&placeholder));

    let scroller = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .vexpand(true)
        .child(&list)
        .build();
    scroller.set_margin_bottom(12);

    container.append(&chooser_row);
    container.append(&status_label);
    container.append(&scroller);

    (
        container,
        AvailableWidgets {
            category_dropdown,
            spinner,
            status_label,
            list,
            scroller,
        },
    )
}
