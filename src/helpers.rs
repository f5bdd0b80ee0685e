use chrono::{DateTime, Utc};
use gtk::glib;
use gtk4 as gtk;
use libadwaita as adw;
use libadwaita::prelude::*;

use crate::available::AppRow;

pub(crate) fn clear_listbox(list: &gtk::ListBox) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
}

pub(crate) fn populate_app_list(list: &gtk::ListBox, rows: &[AppRow]) {
    clear_listbox(list);
    for row in rows {
        list.append(&build_app_row(row));
    }
}

fn build_app_row(app: &AppRow) -> adw::ActionRow {
    let title = glib::markup_escape_text(&app.title);
    let subtitle = glib::markup_escape_text(&app.subtitle);
    let row = adw::ActionRow::builder()
        .title(title.as_str())
        .subtitle(subtitle.as_str())
        .build();
    row.set_title_lines(1);
    row.set_subtitle_lines(2);
    row.set_activatable(true);
    row.set_focusable(true);
    row.set_tooltip_text(Some(app.package_name.as_str()));

    let icon = gtk::Image::from_icon_name(app.icon_name);
    icon.set_pixel_size(28);
    icon.set_margin_end(12);
    icon.set_valign(gtk::Align::Center);
    row.add_prefix(&icon);

    let suffix_box = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(6)
        .halign(gtk::Align::End)
        .valign(gtk::Align::Center)
        .build();

    if let Some(badge) = app.badge {
        let label = gtk::Label::new(Some(badge.label()));
        label.add_css_class("tag");
        label.add_css_class("accent");
        suffix_box.append(&label);
    }

    if let Some(caption) = app.updated_caption.as_deref() {
        let time_label = gtk::Label::builder()
            .label(caption)
            .halign(gtk::Align::End)
            .build();
        time_label.add_css_class("dim-label");
        time_label.add_css_class("caption");
        suffix_box.append(&time_label);
    }

    row.add_suffix(&suffix_box);
    row
}

pub(crate) fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(timestamp);

    if delta.num_minutes() < 1 {
        return "just now".to_string();
    }

    if delta.num_hours() < 1 {
        let minutes = delta.num_minutes();
        return format!(
            "{} minute{} ago",
            minutes,
            if minutes == 1 { "" } else { "s" }
        );
    }

    if delta.num_hours() < 24 {
        let hours = delta.num_hours();
        return format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" });
    }

    let days = delta.num_days();
    if days < 7 {
        return format!("{} day{} ago", days, if days == 1 { "" } else { "s" });
    }

    let weeks = days / 7;
    if weeks < 5 {
        return format!("{} week{} ago", weeks, if weeks == 1 { "" } else { "s" });
    }

    let months = days / 30;
    if months < 12 {
        return format!("{} month{} ago", months, if months == 1 { "" } else { "s" });
    }

    let years = days / 365;
    // 360..=364 days: twelve months but not yet a full year.
    if years < 1 {
        return "about a year ago".to_string();
    }

    format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
}
