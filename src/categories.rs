use crate::types::AppInfo;

const FALLBACK_ICON: &str = "application-x-executable-symbolic";

static CATEGORY_ICONS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "Connectivity" => "network-wireless-symbolic",
    "Development" => "applications-engineering-symbolic",
    "Games" => "applications-games-symbolic",
    "Graphics" => "applications-graphics-symbolic",
    "Internet" => "web-browser-symbolic",
    "Money" => "money-symbolic",
    "Multimedia" => "applications-multimedia-symbolic",
    "Navigation" => "find-location-symbolic",
    "Phone & SMS" => "call-start-symbolic",
    "Reading" => "accessories-dictionary-symbolic",
    "Science & Education" => "applications-science-symbolic",
    "Security" => "security-high-symbolic",
    "Sports & Health" => "emblem-favorite-symbolic",
    "System" => "applications-system-symbolic",
    "Theming" => "preferences-desktop-appearance-symbolic",
    "Time" => "alarm-symbolic",
    "Writing" => "accessories-text-editor-symbolic",
};

/// Icon of the first category the app lists that has one.
pub(crate) fn icon_name_for_app(app: &AppInfo) -> &'static str {
    app.categories
        .iter()
        .find_map(|c| CATEGORY_ICONS.get(c.as_str()).copied())
        .unwrap_or(FALLBACK_ICON)
}
