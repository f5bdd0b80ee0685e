pub(crate) mod app;
pub(crate) mod available;

pub(crate) use app::{AppWidgets, build_ui};
pub(crate) use available::{AvailableWidgets, build_page as build_available_page};
