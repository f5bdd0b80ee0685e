mod app;
mod available;

pub(crate) use app::AppController;
