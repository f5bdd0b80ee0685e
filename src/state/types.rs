use crate::available::LoadFinished;

pub(crate) enum AppMessage {
    AppsLoaded(LoadFinished),
}
