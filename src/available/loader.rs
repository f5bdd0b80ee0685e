use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, mpsc};
use std::thread;

use tracing::{debug, trace};

use crate::index::{AppIndex, HistoryWindow, QueryTarget};
use crate::state::types::AppMessage;
use crate::types::AppInfo;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct LoaderId(pub(crate) u32);

pub(crate) const AVAILABLE_APPS_LOADER: LoaderId = LoaderId(0);

#[derive(Clone, Debug)]
pub(crate) struct LoadRequest {
    pub(crate) target: QueryTarget,
    pub(crate) window: HistoryWindow,
}

#[derive(Debug)]
pub(crate) struct LoadFinished {
    pub(crate) loader: LoaderId,
    pub(crate) generation: u64,
    pub(crate) target: QueryTarget,
    pub(crate) result: Result<Vec<AppInfo>, String>,
}

/// Runs queries for a list and hands the results back later.
pub(crate) trait RowLoader {
    /// Starts a fresh load for `id`, superseding any earlier one. Returns the
    /// generation the result will carry.
    fn restart(&self, id: LoaderId, request: LoadRequest) -> u64;
}

/// Runs each load on its own worker thread and reports through the app's
/// message channel.
pub(crate) struct ThreadLoader {
    index: Arc<dyn AppIndex>,
    sender: mpsc::Sender<AppMessage>,
    generations: RefCell<HashMap<LoaderId, u64>>,
}

impl ThreadLoader {
    pub(crate) fn new(index: Arc<dyn AppIndex>, sender: mpsc::Sender<AppMessage>) -> Self {
        Self {
            index,
            sender,
            generations: RefCell::new(HashMap::new()),
        }
    }

    /// Whether `generation` is still the newest load for `id`.
    pub(crate) fn is_current(&self, id: LoaderId, generation: u64) -> bool {
        self.generations.borrow().get(&id).copied() == Some(generation)
    }

    /// Forgets `id`, so results still in flight are ignored.
    pub(crate) fn destroy(&self, id: LoaderId) {
        self.generations.borrow_mut().remove(&id);
    }
}

impl RowLoader for ThreadLoader {
    fn restart(&self, id: LoaderId, request: LoadRequest) -> u64 {
        let generation = {
            let mut generations = self.generations.borrow_mut();
            let entry = generations.entry(id).or_insert(0);
            *entry += 1;
            *entry
        };
        debug!(loader = id.0, generation, uri = %request.target.uri(), "restarting load");

        let index = Arc::clone(&self.index);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let LoadRequest { target, window } = request;
            let result = index
                .query(&target, &window)
                .map_err(|err| format!("{:#}", err));
            trace!(loader = id.0, generation, "load finished");
            let _ = sender.send(AppMessage::AppsLoaded(LoadFinished {
                loader: id,
                generation,
                target,
                result,
            }));
        });

        generation
    }
}
