mod data_panel;
pub use data_panel::DataPanel;

mod charts;
pub use charts::ChartFigure;

mod sections;
pub use sections::{BarSection, LineSection, ScatterSection};

mod utils;
pub(crate) use utils::*;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::error::{LoadNotice, Loaded};
use crate::core::session::SessionStore;

/// Display-ready summary of one load attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStatus {
    pub file: String,
    pub kind: &'static str,
    pub rows: usize,
    pub error: Option<String>,
}

impl SourceStatus {
    pub fn from_loaded<T>(path: &Path, loaded: &Loaded<T>) -> Self {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let (rows, error) = match &loaded.notice {
            LoadNotice::Loaded { rows } => (*rows, None),
            LoadNotice::Malformed(err) => (0, Some(err.to_string())),
            LoadNotice::NotAvailable | LoadNotice::NoRecords => (0, None),
        };
        Self {
            file,
            kind: loaded.notice.kind(),
            rows,
            error,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.kind == "loaded"
    }
}

/// Session store shared by the page and its widgets.
///
/// The store itself is not reactive; every update bumps `revision`, which
/// the page reads so that it recomputes once per widget change.
#[derive(Clone)]
pub struct SessionHandle {
    store: Rc<RefCell<SessionStore>>,
    revision: Signal<u64>,
}

impl SessionHandle {
    pub fn new(store: SessionStore, revision: Signal<u64>) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
            revision,
        }
    }

    /// Subscribe the calling component to store updates.
    pub fn track(&self) -> u64 {
        (self.revision)()
    }

    pub fn with_store<R>(&self, f: impl FnOnce(&mut SessionStore) -> R) -> R {
        f(&mut self.store.borrow_mut())
    }

    /// Apply a widget change and schedule a recompute.
    pub fn update(&self, f: impl FnOnce(&mut SessionStore)) {
        f(&mut self.store.borrow_mut());
        let mut revision = self.revision;
        revision += 1;
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}
