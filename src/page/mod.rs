use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod book_detail;
mod book_list;

pub use book_detail::BookDetailPage;
pub use book_list::BookListPage;

/// Per-view phase. `Loading` runs from view entry until the primary fetch
/// settles, then exactly one of `Ready`/`Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

/// Ownership token of a live view instance. In-flight requests are not
/// cancelled on navigation; their resume handlers check `is_active` before
/// touching view state that no longer has an owner.
#[derive(Debug, Clone)]
pub struct ViewToken {
    active: Arc<AtomicBool>,
}

impl ViewToken {
    pub fn new() -> ViewToken {
        ViewToken {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn revoke(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

impl Default for ViewToken {
    fn default() -> ViewToken {
        ViewToken::new()
    }
}
