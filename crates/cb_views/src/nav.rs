use std::sync::atomic::{AtomicU64, Ordering};

/// What a navigation did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    NotFound,
    /// A newer navigation started while this one was in flight; its response was dropped.
    Discarded,
    /// Nothing to do (same fragment, or pagination past either end).
    Unchanged,
}

/// Navigation generation handed out when a dispatch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic navigation counter. Only the holder of the latest ticket may
/// render; responses for older tickets are discarded.
#[derive(Debug, Default)]
pub struct Generations {
    current: AtomicU64,
}

impl Generations {
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}
