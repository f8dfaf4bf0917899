use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Identifies one request among those a view has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Generation counter that lets only the most recent request commit its result.
#[derive(Debug, Clone, Default)]
pub struct Latest {
    generation: Arc<AtomicU64>,
}

impl Latest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersede every outstanding ticket without starting a request.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `value` in `slot` if `ticket` is still current.
    pub fn commit<T>(&self, ticket: Ticket, slot: &mut T, value: T) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        *slot = value;
        true
    }
}
