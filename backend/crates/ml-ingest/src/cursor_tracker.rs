use ml_config::CursorStrategy;

use chrono::{DateTime, Utc};

/// Derives the next resume cursor from a batch as it is processed.
///
/// Batches arrive newest first, so under [`CursorStrategy::FirstEvent`] the
/// first timestamp seen is the cursor. [`CursorStrategy::NewestInBatch`]
/// takes the maximum instead. Either way an ordering violation is remembered
/// so the scanner can report it.
#[derive(Debug)]
pub(crate) struct CursorTracker {
    strategy: CursorStrategy,
    next: Option<DateTime<Utc>>,
    previous: Option<DateTime<Utc>>,
    out_of_order: bool,
}

impl CursorTracker {
    pub(crate) fn new(strategy: CursorStrategy) -> Self {
        Self {
            strategy,
            next: None,
            previous: None,
            out_of_order: false,
        }
    }

    pub(crate) fn observe(&mut self, occurred_at: DateTime<Utc>) {
        if let Some(previous) = self.previous
            && occurred_at > previous
        {
            self.out_of_order = true;
        }
        self.previous = Some(occurred_at);

        self.next = match (self.strategy, self.next) {
            (_, None) => Some(occurred_at),
            (CursorStrategy::FirstEvent, current) => current,
            (CursorStrategy::NewestInBatch, Some(current)) => Some(current.max(occurred_at)),
        };
    }

    /// `None` when nothing was observed.
    pub(crate) fn next_cursor(&self) -> Option<DateTime<Utc>> {
        self.next
    }

    pub(crate) fn out_of_order(&self) -> bool {
        self.out_of_order
    }
}
