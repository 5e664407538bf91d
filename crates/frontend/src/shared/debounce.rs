//! Keyed trailing-edge debounce on top of [`PatchSequencer`].
//!
//! Every `schedule` call stamps a new ticket for its key and sleeps. When
//! the timer fires, only the newest ticket for that key runs its task; the
//! ticket is handed to the task so it can send `seq` and check staleness
//! again when the response arrives.
//!
//! The sequencer lives behind an `Rc` that each pending task holds, so a
//! task queued before its page closes still fires.

use contracts::shared::patch_sequencer::{PatchSequencer, Ticket};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// Quiet period before a monthly plan/actual patch is sent
pub const MONTHLY_PATCH_DELAY_MS: u32 = 400;

type SharedSequencer = Rc<RefCell<PatchSequencer<i64>>>;

#[derive(Clone, Copy)]
pub struct KeyedDebouncer {
    sequencer: StoredValue<SharedSequencer, LocalStorage>,
    delay_ms: u32,
}

impl KeyedDebouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            sequencer: StoredValue::new_local(Rc::new(RefCell::new(PatchSequencer::new()))),
            delay_ms,
        }
    }

    /// Start this key's numbering above a seq the server already stored
    pub fn seed(&self, key: i64, seq: u64) {
        if let Some(shared) = self.sequencer.try_get_value() {
            shared.borrow_mut().seed(key, seq);
        }
    }

    fn stamp(&self, key: i64) -> Option<(SharedSequencer, Ticket<i64>)> {
        let shared = self.sequencer.try_get_value()?;
        let ticket = shared.borrow_mut().stamp(key);
        Some((shared, ticket))
    }

    /// Queue `task` for `key`. The caller snapshots whatever the task sends
    /// at call time; only the last call within the window runs.
    pub fn schedule<F, Fut>(&self, key: i64, task: F)
    where
        F: FnOnce(Ticket<i64>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let Some((shared, ticket)) = self.stamp(key) else {
            return;
        };

        let delay_ms = self.delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            let latest = shared.borrow().is_latest(&ticket);
            if latest {
                task(ticket).await;
            } else {
                log::trace!("debounce: dropped key={} seq={}", ticket.key, ticket.seq);
            }
        });
    }

    /// False once a newer ticket exists, or once the owning page is gone.
    pub fn is_latest(&self, ticket: &Ticket<i64>) -> bool {
        self.sequencer
            .try_with_value(|shared| shared.borrow().is_latest(ticket))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_stamp_supersedes_older() {
        let owner = Owner::new();
        owner.with(|| {
            let debouncer = KeyedDebouncer::new(MONTHLY_PATCH_DELAY_MS);
            debouncer.seed(7, 100);
            let (_, first) = debouncer.stamp(7).unwrap();
            let (_, second) = debouncer.stamp(7).unwrap();
            assert_eq!(first.seq, 101);
            assert!(!debouncer.is_latest(&first));
            assert!(debouncer.is_latest(&second));
        });
    }

    #[test]
    fn test_pending_ticket_survives_page_disposal() {
        let owner = Owner::new();
        let (shared, ticket) = owner
            .with(|| KeyedDebouncer::new(MONTHLY_PATCH_DELAY_MS).stamp(7))
            .unwrap();

        // Closing the tab disposes everything the page owned
        owner.cleanup();

        assert!(shared.borrow().is_latest(&ticket));
    }
}
