//! Structured cancellation for single-flight fetches.
//!
//! Each fetch hook instance owns one [`CancelScope`]. Starting a fetch
//! issues a [`FlightToken`]; issuing a new token supersedes every earlier
//! one, and closing the scope (on unmount) kills them all. A resolution
//! that arrives holding a dead token must be discarded by its holder.
//!
//! This gives last-requested-wins ordering for the visible state without
//! true network cancellation: superseded responses still arrive, they just
//! no longer have permission to touch anything.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct CancelScope {
    generation: Rc<Cell<u64>>,
    closed: Rc<Cell<bool>>,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede any outstanding flight and start a new one.
    pub fn begin_flight(&self) -> FlightToken {
        self.generation.set(self.generation.get() + 1);
        FlightToken {
            generation: self.generation.get(),
            scope: self.clone(),
        }
    }

    /// Kill every outstanding token. Called when the owning component
    /// unmounts; the scope cannot be reopened.
    pub fn close(&self) {
        self.closed.set(true);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

/// Permission slip for one fetch attempt.
#[derive(Clone)]
pub struct FlightToken {
    generation: u64,
    scope: CancelScope,
}

impl FlightToken {
    /// True while this is the newest flight and the scope is open.
    pub fn is_live(&self) -> bool {
        !self.scope.closed.get()
            && self.generation == self.scope.generation.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn newer_flight_supersedes_older() {
        let scope = CancelScope::new();
        let first = scope.begin_flight();
        assert!(first.is_live());

        let second = scope.begin_flight();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn close_kills_all_tokens() {
        let scope = CancelScope::new();
        let token = scope.begin_flight();

        scope.close();
        assert!(scope.is_closed());
        assert!(!token.is_live());

        // A scope never reopens; tokens issued after close are dead too.
        let late = scope.begin_flight();
        assert!(!late.is_live());
    }

    /// Rapid re-fetches: only the last flight's resolution may become
    /// visible, regardless of the order earlier ones settle in.
    #[test]
    fn late_resolution_of_superseded_flight_is_discarded() {
        let scope = CancelScope::new();
        let visible: Cell<Option<u32>> = Cell::new(None);

        // Three dependency changes in quick succession, each starting a
        // flight before the previous one resolved.
        let flights: Vec<FlightToken> =
            (0..3).map(|_| scope.begin_flight()).collect();

        // Resolutions arrive out of order; each applies only if its token
        // is still live.
        for (result, token) in [(0u32, &flights[0]), (2, &flights[2]), (1, &flights[1])]
        {
            block_on(async {
                if token.is_live() {
                    visible.set(Some(result));
                }
            });
        }

        assert_eq!(visible.get(), Some(2));
    }

    /// Unmount before the adapter settles: the resolution is a no-op.
    #[test]
    fn resolution_after_close_mutates_nothing() {
        let scope = CancelScope::new();
        let token = scope.begin_flight();
        let visible: Cell<Option<u32>> = Cell::new(None);

        scope.close();
        block_on(async {
            if token.is_live() {
                visible.set(Some(7));
            }
        });

        assert_eq!(visible.get(), None);
    }
}
