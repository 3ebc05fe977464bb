//! Push notification of new snapshots.

use crate::game::GameState;
use core::fmt;

/// Handle returned by [`crate::game::Game::subscribe`]; pass it back to
/// unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Observer = Box<dyn FnMut(&GameState)>;

/// Registered observers, called in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_token: u64,
    observers: Vec<(Subscription, Observer)>,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscribers({})", self.observers.len())
    }
}

impl Subscribers {
    pub(crate) fn register(&mut self, observer: Observer) -> Subscription {
        let token = Subscription(self.next_token);
        self.next_token += 1;
        self.observers.push((token, observer));
        token
    }

    /// Returns false when the handle was already gone.
    pub(crate) fn unregister(&mut self, token: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(t, _)| *t != token);
        self.observers.len() != before
    }

    pub(crate) fn broadcast(&mut self, state: &GameState) {
        for (_, observer) in &mut self.observers {
            observer(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn register_broadcast_unregister() {
        let mut subs = Subscribers::default();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let token = subs.register(Box::new(move |_| h.set(h.get() + 1)));
        let state = GameState::initial();

        subs.broadcast(&state);
        subs.broadcast(&state);
        assert_eq!(hits.get(), 2);

        assert!(subs.unregister(token));
        assert!(!subs.unregister(token));
        subs.broadcast(&state);
        assert_eq!(hits.get(), 2);
        assert_eq!(subs.len(), 0);
    }

    #[test]
    fn tokens_are_not_reused() {
        let mut subs = Subscribers::default();
        let a = subs.register(Box::new(|_| {}));
        subs.unregister(a);
        let b = subs.register(Box::new(|_| {}));
        assert_ne!(a, b);
    }
}
