//! Events the board emits for presentation, audio and UI layers.
//!
//! Handlers run synchronously in registration order, before the call that
//! triggered them returns.

use crate::detector::MatchResult;
use crate::gravity::TileMove;
use crate::grid::Position;
use crate::score::ScoreChange;
use crate::tile::{ColorId, TileId};
use crate::validator::SwapRejection;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// Initial generation and resolution finished.
    BoardReady,
    TileSelected { pos: Position },
    TileDeselected { pos: Position },
    SwapRejected {
        a: Position,
        b: Position,
        reason: SwapRejection,
    },
    /// Both tiles already occupy their new slots; animate them over `duration`.
    TilesSwapped {
        a: Position,
        b: Position,
        duration: Duration,
    },
    /// A resolution pass found matches. `combo_level` starts at 1.
    MatchesFound {
        matches: MatchResult,
        combo_level: u32,
    },
    TilesDestroying { tiles: Vec<(TileId, Position)> },
    TilesFell {
        moves: Vec<TileMove>,
        duration: Duration,
    },
    TilesSpawned {
        tiles: Vec<(TileId, Position, ColorId)>,
        duration: Duration,
    },
    ScoreChanged(ScoreChange),
    /// The board is stable again.
    ResolutionFinished { combo_level: u32, points: u32 },
}

/// Sound cues. The board works without one; cues are then dropped.
pub trait AudioFeedback {
    /// One call per resolution pass, with the pass's combo level.
    fn combo(&mut self, level: u32);

    /// A legal swap was rejected because it formed no match.
    fn error(&mut self);
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Handler = Box<dyn FnMut(&BoardEvent)>;

/// Ordered list of event handlers.
#[derive(Default)]
pub struct Observers {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u32,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&BoardEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sid, _)| *sid != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: &BoardEvent) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            observers.subscribe(move |_| log.borrow_mut().push(tag));
        }
        observers.emit(&BoardEvent::BoardReady);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();
        let c = Rc::clone(&count);
        let id = observers.subscribe(move |_| *c.borrow_mut() += 1);
        observers.emit(&BoardEvent::BoardReady);
        assert_eq!(observers.len(), 1);
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.emit(&BoardEvent::BoardReady);
        assert_eq!(*count.borrow(), 1);
        assert!(observers.is_empty());
    }
}
