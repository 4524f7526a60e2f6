//! Outcome notifications delivered by the turn engine.
//!
//! Events are pushed synchronously to every subscribed observer, in the order
//! they happen, before the triggering engine call returns.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::common::Coord;
use crate::game::Turn;
use crate::ship::{ShipId, ShipType};

/// Whose waters an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Side {
    /// The human player's board.
    Player,
    /// The computer's board.
    Opponent,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Something observable that happened during an engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GameEvent {
    /// Play has begun; the player fleet is frozen.
    GameStarted,
    /// A shot landed on a ship on `side`'s board.
    CellHit { side: Side, coord: Coord },
    /// A shot hit open water on `side`'s board.
    CellMiss { side: Side, coord: Coord },
    /// The last intact segment of a ship was hit.
    ShipSunk { side: Side, ship: ShipId, ship_type: ShipType },
    /// A hidden ship on `side`'s board became visible.
    ShipRevealed { side: Side, ship: ShipId },
    /// The turn passed to the other side.
    TurnChanged(Turn),
    /// Terminal outcome; sent exactly once per game.
    GameOver { player_wins: bool },
}

/// Receiver of engine notifications.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Observer that keeps every event it receives. Clones share one log, so a
/// host can subscribe a clone and read the original.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        core::mem::take(&mut *self.events.borrow_mut())
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(*event);
    }
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(usize);

/// The engine's list of subscribers.
#[derive(Default)]
pub struct Observers {
    next_id: usize,
    entries: Vec<(ObserverId, Box<dyn GameObserver>)>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Returns `true` if `id` was subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        for (_, observer) in self.entries.iter_mut() {
            observer.on_event(&event);
        }
    }
}

impl core::fmt::Debug for Observers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Observers({})", self.entries.len())
    }
}
