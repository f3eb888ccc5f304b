use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::input::{Direction, direction_change_is_valid};

#[derive(Debug, Default)]
struct SteeringSlots {
    pending: AtomicU8,
    committed: AtomicU8,
    heading: AtomicU8,
    over: AtomicBool,
}

/// Shared pending-direction register for one simulation.
///
/// Input contexts (a key callback, another thread) write requests through
/// [`Steering::request`]; the owning simulation reads the slot once per tick.
/// There is exactly one pending slot: the last accepted request before a tick
/// wins and nothing is queued.
#[derive(Debug, Clone, Default)]
pub struct Steering {
    slots: Arc<SteeringSlots>,
}

impl Steering {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a direction request. Returns whether it was accepted.
    ///
    /// Requests are dropped once the game is over, and a request that
    /// reverses the heading is dropped. A stop in between does not clear
    /// the heading, so stop-then-reverse is rejected too.
    pub fn request(&self, direction: Direction) -> bool {
        if self.slots.over.load(Ordering::Acquire) {
            return false;
        }

        if !direction_change_is_valid(self.heading(), direction) {
            return false;
        }

        self.slots
            .pending
            .store(direction.to_bits(), Ordering::Release);
        true
    }

    /// Returns the most recently accepted request.
    #[must_use]
    pub fn pending(&self) -> Direction {
        Direction::from_bits(self.slots.pending.load(Ordering::Acquire))
    }

    /// Returns the direction applied during the most recent tick.
    #[must_use]
    pub fn committed(&self) -> Direction {
        Direction::from_bits(self.slots.committed.load(Ordering::Acquire))
    }

    /// Returns the last non-`None` committed direction.
    #[must_use]
    pub fn heading(&self) -> Direction {
        Direction::from_bits(self.slots.heading.load(Ordering::Acquire))
    }

    /// Promotes the pending request to the committed direction and returns it.
    ///
    /// A pending reversal can only appear when a writer raced with the
    /// previous commit; it is discarded and the committed direction stays.
    /// The discard only replaces the slot if no newer request landed.
    pub(crate) fn commit(&self) -> Direction {
        let committed = self.committed();
        let pending = self.pending();

        if !direction_change_is_valid(self.heading(), pending) {
            let _ = self.slots.pending.compare_exchange(
                pending.to_bits(),
                committed.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            return committed;
        }

        self.slots
            .committed
            .store(pending.to_bits(), Ordering::Release);
        if pending != Direction::None {
            self.slots
                .heading
                .store(pending.to_bits(), Ordering::Release);
        }
        pending
    }

    pub(crate) fn close(&self) {
        self.slots.over.store(true, Ordering::Release);
    }

    /// Returns true once the owning simulation has ended.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.slots.over.load(Ordering::Acquire)
    }
}
