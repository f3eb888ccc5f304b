use std::collections::HashSet;

use serde::Serialize;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a head that has just crossed a wall can still
/// be represented in the final snapshot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body, head first, stored in a buffer sized once for the whole board.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Position>,
    vacated_tail: Position,
    max_len: usize,
}

impl Snake {
    /// Creates a one-cell snake at `start` with room for `capacity` segments.
    #[must_use]
    pub fn new(start: Position, capacity: usize) -> Self {
        let max_len = capacity.max(1);
        let mut body = Vec::with_capacity(max_len);
        body.push(start);

        Self {
            body,
            vacated_tail: start,
            max_len,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, capacity: usize) -> Self {
        assert!(!segments.is_empty(), "snake needs at least a head");

        let max_len = capacity.max(segments.len());
        let mut body = Vec::with_capacity(max_len);
        body.extend(segments);
        let vacated_tail = body[body.len() - 1];

        Self {
            body,
            vacated_tail,
            max_len,
        }
    }

    /// Moves every segment into its predecessor's cell, then moves the head.
    ///
    /// The cell the tail leaves is remembered so [`Snake::grow`] can re-occupy it.
    pub fn advance(&mut self, direction: Direction) {
        self.vacated_tail = self.tail();

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        self.body[0] = self.body[0].stepped(direction);
    }

    /// Appends a segment on the cell the tail vacated during the last advance.
    ///
    /// # Panics
    ///
    /// Panics if the body is already at capacity; the game ends before that.
    pub fn grow(&mut self) {
        assert!(
            self.body.len() < self.max_len,
            "snake body exceeded board capacity ({})",
            self.max_len
        );
        self.body.push(self.vacated_tail);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns true when two segments share a cell.
    #[must_use]
    pub fn has_overlapping_segments(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        !self.body.iter().all(|segment| seen.insert(*segment))
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the number of segments the buffer was sized for.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_len
    }

    /// Borrows body segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Position] {
        &self.body
    }
}
