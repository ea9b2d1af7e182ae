use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Cell position in playfield units.
///
/// Cells sit on a grid whose pitch is the segment size, so a live snake
/// only ever occupies multiples of it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside `[0, width) × [0, height)`.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the position `step` units away along `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * step,
            y: self.y + dy * step,
        }
    }
}

/// Mutable snake state: body, heading and pending growth.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    segment_size: u16,
    allow_reversal: bool,
    /// The last body entry is a stacked copy of the tail, dropped by the next move.
    grow: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction, segment_size: u16) -> Self {
        Self::from_segments(vec![start], direction, segment_size)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction, segment_size: u16) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            segment_size,
            allow_reversal: false,
            grow: false,
        }
    }

    /// Lets `set_direction` accept the exact opposite of the current direction.
    #[must_use]
    pub fn allowing_reversal(mut self, allow: bool) -> Self {
        self.allow_reversal = allow;
        self
    }

    /// Sets the direction used by the next move.
    ///
    /// Unless reversal is allowed, the exact opposite of the current
    /// direction is ignored and `false` is returned. Several calls between
    /// moves each check against the direction left by the previous call.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.allow_reversal && !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.direction = direction;
        true
    }

    /// Adds one segment by stacking a copy of the tail.
    ///
    /// The copy shares the tail's cell until the next move, which leaves it
    /// behind instead of the tail. Further calls before that move are absorbed.
    pub fn grow(&mut self) {
        if self.grow {
            return;
        }

        let tail = self.tail();
        self.body.push_back(tail);
        self.grow = true;
    }

    /// Returns true while a stacked growth segment waits for the next move.
    #[must_use]
    pub fn growth_pending(&self) -> bool {
        self.grow
    }

    /// Advances one cell along the current direction.
    pub fn move_forward(&mut self) {
        let next_head = self.next_head_position();
        self.body.push_front(next_head);
        let _ = self.body.pop_back();
        self.grow = false;
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().stepped(self.direction, i32::from(self.segment_size))
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    ///
    /// A stacked growth copy is the same segment as the tail, not a new one.
    #[must_use]
    pub fn collides_with_itself(&self) -> bool {
        let head = self.head();
        let distinct = self.body.len() - usize::from(self.growth_pending());
        self.body
            .iter()
            .take(distinct)
            .skip(1)
            .any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction the next move will use.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn segment_size(&self) -> u16 {
        self.segment_size
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }

    /// Returns a copy of the body, head first.
    #[must_use]
    pub fn body(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }
}
