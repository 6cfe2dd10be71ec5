use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Ordering is by `x`, then `y`. Apple placement relies on that order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`. Never wraps.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }
}

/// Head, trailing body and facing of the snake.
///
/// The body is ordered from the segment next to the head to the tail and
/// does not contain the head itself.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    body: Vec<Position>,
    pending_growth: Position,
    direction: Direction,
}

impl Snake {
    /// Creates a bodiless snake at `start` facing right.
    ///
    /// The first growth extends into the cell left of `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self::from_segments(start, Vec::new(), Direction::Right)
    }

    /// Creates a snake from an explicit head and body (nearest segment first).
    ///
    /// The pending growth cell is the one behind the tail, opposite `direction`.
    #[must_use]
    pub fn from_segments(head: Position, body: Vec<Position>, direction: Direction) -> Self {
        let tail = body.last().copied().unwrap_or(head);
        Self {
            head,
            body,
            pending_growth: tail.stepped(direction.opposite()),
            direction,
        }
    }

    /// Turns the snake unless `direction` reverses the current facing.
    ///
    /// Returns whether the facing was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Moves the head one cell, dragging the body behind it.
    pub fn advance(&mut self) {
        self.follow_head();
        self.head = self.head.stepped(self.direction);
    }

    /// Shifts every segment into its predecessor's cell and records the
    /// vacated tail cell as the next growth target.
    fn follow_head(&mut self) {
        match self.body.last().copied() {
            Some(tail) => {
                self.pending_growth = tail;
                for index in (1..self.body.len()).rev() {
                    self.body[index] = self.body[index - 1];
                }
                self.body[0] = self.head;
            }
            None => self.pending_growth = self.head,
        }
    }

    /// Appends the pending growth cell to the tail.
    pub fn grow(&mut self) {
        self.body.push(self.pending_growth);
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Trailing segments, nearest to the head first.
    #[must_use]
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    #[must_use]
    pub fn pending_growth(&self) -> Position {
        self.pending_growth
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Every occupied cell, head first then body in order.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.body.len() + 1);
        positions.push(self.head);
        positions.extend_from_slice(&self.body);
        positions
    }

    /// Returns true if the head or any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.body.contains(&position)
    }

    /// Returns true if the head shares a cell with any body segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Number of body segments, excluding the head.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when only the head exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
