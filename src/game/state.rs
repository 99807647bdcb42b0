use super::{config::GameConfig, direction::Direction};

/// A position on the game grid
///
/// Coordinates are signed so a head that has just left the grid can still be
/// represented until the session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Whether this position lies inside a square grid of the given size
    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake's body and heading
///
/// Segments are ordered head first. Length never drops below the initial
/// length: each move adds one head and removes at most one tail segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    /// Direction of the last completed move, used by the reversal guard
    last_moved: Direction,
    pending_growth: bool,
    initial_length: usize,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    ///
    /// Body segments are laid out behind the head, opposite to `direction`.
    /// A `length` of zero is treated as one: a snake always has a head.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let mut body = Vec::with_capacity(length);
        body.push(head);

        let (dx, dy) = direction.opposite().delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(dx, dy));
        }

        Self {
            body,
            direction,
            last_moved: direction,
            pending_growth: false,
            initial_length: length,
        }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// The segments are taken as given, including coiled or reversed shapes.
    /// Returns `None` for an empty body.
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            initial_length: segments.len(),
            body: segments,
            direction,
            last_moved: direction,
            pending_growth: false,
        })
    }

    /// The starting snake for a configuration: facing right, centred vertically
    ///
    /// With the default configuration this is `[(5,10), (4,10), (3,10)]`.
    pub fn starting(config: &GameConfig) -> Self {
        let length = config.initial_snake_length;
        let head = Position::new(length as i32 + 2, (config.grid_size / 2) as i32);
        Self::new(head, Direction::Right, length)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Current heading
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn initial_length(&self) -> usize {
        self.initial_length
    }

    pub fn pending_growth(&self) -> bool {
        self.pending_growth
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Request a new heading
    ///
    /// Rejects the exact inverse of the current heading, and also the
    /// inverse of the direction of the last move, so any number of requests
    /// between two moves can never turn the head back into the neck.
    /// Returns whether the request was accepted.
    pub fn steer(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) || self.last_moved.is_opposite(requested) {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Advance one cell in the current direction
    ///
    /// The new head is prepended. The tail is dropped unless growth is
    /// pending, in which case the snake gets one segment longer and the
    /// pending flag is cleared. No bounds checking happens here.
    pub fn move_forward(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop();
        }

        self.last_moved = self.direction;
    }

    /// Grow by exactly one segment on the next move
    ///
    /// Calling this more than once before that move has no further effect.
    pub fn grow_on_next_move(&mut self) {
        self.pending_growth = true;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
