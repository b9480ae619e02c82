use std::time::Duration;

use super::action::Direction;

/// A position on the game grid
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

    /// Centre cell of a square grid
    pub fn center(tile_count: usize) -> Self {
        let mid = (tile_count / 2) as i32;
        Self::new(mid, mid)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Active direction of movement; `None` until the first input lands
    pub direction: Option<Direction>,
}

impl Snake {
    /// A one-segment snake that has not started moving
    pub fn single(head: Position) -> Self {
        Self {
            body: vec![head],
            direction: None,
        }
    }

    /// Create a moving snake with its body trailing behind the head
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (back_dx, back_dy) = direction.opposite().delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction: Some(direction),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Where the head lands on the next move, if the snake is moving
    pub fn next_head(&self) -> Option<Position> {
        self.direction.map(|d| self.head().moved_in_direction(d))
    }

    /// Check if position is occupied by any segment, tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head; the tail stays when growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
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

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Buffered turn, committed at the start of the next tick
    pub pending_direction: Option<Direction>,
    /// `None` only when the snake covers the whole board
    pub food: Option<Position>,
    pub tile_count: usize,
    pub score: u32,
    /// Moves made in this game
    pub ticks: u32,
    pub tick_interval: Duration,
    pub phase: Phase,
    /// Board size waiting for the next reset
    pub pending_resize: Option<usize>,
}

impl GameState {
    /// Create a new idle game state
    pub fn new(
        snake: Snake,
        food: Option<Position>,
        tile_count: usize,
        tick_interval: Duration,
    ) -> Self {
        Self {
            snake,
            pending_direction: None,
            food,
            tile_count,
            score: 0,
            ticks: 0,
            tick_interval,
            phase: Phase::Idle,
            pending_resize: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let side = self.tile_count as i32;
        pos.x >= 0 && pos.x < side && pos.y >= 0 && pos.y < side
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Idle -> Running
    pub fn start(&mut self) -> bool {
        self.transition(Phase::Idle, Phase::Running)
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        self.transition(Phase::Running, Phase::Paused)
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> bool {
        self.transition(Phase::Paused, Phase::Running)
    }

    /// Pause when running, resume when paused, otherwise nothing
    pub fn toggle_pause(&mut self) -> bool {
        self.pause() || self.resume()
    }

    /// Buffer a turn for the next tick. Ignored unless running, and ignored
    /// when it would reverse the active direction.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        if let Some(active) = self.snake.direction {
            if active.is_opposite(direction) {
                return false;
            }
        }
        self.pending_direction = Some(direction);
        true
    }

    fn transition(&mut self, from: Phase, to: Phase) -> bool {
        if self.phase != from {
            return false;
        }
        self.phase = to;
        true
    }
}
