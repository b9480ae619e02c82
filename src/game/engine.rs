use super::{
    config::GameConfig,
    state::{CollisionType, GameState, Phase, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Random draws tried before falling back to scanning for free cells.
const REJECTION_ATTEMPTS: usize = 64;

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed
    Inactive,
    /// Running, but no direction has been given yet
    Waiting,
    /// The snake moved without growing
    Moved,
    /// The snake ate and grew by one segment
    Ate,
    /// The snake hit a wall or itself; the game is over
    Collided(CollisionType),
    /// The snake filled the board; the game is over
    Cleared,
}

impl TickOutcome {
    /// Whether this tick ended the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Collided(_) | TickOutcome::Cleared)
    }
}

/// The game engine that handles all game logic
///
/// The engine only owns configuration and randomness. All mutable game data
/// lives in [`GameState`], which is passed in for every transition.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh idle state on the configured board
    pub fn reset(&mut self) -> GameState {
        self.fresh_state(self.config.tile_count())
    }

    /// Return `state` to idle, applying any board size queued by `resize`
    pub fn reset_state(&mut self, state: &mut GameState) {
        let tile_count = state.pending_resize.take().unwrap_or(state.tile_count);
        *state = self.fresh_state(tile_count);
    }

    /// Reset followed by start; only offered once a game has ended
    pub fn play_again(&mut self, state: &mut GameState) -> bool {
        if !state.is_over() {
            return false;
        }
        self.reset_state(state);
        state.start()
    }

    /// Advance the game by one step
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome::Inactive;
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = Some(direction);
        }

        let Some(new_head) = state.snake.next_head() else {
            return TickOutcome::Waiting;
        };

        if let Some(collision) = self.check_collision(state, new_head) {
            state.phase = Phase::GameOver;
            return TickOutcome::Collided(collision);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.ticks += 1;

        if !ate_food {
            return TickOutcome::Moved;
        }

        state.score += self.config.food_score;
        state.tick_interval = state
            .tick_interval
            .saturating_sub(self.config.interval_step())
            .max(self.config.min_interval());
        state.food = self.spawn_food(&state.snake, state.tile_count);

        if state.food.is_none() {
            state.phase = Phase::GameOver;
            return TickOutcome::Cleared;
        }

        TickOutcome::Ate
    }

    /// Fit the board to a new tile count.
    ///
    /// Takes effect immediately while idle and returns true. Otherwise the
    /// size is queued for the next reset.
    pub fn resize(&mut self, state: &mut GameState, tile_count: usize) -> bool {
        if state.phase != Phase::Idle {
            state.pending_resize = (tile_count != state.tile_count).then_some(tile_count);
            return false;
        }

        state.pending_resize = None;
        if tile_count == state.tile_count {
            return false;
        }
        state.tile_count = tile_count;

        let limit = tile_count as i32;
        let mid = (tile_count / 2) as i32;
        let head = &mut state.snake.body[0];
        if head.x >= limit {
            head.x = mid;
        }
        if head.y >= limit {
            head.y = mid;
        }

        let needs_food = state
            .food
            .is_none_or(|food| !state.is_in_bounds(food) || state.is_occupied_by_snake(food));
        if needs_food {
            state.food = self.spawn_food(&state.snake, tile_count);
        }

        true
    }

    fn fresh_state(&mut self, tile_count: usize) -> GameState {
        let snake = Snake::single(Position::center(tile_count));
        let food = self.spawn_food(&snake, tile_count);

        GameState::new(snake, food, tile_count, self.config.initial_interval())
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random cell the snake does not cover.
    ///
    /// Returns `None` only when no such cell exists.
    fn spawn_food(&mut self, snake: &Snake, tile_count: usize) -> Option<Position> {
        let cells = tile_count * tile_count;
        if cells == 0 {
            return None;
        }

        if snake.len() * 2 <= cells {
            for _ in 0..REJECTION_ATTEMPTS {
                let x = self.rng.gen_range(0..tile_count) as i32;
                let y = self.rng.gen_range(0..tile_count) as i32;
                let pos = Position::new(x, y);

                if !snake.occupies(pos) {
                    return Some(pos);
                }
            }
        }

        let free: Vec<Position> = (0..tile_count as i32)
            .flat_map(|y| (0..tile_count as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use std::time::Duration;

    fn seeded(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(7))
    }

    fn running(snake: Snake, food: Position, tile_count: usize) -> GameState {
        let mut state =
            GameState::new(snake, Some(food), tile_count, Duration::from_millis(150));
        state.start();
        state
    }

    #[test]
    fn test_reset() {
        let mut engine = seeded(GameConfig::default());
        let state = engine.reset();

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.snake.direction, None);
        assert_eq!(state.tick_interval, Duration::from_millis(150));

        let food = state.food.unwrap();
        assert!(state.is_in_bounds(food));
        assert!(!state.is_occupied_by_snake(food));
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut engine = seeded(GameConfig::default());
        let mut state = running(
            Snake::new(Position::new(4, 4), Direction::Right, 4),
            Position::new(0, 0),
            20,
        );
        state.score = 70;
        state.tick_interval = Duration::from_millis(90);
        state.pending_direction = Some(Direction::Up);
        state.phase = Phase::GameOver;

        engine.reset_state(&mut state);

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.direction, None);
        assert_eq!(state.pending_direction, None);
        assert_eq!(state.tick_interval, Duration::from_millis(150));
    }

    #[test]
    fn test_idle_tick_is_inactive() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        let before = state.clone();

        assert_eq!(engine.tick(&mut state), TickOutcome::Inactive);
        assert_eq!(state, before);
    }

    #[test]
    fn test_waits_for_first_direction() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.start();
        let head = state.snake.head();

        assert_eq!(engine.tick(&mut state), TickOutcome::Waiting);
        assert_eq!(state.snake.head(), head);
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_first_move_right() {
        let mut engine = seeded(GameConfig::default());
        let mut state = running(Snake::single(Position::new(10, 10)), Position::new(0, 0), 20);

        assert!(state.set_pending_direction(Direction::Right));
        assert_eq!(engine.tick(&mut state), TickOutcome::Moved);

        assert_eq!(state.snake.body, vec![Position::new(11, 10)]);
        assert_eq!(state.snake.direction, Some(Direction::Right));
        assert_eq!(state.pending_direction, None);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded(GameConfig::default());
        let mut state = running(
            Snake::new(Position::new(5, 5), Direction::Right, 2),
            Position::new(6, 5),
            20,
        );

        let result = engine.tick(&mut state);

        assert_eq!(result, TickOutcome::Ate);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.tick_interval, Duration::from_millis(148));

        let food = state.food.unwrap();
        assert!(!state.is_occupied_by_snake(food));
        assert!(state.is_in_bounds(food));
    }

    #[test]
    fn test_interval_floor() {
        let config = GameConfig {
            interval_step_ms: 7,
            ..Default::default()
        };
        let mut engine = seeded(config);
        let mut state = running(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Position::new(6, 5),
            20,
        );
        state.tick_interval = Duration::from_millis(53);

        assert_eq!(engine.tick(&mut state), TickOutcome::Ate);
        assert_eq!(state.tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = seeded(GameConfig::small());
        let snake = Snake::new(Position::new(0, 5), Direction::Left, 3);
        let mut state = running(snake.clone(), Position::new(5, 5), 10);

        let result = engine.tick(&mut state);

        assert_eq!(result, TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.snake.body, snake.body);
    }

    #[test]
    fn test_wall_collision_far_edges() {
        let mut engine = seeded(GameConfig::small());
        let mut state = running(Snake::single(Position::new(9, 9)), Position::new(0, 0), 10);

        state.set_pending_direction(Direction::Down);
        assert_eq!(
            engine.tick(&mut state),
            TickOutcome::Collided(CollisionType::Wall)
        );
    }

    #[test]
    fn test_self_collision_with_tail() {
        let mut engine = seeded(GameConfig::small());

        // Body: (5,5), (4,5), (3,5), (2,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        let mut state = running(snake, Position::new(8, 8), 10);

        // (6,5), (5,5), (4,5), (3,5)
        engine.tick(&mut state);
        // (6,6), (6,5), (5,5), (4,5)
        state.set_pending_direction(Direction::Down);
        engine.tick(&mut state);
        // (5,6), (6,6), (6,5), (5,5)
        state.set_pending_direction(Direction::Left);
        engine.tick(&mut state);
        // Up lands on the tail, which has not moved away yet
        state.set_pending_direction(Direction::Up);
        let before = state.snake.clone();
        let result = engine.tick(&mut state);

        assert_eq!(result, TickOutcome::Collided(CollisionType::SelfCollision));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.snake, Snake { direction: Some(Direction::Up), ..before });
    }

    #[test]
    fn test_self_collision_mid_body() {
        let mut engine = seeded(GameConfig::small());
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = running(snake, Position::new(0, 0), 10);

        for turn in [Direction::Down, Direction::Left, Direction::Up] {
            state.set_pending_direction(turn);
            if turn == Direction::Up {
                assert_eq!(
                    engine.tick(&mut state),
                    TickOutcome::Collided(CollisionType::SelfCollision)
                );
            } else {
                assert_eq!(engine.tick(&mut state), TickOutcome::Moved);
            }
        }
        assert!(state.is_over());
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = seeded(GameConfig::small());
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut state = running(snake, Position::new(0, 0), 10);

        assert!(!state.set_pending_direction(Direction::Left));
        engine.tick(&mut state);

        assert_eq!(state.snake.direction, Some(Direction::Right));
        assert_eq!(state.snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut engine = seeded(GameConfig::small());
        let mut state = running(Snake::single(Position::new(0, 0)), Position::new(5, 5), 10);
        state.set_pending_direction(Direction::Up);
        engine.tick(&mut state);
        assert!(state.is_over());

        let frozen = state.clone();
        for _ in 0..5 {
            assert_eq!(engine.tick(&mut state), TickOutcome::Inactive);
        }
        assert!(!state.set_pending_direction(Direction::Right));
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_board_cleared() {
        let mut engine = seeded(GameConfig::new(40, 20));
        let snake = Snake {
            body: vec![Position::new(0, 1), Position::new(1, 1), Position::new(1, 0)],
            direction: Some(Direction::Up),
        };
        let mut state = running(snake, Position::new(0, 0), 2);

        let result = engine.tick(&mut state);

        assert_eq!(result, TickOutcome::Cleared);
        assert!(result.is_terminal());
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 10);
        assert_eq!(state.food, None);
        assert!(state.is_over());
    }

    #[test]
    fn test_food_scan_when_crowded() {
        let mut engine = seeded(GameConfig::default());
        // 3x3 board with only (2,2) free
        let snake = Snake {
            body: vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 2),
            ],
            direction: None,
        };

        assert_eq!(engine.spawn_food(&snake, 3), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_random_walk_invariants() {
        let mut engine = seeded(GameConfig::small());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let mut state = engine.reset();
            state.start();

            for _ in 0..400 {
                let turn = Direction::ALL[rng.gen_range(0..4)];
                state.set_pending_direction(turn);

                let len_before = state.snake.len();
                let score_before = state.score;

                match engine.tick(&mut state) {
                    TickOutcome::Ate => {
                        assert_eq!(state.snake.len(), len_before + 1);
                        assert_eq!(state.score, score_before + 10);
                    }
                    TickOutcome::Moved | TickOutcome::Waiting => {
                        assert_eq!(state.snake.len(), len_before);
                        assert_eq!(state.score, score_before);
                    }
                    TickOutcome::Collided(_) | TickOutcome::Cleared => break,
                    TickOutcome::Inactive => unreachable!(),
                }

                if let Some(food) = state.food {
                    assert!(!state.is_occupied_by_snake(food));
                }
                assert!(state.tick_interval >= Duration::from_millis(50));
            }
        }
    }

    #[test]
    fn test_resize_while_idle() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        assert_eq!(state.snake.head(), Position::new(10, 10));

        assert!(engine.resize(&mut state, 8));

        assert_eq!(state.tile_count, 8);
        assert_eq!(state.snake.head(), Position::new(4, 4));
        assert!(state.is_in_bounds(state.food.unwrap()));
        assert!(!engine.resize(&mut state, 8));
    }

    #[test]
    fn test_resize_deferred_until_reset() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.start();

        assert!(!engine.resize(&mut state, 12));
        assert_eq!(state.tile_count, 20);
        assert_eq!(state.pending_resize, Some(12));

        engine.reset_state(&mut state);
        assert_eq!(state.tile_count, 12);
        assert_eq!(state.snake.head(), Position::new(6, 6));
        assert_eq!(state.pending_resize, None);
    }

    #[test]
    fn test_play_again() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.phase = Phase::GameOver;
        state.score = 30;

        assert!(engine.play_again(&mut state));
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);

        // Already running: nothing to play again
        assert!(!engine.play_again(&mut state));
        assert_eq!(state.phase, Phase::Running);
    }
}
