use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    fruit::FruitSpawner,
    state::{Position, Snake},
};

/// Type of collision that ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Lifecycle of a session. `Over` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Over,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the head reached the fruit this tick
    pub ate_fruit: bool,
    /// Collision that ended the session this tick, if any
    pub collision: Option<CollisionType>,
}

impl TickOutcome {
    pub fn terminated(&self) -> bool {
        self.collision.is_some()
    }
}

/// One round of play, from the starting snake to the first collision
///
/// There is no way back from `Over`: restarting means building a new
/// session, which gives a fresh snake, fresh fruit and no leftover growth.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    snake: Snake,
    fruit: FruitSpawner,
    status: SessionStatus,
    collision: Option<CollisionType>,
    steps: u32,
}

impl GameSession {
    /// Start a session, seeding fruit placement from the config or from entropy
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Start a session with an explicit random source
    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let snake = Snake::starting(config);
        Self::from_parts(config, snake, rng)
    }

    /// Start a session from an arbitrary snake
    ///
    /// The fruit is placed against this snake's body.
    pub fn from_parts(config: &GameConfig, snake: Snake, rng: StdRng) -> Self {
        let fruit = FruitSpawner::new(
            config.grid_size,
            config.fruit_placement,
            snake.segments(),
            rng,
        );

        debug!(
            grid_size = config.grid_size,
            fruit_x = fruit.position().x,
            fruit_y = fruit.position().y,
            "session started"
        );

        Self {
            config: config.clone(),
            snake,
            fruit,
            status: SessionStatus::Active,
            collision: None,
            steps: 0,
        }
    }

    /// Advance the simulation by one tick
    ///
    /// Order: move, resolve fruit, then check walls and the body. The body
    /// scan uses the segments as they stand right after the move.
    pub fn update(&mut self) -> TickOutcome {
        if self.status == SessionStatus::Over {
            return TickOutcome::default();
        }

        self.snake.move_forward();
        self.steps += 1;

        let ate_fruit = self.check_fruit();
        let collision = self.check_collision();

        if let Some(cause) = collision {
            self.status = SessionStatus::Over;
            self.collision = Some(cause);
            info!(
                score = self.score(),
                steps = self.steps,
                cause = ?cause,
                "game over"
            );
        }

        TickOutcome {
            ate_fruit,
            collision,
        }
    }

    fn check_fruit(&mut self) -> bool {
        if self.snake.head() != self.fruit.position() {
            return false;
        }

        self.fruit.randomize(self.snake.segments());
        self.snake.grow_on_next_move();
        debug!(
            length = self.snake.len(),
            fruit_x = self.fruit.position().x,
            fruit_y = self.fruit.position().y,
            "fruit eaten"
        );
        true
    }

    fn check_collision(&self) -> Option<CollisionType> {
        let head = self.snake.head();

        if !head.is_within(self.config.grid_size) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Request a new heading; ignored once the session is over
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.status == SessionStatus::Over {
            return false;
        }
        self.snake.steer(direction)
    }

    /// Fruit eaten so far, derived from the snake's length
    pub fn score(&self) -> usize {
        self.snake.len() - self.snake.initial_length()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// What ended the session, once it is over
    pub fn collision(&self) -> Option<CollisionType> {
        self.collision
    }

    /// Ticks played
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Position {
        self.fruit.position()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: &GameConfig) -> GameSession {
        GameSession::with_rng(config, StdRng::seed_from_u64(1))
    }

    /// Session with a hand-placed snake and the fruit moved out of its path
    fn session_with_snake(config: &GameConfig, snake: Snake) -> GameSession {
        let mut session = GameSession::from_parts(config, snake, StdRng::seed_from_u64(1));
        let parked = Position::new(0, config.grid_size as i32 - 1);
        session.fruit = FruitSpawner::new(
            config.grid_size,
            config.fruit_placement,
            &all_cells_except(config.grid_size, parked),
            StdRng::seed_from_u64(1),
        );
        session
    }

    fn all_cells_except(grid_size: usize, keep: Position) -> Vec<Position> {
        let size = grid_size as i32;
        (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|p| *p != keep)
            .collect()
    }

    #[test]
    fn test_new_session() {
        let session = seeded(&GameConfig::default());

        assert!(session.is_active());
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.steps(), 0);
        assert_eq!(session.snake().len(), 3);
        assert_eq!(session.collision(), None);
        assert!(!session.snake().occupies(session.fruit()));
    }

    #[test]
    fn test_basic_movement() {
        let config = GameConfig::default();
        let mut session = session_with_snake(&config, Snake::starting(&config));

        let outcome = session.update();

        assert!(!outcome.terminated());
        assert!(!outcome.ate_fruit);
        assert_eq!(session.steps(), 1);
        assert_eq!(
            session.snake().segments(),
            &[Position::new(6, 10), Position::new(5, 10), Position::new(4, 10)]
        );
    }

    #[test]
    fn test_fruit_consumption() {
        let config = GameConfig::small();
        let mut session = seeded(&config);

        let target = session
            .snake()
            .head()
            .moved_in_direction(session.snake().direction());
        session.fruit = FruitSpawner::new(
            config.grid_size,
            config.fruit_placement,
            &all_cells_except(config.grid_size, target),
            StdRng::seed_from_u64(3),
        );
        assert_eq!(session.fruit(), target);

        let outcome = session.update();

        assert!(outcome.ate_fruit);
        assert!(session.snake().pending_growth());
        assert_eq!(session.snake().len(), 3);
        assert_ne!(session.fruit(), target);
        assert!(!session.snake().occupies(session.fruit()));

        // Growth lands on the following move
        session.update();
        assert_eq!(session.snake().len(), 4);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_wall_collision() {
        let config = GameConfig::default();
        let snake = Snake::new(Position::new(19, 10), Direction::Right, 3);
        let mut session = session_with_snake(&config, snake);

        let outcome = session.update();

        assert_eq!(session.snake().head(), Position::new(20, 10));
        assert!(outcome.terminated());
        assert!(!session.is_active());
        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert_eq!(session.collision(), Some(CollisionType::Wall));
    }

    #[test]
    fn test_wall_collision_top_left() {
        let config = GameConfig::small();
        let snake = Snake::new(Position::new(3, 0), Direction::Up, 3);
        let mut session = session_with_snake(&config, snake);

        assert_eq!(session.update().collision, Some(CollisionType::Wall));
    }

    #[test]
    fn test_self_collision() {
        let config = GameConfig::small();

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut session = session_with_snake(&config, snake);

        // Down: (5,6), (5,5), (4,5), (3,5), (2,5)
        session.steer(Direction::Down);
        assert!(!session.update().terminated());
        // Left: (4,6), (5,6), (5,5), (4,5), (3,5)
        session.steer(Direction::Left);
        assert!(!session.update().terminated());
        // Up: (4,5) is segments[3]
        session.steer(Direction::Up);
        let outcome = session.update();

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert!(!session.is_active());
    }

    #[test]
    fn test_head_on_segment_two() {
        let config = GameConfig::small();

        // Heading straight back into the neck
        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
            ],
            Direction::Left,
        )
        .unwrap();
        let mut session = session_with_snake(&config, snake);

        let outcome = session.update();

        assert_eq!(session.snake().head(), session.snake().segments()[2]);
        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert!(!session.is_active());
    }

    #[test]
    fn test_tail_cell_is_free_after_move() {
        let config = GameConfig::small();

        // Head chases the tail round a 2x2 square
        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 4),
                Position::new(4, 4),
                Position::new(4, 5),
            ],
            Direction::Left,
        )
        .unwrap();
        let mut session = session_with_snake(&config, snake);

        let outcome = session.update();

        assert_eq!(session.snake().head(), Position::new(4, 5));
        assert_eq!(outcome.collision, None);
        assert!(session.is_active());
    }

    #[test]
    fn test_growth_keeps_tail_for_self_collision() {
        let config = GameConfig::small();

        // Same square, but growth is pending so the tail stays put
        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 4),
                Position::new(4, 4),
                Position::new(4, 5),
            ],
            Direction::Left,
        )
        .unwrap();
        let mut session = session_with_snake(&config, snake);
        session.snake.grow_on_next_move();

        let outcome = session.update();

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_no_collision_on_free_move() {
        let config = GameConfig::small();
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        let mut session = session_with_snake(&config, snake);

        session.steer(Direction::Up);
        assert_eq!(session.update(), TickOutcome::default());
        assert!(session.is_active());
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut session = seeded(&GameConfig::small());

        assert!(!session.steer(Direction::Left));
        assert_eq!(session.snake().direction(), Direction::Right);
    }

    #[test]
    fn test_terminated_session_no_update() {
        let config = GameConfig::default();
        let snake = Snake::new(Position::new(19, 10), Direction::Right, 3);
        let mut session = session_with_snake(&config, snake);
        session.update();
        assert!(!session.is_active());

        let steps_before = session.steps();
        let snake_before = session.snake().clone();
        let outcome = session.update();

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(session.steps(), steps_before);
        assert_eq!(session.snake(), &snake_before);
        assert_eq!(session.status(), SessionStatus::Over);
        assert!(!session.steer(Direction::Up));
    }

    #[test]
    fn test_score_tracks_length() {
        let config = GameConfig::default();
        let mut session = session_with_snake(&config, Snake::starting(&config));

        for _ in 0..3 {
            session.snake.grow_on_next_move();
            session.update();
            assert_eq!(
                session.score(),
                session.snake().len() - session.snake().initial_length()
            );
        }
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let config = GameConfig::default().with_seed(99);
        let a = GameSession::new(&config);
        let b = GameSession::new(&config);
        assert_eq!(a.fruit(), b.fruit());
    }
}
