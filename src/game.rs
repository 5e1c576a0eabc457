//! Core game state and the timed gravity loop

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::score::Score;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Drop interval while the soft-drop control is released
pub const NORMAL_DROP: Duration = Duration::from_millis(1000);
/// Drop interval while the soft-drop control is held
pub const SOFT_DROP: Duration = Duration::from_millis(50);

/// Dimensions and timing for a game session
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub normal_drop: Duration,
    pub soft_drop: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: crate::board::BOARD_WIDTH,
            height: crate::board::BOARD_HEIGHT,
            normal_drop: NORMAL_DROP,
            soft_drop: SOFT_DROP,
        }
    }
}

/// Discrete input commands the game accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
}

/// Change notifications for the presentation layer.
///
/// The core never touches the display; it reports what happened on a tick
/// and the caller decides what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LinesCleared { count: u32, points: u64 },
    /// A freshly spawned piece collided at the spawn position. Board and
    /// score have already been reset; `final_score` is the pre-reset value.
    GameOver { final_score: u64 },
}

/// The game state aggregate: board, active piece, score and drop timing,
/// all mutated only through its methods.
pub struct Game {
    pub board: Board,
    pub piece: ActivePiece,
    pub score: Score,
    config: GameConfig,
    drop_interval: Duration,
    accumulated: Duration,
    last_tick: Option<Duration>,
    rng: ChaCha8Rng,
}

impl Game {
    /// Create a game with a random seed
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Create a game with a fixed seed for a reproducible piece sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            board: Board::new(config.width, config.height),
            piece: ActivePiece::spawn(&mut rng),
            score: Score::new(),
            config,
            drop_interval: config.normal_drop,
            accumulated: Duration::ZERO,
            last_tick: None,
            rng,
        }
    }

    /// Process a discrete input command. Invalid moves are rejected and
    /// leave the state untouched.
    pub fn process_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.piece.try_move(-1, 0, &self.board),
            Action::MoveRight => self.piece.try_move(1, 0, &self.board),
            Action::Rotate => self.piece.try_rotate(&self.board),
        }
    }

    /// Toggle the soft-drop interval. Touches nothing but the threshold the
    /// accumulator is compared against.
    pub fn set_soft_drop(&mut self, active: bool) {
        self.drop_interval = if active {
            self.config.soft_drop
        } else {
            self.config.normal_drop
        };
    }

    pub fn soft_drop_active(&self) -> bool {
        self.drop_interval == self.config.soft_drop
    }

    /// Advance the game given a monotonic timestamp.
    ///
    /// The caller owns the schedule; feeding synthetic timestamps drives the
    /// game deterministically in tests. When the accumulated time passes the
    /// drop interval the active piece falls one row; a rejected fall locks
    /// the piece, clears lines, spawns the next piece and checks for game
    /// over. Returned events describe everything that happened this tick.
    pub fn on_tick(&mut self, now: Duration) -> Vec<GameEvent> {
        let last = self.last_tick.replace(now).unwrap_or(now);
        self.accumulated += now.saturating_sub(last);

        let mut events = Vec::new();
        if self.accumulated > self.drop_interval {
            self.accumulated = Duration::ZERO;
            if !self.piece.try_move(0, 1, &self.board) {
                self.lock_piece(&mut events);
            }
        }
        events
    }

    /// Merge the landed piece, clear lines, spawn the next piece and detect
    /// game over
    fn lock_piece(&mut self, events: &mut Vec<GameEvent>) {
        self.board.merge(&self.piece.shape, self.piece.x, self.piece.y);

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            let points = self.score.add_line_clear(cleared);
            events.push(GameEvent::LinesCleared {
                count: cleared,
                points,
            });
        }

        self.piece = ActivePiece::spawn(&mut self.rng);

        // A colliding spawn ends the session: report the final score, then
        // self-heal so the loop keeps running
        if self
            .board
            .collides(&self.piece.shape, self.piece.x, self.piece.y)
        {
            let final_score = self.score.points;
            self.board = Board::new(self.config.width, self.config.height);
            self.score.reset();
            events.push(GameEvent::GameOver { final_score });
        }
    }
}
