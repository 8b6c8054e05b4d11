//! Game session: state machine, simulation step and food placement.
//!
//! A [`Session`] owns everything a single process-lifetime of the game
//! mutates: snake, food, score, high score and the state machine. It is
//! driven exclusively from the main loop; presentation gets read-only
//! accessors plus a change counter ([`Session::version`]) to key redraws on.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::snake::Snake;
use crate::{Cell, Direction, Playfield};

/// Uniform placement attempts before falling back to a deterministic scan.
const FOOD_RETRY_CAP: usize = 64;

/// Food parks here when the snake covers the whole playable area. The cell
/// is outside every playfield, so it can never be eaten and never collides
/// with the body.
const OFF_BOARD: Cell = Cell::new(-1, -1);

/// Lifecycle of a session. Starts in `WaitStart`; there is no terminal
/// state short of process exit.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    WaitStart,
    Running,
    Paused,
    GameOver,
    WaitResume,
}

/// What a single simulation step did.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum StepOutcome {
    /// Step ignored: the session was not running.
    Idle,
    Moved,
    Ate,
    Died,
}

pub struct Session {
    field: Playfield,
    snake: Snake,
    dir: Direction,
    food: Cell,
    score: u32,
    high_score: u32,
    points_per_food: u32,
    state: GameState,
    turn_armed: bool,
    rng: StdRng,
    version: u64,
}

impl Session {
    /// New session in `WaitStart` with a centered snake and food already
    /// placed. `seed` pins the food sequence for reproducible runs; the
    /// generator is seeded once and reused for the process lifetime.
    pub fn new(field: Playfield, points_per_food: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            field,
            snake: Snake::spawn_centered(&field),
            dir: Direction::Right,
            food: OFF_BOARD,
            score: 0,
            high_score: 0,
            points_per_food,
            state: GameState::WaitStart,
            turn_armed: true,
            rng,
            version: 0,
        };
        session.food = session.place_food();
        session
    }

    /// Fresh game on the same playfield. High score and the random
    /// generator carry over.
    pub fn restart(&mut self) {
        self.snake = Snake::spawn_centered(&self.field);
        self.dir = Direction::Right;
        self.score = 0;
        self.state = GameState::WaitStart;
        self.turn_armed = true;
        self.food = self.place_food();
        self.touch();
    }

    // ----- read-only snapshot -----

    #[inline]
    pub fn field(&self) -> &Playfield {
        &self.field
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.dir
    }

    #[inline]
    pub fn food(&self) -> Cell {
        self.food
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[inline]
    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Snake cells, head first.
    pub fn snake_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.snake.cells()
    }

    /// Bumped on every observable change; renderers redraw when it moves.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    // ----- input-driven transitions -----

    /// Feed one cardinal intent from the input mapper. The state machine
    /// decides whether it applies: it starts/resumes a waiting game,
    /// changes course while running (at most once per simulation step,
    /// never a 180° reversal) and is ignored everywhere else.
    pub fn propose_direction(&mut self, dir: Direction) {
        match self.state {
            GameState::WaitStart | GameState::WaitResume => {
                if dir != self.dir.opposite() {
                    if dir != self.dir {
                        self.dir = dir;
                    }
                    self.state = GameState::Running;
                    // Intent consumed this frame; re-armed by the next step.
                    self.turn_armed = false;
                    self.touch();
                }
            }
            GameState::Running => {
                if self.turn_armed && dir != self.dir && dir != self.dir.opposite() {
                    self.dir = dir;
                    self.turn_armed = false;
                }
            }
            GameState::Paused | GameState::GameOver => {}
        }
    }

    /// Pause toggle; only meaningful while running or paused.
    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Running => {
                self.state = GameState::Paused;
                self.touch();
            }
            GameState::Paused => {
                self.state = GameState::Running;
                self.touch();
            }
            _ => {}
        }
    }

    /// Confirm button: restarts after a game over.
    pub fn confirm(&mut self) {
        if self.state == GameState::GameOver {
            self.restart();
        }
    }

    /// Host suspend detected (oversized frame delta). Running and paused
    /// games both gate on a fresh direction intent before moving again.
    pub fn suspend(&mut self) {
        if matches!(self.state, GameState::Running | GameState::Paused) {
            self.state = GameState::WaitResume;
            self.touch();
        }
    }

    // ----- simulation -----

    /// Advance the snake by one cell. Precondition: state is `Running`;
    /// otherwise this is a no-op reporting [`StepOutcome::Idle`].
    pub fn step(&mut self) -> StepOutcome {
        if self.state != GameState::Running {
            return StepOutcome::Idle;
        }

        let new_head = self.snake.head().offset(self.dir);

        if !self.field.contains(new_head) || self.snake.occupies(new_head) {
            self.state = GameState::GameOver;
            self.touch();
            return StepOutcome::Died;
        }

        let ate = new_head == self.food;
        self.snake.advance(new_head, ate);

        if ate {
            self.score += self.points_per_food;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            self.food = self.place_food();
        }

        // Movement happened; allow the next direction change.
        self.turn_armed = true;
        self.touch();

        if ate { StepOutcome::Ate } else { StepOutcome::Moved }
    }

    /// Pick an unoccupied playable cell, uniformly at random. After
    /// [`FOOD_RETRY_CAP`] rejected draws a row-major scan takes the first
    /// free cell, so placement terminates even on a crowded board.
    fn place_food(&mut self) -> Cell {
        let xs = self.field.playable_x();
        let ys = self.field.playable_y();

        for _ in 0..FOOD_RETRY_CAP {
            let cell = Cell::new(
                self.rng.gen_range(xs.clone()),
                self.rng.gen_range(ys.clone()),
            );
            if !self.snake.occupies(cell) {
                return cell;
            }
        }

        for y in ys {
            for x in xs.clone() {
                let cell = Cell::new(x, y);
                if !self.snake.occupies(cell) {
                    return cell;
                }
            }
        }

        OFF_BOARD
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
