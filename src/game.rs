use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::{GridSize, SimulationConfig};
use crate::food::{spawn_position, Food};
use crate::input::{Direction, GameInput};
use crate::snake::{Position, Snake};

/// Current high-level simulation state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Terminated,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TerminationReason {
    SelfCollision,
    OutOfBounds,
}

/// Result of one successful tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Continue,
    Terminated {
        final_score: u32,
        reason: TerminationReason,
    },
}

/// Misuse of a [`GameState`].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum TickError {
    #[error("tick on a terminated simulation (final score {final_score})")]
    AlreadyTerminated { final_score: u32 },
}

/// Complete mutable simulation state for one run.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    foods: Vec<Food>,
    score: u32,
    tick_count: u64,
    status: GameStatus,
    death_reason: Option<TerminationReason>,
    config: SimulationConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: SimulationConfig, rng: StdRng) -> Self {
        let snake = Snake::new(config.start, config.start_direction, config.segment_size)
            .allowing_reversal(config.allow_reversal);
        let mut state = Self::assemble(config, snake, Vec::new(), rng);
        for _ in 0..state.config.food_count {
            state.spawn_food();
        }
        state
    }

    /// Builds a running simulation around a prepared snake and food set.
    ///
    /// The config's reversal policy is applied to `snake`; no extra food is
    /// spawned.
    #[must_use]
    pub fn from_parts(config: SimulationConfig, snake: Snake, foods: Vec<Food>, seed: u64) -> Self {
        let snake = snake.allowing_reversal(config.allow_reversal);
        Self::assemble(config, snake, foods, StdRng::seed_from_u64(seed))
    }

    fn assemble(config: SimulationConfig, snake: Snake, foods: Vec<Food>, rng: StdRng) -> Self {
        Self {
            snake,
            foods,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            death_reason: None,
            config,
            rng,
        }
    }

    /// Places one food item on a random cell.
    ///
    /// Returns the chosen position, or `None` when occupied cells are avoided
    /// and none is free.
    pub fn spawn_food(&mut self) -> Option<Position> {
        let position = spawn_position(
            &mut self.rng,
            self.config.bounds,
            self.config.segment_size,
            &self.snake,
            self.config.avoid_occupied_cells,
        );

        match position {
            Some(position) => {
                debug!("food spawned at ({}, {})", position.x, position.y);
                self.foods.push(Food::new(position));
            }
            None => warn!("no free cell left for food"),
        }
        position
    }

    /// Advances simulation by one tick.
    ///
    /// Moves the snake, resolves at most one food item under the new head,
    /// then checks for self-collision and leaving the playfield.
    pub fn tick(&mut self) -> Result<TickOutcome, TickError> {
        if self.status == GameStatus::Terminated {
            return Err(TickError::AlreadyTerminated {
                final_score: self.score,
            });
        }

        self.tick_count += 1;

        self.snake.move_forward();

        let head = self.snake.head();
        if let Some(index) = self.foods.iter().position(|food| food.position == head) {
            let food = self.foods.remove(index);
            self.snake.grow();
            self.score = self.score.saturating_add(self.config.food_reward);
            debug!(
                "food eaten at ({}, {}), score {}",
                food.position.x, food.position.y, self.score
            );
            self.spawn_food();
        }

        let reason = if self.snake.collides_with_itself() {
            Some(TerminationReason::SelfCollision)
        } else if !head.is_within_bounds(self.config.bounds) {
            Some(TerminationReason::OutOfBounds)
        } else {
            None
        };

        let Some(reason) = reason else {
            return Ok(TickOutcome::Continue);
        };

        self.status = GameStatus::Terminated;
        self.death_reason = Some(reason);
        info!(
            "game over after {} ticks: {:?}, score {}",
            self.tick_count, reason, self.score
        );

        Ok(TickOutcome::Terminated {
            final_score: self.score,
            reason,
        })
    }

    /// Sets the direction for the next move. Ignored once terminated.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.snake.set_direction(direction)
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                let _ = self.set_direction(direction);
            }
            GameInput::Restart => self.restart(),
            GameInput::Quit => {}
        }
    }

    /// Replaces this run with a fresh one under the same config.
    pub fn restart(&mut self) {
        let seed = self.rng.r#gen::<u64>();
        debug!("restarting simulation with seed {seed}");
        *self = Self::new_with_seed(self.config.clone(), seed);
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Snapshot of the snake body, head first.
    #[must_use]
    pub fn body(&self) -> Vec<Position> {
        self.snake.body()
    }

    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Snapshot of every active food position.
    #[must_use]
    pub fn food_positions(&self) -> Vec<Position> {
        self.foods.iter().map(|food| food.position).collect()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<TerminationReason> {
        self.death_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.bounds
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
