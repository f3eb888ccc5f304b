use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::{GridSize, MIN_GRID_SIDE};
use crate::error::SimulationError;
use crate::fruit::{initial_offset, spawn_position};
use crate::input::Direction;
use crate::snake::{Position, Snake};
use crate::steering::Steering;

/// Whether the simulation still accepts ticks.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum SimulationState {
    Running,
    Over,
}

/// Why a simulation ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum OverReason {
    HitWall,
    HitSelf,
    BoardFilled,
}

impl OverReason {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::HitWall => "hit the wall",
            Self::HitSelf => "ran into itself",
            Self::BoardFilled => "filled the board",
        }
    }
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub size: GridSize,
    pub snake: Vec<Position>,
    pub fruit: Position,
    pub state: SimulationState,
    pub over_reason: Option<OverReason>,
    pub direction: Direction,
    pub score: u32,
}

impl Snapshot {
    #[must_use]
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state == SimulationState::Over
    }
}

/// One game of Snake on a fixed board.
///
/// Owns the board size, the body, the fruit and the direction. Advances only
/// when [`SnakeSimulation::tick`] is called; it never sleeps, draws or blocks.
/// Playing again means constructing a new simulation.
#[derive(Debug)]
pub struct SnakeSimulation {
    size: GridSize,
    snake: Snake,
    fruit: Position,
    steering: Steering,
    state: SimulationState,
    over_reason: Option<OverReason>,
    tick_count: u64,
    rng: StdRng,
}

impl SnakeSimulation {
    /// Creates a simulation seeded from system entropy.
    pub fn new(size: GridSize) -> Result<Self, SimulationError> {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// Creates a deterministic simulation for tests and reproducible play.
    pub fn with_seed(size: GridSize, seed: u64) -> Result<Self, SimulationError> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: GridSize, rng: StdRng) -> Result<Self, SimulationError> {
        if !size.is_playable() {
            return Err(SimulationError::InvalidConfiguration {
                width: size.width,
                height: size.height,
                min: MIN_GRID_SIDE,
            });
        }

        let head = Position {
            x: i32::from(size.width / 2),
            y: i32::from(size.height / 2),
        };
        let fruit = Position {
            x: head.x + initial_offset(size),
            y: head.y,
        };

        Ok(Self {
            size,
            snake: Snake::new(head, size.total_cells()),
            fruit,
            steering: Steering::new(),
            state: SimulationState::Running,
            over_reason: None,
            tick_count: 0,
            rng,
        })
    }

    /// Requests a direction for the next tick.
    ///
    /// Ignored after the game is over and when `direction` reverses the
    /// heading, the last direction the snake actually moved in. The latest
    /// accepted request before a tick wins.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state != SimulationState::Running {
            return;
        }
        self.steering.request(direction);
    }

    /// Returns a handle that other input contexts can use to request directions.
    #[must_use]
    pub fn steering(&self) -> Steering {
        self.steering.clone()
    }

    /// Advances the simulation one step and returns the resulting state.
    pub fn tick(&mut self) -> SimulationState {
        if self.state != SimulationState::Running {
            return self.state;
        }

        self.tick_count += 1;

        let previous = self.steering.committed();
        let direction = self.steering.commit();
        if direction != previous {
            debug!("tick {}: direction {previous:?} -> {direction:?}", self.tick_count);
        }

        if direction == Direction::None {
            return self.state;
        }

        self.snake.advance(direction);
        let head = self.snake.head();

        if !head.is_within_bounds(self.size) {
            return self.finish(OverReason::HitWall);
        }

        if self.snake.head_overlaps_body() {
            return self.finish(OverReason::HitSelf);
        }

        if head == self.fruit {
            self.snake.grow();

            if self.snake.len() == self.size.total_cells() {
                return self.finish(OverReason::BoardFilled);
            }

            self.fruit = spawn_position(&mut self.rng, self.size, &self.snake);
            debug!(
                "tick {}: fruit eaten, length {}, respawned at ({}, {})",
                self.tick_count,
                self.snake.len(),
                self.fruit.x,
                self.fruit.y
            );
        }

        debug_assert!(
            !self.snake.has_overlapping_segments(),
            "running snake has overlapping segments"
        );

        self.state
    }

    fn finish(&mut self, reason: OverReason) -> SimulationState {
        self.state = SimulationState::Over;
        self.over_reason = Some(reason);
        self.steering.close();
        info!(
            "game over after {} ticks: {}, score {}",
            self.tick_count,
            reason.describe(),
            self.score()
        );
        self.state
    }

    /// Snake length minus the head.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.snake.len() - 1).unwrap_or(u32::MAX)
    }

    /// Copies out the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size,
            snake: self.snake.segments().to_vec(),
            fruit: self.fruit,
            state: self.state,
            over_reason: self.over_reason,
            direction: self.steering.committed(),
            score: self.score(),
        }
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    #[must_use]
    pub fn over_reason(&self) -> Option<OverReason> {
        self.over_reason
    }

    /// Direction applied during the most recent tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.steering.committed()
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn fruit(&self) -> Position {
        self.fruit
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[cfg(test)]
    fn place(&mut self, snake: Snake, fruit: Position, committed: Direction) {
        self.snake = snake;
        self.fruit = fruit;
        self.steering.request(committed);
        self.steering.commit();
    }
}
