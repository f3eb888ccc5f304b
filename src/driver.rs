//! External driver: owns the tick timer and the screen flow around a
//! [`SnakeSimulation`]. Replaying constructs a fresh simulation.

use std::time::{Duration, Instant};

use log::{debug, info};
use thiserror::Error;

use crate::config::GridSize;
use crate::error::SimulationError;
use crate::game::{SimulationState, SnakeSimulation, Snapshot};
use crate::input::{Direction, GameInput};

/// Errors raised while driving games.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum DriverError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("unexpected {found:?} at position {index} of move script (use U, D, L, R, S or .)")]
    InvalidScript { index: usize, found: char },
}

/// Screen shown by the front end.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Settings shared by every game a driver starts.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DriverSettings {
    pub size: GridSize,
    pub tick_interval: Duration,
    /// Seed for the first game; later games use the following seeds.
    pub seed: Option<u64>,
}

/// Fixed-period tick timer.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    interval: Duration,
    last_tick: Instant,
}

impl TickClock {
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
        }
    }

    /// Returns true once a full interval has elapsed since the last tick.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_tick) >= self.interval
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Drives one simulation at a time through start, play and game-over screens.
#[derive(Debug)]
pub struct Driver {
    settings: DriverSettings,
    simulation: SnakeSimulation,
    screen: Screen,
    clock: TickClock,
    games_started: u64,
}

impl Driver {
    pub fn new(settings: DriverSettings, now: Instant) -> Result<Self, DriverError> {
        let simulation = new_simulation(settings, 0)?;

        Ok(Self {
            settings,
            simulation,
            screen: Screen::Start,
            clock: TickClock::new(settings.tick_interval, now),
            games_started: 1,
        })
    }

    /// Applies one input event. `Quit` is left to the caller.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Result<(), DriverError> {
        match (self.screen, input) {
            (Screen::Start, GameInput::Confirm) => {
                self.set_screen(Screen::Playing);
                self.clock.reset(now);
            }
            (Screen::GameOver, GameInput::Confirm) => {
                self.simulation = new_simulation(self.settings, self.games_started)?;
                self.games_started += 1;
                self.set_screen(Screen::Start);
            }
            (Screen::Playing, GameInput::Pause) => self.set_screen(Screen::Paused),
            (Screen::Paused, GameInput::Pause | GameInput::Confirm) => {
                self.set_screen(Screen::Playing);
                self.clock.reset(now);
            }
            (Screen::Playing, GameInput::Direction(direction)) => {
                self.simulation.set_direction(direction);
            }
            _ => {}
        }

        Ok(())
    }

    /// Ticks the simulation when the clock is due. Returns whether it ticked.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.screen != Screen::Playing || !self.clock.is_due(now) {
            return false;
        }

        self.clock.reset(now);
        if self.simulation.tick() == SimulationState::Over {
            info!(
                "game {} finished with score {}",
                self.games_started,
                self.simulation.score()
            );
            self.set_screen(Screen::GameOver);
        }
        true
    }

    fn set_screen(&mut self, screen: Screen) {
        debug!("screen {:?} -> {screen:?}", self.screen);
        self.screen = screen;
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.simulation.snapshot()
    }

    #[must_use]
    pub fn simulation(&self) -> &SnakeSimulation {
        &self.simulation
    }

    /// Configured period between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.clock.interval()
    }
}

fn new_simulation(settings: DriverSettings, game_index: u64) -> Result<SnakeSimulation, DriverError> {
    let simulation = match settings.seed {
        Some(seed) => SnakeSimulation::with_seed(settings.size, seed.wrapping_add(game_index))?,
        None => SnakeSimulation::new(settings.size)?,
    };
    Ok(simulation)
}

/// Plays a move script without a terminal, one tick per character.
///
/// `U`, `D`, `L`, `R` request a direction and `S` requests a stop before the
/// tick; `.` ticks without new input. Whitespace is skipped. Play stops early
/// once the game is over.
pub fn run_script(size: GridSize, seed: u64, script: &str) -> Result<Snapshot, DriverError> {
    let mut simulation = SnakeSimulation::with_seed(size, seed)?;

    for (index, found) in script.chars().enumerate() {
        if found.is_whitespace() {
            continue;
        }

        if found != '.' {
            let direction = Direction::from_script_char(found)
                .ok_or(DriverError::InvalidScript { index, found })?;
            simulation.set_direction(direction);
        }

        if simulation.tick() == SimulationState::Over {
            break;
        }
    }

    Ok(simulation.snapshot())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use serde_json::json;

    use crate::config::GridSize;
    use crate::input::{Direction, GameInput};
    use crate::game::SimulationState;
    use crate::snake::Position;

    use super::{Driver, DriverError, DriverSettings, Screen, TickClock, run_script};

    const INTERVAL: Duration = Duration::from_millis(100);

    fn settings(width: u16, height: u16) -> DriverSettings {
        DriverSettings {
            size: GridSize { width, height },
            tick_interval: INTERVAL,
            seed: Some(11),
        }
    }

    #[test]
    fn clock_is_due_after_one_interval() {
        let start = Instant::now();
        let clock = TickClock::new(INTERVAL, start);

        assert!(!clock.is_due(start + Duration::from_millis(99)));
        assert!(clock.is_due(start + INTERVAL));
    }

    #[test]
    fn start_screen_ignores_directions_and_does_not_tick() {
        let start = Instant::now();
        let mut driver = Driver::new(settings(5, 5), start).unwrap();

        driver
            .handle_input(GameInput::Direction(Direction::Up), start)
            .unwrap();

        assert!(!driver.update(start + INTERVAL * 3));
        assert_eq!(driver.screen(), Screen::Start);
        assert_eq!(driver.simulation().direction(), Direction::None);
    }

    #[test]
    fn confirm_starts_play_and_ticks_follow_the_clock() {
        let start = Instant::now();
        let mut driver = Driver::new(settings(9, 9), start).unwrap();

        driver.handle_input(GameInput::Confirm, start).unwrap();
        driver
            .handle_input(GameInput::Direction(Direction::Up), start)
            .unwrap();

        assert!(!driver.update(start + Duration::from_millis(50)));
        assert!(driver.update(start + INTERVAL));
        assert_eq!(driver.snapshot().head(), Position::new(4, 3));
    }

    #[test]
    fn pause_stops_ticks_until_resumed() {
        let start = Instant::now();
        let mut driver = Driver::new(settings(9, 9), start).unwrap();
        driver.handle_input(GameInput::Confirm, start).unwrap();

        driver.handle_input(GameInput::Pause, start).unwrap();
        assert_eq!(driver.screen(), Screen::Paused);
        assert!(!driver.update(start + INTERVAL * 5));

        let resumed = start + INTERVAL * 5;
        driver.handle_input(GameInput::Pause, resumed).unwrap();
        assert_eq!(driver.screen(), Screen::Playing);
        assert!(driver.update(resumed + INTERVAL));
    }

    #[test]
    fn game_over_then_confirm_replays_with_a_fresh_simulation() {
        let start = Instant::now();
        let mut driver = Driver::new(settings(5, 5), start).unwrap();
        driver.handle_input(GameInput::Confirm, start).unwrap();
        driver
            .handle_input(GameInput::Direction(Direction::Up), start)
            .unwrap();

        let mut now = start;
        while driver.screen() == Screen::Playing {
            now += INTERVAL;
            driver.update(now);
        }

        assert_eq!(driver.screen(), Screen::GameOver);
        assert!(driver.snapshot().is_over());

        driver.handle_input(GameInput::Confirm, now).unwrap();
        assert_eq!(driver.screen(), Screen::Start);
        assert!(!driver.snapshot().is_over());
        assert_eq!(driver.snapshot().snake, vec![Position::new(2, 2)]);
    }

    #[test]
    fn script_runs_until_wall() {
        let size = GridSize {
            width: 5,
            height: 5,
        };
        let snapshot = run_script(size, 3, "L...").unwrap();

        assert!(snapshot.is_over());
        assert_eq!(snapshot.head(), Position::new(-1, 2));
    }

    #[test]
    fn script_stop_does_not_allow_reversing() {
        let size = GridSize {
            width: 5,
            height: 5,
        };
        let snapshot = run_script(size, 42, "RSL").unwrap();

        assert_eq!(snapshot.state, SimulationState::Running);
        assert_eq!(snapshot.head(), Position::new(3, 2));
        assert_eq!(snapshot.snake.len(), 2);
        assert_eq!(snapshot.direction, Direction::None);
    }

    #[test]
    fn script_snapshot_serializes_with_stable_field_names() {
        let size = GridSize {
            width: 5,
            height: 5,
        };
        let snapshot = run_script(size, 3, "L...").unwrap();

        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "size": { "width": 5, "height": 5 },
                "snake": [{ "x": -1, "y": 2 }],
                "fruit": { "x": 3, "y": 2 },
                "state": "Over",
                "over_reason": "HitWall",
                "direction": "Left",
                "score": 0
            })
        );
    }

    #[test]
    fn script_rejects_unknown_characters() {
        let size = GridSize {
            width: 5,
            height: 5,
        };

        assert_eq!(
            run_script(size, 3, "Lx"),
            Err(DriverError::InvalidScript {
                index: 1,
                found: 'x'
            })
        );
    }
}
