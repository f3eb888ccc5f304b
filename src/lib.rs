//! Snake simulation core and the terminal front end that drives it.
//!
//! [`game::SnakeSimulation`] knows nothing about terminals or timers. The
//! [`driver`] module owns the tick cadence and screen flow, and the
//! [`renderer`] draws a read-only [`game::Snapshot`].

pub mod config;
pub mod driver;
pub mod error;
pub mod fruit;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod steering;
pub mod terminal_runtime;
pub mod ui;
