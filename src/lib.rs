//! Grid snake: a tick-driven snake simulation and its terminal front end.
//!
//! The simulation core lives in [`game`], [`snake`] and [`food`]; it has no
//! knowledge of the terminal. [`renderer`], [`ui`] and [`terminal_runtime`]
//! only read simulation state.

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
