//! Terminal snake with a color-cycling palette, streak scoring and an explicit
//! state machine driving a single tick loop.

pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod state;
pub mod terminal_runtime;
pub mod timing;
pub mod ui;
