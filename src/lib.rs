pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod io;
pub mod menu;
pub mod parse_grid;
pub mod render;
pub mod rule_set;
pub mod world;

mod parse_util;

pub use parse_util::ConvertError;
pub use parse_util::ParseError;

/// Age of a single cell. `0` is a dead cell, anything positive is alive.
pub type Age = u8;
