// ui/mod.rs

mod chat;
mod draw;
mod leaderboard;
pub mod spinner;

pub use draw::{MIN_HEIGHT, MIN_WIDTH, draw};
