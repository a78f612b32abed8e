pub mod types;
pub mod board;
pub mod rules;
pub mod game;
