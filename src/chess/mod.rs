//! Chess board representation and movement rules.

pub mod attacks;
pub mod board;
pub mod core;
pub mod rules;
