//! Headless dungeon simulator.
//!
//! The binary reads [`runtime::RuntimeConfig`] from the environment, optionally
//! trains the Q-learning lead, then plays the dungeon once and prints the
//! battle through [`TextRenderer`].

pub mod logging;
pub mod render;

pub use render::TextRenderer;
