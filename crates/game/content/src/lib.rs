//! Battle content: the built-in dungeon and data-driven loaders.
//!
//! - [`builtin`]: the default party and the three-floor dungeon
//! - `loaders` (feature `loaders`): party and floor catalogs from RON, battle
//!   tuning from TOML
//!
//! Content is consumed when the environment is built and never mutated by it.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::{default_floors, default_party};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, FloorLoader, PartyLoader};
