//! Stat primitives shared by every combatant.
//!
//! ```text
//! [ Stats (immutable, copied per character) ]
//!      ↓
//! [ ResourceMeter (current HP / MP, mutated in battle) ]
//! ```
//!
//! Stats never change during a battle. Only the meters move, and only through
//! the damage/heal/MP bookkeeping on [`crate::state::Character`].

pub mod core;
pub mod resources;

pub use core::Stats;
pub use resources::ResourceMeter;
