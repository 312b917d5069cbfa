//! Flying chess rules.
//!
//! - `remap`: converting a position between seat frames
//! - `movement`: step planning, flights, the trap, and evictions
//! - `engine`: the per-replica turn state machine
//!
//! The movement functions are synchronous and operate on a [`Board`]
//! directly. Only the engine knows about turns, notifications and choices.
//!
//! [`Board`]: crate::core::Board

pub mod engine;
pub mod movement;
pub mod remap;

pub use engine::{outcome, GameOutcome, TurnEngine};
pub use movement::{apply_movement, apply_step, plan_move, spring_trap, Movement};
pub use remap::remap;
