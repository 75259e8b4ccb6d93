//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - No randomness
//! - Stable iteration order (block field order)
//! - No rendering or platform dependencies

pub mod blocks;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use blocks::{AlphaMask, generate_blocks};
pub use collision::{Bounce, bounce_off_surfaces, break_first_block, intersects};
pub use rect::Rect;
pub use state::{
    Ball, Bob, BlockField, BlockSlot, Character, CharacterImage, Field, GameState, Paddle, Scene,
};
pub use tick::{InputState, TickReport, tick};
