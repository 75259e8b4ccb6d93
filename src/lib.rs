//! Silhouette Breaker - a paddle game whose blocks are carved from a bitmap mask
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scenes, block field)
//! - `scheduler`: Fixed-step frame scheduler
//! - `session`: Session setup (field layout, initial state)
//! - `settings`: Stage selection and tunables loaded from JSON
//! - `platform`: Native adapters (image-backed mask sampler)

pub mod error;
pub mod platform;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::SetupError;
pub use scheduler::{FixedStepScheduler, Renderer};
pub use session::{DisplayArea, FieldLayout, Session};
pub use settings::{Settings, Stage};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick length in milliseconds (~60 Hz)
    pub const TICK_LENGTH_MS: f64 = 16.6;

    /// Speed gained by the ball on every reflection
    pub const ACCELERATION: f32 = 0.2;
    /// Misses that end the game
    pub const MAX_MISSES: u32 = 10;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 25.0;
    /// Vertical space reserved below the image for the paddle
    pub const PADDLE_MARGIN: f32 = 100.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 5.0;
    pub const BALL_START_SPEED: f32 = 3.0;
    /// Straight up (screen y grows downward)
    pub const BALL_START_ANGLE: f32 = 270.0;

    /// The mask is always cut into this many columns
    pub const GRID_COLUMNS: u32 = 10;

    /// Character bob range and per-tick step
    pub const BOB_RANGE: f32 = 10.0;
    pub const BOB_SPEED: f32 = 0.2;
}

/// Unit direction for an angle in degrees (0 = +x, counter-clockwise)
#[inline]
pub fn direction(angle_deg: f32) -> Vec2 {
    Vec2::from_angle(angle_deg.to_radians())
}
