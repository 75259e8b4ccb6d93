//! Fixed timestep simulation tick
//!
//! Advances the scene state machine by one step:
//! Start → Game → Clear | Gameover. Clear and Gameover are terminal.

use serde::{Deserialize, Serialize};

use super::collision::{Bounce, bounce_off_surfaces, break_first_block, reached_bottom};
use super::state::{CharacterImage, GameState, Scene};
use crate::consts::*;

/// Input written by the host between frames and read once per tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Horizontal cursor position in field coordinates
    pub cursor_x: f32,
    /// A click/tap happened since the last `take_click`
    pub clicked: bool,
}

impl InputState {
    pub fn new(cursor_x: f32) -> Self {
        Self {
            cursor_x,
            clicked: false,
        }
    }

    /// Record a click/tap
    pub fn click(&mut self) {
        self.clicked = true;
    }

    /// Read and clear the click flag so one click is seen by one tick
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.clicked)
    }
}

/// What happened during a single tick (for logging and tests)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub bounce: Option<Bounce>,
    pub missed: bool,
    /// Slot index of the block destroyed this tick
    pub broken_block: Option<usize>,
    /// Scene entered this tick, if it changed
    pub transition: Option<Scene>,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &mut InputState) -> TickReport {
    state.time_ticks += 1;

    if state.animation {
        state.character.animate();
    }

    let before = state.scene;
    let mut report = match state.scene {
        Scene::Start => {
            update_start(state, input);
            TickReport::default()
        }
        Scene::Game => update_game(state, input),
        Scene::Clear | Scene::Gameover => TickReport::default(),
    };

    if state.scene != before {
        log::info!(
            "Scene {:?} -> {:?} at tick {} ({})",
            before,
            state.scene,
            state.time_ticks,
            state.hud_line()
        );
        report.transition = Some(state.scene);
    }
    report
}

/// Ball rides the paddle until a click launches it
fn update_start(state: &mut GameState, input: &mut InputState) {
    let cursor_x = input.cursor_x;
    state.paddle.track_cursor(cursor_x, state.field.width);

    let min_x = state.paddle.width / 2.0;
    let max_x = state.field.width - state.paddle.width / 2.0;
    state.ball.pos.x = if cursor_x < min_x {
        min_x
    } else if cursor_x > max_x {
        max_x
    } else {
        cursor_x
    };

    if input.take_click() {
        state.scene = Scene::Game;
    }
}

/// Full physics step
fn update_game(state: &mut GameState, input: &mut InputState) -> TickReport {
    let mut report = TickReport::default();
    state.paddle.track_cursor(input.cursor_x, state.field.width);

    let paddle = state.paddle.as_rect();
    report.bounce = bounce_off_surfaces(&mut state.ball, &paddle, state.field);

    if reached_bottom(&state.ball, state.field) {
        state.miss_count += 1;
        report.missed = true;
    }

    // Heading is fixed before block checks; a block hit changes the angle
    // for the next tick but not this tick's movement.
    let heading = state.ball.heading();
    report.broken_block = break_first_block(&mut state.ball, &mut state.blocks, heading);
    if let Some(index) = report.broken_block {
        log::debug!(
            "Block {} destroyed, {} left, ball speed {:.1}",
            index,
            state.blocks.remaining(),
            state.ball.speed
        );
    }

    if (state.blocks.remaining() as f32) < state.blocks.total() as f32 / 2.0 {
        state.character.image = CharacterImage::Damaged;
    }

    state.ball.pos += heading * state.ball.speed;

    if state.blocks.is_cleared() {
        state.scene = Scene::Clear;
    } else if state.miss_count >= MAX_MISSES {
        state.character.image = CharacterImage::Gameover;
        state.scene = Scene::Gameover;
    }

    report
}
