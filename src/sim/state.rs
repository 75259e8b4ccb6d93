//! Game state and core simulation types
//!
//! One `GameState` lives for a whole session and is mutated in place by
//! `tick`. Everything here is plain data and serializable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::direction;

/// Coarse game mode governing which tick logic runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    /// Ball rides the paddle, waiting for a click
    Start,
    /// Active gameplay
    Game,
    /// Every block destroyed
    Clear,
    /// Too many misses
    Gameover,
}

impl Scene {
    /// Clear and Gameover never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Scene::Clear | Scene::Gameover)
    }

    /// Position in the one-way scene order (Clear and Gameover share a rank)
    pub fn rank(&self) -> u8 {
        match self {
            Scene::Start => 0,
            Scene::Game => 1,
            Scene::Clear | Scene::Gameover => 2,
        }
    }
}

/// Fixed field dimensions, established once per session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Radius
    pub size: f32,
    /// Travel direction in degrees (0 = +x, counter-clockwise)
    pub angle: f32,
    /// Distance travelled per tick; only ever grows
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: BALL_SIZE,
            angle: BALL_START_ANGLE,
            speed: BALL_START_SPEED,
        }
    }

    /// Unit travel direction for the current angle
    pub fn heading(&self) -> Vec2 {
        direction(self.angle)
    }

    /// Reflection bookkeeping shared by every bounce
    #[inline]
    pub fn accelerate(&mut self) {
        self.speed += ACCELERATION;
    }
}

/// The player's paddle (`y` never changes after setup)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle centered horizontally, `margin / 2` above the bottom edge
    pub fn centered(field: Field, margin: f32) -> Self {
        Self {
            x: field.width / 2.0 - PADDLE_WIDTH / 2.0,
            y: field.height - margin / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    /// Get the paddle as a Rect for collision detection
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Center the paddle under the cursor, clamped to `[0, field_width - width]`
    pub fn track_cursor(&mut self, cursor_x: f32, field_width: f32) {
        let x = cursor_x - self.width / 2.0;
        let max_x = field_width - self.width;
        self.x = if x < 0.0 {
            0.0
        } else if x > max_x {
            max_x
        } else {
            x
        };
    }
}

/// One slot of the block field. Destroyed slots stay in place so indices are stable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BlockSlot {
    Present(Rect),
    Destroyed,
}

impl BlockSlot {
    pub fn rect(&self) -> Option<&Rect> {
        match self {
            BlockSlot::Present(rect) => Some(rect),
            BlockSlot::Destroyed => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, BlockSlot::Present(_))
    }
}

/// Fixed-size, ordered set of destructible blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockField {
    slots: Vec<BlockSlot>,
}

impl BlockField {
    pub fn new(blocks: Vec<Rect>) -> Self {
        Self {
            slots: blocks.into_iter().map(BlockSlot::Present).collect(),
        }
    }

    /// Number of slots, destroyed or not
    pub fn total(&self) -> usize {
        self.slots.len()
    }

    /// Number of blocks still standing
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| s.is_present()).count()
    }

    /// True once nothing is left (also true for an empty field)
    pub fn is_cleared(&self) -> bool {
        self.slots.iter().all(|s| !s.is_present())
    }

    pub fn slots(&self) -> &[BlockSlot] {
        &self.slots
    }

    /// Present blocks in field order, with their slot index
    pub fn present(&self) -> impl Iterator<Item = (usize, &Rect)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.rect().map(|rect| (i, rect)))
    }

    /// Destroy the block in `index`, returning it if it was still present
    pub fn destroy(&mut self, index: usize) -> Option<Rect> {
        let slot = self.slots.get_mut(index)?;
        match std::mem::replace(slot, BlockSlot::Destroyed) {
            BlockSlot::Present(rect) => Some(rect),
            BlockSlot::Destroyed => None,
        }
    }
}

/// Bob direction of the decorative character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bob {
    Up,
    Down,
}

/// Which character artwork the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterImage {
    Base,
    /// Fewer than half of the blocks remain
    Damaged,
    Gameover,
}

/// Decorative character drawn behind the block mask. No gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub image: CharacterImage,
    pub bob: Bob,
}

impl Character {
    pub fn new(x: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y: 0.0,
            width,
            height,
            image: CharacterImage::Base,
            bob: Bob::Down,
        }
    }

    /// Oscillate between 0 and `BOB_RANGE`; a direction flip costs one tick
    pub fn animate(&mut self) {
        match self.bob {
            Bob::Up => {
                if self.y < 0.0 {
                    self.bob = Bob::Down;
                } else {
                    self.y -= BOB_SPEED;
                }
            }
            Bob::Down => {
                if self.y > BOB_RANGE {
                    self.bob = Bob::Up;
                } else {
                    self.y += BOB_SPEED;
                }
            }
        }
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub field: Field,
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: BlockField,
    /// Times the ball reached the bottom edge; never decreases
    pub miss_count: u32,
    pub scene: Scene,
    pub character: Character,
    /// Session-level switch for the character bob
    pub animation: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh state in the Start scene: paddle centered, ball resting on it
    pub fn new(field: Field, blocks: BlockField, character: Character, animation: bool) -> Self {
        let paddle = Paddle::centered(field, PADDLE_MARGIN);
        let ball = Ball::new(Vec2::new(paddle.x, paddle.y - BALL_SIZE));
        Self {
            field,
            paddle,
            ball,
            blocks,
            miss_count: 0,
            scene: Scene::Start,
            character,
            animation,
            time_ticks: 0,
        }
    }

    /// HUD text: misses and remaining/total blocks
    pub fn hud_line(&self) -> String {
        format!(
            "miss {}    block {}/{}",
            self.miss_count,
            self.blocks.remaining(),
            self.blocks.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(n: usize) -> BlockField {
        BlockField::new(
            (0..n)
                .map(|i| Rect::new(i as f32 * 10.0, 0.0, 10.0, 10.0))
                .collect(),
        )
    }

    #[test]
    fn test_block_field_tombstones() {
        let mut blocks = field_of(3);
        assert_eq!(blocks.total(), 3);
        assert_eq!(blocks.remaining(), 3);

        assert!(blocks.destroy(1).is_some());
        // Second destroy of the same slot is a no-op
        assert!(blocks.destroy(1).is_none());
        assert!(blocks.destroy(7).is_none());

        assert_eq!(blocks.total(), 3);
        assert_eq!(blocks.remaining(), 2);
        let indices: Vec<usize> = blocks.present().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(!blocks.is_cleared());

        blocks.destroy(0);
        blocks.destroy(2);
        assert!(blocks.is_cleared());
    }

    #[test]
    fn test_empty_field_is_cleared() {
        assert!(BlockField::default().is_cleared());
    }

    #[test]
    fn test_paddle_track_cursor_clamps() {
        let mut paddle = Paddle::centered(Field::new(400.0, 300.0), PADDLE_MARGIN);
        assert_eq!(paddle.x, 150.0);
        assert_eq!(paddle.y, 250.0);

        paddle.track_cursor(-50.0, 400.0);
        assert_eq!(paddle.x, 0.0);

        paddle.track_cursor(1000.0, 400.0);
        assert_eq!(paddle.x, 300.0);

        paddle.track_cursor(200.0, 400.0);
        assert_eq!(paddle.x, 150.0);
    }

    #[test]
    fn test_character_bob_reverses() {
        let mut character = Character::new(0.0, 100.0, 100.0);
        let mut max_y: f32 = 0.0;
        let mut saw_up = false;
        for _ in 0..200 {
            character.animate();
            max_y = max_y.max(character.y);
            saw_up |= character.bob == Bob::Up;
            assert!(character.y >= -BOB_SPEED - 1e-3);
        }
        assert!(saw_up);
        assert!(max_y <= BOB_RANGE + BOB_SPEED + 1e-3);
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(
            Field::new(400.0, 300.0),
            field_of(4),
            Character::new(0.0, 400.0, 200.0),
            true,
        );
        assert_eq!(state.scene, Scene::Start);
        assert_eq!(state.ball.pos, Vec2::new(150.0, 245.0));
        assert_eq!(state.ball.angle, 270.0);
        assert_eq!(state.hud_line(), "miss 0    block 4/4");
    }

    #[test]
    fn test_scene_rank_order() {
        assert!(Scene::Start.rank() < Scene::Game.rank());
        assert!(Scene::Game.rank() < Scene::Clear.rank());
        assert_eq!(Scene::Clear.rank(), Scene::Gameover.rank());
        assert!(Scene::Gameover.is_terminal());
        assert!(!Scene::Game.is_terminal());
    }
}
