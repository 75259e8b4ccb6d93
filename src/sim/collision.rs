//! Collision detection and response
//!
//! The physics model is angle-and-speed reflection, not vector mechanics.
//! Collision is a point-in-rect test against the ball's center; the ball's
//! radius only matters for the wall checks. Every reflection adds
//! `ACCELERATION` to the ball speed.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Ball, BlockField, Field};

/// Which surface the ball bounced off this tick (paddle and walls only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounce {
    Paddle,
    /// Top or bottom wall
    Horizontal,
    /// Left or right wall
    Vertical,
}

/// True iff the ball's center lies within `rect`, edges inclusive
#[inline]
pub fn intersects(rect: &Rect, ball: &Ball) -> bool {
    rect.contains_point(ball.pos)
}

/// Mirror across a horizontal surface (flips the vertical component)
#[inline]
pub fn mirror_vertical(angle: f32) -> f32 {
    360.0 - angle
}

/// Mirror across a vertical surface (flips the horizontal component)
#[inline]
pub fn mirror_horizontal(angle: f32) -> f32 {
    180.0 - angle
}

/// Exit angle off the paddle
///
/// `r` is the contact offset across the paddle, roughly [-0.5, 0.5]. The
/// vertical mirror is skewed by up to 45 degrees toward the side that was hit.
pub fn paddle_exit_angle(angle: f32, ball_x: f32, paddle: &Rect) -> f32 {
    let r = (ball_x - paddle.x) / paddle.width - 0.5;
    360.0 - angle - 90.0 * -r
}

/// Ball touches the top or bottom wall
#[inline]
pub fn touches_horizontal_wall(ball: &Ball, field: Field) -> bool {
    ball.pos.y <= ball.size || reached_bottom(ball, field)
}

/// Ball touches the left or right wall
#[inline]
pub fn touches_vertical_wall(ball: &Ball, field: Field) -> bool {
    ball.pos.x <= ball.size || ball.pos.x >= field.width - ball.size
}

/// Ball reached the bottom boundary (a miss)
#[inline]
pub fn reached_bottom(ball: &Ball, field: Field) -> bool {
    ball.pos.y >= field.height - ball.size
}

/// Apply at most one paddle/wall reflection, first match wins:
/// paddle, then top/bottom wall, then left/right wall.
pub fn bounce_off_surfaces(ball: &mut Ball, paddle: &Rect, field: Field) -> Option<Bounce> {
    let bounce = if intersects(paddle, ball) {
        ball.angle = paddle_exit_angle(ball.angle, ball.pos.x, paddle);
        Bounce::Paddle
    } else if touches_horizontal_wall(ball, field) {
        ball.angle = mirror_vertical(ball.angle);
        Bounce::Horizontal
    } else if touches_vertical_wall(ball, field) {
        ball.angle = mirror_horizontal(ball.angle);
        Bounce::Vertical
    } else {
        return None;
    };
    ball.accelerate();
    Some(bounce)
}

/// Destroy the first present block the ball is inside and reflect off it
///
/// `heading` is the direction the ball is about to travel. When `ry < rx`
/// the ball mirrors vertically, otherwise horizontally. At most one block is
/// destroyed per call. Returns the destroyed slot index.
pub fn break_first_block(ball: &mut Ball, blocks: &mut BlockField, heading: Vec2) -> Option<usize> {
    let index = blocks
        .present()
        .find(|(_, rect)| intersects(rect, ball))
        .map(|(i, _)| i)?;
    blocks.destroy(index);

    ball.angle = if heading.y < heading.x {
        mirror_vertical(ball.angle)
    } else {
        mirror_horizontal(ball.angle)
    };
    ball.accelerate();
    Some(index)
}
