//! Block field generation from a bitmap's alpha channel
//!
//! The mask is cut into square cells `width / GRID_COLUMNS` pixels wide. A
//! cell becomes a block iff any pixel inside it is not fully transparent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::GRID_COLUMNS;

/// RGBA pixel data, row-major, 4 bytes per pixel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    /// Wrap an RGBA buffer. Returns `None` when the buffer size doesn't match.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Zero-size mask, what a failed sampler hands back
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Alpha of the pixel at (x, y); out-of-range pixels read as transparent
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let index = (x as usize + y as usize * self.width as usize) * 4;
        self.data.get(index + 3).copied().unwrap_or(0)
    }

    /// Side length of a grid cell
    pub fn cell_size(&self) -> u32 {
        self.width / GRID_COLUMNS
    }

    /// True if any pixel in the `size`-square cell at (x, y) is visible.
    /// Scans row-major and stops at the first hit.
    fn cell_is_solid(&self, x: u32, y: u32, size: u32) -> bool {
        (y..y + size).any(|yy| (x..x + size).any(|xx| self.alpha(xx, yy) > 0))
    }
}

/// Build blocks for every solid cell, row-major, offset by `origin`
///
/// Only whole cells are considered; a partial trailing row or column is cut
/// off. An empty mask, or one narrower than `GRID_COLUMNS` pixels, yields no
/// blocks.
pub fn generate_blocks(mask: &AlphaMask, origin: Vec2) -> Vec<Rect> {
    if mask.is_empty() {
        log::warn!("No mask pixels to sample, block field is empty");
        return Vec::new();
    }
    let cell = mask.cell_size();
    if cell == 0 {
        log::warn!(
            "Mask {}x{} is narrower than a {}-column grid, block field is empty",
            mask.width(),
            mask.height(),
            GRID_COLUMNS
        );
        return Vec::new();
    }

    let rows = mask.height() / cell;
    let cols = mask.width() / cell;
    let mut blocks = Vec::new();
    for row in 0..rows {
        let y = row * cell;
        for col in 0..cols {
            let x = col * cell;
            if mask.cell_is_solid(x, y, cell) {
                let corner = origin + Vec2::new(x as f32, y as f32);
                blocks.push(Rect::square(corner, cell as f32));
            }
        }
    }

    log::info!(
        "Generated {} blocks from {}x{} mask ({}px cells, {}x{} grid)",
        blocks.len(),
        mask.width(),
        mask.height(),
        cell,
        cols,
        rows
    );
    blocks
}
