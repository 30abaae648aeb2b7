// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triangular cell addressing
//!
//! Each rhombic cell `(x, y)` of the hexagonal grid holds two
//! triangles: an upward one (`r == false`) and a downward one
//! (`r == true`). Most geometry questions are answered through the
//! barycentric projection, where all three components of an on-board
//! cell lie in `[0, size * 2)`.

use serde::{Deserialize, Serialize};

/// Address of one triangular cell
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriCoord {
    /// Column of the containing rhombus
    pub x: i32,
    /// Row of the containing rhombus
    pub y: i32,
    /// Orientation: `false` points up, `true` points down
    pub r: bool,
}

impl TriCoord {
    /// Create a new coordinate
    pub fn new(x: i32, y: i32, r: bool) -> Self {
        Self { x, y, r }
    }

    /// Barycentric triple for a board of edge length `size`
    pub fn bary(&self, size: i32) -> [i32; 3] {
        [
            self.x,
            self.y,
            size * 3 - 1 - self.x - self.y - i32::from(self.r),
        ]
    }

    /// The three cells sharing an edge with this one.
    ///
    /// Neighbors are not bounds-checked; callers must validate.
    pub fn neighbors(&self) -> [TriCoord; 3] {
        let offset = if self.r { 1 } else { -1 };
        [
            TriCoord::new(self.x, self.y, !self.r),
            TriCoord::new(self.x + offset, self.y, !self.r),
            TriCoord::new(self.x, self.y + offset, !self.r),
        ]
    }

    /// Barycentric centroid, used by renderers to position the cell.
    ///
    /// Simulation never reads this, but scripted sequences rely on the
    /// mapping staying stable so their coordinate literals keep naming
    /// the same logical cells.
    pub fn tri_center(&self, size: i32) -> [f32; 3] {
        let lean = (1.0 + f32::from(u8::from(self.r))) / 3.0;
        let a = (self.x as f32 + lean) / (size as f32 * 3.0);
        let b = (self.y as f32 + lean) / (size as f32 * 3.0);
        [a, b, 1.0 - a - b]
    }
}
