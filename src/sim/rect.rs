//! Axis-aligned float rectangles
//!
//! Used for hitboxes, platforms, and render rects. Hitboxes are always
//! re-anchored from their owning body after integration; they are never
//! moved on their own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with y growing downward (screen space).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn from_midbottom(midbottom: Vec2, w: f32, h: f32) -> Self {
        Self::new(midbottom.x - w / 2.0, midbottom.y - h, w, h)
    }

    pub fn from_midtop(midtop: Vec2, w: f32, h: f32) -> Self {
        Self::new(midtop.x - w / 2.0, midtop.y, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn set_midbottom(&mut self, midbottom: Vec2) {
        self.x = midbottom.x - self.w / 2.0;
        self.y = midbottom.y - self.h;
    }

    pub fn set_midtop(&mut self, midtop: Vec2) {
        self.x = midtop.x - self.w / 2.0;
        self.y = midtop.y;
    }

    pub fn shift_y(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Strict overlap test; touching edges and zero-area rects do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
