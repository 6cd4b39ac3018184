//! Kinematic state and the shared integrator
//!
//! Every moving actor (player, boss, enemies, projectiles) owns exactly one
//! body and integrates it once per tick. Acceleration is reassigned by the
//! owning actor at the start of each tick (gravity included where it
//! applies), so the friction term is always recomputed from the current
//! velocity rather than accumulated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SCREEN_WIDTH;

/// Which axes the velocity-proportional friction term applies to.
///
/// Walkers only bleed horizontal speed (gravity owns the vertical axis);
/// the flying boss decelerates on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrictionAxes {
    Horizontal,
    Planar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Always <= 0; a deceleration proportional to current speed
    pub friction: f32,
}

impl KinematicBody {
    pub fn new(pos: Vec2, friction: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            friction,
        }
    }

    /// One tick of semi-implicit Euler:
    /// `acc += vel * friction; vel += acc; pos += vel + 0.5 * acc`.
    ///
    /// Velocity magnitude is never clamped here; landings, knockback, and
    /// jump impulses assign velocity explicitly.
    pub fn integrate(&mut self, axes: FrictionAxes) {
        match axes {
            FrictionAxes::Horizontal => self.acc.x += self.vel.x * self.friction,
            FrictionAxes::Planar => self.acc += self.vel * self.friction,
        }
        self.vel += self.acc;
        self.pos += self.vel + 0.5 * self.acc;
    }

    /// Teleport to the opposite edge once fully off-screen horizontally.
    /// The vertical axis never wraps.
    pub fn wrap_x(&mut self, half_width: f32) {
        if self.pos.x < -half_width {
            self.pos.x = SCREEN_WIDTH + half_width;
        }
        if self.pos.x > SCREEN_WIDTH + half_width {
            self.pos.x = -half_width;
        }
    }
}
