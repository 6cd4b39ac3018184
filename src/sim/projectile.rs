//! Projectiles: player bullets and the boss's elemental shots
//!
//! Single-use bodies removed on hit or once off-screen past half their own
//! extent. Bullets additionally reflect off the vertical screen edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::animation::{Animator, FrameSeq, FrameTable};
use super::body::{FrictionAxes, KinematicBody};
use super::rect::Rect;

/// Which side of the fight a projectile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet,
    FireBall,
    IceShard,
}

impl ProjectileKind {
    pub fn owner(self) -> Owner {
        match self {
            ProjectileKind::Bullet => Owner::Player,
            ProjectileKind::FireBall | ProjectileKind::IceShard => Owner::Boss,
        }
    }

    /// Hitboxes are padded in from the sprite frame so grazing shots miss.
    pub fn hitbox_size(self) -> (f32, f32) {
        match self {
            ProjectileKind::Bullet => (20.0, 20.0),
            ProjectileKind::FireBall => (35.0, 35.0),
            ProjectileKind::IceShard => (46.0, 36.0),
        }
    }
}

impl FrameTable for ProjectileKind {
    fn seq(self) -> FrameSeq {
        match self {
            ProjectileKind::Bullet => FrameSeq::looping(4, 100, 20.0, 20.0),
            ProjectileKind::FireBall => FrameSeq::looping(4, 100, 90.0, 90.0),
            ProjectileKind::IceShard => FrameSeq::looping(1, 100, 96.0, 96.0),
        }
    }
}

/// Which wall a bullet reflected off, for FX placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub body: KinematicBody,
    pub hitbox: Rect,
    pub anim: Animator<ProjectileKind>,
    pub alive: bool,
}

impl Projectile {
    pub fn new(id: u32, kind: ProjectileKind, pos: Vec2, vel: Vec2) -> Self {
        let (w, h) = kind.hitbox_size();
        let mut body = KinematicBody::new(pos, 0.0);
        body.vel = vel;
        Self {
            id,
            kind,
            body,
            hitbox: Rect::from_center(pos, w, h),
            anim: Animator::new(kind),
            alive: true,
        }
    }

    /// Ballistic motion: no drive, no friction.
    pub fn integrate(&mut self) {
        self.body.acc = Vec2::ZERO;
        self.body.integrate(FrictionAxes::Planar);
        self.hitbox.set_center(self.body.pos);
    }

    /// Bullets reflect off the vertical screen edges.
    pub fn bounce_walls(&mut self) -> Option<BounceSide> {
        if self.kind != ProjectileKind::Bullet {
            return None;
        }
        let half_w = self.hitbox.w / 2.0;
        if self.body.pos.x <= half_w {
            self.body.vel.x = -self.body.vel.x;
            return Some(BounceSide::Left);
        }
        if self.body.pos.x >= SCREEN_WIDTH - half_w {
            self.body.vel.x = -self.body.vel.x;
            return Some(BounceSide::Right);
        }
        None
    }

    /// Past the top or bottom of the screen by half its own extent.
    pub fn offscreen(&self) -> bool {
        let half_h = self.hitbox.h / 2.0;
        self.body.pos.y < -half_h || self.body.pos.y > SCREEN_HEIGHT + half_h
    }

    pub fn animate(&mut self, now_ms: u64) {
        self.anim.advance(now_ms);
    }

    /// Fireballs hang from their spawn point (the flame trails upward);
    /// everything else centers on the body.
    pub fn render_rect(&self) -> Rect {
        let (w, h) = self.anim.frame_size();
        match self.kind {
            ProjectileKind::FireBall => Rect::from_midtop(self.body.pos, w, h),
            _ => Rect::from_center(self.body.pos, w, h),
        }
    }
}
