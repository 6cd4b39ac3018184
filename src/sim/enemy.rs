//! Patrolling ground enemies
//!
//! Slimes spawn on platforms, pace across the middle third of their surface,
//! and bite the player on contact. Killed enemies play a one-shot death
//! sequence before leaving the simulation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY_ACC, SCREEN_HEIGHT};

use super::animation::{Animator, Facing, FrameSeq, FrameTable};
use super::body::{FrictionAxes, KinematicBody};
use super::platform::{LandingProbe, Platform};
use super::rect::Rect;

pub const ENEMY_MAX_HEALTH: f32 = 3.0;

const BASE_ACC: f32 = 0.25;
const START_FRICTION: f32 = -0.12;
const FRAME_EXTENT: f32 = 64.0;
const HITBOX_W: f32 = FRAME_EXTENT - 20.0;
const HITBOX_H: f32 = FRAME_EXTENT;
/// Falling faster than this when culled below the screen means the player
/// knocked it off
const KNOCKED_OFF_VEL: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyAnim {
    Move,
    Hurt,
    Attack,
    Die,
}

impl FrameTable for EnemyAnim {
    fn seq(self) -> FrameSeq {
        match self {
            EnemyAnim::Move => FrameSeq::looping(4, 100, FRAME_EXTENT, FRAME_EXTENT),
            EnemyAnim::Hurt => FrameSeq::one_shot(4, 100, FRAME_EXTENT, FRAME_EXTENT),
            EnemyAnim::Attack => FrameSeq::one_shot(4, 100, FRAME_EXTENT, FRAME_EXTENT),
            EnemyAnim::Die => FrameSeq::one_shot(4, 100, FRAME_EXTENT, FRAME_EXTENT),
        }
    }
}

/// Horizontal patrol bounds, derived from the platform currently stood on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatrolBounds {
    pub left: f32,
    pub right: f32,
}

impl PatrolBounds {
    fn from_platform(plat: &Platform) -> Self {
        let center = plat.rect.center().x;
        let third = plat.rect.w / 3.0;
        Self {
            left: center - third,
            right: center + third,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: KinematicBody,
    pub hitbox: Rect,
    pub health: f32,
    pub max_health: f32,
    /// -1 walks left, +1 walks right; doubles as facing
    pub dir: f32,
    pub anim: Animator<EnemyAnim>,

    pub is_hurt: bool,
    pub is_attacking: bool,
    pub is_dying: bool,
    pub alive: bool,

    pub last_attack_ms: u64,
    patrol: PatrolBounds,
    /// Index of the platform currently stood on, to detect re-binding
    current_platform: Option<u32>,
}

impl Enemy {
    /// Spawn somewhere on the middle third of a platform.
    pub fn spawn_on<R: Rng>(id: u32, plat: &Platform, rng: &mut R) -> Self {
        let patrol = PatrolBounds::from_platform(plat);
        let x = rng.random_range(patrol.left..=patrol.right);
        let pos = Vec2::new(x, plat.rect.top());
        Self {
            id,
            body: KinematicBody::new(pos, START_FRICTION),
            hitbox: Rect::from_midbottom(pos, HITBOX_W, HITBOX_H),
            health: ENEMY_MAX_HEALTH,
            max_health: ENEMY_MAX_HEALTH,
            dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            anim: Animator::new(EnemyAnim::Move),
            is_hurt: false,
            is_attacking: false,
            is_dying: false,
            alive: true,
            last_attack_ms: 0,
            patrol,
            current_platform: Some(plat.id),
        }
    }

    pub fn facing(&self) -> Facing {
        if self.dir < 0.0 { Facing::Left } else { Facing::Right }
    }

    pub fn begin_tick(&mut self) {
        self.body.acc = Vec2::new(0.0, GRAVITY_ACC);
    }

    /// Pace back and forth, turning around at the patrol bounds.
    pub fn patrol(&mut self) {
        if self.body.pos.x < self.patrol.left {
            self.dir = 1.0;
        }
        if self.body.pos.x > self.patrol.right {
            self.dir = -1.0;
        }
        self.body.acc.x += self.dir * BASE_ACC;
    }

    pub fn integrate(&mut self) {
        self.body.integrate(FrictionAxes::Horizontal);
        self.hitbox.set_midbottom(self.body.pos);
    }

    /// Stand on whatever platform the probe found, re-binding the patrol
    /// bounds when the surface changed underneath.
    pub fn apply_landing(&mut self, probe: LandingProbe, platforms: &[Platform]) {
        if let LandingProbe::Landed {
            platform_index,
            top,
            friction,
        } = probe
        {
            let plat = &platforms[platform_index];
            if self.current_platform != Some(plat.id) {
                self.current_platform = Some(plat.id);
                self.patrol = PatrolBounds::from_platform(plat);
            }
            self.body.pos.y = top;
            self.body.vel.y = 0.0;
            self.body.friction = friction;
            self.hitbox.set_midbottom(self.body.pos);
        }
    }

    /// Below the screen: cull. Awards a kill only when it was knocked off
    /// (fast fall with damage taken), not when its platform simply scrolled
    /// away.
    pub fn cull_below_screen(&mut self) -> bool {
        if self.body.pos.y > SCREEN_HEIGHT + FRAME_EXTENT / 2.0 {
            self.alive = false;
            return self.body.vel.y > KNOCKED_OFF_VEL && self.health < self.max_health;
        }
        false
    }

    pub fn start_dying(&mut self) {
        if self.health < 1.0 {
            self.is_dying = true;
        }
    }

    fn desired_anim(&self) -> EnemyAnim {
        if self.is_dying {
            EnemyAnim::Die
        } else if self.is_hurt {
            EnemyAnim::Hurt
        } else if self.is_attacking {
            EnemyAnim::Attack
        } else {
            EnemyAnim::Move
        }
    }

    /// Advance the animation. Returns true when the death sequence has
    /// finished and the enemy should leave the simulation.
    pub fn animate(&mut self, now_ms: u64) -> bool {
        self.anim.set(self.desired_anim());
        if self.anim.advance(now_ms) {
            match self.anim.state() {
                EnemyAnim::Hurt => self.is_hurt = false,
                EnemyAnim::Attack => self.is_attacking = false,
                EnemyAnim::Die => {
                    self.alive = false;
                    return true;
                }
                EnemyAnim::Move => {}
            }
        }
        false
    }

    pub fn render_rect(&self) -> Rect {
        let (w, h) = self.anim.frame_size();
        Rect::from_midbottom(self.body.pos, w, h)
    }
}
