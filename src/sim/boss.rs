//! The flying boss
//!
//! Hovers at the top of the screen, steers toward the player's future
//! target, and fires elemental projectiles straight down. On death it falls
//! under gravity, may land on a platform, and respawns off-screen after a
//! minimum delay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY_ACC, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::animation::{Animator, Facing, FrameSeq, FrameTable};
use super::body::{FrictionAxes, KinematicBody};
use super::platform::Platform;
use super::projectile::ProjectileKind;
use super::rect::Rect;

pub const BOSS_MAX_HEALTH: f32 = 10.0;

const BASE_ACC: f32 = 1.0;
const FRICTION: f32 = -0.08;
const HITBOX_W: f32 = 80.0;
const HITBOX_H: f32 = 60.0;
const FRAME_EXTENT: f32 = 150.0;
const SHOT_INTERVAL_MS: u64 = 2000;
const RESPAWN_DELAY_MS: u64 = 10_000;
/// Hitbox height while slumped on a platform after dying
const LANDED_HEIGHT: f32 = 107.0;
/// Hover band: accelerate up below this...
const HOVER_FLOOR_Y: f32 = 60.0;
/// ...and back down above this
const HOVER_CEIL_Y: f32 = 30.0;
/// How far outside the screen edges a respawn teleports to
const RESPAWN_OFFSET: f32 = 200.0;

const FIREBALL_SPEED: f32 = 5.0;
const ICESHARD_SPEED: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossAnim {
    Flight,
    Attack1,
    Attack2,
    TakeHit,
    Death,
    Land,
}

impl FrameTable for BossAnim {
    fn seq(self) -> FrameSeq {
        match self {
            BossAnim::Flight => FrameSeq::looping(8, 100, FRAME_EXTENT, FRAME_EXTENT),
            BossAnim::Attack1 => FrameSeq::one_shot(8, 50, FRAME_EXTENT, FRAME_EXTENT),
            BossAnim::Attack2 => FrameSeq::one_shot(8, 50, FRAME_EXTENT, FRAME_EXTENT),
            BossAnim::TakeHit => FrameSeq::one_shot(4, 100, FRAME_EXTENT, FRAME_EXTENT),
            // Held until the body reaches a surface
            BossAnim::Death => FrameSeq::looping(1, 100, FRAME_EXTENT, FRAME_EXTENT),
            BossAnim::Land => FrameSeq::one_shot(2, 100, FRAME_EXTENT, FRAME_EXTENT),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub body: KinematicBody,
    pub hitbox: Rect,
    pub health: f32,
    pub max_health: f32,
    pub facing: Facing,
    pub anim: Animator<BossAnim>,

    pub is_alive: bool,
    pub is_dying: bool,
    /// Hurt flash while alive
    pub is_hit: bool,
    pub is_attacking: bool,
    /// Which attack sequence the current volley plays
    attack_choice: Option<BossAnim>,
    /// Dead body touched down; plays the landing sequence
    pub is_landing: bool,

    last_shot_ms: u64,
    /// Set when health crosses below 1; gates the respawn delay
    pub death_ms: u64,
}

impl Boss {
    pub fn new() -> Self {
        let pos = Vec2::new(SCREEN_WIDTH / 2.0, 36.0);
        Self {
            body: KinematicBody::new(pos, FRICTION),
            hitbox: Rect::from_center(pos, HITBOX_W, HITBOX_H),
            health: BOSS_MAX_HEALTH,
            max_health: BOSS_MAX_HEALTH,
            facing: Facing::Right,
            anim: Animator::new(BossAnim::Flight),
            is_alive: true,
            is_dying: false,
            is_hit: false,
            is_attacking: false,
            attack_choice: None,
            is_landing: false,
            last_shot_ms: 0,
            death_ms: 0,
        }
    }

    /// Reset per-tick acceleration; gravity only applies once dead.
    pub fn begin_tick(&mut self) {
        self.body.acc = if self.is_alive {
            Vec2::ZERO
        } else {
            Vec2::new(0.0, GRAVITY_ACC)
        };
    }

    /// Steer toward the future target's x by proportional control and face
    /// the direction of travel. The boss never reads the real player.
    pub fn track(&mut self, future_x: f32) {
        let dist = future_x - self.body.pos.x;
        let dist_norm = dist / (SCREEN_WIDTH / 2.0);
        self.facing = Facing::from_delta(dist, self.facing);
        self.body.acc.x += dist_norm * BASE_ACC;
    }

    /// Hold altitude near the top of the screen while alive.
    pub fn hold_altitude(&mut self) {
        if !self.is_alive {
            return;
        }
        if self.body.pos.y > HOVER_FLOOR_Y {
            self.body.acc.y -= BASE_ACC / 3.0;
        }
        if self.body.pos.y < HOVER_CEIL_Y {
            self.body.acc.y = BASE_ACC / 2.0;
        }
    }

    /// Fire every two seconds, picking fireball or ice shard at random and
    /// starting the matching attack animation. Returns the spawn request.
    pub fn try_shoot<R: Rng>(
        &mut self,
        now_ms: u64,
        rng: &mut R,
    ) -> Option<(ProjectileKind, Vec2, Vec2)> {
        if now_ms - self.last_shot_ms <= SHOT_INTERVAL_MS {
            return None;
        }
        self.last_shot_ms = now_ms;
        let (kind, vel, choice) = if rng.random_bool(0.5) {
            (
                ProjectileKind::FireBall,
                Vec2::new(0.0, FIREBALL_SPEED),
                BossAnim::Attack1,
            )
        } else {
            (
                ProjectileKind::IceShard,
                Vec2::new(0.0, ICESHARD_SPEED),
                BossAnim::Attack2,
            )
        };
        self.is_attacking = true;
        self.attack_choice = Some(choice);
        Some((kind, self.body.pos, vel))
    }

    pub fn integrate(&mut self) {
        self.body.integrate(FrictionAxes::Planar);
        self.hitbox.set_center(self.body.pos);
    }

    /// A dead boss falls onto whatever platform is under it instead of
    /// clipping through.
    pub fn collide_platforms_while_dead(&mut self, platforms: &[Platform]) {
        if self.is_alive {
            return;
        }
        for plat in platforms.iter().filter(|p| p.alive) {
            if self.hitbox.overlaps(&plat.rect)
                && self.hitbox.bottom() > plat.rect.top()
                && plat.rect.left() < self.body.pos.x
                && self.body.pos.x < plat.rect.right()
            {
                self.body.pos.y = plat.rect.top() - LANDED_HEIGHT / 2.0;
                self.body.vel.y = 0.0;
                self.is_landing = true;
                self.hitbox.set_center(self.body.pos);
            }
        }
    }

    /// True once the carcass is below the screen and the minimum respawn
    /// delay has elapsed.
    pub fn ready_to_respawn(&self, now_ms: u64) -> bool {
        !self.is_alive
            && self.body.pos.y > SCREEN_HEIGHT + FRAME_EXTENT / 2.0
            && now_ms - self.death_ms > RESPAWN_DELAY_MS
    }

    /// Teleport to a random spot just outside one of the four screen edges
    /// and come back to life at full health.
    pub fn respawn<R: Rng>(&mut self, rng: &mut R) {
        self.is_alive = true;
        self.is_dying = false;
        self.health = self.max_health;

        let x = rng.random_range(0.0..=SCREEN_WIDTH);
        let y = rng.random_range(0.0..=SCREEN_HEIGHT);
        let pos = match rng.random_range(0..4) {
            0 => Vec2::new(x, -RESPAWN_OFFSET),
            1 => Vec2::new(-RESPAWN_OFFSET, y),
            2 => Vec2::new(SCREEN_WIDTH + RESPAWN_OFFSET, y),
            _ => Vec2::new(x, SCREEN_HEIGHT + RESPAWN_OFFSET),
        };
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
        self.hitbox = Rect::from_center(pos, HITBOX_W, HITBOX_H);
        self.anim = Animator::new(BossAnim::Flight);
        self.is_hit = false;
        self.is_attacking = false;
        self.attack_choice = None;
        self.is_landing = false;
    }

    fn desired_anim(&self) -> BossAnim {
        if self.is_alive {
            if self.is_attacking {
                self.attack_choice.unwrap_or(BossAnim::Attack1)
            } else if self.is_hit {
                BossAnim::TakeHit
            } else {
                BossAnim::Flight
            }
        } else if self.is_landing {
            BossAnim::Land
        } else if self.is_dying {
            BossAnim::Death
        } else {
            // Respawn pending; hold the last landing frame
            BossAnim::Land
        }
    }

    pub fn animate(&mut self, now_ms: u64) {
        self.anim.set(self.desired_anim());
        if self.anim.advance(now_ms) {
            match self.anim.state() {
                BossAnim::Attack1 | BossAnim::Attack2 => {
                    self.is_attacking = false;
                    self.attack_choice = None;
                }
                BossAnim::TakeHit => self.is_hit = false,
                BossAnim::Land => {
                    self.is_landing = false;
                    self.is_dying = false;
                }
                _ => {}
            }
        }
    }

    pub fn render_rect(&self) -> Rect {
        let (w, h) = self.anim.frame_size();
        Rect::from_center(self.body.pos, w, h)
    }
}

impl Default for Boss {
    fn default() -> Self {
        Self::new()
    }
}
