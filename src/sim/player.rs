//! The player: movement, jumping, aiming, and the future target
//!
//! The player is the only actor driven by keyboard intents. It also owns the
//! "future" target - a virtual position the boss AI tracks instead of the
//! real player, resampled and extrapolated on a score-adaptive schedule.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{AIR_FRICTION, GRAVITY_ACC, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::animation::{Animator, Facing, FrameSeq, FrameTable};
use super::body::{FrictionAxes, KinematicBody};
use super::fx::{Fx, FxKind};
use super::platform::LandingProbe;
use super::rect::Rect;
use super::state::GameEvent;
use super::tick::TickInput;

pub const PLAYER_MAX_HEALTH: f32 = 10.0;

const HITBOX_W: f32 = 32.0;
const HITBOX_H: f32 = 28.0;
const BASE_ACC: f32 = 0.5;
const START_FRICTION: f32 = -0.12;
const JUMP_VEL: f32 = -20.0;
const JUMP_DELAY_MS: u64 = 500;
const DESCEND_DELAY_MS: u64 = 750;

// Predictive-AI tuning: at score 0 the boss sees a 3-second-stale, 3x-fast
// extrapolation; by score 3000 it resamples every tick.
const BASE_FUTURE_INTERVAL_MS: i64 = 3000;
const BASE_FUTURE_SPEED_SCALAR: f32 = 3.0;
const FUTURE_SCALAR_PER_SCORE: f32 = 0.01;
const FUTURE_EXTENT: f32 = 28.0;

const MAX_AMMO: u32 = 10;
const SHOT_DELAY_MS: u64 = 200;
const BULLET_SPEED: f32 = 6.0;
const AIM_ORBIT_RADIUS: f32 = 40.0;
const AIM_REST_LENGTH: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAnim {
    Idle,
    Walk,
    Jump,
    Fall,
    Land,
    Hurt,
}

impl FrameTable for PlayerAnim {
    fn seq(self) -> FrameSeq {
        match self {
            PlayerAnim::Idle => FrameSeq::looping(8, 100, 32.0, 28.0),
            PlayerAnim::Walk => FrameSeq::looping(8, 100, 32.0, 32.0),
            PlayerAnim::Jump => FrameSeq::looping(6, 100, 28.0, 28.0),
            PlayerAnim::Fall => FrameSeq::looping(2, 100, 32.0, 28.0),
            PlayerAnim::Land => FrameSeq::one_shot(4, 100, 44.0, 32.0),
            PlayerAnim::Hurt => FrameSeq::one_shot(9, 50, 32.0, 28.0),
        }
    }
}

/// Virtual player position the boss aims at. Decoupled from the real body;
/// read-only to the boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureTarget {
    pub pos: Vec2,
    pub vel: Vec2,
    /// May go negative, which forces a resample every tick
    pub interval_ms: i64,
    /// Never drops below 1.0
    pub speed_scalar: f32,
    last_sample_ms: u64,
}

impl FutureTarget {
    fn new(center: Vec2) -> Self {
        Self {
            pos: center,
            vel: Vec2::ZERO,
            interval_ms: BASE_FUTURE_INTERVAL_MS,
            speed_scalar: BASE_FUTURE_SPEED_SCALAR,
            last_sample_ms: 0,
        }
    }

    /// Difficulty coupling: resampling gets more frequent and the
    /// extrapolation more kinematically faithful as score grows.
    pub fn tune(&mut self, score: u32) {
        self.interval_ms = BASE_FUTURE_INTERVAL_MS - i64::from(score);
        self.speed_scalar =
            (BASE_FUTURE_SPEED_SCALAR - score as f32 * FUTURE_SCALAR_PER_SCORE).max(1.0);
    }

    /// Resample when the interval has elapsed, then extrapolate one tick,
    /// mirroring the real body's horizontal wrap.
    pub fn update(&mut self, now_ms: u64, player_center: Vec2, player_vel: Vec2) {
        if now_ms as i64 - self.last_sample_ms as i64 > self.interval_ms {
            self.last_sample_ms = now_ms;
            self.pos = player_center;
            self.vel = player_vel * self.speed_scalar;
        }
        if self.pos.x < -FUTURE_EXTENT / 2.0 {
            self.pos.x = SCREEN_WIDTH + FUTURE_EXTENT / 2.0;
        }
        if self.pos.x > SCREEN_WIDTH + FUTURE_EXTENT / 2.0 {
            self.pos.x = -FUTURE_EXTENT / 2.0;
        }
        self.pos += self.vel;
    }
}

/// Aim vector orbiting the player, doubling as the bullet direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gun {
    /// Orbit direction relative to the player (not a world position)
    pub aim: Vec2,
    /// Muzzle position in world space, for the render shell
    pub pos: Vec2,
    pub ammo: u32,
    pub max_ammo: u32,
    last_shot_ms: u64,
}

impl Gun {
    fn new(player_center: Vec2) -> Self {
        Self {
            aim: Vec2::new(1.0, 1.0),
            pos: player_center,
            ammo: MAX_AMMO,
            max_ammo: MAX_AMMO,
            last_shot_ms: 0,
        }
    }

    /// Steer the aim, update the muzzle position, and return a bullet spawn
    /// request (position, velocity) when firing this tick.
    pub fn update(
        &mut self,
        input: &TickInput,
        now_ms: u64,
        player_pos: Vec2,
        player_half_h: f32,
    ) -> Option<(Vec2, Vec2)> {
        let aiming = input.aim_left || input.aim_right || input.aim_up || input.aim_down;
        if !aiming {
            // Move keys drag the gun around while running/jumping
            if input.up {
                self.aim.y -= 1.0;
            }
            if input.left {
                self.aim.x -= 1.0;
            }
            if input.down {
                self.aim.y += 1.0;
            }
            if input.right {
                self.aim.x += 1.0;
            }
        } else {
            // Aim keys swing faster horizontally than vertically
            if input.aim_left {
                self.aim.x -= 3.0;
            }
            if input.aim_right {
                self.aim.x += 3.0;
            }
            if input.aim_up {
                self.aim.y -= 1.0;
            }
            if input.aim_down {
                self.aim.y += 1.0;
            }
        }

        let anchor = Vec2::new(player_pos.x, player_pos.y - player_half_h);
        // Degenerate aim means no aim, not a NaN direction
        if self.aim.length() <= 0.1 {
            self.pos = anchor;
            return None;
        }
        let dir = self.aim.normalize();
        self.pos = anchor + dir * AIM_ORBIT_RADIUS;

        let mut shot = None;
        if aiming && self.ammo > 0 && now_ms - self.last_shot_ms > SHOT_DELAY_MS {
            self.last_shot_ms = now_ms;
            self.ammo -= 1;
            shot = Some((self.pos, dir * BULLET_SPEED));
        }
        self.aim = dir * AIM_REST_LENGTH;
        shot
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    pub hitbox: Rect,
    pub health: f32,
    pub max_health: f32,
    pub facing: Facing,
    pub anim: Animator<PlayerAnim>,

    // Jump capabilities, toggled by the landing resolver
    pub can_jump: bool,
    pub can_double_jump: bool,
    /// Set on takeoff, cleared on landing
    pub is_jumping: bool,
    /// Dropping through the current platform (not the same as falling)
    pub is_descending: bool,
    pub is_falling: bool,
    pub is_landing: bool,
    /// Arms the one-shot landing animation; cleared when it fires
    can_land: bool,
    pub is_walking: bool,
    pub is_hurt: bool,
    last_jump_ms: u64,
    last_descend_ms: u64,

    pub future: FutureTarget,
    pub gun: Gun,

    /// Distance scrolled since the last platform / powerup spawn
    pub scroll_dist_platforms: f32,
    pub scroll_dist_powerups: f32,
}

impl Player {
    pub fn new() -> Self {
        let pos = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 60.0);
        let center = Vec2::new(pos.x, pos.y - HITBOX_H / 2.0);
        let mut body = KinematicBody::new(pos, START_FRICTION);
        body.acc = Vec2::new(0.0, GRAVITY_ACC);
        Self {
            body,
            hitbox: Rect::from_midbottom(pos, HITBOX_W, HITBOX_H),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            facing: Facing::Right,
            anim: Animator::new(PlayerAnim::Idle),
            can_jump: false,
            can_double_jump: true,
            is_jumping: false,
            is_descending: false,
            is_falling: false,
            is_landing: false,
            can_land: false,
            is_walking: false,
            is_hurt: false,
            last_jump_ms: 0,
            last_descend_ms: 0,
            future: FutureTarget::new(center),
            gun: Gun::new(center),
            scroll_dist_platforms: 0.0,
            scroll_dist_powerups: 0.0,
        }
    }

    /// Center of the hitbox (the point the future target snaps to).
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.body.pos.x, self.body.pos.y - HITBOX_H / 2.0)
    }

    /// Reset per-tick acceleration to gravity before intents are applied.
    pub fn begin_tick(&mut self) {
        self.body.acc = Vec2::new(0.0, GRAVITY_ACC);
    }

    /// Apply keyboard intents: horizontal drive, jumps, and descending.
    pub fn control(
        &mut self,
        input: &TickInput,
        now_ms: u64,
        events: &mut Vec<GameEvent>,
        fx: &mut Vec<Fx>,
    ) {
        if input.jump_pressed
            && self.can_jump
            && now_ms - self.last_jump_ms >= JUMP_DELAY_MS
        {
            self.body.vel.y = JUMP_VEL;
            self.is_jumping = true;
            self.last_jump_ms = now_ms;
            self.can_jump = false;
            fx.push(Fx::new(FxKind::JumpDust, self.body.pos));
            events.push(GameEvent::Jumped);
        }
        // Releasing mid-rise shortens the jump
        if input.jump_released && self.is_jumping {
            let partial = self.body.vel.y / 2.0;
            if self.body.vel.y < partial {
                self.body.vel.y = partial;
            }
        }
        if input.jump_pressed
            && self.can_double_jump
            && self.is_jumping
            && now_ms - self.last_jump_ms >= JUMP_DELAY_MS / 2
        {
            self.last_jump_ms = now_ms;
            self.can_double_jump = false;
            self.body.vel.y = JUMP_VEL;
            fx.push(Fx::new(FxKind::JumpDust, self.body.pos));
            events.push(GameEvent::DoubleJumped);
        }

        if input.down && now_ms - self.last_descend_ms >= DESCEND_DELAY_MS {
            self.last_descend_ms = now_ms;
            self.is_descending = true;
        }

        if input.left {
            self.body.acc.x -= BASE_ACC;
            self.facing = Facing::Left;
            self.is_walking = true;
        }
        if input.right {
            self.body.acc.x += BASE_ACC;
            self.facing = Facing::Right;
            self.is_walking = true;
        }
        if !input.left && !input.right {
            self.is_walking = false;
        }
    }

    pub fn integrate(&mut self) {
        self.body.integrate(FrictionAxes::Horizontal);
        self.body.wrap_x(HITBOX_W / 2.0);
        self.hitbox.set_midbottom(self.body.pos);
    }

    /// Apply one landing probe outcome. Landing events (animation + dust)
    /// fire once per touchdown, not every resting tick.
    pub fn apply_landing(
        &mut self,
        probe: LandingProbe,
        events: &mut Vec<GameEvent>,
        fx: &mut Vec<Fx>,
    ) {
        match probe {
            LandingProbe::Landed { top, friction, .. } => {
                self.body.pos.y = top;
                self.body.vel.y = 0.0;
                self.body.friction = friction;
                if !self.is_jumping {
                    self.can_jump = true;
                    self.can_double_jump = true;
                }
                self.is_jumping = false;
                self.is_falling = false;
                if self.can_land {
                    self.can_land = false;
                    self.is_landing = true;
                    fx.push(Fx::new(FxKind::LandDust, self.body.pos));
                    events.push(GameEvent::Landed);
                }
            }
            LandingProbe::PassedThrough => self.is_descending = false,
            LandingProbe::Overlapping | LandingProbe::None => {
                self.body.friction = AIR_FRICTION;
            }
        }
        self.hitbox.set_midbottom(self.body.pos);
    }

    /// Call after landing resolution: a body still moving downward is
    /// falling, and a fall arms the landing animation.
    pub fn update_fall_state(&mut self) {
        if self.body.vel.y > 0.0 {
            self.is_falling = true;
            self.can_land = true;
        }
    }

    fn desired_anim(&self) -> PlayerAnim {
        if self.is_hurt {
            PlayerAnim::Hurt
        } else if self.is_landing {
            PlayerAnim::Land
        } else if self.is_jumping && !self.is_falling {
            PlayerAnim::Jump
        } else if self.is_falling {
            PlayerAnim::Fall
        } else if self.is_walking {
            PlayerAnim::Walk
        } else {
            PlayerAnim::Idle
        }
    }

    pub fn animate(&mut self, now_ms: u64) {
        self.anim.set(self.desired_anim());
        if self.anim.advance(now_ms) {
            match self.anim.state() {
                PlayerAnim::Land => self.is_landing = false,
                PlayerAnim::Hurt => self.is_hurt = false,
                _ => {}
            }
        }
    }

    /// Render rect sized by the current frame, bottom edge pinned to the
    /// body position so frames of differing height never clip downward.
    pub fn render_rect(&self) -> Rect {
        let (w, h) = self.anim.frame_size();
        Rect::from_midbottom(self.body.pos, w, h)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
