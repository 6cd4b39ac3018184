//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick is the implicit dt)
//! - Seeded RNG only
//! - Single-threaded, fixed stage order within a tick
//! - No rendering or platform dependencies

pub mod animation;
pub mod body;
pub mod boss;
pub mod combat;
pub mod enemy;
pub mod fx;
pub mod platform;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;

pub use animation::{Animator, Facing, FrameSeq, FrameTable, Playback};
pub use body::{FrictionAxes, KinematicBody};
pub use boss::{Boss, BossAnim};
pub use enemy::{Enemy, EnemyAnim};
pub use fx::{Fx, FxKind};
pub use platform::{
    LandingProbe, LandingRules, Platform, SurfaceKind, UnknownSurface, resolve_landing,
};
pub use player::{FutureTarget, Gun, Player, PlayerAnim};
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::{Owner, Projectile, ProjectileKind};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, World};
pub use tick::{TickInput, tick};
