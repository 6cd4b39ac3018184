//! Skyclimb - a vertical-scrolling action platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, platform collision, combat,
//!   animation, predictive boss AI)
//!
//! Rendering, audio, menus, and high-score persistence are external shells
//! that consume the state exposed by `sim` (positions, animation frame
//! handles, hitboxes, counters, and the per-tick event queue).

pub mod sim;

pub use sim::{GameEvent, GamePhase, TickInput, World, tick};

/// Game configuration constants
pub mod consts {
    /// Visible play field dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u64 = 60;

    /// Downward acceleration applied to gravity-bound actors each tick.
    /// Keep close to 1 or resting bodies start to twitch on platforms.
    pub const GRAVITY_ACC: f32 = 0.8;

    /// Friction while airborne (platforms override on landing)
    pub const AIR_FRICTION: f32 = -0.1;

    /// Horizontal slack beyond a platform's span that still counts as
    /// standing on it; prevents detaching while resting near an edge
    pub const PLATFORM_EDGE_MARGIN: f32 = 10.0;

    /// Score awards
    pub const SCORE_PLATFORM_PASSED: u32 = 5;
    pub const SCORE_ENEMY_KILL: u32 = 100;
    pub const SCORE_BOSS_KILL: u32 = 1000;
}
