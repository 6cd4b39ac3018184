//! Complete simulation state
//!
//! Everything a run needs to snapshot/restore lives here (visual FX and the
//! per-tick event queue are rebuilt, not persisted). Deterministic given the
//! seed and the input stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_PLATFORM_PASSED, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::boss::Boss;
use super::enemy::Enemy;
use super::fx::Fx;
use super::platform::{Platform, SurfaceKind};
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::projectile::{Projectile, ProjectileKind};

const PLATFORM_H: f32 = 48.0;
const GROUND_H: f32 = 96.0;
/// How far above a platform a powerup is nudged when it would spawn inside
const POWERUP_CLEARANCE: f32 = 10.0;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// Gameplay events exposed to audio/GUI shells, cleared at the start of
/// every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    DoubleJumped,
    Landed,
    PlayerHurt,
    Shot,
    BulletBounced,
    BossShot(ProjectileKind),
    BossHit,
    BossKilled,
    BossRespawned,
    EnemyHurt,
    EnemyMelee,
    EnemyKilled,
    PowerUpCollected(PowerUpKind),
    PlatformPassed,
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Monotonic millisecond clock derived from the tick counter; every
    /// timer in the sim compares against this
    pub time_ms: u64,
    pub phase: GamePhase,
    pub score: u32,

    pub player: Player,
    pub boss: Boss,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Projectile>,
    pub boss_shots: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    /// Visual effects (not gameplay-affecting)
    #[serde(skip)]
    pub fx: Vec<Fx>,
    /// Events emitted this tick, for external shells
    #[serde(skip)]
    pub events: Vec<GameEvent>,

    plat_spawn_threshold: f32,
    pow_spawn_threshold: f32,
    next_id: u32,
}

impl World {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let plat_spawn_threshold = rng.random_range(120.0..=360.0);
        let pow_spawn_threshold = rng.random_range(1000.0..=1500.0);
        let mut world = Self {
            seed,
            rng,
            time_ticks: 0,
            time_ms: 0,
            phase: GamePhase::Playing,
            score: 0,
            player: Player::new(),
            boss: Boss::new(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            player_shots: Vec::new(),
            boss_shots: Vec::new(),
            powerups: Vec::new(),
            fx: Vec::new(),
            events: Vec::new(),
            plat_spawn_threshold,
            pow_spawn_threshold,
            next_id: 1,
        };
        world.init_platform_field();
        log::info!("world initialized with seed {seed}");
        world
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ground slab plus four starter platforms stacked upward.
    fn init_platform_field(&mut self) {
        let id = self.next_entity_id();
        self.platforms.push(Platform::new(
            id,
            -100.0,
            SCREEN_HEIGHT - PLATFORM_H,
            SCREEN_WIDTH + 200.0,
            GROUND_H,
            SurfaceKind::Grassy,
        ));
        let mut y = SCREEN_HEIGHT;
        for _ in 0..4 {
            let w = self.rng.random_range(SCREEN_WIDTH / 5.0..=SCREEN_WIDTH / 2.0);
            let x = self.rng.random_range(10.0..=SCREEN_WIDTH - 10.0 - w);
            y -= self.rng.random_range(200.0..=300.0);
            let kind = SurfaceKind::random(&mut self.rng);
            let id = self.next_entity_id();
            self.platforms.push(Platform::new(id, x, y, w, PLATFORM_H, kind));
        }
    }

    /// Spawn a platform just above the screen once the player has climbed
    /// past the randomized threshold; one in five carries an enemy.
    pub fn spawn_scrolled_platforms(&mut self) {
        if self.player.scroll_dist_platforms <= self.plat_spawn_threshold {
            return;
        }
        self.player.scroll_dist_platforms = 0.0;
        let w = self.rng.random_range(SCREEN_WIDTH / 5.0..=SCREEN_WIDTH / 2.0);
        let x = self.rng.random_range(10.0..=SCREEN_WIDTH - 10.0 - w);
        let kind = SurfaceKind::random(&mut self.rng);
        let id = self.next_entity_id();
        let plat = Platform::new(id, x, -PLATFORM_H, w, PLATFORM_H, kind);
        if self.rng.random_range(0..5) == 0 {
            let enemy_id = self.next_entity_id();
            self.enemies.push(Enemy::spawn_on(enemy_id, &plat, &mut self.rng));
            log::debug!("enemy spawned on platform {id}");
        }
        self.platforms.push(plat);
        self.plat_spawn_threshold = self.rng.random_range(120.0..=360.0);
    }

    /// Spawn an ammo or health pickup at the top of the screen after enough
    /// climbing, keeping it clear of platforms.
    pub fn spawn_powerups(&mut self) {
        if self.player.scroll_dist_powerups <= self.pow_spawn_threshold {
            return;
        }
        self.player.scroll_dist_powerups = 0.0;
        let kind = if self.rng.random_bool(0.5) {
            PowerUpKind::Ammo
        } else {
            PowerUpKind::Health
        };
        let x = self.rng.random_range(0.0..=SCREEN_WIDTH);
        let id = self.next_entity_id();
        let mut pow = PowerUp::new(id, kind, x, -24.0);
        if let Some(plat) = self
            .platforms
            .iter()
            .find(|p| p.alive && p.rect.overlaps(&pow.rect))
        {
            pow.rect.y = plat.rect.top() - POWERUP_CLEARANCE - pow.rect.h;
        }
        self.powerups.push(pow);
        self.pow_spawn_threshold = self.rng.random_range(1000.0..=1500.0);
    }

    /// Camera follow: while the player is in the top half of the screen the
    /// world moves down instead of the player moving up.
    pub fn scroll_with_screen(&mut self) {
        let player = &mut self.player;
        if player.body.pos.y - player.hitbox.h > SCREEN_HEIGHT / 2.0 {
            return;
        }
        let dy = player.body.vel.y.abs();
        player.scroll_dist_platforms += dy;
        player.scroll_dist_powerups += dy;
        player.body.pos.y += dy;
        player.hitbox.shift_y(dy);
        player.future.pos.y += dy;
        self.boss.body.pos.y += dy;
        self.boss.hitbox.shift_y(dy);
        for plat in &mut self.platforms {
            plat.rect.shift_y(dy);
        }
        for fx in &mut self.fx {
            fx.pos.y += dy;
        }
        for shot in self
            .player_shots
            .iter_mut()
            .chain(self.boss_shots.iter_mut())
        {
            shot.body.pos.y += dy;
            shot.hitbox.shift_y(dy);
        }
        for pow in &mut self.powerups {
            pow.rect.shift_y(dy);
        }
        for enemy in &mut self.enemies {
            enemy.body.pos.y += dy;
            enemy.hitbox.shift_y(dy);
        }
    }

    /// Fell off the bottom: the camera plunges after the player, culling
    /// the scenery above; the run ends once no platform remains.
    pub fn apply_death_plunge(&mut self) {
        if self.player.body.pos.y - self.player.hitbox.h <= SCREEN_HEIGHT {
            return;
        }
        let dy = self.player.body.vel.y.max(10.0);
        for plat in &mut self.platforms {
            plat.rect.shift_y(-dy);
            if plat.rect.bottom() < 0.0 {
                plat.alive = false;
            }
        }
        for pow in &mut self.powerups {
            pow.rect.shift_y(-dy);
            if pow.rect.bottom() < 0.0 {
                pow.alive = false;
            }
        }
        for fx in &mut self.fx {
            fx.pos.y -= dy;
        }
    }

    /// Platforms scrolled below the screen are culled, each worth score.
    pub fn cull_platforms(&mut self) {
        for plat in &mut self.platforms {
            if plat.alive && plat.rect.top() >= SCREEN_HEIGHT {
                plat.alive = false;
                self.score += SCORE_PLATFORM_PASSED;
                self.events.push(GameEvent::PlatformPassed);
            }
        }
    }

    /// Game over at zero player health or when every platform is gone.
    pub fn check_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        let any_platform = self.platforms.iter().any(|p| p.alive);
        if !any_platform || self.player.health <= 0.0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!(
                "game over at t={}ms: score {}",
                self.time_ms,
                self.score
            );
        }
    }

    /// Drop everything marked dead this tick (mark-then-compact keeps the
    /// per-stage iteration simple).
    pub fn compact(&mut self) {
        self.platforms.retain(|p| p.alive);
        self.enemies.retain(|e| e.alive);
        self.player_shots.retain(|p| p.alive);
        self.boss_shots.retain(|p| p.alive);
        self.powerups.retain(|p| p.alive);
        self.fx.retain(|f| f.alive);
    }
}
