//! Fixed-order simulation tick
//!
//! One tick advances every actor through the same staged pipeline: intents,
//! integration, platform collision, combat, animation, predictive-AI update,
//! lifecycle, then scrolling/spawning/compaction. The order matters - later
//! stages read state written by earlier ones within the same tick.

use serde::{Deserialize, Serialize};

use crate::consts::{PLATFORM_EDGE_MARGIN, SCORE_ENEMY_KILL, TICK_RATE};

use super::combat;
use super::fx::{Fx, FxKind};
use super::platform::{LandingRules, resolve_landing};
use super::projectile::{Projectile, ProjectileKind};
use super::state::{GameEvent, GamePhase, World};

/// Keyboard state for one tick. Held keys are level-triggered; jumps are
/// edge-triggered by the event shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump key held (also drags the gun upward)
    pub up: bool,
    /// Descend through the current platform (also drags the gun downward)
    pub down: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub aim_left: bool,
    pub aim_right: bool,
    pub aim_up: bool,
    pub aim_down: bool,
}

const WALKER_RULES: LandingRules = LandingRules {
    edge_margin: PLATFORM_EDGE_MARGIN,
    require_falling: true,
    require_feet_above_center: true,
};

/// Enemies hug their platform: no edge slack, no descend, no jump arc.
const ENEMY_RULES: LandingRules = LandingRules {
    edge_margin: 0.0,
    require_falling: false,
    require_feet_above_center: false,
};

/// Advance the world by one fixed tick.
pub fn tick(world: &mut World, input: &TickInput) {
    world.events.clear();
    if world.phase == GamePhase::GameOver {
        return;
    }
    world.time_ticks += 1;
    world.time_ms = world.time_ticks * 1000 / TICK_RATE;
    let now = world.time_ms;

    // --- intents ---
    world.player.begin_tick();
    world
        .player
        .control(input, now, &mut world.events, &mut world.fx);
    let player_pos = world.player.body.pos;
    let player_half_h = world.player.hitbox.h / 2.0;
    if let Some((pos, vel)) = world
        .player
        .gun
        .update(input, now, player_pos, player_half_h)
    {
        let id = world.next_entity_id();
        world
            .player_shots
            .push(Projectile::new(id, ProjectileKind::Bullet, pos, vel));
        world.events.push(GameEvent::Shot);
    }

    world.boss.begin_tick();
    if world.boss.is_alive {
        world.boss.track(world.player.future.pos.x);
        world.boss.hold_altitude();
        if let Some((kind, pos, vel)) = world.boss.try_shoot(now, &mut world.rng) {
            let id = world.next_entity_id();
            world.boss_shots.push(Projectile::new(id, kind, pos, vel));
            let flash = match kind {
                ProjectileKind::FireBall => FxKind::FireBallFlash,
                _ => FxKind::IceShardFlash,
            };
            world.fx.push(Fx::new(flash, pos));
            world.events.push(GameEvent::BossShot(kind));
        }
    }

    for enemy in world.enemies.iter_mut().filter(|e| e.alive) {
        enemy.begin_tick();
        if !enemy.is_dying {
            enemy.patrol();
        }
    }

    // --- integration (positions always move before collisions resolve) ---
    world.player.integrate();
    world.boss.integrate();
    for enemy in world.enemies.iter_mut().filter(|e| e.alive) {
        enemy.integrate();
    }
    for shot in world
        .player_shots
        .iter_mut()
        .chain(world.boss_shots.iter_mut())
        .filter(|s| s.alive)
    {
        shot.integrate();
    }

    // --- platform collision ---
    let probe = resolve_landing(
        &world.player.hitbox,
        world.player.body.pos,
        world.player.body.vel.y,
        world.player.is_descending,
        &WALKER_RULES,
        &world.platforms,
    );
    world
        .player
        .apply_landing(probe, &mut world.events, &mut world.fx);
    world.player.update_fall_state();

    for enemy in world.enemies.iter_mut().filter(|e| e.alive) {
        let probe = resolve_landing(
            &enemy.hitbox,
            enemy.body.pos,
            enemy.body.vel.y,
            false,
            &ENEMY_RULES,
            &world.platforms,
        );
        enemy.apply_landing(probe, &world.platforms);
    }

    world.boss.collide_platforms_while_dead(&world.platforms);

    for shot in world.player_shots.iter_mut().filter(|s| s.alive) {
        if shot.bounce_walls().is_some() {
            world.fx.push(Fx::new(FxKind::BulletBounce, shot.body.pos));
            world.events.push(GameEvent::BulletBounced);
        }
    }

    // --- combat ---
    combat::bullets_vs_boss(
        &mut world.boss,
        &mut world.player_shots,
        &mut world.score,
        now,
        &mut world.fx,
        &mut world.events,
    );
    for enemy in &mut world.enemies {
        combat::bullets_vs_enemy(
            enemy,
            &mut world.player_shots,
            &mut world.fx,
            &mut world.events,
        );
        combat::enemy_melee_player(enemy, &mut world.player, now, &mut world.events);
        enemy.start_dying();
    }
    combat::boss_shots_vs_player(
        &mut world.player,
        &mut world.boss_shots,
        &mut world.fx,
        &mut world.events,
    );
    combat::boss_touch_player(&mut world.player, &world.boss, &mut world.events);

    // --- animation ---
    world.player.animate(now);
    world.boss.animate(now);
    for enemy in world.enemies.iter_mut().filter(|e| e.alive) {
        if enemy.animate(now) {
            world.score += SCORE_ENEMY_KILL;
            world.events.push(GameEvent::EnemyKilled);
        }
    }
    for shot in world
        .player_shots
        .iter_mut()
        .chain(world.boss_shots.iter_mut())
        .filter(|s| s.alive)
    {
        shot.animate(now);
    }
    for fx in &mut world.fx {
        fx.update(now);
    }

    // --- predictive AI (reads the score written by this tick's combat) ---
    world.player.future.tune(world.score);
    let center = world.player.center();
    let vel = world.player.body.vel;
    world.player.future.update(now, center, vel);

    // --- lifecycle ---
    if world.boss.ready_to_respawn(now) {
        world.boss.respawn(&mut world.rng);
        world.events.push(GameEvent::BossRespawned);
        log::info!("boss respawned at t={now}ms");
    }
    for enemy in &mut world.enemies {
        if enemy.alive && !enemy.is_dying && enemy.cull_below_screen() {
            world.score += SCORE_ENEMY_KILL;
            world.events.push(GameEvent::EnemyKilled);
        }
    }
    for shot in world
        .player_shots
        .iter_mut()
        .chain(world.boss_shots.iter_mut())
    {
        if shot.alive && shot.offscreen() {
            shot.alive = false;
        }
    }
    world.cull_platforms();
    for pow in &mut world.powerups {
        if pow.try_collect(&mut world.player) {
            world.events.push(GameEvent::PowerUpCollected(pow.kind));
        }
        pow.cull_below_screen();
    }

    // --- scrolling, spawning, compaction ---
    world.scroll_with_screen();
    world.apply_death_plunge();
    world.spawn_scrolled_platforms();
    world.spawn_powerups();
    world.compact();
    world.check_game_over();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use glam::Vec2;

    fn run_ticks(world: &mut World, input: &TickInput, n: usize) {
        for _ in 0..n {
            tick(world, input);
        }
    }

    #[test]
    fn test_player_falls_and_lands_on_ground_once() {
        let mut world = World::new(5);
        let idle = TickInput::default();
        let mut landed_events = 0;
        for _ in 0..120 {
            tick(&mut world, &idle);
            landed_events += world
                .events
                .iter()
                .filter(|e| **e == GameEvent::Landed)
                .count();
        }
        let ground_top = SCREEN_HEIGHT - 48.0;
        assert_eq!(world.player.body.pos.y, ground_top);
        assert_eq!(world.player.body.vel.y, 0.0);
        assert!(world.player.can_jump);
        assert_eq!(landed_events, 1, "landing event fires once per touchdown");
    }

    #[test]
    fn test_jump_rises_then_relands() {
        let mut world = World::new(5);
        let idle = TickInput::default();
        run_ticks(&mut world, &idle, 60); // settle on the ground
        let rest_y = world.player.body.pos.y;

        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut world, &jump);
        assert!(world.player.is_jumping);
        assert!(world.player.body.vel.y < 0.0);
        assert!(world.events.contains(&GameEvent::Jumped));

        // Rise and fall back down within a few seconds
        run_ticks(&mut world, &idle, 240);
        assert_eq!(world.player.body.pos.y, rest_y);
        assert!(!world.player.is_jumping);
        assert!(world.player.can_jump);
    }

    #[test]
    fn test_boss_shot_cleanup_has_no_score_side_effect() {
        let mut world = World::new(5);
        run_ticks(&mut world, &TickInput::default(), 30);
        let score_before = world.score;

        let id = world.next_entity_id();
        world.boss_shots.push(Projectile::new(
            id,
            ProjectileKind::FireBall,
            Vec2::new(300.0, 700.0),
            Vec2::new(0.0, 5.0),
        ));
        run_ticks(&mut world, &TickInput::default(), 20);
        assert!(world.boss_shots.iter().all(|s| s.id != id));
        assert_eq!(world.score, score_before);
    }

    #[test]
    fn test_boss_fires_downward_every_two_seconds() {
        let mut world = World::new(5);
        // Park the player somewhere the shots won't land on it
        let idle = TickInput::default();
        let mut shot_events = 0;
        for _ in 0..(60 * 5) {
            tick(&mut world, &idle);
            shot_events += world
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::BossShot(_)))
                .count();
        }
        assert_eq!(shot_events, 2, "one volley at ~2s and one at ~4s");
        for shot in &world.boss_shots {
            assert_eq!(shot.body.vel.x, 0.0);
            assert!(shot.body.vel.y > 0.0);
        }
    }

    #[test]
    fn test_hitboxes_track_bodies_after_tick() {
        let mut world = World::new(5);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        run_ticks(&mut world, &input, 45);
        let p = &world.player;
        assert_eq!(p.hitbox.center().x, p.body.pos.x);
        assert_eq!(p.hitbox.bottom(), p.body.pos.y);
        let b = &world.boss;
        assert_eq!(b.hitbox.center(), b.body.pos);
    }

    #[test]
    fn test_walking_accelerates_and_friction_caps_speed() {
        let mut world = World::new(5);
        let idle = TickInput::default();
        run_ticks(&mut world, &idle, 60);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        run_ticks(&mut world, &right, 300);
        // Grassy ground: friction -0.1 caps speed at BASE_ACC/0.1 = 5
        assert!(world.player.body.vel.x > 0.0);
        assert!(world.player.body.vel.x <= 5.0 + 1e-3);
    }

    #[test]
    fn test_determinism_same_seed_same_inputs() {
        let mut a = World::new(0xC0FFEE);
        let mut b = World::new(0xC0FFEE);
        let scripts = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                jump_pressed: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                aim_down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..600 {
            let input = &scripts[i % scripts.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }
        let ja = serde_json::to_string(&a).expect("serialize a");
        let jb = serde_json::to_string(&b).expect("serialize b");
        assert_eq!(ja, jb);
    }

    #[test]
    fn test_dead_boss_stops_tracking_and_shooting() {
        let mut world = World::new(5);
        world.boss.is_alive = false;
        world.boss.is_dying = true;
        world.boss.health = 0.0;
        world.boss.death_ms = 1;
        // Park the carcass below every platform so nothing catches it
        world.boss.body.pos = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT + 200.0);

        run_ticks(&mut world, &TickInput::default(), 120);
        assert!(world.boss_shots.is_empty());
        // Gravity keeps pulling the carcass down
        assert!(world.boss.body.vel.y > 0.0);
    }

    #[test]
    fn test_boss_respawns_after_delay_once_below_screen() {
        let mut world = World::new(5);
        world.boss.is_alive = false;
        world.boss.is_dying = true;
        world.boss.health = 0.0;
        world.boss.death_ms = 1;
        world.boss.body.pos = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT + 500.0);

        // 10s respawn delay at 60Hz
        let mut respawned = false;
        for _ in 0..(60 * 11) {
            tick(&mut world, &TickInput::default());
            if world.events.contains(&GameEvent::BossRespawned) {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        assert!(world.boss.is_alive);
        assert_eq!(world.boss.health, world.boss.max_health);
    }
}
