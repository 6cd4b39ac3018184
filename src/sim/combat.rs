//! Hit detection, damage, and knockback
//!
//! Rectangle-overlap tests per attacker/defender pair. Projectiles are
//! single-use; melee pairs are rate-limited by a cooldown timestamp so a
//! sustained overlap cannot hit every tick. Health crossing below 1 enters
//! the Dying lifecycle; dead actors take no further damage.

use super::boss::Boss;
use super::enemy::Enemy;
use super::fx::{Fx, FxKind};
use super::player::Player;
use super::projectile::{Owner, Projectile, ProjectileKind};
use super::state::GameEvent;
use crate::consts::SCORE_BOSS_KILL;

pub const BULLET_DAMAGE: f32 = 0.5;
pub const BULLET_DAMAGE_ENEMY: f32 = 1.0;
pub const FIREBALL_DAMAGE: f32 = 2.0;
pub const ICESHARD_DAMAGE: f32 = 1.0;
pub const MELEE_DAMAGE: f32 = 0.5;
pub const BOSS_TOUCH_DAMAGE: f32 = 0.5;
pub const BULLET_KNOCKBACK: f32 = 10.0;
pub const MELEE_KNOCKBACK: f32 = 20.0;
/// Downward bump applied to an ascending defender
pub const HURT_BUMP_VEL: f32 = 5.0;
pub const MELEE_COOLDOWN_MS: u64 = 1000;
/// Actors die when health drops strictly below this
pub const DEATH_THRESHOLD: f32 = 1.0;

/// +1 pushes the defender right, -1 left, 0 when horizontally aligned.
pub fn knockback_sign(attacker_x: f32, defender_x: f32) -> f32 {
    if attacker_x < defender_x {
        1.0
    } else if attacker_x > defender_x {
        -1.0
    } else {
        0.0
    }
}

/// Boss projectiles against the player. An ascending player is bumped back
/// down and loses the double jump, so knockback can't chain into a free
/// mid-air jump.
pub fn boss_shots_vs_player(
    player: &mut Player,
    shots: &mut [Projectile],
    fx: &mut Vec<Fx>,
    events: &mut Vec<GameEvent>,
) {
    for shot in shots
        .iter_mut()
        .filter(|s| s.alive && s.kind.owner() == Owner::Boss)
    {
        if !player.hitbox.overlaps(&shot.hitbox) {
            continue;
        }
        match shot.kind {
            ProjectileKind::FireBall => {
                player.health -= FIREBALL_DAMAGE;
                fx.push(Fx::new(FxKind::FireBallImpact, shot.body.pos));
            }
            _ => {
                player.health -= ICESHARD_DAMAGE;
                fx.push(Fx::new(FxKind::IceShardImpact, shot.body.pos));
            }
        }
        shot.alive = false;
        player.is_hurt = true;
        events.push(GameEvent::PlayerHurt);
        if player.body.vel.y < 0.0 {
            player.body.vel.y = HURT_BUMP_VEL;
            player.can_double_jump = false;
        }
    }
}

/// Touching the live boss while rising costs health and bumps the player
/// back down. Self-limited: the bump ends the ascending condition.
pub fn boss_touch_player(player: &mut Player, boss: &Boss, events: &mut Vec<GameEvent>) {
    if boss.is_alive && player.body.vel.y < 0.0 && player.hitbox.overlaps(&boss.hitbox) {
        player.health -= BOSS_TOUCH_DAMAGE;
        player.is_hurt = true;
        player.body.vel.y = HURT_BUMP_VEL;
        player.can_double_jump = false;
        events.push(GameEvent::PlayerHurt);
    }
}

/// Player bullets against the boss. Kills award score and start the boss's
/// dying sequence exactly once.
pub fn bullets_vs_boss(
    boss: &mut Boss,
    bullets: &mut [Projectile],
    score: &mut u32,
    now_ms: u64,
    fx: &mut Vec<Fx>,
    events: &mut Vec<GameEvent>,
) {
    for bullet in bullets
        .iter_mut()
        .filter(|b| b.alive && b.kind.owner() == Owner::Player)
    {
        if !boss.is_alive {
            break;
        }
        if !boss.hitbox.overlaps(&bullet.hitbox) {
            continue;
        }
        boss.is_hit = true;
        fx.push(Fx::new(FxKind::BulletImpact, bullet.body.pos));
        bullet.alive = false;
        boss.health -= BULLET_DAMAGE;
        events.push(GameEvent::BossHit);
        if boss.health < DEATH_THRESHOLD {
            boss.is_alive = false;
            boss.is_dying = true;
            boss.death_ms = now_ms;
            *score += SCORE_BOSS_KILL;
            fx.push(Fx::new(FxKind::BossBlood, boss.body.pos));
            events.push(GameEvent::BossKilled);
            log::info!("boss killed at t={now_ms}ms, score now {score}");
        }
    }
}

/// Player bullets against one enemy.
pub fn bullets_vs_enemy(
    enemy: &mut Enemy,
    bullets: &mut [Projectile],
    fx: &mut Vec<Fx>,
    events: &mut Vec<GameEvent>,
) {
    if !enemy.alive || enemy.is_dying {
        return;
    }
    for bullet in bullets
        .iter_mut()
        .filter(|b| b.alive && b.kind.owner() == Owner::Player)
    {
        if !enemy.hitbox.overlaps(&bullet.hitbox) {
            continue;
        }
        enemy.body.vel.x +=
            knockback_sign(bullet.body.pos.x, enemy.body.pos.x) * BULLET_KNOCKBACK;
        enemy.health -= BULLET_DAMAGE_ENEMY;
        fx.push(Fx::new(FxKind::BulletImpact, bullet.body.pos));
        bullet.alive = false;
        enemy.is_hurt = true;
        events.push(GameEvent::EnemyHurt);
    }
}

/// Enemy bite on contact, rate-limited per enemy.
pub fn enemy_melee_player(
    enemy: &mut Enemy,
    player: &mut Player,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    if !enemy.alive || enemy.is_dying {
        return;
    }
    if enemy.hitbox.overlaps(&player.hitbox)
        && now_ms - enemy.last_attack_ms > MELEE_COOLDOWN_MS
    {
        enemy.last_attack_ms = now_ms;
        enemy.is_attacking = true;
        player.health -= MELEE_DAMAGE;
        player.is_hurt = true;
        player.body.vel.x =
            knockback_sign(enemy.body.pos.x, player.body.pos.x) * MELEE_KNOCKBACK;
        events.push(GameEvent::EnemyMelee);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn bullet_at(pos: Vec2) -> Projectile {
        Projectile::new(1, ProjectileKind::Bullet, pos, Vec2::new(6.0, 0.0))
    }

    #[test]
    fn test_boss_dies_strictly_below_one_health() {
        // 0.5 damage per bullet from 10 health: hit 19 leaves 0.5 (alive),
        // hit 20 reaches 0.0 < 1 and kills.
        let mut boss = Boss::new();
        let mut score = 0;
        let mut fx = Vec::new();
        let mut events = Vec::new();

        for hit in 1..=20 {
            let mut bullets = vec![bullet_at(boss.body.pos)];
            bullets_vs_boss(&mut boss, &mut bullets, &mut score, 100, &mut fx, &mut events);
            assert!(!bullets[0].alive, "bullet is single-use");
            match hit {
                5 => assert_eq!(boss.health, 7.5),
                6 => assert_eq!(boss.health, 7.0),
                19 => {
                    assert_eq!(boss.health, 0.5);
                    assert!(boss.is_alive);
                }
                20 => {
                    assert_eq!(boss.health, 0.0);
                    assert!(!boss.is_alive);
                    assert!(boss.is_dying);
                }
                _ => {}
            }
        }
        assert_eq!(score, SCORE_BOSS_KILL);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::BossKilled).count(),
            1
        );
    }

    #[test]
    fn test_dead_boss_ignores_bullets() {
        let mut boss = Boss::new();
        boss.is_alive = false;
        boss.is_dying = true;
        boss.health = 0.0;
        let mut score = 0;
        let mut bullets = vec![bullet_at(boss.body.pos)];
        bullets_vs_boss(&mut boss, &mut bullets, &mut score, 100, &mut Vec::new(), &mut Vec::new());
        assert!(bullets[0].alive);
        assert_eq!(score, 0);
        assert_eq!(boss.health, 0.0);
    }

    #[test]
    fn test_enemy_knockback_direction() {
        use super::super::platform::{Platform, SurfaceKind};
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let plat = Platform::new(1, 0.0, 300.0, 300.0, 48.0, SurfaceKind::Grassy);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut enemy = Enemy::spawn_on(1, &plat, &mut rng);
        enemy.body.pos = Vec2::new(150.0, 300.0);
        enemy.hitbox.set_midbottom(enemy.body.pos);
        enemy.body.vel.x = 0.0;

        // Shot arriving from the left pushes it right
        let mut bullets = vec![bullet_at(Vec2::new(140.0, 280.0))];
        bullets_vs_enemy(&mut enemy, &mut bullets, &mut Vec::new(), &mut Vec::new());
        assert_eq!(enemy.body.vel.x, BULLET_KNOCKBACK);
        assert_eq!(enemy.health, super::super::enemy::ENEMY_MAX_HEALTH - 1.0);
        assert!(enemy.is_hurt);
    }

    #[test]
    fn test_dying_enemy_takes_no_damage() {
        use super::super::platform::{Platform, SurfaceKind};
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let plat = Platform::new(1, 0.0, 300.0, 300.0, 48.0, SurfaceKind::Grassy);
        let mut rng = Pcg32::seed_from_u64(12);
        let mut enemy = Enemy::spawn_on(1, &plat, &mut rng);
        enemy.health = 0.0;
        enemy.start_dying();

        let mut bullets = vec![bullet_at(enemy.body.pos)];
        bullets_vs_enemy(&mut enemy, &mut bullets, &mut Vec::new(), &mut Vec::new());
        assert!(bullets[0].alive);
        assert_eq!(enemy.health, 0.0);
    }

    #[test]
    fn test_melee_cooldown() {
        use super::super::platform::{Platform, SurfaceKind};
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let plat = Platform::new(1, 0.0, 700.0, 1280.0, 48.0, SurfaceKind::Grassy);
        let mut rng = Pcg32::seed_from_u64(13);
        let mut enemy = Enemy::spawn_on(1, &plat, &mut rng);
        let mut player = Player::new();
        // Stand them on top of each other
        player.body.pos = enemy.body.pos;
        player.hitbox.set_midbottom(player.body.pos);
        // Player to the right of the slime center gets pushed right... they
        // are aligned here, so nudge the player slightly
        player.body.pos.x += 5.0;
        player.hitbox.set_midbottom(player.body.pos);

        let mut events = Vec::new();
        enemy_melee_player(&mut enemy, &mut player, 1500, &mut events);
        assert_eq!(player.health, player.max_health - MELEE_DAMAGE);
        assert_eq!(player.body.vel.x, MELEE_KNOCKBACK);
        assert!(enemy.is_attacking);

        // Within cooldown: no second bite
        enemy_melee_player(&mut enemy, &mut player, 2000, &mut events);
        assert_eq!(player.health, player.max_health - MELEE_DAMAGE);

        // After cooldown
        enemy_melee_player(&mut enemy, &mut player, 2600, &mut events);
        assert_eq!(player.health, player.max_health - 2.0 * MELEE_DAMAGE);
    }

    #[test]
    fn test_ascending_player_bumped_down_by_fireball() {
        let mut player = Player::new();
        player.body.vel.y = -12.0;
        let mut shots = vec![Projectile::new(
            2,
            ProjectileKind::FireBall,
            player.center(),
            Vec2::new(0.0, 5.0),
        )];
        let mut events = Vec::new();
        boss_shots_vs_player(&mut player, &mut shots, &mut Vec::new(), &mut events);
        assert_eq!(player.health, player.max_health - FIREBALL_DAMAGE);
        assert_eq!(player.body.vel.y, HURT_BUMP_VEL);
        assert!(!player.can_double_jump);
        assert!(!shots[0].alive);
        assert!(player.is_hurt);
    }
}
