//! Skyclimb headless driver
//!
//! Seeds the simulation and plays a scripted run at the fixed tick rate,
//! logging progress. Useful for soak-testing the sim without a render
//! shell: `skyclimb [seed] [max_seconds]`.

use skyclimb::consts::TICK_RATE;
use skyclimb::{GameEvent, GamePhase, TickInput, World, tick};

fn parse_arg<T: std::str::FromStr>(n: usize, default: T) -> T {
    std::env::args()
        .nth(n)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Scripted input: run back and forth, hop regularly, and keep the trigger
/// held so the gun duels the boss.
fn scripted_input(ticks: u64) -> TickInput {
    let second = ticks / TICK_RATE;
    let phase = ticks % (TICK_RATE * 4);
    TickInput {
        left: second % 8 >= 4,
        right: second % 8 < 4,
        jump_pressed: phase == 0 || phase == TICK_RATE * 2,
        jump_released: phase == TICK_RATE / 2,
        aim_up: second % 3 != 2,
        aim_down: false,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let seed: u64 = parse_arg(1, 0xC0FFEE);
    let max_seconds: u64 = parse_arg(2, 120);

    log::info!("starting run: seed={seed} max={max_seconds}s");
    let mut world = World::new(seed);

    for t in 0..max_seconds * TICK_RATE {
        let input = scripted_input(t);
        tick(&mut world, &input);

        for event in &world.events {
            match event {
                GameEvent::BossKilled => log::info!("boss down, score {}", world.score),
                GameEvent::EnemyKilled => log::debug!("enemy down, score {}", world.score),
                GameEvent::PowerUpCollected(kind) => log::debug!("picked up {kind:?}"),
                _ => {}
            }
        }

        if t % TICK_RATE == 0 {
            log::debug!(
                "t={}s score={} hp={:.1} ammo={} boss_hp={:.1} platforms={}",
                t / TICK_RATE,
                world.score,
                world.player.health,
                world.player.gun.ammo,
                world.boss.health,
                world.platforms.len(),
            );
        }

        if world.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "run over: score {} after {:.1}s",
        world.score,
        world.time_ticks as f64 / TICK_RATE as f64
    );
}
