//! Pickups that restock the player
//!
//! Spawned at the top of the screen once the player has climbed far enough,
//! nudged clear of any platform they would spawn inside, collected on
//! contact, and culled once they scroll below the screen.

use serde::{Deserialize, Serialize};

use crate::consts::SCREEN_HEIGHT;

use super::player::Player;
use super::rect::Rect;

const EXTENT: f32 = 24.0;
const RESTOCK: f32 = 5.0;
const RESTOCK_AMMO: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Ammo,
    Health,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub alive: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(x - EXTENT / 2.0, y - EXTENT / 2.0, EXTENT, EXTENT),
            alive: true,
        }
    }

    /// Apply the pickup if the player is touching it. Stats cap at the
    /// player's maximums.
    pub fn try_collect(&mut self, player: &mut Player) -> bool {
        if !self.alive || !self.rect.overlaps(&player.hitbox) {
            return false;
        }
        match self.kind {
            PowerUpKind::Ammo => {
                player.gun.ammo = (player.gun.ammo + RESTOCK_AMMO).min(player.gun.max_ammo);
            }
            PowerUpKind::Health => {
                player.health = (player.health + RESTOCK).min(player.max_health);
            }
        }
        self.alive = false;
        true
    }

    pub fn cull_below_screen(&mut self) {
        if self.rect.top() >= SCREEN_HEIGHT {
            self.alive = false;
        }
    }
}
