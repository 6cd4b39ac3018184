//! One-shot visual effect entities
//!
//! Dust, impacts, and blood splats. They scroll with the world, play a
//! single sequence, and despawn on the final frame; no gameplay effect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animator, FrameSeq, FrameTable};
use super::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FxKind {
    JumpDust,
    LandDust,
    BulletImpact,
    BulletBounce,
    FireBallFlash,
    FireBallImpact,
    IceShardFlash,
    IceShardImpact,
    BossBlood,
}

impl FrameTable for FxKind {
    fn seq(self) -> FrameSeq {
        match self {
            FxKind::JumpDust => FrameSeq::one_shot(6, 50, 28.0, 28.0),
            FxKind::LandDust => FrameSeq::one_shot(4, 100, 44.0, 32.0),
            FxKind::BulletImpact => FrameSeq::one_shot(8, 50, 40.0, 40.0),
            FxKind::BulletBounce => FrameSeq::one_shot(4, 100, 40.0, 40.0),
            FxKind::FireBallFlash => FrameSeq::one_shot(12, 50, 80.0, 80.0),
            FxKind::FireBallImpact => FrameSeq::one_shot(8, 100, 80.0, 80.0),
            FxKind::IceShardFlash => FrameSeq::one_shot(4, 100, 96.0, 96.0),
            FxKind::IceShardImpact => FrameSeq::one_shot(4, 200, 96.0, 96.0),
            FxKind::BossBlood => FrameSeq::one_shot(4, 100, 100.0, 100.0),
        }
    }
}

impl FxKind {
    /// Dust clouds sit on the ground under the actor; everything else
    /// centers on the impact point.
    fn bottom_anchored(self) -> bool {
        matches!(self, FxKind::JumpDust | FxKind::LandDust)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fx {
    pub kind: FxKind,
    pub pos: Vec2,
    pub anim: Animator<FxKind>,
    pub alive: bool,
}

impl Fx {
    pub fn new(kind: FxKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            anim: Animator::new(kind),
            alive: true,
        }
    }

    pub fn update(&mut self, now_ms: u64) {
        if self.anim.advance(now_ms) {
            self.alive = false;
        }
    }

    pub fn render_rect(&self) -> Rect {
        let (w, h) = self.anim.frame_size();
        if self.kind.bottom_anchored() {
            Rect::from_midbottom(self.pos, w, h)
        } else {
            Rect::from_center(self.pos, w, h)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_despawns_after_sequence() {
        let mut fx = Fx::new(FxKind::LandDust, Vec2::new(100.0, 200.0));
        let mut now = 0;
        // 4 frames at 100ms: alive until the final frame is reached
        for _ in 0..3 {
            now += 101;
            fx.update(now);
        }
        assert!(!fx.alive);
    }

    #[test]
    fn test_dust_sits_on_ground() {
        let fx = Fx::new(FxKind::JumpDust, Vec2::new(100.0, 200.0));
        assert_eq!(fx.render_rect().bottom(), 200.0);
        let impact = Fx::new(FxKind::BulletImpact, Vec2::new(100.0, 200.0));
        assert_eq!(impact.render_rect().center(), Vec2::new(100.0, 200.0));
    }
}
