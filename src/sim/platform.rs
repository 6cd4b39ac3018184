//! Platforms and the landing resolver
//!
//! Platforms are static rectangles with a surface kind that fixes their
//! friction. The resolver probes one unit below a falling body's hitbox and
//! decides, once per tick, whether the body lands and on which platform.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Surface tag fixing a platform's friction coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Grassy,
    Icy,
    Sandy,
}

impl SurfaceKind {
    pub fn friction(self) -> f32 {
        match self {
            SurfaceKind::Grassy => -0.10,
            SurfaceKind::Icy => -0.05,
            SurfaceKind::Sandy => -0.15,
        }
    }

    /// Parse an external configuration name. Unrecognized names are a
    /// configuration error, not recoverable.
    pub fn from_name(name: &str) -> Result<Self, UnknownSurface> {
        match name {
            "grassy" => Ok(SurfaceKind::Grassy),
            "icy" => Ok(SurfaceKind::Icy),
            "sandy" => Ok(SurfaceKind::Sandy),
            other => Err(UnknownSurface(other.to_string())),
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => SurfaceKind::Grassy,
            1 => SurfaceKind::Icy,
            _ => SurfaceKind::Sandy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSurface(pub String);

impl fmt::Display for UnknownSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid platform surface {:?}; options: \"grassy\", \"icy\", \"sandy\"",
            self.0
        )
    }
}

impl std::error::Error for UnknownSurface {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
    pub kind: SurfaceKind,
    pub alive: bool,
}

impl Platform {
    pub fn new(id: u32, x: f32, y: f32, w: f32, h: f32, kind: SurfaceKind) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, w, h),
            kind,
            alive: true,
        }
    }

    pub fn friction(&self) -> f32 {
        self.kind.friction()
    }
}

/// Per-actor knobs for the landing resolver.
#[derive(Debug, Clone, Copy)]
pub struct LandingRules {
    /// Horizontal slack beyond the platform span that still counts
    pub edge_margin: f32,
    /// Require non-negative vertical velocity (falling, not rising)
    pub require_falling: bool,
    /// Require the body's feet above the platform's vertical center, so a
    /// body passing upward through a slab is not snapped onto it
    pub require_feet_above_center: bool,
}

/// Outcome of one landing probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingProbe {
    /// No platform overlapped the probe rect
    None,
    /// Commit: snap to `top`, zero vertical velocity, adopt `friction`
    Landed {
        platform_index: usize,
        top: f32,
        friction: f32,
    },
    /// Descending body has cleared the platform's underside
    PassedThrough,
    /// Overlap without a landing commit (rising, descending, or off-span)
    Overlapping,
}

/// Probe one unit down, pick the lowest overlapped platform (greatest top
/// edge y - the one nearest a falling body when several overlap at once),
/// and test the commit conditions against it.
pub fn resolve_landing(
    hitbox: &Rect,
    pos: Vec2,
    vel_y: f32,
    descending: bool,
    rules: &LandingRules,
    platforms: &[Platform],
) -> LandingProbe {
    // Discrete sampling: a body falling more than a platform's height per
    // tick can skip past narrow platforms entirely. Accepted limitation.
    let mut probe = *hitbox;
    probe.shift_y(1.0);

    let mut lowest: Option<usize> = None;
    for (i, plat) in platforms.iter().enumerate() {
        if !plat.alive || !probe.overlaps(&plat.rect) {
            continue;
        }
        lowest = match lowest {
            Some(j) if platforms[j].rect.y >= plat.rect.y => Some(j),
            _ => Some(i),
        };
    }
    let Some(index) = lowest else {
        return LandingProbe::None;
    };

    let plat = &platforms[index];
    let on_span = plat.rect.left() - rules.edge_margin < pos.x
        && pos.x < plat.rect.right() + rules.edge_margin;
    let falling_ok = !rules.require_falling || vel_y >= 0.0;
    let feet_ok = !rules.require_feet_above_center || pos.y < plat.rect.center_y();

    if !descending && falling_ok && on_span && feet_ok {
        LandingProbe::Landed {
            platform_index: index,
            top: plat.rect.top(),
            friction: plat.friction(),
        }
    } else if pos.y > plat.rect.bottom() {
        LandingProbe::PassedThrough
    } else {
        LandingProbe::Overlapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLATFORM_EDGE_MARGIN;

    fn walker_rules() -> LandingRules {
        LandingRules {
            edge_margin: PLATFORM_EDGE_MARGIN,
            require_falling: true,
            require_feet_above_center: true,
        }
    }

    fn hitbox_at(pos: Vec2) -> Rect {
        Rect::from_midbottom(pos, 32.0, 28.0)
    }

    #[test]
    fn test_surface_parse() {
        assert_eq!(SurfaceKind::from_name("icy"), Ok(SurfaceKind::Icy));
        assert!(SurfaceKind::from_name("muddy").is_err());
    }

    #[test]
    fn test_lands_on_lowest_of_two_overlapped() {
        // Probe overlaps platforms topped at y=300 and y=350; the body must
        // land on the lower one (y=350).
        let platforms = vec![
            Platform::new(1, 0.0, 300.0, 400.0, 48.0, SurfaceKind::Grassy),
            Platform::new(2, 0.0, 350.0, 400.0, 48.0, SurfaceKind::Icy),
        ];
        let pos = Vec2::new(200.0, 350.0);
        let probe = resolve_landing(
            &hitbox_at(pos),
            pos,
            10.0,
            false,
            &walker_rules(),
            &platforms,
        );
        match probe {
            LandingProbe::Landed {
                platform_index,
                top,
                friction,
            } => {
                assert_eq!(platform_index, 1);
                assert_eq!(top, 350.0);
                assert_eq!(friction, SurfaceKind::Icy.friction());
            }
            other => panic!("expected landing, got {other:?}"),
        }
    }

    #[test]
    fn test_no_landing_while_rising() {
        let platforms = vec![Platform::new(1, 0.0, 300.0, 400.0, 48.0, SurfaceKind::Grassy)];
        let pos = Vec2::new(200.0, 301.0);
        let probe = resolve_landing(
            &hitbox_at(pos),
            pos,
            -5.0,
            false,
            &walker_rules(),
            &platforms,
        );
        assert_eq!(probe, LandingProbe::Overlapping);
    }

    #[test]
    fn test_no_landing_outside_span_margin() {
        let platforms = vec![Platform::new(1, 100.0, 300.0, 200.0, 48.0, SurfaceKind::Grassy)];
        // Just past the widened edge
        let pos = Vec2::new(311.0, 301.0);
        let probe = resolve_landing(
            &hitbox_at(pos),
            pos,
            4.0,
            false,
            &walker_rules(),
            &platforms,
        );
        assert_ne!(
            probe,
            LandingProbe::Landed {
                platform_index: 0,
                top: 300.0,
                friction: SurfaceKind::Grassy.friction()
            }
        );
        // Within the margin still counts
        let pos = Vec2::new(305.0, 301.0);
        let probe = resolve_landing(
            &hitbox_at(pos),
            pos,
            4.0,
            false,
            &walker_rules(),
            &platforms,
        );
        assert!(matches!(probe, LandingProbe::Landed { .. }));
    }

    #[test]
    fn test_descend_clears_after_passing_bottom() {
        let platforms = vec![Platform::new(1, 0.0, 300.0, 400.0, 48.0, SurfaceKind::Grassy)];
        let pos = Vec2::new(200.0, 349.0);
        let probe = resolve_landing(
            &hitbox_at(pos),
            pos,
            8.0,
            true,
            &walker_rules(),
            &platforms,
        );
        assert_eq!(probe, LandingProbe::PassedThrough);
    }

    #[test]
    fn test_dead_platforms_ignored() {
        let mut plat = Platform::new(1, 0.0, 300.0, 400.0, 48.0, SurfaceKind::Grassy);
        plat.alive = false;
        let pos = Vec2::new(200.0, 300.0);
        let probe = resolve_landing(
            &hitbox_at(pos),
            pos,
            5.0,
            false,
            &walker_rules(),
            &[plat],
        );
        assert_eq!(probe, LandingProbe::None);
    }
}
