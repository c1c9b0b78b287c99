use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::render::scanner::{RayClass, SurfaceHit};

/// Which engine produced a bound. Diagnostics only; consumers treat every
/// variant as a plain `[min_y, max_y]` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsSource {
    Adaptive,
    Fallback,
    /// Vertical culling switched off.
    Unbounded,
}

impl std::fmt::Display for BoundsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsSource::Adaptive => write!(f, "adaptive"),
            BoundsSource::Fallback => write!(f, "fallback"),
            BoundsSource::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Inclusive vertical window of blocks worth rendering.
///
/// Always `WORLD_FLOOR_Y <= min_y <= max_y <= WORLD_CEILING_Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleBounds {
    pub min_y: i32,
    pub max_y: i32,
    pub source: BoundsSource,
    pub surface_count: u32,
}

impl VisibleBounds {
    pub const UNBOUNDED: VisibleBounds = VisibleBounds {
        min_y: WORLD_FLOOR_Y,
        max_y: WORLD_CEILING_Y,
        source: BoundsSource::Unbounded,
        surface_count: 0,
    };

    /// Builds a window clamped to the world, repairing an inverted range.
    pub fn clamped(min_y: i32, max_y: i32, source: BoundsSource, surface_count: u32) -> Self {
        let min_y = min_y.max(WORLD_FLOOR_Y);
        let max_y = max_y.min(WORLD_CEILING_Y).max(min_y);
        Self {
            min_y,
            max_y,
            source,
            surface_count,
        }
    }

    #[inline]
    pub fn contains(&self, block_y: i32) -> bool {
        block_y >= self.min_y && block_y <= self.max_y
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    pub fn is_unbounded(&self) -> bool {
        self.source == BoundsSource::Unbounded
    }
}

impl Default for VisibleBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Turns raw scan hits into a visible window.
///
/// Returns `None` when no ray hit anything; the caller then uses the
/// vertical-culling fallback. The only floor clamp is the absolute
/// `world_floor_y`: ground found far below the player must stay visible.
pub fn compute_bounds(
    hits: &[SurfaceHit],
    player_y: i32,
    buffer: i32,
    world_floor_y: i32,
) -> Option<VisibleBounds> {
    let mut lowest: Option<i32> = None;
    let mut highest: Option<i32> = None;
    let mut surface_count = 0u32;

    for hit in hits.iter().filter(|h| h.hit) {
        surface_count += 1;
        if matches!(hit.class, RayClass::Downward | RayClass::Horizontal) {
            lowest = Some(lowest.map_or(hit.hit_y, |y| y.min(hit.hit_y)));
        }
        if matches!(hit.class, RayClass::Upward | RayClass::Horizontal) {
            highest = Some(highest.map_or(hit.hit_y, |y| y.max(hit.hit_y)));
        }
    }

    if surface_count == 0 {
        return None;
    }

    // A side with no detections still keeps the player's own row in view.
    let buffer = buffer.max(0);
    let min_y = lowest
        .unwrap_or(player_y)
        .min(player_y)
        .saturating_sub(buffer)
        .max(world_floor_y);
    let max_y = highest.unwrap_or(player_y).max(player_y).saturating_add(buffer);

    Some(VisibleBounds::clamped(
        min_y,
        max_y,
        BoundsSource::Adaptive,
        surface_count,
    ))
}
