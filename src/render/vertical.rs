use crate::constants::*;
use crate::render::bounds::{BoundsSource, VisibleBounds};

/// Depth-based window around the player. Used when the raycast scan has no
/// signal or adaptive visibility is switched off. Cannot fail.
pub fn compute_fallback(
    player_y: i32,
    underground_depth: i32,
    aboveground_height: i32,
    height_limit_enabled: bool,
    world_floor_y: i32,
) -> VisibleBounds {
    let min_y = world_floor_y.max(player_y.saturating_sub(underground_depth.max(0)));
    let max_y = if height_limit_enabled {
        player_y.saturating_add(aboveground_height.max(0))
    } else {
        WORLD_CEILING_Y
    };

    VisibleBounds::clamped(min_y, max_y, BoundsSource::Fallback, 0)
}
