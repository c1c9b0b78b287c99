//! Visible-range scheduler
//!
//! Holds the current [`VisibleBounds`] that the per-block visibility check
//! reads every frame, and refreshes it on the profile's scan cadence rather
//! than every frame. A refresh runs the raycast scan when adaptive
//! visibility is on, falls back to the depth-based window when the scan has
//! no signal, and drops culling entirely when both engines are off.

use std::time::{Duration, Instant};

use crate::constants::{MIN_RAY_COUNT, WORLD_FLOOR_Y};
use crate::player::Camera;
use crate::profile::CullingProfile;
use crate::render::bounds::{VisibleBounds, compute_bounds};
use crate::render::scanner::VisibilityScanner;
use crate::render::vertical::compute_fallback;
use crate::world::oracle::BlockOracle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub refreshes: u64,
    pub adaptive: u64,
    pub fallback: u64,
    pub unbounded: u64,
}

pub struct VisibilityState {
    bounds: VisibleBounds,
    scanner: VisibilityScanner,
    last_refresh: Option<Instant>,
    stats: ScanStats,
}

impl VisibilityState {
    /// Starts unbounded until the first refresh.
    pub fn new() -> Self {
        Self {
            bounds: VisibleBounds::UNBOUNDED,
            scanner: VisibilityScanner::new(MIN_RAY_COUNT),
            last_refresh: None,
            stats: ScanStats::default(),
        }
    }

    pub fn bounds(&self) -> &VisibleBounds {
        &self.bounds
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Per-block check for the mesh layer.
    #[inline]
    pub fn is_visible(&self, block_y: i32) -> bool {
        self.bounds.contains(block_y)
    }

    /// Forces the next [`tick`](Self::tick) to refresh, e.g. after a profile change.
    pub fn invalidate(&mut self) {
        self.last_refresh = None;
    }

    pub fn is_due(&self, now: Instant, profile: &CullingProfile) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= profile.adaptive_visibility.scan_interval(),
        }
    }

    /// Time left until the next refresh is due.
    pub fn time_until_due(&self, now: Instant, profile: &CullingProfile) -> Duration {
        match self.last_refresh {
            None => Duration::ZERO,
            Some(last) => profile
                .adaptive_visibility
                .scan_interval()
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Refreshes the bounds if the scan interval elapsed. Returns whether it did.
    pub fn tick<O: BlockOracle + ?Sized>(
        &mut self,
        now: Instant,
        camera: &Camera,
        profile: &CullingProfile,
        oracle: &O,
    ) -> bool {
        if !self.is_due(now, profile) {
            return false;
        }
        self.refresh(camera, profile, oracle);
        self.last_refresh = Some(now);
        true
    }

    /// Recomputes the bounds immediately.
    pub fn refresh<O: BlockOracle + ?Sized>(
        &mut self,
        camera: &Camera,
        profile: &CullingProfile,
        oracle: &O,
    ) -> &VisibleBounds {
        let player_y = camera.block_y();
        let adaptive = &profile.adaptive_visibility;
        let vertical = &profile.vertical_culling;

        let scanned = if adaptive.enabled {
            if self.scanner.ray_count() != adaptive.ray_count {
                self.scanner = VisibilityScanner::new(adaptive.ray_count);
            }
            let hits = self.scanner.scan(
                camera.eye_position(),
                camera.yaw,
                profile.scan_distance(),
                oracle,
            );
            let bounds = compute_bounds(&hits, player_y, adaptive.buffer, WORLD_FLOOR_Y);
            if bounds.is_none() {
                tracing::debug!("No surface signal from {} rays, using fallback", hits.len());
            }
            bounds
        } else {
            None
        };

        self.bounds = match scanned {
            Some(bounds) => {
                self.stats.adaptive += 1;
                bounds
            }
            None if vertical.enabled => {
                self.stats.fallback += 1;
                compute_fallback(
                    player_y,
                    vertical.underground_depth,
                    vertical.aboveground_height,
                    vertical.height_limit_enabled,
                    WORLD_FLOOR_Y,
                )
            }
            None => {
                self.stats.unbounded += 1;
                VisibleBounds::UNBOUNDED
            }
        };
        self.stats.refreshes += 1;

        tracing::trace!(
            "Visible range {}..={} ({}, {} surfaces)",
            self.bounds.min_y,
            self.bounds.max_y,
            self.bounds.source,
            self.bounds.surface_count
        );
        &self.bounds
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WORLD_CEILING_Y;
    use crate::render::bounds::BoundsSource;
    use crate::world::FnOracle;

    #[test]
    fn refresh_follows_the_scan_rate() {
        let oracle = FnOracle::new(|_, y, _| y <= 0);
        let camera = Camera::new((0.5, 10.0, 0.5));
        let profile = CullingProfile::balanced();
        let mut state = VisibilityState::new();
        let t0 = Instant::now();

        assert!(state.tick(t0, &camera, &profile, &oracle));
        assert!(!state.tick(t0 + Duration::from_millis(50), &camera, &profile, &oracle));
        assert_eq!(
            state.time_until_due(t0 + Duration::from_millis(60), &profile),
            Duration::from_millis(40)
        );
        assert!(state.tick(t0 + Duration::from_millis(100), &camera, &profile, &oracle));

        state.invalidate();
        assert!(state.tick(t0 + Duration::from_millis(101), &camera, &profile, &oracle));
        assert_eq!(state.stats().refreshes, 3);
    }

    #[test]
    fn open_sky_uses_the_fallback() {
        let oracle = FnOracle::new(|_, _, _| false);
        let camera = Camera::new((0.5, 30.0, 0.5));
        let mut state = VisibilityState::new();
        let bounds = *state.refresh(&camera, &CullingProfile::balanced(), &oracle);
        assert_eq!(bounds.source, BoundsSource::Fallback);
        assert_eq!(bounds.min_y, 20);
        assert_eq!(bounds.max_y, WORLD_CEILING_Y);
        assert!(state.is_visible(25) && !state.is_visible(19));
    }

    #[test]
    fn disabled_adaptive_skips_the_scan() {
        let oracle = FnOracle::new(|_, _, _| panic!("oracle must not be queried"));
        let camera = Camera::new((0.5, 30.0, 0.5));
        let mut profile = CullingProfile::potato();
        profile.adaptive_visibility.enabled = false;
        let mut state = VisibilityState::new();
        let bounds = *state.refresh(&camera, &profile, &oracle);
        assert_eq!(bounds.source, BoundsSource::Fallback);
        assert_eq!((bounds.min_y, bounds.max_y), (22, 46));
    }

    #[test]
    fn classic_never_culls() {
        let oracle = FnOracle::new(|_, y, _| y <= 0);
        let mut state = VisibilityState::new();
        for y in [-40.0, 0.0, 12.0, 200.0] {
            let camera = Camera::new((0.5, y, 0.5));
            assert!(state.refresh(&camera, &CullingProfile::classic(), &oracle).is_unbounded());
            assert!(state.is_visible(crate::constants::WORLD_FLOOR_Y));
            assert!(state.is_visible(WORLD_CEILING_Y));
        }
    }
}
