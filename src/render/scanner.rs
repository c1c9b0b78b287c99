//! Raycast surface detection
//!
//! Casts a fixed mix of horizontal, downward and upward rays from the camera
//! against the block oracle and reports the first solid block each ray meets.
//! The horizontal rays find walls and cliff faces; the downward rays find the
//! ground when the camera is high up; the upward rays find ceilings and tree
//! canopy when the camera is low or underground.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::constants::*;
use crate::core::BlockCoordinate;
use crate::world::oracle::BlockOracle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RayClass {
    Horizontal,
    Downward,
    Upward,
}

/// Outcome of one ray. Recomputed every scan, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Unit direction the ray travelled in.
    pub direction: Vec3,
    pub class: RayClass,
    /// Distance travelled when the ray stopped.
    pub distance: f32,
    /// Height of the block that stopped the ray (last visited row on a miss).
    pub hit_y: i32,
    pub hit: bool,
}

/// Ray layout for a given budget, relative to yaw 0.
#[derive(Debug, Clone)]
pub struct VisibilityScanner {
    ray_count: u32,
    rays: Vec<(RayClass, f32, f32)>,
}

impl VisibilityScanner {
    /// The budget is clamped to `MIN_RAY_COUNT..=MAX_RAY_COUNT`.
    pub fn new(ray_count: u32) -> Self {
        let ray_count = ray_count.clamp(MIN_RAY_COUNT, MAX_RAY_COUNT);
        // 2:1:1 split; integer division keeps the total exact.
        let vertical = (ray_count / 4).max(1);
        let horizontal = ray_count - 2 * vertical;
        let pitch = VERTICAL_RAY_PITCH_DEG.to_radians();

        let mut rays = Vec::with_capacity(ray_count as usize);
        for i in 0..horizontal {
            rays.push((RayClass::Horizontal, i as f32 / horizontal as f32 * TAU, 0.0));
        }
        // Offset each vertical class so no two classes share an azimuth.
        for i in 0..vertical {
            let yaw = (i as f32 + 0.5) / vertical as f32 * TAU;
            rays.push((RayClass::Downward, yaw, -pitch));
        }
        for i in 0..vertical {
            let yaw = (i as f32 + 0.25) / vertical as f32 * TAU;
            rays.push((RayClass::Upward, yaw, pitch));
        }

        Self { ray_count, rays }
    }

    pub fn ray_count(&self) -> u32 {
        self.ray_count
    }

    /// Ray directions rotated by the camera yaw.
    pub fn directions(&self, camera_yaw: f32) -> impl Iterator<Item = (RayClass, Vec3)> + '_ {
        self.rays.iter().map(move |&(class, yaw, pitch)| {
            let yaw = yaw + camera_yaw;
            let dir = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
            (class, dir.normalize())
        })
    }

    /// Casts every ray. Returns exactly [`ray_count`](Self::ray_count) entries, or none at all
    /// when the oracle cannot answer anything.
    pub fn scan<O: BlockOracle + ?Sized>(
        &self,
        origin: Vec3,
        camera_yaw: f32,
        max_distance: f32,
        oracle: &O,
    ) -> Vec<SurfaceHit> {
        if !oracle.is_ready() {
            tracing::debug!("Block oracle not ready, skipping scan");
            return Vec::new();
        }

        self.directions(camera_yaw)
            .map(|(class, direction)| cast_ray(origin, direction, class, max_distance, oracle))
            .collect()
    }
}

/// One-shot scan without keeping the ray layout around.
pub fn scan<O: BlockOracle + ?Sized>(
    camera_position: Vec3,
    camera_yaw: f32,
    max_distance: f32,
    ray_count: u32,
    oracle: &O,
) -> Vec<SurfaceHit> {
    VisibilityScanner::new(ray_count).scan(camera_position, camera_yaw, max_distance, oracle)
}

/// Marches a ray in fixed steps until it enters a solid block or runs out of range.
pub fn cast_ray<O: BlockOracle + ?Sized>(
    origin: Vec3,
    direction: Vec3,
    class: RayClass,
    max_distance: f32,
    oracle: &O,
) -> SurfaceHit {
    let start = BlockCoordinate::containing(origin);
    let steps = (max_distance / RAY_STEP).floor().max(0.0) as u32;
    let mut prev = start;

    for i in 1..=steps {
        let distance = i as f32 * RAY_STEP;
        let current = BlockCoordinate::containing(origin + direction * distance);
        if current == prev {
            continue;
        }
        prev = current;

        // Nothing exists past the world limits in the direction of travel.
        if (direction.y < 0.0 && current.y < WORLD_FLOOR_Y)
            || (direction.y > 0.0 && current.y >= WORLD_CEILING_Y)
        {
            break;
        }

        match oracle.block_exists_at(current) {
            Ok(true) => {
                return SurfaceHit {
                    direction,
                    class,
                    distance,
                    hit_y: current.y,
                    hit: true,
                };
            }
            Ok(false) => {}
            Err(err) => {
                tracing::trace!("{err}, treating ray as a miss");
                break;
            }
        }
    }

    SurfaceHit {
        direction,
        class,
        distance: max_distance,
        hit_y: prev.y,
        hit: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockType;
    use crate::world::{FnOracle, World};

    fn count(hits: &[SurfaceHit], class: RayClass) -> usize {
        hits.iter().filter(|h| h.class == class).count()
    }

    #[test]
    fn ray_mix_is_two_to_one_to_one() {
        for n in [16, 24, 32, 64] {
            let scanner = VisibilityScanner::new(n);
            let dirs: Vec<_> = scanner.directions(0.0).collect();
            assert_eq!(dirs.len(), n as usize);
            let down = dirs.iter().filter(|(c, _)| *c == RayClass::Downward).count();
            let up = dirs.iter().filter(|(c, _)| *c == RayClass::Upward).count();
            assert_eq!(down, n as usize / 4);
            assert_eq!(up, n as usize / 4);
            for (class, dir) in dirs {
                assert!((dir.length() - 1.0).abs() < 1e-5);
                match class {
                    RayClass::Horizontal => assert!(dir.y.abs() < 1e-6),
                    RayClass::Downward => assert!(dir.y < -0.5),
                    RayClass::Upward => assert!(dir.y > 0.5),
                }
            }
        }
    }

    #[test]
    fn tiny_budgets_still_see_the_ground() {
        let oracle = FnOracle::new(|_, y, _| y <= 0);
        for n in 0..=3 {
            let hits = scan(Vec3::new(0.5, 12.0, 0.5), 0.0, 40.0, n, &oracle);
            assert_eq!(hits.len(), MIN_RAY_COUNT as usize);
            assert!(count(&hits, RayClass::Downward) >= 1);
            assert!(hits.iter().any(|h| h.class == RayClass::Downward && h.hit && h.hit_y == 0));
        }
        assert_eq!(VisibilityScanner::new(500).ray_count(), MAX_RAY_COUNT);
    }

    #[test]
    fn odd_budgets_still_return_exactly_ray_count_entries() {
        let oracle = FnOracle::new(|_, _, _| false);
        for n in [17, 23, 31] {
            assert_eq!(scan(Vec3::ZERO, 0.3, 10.0, n, &oracle).len(), n as usize);
        }
    }

    #[test]
    fn downward_rays_find_the_ground() {
        let oracle = FnOracle::new(|_, y, _| y <= 0);
        let hits = scan(Vec3::new(0.5, 12.0, 0.5), 0.0, 40.0, 16, &oracle);
        assert_eq!(hits.len(), 16);
        assert_eq!(count(&hits, RayClass::Downward), 4);
        for h in hits.iter().filter(|h| h.class == RayClass::Downward) {
            assert!(h.hit);
            assert_eq!(h.hit_y, 0);
        }
        assert!(hits.iter().filter(|h| h.class == RayClass::Horizontal).all(|h| !h.hit));
        assert!(hits.iter().filter(|h| h.class == RayClass::Upward).all(|h| !h.hit));
    }

    #[test]
    fn rays_stop_at_max_distance() {
        let oracle = FnOracle::new(|_, y, _| y <= -100);
        let hits = scan(Vec3::new(0.5, 0.5, 0.5), 0.0, 20.0, 16, &oracle);
        assert!(hits.iter().all(|h| !h.hit));
        assert!(hits.iter().all(|h| h.distance == 20.0));
    }

    #[test]
    fn the_starting_block_is_not_a_surface() {
        let oracle = FnOracle::new(|x, y, z| (x, y, z) == (0, 0, 0));
        let hits = scan(Vec3::new(0.5, 0.5, 0.5), 0.0, 10.0, 16, &oracle);
        assert!(hits.iter().all(|h| !h.hit));
    }

    #[test]
    fn unready_oracle_yields_no_hits() {
        let mut world = World::new();
        world.load_empty_area(0, 0, 1);
        world.set_ready(false);
        assert!(scan(Vec3::new(0.5, 5.0, 0.5), 0.0, 16.0, 16, &world).is_empty());
    }

    #[test]
    fn unloaded_chunks_end_rays_as_misses() {
        let mut world = World::new();
        world.load_empty_area(0, 0, 0);
        // Wall just past the loaded chunk; rays reach unloaded space first.
        let hits = scan(Vec3::new(8.5, 5.0, 8.5), 0.0, 40.0, 16, &world);
        assert_eq!(hits.len(), 16);
        assert!(hits.iter().all(|h| !h.hit));

        world.set_block(12, 5, 8, BlockType::Stone);
        let hits = scan(Vec3::new(8.5, 5.0, 8.5), 0.0, 40.0, 16, &world);
        let wall = hits
            .iter()
            .find(|h| h.class == RayClass::Horizontal && h.direction.x > 0.99)
            .copied();
        assert!(matches!(wall, Some(SurfaceHit { hit: true, hit_y: 5, .. })));
    }
}
