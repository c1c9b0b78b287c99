use std::time::{Duration, Instant};

use crate::benchmark::runner::FrameSink;
use crate::constants::*;
use crate::core::BlockCoordinate;
use crate::player::Camera;
use crate::profile::CullingProfile;
use crate::render::visibility::VisibilityState;
use crate::world::terrain::World;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
    pub skipped_subchunks: usize,
}

/// CPU stand-in for the mesh pass. Walks every loaded sub-chunk inside the
/// render distance and "draws" each solid block the visible range admits,
/// so frame time scales with what the culling lets through.
pub struct SoftwareRenderer {
    profile: CullingProfile,
    visibility: VisibilityState,
    last_frame: FrameStats,
}

impl SoftwareRenderer {
    pub fn new(profile: CullingProfile) -> Self {
        Self {
            profile,
            visibility: VisibilityState::new(),
            last_frame: FrameStats::default(),
        }
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    fn draw(&self, world: &World, camera: &Camera) -> FrameStats {
        let mut stats = FrameStats::default();
        let (pcx, pcz) = BlockCoordinate::containing(camera.position).chunk();
        let rd = self.profile.render_distance_chunks as i32;
        let bounds = self.visibility.bounds();

        for cx in (pcx - rd)..=(pcx + rd) {
            for cz in (pcz - rd)..=(pcz + rd) {
                let Some(chunk) = world.chunks.get(&(cx, cz)) else {
                    continue;
                };
                for (index, sub) in chunk.subchunks.iter().enumerate() {
                    let base_y = WORLD_FLOOR_Y + index as i32 * SUBCHUNK_HEIGHT;
                    if sub.is_empty || base_y > bounds.max_y || base_y + SUBCHUNK_HEIGHT <= bounds.min_y {
                        stats.skipped_subchunks += 1;
                        continue;
                    }
                    for (lx, plane) in sub.blocks.iter().enumerate() {
                        for (ly, row) in plane.iter().enumerate() {
                            let y = base_y + ly as i32;
                            for block in row.iter().filter(|b| b.is_solid()) {
                                if bounds.contains(y) {
                                    stats.drawn += 1;
                                    std::hint::black_box((lx, block));
                                } else {
                                    stats.culled += 1;
                                }
                            }
                        }
                    }
                }
            }
        }
        stats
    }
}

impl FrameSink for SoftwareRenderer {
    fn render_frame(&mut self, world: &World, camera: &Camera) -> Duration {
        let started = Instant::now();
        self.visibility.tick(started, camera, &self.profile, world);
        self.last_frame = self.draw(world, camera);
        started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockType;

    #[test]
    fn culling_reduces_drawn_blocks() {
        let mut world = World::new();
        world.load_empty_area(0, 0, 1);
        for y in -40..=0 {
            world.fill_layer(y, BlockType::Stone);
        }
        let camera = Camera::new((8.5, 1.0, 8.5));

        let mut classic = SoftwareRenderer::new(CullingProfile::classic());
        classic.render_frame(&world, &camera);
        let everything = classic.last_frame();
        assert_eq!(everything.drawn, 9 * 256 * 41);
        assert_eq!(everything.culled, 0);

        let mut balanced = SoftwareRenderer::new(CullingProfile::balanced());
        balanced.render_frame(&world, &camera);
        let culled = balanced.last_frame();
        assert!(culled.drawn < everything.drawn);
        assert!(culled.culled > 0);
        assert!(balanced.visibility().bounds().min_y >= -12);
    }
}
