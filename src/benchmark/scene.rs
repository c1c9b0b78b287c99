use crate::constants::*;
use crate::core::{BlockCoordinate, BlockType};
use crate::player::Camera;
use crate::world::structures::BenchmarkRing;
use crate::world::terrain::World;

/// Temporary benchmark geometry and the exact cells it occupies.
#[derive(Debug, Default)]
pub struct SyntheticScene {
    placed: Vec<BlockCoordinate>,
    spawned_total: usize,
}

impl SyntheticScene {
    /// Ring radius for a render distance. Grows with the render distance but
    /// the block count stays capped by [`BenchmarkRing`].
    pub fn ring_radius(render_distance_chunks: u32) -> i32 {
        BENCHMARK_MIN_RING_RADIUS + render_distance_chunks.min(MAX_RENDER_DISTANCE_CHUNKS) as i32 * CHUNK_SIZE / 2
    }

    /// Places the ring around the camera, shifted if needed so every block
    /// lands inside the rendered chunk square. Occupied or unloaded cells are
    /// skipped rather than overwritten.
    pub fn spawn(world: &mut World, camera: &Camera, render_distance_chunks: u32) -> Self {
        let feet = BlockCoordinate::containing(camera.position);
        let (cx, cz) = feet.chunk();
        let render_distance_chunks = render_distance_chunks.min(MAX_RENDER_DISTANCE_CHUNKS);
        let rd = render_distance_chunks as i32;
        let ring = BenchmarkRing::new(Self::ring_radius(render_distance_chunks));

        let lo_x = (cx - rd) * CHUNK_SIZE + ring.radius;
        let hi_x = (cx + rd + 1) * CHUNK_SIZE - 1 - ring.radius;
        let lo_z = (cz - rd) * CHUNK_SIZE + ring.radius;
        let hi_z = (cz + rd + 1) * CHUNK_SIZE - 1 - ring.radius;
        let center = (feet.x.clamp(lo_x, hi_x), feet.y, feet.z.clamp(lo_z, hi_z));

        let mut placed = Vec::with_capacity(ring.structure.len());
        for (x, y, z, block) in ring.structure.placed_at(center) {
            if !(WORLD_FLOOR_Y..WORLD_CEILING_Y).contains(&y) {
                continue;
            }
            let at = BlockCoordinate::new(x, y, z);
            let (bcx, bcz) = at.chunk();
            if !world.is_chunk_loaded(bcx, bcz) || world.get_block(x, y, z) != BlockType::Air {
                continue;
            }
            world.set_block(x, y, z, block);
            placed.push(at);
        }

        tracing::info!(
            "Spawned {} benchmark blocks (radius {}) around {:?}",
            placed.len(),
            ring.radius,
            center
        );
        let spawned_total = placed.len();
        Self {
            placed,
            spawned_total,
        }
    }

    /// Blocks still standing in the world.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Blocks ever spawned by this scene.
    pub fn spawned_total(&self) -> usize {
        self.spawned_total
    }

    pub fn cells(&self) -> &[BlockCoordinate] {
        &self.placed
    }

    /// Removes every synthetic block still in place. Safe to call repeatedly.
    pub fn remove(&mut self, world: &mut World) -> usize {
        let mut removed = 0;
        for at in self.placed.drain(..) {
            if world.get_block(at.x, at.y, at.z).is_synthetic() {
                world.remove_block(at.x, at.y, at.z);
                removed += 1;
            }
        }
        tracing::debug!("Removed {} benchmark blocks", removed);
        removed
    }
}
