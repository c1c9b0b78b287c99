//! Heightmap terrain generation using FastNoiseLite
//!
//! Produces a small demo world for the operator CLI: rolling hills,
//! a stone underlayer, and scattered trees so that canopy surfaces
//! exist for upward rays to find.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::constants::*;
use crate::core::BlockType;
use crate::world::terrain::World;

const TREE_TRUNK_HEIGHT: i32 = 5;
const TREE_CHANCE_PERCENT: u32 = 2;
/// Terrain is only generated this far below the surface.
const SOIL_DEPTH: i32 = 24;

pub struct TerrainGenerator {
    noise_terrain: FastNoiseLite,
    noise_detail: FastNoiseLite,
    pub seed: u32,
}

impl TerrainGenerator {
    pub fn new(seed: u32) -> Self {
        TerrainGenerator {
            noise_terrain: Self::create_fbm_noise(seed, 0.01),
            noise_detail: Self::create_noise(seed.wrapping_add(1), 0.05),
            seed,
        }
    }

    fn create_noise(seed: u32, frequency: f32) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(frequency));
        noise
    }

    fn create_fbm_noise(seed: u32, frequency: f32) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(4));
        noise.set_fractal_lacunarity(Some(2.0));
        noise.set_fractal_gain(Some(0.5));
        noise.set_frequency(Some(frequency));
        noise
    }

    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        let (fx, fz) = (x as f32, z as f32);
        let base = self.noise_terrain.get_noise_2d(fx, fz) * 12.0;
        let detail = self.noise_detail.get_noise_2d(fx, fz) * 2.0;
        SEA_LEVEL + (base + detail).round() as i32
    }

    fn position_hash(&self, x: i32, z: i32) -> u32 {
        let mut h = self.seed;
        h = h.wrapping_mul(31).wrapping_add(x as u32);
        h = h.wrapping_mul(31).wrapping_add(z as u32);
        h ^= h >> 13;
        h = h.wrapping_mul(0x5bd1_e995);
        h ^ (h >> 15)
    }

    /// Generates one chunk column into `world`.
    pub fn generate_chunk(&self, world: &mut World, cx: i32, cz: i32) {
        world.ensure_chunk(cx, cz);
        let base_x = cx * CHUNK_SIZE;
        let base_z = cz * CHUNK_SIZE;

        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                let x = base_x + lx;
                let z = base_z + lz;
                let height = self.terrain_height(x, z);
                let bottom = (height - SOIL_DEPTH).max(WORLD_FLOOR_Y);

                for y in bottom..=height {
                    let block = if y == bottom && bottom == WORLD_FLOOR_Y {
                        BlockType::Bedrock
                    } else if y == height {
                        if height > 10 { BlockType::Snow } else { BlockType::Grass }
                    } else if y >= height - 3 {
                        BlockType::Dirt
                    } else {
                        BlockType::Stone
                    };
                    world.set_block(x, y, z, block);
                }

                // Keep canopies inside this chunk so generation order does not matter.
                let interior = (2..CHUNK_SIZE - 2).contains(&lx) && (2..CHUNK_SIZE - 2).contains(&lz);
                if interior && self.position_hash(x, z) % 100 < TREE_CHANCE_PERCENT {
                    self.place_tree(world, x, height + 1, z);
                }
            }
        }
    }

    fn place_tree(&self, world: &mut World, x: i32, y: i32, z: i32) {
        for dy in 0..TREE_TRUNK_HEIGHT {
            world.set_block(x, y + dy, z, BlockType::Wood);
        }
        let top = y + TREE_TRUNK_HEIGHT;
        for dy in -2..=0 {
            let radius = if dy == 0 { 1 } else { 2 };
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    if world.get_block(x + dx, top + dy, z + dz) == BlockType::Air {
                        world.set_block(x + dx, top + dy, z + dz, BlockType::Leaves);
                    }
                }
            }
        }
    }

    /// Generates a square of chunks centred on `(center_cx, center_cz)`.
    pub fn generate_area(&self, world: &mut World, center_cx: i32, center_cz: i32, radius: i32) {
        for cx in (center_cx - radius)..=(center_cx + radius) {
            for cz in (center_cz - radius)..=(center_cz + radius) {
                if !world.is_chunk_loaded(cx, cz) {
                    self.generate_chunk(world, cx, cz);
                }
            }
        }
    }

    /// A standing position on top of the terrain at `(x, z)`.
    pub fn spawn_point(&self, x: i32, z: i32) -> (f32, f32, f32) {
        (x as f32 + 0.5, (self.terrain_height(x, z) + 1) as f32, z as f32 + 0.5)
    }
}
