use rustc_hash::FxHashMap;

use crate::constants::*;
use crate::core::{BlockCoordinate, BlockType, Chunk};
use crate::error::OracleUnavailable;
use crate::world::oracle::BlockOracle;

/// Sparse chunk map. Unloaded chunks are unknown, not empty.
pub struct World {
    pub chunks: FxHashMap<(i32, i32), Chunk>,
    ready: bool,
}

impl World {
    pub fn new() -> Self {
        World {
            chunks: FxHashMap::default(),
            ready: true,
        }
    }

    /// Marks the whole world as (un)answerable, e.g. while generation is stalled.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn is_chunk_loaded(&self, cx: i32, cz: i32) -> bool {
        self.chunks.contains_key(&(cx, cz))
    }

    pub fn ensure_chunk(&mut self, cx: i32, cz: i32) -> &mut Chunk {
        self.chunks.entry((cx, cz)).or_default()
    }

    /// Loads an all-air square of chunks centred on `(center_cx, center_cz)`.
    pub fn load_empty_area(&mut self, center_cx: i32, center_cz: i32, radius: i32) {
        for cx in (center_cx - radius)..=(center_cx + radius) {
            for cz in (center_cz - radius)..=(center_cz + radius) {
                self.ensure_chunk(cx, cz);
            }
        }
    }

    /// Fills one horizontal layer across every loaded chunk.
    pub fn fill_layer(&mut self, y: i32, block: BlockType) {
        for chunk in self.chunks.values_mut() {
            for lx in 0..CHUNK_SIZE {
                for lz in 0..CHUNK_SIZE {
                    chunk.set_block(lx, y, lz, block);
                }
            }
        }
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if !(WORLD_FLOOR_Y..WORLD_CEILING_Y).contains(&y) {
            return BlockType::Air;
        }
        let at = BlockCoordinate::new(x, y, z);
        let (lx, lz) = at.local();
        match self.chunks.get(&at.chunk()) {
            Some(chunk) => chunk.get_block(lx, y, lz),
            None => BlockType::Air,
        }
    }

    /// Sets a block, loading its chunk if needed. Returns the replaced block.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> BlockType {
        if !(WORLD_FLOOR_Y..WORLD_CEILING_Y).contains(&y) {
            return BlockType::Air;
        }
        let at = BlockCoordinate::new(x, y, z);
        let (cx, cz) = at.chunk();
        let (lx, lz) = at.local();
        self.ensure_chunk(cx, cz).set_block(lx, y, lz, block)
    }

    pub fn remove_block(&mut self, x: i32, y: i32, z: i32) -> BlockType {
        self.set_block(x, y, z, BlockType::Air)
    }

    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).is_solid()
    }

    /// Counts loaded blocks matching `pred`. Skips empty sub-chunks.
    pub fn count_blocks(&self, pred: impl Fn(BlockType) -> bool) -> usize {
        let mut count = 0;
        for chunk in self.chunks.values() {
            for sub in chunk.subchunks.iter().filter(|s| !s.is_empty) {
                for plane in sub.blocks.iter() {
                    for row in plane.iter() {
                        count += row.iter().filter(|b| pred(**b)).count();
                    }
                }
            }
        }
        count
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockOracle for World {
    fn block_exists_at(&self, at: BlockCoordinate) -> Result<bool, OracleUnavailable> {
        if !(WORLD_FLOOR_Y..WORLD_CEILING_Y).contains(&at.y) {
            return Ok(false);
        }
        let (lx, lz) = at.local();
        match self.chunks.get(&at.chunk()) {
            Some(chunk) => Ok(chunk.get_block(lx, at.y, lz).is_solid()),
            None => Err(OracleUnavailable { at }),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
