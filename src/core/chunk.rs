use crate::constants::*;
use crate::core::block::BlockType;

pub struct SubChunk {
    pub blocks: [[[BlockType; CHUNK_SIZE as usize]; SUBCHUNK_HEIGHT as usize]; CHUNK_SIZE as usize],
    pub is_empty: bool,
    /// Number of non-air blocks, kept so `is_empty` never needs a full sweep.
    pub solid_count: u32,
}

impl SubChunk {
    pub fn new() -> Self {
        SubChunk {
            blocks: [[[BlockType::Air; CHUNK_SIZE as usize]; SUBCHUNK_HEIGHT as usize];
                CHUNK_SIZE as usize],
            is_empty: true,
            solid_count: 0,
        }
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if self.is_empty {
            return BlockType::Air;
        }
        if x >= 0 && x < CHUNK_SIZE && y >= 0 && y < SUBCHUNK_HEIGHT && z >= 0 && z < CHUNK_SIZE {
            self.blocks[x as usize][y as usize][z as usize]
        } else {
            BlockType::Air
        }
    }

    /// Returns the block that was replaced.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> BlockType {
        if x >= 0 && x < CHUNK_SIZE && y >= 0 && y < SUBCHUNK_HEIGHT && z >= 0 && z < CHUNK_SIZE {
            let slot = &mut self.blocks[x as usize][y as usize][z as usize];
            let previous = *slot;
            *slot = block;
            match (previous == BlockType::Air, block == BlockType::Air) {
                (true, false) => self.solid_count += 1,
                (false, true) => self.solid_count -= 1,
                _ => {}
            }
            self.is_empty = self.solid_count == 0;
            previous
        } else {
            BlockType::Air
        }
    }
}

impl Default for SubChunk {
    fn default() -> Self {
        Self::new()
    }
}

/// A full column of sub-chunks spanning `WORLD_FLOOR_Y..WORLD_CEILING_Y`.
pub struct Chunk {
    pub subchunks: Vec<SubChunk>,
}

impl Chunk {
    pub fn new() -> Self {
        let mut subchunks = Vec::with_capacity(NUM_SUBCHUNKS as usize);
        for _ in 0..NUM_SUBCHUNKS {
            subchunks.push(SubChunk::new());
        }
        Chunk { subchunks }
    }

    fn section(y: i32) -> Option<(usize, i32)> {
        if !(WORLD_FLOOR_Y..WORLD_CEILING_Y).contains(&y) {
            return None;
        }
        let rel = y - WORLD_FLOOR_Y;
        Some(((rel / SUBCHUNK_HEIGHT) as usize, rel % SUBCHUNK_HEIGHT))
    }

    /// `x`/`z` are chunk-local, `y` is a world height.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        match Self::section(y) {
            Some((idx, local_y)) => self.subchunks[idx].get_block(x, local_y, z),
            None => BlockType::Air,
        }
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> BlockType {
        match Self::section(y) {
            Some((idx, local_y)) => self.subchunks[idx].set_block(x, local_y, z, block),
            None => BlockType::Air,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subchunks.iter().all(|s| s.is_empty)
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}
