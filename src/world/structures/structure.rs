use crate::core::block::BlockType;

/// A named set of blocks relative to an anchor point.
#[derive(Debug, Clone)]
pub struct Structure {
    pub name: String,
    pub blocks: Vec<(i32, i32, i32, BlockType)>,
}

impl Structure {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, x: i32, y: i32, z: i32, block: BlockType) -> Self {
        self.push_unique(x, y, z, block);
        self
    }

    /// Adds a block unless that offset is already occupied. Returns whether it was added.
    pub fn push_unique(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> bool {
        if self.blocks.iter().any(|&(bx, by, bz, _)| (bx, by, bz) == (x, y, z)) {
            return false;
        }
        self.blocks.push((x, y, z, block));
        true
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Absolute positions when anchored at `origin`.
    pub fn placed_at(&self, origin: (i32, i32, i32)) -> impl Iterator<Item = (i32, i32, i32, BlockType)> + '_ {
        self.blocks
            .iter()
            .map(move |&(x, y, z, b)| (origin.0 + x, origin.1 + y, origin.2 + z, b))
    }
}
