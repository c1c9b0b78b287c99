use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum BlockType {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Water,
    Wood,
    Leaves,
    Bedrock,
    Snow,
    /// Temporary geometry spawned by the benchmark scene.
    Marker,
}

impl BlockType {
    /// Whether a ray should stop at this block.
    pub fn is_solid(&self) -> bool {
        !matches!(self, BlockType::Air | BlockType::Water)
    }

    pub fn is_synthetic(&self) -> bool {
        *self == BlockType::Marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canopy_stops_rays_but_water_does_not() {
        assert!(BlockType::Leaves.is_solid());
        assert!(!BlockType::Leaves.is_synthetic());
        assert!(!BlockType::Water.is_solid());
        assert!(!BlockType::Air.is_solid());
        assert!(BlockType::Marker.is_solid());
    }
}
