use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::CHUNK_SIZE;

/// Integer block position. Lookup key into the world oracle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BlockCoordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockCoordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block containing a world-space point.
    pub fn containing(point: Vec3) -> Self {
        Self {
            x: point.x.floor() as i32,
            y: point.y.floor() as i32,
            z: point.z.floor() as i32,
        }
    }

    pub fn chunk(&self) -> (i32, i32) {
        (self.x.div_euclid(CHUNK_SIZE), self.z.div_euclid(CHUNK_SIZE))
    }

    pub fn local(&self) -> (i32, i32) {
        (self.x.rem_euclid(CHUNK_SIZE), self.z.rem_euclid(CHUNK_SIZE))
    }
}
