//! Core data structures
//! Contains fundamental types like blocks, coordinates and chunk storage.

pub mod block;
pub mod chunk;
pub mod coord;

// Re-export commonly used types
pub use block::BlockType;
pub use chunk::{Chunk, SubChunk};
pub use coord::BlockCoordinate;
