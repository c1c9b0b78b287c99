// Core module with fundamental types
pub mod core;

// Player module with camera and input gating
pub mod player;

// Render module with visibility culling
pub mod render;

// World module with the block oracle and demo terrain
pub mod world;

// Render profiles and their persistence
pub mod profile;

// Hardware benchmark
pub mod benchmark;

// Other modules
pub mod constants;
pub mod error;
pub mod utils;

// Re-exports
pub use benchmark::{Benchmark, BenchmarkResult, SoftwareRenderer};
pub use constants::*;
pub use crate::core::{BlockCoordinate, BlockType, Chunk, SubChunk};
pub use error::{CullError, OracleUnavailable, Result};
pub use player::{Camera, InputControl, InputState};
pub use profile::{CullingProfile, ProfileManager};
pub use render::{BoundsSource, VisibilityState, VisibleBounds};
pub use world::{BlockOracle, FnOracle, TerrainGenerator, World};
