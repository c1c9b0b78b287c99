//! World-side collaborators
//! Contains the block-existence oracle, the chunk store, demo terrain and structures.

pub mod generator;
pub mod oracle;
pub mod structures;
pub mod terrain;

// Re-export commonly used types
pub use generator::TerrainGenerator;
pub use oracle::{BlockOracle, FnOracle};
pub use structures::{BenchmarkRing, Structure};
pub use terrain::World;
