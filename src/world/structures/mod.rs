pub mod ring;
pub mod structure;

pub use ring::BenchmarkRing;
pub use structure::Structure;
