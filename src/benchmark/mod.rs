//! Benchmark modules
//! Contains the synthetic scene, the run state machine and a CPU frame sink.

pub mod runner;
pub mod scene;
pub mod software;

// Re-export commonly used types
pub use runner::{Benchmark, BenchmarkPhase, BenchmarkResult, BenchmarkStatus, FrameSink, recommend_profile};
pub use scene::SyntheticScene;
pub use software::{FrameStats, SoftwareRenderer};
