use std::f32::consts::TAU;

use super::Structure;
use crate::constants::BENCHMARK_MAX_BLOCKS;
use crate::core::block::BlockType;

const RING_SEGMENTS: usize = 48;
const RING_HEIGHT: i32 = 4;
const PILLAR_EVERY: usize = 6;

/// Stress geometry for the benchmark: two stacked rings joined by pillars.
///
/// Never exceeds `BENCHMARK_MAX_BLOCKS`, whatever the radius.
#[derive(Debug, Clone)]
pub struct BenchmarkRing {
    pub structure: Structure,
    pub radius: i32,
}

impl BenchmarkRing {
    pub fn new(radius: i32) -> Self {
        let radius = radius.max(1);
        let mut structure = Structure::new("BenchmarkRing");

        let points: Vec<(i32, i32)> = (0..RING_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / RING_SEGMENTS as f32 * TAU;
                (
                    (angle.cos() * radius as f32).round() as i32,
                    (angle.sin() * radius as f32).round() as i32,
                )
            })
            .collect();

        // Floor ring and roof ring
        for &(x, z) in &points {
            structure.push_unique(x, 0, z, BlockType::Marker);
            structure.push_unique(x, RING_HEIGHT, z, BlockType::Marker);
        }

        // Pillars
        for &(x, z) in points.iter().step_by(PILLAR_EVERY) {
            for y in 1..RING_HEIGHT {
                structure.push_unique(x, y, z, BlockType::Marker);
            }
        }

        structure.blocks.truncate(BENCHMARK_MAX_BLOCKS);
        Self { structure, radius }
    }
}
