// World constants
pub const WORLD_FLOOR_Y: i32 = -64;
pub const WORLD_CEILING_Y: i32 = 320;
pub const WORLD_HEIGHT: i32 = WORLD_CEILING_Y - WORLD_FLOOR_Y;
pub const CHUNK_SIZE: i32 = 16;
pub const SUBCHUNK_HEIGHT: i32 = 16;
pub const NUM_SUBCHUNKS: i32 = WORLD_HEIGHT / SUBCHUNK_HEIGHT;
pub const SEA_LEVEL: i32 = 0;

// Visibility scanner
pub const MIN_RAY_COUNT: u32 = 16;
pub const MAX_RAY_COUNT: u32 = 64;
pub const RAY_STEP: f32 = 1.0;
pub const VERTICAL_RAY_PITCH_DEG: f32 = 45.0;
pub const MIN_SCAN_RATE_HZ: f32 = 1.0;
pub const MAX_SCAN_RATE_HZ: f32 = 30.0;

// Render distance
pub const MAX_RENDER_DISTANCE_CHUNKS: u32 = 32;

// Vertical culling fallback
pub const MIN_UNDERGROUND_DEPTH: i32 = 8;

// Benchmark
pub const BENCHMARK_MAX_BLOCKS: usize = 200;
pub const BENCHMARK_DEFAULT_DURATION_SECS: f32 = 30.0;
pub const BENCHMARK_SAMPLE_INTERVAL_MS: u64 = 100;
pub const BENCHMARK_GAMING_FRAME_MS: f32 = 1000.0 / 60.0;
pub const BENCHMARK_BALANCED_FRAME_MS: f32 = 1000.0 / 30.0;
pub const BENCHMARK_MIN_RING_RADIUS: i32 = 4;

// Player constants
pub const PLAYER_EYE_HEIGHT: f32 = 1.62;

// Fog
pub const FOG_START_FRACTION: f32 = 0.6;
