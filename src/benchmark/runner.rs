//! Benchmark state machine
//!
//! `Idle -> Running -> Cleanup -> Idle`. Cleanup is reached both when the
//! duration runs out and when the run is cancelled, and it always removes
//! the synthetic scene, hands input back and restores the camera yaw.

use std::f32::consts::TAU;
use std::time::{Duration, Instant};

use crate::benchmark::scene::SyntheticScene;
use crate::constants::*;
use crate::error::{CullError, Result};
use crate::player::{Camera, InputControl, InputSuppression};
use crate::profile::catalog::{BALANCED, GAMING, POTATO};
use crate::world::terrain::World;

/// Renders one frame and reports how long it took.
pub trait FrameSink {
    fn render_frame(&mut self, world: &World, camera: &Camera) -> Duration;
}

impl<F: FnMut(&World, &Camera) -> Duration> FrameSink for F {
    fn render_frame(&mut self, world: &World, camera: &Camera) -> Duration {
        self(world, camera)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub average_frame_ms: f32,
    pub sample_count: u32,
    pub recommended_profile: String,
    pub blocks_spawned: usize,
}

impl BenchmarkResult {
    pub fn average_fps(&self) -> f32 {
        if self.average_frame_ms > 0.0 {
            1000.0 / self.average_frame_ms
        } else {
            0.0
        }
    }
}

/// Maps an average frame time to the richest profile it can sustain.
pub fn recommend_profile(average_frame_ms: f32) -> &'static str {
    if average_frame_ms <= BENCHMARK_GAMING_FRAME_MS {
        GAMING
    } else if average_frame_ms <= BENCHMARK_BALANCED_FRAME_MS {
        BALANCED
    } else {
        POTATO
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BenchmarkPhase {
    Idle,
    Running {
        started_at: Instant,
        remaining: Duration,
    },
    Cleanup,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BenchmarkStatus {
    Idle,
    Running { progress: f32 },
    Finished(BenchmarkResult),
}

struct ActiveRun {
    scene: SyntheticScene,
    /// Dropped during cleanup, which returns input to the user.
    input: Option<InputSuppression>,
    start_yaw: f32,
    duration: Duration,
    elapsed: Duration,
    since_sample: Duration,
    sample_total_ms: f64,
    sample_count: u32,
    frame_total: Duration,
    frame_count: u32,
}

pub struct Benchmark {
    phase: BenchmarkPhase,
    run: Option<ActiveRun>,
    sample_interval: Duration,
}

impl Benchmark {
    pub fn new() -> Self {
        Self {
            phase: BenchmarkPhase::Idle,
            run: None,
            sample_interval: Duration::from_millis(BENCHMARK_SAMPLE_INTERVAL_MS),
        }
    }

    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    pub fn phase(&self) -> BenchmarkPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, BenchmarkPhase::Running { .. })
    }

    /// Spawns the scene and takes input away. Fails if a run is in progress.
    pub fn start(
        &mut self,
        duration_seconds: f32,
        world: &mut World,
        camera: &Camera,
        render_distance_chunks: u32,
        input: &InputControl,
    ) -> Result<()> {
        if self.run.is_some() {
            return Err(CullError::BenchmarkBusy);
        }

        let duration = match Duration::try_from_secs_f32(duration_seconds) {
            Ok(duration) if !duration.is_zero() => duration,
            _ => {
                tracing::warn!(
                    "Invalid benchmark duration {}, using {}s",
                    duration_seconds,
                    BENCHMARK_DEFAULT_DURATION_SECS
                );
                Duration::from_secs_f32(BENCHMARK_DEFAULT_DURATION_SECS)
            }
        };

        tracing::info!(
            "Starting {:.1}s benchmark at render distance {}",
            duration.as_secs_f32(),
            render_distance_chunks
        );
        let guard = input.suppress();
        let scene = SyntheticScene::spawn(world, camera, render_distance_chunks);

        self.run = Some(ActiveRun {
            scene,
            input: Some(guard),
            start_yaw: camera.yaw,
            duration,
            elapsed: Duration::ZERO,
            since_sample: Duration::ZERO,
            sample_total_ms: 0.0,
            sample_count: 0,
            frame_total: Duration::ZERO,
            frame_count: 0,
        });
        self.phase = BenchmarkPhase::Running {
            started_at: Instant::now(),
            remaining: duration,
        };
        Ok(())
    }

    /// Advances the run by one rendered frame.
    pub fn tick(&mut self, frame_time: Duration, world: &mut World, camera: &mut Camera) -> BenchmarkStatus {
        let Some(run) = self.run.as_mut() else {
            return BenchmarkStatus::Idle;
        };

        run.elapsed += frame_time;
        run.frame_total += frame_time;
        run.frame_count += 1;
        run.since_sample += frame_time;
        if run.since_sample >= self.sample_interval {
            run.sample_total_ms += frame_time.as_secs_f64() * 1000.0;
            run.sample_count += 1;
            run.since_sample = Duration::ZERO;
        }

        let progress = (run.elapsed.as_secs_f32() / run.duration.as_secs_f32()).min(1.0);
        camera.set_yaw(run.start_yaw + TAU * progress);

        if run.elapsed >= run.duration {
            return match self.cleanup(world, camera) {
                Some(result) => BenchmarkStatus::Finished(result),
                None => BenchmarkStatus::Idle,
            };
        }

        if let BenchmarkPhase::Running { remaining, .. } = &mut self.phase {
            *remaining = run.duration.saturating_sub(run.elapsed);
        }
        BenchmarkStatus::Running { progress }
    }

    /// Stops a run early. Runs the same cleanup as completion; the partial
    /// measurement is discarded. Returns whether a run was in progress.
    pub fn cancel(&mut self, world: &mut World, camera: &mut Camera) -> bool {
        if self.run.is_none() {
            return false;
        }
        tracing::info!("Benchmark cancelled");
        self.cleanup(world, camera);
        true
    }

    fn cleanup(&mut self, world: &mut World, camera: &mut Camera) -> Option<BenchmarkResult> {
        let mut run = self.run.take()?;
        self.phase = BenchmarkPhase::Cleanup;

        run.scene.remove(world);
        camera.set_yaw(run.start_yaw);
        run.input.take();

        self.phase = BenchmarkPhase::Idle;

        let average_frame_ms = if run.sample_count > 0 {
            (run.sample_total_ms / run.sample_count as f64) as f32
        } else if run.frame_count > 0 {
            run.frame_total.as_secs_f32() * 1000.0 / run.frame_count as f32
        } else {
            0.0
        };

        let result = BenchmarkResult {
            average_frame_ms,
            sample_count: run.sample_count,
            recommended_profile: recommend_profile(average_frame_ms).to_string(),
            blocks_spawned: run.scene.spawned_total(),
        };
        Some(result)
    }

    /// Runs a complete benchmark, driving `frames` until the duration
    /// elapses or `should_abort` returns true. Cleanup happens on every exit
    /// path, including a panic inside the renderer.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &mut self,
        duration_seconds: f32,
        world: &mut World,
        camera: &mut Camera,
        render_distance_chunks: u32,
        input: &InputControl,
        frames: &mut impl FrameSink,
        mut should_abort: impl FnMut(BenchmarkPhase) -> bool,
    ) -> Result<BenchmarkResult> {
        self.start(duration_seconds, world, camera, render_distance_chunks, input)?;
        let mut session = Session {
            benchmark: self,
            world,
            camera,
        };

        loop {
            if should_abort(session.benchmark.phase) {
                session.benchmark.cancel(session.world, session.camera);
                return Err(CullError::BenchmarkAborted {
                    reason: "cancelled by caller".to_string(),
                });
            }

            let frame_time = frames.render_frame(session.world, session.camera);
            match session.benchmark.tick(frame_time, session.world, session.camera) {
                BenchmarkStatus::Running { .. } => {}
                BenchmarkStatus::Finished(result) => {
                    tracing::info!(
                        "Benchmark finished: {:.2} ms/frame over {} samples, recommending {}",
                        result.average_frame_ms,
                        result.sample_count,
                        result.recommended_profile
                    );
                    return Ok(result);
                }
                BenchmarkStatus::Idle => {
                    return Err(CullError::BenchmarkAborted {
                        reason: "run ended without a result".to_string(),
                    });
                }
            }
        }
    }
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new()
    }
}

/// Cleans up on drop if the run is still going (early return or unwind).
struct Session<'a> {
    benchmark: &'a mut Benchmark,
    world: &'a mut World,
    camera: &'a mut Camera,
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if self.benchmark.run.is_some() {
            self.benchmark.cancel(self.world, self.camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockType;

    fn setup() -> (World, Camera, InputControl) {
        let mut world = World::new();
        world.load_empty_area(0, 0, 2);
        world.fill_layer(0, BlockType::Grass);
        (world, Camera::new((8.5, 1.0, 8.5)), InputControl::new())
    }

    fn fixed_frames(ms: u64) -> impl FnMut(&World, &Camera) -> Duration {
        move |_, _| Duration::from_millis(ms)
    }

    #[test]
    fn thresholds_pick_profiles() {
        assert_eq!(recommend_profile(8.0), GAMING);
        assert_eq!(recommend_profile(16.0), GAMING);
        assert_eq!(recommend_profile(20.0), BALANCED);
        assert_eq!(recommend_profile(33.0), BALANCED);
        assert_eq!(recommend_profile(50.0), POTATO);
    }

    #[test]
    fn full_run_rotates_samples_and_cleans_up() {
        let (mut world, mut camera, input) = setup();
        camera.yaw = 1.0;
        let mut bench = Benchmark::new();
        let mut yaws = Vec::new();
        let mut frames = |w: &World, c: &Camera| {
            assert!(input.is_suppressed());
            assert!(w.count_blocks(|b| b.is_synthetic()) > 0);
            yaws.push(c.yaw);
            Duration::from_millis(10)
        };

        let result = bench
            .run(2.0, &mut world, &mut camera, 1, &input, &mut frames, |_| false)
            .unwrap();

        assert_eq!(result.recommended_profile, GAMING);
        assert!((result.average_frame_ms - 10.0).abs() < 1e-3);
        assert_eq!(result.sample_count, 20);
        assert!(result.blocks_spawned > 0 && result.blocks_spawned <= BENCHMARK_MAX_BLOCKS);

        assert_eq!(world.count_blocks(|b| b.is_synthetic()), 0);
        assert!(!input.is_suppressed());
        assert_eq!(camera.yaw, 1.0);
        assert_eq!(bench.phase(), BenchmarkPhase::Idle);

        // The camera swept most of a full turn while frames were rendered.
        let swept = yaws.windows(2).map(|w| (w[1] - w[0]).rem_euclid(TAU)).sum::<f32>();
        assert!(swept > TAU * 0.95, "swept {swept}");
    }

    #[test]
    fn slow_frames_recommend_potato() {
        let (mut world, mut camera, input) = setup();
        let result = Benchmark::new()
            .run(1.0, &mut world, &mut camera, 0, &input, &mut fixed_frames(80), |_| false)
            .unwrap();
        assert_eq!(result.recommended_profile, POTATO);
        // 80ms frames cross the 100ms sample interval every second frame.
        assert_eq!(result.sample_count, 6);
    }

    #[test]
    fn abort_cleans_up_and_returns_no_result() {
        let (mut world, mut camera, input) = setup();
        let mut bench = Benchmark::new();
        let mut checks = 0;
        let err = bench
            .run(30.0, &mut world, &mut camera, 2, &input, &mut fixed_frames(16), |_| {
                checks += 1;
                checks > 5
            })
            .unwrap_err();

        assert!(matches!(err, CullError::BenchmarkAborted { .. }));
        assert_eq!(world.count_blocks(|b| b.is_synthetic()), 0);
        assert!(!input.is_suppressed());
        assert!(!bench.is_running());
    }

    #[test]
    fn renderer_panic_still_cleans_up() {
        let (mut world, mut camera, input) = setup();
        let probe = input.clone();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut frames = 0;
            let mut exploding = |_: &World, _: &Camera| {
                frames += 1;
                if frames == 3 {
                    panic!("GPU lost");
                }
                Duration::from_millis(16)
            };
            let _ = Benchmark::new().run(5.0, &mut world, &mut camera, 1, &input, &mut exploding, |_| false);
        }));

        assert!(outcome.is_err());
        assert_eq!(world.count_blocks(|b| b.is_synthetic()), 0);
        assert!(!probe.is_suppressed());
    }

    #[test]
    fn unusable_durations_fall_back_to_the_default() {
        let (mut world, mut camera, input) = setup();
        let default = Duration::from_secs_f32(BENCHMARK_DEFAULT_DURATION_SECS);
        for seconds in [1e20, f32::INFINITY, f32::NAN, -5.0, 0.0] {
            let mut bench = Benchmark::new();
            bench.start(seconds, &mut world, &camera, 1, &input).unwrap();
            match bench.phase() {
                BenchmarkPhase::Running { remaining, .. } => assert_eq!(remaining, default, "{seconds}"),
                other => panic!("unexpected phase {other:?}"),
            }
            assert!(bench.cancel(&mut world, &mut camera));
        }
        assert_eq!(world.count_blocks(|b| b.is_synthetic()), 0);
    }

    #[test]
    fn cooperative_ticks_and_busy_guard() {
        let (mut world, mut camera, input) = setup();
        let mut bench = Benchmark::new();
        bench.start(0.5, &mut world, &camera, 1, &input).unwrap();
        assert!(matches!(
            bench.start(0.5, &mut world, &camera, 1, &input),
            Err(CullError::BenchmarkBusy)
        ));

        let status = bench.tick(Duration::from_millis(200), &mut world, &mut camera);
        assert!(matches!(status, BenchmarkStatus::Running { progress } if (progress - 0.4).abs() < 1e-4));
        match bench.phase() {
            BenchmarkPhase::Running { remaining, .. } => assert_eq!(remaining, Duration::from_millis(300)),
            other => panic!("unexpected phase {other:?}"),
        }

        bench.tick(Duration::from_millis(200), &mut world, &mut camera);
        let status = bench.tick(Duration::from_millis(200), &mut world, &mut camera);
        assert!(matches!(status, BenchmarkStatus::Finished(ref r) if r.sample_count == 3));
        assert_eq!(bench.tick(Duration::from_millis(16), &mut world, &mut camera), BenchmarkStatus::Idle);
        assert!(!bench.cancel(&mut world, &mut camera));
        assert_eq!(world.count_blocks(|b| b.is_synthetic()), 0);
    }
}
