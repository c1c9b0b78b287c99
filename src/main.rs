//! voxcull command line
//!
//! Inspects and switches culling profiles, runs one-off visibility scans over
//! generated terrain and runs the hardware benchmark.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use voxcull::benchmark::{Benchmark, SoftwareRenderer};
use voxcull::render::{LoggingFog, VisibilityState};
use voxcull::utils::settings::FileSettingsStore;
use voxcull::{Camera, CullError, CullingProfile, InputControl, ProfileManager, TerrainGenerator, World};

/// Adaptive visibility culling and render profiles for voxel worlds
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (default: per-user config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Terrain seed for scans and benchmarks
    #[arg(long, default_value_t = 1337)]
    seed: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in profiles
    Profiles,
    /// Show the active profile
    Show,
    /// Activate a built-in profile by name
    Apply { name: String },
    /// Override the depth-based fallback
    SetVertical {
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        enabled: bool,
        #[arg(long, default_value_t = false)]
        height_limit: bool,
        #[arg(long, default_value_t = 10)]
        depth: i32,
        #[arg(long, default_value_t = 24)]
        height: i32,
    },
    /// Override the raycast scanner
    SetAdaptive {
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        enabled: bool,
        #[arg(long, default_value_t = 24)]
        rays: u32,
        #[arg(long, default_value_t = 3)]
        buffer: i32,
        #[arg(long, default_value_t = 10.0)]
        rate: f32,
    },
    /// Scan the visible range at a position with the active profile
    Scan {
        #[arg(long, default_value_t = 0)]
        x: i32,
        #[arg(long, default_value_t = 0)]
        z: i32,
        /// Feet height; defaults to standing on the terrain
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f32>,
    },
    /// Measure frame times and recommend a profile
    Benchmark {
        #[arg(long, default_value_t = voxcull::BENCHMARK_DEFAULT_DURATION_SECS)]
        duration: f32,
        /// Apply the recommended profile afterwards
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
}

fn open_store(path: Option<PathBuf>) -> Result<FileSettingsStore, CullError> {
    match path {
        Some(path) => Ok(FileSettingsStore::new(path)),
        None => Ok(FileSettingsStore::user_default()?),
    }
}

fn print_profile(profile: &CullingProfile) {
    let vertical = &profile.vertical_culling;
    let adaptive = &profile.adaptive_visibility;
    println!("{}", profile.name);
    println!("  render distance   {} chunks", profile.render_distance_chunks);
    println!(
        "  vertical culling  {} (depth {}, height {}{})",
        if vertical.enabled { "on" } else { "off" },
        vertical.underground_depth,
        vertical.aboveground_height,
        if vertical.height_limit_enabled { ", limited" } else { "" }
    );
    println!(
        "  adaptive scan     {} ({} rays, buffer {}, {} Hz)",
        if adaptive.enabled { "on" } else { "off" },
        adaptive.ray_count,
        adaptive.buffer,
        adaptive.scan_rate_hz
    );
}

fn demo_world(seed: u32, x: i32, z: i32, radius: i32) -> (World, TerrainGenerator) {
    let generator = TerrainGenerator::new(seed);
    let mut world = World::new();
    let (cx, cz) = voxcull::BlockCoordinate::new(x, 0, z).chunk();
    generator.generate_area(&mut world, cx, cz, radius);
    (world, generator)
}

fn run(args: Args) -> Result<(), CullError> {
    let store = open_store(args.settings)?;
    let mut manager = ProfileManager::new(store).with_fog(LoggingFog::default());
    manager.initialize();

    match args.command {
        Command::Profiles => {
            let active = manager.active_profile().name.clone();
            for profile in manager.list_profiles() {
                let marker = if profile.name == active { "*" } else { " " };
                println!(
                    "{} {:<9} render distance {}, {} rays",
                    marker,
                    profile.name,
                    profile.render_distance_chunks,
                    profile.adaptive_visibility.ray_count
                );
            }
        }
        Command::Show => print_profile(manager.active_profile()),
        Command::Apply { name } => print_profile(manager.apply(&name)?),
        Command::SetVertical {
            enabled,
            height_limit,
            depth,
            height,
        } => print_profile(manager.set_vertical_culling(enabled, height_limit, depth, height)),
        Command::SetAdaptive {
            enabled,
            rays,
            buffer,
            rate,
        } => print_profile(manager.set_adaptive_visibility(enabled, rays, buffer, rate)),
        Command::Scan { x, z, y } => {
            let profile = manager.active_profile().clone();
            let (world, generator) = demo_world(args.seed, x, z, profile.render_distance_chunks as i32 + 1);
            let (sx, sy, sz) = generator.spawn_point(x, z);
            let camera = Camera::new((sx, y.unwrap_or(sy), sz));

            let started = Instant::now();
            let mut state = VisibilityState::new();
            let bounds = *state.refresh(&camera, &profile, &world);
            println!(
                "{} at ({:.1}, {:.1}, {:.1}): visible y {}..={} via {} ({} surfaces, {:.2} ms)",
                profile.name,
                camera.position.x,
                camera.position.y,
                camera.position.z,
                bounds.min_y,
                bounds.max_y,
                bounds.source,
                bounds.surface_count,
                started.elapsed().as_secs_f64() * 1000.0
            );
        }
        Command::Benchmark { duration, apply } => {
            let profile = manager.active_profile().clone();
            let rd = profile.render_distance_chunks;
            let (mut world, generator) = demo_world(args.seed, 0, 0, rd as i32 + 1);
            let mut camera = Camera::new(generator.spawn_point(8, 8));
            let input = InputControl::new();
            let mut renderer = SoftwareRenderer::new(profile);

            let result = Benchmark::new().run(
                duration,
                &mut world,
                &mut camera,
                rd,
                &input,
                &mut renderer,
                |_| false,
            )?;
            println!(
                "{:.2} ms/frame ({:.0} FPS) over {} samples, {} blocks spawned",
                result.average_frame_ms,
                result.average_fps(),
                result.sample_count,
                result.blocks_spawned
            );
            println!("Recommended profile: {}", result.recommended_profile);
            if apply {
                print_profile(manager.apply(&result.recommended_profile)?);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
