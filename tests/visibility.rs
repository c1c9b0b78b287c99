use voxcull::render::{BoundsSource, VisibilityState, VisibleBounds, compute_fallback};
use voxcull::{BlockType, Camera, CullingProfile, FnOracle, TerrainGenerator, WORLD_FLOOR_Y, World};

fn plain_at_zero() -> FnOracle<impl Fn(i32, i32, i32) -> bool> {
    FnOracle::new(|_, y, _| y <= 0)
}

fn scan(profile: &CullingProfile, feet: (f32, f32, f32), oracle: &FnOracle<impl Fn(i32, i32, i32) -> bool>) -> VisibleBounds {
    let mut state = VisibilityState::new();
    *state.refresh(&Camera::new(feet), profile, oracle)
}

#[test]
fn ground_below_stays_visible() {
    let bounds = scan(&CullingProfile::balanced(), (0.5, 15.0, 0.5), &plain_at_zero());
    assert_eq!(bounds.source, BoundsSource::Adaptive);
    assert!(bounds.min_y <= 0, "{bounds:?}");
}

#[test]
fn deep_ground_is_not_clipped_by_a_relative_window() {
    let gaming = CullingProfile::gaming();
    let depth = gaming.vertical_culling.underground_depth;
    let player_y = depth * 2 + 6;
    let bounds = scan(&gaming, (0.5, player_y as f32, 0.5), &plain_at_zero());
    assert_eq!(bounds.source, BoundsSource::Adaptive);
    assert!(bounds.contains(0), "{bounds:?}");
    assert!(bounds.min_y < player_y - depth);
}

#[test]
fn canopy_is_visible_from_a_cave() {
    let oracle = FnOracle::new(|_, y, _| y <= -6 || y == 10);
    let bounds = scan(&CullingProfile::balanced(), (0.5, -5.0, 0.5), &oracle);
    assert!(bounds.max_y >= 10, "{bounds:?}");
    assert!(bounds.contains(-6));
}

#[test]
fn balanced_on_a_flat_plain() {
    let balanced = CullingProfile::balanced();
    let buffer = balanced.adaptive_visibility.buffer;
    let bounds = scan(&balanced, (0.5, 20.0, 0.5), &plain_at_zero());
    assert!((-buffer..=0).contains(&bounds.min_y), "{bounds:?}");
}

#[test]
fn classic_is_unbounded_everywhere() {
    for y in [-60.0, -5.0, 0.0, 20.0, 150.0, 310.0] {
        let bounds = scan(&CullingProfile::classic(), (3.5, y, -7.5), &plain_at_zero());
        assert!(bounds.is_unbounded(), "y {y}: {bounds:?}");
    }
}

#[test]
fn fallback_never_fails() {
    for player_y in (-200..=400).step_by(7) {
        for depth in (0..=300).step_by(13) {
            for height in (0..=300).step_by(17) {
                for limit in [false, true] {
                    let b = compute_fallback(player_y, depth, height, limit, WORLD_FLOOR_Y);
                    assert!(b.min_y <= b.max_y, "{player_y} {depth} {height} {limit}: {b:?}");
                    assert!(b.min_y >= WORLD_FLOOR_Y);
                }
            }
        }
    }
    let extreme = compute_fallback(i32::MIN, i32::MAX, i32::MAX, true, WORLD_FLOOR_Y);
    assert!(extreme.min_y <= extreme.max_y && extreme.min_y >= WORLD_FLOOR_Y);
}

#[test]
fn generated_terrain_keeps_the_surface_in_view() {
    let generator = TerrainGenerator::new(42);
    let mut world = World::new();
    generator.generate_area(&mut world, 0, 0, 3);
    let (x, y, z) = generator.spawn_point(8, 8);

    for profile in [CullingProfile::potato(), CullingProfile::balanced(), CullingProfile::gaming()] {
        let mut state = VisibilityState::new();
        let bounds = *state.refresh(&Camera::new((x, y, z)), &profile, &world);
        let below = y.floor() as i32 - 1;
        assert!(world.get_block(8, below, 8).is_solid());
        assert!(bounds.contains(below), "{}: {bounds:?}", profile.name);
    }
}

#[test]
fn unloaded_world_falls_back() {
    let mut world = World::new();
    world.load_empty_area(0, 0, 0);
    world.fill_layer(0, BlockType::Stone);
    world.set_ready(false);

    let mut state = VisibilityState::new();
    let bounds = *state.refresh(&Camera::new((8.5, 1.0, 8.5)), &CullingProfile::balanced(), &world);
    assert_eq!(bounds.source, BoundsSource::Fallback);
    assert_eq!(bounds.min_y, 1 - 10);
}
