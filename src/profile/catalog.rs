use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::render::fog::render_distance_blocks;

pub const POTATO: &str = "Potato";
pub const BALANCED: &str = "Balanced";
pub const GAMING: &str = "Gaming";
pub const CLASSIC: &str = "Classic";
/// Name carried by the active profile after a manual override.
pub const CUSTOM: &str = "Custom";

pub const DEFAULT_PROFILE: &str = BALANCED;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VerticalCullingConfig {
    pub enabled: bool,
    pub height_limit_enabled: bool,
    /// Blocks kept below the player.
    pub underground_depth: i32,
    /// Blocks kept above the player when `height_limit_enabled`.
    pub aboveground_height: i32,
}

impl VerticalCullingConfig {
    pub fn sanitized(mut self) -> Self {
        if self.underground_depth < MIN_UNDERGROUND_DEPTH {
            tracing::warn!(
                "Underground depth {} would cut off trees rooted below the player, using {}",
                self.underground_depth,
                MIN_UNDERGROUND_DEPTH
            );
            self.underground_depth = MIN_UNDERGROUND_DEPTH;
        }
        self.aboveground_height = self.aboveground_height.max(0);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AdaptiveVisibilityConfig {
    pub enabled: bool,
    pub ray_count: u32,
    /// Margin in blocks around detected surfaces.
    pub buffer: i32,
    pub scan_rate_hz: f32,
}

impl AdaptiveVisibilityConfig {
    pub fn sanitized(mut self) -> Self {
        self.ray_count = self.ray_count.clamp(MIN_RAY_COUNT, MAX_RAY_COUNT);
        self.buffer = self.buffer.max(0);
        self.scan_rate_hz = if self.scan_rate_hz.is_finite() {
            self.scan_rate_hz.clamp(MIN_SCAN_RATE_HZ, MAX_SCAN_RATE_HZ)
        } else {
            MIN_SCAN_RATE_HZ
        };
        self
    }

    pub fn scan_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.scan_rate_hz.max(MIN_SCAN_RATE_HZ) as f64)
    }
}

/// A named performance/quality tradeoff.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CullingProfile {
    pub name: String,
    pub render_distance_chunks: u32,
    pub vertical_culling: VerticalCullingConfig,
    pub adaptive_visibility: AdaptiveVisibilityConfig,
}

impl CullingProfile {
    pub fn potato() -> Self {
        Self {
            name: POTATO.to_string(),
            render_distance_chunks: 0,
            vertical_culling: VerticalCullingConfig {
                enabled: true,
                height_limit_enabled: true,
                underground_depth: 8,
                aboveground_height: 16,
            },
            adaptive_visibility: AdaptiveVisibilityConfig {
                enabled: true,
                ray_count: 16,
                buffer: 2,
                scan_rate_hz: 5.0,
            },
        }
    }

    pub fn balanced() -> Self {
        Self {
            name: BALANCED.to_string(),
            render_distance_chunks: 1,
            vertical_culling: VerticalCullingConfig {
                enabled: true,
                height_limit_enabled: false,
                underground_depth: 10,
                aboveground_height: 24,
            },
            adaptive_visibility: AdaptiveVisibilityConfig {
                enabled: true,
                ray_count: 24,
                buffer: 3,
                scan_rate_hz: 10.0,
            },
        }
    }

    pub fn gaming() -> Self {
        Self {
            name: GAMING.to_string(),
            render_distance_chunks: 2,
            vertical_culling: VerticalCullingConfig {
                enabled: true,
                height_limit_enabled: false,
                underground_depth: 12,
                aboveground_height: 32,
            },
            adaptive_visibility: AdaptiveVisibilityConfig {
                enabled: true,
                ray_count: 32,
                buffer: 4,
                scan_rate_hz: 12.0,
            },
        }
    }

    /// No culling at all. Baseline for comparisons and debugging.
    pub fn classic() -> Self {
        Self {
            name: CLASSIC.to_string(),
            render_distance_chunks: 1,
            vertical_culling: VerticalCullingConfig {
                enabled: false,
                height_limit_enabled: false,
                underground_depth: 10,
                aboveground_height: 24,
            },
            adaptive_visibility: AdaptiveVisibilityConfig {
                enabled: false,
                ray_count: 24,
                buffer: 3,
                scan_rate_hz: 10.0,
            },
        }
    }

    /// Maximum ray travel for the scanner, matching the rendered area.
    pub fn scan_distance(&self) -> f32 {
        render_distance_blocks(self.render_distance_chunks)
    }

    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM
    }

    pub fn sanitized(self) -> Self {
        Self {
            render_distance_chunks: self.render_distance_chunks.min(MAX_RENDER_DISTANCE_CHUNKS),
            vertical_culling: self.vertical_culling.sanitized(),
            adaptive_visibility: self.adaptive_visibility.sanitized(),
            ..self
        }
    }
}

impl Default for CullingProfile {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Fixed set of presets, built once. Entries are never mutated; the
/// manager copies them into its active slot.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    profiles: [CullingProfile; 4],
}

impl ProfileCatalog {
    pub fn builtin() -> Self {
        Self {
            profiles: [
                CullingProfile::potato(),
                CullingProfile::balanced(),
                CullingProfile::gaming(),
                CullingProfile::classic(),
            ],
        }
    }

    pub fn all(&self) -> &[CullingProfile] {
        &self.profiles
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&CullingProfile> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
