//! Active profile ownership
//!
//! The manager is the single writer of the active culling configuration.
//! Everything else reads it through [`ProfileManager::active_profile`] and
//! receives it as a parameter, so there is no ambient global state.

use crate::error::{CullError, Result};
use crate::profile::catalog::*;
use crate::render::fog::FogListener;
use crate::utils::settings::{PersistedSelection, SettingsStore};

pub struct ProfileManager {
    catalog: ProfileCatalog,
    active: CullingProfile,
    store: Box<dyn SettingsStore>,
    fog: Option<Box<dyn FogListener>>,
    /// Last render distance the fog listener was told about.
    fog_distance: Option<u32>,
}

impl ProfileManager {
    /// Starts on Balanced without touching storage. Call [`initialize`]
    /// to restore the previous session.
    ///
    /// [`initialize`]: ProfileManager::initialize
    pub fn new(store: impl SettingsStore + 'static) -> Self {
        Self {
            catalog: ProfileCatalog::builtin(),
            active: CullingProfile::balanced(),
            store: Box::new(store),
            fog: None,
            fog_distance: None,
        }
    }

    pub fn with_fog(mut self, fog: impl FogListener + 'static) -> Self {
        self.fog = Some(Box::new(fog));
        self
    }

    pub fn list_profiles(&self) -> &[CullingProfile] {
        self.catalog.all()
    }

    pub fn active_profile(&self) -> &CullingProfile {
        &self.active
    }

    /// Restores the persisted selection, or applies Balanced when there is
    /// none or it cannot be used.
    pub fn initialize(&mut self) -> &CullingProfile {
        let restored = match self.store.load() {
            Ok(Some(PersistedSelection::Named(name))) => match self.catalog.get(&name) {
                Some(profile) => Some(profile.clone()),
                None => {
                    tracing::warn!("Saved profile '{}' no longer exists", name);
                    None
                }
            },
            Ok(Some(PersistedSelection::Manual(profile))) => Some(CullingProfile {
                name: CUSTOM.to_string(),
                ..profile.sanitized()
            }),
            Ok(None) => {
                tracing::info!("No saved culling profile, using {}", DEFAULT_PROFILE);
                None
            }
            Err(e) => {
                tracing::warn!("Could not read saved culling profile: {}", e);
                None
            }
        };

        match restored {
            Some(profile) => {
                tracing::info!("Restored culling profile {}", profile.name);
                self.activate(profile);
            }
            None => {
                let default = self.catalog.get(DEFAULT_PROFILE).cloned().unwrap_or_default();
                self.activate(default);
                self.persist();
            }
        }
        &self.active
    }

    /// Makes a catalog profile active. Unknown names leave everything as it was.
    pub fn apply(&mut self, name: &str) -> Result<&CullingProfile> {
        let profile = self
            .catalog
            .get(name)
            .cloned()
            .ok_or_else(|| CullError::UnknownProfile {
                name: name.to_string(),
            })?;

        tracing::info!(
            "Applying culling profile {} (render distance {}, {} rays @ {} Hz)",
            profile.name,
            profile.render_distance_chunks,
            profile.adaptive_visibility.ray_count,
            profile.adaptive_visibility.scan_rate_hz
        );
        self.activate(profile);
        self.persist();
        Ok(&self.active)
    }

    /// Manual override of the fallback engine. Marks the active profile as custom.
    pub fn set_vertical_culling(
        &mut self,
        enabled: bool,
        height_limit_enabled: bool,
        underground_depth: i32,
        aboveground_height: i32,
    ) -> &CullingProfile {
        let mut profile = self.active.clone();
        profile.name = CUSTOM.to_string();
        profile.vertical_culling = VerticalCullingConfig {
            enabled,
            height_limit_enabled,
            underground_depth,
            aboveground_height,
        }
        .sanitized();
        self.activate(profile);
        self.persist();
        &self.active
    }

    /// Manual override of the raycast engine. Marks the active profile as custom.
    pub fn set_adaptive_visibility(
        &mut self,
        enabled: bool,
        ray_count: u32,
        buffer: i32,
        scan_rate_hz: f32,
    ) -> &CullingProfile {
        let mut profile = self.active.clone();
        profile.name = CUSTOM.to_string();
        profile.adaptive_visibility = AdaptiveVisibilityConfig {
            enabled,
            ray_count,
            buffer,
            scan_rate_hz,
        }
        .sanitized();
        self.activate(profile);
        self.persist();
        &self.active
    }

    fn activate(&mut self, profile: CullingProfile) {
        let distance = profile.render_distance_chunks;
        self.active = profile;

        if self.fog_distance != Some(distance) {
            if let Some(fog) = self.fog.as_mut() {
                fog.render_distance_changed(distance);
            }
            self.fog_distance = Some(distance);
        }
    }

    /// Storage failures never undo an applied profile; the session just
    /// won't remember it.
    fn persist(&mut self) {
        let selection = if self.active.is_custom() {
            PersistedSelection::Manual(self.active.clone())
        } else {
            PersistedSelection::Named(self.active.name.clone())
        };
        if let Err(e) = self.store.save(&selection) {
            tracing::warn!("Could not save culling profile: {}", e);
        }
    }
}
