//! Render profiles
//! Contains the preset catalog and the manager that applies and persists them.

pub mod catalog;
pub mod manager;

// Re-export commonly used types
pub use catalog::{AdaptiveVisibilityConfig, CullingProfile, ProfileCatalog, VerticalCullingConfig};
pub use manager::ProfileManager;
