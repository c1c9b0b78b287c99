//! Shared utilities
//! Contains settings persistence.

pub mod settings;

pub use settings::{FileSettingsStore, MemorySettingsStore, PersistedSelection, SettingsError, SettingsStore};
