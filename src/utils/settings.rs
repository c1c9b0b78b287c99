//! Persisted profile selection
//!
//! One record survives between sessions: the name of the active profile, or
//! the full configuration when the user overrode it by hand. The file layout
//! is a 4-byte magic, a little-endian `u32` version, a little-endian `u64`
//! payload length, then the bincode payload.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::profile::catalog::CullingProfile;

const MAGIC_HEADER: &[u8; 4] = b"VXCP";
const VERSION: u32 = 1;
pub const SETTINGS_FILE: &str = "culling.bin";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings serialization failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Not a settings file")]
    BadMagic,

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Settings file is truncated")]
    Truncated,

    #[error("No per-user configuration directory on this platform")]
    NoConfigDir,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum PersistedSelection {
    Named(String),
    Manual(CullingProfile),
}

pub fn encode(selection: &PersistedSelection) -> Result<Vec<u8>, SettingsError> {
    let data = bincode::serialize(selection)?;
    let mut bytes = Vec::with_capacity(16 + data.len());
    bytes.extend_from_slice(MAGIC_HEADER);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&(data.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&data);
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<PersistedSelection, SettingsError> {
    let (magic, rest) = bytes.split_at_checked(4).ok_or(SettingsError::Truncated)?;
    if magic != MAGIC_HEADER {
        return Err(SettingsError::BadMagic);
    }

    let (version_bytes, rest) = rest.split_at_checked(4).ok_or(SettingsError::Truncated)?;
    let version = u32::from_le_bytes(version_bytes.try_into().map_err(|_| SettingsError::Truncated)?);
    if version != VERSION {
        return Err(SettingsError::UnsupportedVersion(version));
    }

    let (size_bytes, rest) = rest.split_at_checked(8).ok_or(SettingsError::Truncated)?;
    let size = u64::from_le_bytes(size_bytes.try_into().map_err(|_| SettingsError::Truncated)?) as usize;
    let data = rest.get(..size).ok_or(SettingsError::Truncated)?;

    Ok(bincode::deserialize(data)?)
}

/// Durable per-user storage for the selection.
pub trait SettingsStore {
    /// `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<PersistedSelection>, SettingsError>;

    fn save(&mut self, selection: &PersistedSelection) -> Result<(), SettingsError>;
}

/// Settings file on disk.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<config dir>/voxcull/culling.bin` for the current user.
    pub fn user_default() -> Result<Self, SettingsError> {
        let dirs = ProjectDirs::from("org", "voxcull", "voxcull").ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Option<PersistedSelection>, SettingsError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut reader = BufReader::new(file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        decode(&bytes).map(Some)
    }

    fn save(&mut self, selection: &PersistedSelection) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = encode(selection)?;
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }
}

/// In-memory store. Clones share one buffer, so a fresh manager built on a
/// clone sees what the previous one saved, like a process restart would.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    bytes: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the raw stored bytes.
    pub fn put_raw(&self, bytes: Vec<u8>) {
        *self.bytes.lock() = Some(bytes);
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_none()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Option<PersistedSelection>, SettingsError> {
        match self.bytes.lock().as_deref() {
            Some(bytes) => decode(bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, selection: &PersistedSelection) -> Result<(), SettingsError> {
        let bytes = encode(selection)?;
        *self.bytes.lock() = Some(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("voxcull-test-{}-{}", std::process::id(), name))
            .join(SETTINGS_FILE)
    }

    #[test]
    fn manual_selection_survives_the_codec() {
        let mut profile = CullingProfile::gaming();
        profile.name = "Custom".to_string();
        profile.adaptive_visibility.buffer = 7;
        let selection = PersistedSelection::Manual(profile);

        let bytes = encode(&selection).unwrap();
        assert_eq!(&bytes[..4], MAGIC_HEADER);
        assert_eq!(decode(&bytes).unwrap(), selection);
    }

    #[test]
    fn corrupt_data_is_rejected() {
        assert!(matches!(decode(b"VX"), Err(SettingsError::Truncated)));
        assert!(matches!(decode(b"NOPE\x01\0\0\0"), Err(SettingsError::BadMagic)));

        let mut bytes = encode(&PersistedSelection::Named("Gaming".into())).unwrap();
        bytes[4] = 9;
        assert!(matches!(decode(&bytes), Err(SettingsError::UnsupportedVersion(9))));

        let bytes = encode(&PersistedSelection::Named("Gaming".into())).unwrap();
        assert!(matches!(decode(&bytes[..bytes.len() - 2]), Err(SettingsError::Truncated)));
    }

    #[test]
    fn file_store_round_trip() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);
        let mut store = FileSettingsStore::new(&path);
        assert_eq!(store.load().unwrap(), None);

        let selection = PersistedSelection::Named("Potato".into());
        store.save(&selection).unwrap();
        assert_eq!(FileSettingsStore::new(&path).load().unwrap(), Some(selection));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn memory_store_clones_share_storage() {
        let mut a = MemorySettingsStore::new();
        let b = a.clone();
        assert!(b.is_empty());
        a.save(&PersistedSelection::Named("Classic".into())).unwrap();
        assert_eq!(b.load().unwrap(), Some(PersistedSelection::Named("Classic".into())));
    }
}
