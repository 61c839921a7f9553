//! Selection store: save, load, clear.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use basin_model::{ProjectDescriptor, ProjectMode};

use crate::error::{Result, StoreError};

/// File name of the persisted selection inside the user config directory.
pub const SELECTION_FILE: &str = "selection.json";

/// On-disk projection of a descriptor.
///
/// Only the keys belonging to the recorded mode are written; the serializer
/// skips `None`, so saving one mode physically removes the other mode's keys.
/// A file without `mode` is a first-generation store that predates the
/// legacy-folder layout and is read back as a modern bundle.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersistedSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<ProjectMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geopackage_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sqlite_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legacy_root_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legacy_shp_id_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legacy_csv_id_column: Option<String>,
}

impl PersistedSelection {
    fn from_descriptor(descriptor: &ProjectDescriptor) -> Self {
        match descriptor {
            ProjectDescriptor::ModernBundle {
                geopackage_path,
                sqlite_path,
            } => Self {
                mode: Some(ProjectMode::ModernBundle),
                geopackage_path: Some(geopackage_path.clone()),
                sqlite_path: Some(sqlite_path.clone()),
                ..Self::default()
            },
            ProjectDescriptor::LegacyFolder {
                root_path,
                shp_id_field,
                csv_id_column,
            } => Self {
                mode: Some(ProjectMode::LegacyFolder),
                legacy_root_path: Some(root_path.clone()),
                legacy_shp_id_field: Some(shp_id_field.clone()),
                legacy_csv_id_column: Some(csv_id_column.clone()),
                ..Self::default()
            },
        }
    }

    /// Reconstruct a descriptor if every required key for the recorded mode
    /// is present and non-empty.
    fn into_descriptor(self) -> Option<ProjectDescriptor> {
        let mode = self.mode.unwrap_or(ProjectMode::ModernBundle);
        match mode {
            ProjectMode::ModernBundle => {
                let geopackage = non_empty_path(self.geopackage_path)?;
                let sqlite = non_empty_path(self.sqlite_path)?;
                Some(ProjectDescriptor::modern_bundle(geopackage, sqlite))
            }
            ProjectMode::LegacyFolder => {
                let root = non_empty_path(self.legacy_root_path)?;
                let shp_id = non_empty_text(self.legacy_shp_id_field)?;
                let csv_id = non_empty_text(self.legacy_csv_id_column)?;
                Some(ProjectDescriptor::legacy_folder(root, shp_id, csv_id))
            }
        }
    }
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|path| !path.as_os_str().is_empty())
}

fn non_empty_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Stores the last opened project selection.
///
/// The store holds no open handles; every operation opens, finishes and
/// closes within the call.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: Option<PathBuf>,
}

impl SelectionStore {
    /// Store rooted at the user configuration directory.
    ///
    /// When no configuration directory can be resolved the store still
    /// constructs; it then saves nothing and loads nothing.
    pub fn new() -> Self {
        let path = ProjectDirs::from("it", "geoframe", "subbasins-explorer")
            .map(|dirs| dirs.config_dir().join(SELECTION_FILE));
        Self { path }
    }

    /// Store backed by an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Persist the descriptor as the last opened project.
    ///
    /// Best-effort: failures are logged and swallowed, leaving whatever
    /// state was previously on disk.
    pub fn save(&self, descriptor: &ProjectDescriptor) {
        if let Err(error) = self.try_save(descriptor) {
            tracing::warn!("could not persist project selection: {error}");
        }
    }

    /// Read back the last opened project, if one can be decoded.
    pub fn load(&self) -> Option<ProjectDescriptor> {
        match self.try_load() {
            Ok(selection) => selection,
            Err(error) => {
                tracing::warn!("could not read project selection: {error}");
                None
            }
        }
    }

    /// Remove every key the store owns.
    pub fn clear(&self) {
        let Some(path) = &self.path else { return };
        if let Err(error) = fs::remove_file(path)
            && error.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!("could not clear project selection: {error}");
        }
    }

    fn try_save(&self, descriptor: &ProjectDescriptor) -> Result<()> {
        let path = self.path.as_deref().ok_or(StoreError::NoConfigDir)?;
        let selection = PersistedSelection::from_descriptor(descriptor);
        let json = serde_json::to_string_pretty(&selection).map_err(|source| {
            StoreError::Decode {
                path: path.to_path_buf(),
                source,
            }
        })?;
        write_atomic(path, format!("{json}\n").as_bytes())?;
        tracing::debug!("saved project selection to {}", path.display());
        Ok(())
    }

    fn try_load(&self) -> Result<Option<ProjectDescriptor>> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    operation: "read",
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let selection: PersistedSelection =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(selection.into_descriptor())
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Write via temp file + rename so the previous state survives a failed save.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            operation: "create directory for",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|source| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(bytes).map_err(|source| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source,
    })?;
    file.sync_all().map_err(|source| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;
    drop(file);
    fs::rename(&temp_path, path).map_err(|source| StoreError::Io {
        operation: "rename",
        path: path.to_path_buf(),
        source,
    })
}
