//! Project descriptors for the two supported project layouts.
//!
//! A project is either the modern bundled layout (a GeoPackage plus an
//! embedded SQLite measurement store) or the legacy folder layout (two
//! shapefiles and a CSV inside one directory). The two shapes share nothing
//! but the mode tag, so the descriptor is a tagged variant: a call site can
//! never read a field that does not belong to the selected layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Project layout tag.
///
/// Serialized as `MODERN_BUNDLE` / `LEGACY_FOLDER`, which is also the value
/// stored under the `mode` key of the persisted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectMode {
    ModernBundle,
    LegacyFolder,
}

impl ProjectMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ModernBundle => "MODERN_BUNDLE",
            Self::LegacyFolder => "LEGACY_FOLDER",
        }
    }
}

impl std::fmt::Display for ProjectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of a chosen project.
///
/// The descriptor lives only long enough to be validated; a change to any
/// input field constructs a fresh one. Switching layout means constructing
/// the other variant, never mutating the tag in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectDescriptor {
    ModernBundle {
        geopackage_path: PathBuf,
        sqlite_path: PathBuf,
    },
    LegacyFolder {
        root_path: PathBuf,
        /// Identifier attribute name inside the sub-basin shapefile.
        shp_id_field: String,
        /// Identifier column name inside the sub-basins CSV.
        csv_id_column: String,
    },
}

impl ProjectDescriptor {
    pub fn modern_bundle(
        geopackage_path: impl Into<PathBuf>,
        sqlite_path: impl Into<PathBuf>,
    ) -> Self {
        Self::ModernBundle {
            geopackage_path: geopackage_path.into(),
            sqlite_path: sqlite_path.into(),
        }
    }

    /// Build a legacy-folder descriptor. The identifier fields may be empty;
    /// emptiness is reported by the validator, not rejected here, so the
    /// live-revalidation loop can surface it as a regular error message.
    pub fn legacy_folder(
        root_path: impl Into<PathBuf>,
        shp_id_field: impl Into<String>,
        csv_id_column: impl Into<String>,
    ) -> Self {
        Self::LegacyFolder {
            root_path: root_path.into(),
            shp_id_field: shp_id_field.into(),
            csv_id_column: csv_id_column.into(),
        }
    }

    pub fn mode(&self) -> ProjectMode {
        match self {
            Self::ModernBundle { .. } => ProjectMode::ModernBundle,
            Self::LegacyFolder { .. } => ProjectMode::LegacyFolder,
        }
    }

    /// Root of the project on disk, for display purposes.
    pub fn display_root(&self) -> &Path {
        match self {
            Self::ModernBundle {
                geopackage_path, ..
            } => geopackage_path,
            Self::LegacyFolder { root_path, .. } => root_path,
        }
    }
}
