//! High-level feature-source facade over spatial bundles.
//!
//! The map pane downstream only needs named feature types; validation opens
//! the same facade to prove the bundle is readable end to end, not just as a
//! raw SQLite file.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::sqlite_introspect;

/// A source of named spatial feature types.
pub trait FeatureSource {
    /// Enumerate feature-type names, sorted. An empty list is a valid
    /// answer; failing to enumerate is not.
    fn feature_type_names(&self) -> Result<Vec<String>>;
}

/// GeoPackage-backed feature source.
///
/// Feature types are the rows of `gpkg_contents` with `data_type =
/// 'features'`. A bundle without `gpkg_contents` opens fine and simply has
/// no feature types.
pub struct GeoPackageSource {
    conn: Connection,
}

impl GeoPackageSource {
    /// Open a GeoPackage read-only. Fails when the file is missing or not a
    /// SQLite database at all.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = sqlite_introspect::open_readonly(path)
            .with_context(|| format!("open GeoPackage: {}", path.display()))?;
        Ok(Self { conn })
    }
}

impl FeatureSource for GeoPackageSource {
    fn feature_type_names(&self) -> Result<Vec<String>> {
        if !sqlite_introspect::table_exists(&self.conn, "gpkg_contents")
            .context("probe gpkg_contents")?
        {
            return Ok(Vec::new());
        }
        let mut stmt = self
            .conn
            .prepare(
                "SELECT table_name FROM gpkg_contents WHERE data_type = 'features' \
                 ORDER BY table_name",
            )
            .context("enumerate feature types")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("enumerate feature types")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("enumerate feature types")?;
        Ok(names)
    }
}
