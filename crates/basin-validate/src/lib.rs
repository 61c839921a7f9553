//! Structural validation of sub-basin projects.
//!
//! Two layouts are supported: the modern bundle (GeoPackage + embedded
//! SQLite measurement store) and the legacy folder (two shapefiles and a
//! CSV). Validation never raises to the caller: every detected condition
//! becomes an info, warning or error line in the returned report, and the
//! sources are never mutated. All database handles are opened read-only and
//! scoped to a single call.

mod feature_source;
mod fs_checks;
mod legacy;
mod modern;
mod sqlite_introspect;

pub use feature_source::{FeatureSource, GeoPackageSource};

use basin_model::{ProjectDescriptor, ValidationReport};

/// Validate a project descriptor against its layout's schema requirements.
///
/// Deterministic: identical filesystem inputs produce identical reports.
pub fn validate(descriptor: &ProjectDescriptor) -> ValidationReport {
    let mut report = ValidationReport::new();
    match descriptor {
        ProjectDescriptor::ModernBundle {
            geopackage_path,
            sqlite_path,
        } => {
            tracing::debug!(
                geopackage = %geopackage_path.display(),
                sqlite = %sqlite_path.display(),
                "validating modern bundle project"
            );
            modern::validate_modern(geopackage_path, sqlite_path, &mut report);
        }
        ProjectDescriptor::LegacyFolder {
            root_path,
            shp_id_field,
            csv_id_column,
        } => {
            tracing::debug!(root = %root_path.display(), "validating legacy folder project");
            legacy::validate_legacy(root_path, shp_id_field, csv_id_column, &mut report);
        }
    }
    report.finish()
}
