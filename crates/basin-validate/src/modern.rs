//! Modern bundle validation: GeoPackage + embedded SQLite measurement store.
//!
//! Phase A checks the two files on disk and gates the rest; phases B, C and
//! D each open their own read-only connection and run regardless of one
//! another's findings, so a single pass reports everything that is wrong.

use std::path::Path;

use rusqlite::Connection;

use basin_model::ValidationReport;

use crate::feature_source::{FeatureSource, GeoPackageSource};
use crate::fs_checks::check_regular_file;
use crate::sqlite_introspect::{open_readonly, table_columns, table_exists, tables_with_prefix};

/// Columns every measurement table must carry, in reporting order.
const MEASUREMENT_COLUMNS: [&str; 3] = ["ts", "basin_id", "value"];

/// How many simulation table names are listed before truncating.
const SIM_LIST_LIMIT: usize = 10;

pub(crate) fn validate_modern(
    geopackage_path: &Path,
    sqlite_path: &Path,
    report: &mut ValidationReport,
) {
    // Phase A: file existence gates everything else.
    let geopackage_ok = check_regular_file(geopackage_path, "GeoPackage", report);
    let sqlite_ok = check_regular_file(sqlite_path, "SQLite", report);
    if !geopackage_ok || !sqlite_ok {
        return;
    }

    check_measurement_store(sqlite_path, report);
    check_geopackage_content(geopackage_path, report);
    check_feature_source(geopackage_path, report);
}

/// Phase B: the embedded tabular store must hold a `measurement` table with
/// the expected columns.
fn check_measurement_store(sqlite_path: &Path, report: &mut ValidationReport) {
    report.info("Checking SQLite input...");
    let conn = match open_readonly(sqlite_path) {
        Ok(conn) => conn,
        Err(error) => {
            report.error(format!("SQLite: cannot open/read DB: {error}"));
            return;
        }
    };
    report.info("SQLite opened successfully.");

    match table_exists(&conn, "measurement") {
        Ok(true) => {}
        Ok(false) => {
            report.error("SQLite: missing table 'measurement'.");
            return;
        }
        Err(error) => {
            report.error(format!("SQLite: cannot open/read DB: {error}"));
            return;
        }
    }
    report.info("SQLite table found: measurement");

    let columns = match table_columns(&conn, "measurement") {
        Ok(columns) => columns,
        Err(error) => {
            report.error(format!("SQLite: cannot open/read DB: {error}"));
            return;
        }
    };

    let mut all_present = true;
    for required in MEASUREMENT_COLUMNS {
        if !columns.contains(required) {
            let found = columns.iter().cloned().collect::<Vec<_>>().join(", ");
            report.error(format!(
                "SQLite.measurement: missing column '{required}'. Found: [{found}]"
            ));
            all_present = false;
        }
    }
    if all_present {
        report.info(format!(
            "SQLite.measurement columns OK: [{}]",
            MEASUREMENT_COLUMNS.join(", ")
        ));
    }

    if !columns.contains("timestep") {
        report.warn("SQLite.measurement: 'timestep' column missing? (should be required)");
    }
}

/// Phase C: required spatial tables inside the GeoPackage, via the catalog.
fn check_geopackage_content(geopackage_path: &Path, report: &mut ValidationReport) {
    report.info("Checking GeoPackage content (SQLite side)...");
    let conn = match open_readonly(geopackage_path) {
        Ok(conn) => conn,
        Err(error) => {
            report.error(format!("GeoPackage: cannot open/read file: {error}"));
            return;
        }
    };
    report.info("GeoPackage opened as SQLite successfully.");

    if let Err(error) = check_geopackage_tables(&conn, report) {
        report.error(format!("GeoPackage: cannot open/read file: {error}"));
    }
}

fn check_geopackage_tables(
    conn: &Connection,
    report: &mut ValidationReport,
) -> rusqlite::Result<()> {
    require_table(conn, "basin", report)?;
    require_table(conn, "network", report)?;

    // The topology table appears under two spellings in the wild; accept
    // either and name the one that was found.
    if table_exists(conn, "topology")? {
        report.info("GeoPackage table found: topology");
    } else if table_exists(conn, "topologi")? {
        report.info("GeoPackage table found: topologi");
    } else {
        report.error("GeoPackage: missing table 'topology' (or 'topologi').");
    }

    // At least one simulation table. Probe one past the listing limit so the
    // ellipsis marker appears only when names were actually dropped.
    let mut sims = tables_with_prefix(conn, "sim", SIM_LIST_LIMIT + 1)?;
    if sims.is_empty() {
        report.error("GeoPackage: missing at least one table whose name starts with 'sim'.");
    } else {
        let truncated = sims.len() > SIM_LIST_LIMIT;
        sims.truncate(SIM_LIST_LIMIT);
        let marker = if truncated { " ..." } else { "" };
        report.info(format!(
            "GeoPackage simulation tables detected: [{}]{marker}",
            sims.join(", ")
        ));
    }

    if table_exists(conn, "gpkg_contents")? {
        report.info("GeoPackage core table found: gpkg_contents");
    } else {
        report.warn("GeoPackage: 'gpkg_contents' not found. File may not be a valid GeoPackage.");
    }
    Ok(())
}

fn require_table(
    conn: &Connection,
    name: &str,
    report: &mut ValidationReport,
) -> rusqlite::Result<()> {
    if table_exists(conn, name)? {
        report.info(format!("GeoPackage table found: {name}"));
    } else {
        report.error(format!("GeoPackage: missing layer/table '{name}'."));
    }
    Ok(())
}

/// Phase D: open the bundle through the feature-source facade and enumerate
/// feature types, proving the full read path works.
fn check_feature_source(geopackage_path: &Path, report: &mut ValidationReport) {
    report.info("Checking feature source open...");
    let source = match GeoPackageSource::open(geopackage_path) {
        Ok(source) => source,
        Err(error) => {
            report.error(format!("Feature source: cannot open GeoPackage: {error:#}"));
            return;
        }
    };
    report.info("Feature source opened GeoPackage.");

    match source.feature_type_names() {
        Ok(names) if names.is_empty() => {
            report.warn("Feature source: opened GeoPackage but found no feature types.");
        }
        Ok(names) => {
            report.info(format!("Feature source feature types: [{}]", names.join(", ")));
        }
        Err(error) => {
            report.error(format!("Feature source: cannot open GeoPackage: {error:#}"));
        }
    }
}
