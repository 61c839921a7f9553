//! End-to-end validation of modern bundle projects against real SQLite
//! fixtures.

mod support;

use std::path::PathBuf;

use basin_model::ProjectDescriptor;
use basin_validate::validate;
use tempfile::tempdir;

use support::{create_geopackage, create_measurement_store};

const SPATIAL_TABLES: [&str; 4] = ["basin", "network", "topology", "simulation_run_1"];

fn modern_fixture(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    create_geopackage(&geopackage, &SPATIAL_TABLES, Some(&["basin", "network"]));
    create_measurement_store(&sqlite, &["ts", "basin_id", "value", "timestep"]);
    (geopackage, sqlite)
}

#[test]
fn happy_modern_bundle_passes_without_warnings() {
    let dir = tempdir().unwrap();
    let (geopackage, sqlite) = modern_fixture(&dir);

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(report.ok(), "errors: {:?}", report.errors);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    assert!(
        report
            .info
            .iter()
            .any(|line| line == "GeoPackage table found: topology")
    );
    assert!(
        report
            .info
            .iter()
            .any(|line| line.contains("simulation_run_1"))
    );
    assert_eq!(
        report.info.last().map(String::as_str),
        Some("Project validation OK. You can continue.")
    );
}

#[test]
fn typo_spelled_topology_table_is_accepted_and_named() {
    let dir = tempdir().unwrap();
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    create_geopackage(
        &geopackage,
        &["basin", "network", "topologi", "simulation_run_1"],
        Some(&["basin", "network"]),
    );
    create_measurement_store(&sqlite, &["ts", "basin_id", "value", "timestep"]);

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(report.ok(), "errors: {:?}", report.errors);
    assert!(
        report
            .info
            .iter()
            .any(|line| line == "GeoPackage table found: topologi")
    );
    assert!(
        !report
            .info
            .iter()
            .any(|line| line == "GeoPackage table found: topology")
    );
}

#[test]
fn missing_measurement_column_fails_but_later_phases_still_run() {
    let dir = tempdir().unwrap();
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    create_geopackage(&geopackage, &SPATIAL_TABLES, Some(&["basin", "network"]));
    create_measurement_store(&sqlite, &["ts", "basin_id", "timestep"]);

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(!report.ok());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("missing column 'value'"));
    // Phases C and D still ran.
    assert!(
        report
            .info
            .iter()
            .any(|line| line.starts_with("Checking GeoPackage content"))
    );
    assert!(
        report
            .info
            .iter()
            .any(|line| line.starts_with("Checking feature source open"))
    );
}

#[test]
fn missing_measurement_table_skips_column_checks() {
    let dir = tempdir().unwrap();
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    create_geopackage(&geopackage, &SPATIAL_TABLES, Some(&["basin", "network"]));
    rusqlite::Connection::open(&sqlite)
        .unwrap()
        .execute_batch("CREATE TABLE observations (ts TEXT);")
        .unwrap();

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(!report.ok());
    assert!(
        report
            .errors
            .iter()
            .any(|line| line == "SQLite: missing table 'measurement'.")
    );
    assert!(!report.errors.iter().any(|line| line.contains("column")));
}

#[test]
fn missing_files_short_circuit_structural_phases() {
    let dir = tempdir().unwrap();
    let report = validate(&ProjectDescriptor::modern_bundle(
        dir.path().join("absent.gpkg"),
        dir.path().join("absent.sqlite"),
    ));

    assert!(!report.ok());
    assert_eq!(report.errors.len(), 2);
    assert!(
        !report
            .info
            .iter()
            .any(|line| line.starts_with("Checking SQLite input"))
    );
}

#[test]
fn non_database_sqlite_file_is_an_open_error() {
    let dir = tempdir().unwrap();
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    create_geopackage(&geopackage, &SPATIAL_TABLES, Some(&["basin", "network"]));
    std::fs::write(&sqlite, "this is not a database").unwrap();

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(!report.ok());
    assert!(
        report
            .errors
            .iter()
            .any(|line| line.starts_with("SQLite: cannot open/read DB:"))
    );
}

#[test]
fn missing_timestep_column_is_only_a_warning() {
    let dir = tempdir().unwrap();
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    create_geopackage(&geopackage, &SPATIAL_TABLES, Some(&["basin", "network"]));
    create_measurement_store(&sqlite, &["ts", "basin_id", "value"]);

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(report.ok());
    assert!(
        report
            .warnings
            .iter()
            .any(|line| line.contains("'timestep' column missing"))
    );
}

#[test]
fn missing_gpkg_contents_degrades_to_warnings() {
    let dir = tempdir().unwrap();
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    create_geopackage(&geopackage, &SPATIAL_TABLES, None);
    create_measurement_store(&sqlite, &["ts", "basin_id", "value", "timestep"]);

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(report.ok(), "errors: {:?}", report.errors);
    assert!(
        report
            .warnings
            .iter()
            .any(|line| line.contains("'gpkg_contents' not found"))
    );
    // Without gpkg_contents the feature source enumerates nothing.
    assert!(
        report
            .warnings
            .iter()
            .any(|line| line.contains("no feature types"))
    );
}

#[test]
fn table_name_matching_ignores_case() {
    let dir = tempdir().unwrap();
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    create_geopackage(
        &geopackage,
        &["Basin", "NETWORK", "Topology", "SIMULATION_RUN_1"],
        Some(&["Basin", "NETWORK"]),
    );
    create_measurement_store(&sqlite, &["TS", "BASIN_ID", "VALUE", "TIMESTEP"]);

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(report.ok(), "errors: {:?}", report.errors);
}

#[test]
fn simulation_listing_truncates_with_marker() {
    let dir = tempdir().unwrap();
    let geopackage = dir.path().join("catchment.gpkg");
    let sqlite = dir.path().join("timeseries.sqlite");
    let sims: Vec<String> = (0..12).map(|n| format!("simulation_run_{n:02}")).collect();
    let mut tables: Vec<&str> = vec!["basin", "network", "topology"];
    tables.extend(sims.iter().map(String::as_str));
    create_geopackage(&geopackage, &tables, Some(&["basin", "network"]));
    create_measurement_store(&sqlite, &["ts", "basin_id", "value", "timestep"]);

    let report = validate(&ProjectDescriptor::modern_bundle(geopackage, sqlite));

    assert!(report.ok(), "errors: {:?}", report.errors);
    let listing = report
        .info
        .iter()
        .find(|line| line.starts_with("GeoPackage simulation tables detected:"))
        .expect("simulation listing");
    assert!(listing.ends_with("..."));
    assert!(listing.contains("simulation_run_00"));
    assert!(!listing.contains("simulation_run_11"));
}

#[test]
fn repeated_validation_is_deterministic() {
    let dir = tempdir().unwrap();
    let (geopackage, sqlite) = modern_fixture(&dir);
    let descriptor = ProjectDescriptor::modern_bundle(geopackage, sqlite);

    let first = validate(&descriptor);
    let second = validate(&descriptor);
    assert_eq!(first, second);
}
