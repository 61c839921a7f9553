//! Fixture builders shared by the validator integration tests.
#![allow(dead_code)]

use std::path::Path;

use rusqlite::Connection;

/// Create an embedded measurement store whose `measurement` table carries
/// the given columns.
pub fn create_measurement_store(path: &Path, columns: &[&str]) {
    let conn = Connection::open(path).unwrap();
    let columns = columns
        .iter()
        .map(|name| format!("\"{name}\" TEXT"))
        .collect::<Vec<_>>()
        .join(", ");
    conn.execute_batch(&format!("CREATE TABLE measurement ({columns});"))
        .unwrap();
}

/// Create a GeoPackage-shaped SQLite file.
///
/// `tables` become plain one-column tables; when `features` is `Some`, a
/// `gpkg_contents` table is created and each name is registered as a
/// feature type.
pub fn create_geopackage(path: &Path, tables: &[&str], features: Option<&[&str]>) {
    let conn = Connection::open(path).unwrap();
    for table in tables {
        conn.execute_batch(&format!("CREATE TABLE \"{table}\" (id INTEGER);"))
            .unwrap();
    }
    if let Some(features) = features {
        conn.execute_batch("CREATE TABLE gpkg_contents (table_name TEXT, data_type TEXT);")
            .unwrap();
        for feature in features {
            conn.execute(
                "INSERT INTO gpkg_contents (table_name, data_type) VALUES (?1, 'features')",
                [feature],
            )
            .unwrap();
        }
    }
}

pub fn touch(path: &Path) {
    std::fs::write(path, b"").unwrap();
}
