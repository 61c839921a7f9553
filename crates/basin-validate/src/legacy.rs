//! Legacy folder validation: two shapefiles and a CSV under one root.

use std::io::BufRead;
use std::path::Path;

use basin_model::{CaseInsensitiveSet, ValidationReport};

use crate::fs_checks::{check_readable_dir, check_regular_file};

/// Expected sibling names inside the legacy root.
pub(crate) const SUBBASIN_SHP: &str = "subbasin_complete.shp";
pub(crate) const SUBBASIN_DBF: &str = "subbasin_complete.dbf";
pub(crate) const NETWORK_SHP: &str = "network_complete.shp";
/// Widespread typo'd variant of [`NETWORK_SHP`], accepted with a warning.
pub(crate) const NETWORK_SHP_TYPO: &str = "network_compete.shp";
pub(crate) const SUBBASINS_CSV: &str = "subbasins.csv";

pub(crate) fn validate_legacy(
    root: &Path,
    shp_id_field: &str,
    csv_id_column: &str,
    report: &mut ValidationReport,
) {
    report.info("Checking legacy folder input...");

    // Phase A: the root itself.
    if !check_readable_dir(root, "Legacy root", report) {
        return;
    }

    // Phase B: required siblings.
    let subbasin_shp = root.join(SUBBASIN_SHP);
    let mut network_shp = root.join(NETWORK_SHP);
    let network_alt = root.join(NETWORK_SHP_TYPO);
    let subbasins_csv = root.join(SUBBASINS_CSV);

    let errors_before = report.error_count();
    check_regular_file(&subbasin_shp, "Legacy subbasin shapefile", report);
    if !network_shp.exists() && network_alt.exists() {
        network_shp = network_alt;
        report.warn(format!(
            "Legacy network shapefile name '{NETWORK_SHP_TYPO}' detected \
             (expected '{NETWORK_SHP}')."
        ));
    }
    check_regular_file(&network_shp, "Legacy network shapefile", report);
    check_regular_file(&subbasins_csv, "Legacy subbasins CSV", report);
    if report.error_count() > errors_before {
        return;
    }

    // Phase C: identifier fields.
    if shp_id_field.trim().is_empty() {
        report.error("Legacy: missing subbasin ID field name for shapefile.");
    } else {
        report.info(format!("Legacy shapefile ID field set: {shp_id_field}"));
        // Field names live in the companion dBASE file; without it the field
        // cannot be verified, which is not fatal here.
        if !root.join(SUBBASIN_DBF).exists() {
            report.warn(format!(
                "Legacy: '{SUBBASIN_DBF}' not found, cannot verify shapefile fields."
            ));
        }
    }

    if csv_id_column.trim().is_empty() {
        report.error("Legacy: missing subbasin ID column name for CSV.");
    } else {
        check_csv_has_column(&subbasins_csv, csv_id_column, report);
    }

    // Phase D: a project root normally carries one sub-folder per sub-basin.
    if !has_subfolders(root) {
        report.warn("Legacy: no subbasin folders found inside root.");
    }
}

/// Read only the header line, sniff the delimiter and look the column up
/// case-insensitively.
fn check_csv_has_column(csv_path: &Path, column: &str, report: &mut ValidationReport) {
    report.info("Checking legacy CSV columns...");
    let header = match read_header_line(csv_path) {
        Ok(header) => header,
        Err(error) => {
            report.warn(format!("Legacy CSV: cannot read header row: {error}"));
            return;
        }
    };
    if header.trim().is_empty() {
        report.error("Legacy CSV: header row is empty.");
        return;
    }

    let delimiter = sniff_delimiter(&header);
    let columns = match split_header(&header, delimiter) {
        Ok(columns) => columns,
        Err(error) => {
            report.warn(format!("Legacy CSV: cannot read header row: {error}"));
            return;
        }
    };

    let lookup = CaseInsensitiveSet::new(columns.iter());
    if lookup.contains(column.trim()) {
        report.info(format!("Legacy CSV contains column: {column}"));
    } else {
        report.error(format!(
            "Legacy CSV: missing column '{column}'. Found: [{}]",
            columns.join(", ")
        ));
    }
}

fn read_header_line(path: &Path) -> std::io::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// `;` wins only when it strictly outnumbers `,`; ties fall back to `,`.
fn sniff_delimiter(header: &str) -> u8 {
    let commas = header.bytes().filter(|byte| *byte == b',').count();
    let semicolons = header.bytes().filter(|byte| *byte == b';').count();
    if semicolons > commas { b';' } else { b',' }
}

fn split_header(header: &str, delimiter: u8) -> csv::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(header.as_bytes());
    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record.iter().map(|field| field.trim().to_string()).collect())
}

fn has_subfolders(root: &Path) -> bool {
    match std::fs::read_dir(root) {
        Ok(entries) => entries.flatten().any(|entry| {
            entry
                .file_type()
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false)
        }),
        Err(_) => false,
    }
}
