//! File-kind and readability checks shared by both validators.

use std::fs::File;
use std::path::Path;

use basin_model::ValidationReport;

/// Check that `path` exists, is a regular file and can be opened for read.
///
/// Returns true when the file passed every check. The probe handle is
/// dropped before returning.
pub(crate) fn check_regular_file(path: &Path, label: &str, report: &mut ValidationReport) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        report.error(format!("{label} file does not exist: {}", path.display()));
        return false;
    };
    if !metadata.is_file() {
        report.error(format!("{label} is not a file: {}", path.display()));
        return false;
    }
    if File::open(path).is_err() {
        report.error(format!("{label} is not readable: {}", path.display()));
        return false;
    }
    report.info(format!("{label} file found: {}", file_name(path)));
    true
}

/// Check that `path` exists, is a directory and can be listed.
pub(crate) fn check_readable_dir(path: &Path, label: &str, report: &mut ValidationReport) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        report.error(format!("{label} folder does not exist: {}", path.display()));
        return false;
    };
    if !metadata.is_dir() {
        report.error(format!("{label} is not a folder: {}", path.display()));
        return false;
    }
    if std::fs::read_dir(path).is_err() {
        report.error(format!("{label} is not readable: {}", path.display()));
        return false;
    }
    report.info(format!("{label} folder found: {}", file_name(path)));
    true
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
