//! Selection workflow tests driven against real legacy-folder fixtures.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use basin_input::{BrowseKind, FieldKey, Navigator, ProjectInput};
use basin_model::{ProjectDescriptor, ProjectMode};
use basin_store::{SELECTION_FILE, SelectionStore};
use tempfile::tempdir;

/// Records every released descriptor through a shared handle.
#[derive(Default, Clone)]
struct Recorder {
    released: Rc<RefCell<Vec<ProjectDescriptor>>>,
}

impl Navigator for Recorder {
    fn release(&mut self, descriptor: ProjectDescriptor) {
        self.released.borrow_mut().push(descriptor);
    }
}

fn populate_legacy_root(root: &Path) {
    std::fs::write(root.join("subbasin_complete.shp"), b"").unwrap();
    std::fs::write(root.join("subbasin_complete.dbf"), b"").unwrap();
    std::fs::write(root.join("network_complete.shp"), b"").unwrap();
    std::fs::write(root.join("subbasins.csv"), "id,area,name\n1,2,3\n").unwrap();
    std::fs::create_dir(root.join("basin_0001")).unwrap();
}

fn fresh_store(dir: &tempfile::TempDir) -> SelectionStore {
    SelectionStore::with_path(dir.path().join("config").join(SELECTION_FILE))
}

#[test]
fn starts_in_modern_mode_with_a_hint() {
    let dir = tempdir().unwrap();
    let input = ProjectInput::new(fresh_store(&dir), Recorder::default());

    assert_eq!(input.mode(), ProjectMode::ModernBundle);
    assert!(!input.continue_allowed());
    assert_eq!(input.output(), "Select a GeoPackage and a SQLite file.");
}

#[test]
fn incomplete_fields_keep_the_hint_per_mode() {
    let dir = tempdir().unwrap();
    let mut input = ProjectInput::new(fresh_store(&dir), Recorder::default());

    input.set_field(FieldKey::GeopackagePath, "/data/catchment.gpkg");
    assert!(!input.continue_allowed());
    assert_eq!(input.output(), "Select a GeoPackage and a SQLite file.");

    input.switch_mode(ProjectMode::LegacyFolder);
    assert_eq!(input.output(), "Select a legacy project folder.");
}

#[test]
fn valid_legacy_project_unlocks_continue() {
    let dir = tempdir().unwrap();
    let project = tempdir().unwrap();
    populate_legacy_root(project.path());

    let mut input = ProjectInput::new(fresh_store(&dir), Recorder::default());
    input.switch_mode(ProjectMode::LegacyFolder);
    input.set_field(FieldKey::LegacyRootPath, &project.path().display().to_string());
    input.set_field(FieldKey::ShpIdField, "id");
    input.set_field(FieldKey::CsvIdColumn, "id");

    assert!(input.continue_allowed(), "output: {}", input.output());
    assert!(input.output().starts_with("Validation OK"));
}

#[test]
fn invalid_identifier_relatches_continue_off() {
    let dir = tempdir().unwrap();
    let project = tempdir().unwrap();
    populate_legacy_root(project.path());

    let mut input = ProjectInput::new(fresh_store(&dir), Recorder::default());
    input.switch_mode(ProjectMode::LegacyFolder);
    input.set_field(FieldKey::LegacyRootPath, &project.path().display().to_string());
    input.set_field(FieldKey::ShpIdField, "id");
    input.set_field(FieldKey::CsvIdColumn, "id");
    assert!(input.continue_allowed());

    // A live edit to the column name invalidates immediately.
    input.set_field(FieldKey::CsvIdColumn, "no_such_column");
    assert!(!input.continue_allowed());
    assert!(input.output().contains("missing column 'no_such_column'"));
}

#[test]
fn commit_persists_then_releases_the_descriptor() {
    let dir = tempdir().unwrap();
    let project = tempdir().unwrap();
    populate_legacy_root(project.path());
    let store = fresh_store(&dir);
    let recorder = Recorder::default();

    let mut input = ProjectInput::new(store.clone(), recorder.clone());
    input.switch_mode(ProjectMode::LegacyFolder);
    input.set_field(FieldKey::LegacyRootPath, &project.path().display().to_string());
    input.set_field(FieldKey::ShpIdField, "id");
    input.set_field(FieldKey::CsvIdColumn, "id");

    assert!(input.commit());

    let expected = ProjectDescriptor::legacy_folder(project.path(), "id", "id");
    assert_eq!(recorder.released.borrow().as_slice(), &[expected.clone()]);
    assert_eq!(store.load(), Some(expected));
}

#[test]
fn blocked_commit_re_renders_without_releasing() {
    let dir = tempdir().unwrap();
    let project = tempdir().unwrap();
    populate_legacy_root(project.path());
    let recorder = Recorder::default();

    let mut input = ProjectInput::new(fresh_store(&dir), recorder.clone());
    input.switch_mode(ProjectMode::LegacyFolder);
    input.set_field(FieldKey::LegacyRootPath, &project.path().display().to_string());
    input.set_field(FieldKey::ShpIdField, "id");
    input.set_field(FieldKey::CsvIdColumn, "missing");

    let rendered = input.output().to_string();
    assert!(!input.commit());
    assert!(!input.commit()); // idempotent
    assert_eq!(input.output(), rendered);
    assert!(recorder.released.borrow().is_empty());
}

#[test]
fn inactive_mode_fields_survive_a_toggle() {
    let dir = tempdir().unwrap();
    let project = tempdir().unwrap();
    populate_legacy_root(project.path());

    let mut input = ProjectInput::new(fresh_store(&dir), Recorder::default());
    input.switch_mode(ProjectMode::LegacyFolder);
    input.set_field(FieldKey::LegacyRootPath, &project.path().display().to_string());
    input.set_field(FieldKey::ShpIdField, "id");
    input.set_field(FieldKey::CsvIdColumn, "id");
    assert!(input.continue_allowed());

    input.switch_mode(ProjectMode::ModernBundle);
    assert!(!input.continue_allowed());
    assert_eq!(input.output(), "Select a GeoPackage and a SQLite file.");

    // Toggling back needs no re-entry.
    input.switch_mode(ProjectMode::LegacyFolder);
    assert!(input.continue_allowed());
    assert_eq!(input.field(FieldKey::ShpIdField), "id");
}

#[test]
fn startup_preloads_the_stored_selection() {
    let dir = tempdir().unwrap();
    let project = tempdir().unwrap();
    populate_legacy_root(project.path());
    let store = fresh_store(&dir);
    store.save(&ProjectDescriptor::legacy_folder(project.path(), "id", "id"));

    let input = ProjectInput::new(store, Recorder::default());

    assert_eq!(input.mode(), ProjectMode::LegacyFolder);
    assert!(input.continue_allowed(), "output: {}", input.output());
    assert!(input.output().contains("Loaded last project from preferences."));
    assert_eq!(
        input.field(FieldKey::LegacyRootPath),
        project.path().display().to_string()
    );
}

#[test]
fn clearing_a_path_field_restores_the_hint() {
    let dir = tempdir().unwrap();
    let mut input = ProjectInput::new(fresh_store(&dir), Recorder::default());

    input.set_field(FieldKey::GeopackagePath, "/data/catchment.gpkg");
    input.set_field(FieldKey::SqlitePath, "/data/timeseries.sqlite");
    assert!(input.last_report().is_some());

    input.set_field(FieldKey::SqlitePath, "");
    assert!(input.last_report().is_none());
    assert_eq!(input.output(), "Select a GeoPackage and a SQLite file.");
}

#[test]
fn browse_kinds_match_field_expectations() {
    assert_eq!(
        FieldKey::GeopackagePath.browse_kind(),
        Some(BrowseKind::File {
            extensions: &["gpkg"]
        })
    );
    assert_eq!(
        FieldKey::SqlitePath.browse_kind(),
        Some(BrowseKind::File {
            extensions: &["sqlite", "db"]
        })
    );
    assert_eq!(
        FieldKey::LegacyRootPath.browse_kind(),
        Some(BrowseKind::Directory)
    );
    assert_eq!(FieldKey::ShpIdField.browse_kind(), None);
}
