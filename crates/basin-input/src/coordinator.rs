//! The project-input coordinator.

use std::path::PathBuf;

use basin_model::{ProjectDescriptor, ProjectMode, ValidationReport};
use basin_store::SelectionStore;

use crate::handoff::Navigator;
use crate::render::render_text;

/// Input fields of the selection view, across both layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    GeopackagePath,
    SqlitePath,
    LegacyRootPath,
    ShpIdField,
    CsvIdColumn,
}

/// What kind of chooser a browse action on a field should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseKind {
    File {
        extensions: &'static [&'static str],
    },
    Directory,
}

impl FieldKey {
    /// Chooser kind for this field; `None` for plain text fields.
    pub fn browse_kind(self) -> Option<BrowseKind> {
        match self {
            Self::GeopackagePath => Some(BrowseKind::File {
                extensions: &["gpkg"],
            }),
            Self::SqlitePath => Some(BrowseKind::File {
                extensions: &["sqlite", "db"],
            }),
            Self::LegacyRootPath => Some(BrowseKind::Directory),
            Self::ShpIdField | Self::CsvIdColumn => None,
        }
    }
}

/// State machine driving the project selection workflow.
///
/// Field values for the inactive mode are retained so the user can toggle
/// back without re-entering them; they are simply excluded from descriptor
/// construction. `continue_allowed` is latched by `revalidate()` and
/// checked by `commit()`.
pub struct ProjectInput<N: Navigator> {
    store: SelectionStore,
    navigator: N,
    mode: ProjectMode,
    geopackage_path: Option<PathBuf>,
    sqlite_path: Option<PathBuf>,
    legacy_root_path: Option<PathBuf>,
    shp_id_field: String,
    csv_id_column: String,
    continue_allowed: bool,
    output: String,
    last_report: Option<ValidationReport>,
}

impl<N: Navigator> ProjectInput<N> {
    /// Construct the coordinator, restoring the last opened project when the
    /// store has one and revalidating immediately so a still-valid selection
    /// can be committed without any input.
    pub fn new(store: SelectionStore, navigator: N) -> Self {
        let mut input = Self {
            store,
            navigator,
            mode: ProjectMode::ModernBundle,
            geopackage_path: None,
            sqlite_path: None,
            legacy_root_path: None,
            shp_id_field: String::new(),
            csv_id_column: String::new(),
            continue_allowed: false,
            output: String::new(),
            last_report: None,
        };
        let preloaded = input.preload();
        input.revalidate();
        if preloaded {
            input
                .output
                .push_str("Loaded last project from preferences.\n");
        }
        input
    }

    pub fn mode(&self) -> ProjectMode {
        self.mode
    }

    /// Whether the forward action is currently enabled.
    pub fn continue_allowed(&self) -> bool {
        self.continue_allowed
    }

    /// Text for the checks/log pane: the rendered report, or a hint while
    /// required fields are missing.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The report of the most recent revalidation, if one ran.
    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.last_report.as_ref()
    }

    /// Current value of a field, as shown in its input widget.
    pub fn field(&self, key: FieldKey) -> String {
        match key {
            FieldKey::GeopackagePath => display_path(&self.geopackage_path),
            FieldKey::SqlitePath => display_path(&self.sqlite_path),
            FieldKey::LegacyRootPath => display_path(&self.legacy_root_path),
            FieldKey::ShpIdField => self.shp_id_field.clone(),
            FieldKey::CsvIdColumn => self.csv_id_column.clone(),
        }
    }

    /// Switch the active layout. Values of the now-inactive mode stay in
    /// memory.
    pub fn switch_mode(&mut self, mode: ProjectMode) {
        self.mode = mode;
        self.revalidate();
    }

    /// Update one field from its widget text. Path fields treat an empty
    /// value as "not selected". Triggers a revalidation, as every document
    /// change does.
    pub fn set_field(&mut self, key: FieldKey, value: &str) {
        match key {
            FieldKey::GeopackagePath => self.geopackage_path = parse_path(value),
            FieldKey::SqlitePath => self.sqlite_path = parse_path(value),
            FieldKey::LegacyRootPath => self.legacy_root_path = parse_path(value),
            FieldKey::ShpIdField => self.shp_id_field = value.to_string(),
            FieldKey::CsvIdColumn => self.csv_id_column = value.to_string(),
        }
        self.revalidate();
    }

    /// Re-run validation for the active mode and update the latched state.
    ///
    /// Idempotent; rapid successive calls are fine because validators only
    /// ever read headers and catalogs, never whole datasets.
    pub fn revalidate(&mut self) {
        let Some(descriptor) = self.descriptor() else {
            self.continue_allowed = false;
            self.last_report = None;
            self.output = self.hint().to_string();
            return;
        };
        let report = basin_validate::validate(&descriptor);
        self.output = render_text(&report);
        self.continue_allowed = report.ok();
        self.last_report = Some(report);
    }

    /// Persist the selection and hand the descriptor to the shell.
    ///
    /// Returns whether the handoff happened. When the latch is off this
    /// only re-renders the most recent report, so committing against a
    /// failing report is idempotent.
    pub fn commit(&mut self) -> bool {
        if !self.continue_allowed {
            if let Some(report) = &self.last_report {
                self.output = render_text(report);
            }
            return false;
        }
        let Some(descriptor) = self.descriptor() else {
            self.continue_allowed = false;
            return false;
        };
        self.store.save(&descriptor);
        tracing::info!(
            mode = %descriptor.mode(),
            root = %descriptor.display_root().display(),
            "project selection committed"
        );
        self.navigator.release(descriptor);
        true
    }

    /// Descriptor for the active mode, when its required fields are present.
    fn descriptor(&self) -> Option<ProjectDescriptor> {
        match self.mode {
            ProjectMode::ModernBundle => {
                let geopackage = self.geopackage_path.clone()?;
                let sqlite = self.sqlite_path.clone()?;
                Some(ProjectDescriptor::modern_bundle(geopackage, sqlite))
            }
            ProjectMode::LegacyFolder => {
                let root = self.legacy_root_path.clone()?;
                Some(ProjectDescriptor::legacy_folder(
                    root,
                    self.shp_id_field.clone(),
                    self.csv_id_column.clone(),
                ))
            }
        }
    }

    fn hint(&self) -> &'static str {
        match self.mode {
            ProjectMode::ModernBundle => "Select a GeoPackage and a SQLite file.",
            ProjectMode::LegacyFolder => "Select a legacy project folder.",
        }
    }

    fn preload(&mut self) -> bool {
        let Some(descriptor) = self.store.load() else {
            return false;
        };
        self.mode = descriptor.mode();
        match descriptor {
            ProjectDescriptor::ModernBundle {
                geopackage_path,
                sqlite_path,
            } => {
                self.geopackage_path = Some(geopackage_path);
                self.sqlite_path = Some(sqlite_path);
            }
            ProjectDescriptor::LegacyFolder {
                root_path,
                shp_id_field,
                csv_id_column,
            } => {
                self.legacy_root_path = Some(root_path);
                self.shp_id_field = shp_id_field;
                self.csv_id_column = csv_id_column;
            }
        }
        true
    }
}

fn parse_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_default()
}
