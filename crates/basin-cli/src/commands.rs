//! Subcommand implementations.

use anyhow::{Result, bail};
use serde::Serialize;

use basin_input::{FieldKey, Navigator, ProjectInput, render_text};
use basin_model::{ProjectDescriptor, ProjectMode, ValidationReport};
use basin_store::SelectionStore;

use crate::cli::{CheckArgs, ProjectArgs};

const REPORT_SCHEMA: &str = "subbasin-explorer.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    mode: ProjectMode,
    ok: bool,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

/// Validate and print the report. Returns whether the project passed.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let descriptor = descriptor_from_args(&args.project)?;
    let report = basin_validate::validate(&descriptor);
    if args.json {
        let payload = ReportPayload {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            mode: descriptor.mode(),
            ok: report.ok(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(report.ok())
}

/// Validate through the selection workflow, persist and hand off.
/// Returns whether the commit went through.
pub fn run_open(args: &ProjectArgs) -> Result<bool> {
    let descriptor = descriptor_from_args(args)?;
    let mut input = ProjectInput::new(SelectionStore::new(), ExplorerHandoff);
    match &descriptor {
        ProjectDescriptor::ModernBundle {
            geopackage_path,
            sqlite_path,
        } => {
            input.switch_mode(ProjectMode::ModernBundle);
            input.set_field(
                FieldKey::GeopackagePath,
                &geopackage_path.display().to_string(),
            );
            input.set_field(FieldKey::SqlitePath, &sqlite_path.display().to_string());
        }
        ProjectDescriptor::LegacyFolder {
            root_path,
            shp_id_field,
            csv_id_column,
        } => {
            input.switch_mode(ProjectMode::LegacyFolder);
            input.set_field(FieldKey::LegacyRootPath, &root_path.display().to_string());
            input.set_field(FieldKey::ShpIdField, shp_id_field);
            input.set_field(FieldKey::CsvIdColumn, csv_id_column);
        }
    }
    print!("{}", input.output());
    Ok(input.commit())
}

/// Print the stored last-opened selection, if any.
pub fn run_last() -> Result<()> {
    match SelectionStore::new().load() {
        Some(ProjectDescriptor::ModernBundle {
            geopackage_path,
            sqlite_path,
        }) => {
            println!("mode:       MODERN_BUNDLE");
            println!("geopackage: {}", geopackage_path.display());
            println!("sqlite:     {}", sqlite_path.display());
        }
        Some(ProjectDescriptor::LegacyFolder {
            root_path,
            shp_id_field,
            csv_id_column,
        }) => {
            println!("mode:          LEGACY_FOLDER");
            println!("root:          {}", root_path.display());
            println!("shp id field:  {shp_id_field}");
            println!("csv id column: {csv_id_column}");
        }
        None => println!("No stored selection."),
    }
    Ok(())
}

/// Forget the stored selection.
pub fn run_clear() -> Result<()> {
    SelectionStore::new().clear();
    println!("Selection cleared.");
    Ok(())
}

fn descriptor_from_args(args: &ProjectArgs) -> Result<ProjectDescriptor> {
    if let (Some(geopackage), Some(sqlite)) = (&args.geopackage, &args.sqlite) {
        return Ok(ProjectDescriptor::modern_bundle(geopackage, sqlite));
    }
    if let Some(root) = &args.legacy_root {
        // Missing identifier names flow into the validator as empty values
        // and come back as regular report errors.
        return Ok(ProjectDescriptor::legacy_folder(
            root,
            args.shp_id_field.clone().unwrap_or_default(),
            args.csv_id_column.clone().unwrap_or_default(),
        ));
    }
    bail!("specify either --geopackage and --sqlite, or --legacy-root");
}

/// Navigator of the CLI: the graphical explorer shell is the real consumer;
/// here the released descriptor is only announced.
struct ExplorerHandoff;

impl Navigator for ExplorerHandoff {
    fn release(&mut self, descriptor: ProjectDescriptor) {
        tracing::info!(
            mode = %descriptor.mode(),
            root = %descriptor.display_root().display(),
            "released project to explorer"
        );
        println!("Opening project: {}", descriptor.display_root().display());
    }
}
