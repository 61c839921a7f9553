//! Plain-text rendering of validation reports for the status pane.

use basin_model::ValidationReport;

/// Render a report as the selection view shows it: an OK banner when the
/// report passed, then one bulleted section per non-empty tier, in
/// info / warnings / errors order.
pub fn render_text(report: &ValidationReport) -> String {
    let mut out = String::new();
    if report.ok() {
        out.push_str("Validation OK\n\n");
    }
    push_section(&mut out, "Info", &report.info);
    push_section(&mut out, "Warnings", &report.warnings);
    push_section(&mut out, "Errors", &report.errors);
    out
}

fn push_section(out: &mut String, title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    out.push_str(title);
    out.push_str(":\n");
    for line in lines {
        out.push_str(" - ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}
