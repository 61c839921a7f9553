//! Validation report with three severity tiers.

use serde::Serialize;

/// Result of validating a project descriptor.
///
/// Messages are appended in emission order and never reordered, so two
/// validations of identical inputs produce identical reports. The overall
/// verdict is not a stored flag: `ok()` holds if and only if no error was
/// emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub info: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Append the overall verdict line and return the finished report.
    ///
    /// The verdict is part of the info stream so that every consumer (text
    /// rendering, JSON payload) sees the same message sequence.
    pub fn finish(mut self) -> Self {
        if self.ok() {
            self.info("Project validation OK. You can continue.");
        } else {
            self.info("Project validation FAILED. Fix errors before continuing.");
        }
        self
    }
}
