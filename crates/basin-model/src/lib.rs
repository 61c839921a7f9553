pub mod descriptor;
pub mod lookup;
pub mod report;

pub use descriptor::{ProjectDescriptor, ProjectMode};
pub use lookup::CaseInsensitiveSet;
pub use report::ValidationReport;
