//! Project selection workflow.
//!
//! [`ProjectInput`] is the state machine behind the "open project" view. It
//! is toolkit-free: the windowing shell binds its widgets to `switch_mode`,
//! `set_field` and `commit`, displays [`ProjectInput::output`] in the log
//! pane and enables the forward button from [`ProjectInput::continue_allowed`].
//! Every mutation triggers a full revalidation; forward navigation is
//! latched off while any error exists.

mod coordinator;
mod handoff;
mod render;

pub use coordinator::{BrowseKind, FieldKey, ProjectInput};
pub use handoff::Navigator;
pub use render::render_text;
