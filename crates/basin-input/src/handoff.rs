use basin_model::ProjectDescriptor;

/// The handoff contract between project selection and the explorer shell.
///
/// `release` is invoked once per successful commit. The receiver may assume
/// the descriptor passed validation and the selection store has already been
/// updated; the coordinator does not wait for it to finish.
pub trait Navigator {
    fn release(&mut self, descriptor: ProjectDescriptor);
}
