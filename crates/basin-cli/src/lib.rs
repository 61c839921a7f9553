//! Library surface of the explorer CLI, exposed for integration tests.

pub mod logging;
