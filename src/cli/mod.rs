//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs. Each returns the process exit code
//! it wants; the caller exits with it when non-zero.

mod aggregate;
mod diff;
mod normalize;
mod run;

pub use aggregate::{AggregateCommand, run_aggregate};
pub use diff::{DiffCommand, run_diff};
pub use normalize::{NormalizeCommand, run_normalize};
pub use run::{RunCommand, run_all};
