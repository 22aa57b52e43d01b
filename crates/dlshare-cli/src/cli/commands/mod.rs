//! CLI command handlers, one per file.

mod name;
mod probe;
mod share;

pub use name::run_name;
pub use probe::run_probe;
pub use share::{run_share, ShareArgs};
