//! CLI commands
//!
//! Command implementations for the `taxon` binary.

mod auth;
mod edit;
mod progress;
mod request;
mod style;
mod submit;
mod tree;

pub use auth::run_auth;
pub use edit::{run_edit, run_show};
pub use progress::already_reported;
pub use submit::run_submit;
pub use tree::run_tree;
