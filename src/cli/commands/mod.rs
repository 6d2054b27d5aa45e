//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod show;
pub mod validate;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::config::LoadWarning;
use crate::error::Error;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Commands::Validate(args) => validate::run(&args),
        Commands::Show(args) => show::run(&args),
        Commands::Version(args) => version::run(&args),
    }
}

/// Logs load warnings at `warn` level.
fn log_warnings(warnings: &[LoadWarning]) {
    for warning in warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
}
