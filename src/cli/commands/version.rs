//! Version information display
//!
//! Prints version metadata in human or JSON format.

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::config::schema::SCHEMA_LEN;
use crate::error::Error;

/// Print version information.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &VersionArgs) -> Result<(), Error> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => {
            println!("{name} {version} ({SCHEMA_LEN} schema keys)");
        }
        OutputFormat::Json => {
            let info = serde_json::json!({
                "name": name,
                "version": version,
                "schema_keys": SCHEMA_LEN,
            });
            println!("{}", serde_json::to_string(&info)?);
        }
    }
    Ok(())
}
