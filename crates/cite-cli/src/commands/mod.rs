pub mod report;
pub mod schema;
pub mod serve;
pub mod verify;

use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Read a file argument, treating `-` (or no path) as stdin.
pub(crate) fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
