use super::CliError;
use crate::metadata_file::validate_metadata_file;
use anyhow::Result;
use std::path::Path;

/// Check the hash of an exported metadata file
pub(super) fn run(path: &Path) -> Result<()> {
    let file = validate_metadata_file(path).map_err(CliError::from)?;
    println!(
        "Metadata file \"{}\" is valid (hash {}).",
        path.display(),
        file.hash
    );
    Ok(())
}
