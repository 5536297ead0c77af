use super::{ExportError, ExportFile};
use std::path::Path;

/// Create `dir` (and parents) and write every file into it
pub(super) fn export_to_directory(dir: &Path, files: &[ExportFile]) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for file in files {
        let path = dir.join(file.filename);
        std::fs::write(&path, &file.contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Wrote {}", path.display());
    }

    tracing::info!("Exported {} files to {}", files.len(), dir.display());
    Ok(())
}
