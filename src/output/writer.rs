use super::record::FacilityOutput;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::path::Path;

/// Write facilities as a JSON array, atomically replacing `path`.
pub fn write_json(path: &Path, facilities: &[FacilityOutput]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open output file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, facilities)
        .context("Failed to serialize facilities")?;

    file.commit()
        .with_context(|| format!("Failed to save output file at {}", path.display()))?;

    Ok(())
}
