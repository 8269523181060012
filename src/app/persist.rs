//! Reading and writing files as byte lines.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::editor::split_lines;

/// Load `path` as lines. A file that does not exist yet loads as a single
/// empty line.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_lines(path: &Path) -> Result<Vec<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let lines = split_lines(&bytes);
            tracing::debug!(path = %path.display(), lines = lines.len(), "loaded file");
            Ok(lines)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "new file");
            Ok(vec![Vec::new()])
        }
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Write every line followed by a newline byte.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_lines(path: &Path, lines: &[Vec<u8>]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for line in lines {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "saved file");
    Ok(())
}
