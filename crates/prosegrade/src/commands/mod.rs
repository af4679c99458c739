//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use prosegrade_core::markdown;

pub mod goals;
pub mod hardwords;
pub mod info;
pub mod score;
pub mod stats;
pub mod tests;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read a file as prose, stripping Markdown structure when the
/// extension says so.
pub fn read_prose(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let content = read_input_file(path, max_bytes)?;
    if matches!(path.extension(), Some("md" | "markdown")) {
        Ok(markdown::to_prose(&content))
    } else {
        Ok(content)
    }
}
