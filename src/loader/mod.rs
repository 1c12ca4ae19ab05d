//! Reads saved results pages from disk.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// Saved pages in `dir`, sorted by file name.
pub fn discover_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(vec![]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Could not read dir {:?}", dir))? {
        let path = entry?.path();
        if path.is_file() && is_html(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decoded page text; `None` when the file is missing or empty.
pub fn load_document(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        warn!("{:?} not found (skipped)", path);
        return Ok(None);
    }

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    if bytes.is_empty() {
        warn!("{:?} empty (skipped)", path);
        return Ok(None);
    }

    debug!("Loaded {:?} ({} bytes)", path, bytes.len());
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
