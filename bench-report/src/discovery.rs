//! Input file discovery

use crate::types::{ReportError, Result};
use std::path::{Path, PathBuf};

/// Find the input files matching `pattern` inside `dir`
///
/// Only regular files are returned, sorted lexicographically and deduplicated.
/// Finding nothing is an error: there is no report without input.
pub fn discover_inputs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    // Only the file name part is a pattern; the directory is matched literally
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = Path::new(&escaped_dir).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();
    log::debug!("Scanning for input files: {}", full_pattern);

    // Hidden files only match when the pattern itself starts with a dot
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&full_pattern, options)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => log::warn!("Skipping unreadable path: {}", e),
        }
    }

    if files.is_empty() {
        return Err(ReportError::NoInput {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    files.sort();
    files.dedup();

    log::info!("Found {} input files in {:?}", files.len(), dir);
    Ok(files)
}
