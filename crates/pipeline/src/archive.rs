//! Archive Extraction & Source Discovery
//!
//! Unpacks a zip archive into the run's extraction directory and discovers
//! the Python files to process. Platform metadata entries (`__MACOSX`) are
//! skipped during both extraction and discovery, and entries that would
//! escape the destination directory are rejected.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use testforge_core::{CoreError, CoreResult};

/// Directory name macOS zips use for resource-fork metadata.
const MACOS_METADATA_DIR: &str = "__MACOSX";

/// Extract a zip archive into the destination directory, creating
/// directories as needed.
pub fn extract_archive(zip_path: &Path, dest: &Path) -> CoreResult<()> {
    let file = fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| CoreError::archive(format!("{}: {}", zip_path.display(), e)))?;

    fs::create_dir_all(dest)?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| CoreError::archive(format!("{}: {}", zip_path.display(), e)))?;

        // enclosed_name rejects entries that traverse outside the archive root
        let Some(relative) = entry.enclosed_name() else {
            warn!(entry = entry.name(), "skipping unsafe archive entry");
            continue;
        };

        if relative
            .components()
            .any(|c| c.as_os_str() == MACOS_METADATA_DIR)
        {
            continue;
        }

        let out_path = dest.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out_file = fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
        }
    }

    debug!(archive = %zip_path.display(), dest = %dest.display(), "archive extracted");
    Ok(())
}

/// Discover the Python files under the extraction root, sorted by path.
///
/// The generated `tests/` output folders and the conftest shim are excluded
/// so that re-running the pipeline over the same directory never feeds its
/// own artifacts back in as sources.
pub fn discover_python_files(root: &Path) -> Vec<PathBuf> {
    let generated_tests = root.join("tests");
    let conftest = root.join("conftest.py");

    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(false)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().map(|e| e == "py").unwrap_or(false))
        .filter(|path| {
            !path
                .components()
                .any(|c| c.as_os_str() == MACOS_METADATA_DIR)
        })
        .filter(|path| !path.starts_with(&generated_tests) && path != &conftest)
        .collect();

    files.sort();
    files
}

/// Find the first `requirements.txt` under the extraction root, if any.
pub fn find_requirements(root: &Path) -> Option<PathBuf> {
    let mut matches: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(false)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .map(|n| n == "requirements.txt")
                .unwrap_or(false)
        })
        .collect();

    matches.sort();
    matches.into_iter().next()
}
