//! Shared file-scanning helpers

use crate::{Result, ValidateConfig};
use std::path::Path;
use walkdir::WalkDir;

/// Iterate over the Rust source files of one crate's `src` directory
///
/// Files are visited in path order so reports are stable.
pub fn for_each_crate_rs_path<F>(config: &ValidateConfig, crate_dir: &Path, mut f: F) -> Result<()>
where
    F: FnMut(&Path, &Path) -> Result<()>,
{
    let src_dir = crate_dir.join("src");
    if !src_dir.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(&src_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .filter(|e| !config.should_exclude(e.path()))
    {
        f(entry.path(), &src_dir)?;
    }

    Ok(())
}

/// Module name a source file defines
///
/// `mod.rs` takes its directory's name. `lib.rs` and `main.rs` directly
/// under `src/` are crate roots and have none.
pub fn module_name(path: &Path, src_dir: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let parent = path.parent()?;
    let in_bin_dir =
        parent.file_name().is_some_and(|dir| dir == "bin") && parent.parent() == Some(src_dir);
    match stem {
        "lib" | "main" if parent == src_dir => None,
        "mod" => parent.file_name()?.to_str().map(str::to_string),
        _ if in_bin_dir => None,
        _ => Some(stem.to_string()),
    }
}
