//! Depth-first directory listing.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::spec::{DirTreeError, Result, SpecStatOptions};
use crate::util::{DIR_MARKER, is_dir, is_dir_entry, join_relative};

#[derive(Debug)]
struct SpecStatEntry {
    name_entry: OsString,
    if_is_dir: bool,
}

/// One walked entry: its real path relative to the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpecTreeEntry {
    pub(crate) path_rel: PathBuf,
    pub(crate) if_is_dir: bool,
}

impl SpecTreeEntry {
    /// `/`-separated label; directories carry the trailing marker.
    ///
    /// Names that are not valid UTF-8 are rendered lossily here and only here.
    pub(crate) fn to_label(&self) -> String {
        let label = self
            .path_rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .fold(String::new(), |acc, name| join_relative(&acc, &name));
        if self.if_is_dir {
            format!("{label}{DIR_MARKER}")
        } else {
            label
        }
    }
}

/// List every entry beneath `dir_root`, depth-first, relative to it.
///
/// Entries are `/`-separated. With [`SpecStatOptions::if_include_dirs`] each
/// directory appears (suffixed with `/`) before its own contents. Sibling
/// order follows the filesystem's enumeration order. `dir_root` itself is
/// never part of the listing. Names that are not valid UTF-8 are rendered
/// with replacement characters.
///
/// # Errors
/// - [`DirTreeError::NotDirectory`] when `dir_root` is not an existing directory.
/// - [`DirTreeError::Io`] when any directory in the tree cannot be read; no
///   partial listing is returned.
pub fn stat_dir<P: AsRef<Path>>(
    dir_root: P,
    spec_stat_options: SpecStatOptions,
) -> Result<Vec<String>> {
    let path_dir_root = dir_root.as_ref();
    let l_tree = stat_tree(path_dir_root, spec_stat_options.if_include_dirs)?;
    let l_entries: Vec<String> = l_tree.iter().map(SpecTreeEntry::to_label).collect();
    debug!(
        root = %path_dir_root.display(),
        include_dirs = spec_stat_options.if_include_dirs,
        entries = l_entries.len(),
        "stat_dir finished"
    );
    Ok(l_entries)
}

/// Walk `path_dir_root` keeping real relative paths, for callers that
/// address the filesystem with the result.
pub(crate) fn stat_tree(
    path_dir_root: &Path,
    if_include_dirs: bool,
) -> Result<Vec<SpecTreeEntry>> {
    if !is_dir(path_dir_root) {
        return Err(DirTreeError::NotDirectory(path_dir_root.to_path_buf()));
    }
    walk_directory(path_dir_root, Path::new(""), if_include_dirs)
}

/// List every directory beneath `dir_root` (relative, suffixed with `/`), in DFS pre-order.
///
/// # Errors
/// Same as [`stat_dir`].
pub fn list_sub_dirs<P: AsRef<Path>>(dir_root: P) -> Result<Vec<String>> {
    let l_entries = stat_dir(dir_root, SpecStatOptions::with_dirs())?;
    Ok(l_entries.into_iter().filter(|e| is_dir_entry(e)).collect())
}

/// Regular files directly under `dir_root` whose name ends with `suffix`.
///
/// Not recursive. Returned paths are `dir_root` joined with the file name.
///
/// # Errors
/// - [`DirTreeError::NotDirectory`] when `dir_root` is not an existing directory.
/// - [`DirTreeError::Io`] when the directory cannot be read.
pub fn list_files_by_suffix<P: AsRef<Path>>(dir_root: P, suffix: &str) -> Result<Vec<PathBuf>> {
    let path_dir_root = dir_root.as_ref();
    if !is_dir(path_dir_root) {
        return Err(DirTreeError::NotDirectory(path_dir_root.to_path_buf()));
    }

    let mut l_files = Vec::new();
    for entry in read_entries(path_dir_root)? {
        if !entry.if_is_dir && entry.name_entry.to_string_lossy().ends_with(suffix) {
            l_files.push(path_dir_root.join(&entry.name_entry));
        }
    }
    Ok(l_files)
}

/// Read one directory level fully, releasing the handle before returning.
fn read_entries(path_dir: &Path) -> Result<Vec<SpecStatEntry>> {
    let mut l_entries = Vec::new();
    for entry_res in fs::read_dir(path_dir)? {
        let entry = entry_res?;
        let cfg_file_type = entry.file_type()?;
        l_entries.push(SpecStatEntry {
            name_entry: entry.file_name(),
            if_is_dir: cfg_file_type.is_dir(),
        });
    }
    Ok(l_entries)
}

/// Recursive step. `path_dir` addresses the real directory; `path_rec` is its
/// path relative to the listing root. Both are passed down per child, so
/// siblings never see each other's frames.
fn walk_directory(
    path_dir: &Path,
    path_rec: &Path,
    if_include_dirs: bool,
) -> Result<Vec<SpecTreeEntry>> {
    let mut l_stat = Vec::new();
    for entry in read_entries(path_dir)? {
        let path_rel = path_rec.join(&entry.name_entry);
        if entry.if_is_dir {
            let path_cur = path_dir.join(&entry.name_entry);
            let l_sub = walk_directory(&path_cur, &path_rel, if_include_dirs)?;
            if if_include_dirs {
                l_stat.push(SpecTreeEntry {
                    path_rel,
                    if_is_dir: true,
                });
            }
            l_stat.extend(l_sub);
        } else {
            l_stat.push(SpecTreeEntry {
                path_rel,
                if_is_dir: false,
            });
        }
    }
    Ok(l_stat)
}
