//! Listing/copy option models and top-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Pattern matching mode for copy exclude lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCopyPatternMode {
    /// Shell-like wildcards (`*`, `?`, character classes).
    Glob,
    /// Regular expression pattern.
    Regex,
    /// Substring match.
    Literal,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `stat_dir`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecStatOptions {
    /// Emit directory entries (suffixed with `/`) ahead of their contents.
    pub if_include_dirs: bool,
}

impl SpecStatOptions {
    /// Options with directory entries enabled.
    pub fn with_dirs() -> Self {
        Self {
            if_include_dirs: true,
        }
    }
}

/// Input options for `copy_dir`.
#[derive(Debug, Clone)]
pub struct SpecCopyOptions {
    /// Exclude patterns applied to each relative entry.
    ///
    /// Directory entries are matched without their trailing `/`; an excluded
    /// directory prunes its whole subtree.
    pub patterns_exclude: Option<Vec<String>>,
    /// Pattern interpretation mode.
    pub rule_pattern: EnumCopyPatternMode,
}

impl Default for SpecCopyOptions {
    fn default() -> Self {
        Self {
            patterns_exclude: None,
            rule_pattern: EnumCopyPatternMode::Glob,
        }
    }
}

/// Errors returned by listing and copy entry points.
#[derive(Debug, Error)]
pub enum DirTreeError {
    /// Listing root is missing or not a directory.
    #[error("Not a directory or does not exist: {}", .0.display())]
    NotDirectory(PathBuf),
    /// Copy destination is already occupied.
    #[error("File or directory already exists: {}", .0.display())]
    DestinationExists(PathBuf),
    /// Invalid exclude pattern.
    #[error("Invalid pattern in exclude list: {0}")]
    InvalidPattern(String),
    /// Underlying filesystem failure, passed through unchanged.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias for `dirkit_io_fs` operations.
pub type Result<T> = std::result::Result<T, DirTreeError>;

// #endregion
////////////////////////////////////////////////////////////////////////////////
