//! Filesystem predicates, primitives and pattern helpers shared by `stat` and `copy`.

use std::fs;
use std::io;
use std::path::Path;

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::spec::{DirTreeError, EnumCopyPatternMode};

/// Suffix marking directory entries in a listing.
pub const DIR_MARKER: char = '/';

////////////////////////////////////////////////////////////////////////////////
// #region Predicates

/// Whether `path` currently exists and is a directory.
///
/// Symlinks are followed. Any error while probing (missing path, permission
/// denied, ...) reports `false`.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Whether anything (file, directory, or symlink, even dangling) exists at `path`.
pub fn is_exist<P: AsRef<Path>>(path: P) -> bool {
    fs::symlink_metadata(path).is_ok()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Primitives

/// Copy one file's bytes from `path_file_src` to `path_file_dst`.
///
/// Returns the number of bytes copied.
pub fn copy_file<P, Q>(path_file_src: P, path_file_dst: Q) -> io::Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    fs::copy(path_file_src, path_file_dst)
}

/// Create a single directory level with the default permissive mode.
pub(crate) fn create_dir_default(path_dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(path_dir)
}

/// Join a root-relative label and an entry name with `/`, dropping any leading separator.
pub(crate) fn join_relative(path_rec: &str, name: &str) -> String {
    let joined = if path_rec.is_empty() {
        name.to_string()
    } else {
        format!("{}{DIR_MARKER}{name}", path_rec.trim_end_matches(DIR_MARKER))
    };
    joined.trim_start_matches(DIR_MARKER).to_string()
}

/// Whether a listing entry denotes a directory.
pub(crate) fn is_dir_entry(entry: &str) -> bool {
    entry.ends_with(DIR_MARKER)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

#[derive(Debug, Clone)]
pub(crate) enum TypeCopyPatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SpecCopyPatterns {
    pub(crate) patterns_exclude: Option<TypeCopyPatternSeq>,
}

impl SpecCopyPatterns {
    pub(crate) fn from_raw(
        patterns_exclude: Option<&[String]>,
        rule_pattern: EnumCopyPatternMode,
    ) -> Result<Self, DirTreeError> {
        Ok(Self {
            patterns_exclude: _compile(patterns_exclude, rule_pattern)?,
        })
    }

    /// Whether a relative entry (without its directory marker) is excluded.
    pub(crate) fn should_exclude(&self, value: &str) -> bool {
        match &self.patterns_exclude {
            None => false,
            Some(TypeCopyPatternSeq::Literal(v)) => v.iter().any(|p| value.contains(p.as_str())),
            Some(TypeCopyPatternSeq::Glob(v)) => v.iter().any(|p| p.is_match(value)),
            Some(TypeCopyPatternSeq::Regex(v)) => v.iter().any(|p| p.is_match(value)),
        }
    }
}

fn _compile(
    patterns: Option<&[String]>,
    rule_pattern: EnumCopyPatternMode,
) -> Result<Option<TypeCopyPatternSeq>, DirTreeError> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    if patterns.is_empty() {
        return Ok(None);
    }

    match rule_pattern {
        EnumCopyPatternMode::Literal => Ok(Some(TypeCopyPatternSeq::Literal(patterns.to_vec()))),
        EnumCopyPatternMode::Glob => {
            let mut l_glob = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let matcher = Glob::new(pattern)
                    .map_err(|e| DirTreeError::InvalidPattern(e.to_string()))?
                    .compile_matcher();
                l_glob.push(matcher);
            }
            Ok(Some(TypeCopyPatternSeq::Glob(l_glob)))
        }
        EnumCopyPatternMode::Regex => {
            let mut l_regex = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let regex =
                    Regex::new(pattern).map_err(|e| DirTreeError::InvalidPattern(e.to_string()))?;
                l_regex.push(regex);
            }
            Ok(Some(TypeCopyPatternSeq::Regex(l_regex)))
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
