//! Directory tree copy orchestration.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{DirTreeError, Result, SpecCopyOptions};
use crate::stat::{SpecTreeEntry, stat_tree};
use crate::util::{DIR_MARKER, SpecCopyPatterns, copy_file, create_dir_default, is_exist};

#[derive(Debug)]
struct SpecCopyContext {
    path_dir_src: PathBuf,
    path_dir_dst: PathBuf,
    spec_cp_pats: SpecCopyPatterns,
    builder_cp_report: ReportCopyBuilder,
    prefix_pruned: Option<PathBuf>,
}

/// Copy the tree under `dir_source` into the new directory `dir_destination`.
///
/// This function performs:
/// 1. Exclude pattern compilation and the destination absence check.
/// 2. Creation of the destination root.
/// 3. A listing of the source with directories included.
/// 4. A replay of that listing: directories are created, files copied.
///
/// The replay stops at the first failure. Nothing already written is removed,
/// so the caller owns cleanup of a partial destination before retrying.
///
/// # Errors
/// - [`DirTreeError::InvalidPattern`] for a bad exclude pattern (no mutation).
/// - [`DirTreeError::DestinationExists`] when `dir_destination` exists (no mutation).
/// - [`DirTreeError::NotDirectory`] when `dir_source` is not a directory; the
///   destination root has already been created at that point.
/// - [`DirTreeError::Io`] for any directory creation, listing, or copy failure.
pub fn copy_dir<P, Q>(
    dir_source: P,
    dir_destination: Q,
    spec_cp_options: SpecCopyOptions,
) -> Result<ReportCopy>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_dir_src = dir_source.as_ref().to_path_buf();
    let path_dir_dst = dir_destination.as_ref().to_path_buf();

    let spec_cp_pats = SpecCopyPatterns::from_raw(
        spec_cp_options.patterns_exclude.as_deref(),
        spec_cp_options.rule_pattern,
    )?;

    if is_exist(&path_dir_dst) {
        return Err(DirTreeError::DestinationExists(path_dir_dst));
    }
    create_dir_default(&path_dir_dst)?;

    let mut spec_cp_ctx = SpecCopyContext {
        path_dir_src,
        path_dir_dst,
        spec_cp_pats,
        builder_cp_report: ReportCopyBuilder::default(),
        prefix_pruned: None,
    };
    spec_cp_ctx.builder_cp_report.add_dir_created();

    let l_entries = stat_tree(&spec_cp_ctx.path_dir_src, true)?;
    if let Err(e) = replay_entries(&l_entries, &mut spec_cp_ctx) {
        warn!(
            destination = %spec_cp_ctx.path_dir_dst.display(),
            error = %e,
            "copy_dir aborted; destination left partially populated"
        );
        return Err(e);
    }

    let report = spec_cp_ctx.builder_cp_report.build();
    debug!(
        source = %spec_cp_ctx.path_dir_src.display(),
        destination = %spec_cp_ctx.path_dir_dst.display(),
        "{report}"
    );
    Ok(report)
}

/// Replay walked entries by their real relative paths, never by rendered labels.
fn replay_entries(l_entries: &[SpecTreeEntry], spec_cp_ctx: &mut SpecCopyContext) -> Result<()> {
    for entry in l_entries {
        if should_skip_entry(entry, spec_cp_ctx) {
            spec_cp_ctx.builder_cp_report.add_skipped();
            continue;
        }

        let path_dst = spec_cp_ctx.path_dir_dst.join(&entry.path_rel);
        if entry.if_is_dir {
            trace!(entry = %entry.path_rel.display(), "create directory");
            create_dir_default(&path_dst)?;
            spec_cp_ctx.builder_cp_report.add_dir_created();
        } else {
            trace!(entry = %entry.path_rel.display(), "copy file");
            let path_src = spec_cp_ctx.path_dir_src.join(&entry.path_rel);
            let n_bytes = copy_file(&path_src, &path_dst)?;
            spec_cp_ctx.builder_cp_report.add_file_copied(n_bytes);
        }
    }
    Ok(())
}

/// Exclude check for one listing entry.
///
/// Entries arrive in pre-order, so a pruned directory's contents follow it
/// contiguously and a single active prefix is enough.
fn should_skip_entry(entry: &SpecTreeEntry, spec_cp_ctx: &mut SpecCopyContext) -> bool {
    if let Some(prefix) = &spec_cp_ctx.prefix_pruned {
        if entry.path_rel.starts_with(prefix) {
            return true;
        }
        spec_cp_ctx.prefix_pruned = None;
    }

    let label = entry.to_label();
    let name_match = label.trim_end_matches(DIR_MARKER);
    if !spec_cp_ctx.spec_cp_pats.should_exclude(name_match) {
        return false;
    }
    if entry.if_is_dir {
        warn!(entry = %label, "directory excluded from copy with its contents");
        spec_cp_ctx.prefix_pruned = Some(entry.path_rel.clone());
    }
    true
}
