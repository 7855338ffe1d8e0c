//! Copy report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters for one successful `copy_dir` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportCopy {
    /// Directories created under the destination, root included.
    pub cnt_dirs_created: u64,
    /// Files copied.
    pub cnt_files_copied: u64,
    /// Bytes written by the file-copy primitive.
    pub cnt_bytes_copied: u64,
    /// Listing entries skipped by exclude patterns (pruned subtrees included).
    pub cnt_skipped: u64,
}

impl ReportCopy {
    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_dirs_created".to_string(), self.cnt_dirs_created);
        dict_counts.insert("cnt_files_copied".to_string(), self.cnt_files_copied);
        dict_counts.insert("cnt_bytes_copied".to_string(), self.cnt_bytes_copied);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} dirs={} files={} bytes={} skipped={}",
            self.cnt_dirs_created, self.cnt_files_copied, self.cnt_bytes_copied, self.cnt_skipped
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

/// Mutable accumulator for copy statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    cnt_dirs_created: u64,
    cnt_files_copied: u64,
    cnt_bytes_copied: u64,
    cnt_skipped: u64,
}

impl ReportCopyBuilder {
    /// Increment created-directory count by one.
    pub fn add_dir_created(&mut self) {
        self.cnt_dirs_created += 1;
    }

    /// Record one copied file of `n_bytes`.
    pub fn add_file_copied(&mut self, n_bytes: u64) {
        self.cnt_files_copied += 1;
        self.cnt_bytes_copied += n_bytes;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        ReportCopy {
            cnt_dirs_created: self.cnt_dirs_created,
            cnt_files_copied: self.cnt_files_copied,
            cnt_bytes_copied: self.cnt_bytes_copied,
            cnt_skipped: self.cnt_skipped,
        }
    }
}
