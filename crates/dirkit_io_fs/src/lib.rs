//! `dirkit_io_fs` v1:
//! Recursive directory listing and directory tree copy.
//!
//! Modules:
//! - `stat`   : depth-first relative listing
//! - `copy`   : tree copy replaying a listing
//! - `spec`   : options/errors
//! - `report` : copy report model
//! - `util`   : predicates, file-copy primitive, pattern helpers

pub mod copy;
pub mod report;
pub mod spec;
pub mod stat;
pub mod util;

pub use copy::copy_dir;
pub use report::{ReportCopy, ReportCopyBuilder};
pub use spec::{DirTreeError, EnumCopyPatternMode, Result, SpecCopyOptions, SpecStatOptions};
pub use stat::{list_files_by_suffix, list_sub_dirs, stat_dir};
pub use util::{copy_file, is_dir, is_exist};
