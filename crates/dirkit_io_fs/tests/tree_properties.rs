use std::collections::BTreeSet;
use std::path::Path;

use dirkit_io_fs::{DirTreeError, SpecCopyOptions, SpecStatOptions, copy_dir, stat_dir};
use tempfile::TempDir;

fn write_bytes(path: &Path, raw: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, raw).expect("write bytes");
}

/// A tree with nested, empty and hidden directories plus binary content.
fn build_sample_tree(root: &Path) {
    write_bytes(&root.join("a.txt"), b"alpha");
    write_bytes(&root.join("b/c.txt"), b"charlie");
    write_bytes(&root.join("b/d/e.bin"), &[0u8, 159, 146, 150, 255]);
    write_bytes(&root.join("b/d/f.txt"), b"");
    write_bytes(&root.join(".cfg/settings"), b"k=v");
    write_bytes(&root.join("z/y/x/w/deep.txt"), b"deep");
    std::fs::create_dir_all(root.join("empty")).expect("mkdir empty");
}

fn file_set(l_entries: &[String]) -> BTreeSet<String> {
    l_entries
        .iter()
        .filter(|e| !e.ends_with('/'))
        .cloned()
        .collect()
}

#[test]
fn listing_is_pre_order_with_directory_prefixes() {
    let tmp = TempDir::new().expect("tempdir");
    build_sample_tree(tmp.path());

    let l_entries = stat_dir(tmp.path(), SpecStatOptions::with_dirs()).expect("stat");
    for (n_idx, entry) in l_entries.iter().enumerate() {
        let Some((parent, _)) = entry.trim_end_matches('/').rsplit_once('/') else {
            continue;
        };
        let label_parent = format!("{parent}/");
        let n_idx_parent = l_entries
            .iter()
            .position(|e| *e == label_parent)
            .expect("parent directory listed");
        assert!(n_idx_parent < n_idx, "{label_parent} must precede {entry}");
    }
}

#[test]
fn listing_subtrees_are_contiguous() {
    let tmp = TempDir::new().expect("tempdir");
    build_sample_tree(tmp.path());

    let l_entries = stat_dir(tmp.path(), SpecStatOptions::with_dirs()).expect("stat");
    for (n_idx, entry) in l_entries.iter().enumerate() {
        if !entry.ends_with('/') {
            continue;
        }
        let n_descendants = l_entries
            .iter()
            .filter(|e| e.starts_with(entry.as_str()) && *e != entry)
            .count();
        let l_following = &l_entries[n_idx + 1..n_idx + 1 + n_descendants];
        assert!(l_following.iter().all(|e| e.starts_with(entry.as_str())));
    }
}

#[test]
fn listing_without_dirs_equals_listing_with_dirs_filtered() {
    let tmp = TempDir::new().expect("tempdir");
    build_sample_tree(tmp.path());

    let l_with_dirs = stat_dir(tmp.path(), SpecStatOptions::with_dirs()).expect("stat dirs");
    let l_files = stat_dir(tmp.path(), SpecStatOptions::default()).expect("stat files");

    let l_filtered: Vec<String> = l_with_dirs
        .into_iter()
        .filter(|e| !e.ends_with('/'))
        .collect();
    assert_eq!(l_files, l_filtered);
}

#[test]
fn copy_reproduces_file_set_and_bytes() {
    let tmp = TempDir::new().expect("tempdir");
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    build_sample_tree(&src);

    let report = copy_dir(&src, &dst, SpecCopyOptions::default()).expect("copy dir");

    let l_src = stat_dir(&src, SpecStatOptions::with_dirs()).expect("stat src");
    let l_dst = stat_dir(&dst, SpecStatOptions::with_dirs()).expect("stat dst");
    let set_src: BTreeSet<_> = l_src.iter().cloned().collect();
    let set_dst: BTreeSet<_> = l_dst.iter().cloned().collect();
    assert_eq!(set_src, set_dst);

    for entry in file_set(&l_src) {
        let raw_src = std::fs::read(src.join(&entry)).expect("read src");
        let raw_dst = std::fs::read(dst.join(&entry)).expect("read dst");
        assert_eq!(raw_src, raw_dst, "content mismatch for {entry}");
    }
    assert_eq!(report.cnt_files_copied, 6);
    assert_eq!(report.cnt_bytes_copied, 5 + 7 + 5 + 0 + 3 + 4);
}

#[test]
fn scenario_nested_file_listing_and_copy() {
    let tmp = TempDir::new().expect("tempdir");
    let src = tmp.path().join("d");
    let dst = tmp.path().join("t");
    write_bytes(&src.join("a.txt"), b"a");
    write_bytes(&src.join("b/c.txt"), b"c");

    let l_entries = stat_dir(&src, SpecStatOptions::with_dirs()).expect("stat");
    let n_idx_b = l_entries.iter().position(|e| e == "b/").expect("b/ listed");
    let n_idx_c = l_entries.iter().position(|e| e == "b/c.txt").expect("b/c.txt listed");
    assert!(n_idx_b < n_idx_c);
    assert!(l_entries.iter().any(|e| e == "a.txt"));
    assert_eq!(l_entries.len(), 3);

    copy_dir(&src, &dst, SpecCopyOptions::default()).expect("copy dir");
    assert_eq!(std::fs::read(dst.join("a.txt")).expect("read"), b"a");
    assert_eq!(std::fs::read(dst.join("b/c.txt")).expect("read"), b"c");
}

#[test]
fn scenario_destination_is_plain_file() {
    let tmp = TempDir::new().expect("tempdir");
    let src = tmp.path().join("d");
    let dst = tmp.path().join("t");
    write_bytes(&src.join("a.txt"), b"a");
    write_bytes(&dst, b"untouched");

    let err = copy_dir(&src, &dst, SpecCopyOptions::default()).expect_err("must fail");
    assert!(matches!(err, DirTreeError::DestinationExists(_)));
    assert!(dst.is_file());
    assert_eq!(std::fs::read(&dst).expect("read"), b"untouched");
}

#[test]
fn non_directory_roots_are_rejected() {
    let tmp = TempDir::new().expect("tempdir");
    let path_file = tmp.path().join("plain");
    write_bytes(&path_file, b"x");

    for path in [path_file, tmp.path().join("absent")] {
        let err = stat_dir(&path, SpecStatOptions::with_dirs()).expect_err("must fail");
        assert!(matches!(err, DirTreeError::NotDirectory(_)));
    }
}
