use crate::ngtsc::file_system::src::types::{AbsoluteFsPath, FileSystem, ReadonlyFileSystem};
use crate::ngtsc::file_system::testing::MockFileSystem;

fn abs(path: &str) -> AbsoluteFsPath {
    AbsoluteFsPath::new(path)
}

#[test]
fn should_create_parent_folders_for_added_files() {
    let fs = MockFileSystem::with_files(&[("/a/b/c.ts", "export {}")]);
    assert!(fs.is_file(&abs("/a/b/c.ts")));
    assert!(fs.is_directory(&abs("/a/b")));
    assert!(fs.is_directory(&abs("/a")));
    assert!(!fs.is_file(&abs("/a/b")));
}

#[test]
fn should_count_reads_per_path() {
    let fs = MockFileSystem::with_files(&[("/a.json", "{}")]);
    assert_eq!(fs.read_count("/a.json"), 0);
    fs.read_file(&abs("/a.json")).unwrap();
    fs.read_file(&abs("/a.json")).unwrap();
    assert_eq!(fs.read_count("/a.json"), 2);
    assert_eq!(fs.total_reads(), 2);
}

#[test]
fn should_fail_to_read_missing_files_and_folders() {
    let fs = MockFileSystem::with_files(&[("/a/b.ts", "")]);
    assert!(fs.read_file(&abs("/a/c.ts")).is_err());
    assert!(fs.read_file(&abs("/a")).is_err());
}

#[test]
fn should_require_parent_folder_when_writing() {
    let fs = MockFileSystem::new_posix();
    assert!(fs.write_file(&abs("/out/a.ts"), b"x").is_err());
    fs.ensure_dir(&abs("/out")).unwrap();
    fs.write_file(&abs("/out/a.ts"), b"x").unwrap();
    assert_eq!(fs.read_file(&abs("/out/a.ts")).unwrap(), "x");
}

#[test]
fn should_share_state_between_clones() {
    let fs = MockFileSystem::new_posix();
    let handle = fs.clone();
    fs.add_file("/x.ts", "1");
    assert!(handle.exists(&abs("/x.ts")));
}

#[test]
fn should_ignore_case_when_insensitive() {
    let fs = MockFileSystem::new(false);
    fs.add_file("/Proj/A.ts", "a");
    assert!(fs.exists(&abs("/proj/a.ts")));
    assert!(!fs.is_case_sensitive());
}
