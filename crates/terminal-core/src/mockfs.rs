use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use terminal_platform::filesystem::{DirectoryEntry, FileSystem};

use crate::tables::HOME_DIR;

type DirTable = HashMap<String, Vec<DirectoryEntry>>;

/// The fixed directory tree behind `ls`, `cd` and `cat`.
///
/// Nothing ever writes to it: `mkdir`, `touch` and `rm` only print messages.
pub struct MockFileSystem {
    dirs: &'static DirTable,
}

impl MockFileSystem {
    pub fn new() -> Self {
        static TABLE: OnceLock<DirTable> = OnceLock::new();
        Self {
            dirs: TABLE.get_or_init(build_table),
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn list_dir(&self, path: &str) -> Option<&[DirectoryEntry]> {
        self.dirs.get(path).map(Vec::as_slice)
    }
}

fn day(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn dir(name: &str, modified: NaiveDateTime) -> DirectoryEntry {
    DirectoryEntry::directory(name)
        .with_modified(modified)
        .with_permissions("drwxr-xr-x")
}

fn file(name: &str, size: u64, modified: NaiveDateTime) -> DirectoryEntry {
    DirectoryEntry::file(name)
        .with_size(size)
        .with_modified(modified)
        .with_permissions("-rw-r--r--")
}

fn build_table() -> DirTable {
    let mut table = HashMap::new();

    table.insert(
        HOME_DIR.to_string(),
        vec![
            dir("projects", day(2025, 1, 15)),
            dir("documents", day(2025, 1, 14)),
            dir("downloads", day(2025, 1, 13)),
            file(".bashrc", 3423, day(2025, 1, 10)),
            file("README.md", 1024, day(2025, 1, 12)),
            file("source-code.txt", 1024, day(2025, 8, 23)),
            file("mail.txt", 1024, day(2025, 5, 1)),
            file("pypi.whl", 1024, day(2025, 3, 3)),
            file("config.py", 1024, day(1984, 8, 9)),
        ],
    );

    table.insert(
        format!("{HOME_DIR}/projects"),
        vec![
            dir("web-app", day(2025, 1, 15)),
            dir("ffuf-force", day(2025, 1, 13)),
            file("worker.js", 15420, day(2025, 1, 15)),
        ],
    );

    table.insert(
        format!("{HOME_DIR}/documents"),
        vec![
            file("notes.txt", 2048, day(2025, 1, 11)),
            dir("contracts", day(2025, 1, 9)),
        ],
    );

    table.insert(
        format!("{HOME_DIR}/downloads"),
        vec![
            file("ubuntu-22.04.iso", 4_700_000_000, day(2025, 1, 8)),
            file("node-v18.tar.gz", 45_000_000, day(2025, 1, 7)),
        ],
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use terminal_platform::filesystem::EntryKind;

    #[test]
    fn test_home_listing_order() {
        let fs = MockFileSystem::new();
        let names: Vec<&str> = fs
            .list_dir(HOME_DIR)
            .unwrap()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names[..3], ["projects", "documents", "downloads"]);
        assert_eq!(names.len(), 9);
        assert!(names.contains(&".bashrc"));
    }

    #[test]
    fn test_unknown_path_is_none() {
        let fs = MockFileSystem::new();
        assert!(fs.list_dir("/home/yflong/projects/web-app").is_none());
        assert!(!fs.has_dir("/"));
        assert!(fs.has_dir("/home/yflong/downloads"));
    }

    #[test]
    fn test_entry_lookup() {
        let fs = MockFileSystem::new();
        let entry = fs.entry("/home/yflong/documents", "notes.txt").unwrap();
        assert_eq!(entry.kind, EntryKind::File);
        assert_eq!(entry.size, Some(2048));
        assert!(fs.entry(HOME_DIR, "notes.txt").is_none());
    }

    #[test]
    fn test_table_is_shared() {
        let a = MockFileSystem::new();
        let b = MockFileSystem::new();
        assert!(std::ptr::eq(a.dirs, b.dirs));
        assert_eq!(a.dirs.len(), 4);
    }
}
