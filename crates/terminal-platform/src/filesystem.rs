use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: Option<u64>,
    pub modified: Option<NaiveDateTime>,
    pub permissions: Option<String>,
}

impl DirectoryEntry {
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::File,
            size: None,
            modified: None,
            permissions: None,
        }
    }

    pub fn directory(name: &str) -> Self {
        Self {
            kind: EntryKind::Directory,
            ..Self::file(name)
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_modified(mut self, modified: NaiveDateTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_permissions(mut self, permissions: &str) -> Self {
        self.permissions = Some(permissions.to_string());
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Dotfiles are hidden unless `ls` is asked for everything
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Explicit permission string, or the usual default for the entry kind
    pub fn permissions_or_default(&self) -> &str {
        match (&self.permissions, self.kind) {
            (Some(p), _) => p,
            (None, EntryKind::Directory) => "drwxr-xr-x",
            (None, EntryKind::File) => "-rw-r--r--",
        }
    }
}

/// Read-only view of a directory tree keyed by absolute path.
pub trait FileSystem: Send + Sync {
    /// Entries of `path` in listing order, or `None` if the path is unknown
    fn list_dir(&self, path: &str) -> Option<&[DirectoryEntry]>;

    /// Whether `path` is a known directory
    fn has_dir(&self, path: &str) -> bool {
        self.list_dir(path).is_some()
    }

    /// Look up `name` inside the listing of `dir`
    fn entry(&self, dir: &str, name: &str) -> Option<&DirectoryEntry> {
        self.list_dir(dir)?.iter().find(|e| e.name == name)
    }
}
