use serde::{Serialize, Serializer};
use std::fmt;

use super::Timestamp;

/// Name the build server gives the per-branch directory of failed builds.
pub const ERROR_LOGS_DIR: &str = "ErrorLogs/";

/// Depth in the server hierarchy a listing was fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Branch,
    Build,
    File,
}

impl ItemType {
    /// Level reached by opening a directory at this level. Directories inside
    /// a build stay at `File`.
    pub fn next(self) -> ItemType {
        match self {
            ItemType::Branch => ItemType::Build,
            ItemType::Build | ItemType::File => ItemType::File,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Branch => "branch",
            ItemType::Build => "build",
            ItemType::File => "file",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification derived from an item's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileType {
    Directory,
    Failed,
    /// Lowercased text after the last `.`.
    Extension(String),
    Unknown,
}

impl FileType {
    pub fn classify(name: &str, item_type: ItemType) -> FileType {
        if item_type == ItemType::Build && name == ERROR_LOGS_DIR {
            return FileType::Failed;
        }
        if name.ends_with('/') {
            return FileType::Directory;
        }
        match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => FileType::Extension(ext.to_lowercase()),
            _ => FileType::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FileType::Directory => "directory",
            FileType::Failed => "failed",
            FileType::Extension(ext) => ext,
            FileType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    name: String,
    link: String,
    item_type: ItemType,
    file_type: FileType,
    last_modified: Timestamp,
}

impl ListItem {
    pub fn new(name: String, link: String, item_type: ItemType, last_modified: Timestamp) -> Self {
        let file_type = FileType::classify(&name, item_type);
        Self {
            name,
            link,
            item_type,
            file_type,
            last_modified,
        }
    }

    /// Name as shown in the listing; directories keep their trailing `/`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without the directory separator, for titles and menus.
    pub fn display_name(&self) -> &str {
        self.name.strip_suffix('/').unwrap_or(&self.name)
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn file_type(&self) -> &FileType {
        &self.file_type
    }

    pub fn last_modified(&self) -> Timestamp {
        self.last_modified
    }

    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// The `ErrorLogs/` entry of a build listing, which stands for a second
    /// listing rather than a build.
    pub fn is_error_logs_marker(&self) -> bool {
        self.file_type == FileType::Failed
    }

    /// Builds spliced in from the `ErrorLogs/` sub-listing.
    pub fn is_failed_build(&self) -> bool {
        self.item_type == ItemType::Build && self.link.contains(ERROR_LOGS_DIR)
    }
}
