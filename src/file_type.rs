//! File type classification
//!
//! This module provides the closed `FileType` enum and the extension-to-type
//! mapping used by the indexer and the node model.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

/// Kinds of filesystem entries the indexer knows about.
///
/// New kinds are added by introducing a variant here and an entry in
/// `EXTENSION_TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    Unknown,
    Directory,
    Text,
    Xml,
    Executable,
    MsDocument,
    MsExcel,
    MsPowerpoint,
}

/// Extension (with its leading dot) to file type. Matching is case-sensitive.
const EXTENSION_TABLE: &[(&str, FileType)] = &[
    (".txt", FileType::Text),
    (".xml", FileType::Xml),
    (".exe", FileType::Executable),
    (".doc", FileType::MsDocument),
    (".xls", FileType::MsExcel),
    (".ppt", FileType::MsPowerpoint),
];

/// Classify an extension such as `".txt"`.
///
/// Unmapped and empty extensions resolve to `FileType::Unknown`.
///
/// # Examples
///
/// ```
/// use filedex::{FileType, lookup_file_type};
///
/// assert_eq!(lookup_file_type(".xml"), FileType::Xml);
/// assert_eq!(lookup_file_type(".XML"), FileType::Unknown);
/// assert_eq!(lookup_file_type(""), FileType::Unknown);
/// ```
pub fn lookup_file_type(extension: &str) -> FileType {
    EXTENSION_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, file_type)| *file_type)
        .unwrap_or(FileType::Unknown)
}

/// Extension of a path including the leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

impl FileType {
    pub const ALL: [FileType; 8] = [
        FileType::Unknown,
        FileType::Directory,
        FileType::Text,
        FileType::Xml,
        FileType::Executable,
        FileType::MsDocument,
        FileType::MsExcel,
        FileType::MsPowerpoint,
    ];

    /// Classify a file path by its extension.
    ///
    /// This never inspects the filesystem, so a directory named `notes.txt`
    /// is reported as `Text` here.
    pub fn from_path(path: &Path) -> Self {
        lookup_file_type(&dotted_extension(path))
    }

    /// Stable lower-case name, also accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            FileType::Unknown => "unknown",
            FileType::Directory => "directory",
            FileType::Text => "text",
            FileType::Xml => "xml",
            FileType::Executable => "executable",
            FileType::MsDocument => "ms-document",
            FileType::MsExcel => "ms-excel",
            FileType::MsPowerpoint => "ms-powerpoint",
        }
    }

    /// Human-readable label used in section headers.
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Unknown => "Unknown",
            FileType::Directory => "Directory",
            FileType::Text => "Text",
            FileType::Xml => "XML",
            FileType::Executable => "Executable",
            FileType::MsDocument => "Microsoft Word",
            FileType::MsExcel => "Microsoft Excel",
            FileType::MsPowerpoint => "Microsoft PowerPoint",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FileType::ALL
            .iter()
            .copied()
            .find(|ft| ft.name() == wanted)
            .ok_or_else(|| format!("unknown file type: {}", s))
    }
}
