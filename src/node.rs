//! Indexed filesystem nodes
//!
//! An `FsNode` is either a directory that owns its children in discovery order,
//! or a file. All attributes are captured once, when the node is built, and
//! are never refreshed.

use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::{IndexError, IndexResult};
use crate::file_type::{FileType, dotted_extension, lookup_file_type};
use crate::size::FileSize;

/// Column width the entry name is padded to in listings.
pub const NAME_WIDTH: usize = 30;

/// Attributes shared by every node, read from the filesystem at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeInfo {
    pub name: String,
    pub drive: String,
    #[serde(serialize_with = "serialize_lossy_path")]
    pub path: PathBuf,
    pub extension: String,
    pub size: u64,
    pub file_type: FileType,
}

impl NodeInfo {
    /// Snapshot the entry at `path`.
    ///
    /// Directories are typed `Directory` whatever their extension; everything
    /// else is classified by extension.
    pub fn snapshot(path: &Path) -> IndexResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|source| IndexError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = dotted_extension(path);
        let file_type = if metadata.is_dir() {
            FileType::Directory
        } else {
            lookup_file_type(&extension)
        };

        Ok(Self {
            name: node_name(path),
            drive: root_component(path),
            path: path.to_path_buf(),
            extension,
            size: metadata.len(),
            file_type,
        })
    }
}

/// Paths are emitted as strings even when they are not valid UTF-8.
fn serialize_lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Base name of a path, falling back to the whole path for roots like `/` or `.`.
fn node_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Drive prefix and root separator of a path, empty for relative paths.
fn root_component(path: &Path) -> String {
    let root: PathBuf = path
        .components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    root.to_string_lossy().to_string()
}

/// One entry of the indexed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FsNode {
    Directory {
        #[serde(flatten)]
        info: NodeInfo,
        children: Vec<FsNode>,
    },
    File {
        #[serde(flatten)]
        info: NodeInfo,
    },
}

impl FsNode {
    /// Build a childless directory node for `path`.
    pub fn directory(path: &Path) -> IndexResult<Self> {
        let mut info = NodeInfo::snapshot(path)?;
        info.file_type = FileType::Directory;
        Ok(FsNode::Directory {
            info,
            children: Vec::new(),
        })
    }

    /// Build a file node for `path`.
    pub fn file(path: &Path) -> IndexResult<Self> {
        Ok(FsNode::File {
            info: NodeInfo::snapshot(path)?,
        })
    }

    /// Append a child. Files cannot hold children and return `false`.
    pub fn add_child(&mut self, child: FsNode) -> bool {
        match self {
            FsNode::Directory { children, .. } => {
                children.push(child);
                true
            }
            FsNode::File { .. } => false,
        }
    }

    pub fn info(&self) -> &NodeInfo {
        match self {
            FsNode::Directory { info, .. } | FsNode::File { info } => info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn drive(&self) -> &str {
        &self.info().drive
    }

    pub fn path(&self) -> &Path {
        &self.info().path
    }

    pub fn extension(&self) -> &str {
        &self.info().extension
    }

    /// Size in bytes as reported when the node was built.
    pub fn size(&self) -> u64 {
        self.info().size
    }

    pub fn file_type(&self) -> FileType {
        self.info().file_type
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, FsNode::Directory { .. })
    }

    /// Children in discovery order; always empty for files.
    pub fn children(&self) -> &[FsNode] {
        match self {
            FsNode::Directory { children, .. } => children,
            FsNode::File { .. } => &[],
        }
    }

    /// The listing line for this entry: padded name followed by its size.
    pub fn listing_line(&self) -> String {
        format!(
            "{:<width$}{}",
            self.name(),
            FileSize(self.size()),
            width = NAME_WIDTH
        )
    }

    /// Write every file below this node, depth-first in stored order.
    ///
    /// With a filter, only files of exactly that type are written.
    /// Directories never produce a line of their own.
    pub fn write_listing<W: Write>(&self, out: &mut W, filter: Option<FileType>) -> io::Result<()> {
        match self {
            FsNode::Directory { children, .. } => {
                for child in children {
                    child.write_listing(out, filter)?;
                }
                Ok(())
            }
            FsNode::File { info } => {
                if filter.is_none_or(|wanted| wanted == info.file_type) {
                    writeln!(out, "{}", self.listing_line())?;
                }
                Ok(())
            }
        }
    }

    /// Print every indexed file to stdout.
    pub fn list(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_listing(&mut out, None)
    }

    /// Print only the files of `file_type` to stdout.
    pub fn list_type(&self, file_type: FileType) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_listing(&mut out, Some(file_type))
    }

    /// Depth-first iterator over file nodes, in listing order.
    pub fn files(&self) -> Files<'_> {
        Files { stack: vec![self] }
    }

    /// Number of directory and file nodes in this subtree, this node included.
    pub fn counts(&self) -> (usize, usize) {
        match self {
            FsNode::File { .. } => (0, 1),
            FsNode::Directory { children, .. } => {
                children.iter().fold((1, 0), |(dirs, files), child| {
                    let (d, f) = child.counts();
                    (dirs + d, files + f)
                })
            }
        }
    }
}

/// Iterator returned by [`FsNode::files`].
pub struct Files<'a> {
    stack: Vec<&'a FsNode>,
}

impl<'a> Iterator for Files<'a> {
    type Item = &'a FsNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                FsNode::File { .. } => return Some(node),
                FsNode::Directory { children, .. } => self.stack.extend(children.iter().rev()),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn render(node: &FsNode, filter: Option<FileType>) -> String {
        let mut buf = Vec::new();
        node.write_listing(&mut buf, filter).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_file_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello").unwrap();

        let node = FsNode::file(&path).unwrap();
        assert_eq!(node.name(), "a.txt");
        assert_eq!(node.extension(), ".txt");
        assert_eq!(node.size(), 5);
        assert_eq!(node.file_type(), FileType::Text);
        assert_eq!(node.path(), path.as_path());
        assert!(!node.is_dir());
        #[cfg(unix)]
        assert_eq!(node.drive(), "/");
    }

    #[test]
    fn test_directory_type_ignores_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("looks_like.txt");
        fs::create_dir(&path).unwrap();

        let as_dir = FsNode::directory(&path).unwrap();
        assert_eq!(as_dir.file_type(), FileType::Directory);
        assert_eq!(as_dir.extension(), ".txt");

        // Snapshot classification also checks the entry kind
        let as_file = FsNode::file(&path).unwrap();
        assert_eq!(as_file.file_type(), FileType::Directory);
    }

    #[test]
    fn test_snapshot_missing_path() {
        let err = FsNode::file(Path::new("/nonexistent/filedex/missing.txt")).unwrap_err();
        assert!(matches!(err, IndexError::Metadata { .. }));
        assert_eq!(err.path(), Path::new("/nonexistent/filedex/missing.txt"));
    }

    #[test]
    fn test_size_is_a_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grow.txt");
        fs::write(&path, "abc").unwrap();

        let node = FsNode::file(&path).unwrap();
        fs::write(&path, "abcdefghij").unwrap();
        assert_eq!(node.size(), 3);
    }

    #[test]
    fn test_add_child_to_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x").unwrap();
        let other = dir.path().join("b.xml");
        fs::write(&other, "<b/>").unwrap();

        let mut file = FsNode::file(&path).unwrap();
        assert!(!file.add_child(FsNode::file(&other).unwrap()));
        assert!(file.children().is_empty());
    }

    #[test]
    fn test_add_child_keeps_insertion_order() {
        let dir = TempDir::new().unwrap();
        for name in ["z.txt", "a.txt", "m.txt"] {
            fs::write(dir.path().join(name), name).unwrap();
        }

        let mut root = FsNode::directory(dir.path()).unwrap();
        for name in ["z.txt", "a.txt", "m.txt"] {
            assert!(root.add_child(FsNode::file(&dir.path().join(name)).unwrap()));
        }

        let names: Vec<_> = root.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["z.txt", "a.txt", "m.txt"]);
    }

    #[test]
    fn test_listing_line_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello").unwrap();

        let node = FsNode::file(&path).unwrap();
        assert_eq!(node.listing_line(), format!("a.txt{}5B", " ".repeat(25)));
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        let dir = TempDir::new().unwrap();
        let name = format!("{}.txt", "n".repeat(40));
        let path = dir.path().join(&name);
        fs::write(&path, "").unwrap();

        let node = FsNode::file(&path).unwrap();
        assert_eq!(node.listing_line(), format!("{}0B", name));
    }

    #[test]
    fn test_filtered_listing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "aa").unwrap();
        fs::write(dir.path().join("sub/c.xml"), "<c/>").unwrap();

        let mut sub = FsNode::directory(&dir.path().join("sub")).unwrap();
        sub.add_child(FsNode::file(&dir.path().join("sub/c.xml")).unwrap());
        let mut root = FsNode::directory(dir.path()).unwrap();
        root.add_child(FsNode::file(&dir.path().join("a.txt")).unwrap());
        root.add_child(sub);

        let all = render(&root, None);
        assert_eq!(all.lines().count(), 2);
        assert!(all.lines().next().unwrap().starts_with("a.txt"));
        assert!(all.lines().nth(1).unwrap().starts_with("c.xml"));

        let xml = render(&root, Some(FileType::Xml));
        assert_eq!(xml.lines().count(), 1);
        assert!(xml.starts_with("c.xml"));

        assert_eq!(render(&root, Some(FileType::MsExcel)), "");
        assert_eq!(render(&root, Some(FileType::Directory)), "");
    }

    #[test]
    fn test_listing_is_repeatable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "aa").unwrap();
        let mut root = FsNode::directory(dir.path()).unwrap();
        root.add_child(FsNode::file(&dir.path().join("a.txt")).unwrap());

        assert_eq!(render(&root, None), render(&root, None));
    }

    #[test]
    fn test_files_and_counts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/one.doc"), "1").unwrap();
        fs::write(dir.path().join("two.xls"), "22").unwrap();

        let mut sub = FsNode::directory(&dir.path().join("sub")).unwrap();
        sub.add_child(FsNode::file(&dir.path().join("sub/one.doc")).unwrap());
        let mut root = FsNode::directory(dir.path()).unwrap();
        root.add_child(sub);
        root.add_child(FsNode::file(&dir.path().join("two.xls")).unwrap());

        let names: Vec<_> = root.files().map(|f| f.name()).collect();
        assert_eq!(names, vec!["one.doc", "two.xls"]);
        assert_eq!(root.counts(), (2, 2));
    }

    #[test]
    fn test_json_shape() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        let mut root = FsNode::directory(dir.path()).unwrap();
        root.add_child(FsNode::file(&dir.path().join("a.txt")).unwrap());

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(value["type"], "directory");
        assert_eq!(value["file_type"], "directory");
        assert_eq!(value["children"][0]["type"], "file");
        assert_eq!(value["children"][0]["name"], "a.txt");
        assert_eq!(value["children"][0]["file_type"], "text");
        assert_eq!(value["children"][0]["size"], 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_json_with_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"bad\xff.txt"));
        fs::write(&path, "b").unwrap();
        let mut root = FsNode::directory(dir.path()).unwrap();
        root.add_child(FsNode::file(&path).unwrap());

        let value = serde_json::to_value(&root).unwrap();
        let child = &value["children"][0];
        assert_eq!(child["name"], "bad\u{FFFD}.txt");
        assert!(child["path"].as_str().unwrap().ends_with("bad\u{FFFD}.txt"));
        assert_eq!(child["file_type"], "text");
    }

    #[test]
    fn test_list_wrappers_write_to_stdout() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let mut root = FsNode::directory(dir.path()).unwrap();
        root.add_child(FsNode::file(&dir.path().join("a.txt")).unwrap());

        assert!(root.list().is_ok());
        assert!(root.list_type(FileType::Xml).is_ok());
    }
}
