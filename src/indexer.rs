//! Indexer - builds the node tree for a directory
//!
//! The traversal is synchronous and depth-first. Entries are visited in the
//! order the operating system enumerates them. Subdirectories are always
//! descended into; files are kept only when their type is indexable.

use std::fs;
use std::path::Path;

use glob::Pattern;
use tracing::{debug, trace, warn};

use crate::error::IndexError;
use crate::file_type::FileType;
use crate::node::FsNode;
use crate::policy::PolicyTables;

/// Configuration for indexing behavior.
#[derive(Debug, Clone, Default)]
pub struct IndexerConfig {
    /// Entry names (or glob patterns over names) to leave out of the index.
    /// Matching directories are not descended into.
    pub ignore_patterns: Vec<String>,
}

/// Walks a directory and builds an `FsNode` tree, consulting its policy tables.
#[derive(Debug, Clone)]
pub struct Indexer {
    policy: PolicyTables,
    config: IndexerConfig,
    patterns: Vec<Pattern>,
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new(PolicyTables::shared().clone())
    }
}

impl Indexer {
    pub fn new(policy: PolicyTables) -> Self {
        Self {
            policy,
            config: IndexerConfig::default(),
            patterns: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: IndexerConfig) -> Self {
        self.patterns = config
            .ignore_patterns
            .iter()
            .filter_map(|raw| match Pattern::new(raw) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    warn!(pattern = %raw, error = %err, "invalid ignore pattern, matching by name only");
                    None
                }
            })
            .collect();
        self.config = config;
        self
    }

    pub fn policy(&self) -> &PolicyTables {
        &self.policy
    }

    /// Mutable access for late reconfiguration before the next `process` call.
    pub fn policy_mut(&mut self) -> &mut PolicyTables {
        &mut self.policy
    }

    /// Index everything under `path`.
    ///
    /// Returns `None` when `path` does not exist. A path naming a regular file
    /// yields a single file node, whatever its type's policy.
    pub fn process(&self, path: impl AsRef<Path>) -> Option<FsNode> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "nothing to index, path does not exist");
            return None;
        }

        if !path.is_dir() {
            return match FsNode::file(path) {
                Ok(node) => Some(node),
                Err(err) => {
                    warn!(error = %err, "cannot index root");
                    None
                }
            };
        }

        self.process_dir(path)
    }

    fn process_dir(&self, path: &Path) -> Option<FsNode> {
        let mut root = match FsNode::directory(path) {
            Ok(node) => node,
            Err(err) => {
                warn!(error = %err, "skipping directory");
                return None;
            }
        };

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(source) => {
                let err = IndexError::ReadDir {
                    path: path.to_path_buf(),
                    source,
                };
                warn!(error = %err, "directory contents skipped");
                return Some(root);
            }
        };

        for entry in entries {
            let entry_path = match entry {
                Ok(entry) => entry.path(),
                Err(source) => {
                    let err = IndexError::ReadDir {
                        path: path.to_path_buf(),
                        source,
                    };
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if self.is_ignored(&entry_path) {
                trace!(path = %entry_path.display(), "ignored by pattern");
                continue;
            }

            if entry_path.is_dir() {
                if let Some(child) = self.process_dir(&entry_path) {
                    root.add_child(child);
                }
                continue;
            }

            let file_type = FileType::from_path(&entry_path);
            if !self.policy.is_indexable(file_type) {
                trace!(path = %entry_path.display(), %file_type, "not indexable");
                continue;
            }

            match FsNode::file(&entry_path) {
                Ok(node) => {
                    root.add_child(node);
                }
                Err(err) => warn!(error = %err, "skipping file"),
            }
        }

        debug!(
            path = %path.display(),
            children = root.children().len(),
            "indexed directory"
        );
        Some(root)
    }

    /// Check if an entry name matches one of the ignore patterns.
    fn is_ignored(&self, path: &Path) -> bool {
        if self.config.ignore_patterns.is_empty() {
            return false;
        }

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        self.config.ignore_patterns.iter().any(|raw| *raw == name)
            || self.patterns.iter().any(|pattern| pattern.matches(&name))
    }
}
