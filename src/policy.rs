//! Per-type indexing and backup policy
//!
//! `PolicyTables` answers two questions for every `FileType`: should entries of
//! this type be added to the index, and should they be backed up. Types absent
//! from a table are treated as `false`.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::file_type::FileType;

/// Process-wide defaults, built on first access.
static SHARED: OnceLock<PolicyTables> = OnceLock::new();

/// Indexable and backupable flags keyed by file type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyTables {
    indexable: BTreeMap<FileType, bool>,
    backupable: BTreeMap<FileType, bool>,
}

impl PolicyTables {
    /// Empty tables: every lookup answers `false`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tables seeded with the default policy.
    ///
    /// Every known type except `Unknown` is indexable. Word and Excel
    /// documents are backupable.
    pub fn with_defaults() -> Self {
        let mut tables = Self::empty();

        tables.add_indexable_map(FileType::Unknown, false);
        tables.add_indexable_map(FileType::Directory, true);
        tables.add_indexable_map(FileType::Text, true);
        tables.add_indexable_map(FileType::Xml, true);
        tables.add_indexable_map(FileType::Executable, true);
        tables.add_indexable_map(FileType::MsDocument, true);
        tables.add_indexable_map(FileType::MsExcel, true);
        tables.add_indexable_map(FileType::MsPowerpoint, true);

        tables.add_backup_map(FileType::MsDocument, true);
        tables.add_backup_map(FileType::MsExcel, true);

        tables
    }

    /// Shared default tables, initialized exactly once.
    ///
    /// Concurrent first callers block until one of them has finished building
    /// the tables; later calls are plain reads. The shared copy is read-only.
    /// To reconfigure, clone it and hand the clone to an `Indexer`.
    pub fn shared() -> &'static PolicyTables {
        SHARED.get_or_init(|| {
            tracing::debug!("initializing default policy tables");
            PolicyTables::with_defaults()
        })
    }

    pub fn is_indexable(&self, file_type: FileType) -> bool {
        self.indexable.get(&file_type).copied().unwrap_or(false)
    }

    pub fn is_backupable(&self, file_type: FileType) -> bool {
        self.backupable.get(&file_type).copied().unwrap_or(false)
    }

    /// Insert or overwrite the indexable flag for a type.
    pub fn add_indexable_map(&mut self, file_type: FileType, indexable: bool) {
        self.indexable.insert(file_type, indexable);
    }

    /// Insert or overwrite the backupable flag for a type.
    pub fn add_backup_map(&mut self, file_type: FileType, backupable: bool) {
        self.backupable.insert(file_type, backupable);
    }

    /// Types currently flagged as indexable, in enum order.
    pub fn indexable_types(&self) -> impl Iterator<Item = FileType> + '_ {
        self.indexable
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(ft, _)| *ft)
    }

    /// Types currently flagged as backupable, in enum order.
    pub fn backupable_types(&self) -> impl Iterator<Item = FileType> + '_ {
        self.backupable
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(ft, _)| *ft)
    }
}
