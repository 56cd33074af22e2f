//! filedex - index a directory tree by file type and list it with human-readable sizes

pub mod error;
pub mod file_type;
pub mod indexer;
pub mod node;
pub mod output;
pub mod policy;
pub mod size;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{IndexError, IndexResult};
pub use file_type::{FileType, lookup_file_type};
pub use indexer::{Indexer, IndexerConfig};
pub use node::{FsNode, NodeInfo};
pub use output::{ListingPrinter, OutputConfig, print_json};
pub use policy::PolicyTables;
pub use size::{FileSize, format_size};
