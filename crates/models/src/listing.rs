use serde::Serialize;

use crate::{Entry, StorageStats};

/// Flat listing of the storage root's top-level entries.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RootListing {
    pub stats: StorageStats,
    pub entries: Vec<Entry>,
}

/// A single walked folder together with statistics over its direct children.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FolderListing {
    pub stats: StorageStats,
    pub folder: Entry,
}
