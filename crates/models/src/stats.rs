use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::size::format_bytes;

/// Aggregate usage figures for one listing.
///
/// `free_in_bytes` and `used_size_percentage` are `None` when the disk-space
/// probe is not available on this platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    pub total_files: usize,
    pub max_files: usize,
    pub used_files_percentage: u64,
    pub total_size_in_bytes: u64,
    pub free_in_bytes: Option<u64>,
    pub used_size_percentage: Option<u64>,
}

// Human renderings are derived here and never stored.
impl Serialize for StorageStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StorageStats", 8)?;
        state.serialize_field("totalFiles", &self.total_files)?;
        state.serialize_field("maxFiles", &self.max_files)?;
        state.serialize_field("usedFilesPercentage", &self.used_files_percentage)?;
        state.serialize_field("totalSizeInBytes", &self.total_size_in_bytes)?;
        state.serialize_field("humanTotalSize", &format_bytes(self.total_size_in_bytes))?;
        state.serialize_field("freeInBytes", &self.free_in_bytes)?;
        state.serialize_field("humanFree", &self.free_in_bytes.map(format_bytes))?;
        state.serialize_field("usedSizePercentage", &self.used_size_percentage)?;
        state.end()
    }
}
