mod entry;
mod listing;
mod size;
mod stats;

pub use entry::{Entry, EntryKind, EntryMeta, FOLDER_MIME, MediaCategory};
pub use listing::{FolderListing, RootListing};
pub use size::format_bytes;
pub use stats::StorageStats;
