pub mod disk;
mod error;
mod listing;
mod statistics;
mod walker;

pub use disk::{DiskSpace, DiskSpaceProbe, StatvfsProbe};
pub use error::{IndexError, IndexResult};
pub use listing::ListingService;
pub use statistics::{compute_stats, summarize};
pub use walker::TreeWalker;
