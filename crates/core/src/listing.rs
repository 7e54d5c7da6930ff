use filedeck_config::Settings;
use filedeck_models::{FolderListing, RootListing};
use tracing::{info, warn};

use crate::disk::{DiskSpaceProbe, StatvfsProbe};
use crate::error::{IndexError, IndexResult};
use crate::statistics::summarize;
use crate::walker::TreeWalker;

/// Answers the two dashboard requests: the root listing and a folder listing.
///
/// Each call walks the tree and probes the disk anew; nothing is cached
/// between calls.
#[derive(Debug, Clone)]
pub struct ListingService<P = StatvfsProbe> {
    walker: TreeWalker,
    probe: P,
    max_files: usize,
}

impl ListingService<StatvfsProbe> {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::with_probe(settings, StatvfsProbe)
    }
}

impl<P: DiskSpaceProbe> ListingService<P> {
    #[must_use]
    pub fn with_probe(settings: &Settings, probe: P) -> Self {
        Self {
            walker: TreeWalker::new(settings),
            probe,
            max_files: settings.max_files,
        }
    }

    #[must_use]
    pub const fn walker(&self) -> &TreeWalker {
        &self.walker
    }

    /// Lists the top-level entries of the storage root, each walked in full.
    ///
    /// # Errors
    ///
    /// Propagates any walk, probe or statistics failure.
    pub async fn list_root(&self) -> IndexResult<RootListing> {
        info!("Listing: root of {:?}", self.walker.root());

        let (root, disk_free) = tokio::try_join!(self.walker.walk(""), self.disk_free())
            .inspect_err(|e| warn!("Listing: failed to list storage root: {}", e))?;

        let entries = root.into_children();
        let stats = summarize(&entries, disk_free, self.max_files)?;

        info!(
            "Listing: root has {} entries, {} bytes",
            stats.total_files, stats.total_size_in_bytes
        );
        Ok(RootListing { stats, entries })
    }

    /// Walks one folder; statistics cover its direct children only.
    ///
    /// `path` may be percent-encoded, as produced by [`filedeck_models::Entry::path`].
    ///
    /// # Errors
    ///
    /// Propagates any walk, probe or statistics failure.
    pub async fn get_folder(&self, path: &str) -> IndexResult<FolderListing> {
        info!("Listing: folder {:?}", path);

        let (folder, disk_free) = tokio::try_join!(self.walker.walk(path), self.disk_free())
            .inspect_err(|e| warn!("Listing: failed to read folder {:?}: {}", path, e))?;

        let stats = summarize(folder.children(), disk_free, self.max_files)?;
        Ok(FolderListing { stats, folder })
    }

    async fn disk_free(&self) -> IndexResult<Option<u64>> {
        match self.probe.probe(self.walker.root()).await {
            Ok(space) => Ok(Some(space.free_bytes)),
            Err(IndexError::Unsupported) => {
                warn!("Listing: disk-space probe unsupported, free space unknown");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
