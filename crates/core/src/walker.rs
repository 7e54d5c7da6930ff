use filedeck_config::Settings;
use filedeck_models::{Entry, EntryMeta};
use filedeck_utils::datetime::entry_times;
use filedeck_utils::media_types::{extension_of, resolve_mime_type};
use filedeck_utils::path::{decode_path, encode_component, encode_url_path, join_relative, normalize_relative};
use futures::future::{BoxFuture, try_join_all};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, trace};

use crate::error::{IndexError, IndexResult};

/// Builds [`Entry`] trees from the storage root.
///
/// Every call to [`TreeWalker::walk`] reads the filesystem from scratch.
/// Sibling entries are walked concurrently and joined in enumeration order;
/// the first failing child aborts the whole walk.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    url_prefix: String,
    max_depth: usize,
    io_permits: Arc<Semaphore>,
}

impl TreeWalker {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            root: settings.storage_root.clone(),
            url_prefix: settings.public_url_prefix.clone(),
            max_depth: settings.max_depth,
            io_permits: Arc::new(Semaphore::new(settings.max_concurrent_io.max(1))),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks `relative_path` (percent-encoded or plain, empty for the root).
    ///
    /// The input is always decoded once, so a name that itself contains `%XX`
    /// must be passed encoded; [`Entry::path`] values always round-trip.
    ///
    /// # Errors
    ///
    /// - [`IndexError::InvalidPath`] if the path climbs out of the storage root
    /// - [`IndexError::NotFound`] if the path or any descendant disappears
    /// - [`IndexError::Io`] for any other stat or enumeration failure
    /// - [`IndexError::DepthExceeded`] if nesting goes deeper than `max_depth`
    pub async fn walk(&self, relative_path: &str) -> IndexResult<Entry> {
        let decoded = decode_path(relative_path);
        let relative = normalize_relative(&decoded).ok_or_else(|| IndexError::InvalidPath {
            path: decoded.to_string(),
        })?;

        debug!("Walker: walking {:?} under {:?}", relative, self.root);
        self.walk_node(self.root.join(&relative), relative, 0).await
    }

    // `full_path` keeps the on-disk names; `relative` is their lossy UTF-8 form
    // used for display, identifiers and errors.
    fn walk_node(&self, full_path: PathBuf, relative: String, depth: usize) -> BoxFuture<'_, IndexResult<Entry>> {
        Box::pin(async move {
            if depth > self.max_depth {
                return Err(IndexError::DepthExceeded {
                    path: relative,
                    max_depth: self.max_depth,
                });
            }

            let metadata = self.stat(&full_path, &relative).await?;
            let meta = self.entry_meta(&relative, &metadata);

            if metadata.is_dir() {
                let names = self.read_dir_names(&full_path, &relative).await?;
                debug!("Walker: {:?} has {} children", relative, names.len());

                let children = try_join_all(names.iter().map(|name| {
                    let child_relative = join_relative(&relative, &name.to_string_lossy());
                    self.walk_node(full_path.join(name), child_relative, depth + 1)
                }))
                .await?;

                Ok(Entry::folder(meta, children))
            } else {
                let extension = extension_of(&meta.name);
                let mime_type = extension.as_deref().and_then(resolve_mime_type);
                trace!("Walker: file {:?} ({:?})", relative, mime_type);

                Ok(Entry::file(meta, extension, mime_type, metadata.len()))
            }
        })
    }

    fn entry_meta(&self, relative: &str, metadata: &std::fs::Metadata) -> EntryMeta {
        let name = relative.rsplit_once('/').map_or(relative, |(_, name)| name);
        let (created_at, updated_at) = entry_times(metadata);

        EntryMeta {
            name: name.to_string(),
            path: encode_component(relative),
            url: encode_url_path(&self.url_prefix, relative),
            created_at,
            updated_at,
        }
    }

    async fn stat(&self, full_path: &Path, relative: &str) -> IndexResult<std::fs::Metadata> {
        let _permit = self.permit(relative).await?;
        tokio::fs::metadata(full_path)
            .await
            .map_err(|e| IndexError::from_io(relative, e))
    }

    async fn read_dir_names(&self, full_path: &Path, relative: &str) -> IndexResult<Vec<OsString>> {
        let _permit = self.permit(relative).await?;
        let mut read_dir = tokio::fs::read_dir(full_path)
            .await
            .map_err(|e| IndexError::from_io(relative, e))?;

        let mut names = Vec::new();
        while let Some(dir_entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| IndexError::from_io(relative, e))?
        {
            names.push(dir_entry.file_name());
        }
        Ok(names)
    }

    // Held only around a single filesystem call, never while awaiting children.
    async fn permit(&self, relative: &str) -> IndexResult<SemaphorePermit<'_>> {
        self.io_permits.acquire().await.map_err(|e| IndexError::Io {
            path: relative.to_string(),
            source: io::Error::other(e),
        })
    }
}
