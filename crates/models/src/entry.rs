use chrono::{DateTime, Local};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::size::format_bytes;

/// Mime type reported for folders and for files whose type cannot be resolved.
pub const FOLDER_MIME: &str = "folder";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Folder => write!(f, "folder"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Folder,
    Video,
    Image,
    Other,
}

impl MediaCategory {
    /// Classifies a file by its mime string. This is a substring test, so
    /// `"application/vnd.video-thing"` counts as video as well.
    #[must_use]
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.contains("video") {
            Self::Video
        } else if mime_type.contains("image") {
            Self::Image
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaCategory::Folder => write!(f, "Folder"),
            MediaCategory::Video => write!(f, "Video"),
            MediaCategory::Image => write!(f, "Image"),
            MediaCategory::Other => write!(f, "Other"),
        }
    }
}

/// Fields shared by files and folders, captured from one stat call.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryMeta {
    pub name: String,
    pub path: String,
    pub url: String,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

/// One node of a storage listing.
///
/// Entries are only built through [`Entry::file`] and [`Entry::folder`], which
/// keep the kind, media category and folder size consistent. There is no way
/// to change an entry after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: String,
    path: String,
    url: String,
    kind: EntryKind,
    media_category: MediaCategory,
    mime_type: String,
    extension: Option<String>,
    size_in_bytes: u64,
    created_at: DateTime<Local>,
    updated_at: DateTime<Local>,
    children: Option<Vec<Entry>>,
}

impl Entry {
    /// Builds a file leaf. A missing mime type falls back to [`FOLDER_MIME`].
    #[must_use]
    pub fn file(meta: EntryMeta, extension: Option<String>, mime_type: Option<String>, size_in_bytes: u64) -> Self {
        let mime_type = mime_type.unwrap_or_else(|| FOLDER_MIME.to_string());
        let media_category = MediaCategory::from_mime(&mime_type);

        Self {
            name: meta.name,
            path: meta.path,
            url: meta.url,
            kind: EntryKind::File,
            media_category,
            mime_type,
            extension,
            size_in_bytes,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
            children: None,
        }
    }

    /// Builds a folder whose size is the sum of its children's sizes.
    #[must_use]
    pub fn folder(meta: EntryMeta, children: Vec<Entry>) -> Self {
        let size_in_bytes = children
            .iter()
            .fold(0u64, |total, child| total.saturating_add(child.size_in_bytes));

        Self {
            name: meta.name,
            path: meta.path,
            url: meta.url,
            kind: EntryKind::Folder,
            media_category: MediaCategory::Folder,
            mime_type: FOLDER_MIME.to_string(),
            extension: None,
            size_in_bytes,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
            children: Some(children),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative path from the storage root, percent-encoded as one component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    #[must_use]
    pub const fn media_category(&self) -> MediaCategory {
        self.media_category
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    #[must_use]
    pub const fn size_in_bytes(&self) -> u64 {
        self.size_in_bytes
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Local> {
        self.updated_at
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    /// Child entries in enumeration order; empty for files.
    #[must_use]
    pub fn children(&self) -> &[Entry] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Consumes the entry, returning its children; empty for files.
    #[must_use]
    pub fn into_children(self) -> Vec<Entry> {
        self.children.unwrap_or_default()
    }

    /// Number of file leaves in this subtree.
    #[must_use]
    pub fn file_count(&self) -> usize {
        match &self.children {
            Some(children) => children.iter().map(Entry::file_count).sum(),
            None => 1,
        }
    }
}

// camelCase JSON with `humanSize` derived from the byte count; `children`
// only appears on folders.
impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Entry", 12)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("mediaCategory", &self.media_category)?;
        state.serialize_field("mimeType", &self.mime_type)?;
        state.serialize_field("extension", &self.extension)?;
        state.serialize_field("sizeInBytes", &self.size_in_bytes)?;
        state.serialize_field("humanSize", &format_bytes(self.size_in_bytes))?;
        state.serialize_field("createdAt", &self.created_at)?;
        state.serialize_field("updatedAt", &self.updated_at)?;
        match &self.children {
            Some(children) => state.serialize_field("children", children)?,
            None => state.skip_field("children")?,
        }
        state.end()
    }
}
