use filedeck_models::{Entry, StorageStats, format_bytes};

/// Display sizes derived on demand from the byte counts of a model value.
pub trait HumanSize {
    fn human_size(&self) -> String;
}

impl HumanSize for Entry {
    fn human_size(&self) -> String {
        format_bytes(self.size_in_bytes())
    }
}

impl HumanSize for StorageStats {
    /// Total size of the listed entries.
    fn human_size(&self) -> String {
        format_bytes(self.total_size_in_bytes)
    }
}

/// Free space rendering, `None` when the probe could not report it.
#[must_use]
pub fn human_free(stats: &StorageStats) -> Option<String> {
    stats.free_in_bytes.map(format_bytes)
}
