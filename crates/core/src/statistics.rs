use filedeck_models::{Entry, StorageStats};

use crate::error::{IndexError, IndexResult};

/// Computes usage percentages against the file ceiling and free disk space.
///
/// `disk_free` is `None` when the disk-space probe is unavailable; the size
/// percentage is then reported as unknown. Percentages are rounded half-up and
/// are not clamped, so exceeding capacity yields values above 100.
///
/// # Errors
///
/// Returns [`IndexError::DivisionUndefined`] if `max_files` is zero or
/// `disk_free` is `Some(0)`.
pub fn compute_stats(
    total_size_in_bytes: u64,
    file_count: usize,
    disk_free: Option<u64>,
    max_files: usize,
) -> IndexResult<StorageStats> {
    let used_files_percentage = rounded_percentage(file_count as u64, max_files as u64)
        .ok_or(IndexError::DivisionUndefined { what: "file count" })?;

    let used_size_percentage = disk_free
        .map(|free| {
            rounded_percentage(total_size_in_bytes, free).ok_or(IndexError::DivisionUndefined { what: "used size" })
        })
        .transpose()?;

    Ok(StorageStats {
        total_files: file_count,
        max_files,
        used_files_percentage,
        total_size_in_bytes,
        free_in_bytes: disk_free,
        used_size_percentage,
    })
}

/// Statistics over a flat set of entries: one count per entry, sizes summed.
///
/// # Errors
///
/// Same as [`compute_stats`].
pub fn summarize(entries: &[Entry], disk_free: Option<u64>, max_files: usize) -> IndexResult<StorageStats> {
    let total_size = entries
        .iter()
        .fold(0u64, |total, entry| total.saturating_add(entry.size_in_bytes()));

    compute_stats(total_size, entries.len(), disk_free, max_files)
}

// floor(part * 100 / whole + 1/2), exact in integers
fn rounded_percentage(part: u64, whole: u64) -> Option<u64> {
    if whole == 0 {
        return None;
    }
    let numerator = u128::from(part) * 200 + u128::from(whole);
    let denominator = u128::from(whole) * 2;
    Some(u64::try_from(numerator / denominator).unwrap_or(u64::MAX))
}
