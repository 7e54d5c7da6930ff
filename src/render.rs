use std::fmt::Write;

use filedeck_models::{Entry, StorageStats};
use filedeck_utils::{HumanSize, human_free};

/// Renders entries as an indented tree with sizes and media categories.
pub fn render_tree(entries: &[Entry]) -> String {
    let mut out = String::new();
    write_level(&mut out, entries, "");
    out
}

fn write_level(out: &mut String, entries: &[Entry], prefix: &str) {
    for (idx, entry) in entries.iter().enumerate() {
        let last = idx + 1 == entries.len();
        let branch = if last { "└── " } else { "├── " };

        if entry.is_folder() {
            let _ = writeln!(out, "{prefix}{branch}{}/  {}", entry.name(), entry.human_size());
            let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            write_level(out, entry.children(), &child_prefix);
        } else {
            let _ = writeln!(
                out,
                "{prefix}{branch}{}  {}  [{}]",
                entry.name(),
                entry.human_size(),
                entry.media_category()
            );
        }
    }
}

/// One-line usage summary in the style of the dashboard's sidebar.
pub fn render_stats(stats: &StorageStats) -> String {
    let size_part = match (human_free(stats), stats.used_size_percentage) {
        (Some(free), Some(pct)) => format!("{} of {} free ({pct}%)", stats.human_size(), free),
        _ => format!("{} (free space unknown)", stats.human_size()),
    };

    format!(
        "Files: {}/{} ({}%) | Size: {}",
        stats.total_files, stats.max_files, stats.used_files_percentage, size_part
    )
}
