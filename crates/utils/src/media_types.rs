use std::path::Path;

/// Extension of a file name: the text after the last `.`.
///
/// Names without a dot, bare dotfiles such as `.env` and names ending in a
/// dot have no extension.
#[must_use]
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_string)
}

/// Best-effort mime type for an extension, e.g. `"jpg"` -> `"image/jpeg"`.
#[must_use]
pub fn resolve_mime_type(extension: &str) -> Option<String> {
    mime_guess::from_ext(extension)
        .first()
        .map(|mime| mime.essence_str().to_string())
}
