use std::borrow::Cow;
use std::path::MAIN_SEPARATOR;

/// Percent-decodes a path received from a URL. Input that does not decode to
/// valid UTF-8 is returned unchanged.
#[must_use]
pub fn decode_path(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Normalizes a relative path below the storage root.
///
/// Segments are split on `/` and the platform separator only, so a backslash
/// is part of a name on unix. Empty and `.` segments are dropped, so `""`, `"/"` and `"./"` all name the
/// root. Returns `None` if any segment is `..`, which would escape the root.
#[must_use]
pub fn normalize_relative(path: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in path.split(['/', MAIN_SEPARATOR]) {
        match segment {
            "" | "." => {}
            ".." => return None,
            s => segments.push(s),
        }
    }
    Some(segments.join("/"))
}

/// Appends a child name to a relative path; the root is the empty string.
#[must_use]
pub fn join_relative(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}/{child}")
    }
}

/// Encodes a whole relative path as a single URL component, separators included.
#[must_use]
pub fn encode_component(relative: &str) -> String {
    urlencoding::encode(relative).into_owned()
}

/// Builds a public link: each segment is encoded, `/` stays the separator.
#[must_use]
pub fn encode_url_path(prefix: &str, relative: &str) -> String {
    let encoded = relative
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    format!("{}/{}", prefix.trim_end_matches('/'), encoded)
}
