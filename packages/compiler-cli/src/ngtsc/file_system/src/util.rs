//! POSIX path algebra.
//!
//! Everything here is a pure function over `/`-separated strings; nothing touches the disk. The
//! semantics follow Node's `path.posix` helpers, except that results never carry a trailing
//! separator (other than the root `/` itself).

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

type Segments<'a> = SmallVec<[&'a str; 16]>;

static SOURCE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\.ts|\.d\.ts|\.js|\.jsx|\.tsx)$").unwrap());

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Remove a `.ts`, `.d.ts`, `.tsx`, `.js` or `.jsx` extension from a file name.
pub fn strip_extension(path: &str) -> String {
    SOURCE_EXTENSION.replace(path, "").into_owned()
}

/// Whether the path starts at a file-system root (`/foo` or `C:/foo`).
pub fn is_rooted(path: &str) -> bool {
    let path = normalize_separators(path);
    if path.starts_with('/') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// Splits a rooted path into its drive/root prefix and the remainder.
fn split_root(path: &str) -> (&str, &str) {
    if let Some(rest) = path.strip_prefix('/') {
        return ("/", rest);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        return (&path[..3], &path[3..]);
    }
    ("", path)
}

/// Collapse `.` and `..` segments and duplicate separators.
///
/// A `..` that would climb above the root of an absolute path is dropped; in a relative path it is
/// kept, so `normalize("../a/./b/")` is `../a/b`.
pub fn normalize(path: &str) -> String {
    let path = normalize_separators(path);
    let (root, rest) = split_root(&path);

    let mut segments: Segments = SmallVec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last().copied() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                _ if root.is_empty() => segments.push(".."),
                _ => {}
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (root.is_empty(), joined.is_empty()) {
        (true, true) => ".".to_string(),
        (true, false) => joined,
        (false, _) => format!("{}{}", root, joined),
    }
}

/// Join path fragments and normalize the result. Empty fragments are ignored.
pub fn join(base_path: &str, paths: &[&str]) -> String {
    let mut joined = String::from(base_path);
    for p in paths.iter().filter(|p| !p.is_empty()) {
        if !joined.is_empty() && !joined.ends_with('/') {
            joined.push('/');
        }
        joined.push_str(p);
    }
    normalize(&joined)
}

/// The directory portion of a path.
pub fn dirname(file: &str) -> String {
    let file = normalize_separators(file);
    let trimmed = file.trim_end_matches('/');
    if trimmed.is_empty() {
        return if file.starts_with('/') { "/".to_string() } else { ".".to_string() };
    }
    match trimmed.rfind('/') {
        None => ".".to_string(),
        Some(0) => "/".to_string(),
        Some(pos) => {
            let dir = &trimmed[..pos];
            if dir.len() == 2 && dir.ends_with(':') {
                format!("{}/", dir)
            } else {
                dir.to_string()
            }
        }
    }
}

/// The last segment of a path.
pub fn basename(file: &str) -> String {
    let file = normalize_separators(file);
    file.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Compute the relative path from directory `from` to `to`.
///
/// Both paths are normalized first. Identical paths yield the empty string, mirroring
/// `path.relative`. If the two paths live on different roots, `to` is returned unchanged.
pub fn relative(from: &str, to: &str) -> String {
    let from = normalize(from);
    let to = normalize(to);
    if from == to {
        return String::new();
    }

    let (from_root, from_rest) = split_root(&from);
    let (to_root, to_rest) = split_root(&to);
    if from_root != to_root {
        return to;
    }

    let from_segments: Segments = from_rest.split('/').filter(|s| !s.is_empty()).collect();
    let to_segments: Segments = to_rest.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_segments
        .iter()
        .zip(to_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result: Segments = SmallVec::new();
    for _ in common..from_segments.len() {
        result.push("..");
    }
    result.extend_from_slice(&to_segments[common..]);
    result.join("/")
}

/// Whether `relative_path` stays inside the directory it was computed from.
pub fn is_local_relative_path(relative_path: &str) -> bool {
    !is_rooted(relative_path) && relative_path != ".." && !relative_path.starts_with("../")
}

/// Whether `path` is `dir` itself or lies underneath it, compared segment-wise so that `/a/bc`
/// is not considered to be inside `/a/b`.
pub fn is_within(dir: &str, path: &str) -> bool {
    is_local_relative_path(&relative(dir, path))
}

/// Replace a leading `from` directory of `path` with `to`.
///
/// Returns `None` when `path` is not `from` itself or a descendant of it.
pub fn replace_root(path: &str, from: &str, to: &str) -> Option<String> {
    if path == from {
        return Some(to.to_string());
    }
    let rest = if from.ends_with('/') {
        path.strip_prefix(from)?
    } else {
        path.strip_prefix(from)?.strip_prefix('/')?
    };
    Some(join(to, &[rest]))
}
