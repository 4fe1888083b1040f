//! Process-wide unique naming for filesystem-backed storage.

use crate::mime::split_suffix;
use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Longest base name kept in a generated file name, in bytes.
pub const MAX_BASE_LEN: usize = 100;

// Suffixes longer than this are not real extensions and are shortened too.
const MAX_SUFFIX_LEN: usize = 16;

/// Generate an id that is never repeated within this process.
///
/// Combines wall-clock milliseconds, a process-wide sequence number and a
/// random fragment, so two calls racing at the same instant still differ.
pub fn unique_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", millis, sequence, &random[..8])
}

/// Derive a collision-free file name from a caller-chosen one.
///
/// The result keeps a sanitized form of the base name, cut to
/// [`MAX_BASE_LEN`] bytes, and the original suffix, with a unique id in
/// between. It is never equal to `original` and stays well inside common
/// file-name length limits.
///
/// # Examples
///
/// ```
/// use filestore_core::unique_file_name;
///
/// let first = unique_file_name("report.pdf");
/// let second = unique_file_name("report.pdf");
///
/// assert!(first.starts_with("report_"));
/// assert!(first.ends_with(".pdf"));
/// assert_ne!(first, "report.pdf");
/// assert_ne!(first, second);
/// ```
pub fn unique_file_name(original: &str) -> String {
    let unquoted = original.replace("\\\"", "").replace('"', "");
    let leaf = unquoted.rsplit(['/', '\\']).next().unwrap_or_default();
    let (base, suffix) = split_suffix(leaf.trim());

    let mut base = truncated(sanitize(base), MAX_BASE_LEN);
    if base.is_empty() {
        base = "file".to_string();
    }
    let suffix = suffix
        .map(|s| truncated(sanitize(s), MAX_SUFFIX_LEN))
        .filter(|s| !s.is_empty());

    let id = unique_id();
    match suffix {
        Some(suffix) => format!("{}_{}.{}", base, id, suffix),
        None => format!("{}_{}", base, id),
    }
}

// Keep names portable and free of path separators.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn truncated(mut part: String, max_len: usize) -> String {
    if part.len() > max_len {
        let mut end = max_len;
        while !part.is_char_boundary(end) {
            end -= 1;
        }
        part.truncate(end);
    }
    part
}
