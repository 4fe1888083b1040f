//! Mime type inference from file-name suffixes.

/// Infer a mime type from the suffix of `name`.
///
/// Returns `None` when the suffix is missing or unknown.
///
/// # Examples
///
/// ```
/// use filestore_core::mime_type_from_name;
///
/// assert_eq!(mime_type_from_name("report.pdf").as_deref(), Some("application/pdf"));
/// assert_eq!(mime_type_from_name("notes.TXT").as_deref(), Some("text/plain"));
/// assert_eq!(mime_type_from_name("blob.zzunknown"), None);
/// assert_eq!(mime_type_from_name("README"), None);
/// ```
pub fn mime_type_from_name(name: &str) -> Option<String> {
    split_suffix(name).1?;
    mime_guess::from_path(name)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// Split `name` into base and suffix at the last dot.
///
/// A leading dot (`.profile`) belongs to the base, and a trailing dot yields
/// no suffix.
pub fn split_suffix(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((base, suffix)) if !base.is_empty() && !suffix.is_empty() => (base, Some(suffix)),
        _ => (name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_inner_dots_in_base() {
        assert_eq!(split_suffix("archive.tar.gz"), ("archive.tar", Some("gz")));
    }

    #[test]
    fn split_treats_dotfiles_as_base() {
        assert_eq!(split_suffix(".profile"), (".profile", None));
        assert_eq!(split_suffix("trailing."), ("trailing.", None));
    }

    #[test]
    fn common_types_are_inferred() {
        assert_eq!(mime_type_from_name("a.png").as_deref(), Some("image/png"));
        assert_eq!(mime_type_from_name("a.json").as_deref(), Some("application/json"));
    }
}
