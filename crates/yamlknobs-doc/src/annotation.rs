//! Annotation keys and fully-qualified binding names.
//!
//! An annotation is a key of the form `<target>-widget` that sits next to
//! `<target>` in the same mapping. Its value describes the control(s) bound
//! to `<target>`.

/// Literal, case-sensitive suffix that marks an annotation key.
pub const ANNOTATION_SUFFIX: &str = "-widget";

/// Separator between path segments of a fully-qualified name.
pub const PATH_SEPARATOR: char = '/';

pub fn is_annotation(key: &str) -> bool {
    key.ends_with(ANNOTATION_SUFFIX)
}

/// The key an annotation controls, or `None` if `key` is not an annotation.
///
/// ```
/// use yamlknobs_doc::annotation::annotation_target;
///
/// assert_eq!(annotation_target("gain-widget"), Some("gain"));
/// assert_eq!(annotation_target("gain"), None);
/// ```
pub fn annotation_target(key: &str) -> Option<&str> {
    key.strip_suffix(ANNOTATION_SUFFIX)
}

/// Append `segment` to an optional path prefix.
pub fn join_path(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(p) => format!("{p}{PATH_SEPARATOR}{segment}"),
        None => segment.to_string(),
    }
}

/// Path segment for element `index` of the sequence under `key`: `key[index]`.
pub fn indexed(key: &str, index: usize) -> String {
    format!("{key}[{index}]")
}

/// Name of the `n`th control of a repeated annotation. The first keeps the
/// bare name; later ones get `-n`.
pub fn repeated(name: &str, n: usize) -> String {
    if n == 0 { name.to_string() } else { format!("{name}-{n}") }
}
