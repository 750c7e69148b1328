use std::sync::LazyLock;

use regex::Regex;

use crate::paths::{PathFilter, compact};

// `# <line> "<path>"`, optionally followed by flag digits. This is the
// one output format the external preprocessor is relied upon to emit.
static LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^#\s*(\d+)\s+"([^"]*)""#).expect("line marker pattern"));

/// Extracts the path field from a preprocessor line marker. Every other
/// line yields `None`.
pub fn marker_path(line: &str) -> Option<&str> {
    LINE_MARKER
        .captures(line)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Marker path extraction plus compaction plus the pass-list test, in
/// the order the builder needs them. Out-of-scope paths are dropped.
pub fn accepted_path(line: &str, filter: &PathFilter) -> Option<String> {
    let raw = marker_path(line)?;
    // cpp brackets its pseudo-files: <built-in>, <command-line>,
    // <stdin>. Not real paths, never dependencies.
    if raw.starts_with('<') {
        return None;
    }
    let path = compact(raw);
    filter.allows(&path).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_with_and_without_flags() {
        assert_eq!(marker_path(r#"# 1 "foo/bar.h""#), Some("foo/bar.h"));
        assert_eq!(marker_path(r#"# 12 "a.h" 1 3 4"#), Some("a.h"));
        assert_eq!(marker_path(r#"#  1  "spaced.h""#), Some("spaced.h"));
        assert_eq!(marker_path(r#"# 1 "<built-in>""#), Some("<built-in>"));
    }

    #[test]
    fn test_non_markers_are_discarded() {
        assert_eq!(marker_path("#pragma once"), None);
        assert_eq!(marker_path("int main(void) { return 0; }"), None);
        assert_eq!(marker_path(r#"#define PATH "a.h""#), None);
        assert_eq!(marker_path(""), None);
    }

    #[test]
    fn test_pseudo_file_markers_are_rejected() {
        let mut filter = PathFilter::default();
        filter.add(".");

        assert_eq!(accepted_path(r#"# 0 "<built-in>""#, &filter), None);
        assert_eq!(accepted_path(r#"# 0 "<command-line>""#, &filter), None);
        assert_eq!(accepted_path(r#"# 1 "<stdin>""#, &filter), None);
    }

    #[test]
    fn test_accepted_path_compacts_then_filters() {
        let mut filter = PathFilter::default();
        filter.add(".");

        assert_eq!(
            accepted_path(r#"# 1 "sub/../util.h""#, &filter),
            Some("util.h".to_string())
        );
        assert_eq!(accepted_path(r#"# 1 "/usr/include/stdio.h""#, &filter), None);
        assert_eq!(accepted_path("not a marker", &filter), None);
    }
}
