use std::fs::File;

use crate::escape::escape_regex;

/// Collapses every `segment/../` in `path` until no reduction is left.
/// A leading `../` has no real segment before it and is preserved; the
/// same goes for `./../`. Equivalent paths compare equal after this, so
/// it runs before every filter test and set lookup.
pub fn compact(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        if seg == ".." {
            if let Some(&prev) = kept.last() {
                if prev != ".." && prev != "." && !prev.is_empty() {
                    kept.pop();
                    continue;
                }
            }
        }
        kept.push(seg);
    }
    kept.join("/")
}

/// True iff `path` can be opened for reading. The handle is scoped to
/// this call and released on every exit path.
pub fn exists(path: &str) -> bool {
    File::open(path).is_ok()
}

/// An anchored pass list of directory prefixes. A candidate path is in
/// scope iff it lies under one of the prefixes. Built once by the
/// interpreter, immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    prefixes: Vec<String>,
}

impl PathFilter {
    /// Adds a directory prefix, compacted; duplicates are kept once.
    pub fn add(&mut self, dir: &str) {
        let mut prefix = compact(dir);
        while prefix.len() > 1 && prefix.ends_with('/') {
            prefix.pop();
        }
        // "x/.." compacts away entirely; that is the current directory.
        // An empty prefix must never reach matching.
        if prefix.is_empty() {
            prefix.push('.');
        }
        if !self.prefixes.iter().any(|p| p == &prefix) {
            self.prefixes.push(prefix);
        }
    }

    /// Tests an already-compacted path against the pass list.
    pub fn allows(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| is_under(path, p))
    }

    /// Renders the filter as the anchored alternation it is equivalent
    /// to. Debug output only; matching itself is prefix comparison.
    pub fn pattern(&self) -> String {
        let escaped: Vec<String> = self.prefixes.iter().map(|p| escape_regex(p)).collect();
        format!("^(?:{})", escaped.join("|"))
    }
}

// Prefix comparison at path component boundaries: "src" admits "src" and
// "src/x.h" but never "src2/x.h". The "." prefix stands for the current
// directory and admits any relative path that does not ascend out of it.
fn is_under(path: &str, prefix: &str) -> bool {
    if prefix == "." {
        return !path.is_empty() && !path.starts_with('/') && path != ".." && !path.starts_with("../");
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_compact_single_ascent() {
        assert_eq!(compact("a/b/../c"), "a/c");
    }

    #[test]
    fn test_compact_double_ascent() {
        assert_eq!(compact("x/y/../../z"), "z");
    }

    #[test]
    fn test_compact_keeps_leading_parent() {
        assert_eq!(compact("../a"), "../a");
        assert_eq!(compact("../../a/b"), "../../a/b");
    }

    #[test]
    fn test_compact_dot_segment_is_not_a_real_segment() {
        assert_eq!(compact("a/./../b"), "a/./../b");
    }

    #[test]
    fn test_compact_absolute_and_plain() {
        assert_eq!(compact("/usr/lib/../include/stdio.h"), "/usr/include/stdio.h");
        assert_eq!(compact("/../x"), "/../x");
        assert_eq!(compact("plain.c"), "plain.c");
        assert_eq!(compact("a/b/c/../../d"), "a/d");
    }

    #[test]
    fn test_filter_component_boundaries() {
        let mut filter = PathFilter::default();
        filter.add("src");
        filter.add("include");

        assert!(filter.allows("src/util.h"));
        assert!(filter.allows("src"));
        assert!(filter.allows("include/deep/nested.h"));
        assert!(!filter.allows("src2/util.h"));
        assert!(!filter.allows("other/util.h"));
        assert!(!filter.allows("/usr/include/stdio.h"));
    }

    #[test]
    fn test_filter_current_directory_prefix() {
        let mut filter = PathFilter::default();
        filter.add(".");

        assert!(filter.allows("util.h"));
        assert!(filter.allows("sub/util.h"));
        assert!(!filter.allows("/usr/include/stdio.h"));
        assert!(!filter.allows("../elsewhere/util.h"));
        assert!(!filter.allows(".."));
    }

    #[test]
    fn test_filter_deduplicates_and_compacts_prefixes() {
        let mut filter = PathFilter::default();
        filter.add("src/sub/..");
        filter.add("src");
        filter.add("src/");

        assert_eq!(filter.pattern(), "^(?:src)");
    }

    #[test]
    fn test_fully_collapsed_prefix_is_current_directory() {
        let mut filter = PathFilter::default();
        filter.add("x/..");

        assert_eq!(filter.pattern(), r"^(?:\.)");
        assert!(filter.allows("util.h"));
        assert!(!filter.allows("/usr/include/stdio.h"));
    }

    #[test]
    fn test_exists_probe() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("b.c");
        let mut f = std::fs::File::create(&present).unwrap();
        writeln!(f, "int main(void) {{ return 0; }}").unwrap();

        assert!(exists(present.to_str().unwrap()));
        assert!(!exists(dir.path().join("missing.c").to_str().unwrap()));
    }

    #[test]
    fn test_exists_accepts_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.h");
        std::fs::File::create(&empty).unwrap();

        assert!(exists(empty.to_str().unwrap()));
    }
}
