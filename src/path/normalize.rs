use std::path::{Path, PathBuf, is_separator};

const SEPARATOR: char = '/';

/// Characters which can't appear in a portable path segment.
///
/// A segment containing any of them is left alone by [`normalize_lexically`]: a `..` following it
/// is not collapsed.
const RESERVED: &[char] = &['"', '*', ':', '<', '>', '?', '\\', '|'];

/// Extension appended by [`remove_extension`] when nothing is left after stripping.
pub const DEFAULT_EXTENSION: &str = "html";

/// Whether [`path_diff`] should keep leading separators of its result.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub enum LeadingSeparator {
    #[default]
    Keep,
    Strip,
}

/// Resolve `path` like [`std::fs::canonicalize`], but without failing on missing paths.
///
/// If the path exists, symlinks are resolved and the result is absolute. Otherwise the path is
/// only cleaned up lexically with [`normalize_lexically`], and stays relative if it was relative.
///
/// Paths which are not valid UTF-8 and can't be canonicalized are returned as they are.
///
/// # Examples
///
/// ```rust
/// # use pathkit::path::soft_realpath;
/// # use std::path::PathBuf;
/// assert_eq!(soft_realpath("no/such/../path"), PathBuf::from("no/path"));
/// ```
pub fn soft_realpath(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match std::fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(_) => match path.to_str() {
            Some(raw) => PathBuf::from(normalize_lexically(raw)),
            None => path.to_path_buf(),
        },
    }
}

/// Collapse `.`, `..` and repeated separators in `path` without touching the filesystem.
///
/// Works on `/` separated segments in a single pass:
/// - empty and `.` segments are dropped,
/// - `..` removes the segment before it, unless there is none (relative paths keep it, absolute
///   paths drop it), the previous segment is itself `..`, or it contains reserved characters,
/// - leading and trailing separators survive.
///
/// An empty relative result is `.`, an empty absolute result is `/`.
///
/// # Examples
///
/// ```rust
/// # use pathkit::path::normalize_lexically;
/// assert_eq!(normalize_lexically("/a/./b//c/../d"), "/a/b/d");
/// assert_eq!(normalize_lexically("a/../../b"), "../b");
/// ```
pub fn normalize_lexically(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let absolute = path.starts_with(SEPARATOR);
    let trailing = path.len() > 1 && path.ends_with(SEPARATOR);

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&previous) if previous != ".." && !previous.contains(RESERVED) => {
                    segments.pop();
                }
                None if absolute => {}
                _ => segments.push(segment),
            },
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return if absolute { "/".to_owned() } else { ".".to_owned() };
    }
    let mut normalized = String::with_capacity(path.len());
    if absolute {
        normalized.push(SEPARATOR);
    }
    normalized.push_str(&segments.join("/"));
    if trailing {
        normalized.push(SEPARATOR);
    }
    normalized
}

/// Returns `true` if some segment of `path` starts with a dot.
///
/// Both the path as written (lexically normalized) and its [`soft_realpath`] are checked, so
/// `.` is hidden even though it resolves to the current directory, and so is anything living
/// below a hidden directory.
///
/// # Examples
///
/// ```rust
/// # use pathkit::path::file_is_hidden;
/// assert!(file_is_hidden("/root/.idea/workspace.xml"));
/// assert!(!file_is_hidden("root/hello.rs"));
/// ```
pub fn file_is_hidden(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let written = path.to_str().map(normalize_lexically);
    if written.as_deref().is_some_and(has_hidden_segment) {
        return true;
    }
    has_hidden_segment(&soft_realpath(path).to_string_lossy())
}

fn has_hidden_segment(path: &str) -> bool {
    path.split(|c| c == SEPARATOR || is_separator(c))
        .any(|segment| segment.starts_with('.'))
}

/// Remove the first occurrence of `outer` from `inner`.
///
/// This is plain substring removal, it doesn't look at path segments. When `outer` doesn't occur
/// in `inner`, `inner` is returned unchanged.
///
/// # Examples
///
/// ```rust
/// # use pathkit::path::{LeadingSeparator, path_diff};
/// assert_eq!(path_diff("/a/b", "/a/b/c", LeadingSeparator::Keep), "/c");
/// assert_eq!(path_diff("/a/b", "/a/b/c", LeadingSeparator::Strip), "c");
/// ```
pub fn path_diff(outer: &str, inner: &str, leading: LeadingSeparator) -> String {
    let diff = if outer.is_empty() {
        inner.to_owned()
    } else {
        inner.replacen(outer, "", 1)
    };
    match leading {
        LeadingSeparator::Keep => diff,
        LeadingSeparator::Strip => diff.trim_start_matches(['/', '\\']).to_owned(),
    }
}

/// [`remove_extension_or`] with [`DEFAULT_EXTENSION`] as the fallback.
pub fn remove_extension(filename: &str, extension: &str) -> String {
    remove_extension_or(filename, extension, DEFAULT_EXTENSION)
}

/// Strip `extension` from `filename`, if that's its extension.
///
/// When the stripped name has no extension left, `.{default}` is appended, so `index.twig`
/// becomes `index.html` while `index.css.twig` becomes `index.css`. Any other filename is
/// returned unchanged.
///
/// The extension is whatever follows the last dot of the final segment, a leading dot included:
/// `.twig` has extension `twig`.
pub fn remove_extension_or(filename: &str, extension: &str, default: &str) -> String {
    match extension_of(filename) {
        Some(current) if current == extension => {
            let stripped = &filename[..filename.len() - extension.len() - 1];
            if extension_of(stripped).is_none_or(str::is_empty) {
                format!("{stripped}.{default}")
            } else {
                stripped.to_owned()
            }
        }
        _ => filename.to_owned(),
    }
}

fn extension_of(path: &str) -> Option<&str> {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    name.rfind('.').map(|dot| &name[dot + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ODD: &str = "blah-_0938!#$%&'()+,;=@[]^`{}~";

    #[test]
    fn collapses_parent_segments() {
        assert_eq!(
            normalize_lexically(&format!("/user/{ODD}/../some/path")),
            "/user/some/path"
        );
        assert_eq!(
            normalize_lexically(&format!("user/{ODD}/../some/path")),
            "user/some/path"
        );
        assert_eq!(normalize_lexically("a/b/../c"), "a/c");
        assert_eq!(normalize_lexically("a/b/c/../../d"), "a/d");
    }

    #[test]
    fn collapses_current_and_empty_segments() {
        assert_eq!(
            normalize_lexically(&format!("/user/{ODD}/./some/path")),
            format!("/user/{ODD}/some/path")
        );
        assert_eq!(
            normalize_lexically(&format!("/user/{ODD}//some/path")),
            format!("/user/{ODD}/some/path")
        );
        assert_eq!(
            normalize_lexically(&format!("user/{ODD}/./some/path")),
            format!("user/{ODD}/some/path")
        );
        assert_eq!(
            normalize_lexically(&format!("user/{ODD}//some/path")),
            format!("user/{ODD}/some/path")
        );
        assert_eq!(normalize_lexically("./a"), "a");
    }

    #[test]
    fn unresolvable_parents() {
        assert_eq!(normalize_lexically("a/../../b"), "../b");
        assert_eq!(normalize_lexically("../../b"), "../../b");
        assert_eq!(normalize_lexically("/../b"), "/b");
        assert_eq!(normalize_lexically("a/.."), ".");
        assert_eq!(normalize_lexically("/a/.."), "/");
    }

    #[test]
    fn adversarial_input_terminates() {
        let nasty = "a/../".repeat(10_000) + &"../".repeat(3) + "b";
        assert_eq!(normalize_lexically(&nasty), "../../../b");
    }

    #[test]
    fn reserved_segments_are_opaque() {
        assert_eq!(normalize_lexically("a:b/../c"), "a:b/../c");
        assert_eq!(normalize_lexically("x/a*b/../c"), "x/a*b/../c");
    }

    #[test]
    fn keeps_edges() {
        assert_eq!(normalize_lexically(""), "");
        assert_eq!(normalize_lexically("/"), "/");
        assert_eq!(normalize_lexically("."), ".");
        assert_eq!(normalize_lexically("a/b/"), "a/b/");
        assert_eq!(normalize_lexically("a/b/./"), "a/b/");
    }

    #[test]
    fn soft_realpath_missing_path_is_lexical() {
        assert_eq!(
            soft_realpath("this/does/not/exist/../really"),
            PathBuf::from("this/does/not/really")
        );
        assert_eq!(soft_realpath("a/b/../c"), PathBuf::from("a/c"));
    }

    #[test]
    fn soft_realpath_existing_path_is_canonical() {
        let tmp = tempfile::Builder::new()
            .prefix("pathkit")
            .tempdir()
            .expect("needed for tests");
        std::fs::create_dir(tmp.path().join("a")).expect("needed for tests");
        std::fs::create_dir(tmp.path().join("b")).expect("needed for tests");

        let resolved = soft_realpath(tmp.path().join("a/../b"));
        let expected = std::fs::canonicalize(tmp.path())
            .expect("needed for tests")
            .join("b");
        assert_eq!(resolved, expected);
    }

    #[test]
    fn hidden_files() {
        assert!(file_is_hidden("."));
        assert!(file_is_hidden(".woot.rs"));
        assert!(file_is_hidden("/root/.idea/woot.rs"));
        assert!(file_is_hidden("some/.git/"));
        assert!(!file_is_hidden("root/hello.rs"));
        assert!(!file_is_hidden("hello.rs"));
        assert!(!file_is_hidden("root//hello.rs"));
    }

    #[test]
    fn hidden_below_existing_hidden_directory() {
        let tmp = tempfile::Builder::new()
            .prefix("pathkit")
            .tempdir()
            .expect("needed for tests");
        let hidden = tmp.path().join(".cache");
        std::fs::create_dir(&hidden).expect("needed for tests");
        std::fs::write(hidden.join("entry"), b"x").expect("needed for tests");

        assert!(file_is_hidden(hidden.join("entry")));
        assert!(!file_is_hidden(tmp.path()));
    }

    #[test]
    fn path_diff_removes_prefix() {
        let outer = "/path/to/blah";
        let inner = "/path/to/blah/and/some/more";
        assert_eq!(path_diff(outer, inner, LeadingSeparator::Keep), "/and/some/more");
        assert_eq!(path_diff(outer, inner, LeadingSeparator::Strip), "and/some/more");
        assert_eq!(
            path_diff(outer, "/path/to/cake", LeadingSeparator::Keep),
            "/path/to/cake"
        );
    }

    #[test]
    fn path_diff_is_not_path_aware() {
        assert_eq!(path_diff("/a/b", "/a/bc/d", LeadingSeparator::Keep), "c/d");
        assert_eq!(path_diff("x", "x/x", LeadingSeparator::Keep), "/x");
        assert_eq!(path_diff("", "/a", LeadingSeparator::Keep), "/a");
        assert_eq!(path_diff("C:", "C:\\dir", LeadingSeparator::Strip), "dir");
    }

    #[test]
    fn removes_extensions() {
        assert_eq!(remove_extension("index.twig", "twig"), "index.html");
        assert_eq!(remove_extension("index.html.twig", "twig"), "index.html");
        assert_eq!(remove_extension("twig.twig", "twig"), "twig.html");
        assert_eq!(remove_extension("twig/blah.twig", "twig"), "twig/blah.html");
        assert_eq!(remove_extension("twig/twig.html.twig", "twig"), "twig/twig.html");
        assert_eq!(remove_extension("a/b.html.twig", "twig"), "a/b.html");
        assert_eq!(remove_extension(".twig.css.twig", "twig"), ".twig.css");
    }

    #[test]
    fn keeps_other_extensions() {
        assert_eq!(remove_extension("index.md", "twig"), "index.md");
        assert_eq!(remove_extension("twig", "twig"), "twig");
        assert_eq!(remove_extension("dir.twig/file", "twig"), "dir.twig/file");
        assert_eq!(remove_extension("noext", ""), "noext");
    }

    #[test]
    fn custom_default_extension() {
        assert_eq!(remove_extension_or("page.tpl", "tpl", "txt"), "page.txt");
        assert_eq!(remove_extension_or("page.css.tpl", "tpl", "txt"), "page.css");
    }
}
