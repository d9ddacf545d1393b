// src/address/relative.rs
// =============================================================================
// Computes the href a mirrored document should use to reach another
// mirrored document.
//
// Both inputs are local paths (see NormalizedAddress::local_path), e.g.
//   target   = "example.org/index.html"
//   document = "example.org/foo/index.html"
// The link is relative to the *directory* the document lives in, so the
// answer here is "../index.html".
// =============================================================================

use std::path::{Component, Path};

// Returns the relative path from the directory of `from_document` to `target`
//
// Always uses '/' as separator (it ends up inside an href, not a file API).
// If no relative path exists (the document directory climbs with ".."), the
// target path is returned unchanged.
pub fn relative_link(target: &str, from_document: &str) -> String {
    let from_dir = Path::new(from_document)
        .parent()
        .unwrap_or_else(|| Path::new(""));

    match pathdiff::diff_paths(target, from_dir) {
        Some(relative) => relative
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        None => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Resolves `link` against the directory of `document` the way a browser
    // resolves a relative href on a file:// page
    fn resolve(link: &str, document: &str) -> String {
        let mut parts: Vec<&str> = document.split('/').collect();
        parts.pop();
        for segment in link.split('/') {
            match segment {
                ".." => {
                    parts.pop();
                }
                "." | "" => {}
                name => parts.push(name),
            }
        }
        parts.join("/")
    }

    #[test]
    fn test_child_directory() {
        let link = relative_link("example.org/foo/index.html", "example.org/index.html");
        assert_eq!(link, "foo/index.html");
    }

    #[test]
    fn test_parent_directory() {
        let link = relative_link("example.org/index.html", "example.org/foo/index.html");
        assert_eq!(link, "../index.html");
    }

    #[test]
    fn test_sibling_file() {
        let link = relative_link("example.org/qux.html", "example.org/index.html");
        assert_eq!(link, "qux.html");
    }

    #[test]
    fn test_root_file_from_nested_document() {
        let link = relative_link("example.org/qux.html", "example.org/foo/bar/index.html");
        assert_eq!(link, "../../qux.html");
    }

    #[test]
    fn test_self_link() {
        let link = relative_link("example.org/foo/index.html", "example.org/foo/index.html");
        assert_eq!(link, "index.html");
    }

    #[test]
    fn test_diverging_branches() {
        let link = relative_link("example.org/a/b/index.html", "example.org/c/d/index.html");
        assert_eq!(link, "../../a/b/index.html");
    }

    #[test]
    fn test_round_trip() {
        let paths = [
            "example.org/index.html",
            "example.org/qux.html",
            "example.org/foo/index.html",
            "example.org/foo/bar/index.html",
            "example.org/foo/bar/baz.html",
            "example.org/other/deep/er/index.html",
            "example.org/café menu/index.html",
        ];

        for document in paths {
            for target in paths {
                let link = relative_link(target, document);
                assert_eq!(
                    resolve(&link, document),
                    target,
                    "link {link:?} from {document:?} does not lead back to {target:?}"
                );
            }
        }
    }
}
