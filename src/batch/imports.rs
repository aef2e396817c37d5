//! Stylesheet import target resolution for the import closure

use std::path::{Path, PathBuf};

const REMOTE_PREFIXES: [&str; 4] = ["http:", "https:", "//", "data:"];

/// Resolve an `@import` target against the importing file.
///
/// Relative targets resolve against the importer's directory. A leading `/`
/// resolves against `style_root` when one is configured, otherwise it is a
/// filesystem path. Remote targets resolve to `None`.
pub fn resolve_import(importer: &Path, target: &str, style_root: Option<&Path>) -> Option<PathBuf> {
    let target = target.trim();
    if target.is_empty() || is_remote(target) {
        return None;
    }

    if let Some(rooted) = target.strip_prefix('/') {
        return Some(match style_root {
            Some(root) => root.join(rooted),
            None => PathBuf::from(target),
        });
    }

    let base = importer.parent().unwrap_or_else(|| Path::new("."));
    Some(base.join(target))
}

fn is_remote(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    REMOTE_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_to_importer() {
        let resolved = resolve_import(Path::new("styles/pages/index.wxss"), "../common.wxss", None);
        assert_eq!(resolved, Some(PathBuf::from("styles/pages/../common.wxss")));
    }

    #[test]
    fn test_rooted_targets() {
        let root = Path::new("/project/src");
        assert_eq!(
            resolve_import(Path::new("a/b.css"), "/theme.css", Some(root)),
            Some(PathBuf::from("/project/src/theme.css"))
        );
        assert_eq!(
            resolve_import(Path::new("a/b.css"), "/theme.css", None),
            Some(PathBuf::from("/theme.css"))
        );
    }

    #[test]
    fn test_remote_targets_are_skipped() {
        for target in ["https://cdn.example.com/a.css", "HTTP://x/a.css", "//cdn/a.css", "data:text/css,a"] {
            assert_eq!(resolve_import(Path::new("a.css"), target, None), None, "{}", target);
        }
    }
}
