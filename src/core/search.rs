// SymDrop - core/search.rs
//
// Recursive artifact search inside dropped bundles.
//
// Architecture note: this module uses `walkdir` for directory traversal as an
// OS abstraction (similar to using std::path::Path). It reads only entry
// metadata (type, mtime), never file contents -- crash logs and dSYMs are
// opaque to SymDrop.
//
// Matches are returned as an ordered sequence and callers take index 0.
// With `MatchStrategy::WalkOrder` the winner is filesystem-order-dependent,
// matching how the original bundles are laid out in practice (one artifact
// per bundle). `MatchStrategy::NewestModified` re-orders by mtime for users
// who drop fat multi-app archives.

use crate::util::constants::SEARCH_MAX_DEPTH;
use crate::util::error::SearchError;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Whether a search targets files or directories. Bundles (.app, .app.dSYM)
/// are directories on disk; crash logs are plain files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Name pattern for a search: an exact file name or a `*.suffix` glob.
#[derive(Debug, Clone, Copy)]
pub enum NamePattern {
    /// Entry name must equal this string exactly.
    Exact(&'static str),

    /// Entry name must end with this suffix (the suffix includes the
    /// leading dot, e.g. ".app.dSYM").
    Suffix(&'static str),
}

impl NamePattern {
    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => name == *exact,
            Self::Suffix(suffix) => name.ends_with(suffix),
        }
    }
}

impl std::fmt::Display for NamePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(exact) => write!(f, "{exact}"),
            Self::Suffix(suffix) => write!(f, "*{suffix}"),
        }
    }
}

/// How to order multiple matches before taking the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Directory-walk order. Not a stable sort: which match wins depends on
    /// filesystem enumeration order.
    #[default]
    WalkOrder,

    /// Most recently modified match first. Deterministic for bundles that
    /// contain several candidates.
    NewestModified,
}

/// Find all entries of `kind` under `root` whose name matches `pattern`,
/// ordered according to `strategy`.
///
/// Per-entry traversal errors (permissions, broken symlinks) are non-fatal
/// and logged; they never abort the walk. A missing root returns `Err` so
/// the caller can log one structured diagnostic instead of a silent empty.
pub fn find_matches(
    root: &Path,
    kind: EntryKind,
    pattern: NamePattern,
    strategy: MatchStrategy,
) -> Result<Vec<PathBuf>, SearchError> {
    if !root.exists() {
        return Err(SearchError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut matches: Vec<PathBuf> = Vec::new();

    // `.app` and `.app.dSYM` bundles are themselves directories we must not
    // descend into once matched: a Products dir may nest Foo.app/PlugIns/
    // Bar.app, and walk order inside a matched bundle is meaningless here.
    // WalkDir has no skip-subtree-on-match filter, so matched directories
    // are recorded and their subtrees excluded by prefix below.
    let walker = WalkDir::new(root)
        .max_depth(SEARCH_MAX_DEPTH)
        .follow_links(false);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(source) => {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let err = SearchError::Traversal { path, source };
                tracing::debug!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };

        let is_kind = match kind {
            EntryKind::File => entry.file_type().is_file(),
            EntryKind::Directory => entry.file_type().is_dir(),
        };
        if !is_kind {
            continue;
        }

        let name = entry.file_name().to_str().unwrap_or("");
        if !pattern.matches(name) {
            continue;
        }
        if matches.iter().any(|m| entry.path().starts_with(m)) {
            continue; // nested inside an already-matched bundle
        }
        matches.push(entry.into_path());
    }

    if strategy == MatchStrategy::NewestModified {
        // Entries with no readable mtime sort last (fail-open ordering).
        matches.sort_by_key(|path| {
            std::cmp::Reverse(
                std::fs::metadata(path)
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH),
            )
        });
    }

    tracing::debug!(
        root = %root.display(),
        pattern = %pattern,
        found = matches.len(),
        "Artifact search finished"
    );

    Ok(matches)
}

/// Find the first match, absorbing all failures into `None` with a logged
/// diagnostic. This is the shape the resolver and locator consume.
pub fn find_first(
    root: &Path,
    kind: EntryKind,
    pattern: NamePattern,
    strategy: MatchStrategy,
) -> Option<PathBuf> {
    match find_matches(root, kind, pattern, strategy) {
        Ok(matches) => {
            if matches.is_empty() {
                let err = SearchError::NoMatch {
                    root: root.to_path_buf(),
                    pattern: pattern.to_string(),
                };
                tracing::info!(error = %err, "Search produced no match");
                None
            } else {
                matches.into_iter().next()
            }
        }
        Err(err) => {
            tracing::info!(error = %err, "Search failed");
            None
        }
    }
}

/// Normalize a path: canonicalize when the entry exists, otherwise fall back
/// to a lexical cleanup of `.` and `..` components so even a stale path stays
/// well-formed for display and argv use.
pub fn normalize(path: &Path) -> PathBuf {
    match std::fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(_) => lexical_normalize(path),
    }
}

/// Component-wise resolution of `.` and `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_bundle_tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        let products = root.join("Products").join("Applications");
        fs::create_dir_all(products.join("Foo.app")).expect("mkdir Foo.app");
        fs::write(products.join("Foo.app").join("Foo"), "binary").expect("write Foo");
        fs::write(products.join("notes.txt"), "notes").expect("write notes");

        let dsyms = root.join("dSYMs");
        fs::create_dir_all(dsyms.join("Foo.app.dSYM")).expect("mkdir Foo.app.dSYM");

        dir
    }

    #[test]
    fn test_finds_app_directory() {
        let dir = make_bundle_tree();
        let found = find_first(
            &dir.path().join("Products"),
            EntryKind::Directory,
            NamePattern::Suffix(".app"),
            MatchStrategy::WalkOrder,
        );
        let found = found.expect("should find Foo.app");
        assert_eq!(found.file_name().unwrap(), "Foo.app");
    }

    #[test]
    fn test_directory_pattern_ignores_files() {
        let dir = make_bundle_tree();
        // notes.txt is a file; a Directory search for *.txt must not match it.
        let found = find_first(
            dir.path(),
            EntryKind::Directory,
            NamePattern::Suffix(".txt"),
            MatchStrategy::WalkOrder,
        );
        assert!(found.is_none());
    }

    #[test]
    fn test_exact_name_match() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("A").join("B");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("symbolicatecrash"), "#!/usr/bin/perl\n").unwrap();
        fs::write(nested.join("symbolicatecrash.bak"), "").unwrap();

        let found = find_first(
            dir.path(),
            EntryKind::File,
            NamePattern::Exact("symbolicatecrash"),
            MatchStrategy::WalkOrder,
        )
        .expect("should find the helper");
        assert_eq!(found.file_name().unwrap(), "symbolicatecrash");
    }

    #[test]
    fn test_missing_root_is_error() {
        let result = find_matches(
            Path::new("/nonexistent/symdrop-search-root"),
            EntryKind::File,
            NamePattern::Suffix(".crash"),
            MatchStrategy::WalkOrder,
        );
        assert!(matches!(result, Err(SearchError::RootNotFound { .. })));
    }

    #[test]
    fn test_missing_root_find_first_is_none() {
        let found = find_first(
            Path::new("/nonexistent/symdrop-search-root"),
            EntryKind::File,
            NamePattern::Suffix(".crash"),
            MatchStrategy::WalkOrder,
        );
        assert!(found.is_none());
    }

    #[test]
    fn test_nested_app_inside_matched_app_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let outer = dir.path().join("Outer.app");
        fs::create_dir_all(outer.join("PlugIns").join("Inner.app")).unwrap();

        let matches = find_matches(
            dir.path(),
            EntryKind::Directory,
            NamePattern::Suffix(".app"),
            MatchStrategy::WalkOrder,
        )
        .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].file_name().unwrap(), "Outer.app");
    }

    #[test]
    fn test_newest_modified_orders_by_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let older = dir.path().join("older.crash");
        let newer = dir.path().join("newer.crash");
        fs::write(&older, "a").unwrap();
        fs::write(&newer, "b").unwrap();

        // Push `newer` clearly ahead of `older` without sleeping.
        let past = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        let file = fs::File::options().write(true).open(&older).unwrap();
        if file.set_modified(past).is_ok() {
            let matches = find_matches(
                dir.path(),
                EntryKind::File,
                NamePattern::Suffix(".crash"),
                MatchStrategy::NewestModified,
            )
            .unwrap();
            assert_eq!(matches[0].file_name().unwrap(), "newer.crash");
            assert_eq!(matches[1].file_name().unwrap(), "older.crash");
        }
    }

    #[test]
    fn test_lexical_normalize_resolves_dots() {
        let normalized = normalize(Path::new("/a/b/../c/./d.crash"));
        assert_eq!(normalized, PathBuf::from("/a/c/d.crash"));
    }
}
