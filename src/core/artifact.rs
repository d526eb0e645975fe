// SymDrop - core/artifact.rs
//
// Artifact resolution: classify one dropped path by extension and record the
// most specific app / dSYM / crash-log locations it implies.
//
// Container bundles (.xcarchive, .xccrashpoint) expand into at most one
// extra directory search per artifact kind; there is no deeper nesting.
// A dropped path is processed only by its outermost extension -- a .app
// inside a dropped .xcarchive never re-enters classification on its own.

use crate::core::search::{self, EntryKind, MatchStrategy, NamePattern};
use crate::util::constants;
use std::path::{Path, PathBuf};

/// The artifact kinds tracked by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    App,
    DebugSymbols,
    CrashLog,
}

/// Accumulated artifact state. Paths are either absent or denoted an
/// existing filesystem entry at discovery time; staleness afterwards is
/// tolerated (single-shot desktop tool).
#[derive(Debug, Default)]
pub struct ArtifactResolver {
    app: Option<PathBuf>,
    dsym: Option<PathBuf>,
    crash: Option<PathBuf>,

    /// Ordering strategy for searches inside container bundles.
    strategy: MatchStrategy,
}

impl ArtifactResolver {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn app(&self) -> Option<&Path> {
        self.app.as_deref()
    }

    pub fn dsym(&self) -> Option<&Path> {
        self.dsym.as_deref()
    }

    pub fn crash(&self) -> Option<&Path> {
        self.crash.as_deref()
    }

    /// Classify `path` by its lowercased extension and update artifact state.
    /// Unrecognized extensions are a strict no-op.
    pub fn submit(&mut self, path: &Path) {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            constants::EXT_XCARCHIVE => self.resolve_archive(path),
            constants::EXT_XCCRASHPOINT => self.resolve_crash_point(path),
            constants::EXT_APP => self.store(ArtifactKind::App, path),
            constants::EXT_DSYM => self.store(ArtifactKind::DebugSymbols, path),
            constants::EXT_CRASH => self.store(ArtifactKind::CrashLog, path),
            other => {
                tracing::debug!(path = %path.display(), extension = other, "Ignored input");
            }
        }
    }

    /// An .xcarchive carries the app under Products/ and the dSYM under
    /// dSYMs/. The two searches are independent; either may fail without
    /// affecting the other.
    fn resolve_archive(&mut self, path: &Path) {
        // e.g. <archive>/Products/Applications/Foo.app
        if let Some(app) = search::find_first(
            &path.join(constants::ARCHIVE_PRODUCTS_DIR),
            EntryKind::Directory,
            NamePattern::Suffix(".app"),
            self.strategy,
        ) {
            self.store(ArtifactKind::App, &app);
        }

        // e.g. <archive>/dSYMs/Foo.app.dSYM
        if let Some(dsym) = search::find_first(
            &path.join(constants::ARCHIVE_DSYMS_DIR),
            EntryKind::Directory,
            NamePattern::Suffix(".app.dSYM"),
            self.strategy,
        ) {
            self.store(ArtifactKind::DebugSymbols, &dsym);
        }
    }

    /// An .xccrashpoint carries collected crash logs under DistributionInfos/.
    fn resolve_crash_point(&mut self, path: &Path) {
        // e.g. <point>/DistributionInfos/all/Logs/Foo.crash
        if let Some(crash) = search::find_first(
            &path.join(constants::CRASHPOINT_INFOS_DIR),
            EntryKind::File,
            NamePattern::Suffix(".crash"),
            self.strategy,
        ) {
            self.store(ArtifactKind::CrashLog, &crash);
        }
    }

    fn store(&mut self, kind: ArtifactKind, path: &Path) {
        let path = search::normalize(path);
        tracing::info!(kind = ?kind, path = %path.display(), "Artifact resolved");
        match kind {
            ArtifactKind::App => self.app = Some(path),
            ArtifactKind::DebugSymbols => self.dsym = Some(path),
            ArtifactKind::CrashLog => self.crash = Some(path),
        }
    }

    /// True iff at least one artifact is present.
    pub fn can_clear(&self) -> bool {
        self.app.is_some() || self.dsym.is_some() || self.crash.is_some()
    }

    /// True iff the symbolication tool is located and a crash log is present.
    /// App and dSYM are optional enhancements, not prerequisites -- the helper
    /// can locate both via Spotlight when given only the crash log.
    pub fn can_invoke(&self, tool_located: bool) -> bool {
        tool_located && self.crash.is_some()
    }

    /// Reset app/dSYM/crash to absent. Locator state is owned elsewhere and
    /// is never cleared.
    pub fn clear(&mut self) {
        self.app = None;
        self.dsym = None;
        self.crash = None;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_unrecognized_extension_is_noop() {
        let mut resolver = ArtifactResolver::default();
        resolver.submit(Path::new("/x/notes.txt"));
        resolver.submit(Path::new("/x/no_extension"));
        assert!(resolver.app().is_none());
        assert!(resolver.dsym().is_none());
        assert!(resolver.crash().is_none());
        assert!(!resolver.can_clear());
    }

    #[test]
    fn test_direct_artifacts_stored_by_extension() {
        let mut resolver = ArtifactResolver::default();
        resolver.submit(Path::new("/x/Foo.app"));
        resolver.submit(Path::new("/x/Foo.app.dSYM"));
        resolver.submit(Path::new("/x/Foo.crash"));
        assert_eq!(resolver.app(), Some(Path::new("/x/Foo.app")));
        assert_eq!(resolver.dsym(), Some(Path::new("/x/Foo.app.dSYM")));
        assert_eq!(resolver.crash(), Some(Path::new("/x/Foo.crash")));
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let mut resolver = ArtifactResolver::default();
        resolver.submit(Path::new("/x/Foo.CRASH"));
        assert!(resolver.crash().is_some());
    }

    #[test]
    fn test_direct_submit_is_idempotent() {
        let mut resolver = ArtifactResolver::default();
        resolver.submit(Path::new("/x/Foo.crash"));
        let first = resolver.crash().map(Path::to_path_buf);
        resolver.submit(Path::new("/x/Foo.crash"));
        assert_eq!(resolver.crash().map(Path::to_path_buf), first);
    }

    #[test]
    fn test_can_invoke_requires_tool_and_crash() {
        let mut resolver = ArtifactResolver::default();
        resolver.submit(Path::new("/x/Foo.app"));
        assert!(!resolver.can_invoke(true)); // no crash log yet

        resolver.submit(Path::new("/x/Foo.crash"));
        assert!(resolver.can_invoke(true));
        assert!(!resolver.can_invoke(false)); // tool missing
    }

    #[test]
    fn test_clear_resets_all_artifacts() {
        let mut resolver = ArtifactResolver::default();
        resolver.submit(Path::new("/x/Foo.app"));
        resolver.submit(Path::new("/x/Foo.crash"));
        assert!(resolver.can_clear());

        resolver.clear();
        assert!(!resolver.can_clear());
        assert!(resolver.app().is_none());
        assert!(resolver.crash().is_none());
    }

    #[test]
    fn test_archive_resolves_app_and_dsym_independently() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("Archive.xcarchive");
        let apps = archive.join("Products").join("Applications");
        fs::create_dir_all(apps.join("Bar.app")).unwrap();
        fs::create_dir_all(archive.join("dSYMs").join("Bar.app.dSYM")).unwrap();

        let mut resolver = ArtifactResolver::default();
        resolver.submit(&archive);

        assert_eq!(
            resolver.app().unwrap().file_name().unwrap(),
            "Bar.app"
        );
        assert_eq!(
            resolver.dsym().unwrap().file_name().unwrap(),
            "Bar.app.dSYM"
        );
    }

    #[test]
    fn test_archive_with_only_dsyms_still_resolves_dsym() {
        // Products/ missing entirely; the dSYM search must still run.
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("Archive.xcarchive");
        fs::create_dir_all(archive.join("dSYMs").join("Bar.app.dSYM")).unwrap();

        let mut resolver = ArtifactResolver::default();
        resolver.submit(&archive);

        assert!(resolver.app().is_none());
        assert!(resolver.dsym().is_some());
    }

    #[test]
    fn test_crash_point_resolves_nested_crash_log() {
        let dir = tempfile::tempdir().unwrap();
        let point = dir.path().join("Point.xccrashpoint");
        let logs = point.join("DistributionInfos").join("all").join("Logs");
        fs::create_dir_all(&logs).unwrap();
        fs::write(logs.join("Bar.crash"), "crash body").unwrap();

        let mut resolver = ArtifactResolver::default();
        resolver.submit(&point);

        assert_eq!(
            resolver.crash().unwrap().file_name().unwrap(),
            "Bar.crash"
        );
    }
}
