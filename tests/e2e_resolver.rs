// SymDrop - tests/e2e_resolver.rs
//
// End-to-end tests for artifact resolution and invocation.
//
// These tests exercise the real filesystem, real walkdir traversal, and
// (on unix) a real subprocess standing in for symbolicatecrash -- no mocks,
// no stubs. This exercises the full path from a dropped bundle on disk to
// the argv and captured output of a symbolication run.

use std::fs;
use std::path::{Path, PathBuf};
use symdrop::core::artifact::ArtifactResolver;
use symdrop::core::invoke;
use symdrop::core::locate::ToolLocator;
use symdrop::core::search::MatchStrategy;
use symdrop::util::constants::SUPPORTED_EXTENSIONS;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// A locator with both paths known, as after successful startup discovery.
fn located() -> ToolLocator {
    ToolLocator::from_parts(
        Some(PathBuf::from("/Applications/Xcode.app/Contents/Developer")),
        Some(PathBuf::from("/tools/symbolicatecrash")),
    )
}

/// Build an .xcarchive on disk with one app and one dSYM.
fn make_archive(root: &Path, name: &str) -> PathBuf {
    let archive = root.join(format!("{name}.xcarchive"));
    let apps = archive.join("Products").join("Applications");
    fs::create_dir_all(apps.join("Bar.app")).expect("mkdir Bar.app");
    fs::write(apps.join("Bar.app").join("Bar"), "binary").expect("write Bar");
    fs::create_dir_all(archive.join("dSYMs").join("Bar.app.dSYM")).expect("mkdir dSYM");
    archive
}

// =============================================================================
// Resolver scenarios
// =============================================================================

/// Scenario A: a dropped .app populates the app slot but cannot run yet.
#[test]
fn e2e_app_alone_does_not_enable_run() {
    let mut resolver = ArtifactResolver::default();
    resolver.submit(Path::new("/x/Foo.app"));

    assert_eq!(resolver.app(), Some(Path::new("/x/Foo.app")));
    assert!(!resolver.can_invoke(true), "no crash log yet");
}

/// Scenario B: a crash log plus a located tool is enough to run; the argv
/// ends with the crash path and carries no --dsym flag.
#[test]
fn e2e_crash_alone_builds_minimal_argv() {
    let mut resolver = ArtifactResolver::default();
    resolver.submit(Path::new("/x/Foo.crash"));
    assert!(resolver.can_invoke(true));

    let invocation = invoke::build_invocation(&located(), &resolver).expect("buildable");
    assert_eq!(invocation.args.last().map(String::as_str), Some("/x/Foo.crash"));
    assert!(
        !invocation.args.iter().any(|a| a.starts_with("--dsym")),
        "no dSYM resolved, argv must not carry the flag: {:?}",
        invocation.args
    );
}

/// Scenario C: an .xcarchive populates both app and dSYM from nested paths.
#[test]
fn e2e_archive_populates_app_and_dsym() {
    let dir = TempDir::new().unwrap();
    let archive = make_archive(dir.path(), "Archive");

    let mut resolver = ArtifactResolver::default();
    resolver.submit(&archive);

    // Stored paths are canonicalized; compare against the canonical archive
    // so symlinked temp dirs (macOS /var -> /private/var) do not fail this.
    let archive = archive.canonicalize().unwrap();

    let app = resolver.app().expect("app resolved");
    assert_eq!(app.file_name().unwrap(), "Bar.app");
    assert!(app.starts_with(&archive), "app must come from inside the archive");

    let dsym = resolver.dsym().expect("dsym resolved");
    assert_eq!(dsym.file_name().unwrap(), "Bar.app.dSYM");
    assert!(dsym.starts_with(&archive));
}

/// Scenario D: an .xccrashpoint populates the crash slot from a nested file.
#[test]
fn e2e_crash_point_populates_crash_log() {
    let dir = TempDir::new().unwrap();
    let point = dir.path().join("Point.xccrashpoint");
    let logs = point.join("DistributionInfos").join("all").join("Logs");
    fs::create_dir_all(&logs).unwrap();
    fs::write(logs.join("Report.crash"), "Thread 0 crashed\n").unwrap();

    let mut resolver = ArtifactResolver::default();
    resolver.submit(&point);

    let crash = resolver.crash().expect("crash resolved");
    assert_eq!(crash.file_name().unwrap(), "Report.crash");
    assert!(crash.starts_with(point.canonicalize().unwrap()));
}

/// Scenario F: the extension set is empty before tool discovery and equals
/// the fixed five-element set after.
#[test]
fn e2e_supported_extensions_gated_on_tool() {
    let before = ToolLocator::from_parts(Some(PathBuf::from("/dev")), None);
    assert!(before.supported_extensions().is_empty());

    let after = located();
    assert_eq!(after.supported_extensions(), &SUPPORTED_EXTENSIONS);
    assert_eq!(after.supported_extensions().len(), 5);
}

/// Unrecognized extensions leave the resolver untouched.
#[test]
fn e2e_unrecognized_extension_is_noop() {
    let dir = TempDir::new().unwrap();
    let archive = make_archive(dir.path(), "Archive");

    let mut resolver = ArtifactResolver::default();
    resolver.submit(&archive);
    let app_before = resolver.app().map(Path::to_path_buf);

    resolver.submit(Path::new("/x/readme.txt"));
    resolver.submit(Path::new("/x/Foo.ipa"));

    assert_eq!(resolver.app().map(Path::to_path_buf), app_before);
    assert!(resolver.crash().is_none());
}

/// Clearing drops all three artifacts and never touches the locator.
#[test]
fn e2e_clear_leaves_locator_untouched() {
    let locator = located();
    let mut resolver = ArtifactResolver::default();
    resolver.submit(Path::new("/x/Foo.crash"));
    assert!(resolver.can_clear());

    resolver.clear();
    assert!(!resolver.can_clear());
    assert!(!resolver.can_invoke(locator.tool_path().is_some()));
    assert!(locator.tool_path().is_some());
    assert!(locator.developer_dir().is_some());
}

// =============================================================================
// Invocation E2E (real subprocess standing in for symbolicatecrash)
// =============================================================================

/// Scenario E: the helper exits non-zero but prints output; the output is
/// still delivered. Also checks DEVELOPER_DIR reaches the child.
#[test]
#[cfg(unix)]
fn e2e_nonzero_helper_output_is_still_captured() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("symbolicatecrash");
    fs::write(
        &tool,
        "#!/bin/sh\necho \"symbolicated $1 (dev=$DEVELOPER_DIR)\"\nexit 2\n",
    )
    .unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    let locator = ToolLocator::from_parts(Some(PathBuf::from("/fake/dev")), Some(tool));
    let mut resolver = ArtifactResolver::default();
    resolver.submit(Path::new("/x/Foo.crash"));

    let invocation = invoke::build_invocation(&locator, &resolver).expect("buildable");
    let result = invoke::execute(&invocation);

    assert_eq!(result.status, Some(2));
    assert_eq!(
        result.stdout.as_deref(),
        Some("symbolicated /x/Foo.crash (dev=/fake/dev)\n")
    );
}

/// Full pipeline: archive + crash point dropped, then the stand-in helper
/// sees the exact argv order --dsym, crash, app.
#[test]
#[cfg(unix)]
fn e2e_full_pipeline_argv_order() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let archive = make_archive(dir.path(), "Archive");
    let point = dir.path().join("Point.xccrashpoint");
    let logs = point.join("DistributionInfos");
    fs::create_dir_all(&logs).unwrap();
    fs::write(logs.join("Report.crash"), "crash").unwrap();

    let tool = dir.path().join("symbolicatecrash");
    fs::write(&tool, "#!/bin/sh\nfor a in \"$@\"; do echo \"$a\"; done\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    let locator = ToolLocator::from_parts(None, Some(tool));
    let mut resolver = ArtifactResolver::new(MatchStrategy::WalkOrder);
    resolver.submit(&archive);
    resolver.submit(&point);
    assert!(resolver.can_invoke(locator.tool_path().is_some()));

    let invocation = invoke::build_invocation(&locator, &resolver).expect("buildable");
    assert!(invocation.envs.is_empty(), "no developer dir, no env override");

    let result = invoke::execute(&invocation);
    let stdout = result.stdout.expect("stdout captured");
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3, "argv is --dsym, crash, app: {lines:?}");
    assert!(lines[0].starts_with("--dsym=") && lines[0].ends_with("Bar.app.dSYM"));
    assert!(lines[1].ends_with("Report.crash"));
    assert!(lines[2].ends_with("Bar.app"));
}
