// SymDrop - core/invoke.rs
//
// Invocation plan for the symbolication helper: argv and environment built
// from located tool + resolved artifacts. Pure data assembly, testable
// without launching anything; execution lives in app::run.

use crate::core::artifact::ArtifactResolver;
use crate::core::command::{self, CommandResult};
use crate::core::locate::ToolLocator;
use crate::util::constants;
use std::path::PathBuf;

/// Everything needed to run one symbolication: resolved at build time so the
/// background thread borrows nothing from UI state.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Absolute path of the symbolicatecrash helper.
    pub program: PathBuf,

    /// Argument list, in the helper's required order:
    /// `--dsym=<path>`? `<crashPath>` `<appPath>`?
    pub args: Vec<String>,

    /// Environment overrides; at most one entry (DEVELOPER_DIR).
    pub envs: Vec<(String, String)>,
}

/// Assemble the invocation from locator + resolver state.
///
/// Returns `None` when the tool path or the crash log is absent -- the same
/// condition `ArtifactResolver::can_invoke` gates on, re-checked here so a
/// caller that skipped the predicate cannot build a half-formed command.
pub fn build_invocation(locator: &ToolLocator, resolver: &ArtifactResolver) -> Option<Invocation> {
    let program = locator.tool_path()?.to_path_buf();
    let crash = resolver.crash()?;

    let mut args = Vec::new();
    if let Some(dsym) = resolver.dsym() {
        args.push(format!("--dsym={}", dsym.display()));
    }
    args.push(crash.display().to_string());
    if let Some(app) = resolver.app() {
        args.push(app.display().to_string());
    }

    let mut envs = Vec::new();
    if let Some(developer_dir) = locator.developer_dir() {
        envs.push((
            constants::DEVELOPER_DIR_ENV.to_string(),
            developer_dir.display().to_string(),
        ));
    }

    Some(Invocation {
        program,
        args,
        envs,
    })
}

/// Run the invocation to completion, blocking the calling thread.
///
/// The symbolicated text is the subprocess stdout. Exit status is
/// diagnostic-only: a non-zero helper that still printed output is a
/// success from the user's point of view.
pub fn execute(invocation: &Invocation) -> CommandResult {
    tracing::info!(
        program = %invocation.program.display(),
        args = ?invocation.args,
        "Running symbolication"
    );
    command::run_command(&invocation.program, &invocation.args, &invocation.envs)
}

// =============================================================================
// Tests
// =============================================================================
