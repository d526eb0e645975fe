// SymDrop - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SymDrop";

/// Application identifier used for config directories.
pub const APP_ID: &str = "SymDrop";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Toolchain discovery
// =============================================================================

/// Path of the Xcode toolchain selector used to locate the developer dir.
pub const XCODE_SELECT_PATH: &str = "/usr/bin/xcode-select";

/// File name of the symbolication helper searched for under SharedFrameworks.
pub const SYMBOLICATE_TOOL_NAME: &str = "symbolicatecrash";

/// Directory sibling of the developer dir that hosts the helper.
pub const SHARED_FRAMEWORKS_DIR_NAME: &str = "SharedFrameworks";

/// Environment variable passed to the helper so it resolves the same
/// toolchain that was discovered at startup.
pub const DEVELOPER_DIR_ENV: &str = "DEVELOPER_DIR";

// =============================================================================
// Input classification
// =============================================================================

/// Extension of an Xcode archive bundle (holds app + dSYMs together).
pub const EXT_XCARCHIVE: &str = "xcarchive";

/// Extension of an Organizer crash-point bundle (holds collected crash logs).
pub const EXT_XCCRASHPOINT: &str = "xccrashpoint";

/// Extension of a built application bundle.
pub const EXT_APP: &str = "app";

/// Extension of a debug-symbol bundle.
pub const EXT_DSYM: &str = "dsym";

/// Extension of a raw crash log.
pub const EXT_CRASH: &str = "crash";

/// The full set of extensions accepted by drag-and-drop once the
/// symbolication tool has been located. Order matches the artifact rows
/// shown in the UI.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = [
    EXT_XCARCHIVE,
    EXT_XCCRASHPOINT,
    EXT_APP,
    EXT_DSYM,
    EXT_CRASH,
];

/// Subdirectory of an .xcarchive searched for the built .app.
pub const ARCHIVE_PRODUCTS_DIR: &str = "Products";

/// Subdirectory of an .xcarchive searched for the .app.dSYM.
pub const ARCHIVE_DSYMS_DIR: &str = "dSYMs";

/// Subdirectory of an .xccrashpoint searched for .crash files.
pub const CRASHPOINT_INFOS_DIR: &str = "DistributionInfos";

// =============================================================================
// Search limits
// =============================================================================

/// Maximum directory recursion depth for artifact searches. Bundle layouts
/// are shallow; the cap prevents runaway traversal of damaged trees.
pub const SEARCH_MAX_DEPTH: usize = 16;

// =============================================================================
// Output
// =============================================================================

/// Infix inserted into the suggested output file name:
/// `Foo.crash` -> `Foo.symbolicated.crash`.
pub const OUTPUT_NAME_INFIX: &str = "symbolicated";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config specify one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
