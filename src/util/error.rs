// SymDrop - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// Propagation policy: discovery, search, and invocation failures are
// absorbed at the subsystem boundary -- logged via tracing and represented
// as an absent Option slot. These types exist so the diagnostics carry
// structure instead of bare strings.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all SymDrop operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SymDropError {
    /// Toolchain location failed.
    Locate(LocateError),

    /// Artifact search failed.
    Search(SearchError),

    /// Symbolication subprocess failed.
    Invoke(InvokeError),

    /// Writing the symbolicated output failed.
    Save(SaveError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for SymDropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locate(e) => write!(f, "Toolchain error: {e}"),
            Self::Search(e) => write!(f, "Search error: {e}"),
            Self::Invoke(e) => write!(f, "Invocation error: {e}"),
            Self::Save(e) => write!(f, "Save error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for SymDropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Locate(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Invoke(e) => Some(e),
            Self::Save(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Locate errors
// ---------------------------------------------------------------------------

/// Errors related to locating the developer dir and symbolication tool.
#[derive(Debug)]
pub enum LocateError {
    /// The toolchain selector could not be run or produced no usable output.
    SelectorFailed { command: String, detail: String },

    /// The selector ran but its first output line was empty.
    EmptyOutput { command: String },

    /// The SharedFrameworks directory next to the developer dir is missing.
    FrameworksDirMissing { path: PathBuf },

    /// No file named `symbolicatecrash` was found under SharedFrameworks.
    ToolNotFound { search_root: PathBuf },
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectorFailed { command, detail } => {
                write!(f, "'{command}' failed: {detail}")
            }
            Self::EmptyOutput { command } => {
                write!(f, "'{command}' produced no output")
            }
            Self::FrameworksDirMissing { path } => {
                write!(f, "SharedFrameworks dir '{}' not found", path.display())
            }
            Self::ToolNotFound { search_root } => {
                write!(
                    f,
                    "no symbolicatecrash under '{}'",
                    search_root.display()
                )
            }
        }
    }
}

impl std::error::Error for LocateError {}

impl From<LocateError> for SymDropError {
    fn from(e: LocateError) -> Self {
        Self::Locate(e)
    }
}

// ---------------------------------------------------------------------------
// Search errors
// ---------------------------------------------------------------------------

/// Errors related to recursive artifact searches inside dropped bundles.
#[derive(Debug)]
pub enum SearchError {
    /// The expected bundle subdirectory does not exist.
    RootNotFound { path: PathBuf },

    /// The search completed but matched nothing.
    NoMatch { root: PathBuf, pattern: String },

    /// Walkdir traversal error (wraps individual file/dir access failures).
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "search root '{}' does not exist", path.display())
            }
            Self::NoMatch { root, pattern } => {
                write!(f, "no '{pattern}' match under '{}'", root.display())
            }
            Self::Traversal { path, source } => {
                write!(f, "error traversing '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SearchError> for SymDropError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

// ---------------------------------------------------------------------------
// Invoke errors
// ---------------------------------------------------------------------------

/// Errors related to running the symbolication subprocess.
#[derive(Debug)]
pub enum InvokeError {
    /// The subprocess could not be launched at all.
    Launch { program: PathBuf, source: io::Error },

    /// A captured stream was not valid UTF-8.
    OutputDecode { stream: &'static str },

    /// The subprocess exited non-zero. Diagnostic only -- stdout, when
    /// present, is still delivered to the caller.
    NonZeroExit { code: Option<i32> },
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch { program, source } => {
                write!(f, "failed to launch '{}': {source}", program.display())
            }
            Self::OutputDecode { stream } => {
                write!(f, "{stream} was not valid UTF-8")
            }
            Self::NonZeroExit { code } => match code {
                Some(c) => write!(f, "subprocess exited with status {c}"),
                None => write!(f, "subprocess terminated by signal"),
            },
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Launch { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InvokeError> for SymDropError {
    fn from(e: InvokeError) -> Self {
        Self::Invoke(e)
    }
}

// ---------------------------------------------------------------------------
// Save errors
// ---------------------------------------------------------------------------

/// Errors related to writing the symbolicated output file.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error writing the output file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot write '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<SaveError> for SymDropError {
    fn from(e: SaveError) -> Self {
        Self::Save(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for SymDropError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for SymDrop results.
pub type Result<T> = std::result::Result<T, SymDropError>;
