// SymDrop - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Uses the `directories` crate for XDG (Linux), AppData
// (Windows), Library (macOS) compliance.
//
// The config file is read-only: SymDrop never writes state back, so two
// runs never interfere through it.

use crate::core::search::MatchStrategy;
use crate::util::constants;
use crate::util::error::ConfigError;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SymDrop configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/Library/Application Support/SymDrop/).
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Path of the optional config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[tools]` section.
    pub tools: ToolsSection,
    /// `[search]` section.
    pub search: SearchSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[tools]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    /// Developer dir override; skips running xcode-select at startup.
    pub developer_dir: Option<String>,
}

/// `[search]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Match ordering: "walk" (filesystem order) or "newest" (mtime).
    pub strategy: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", or "trace".
    pub level: Option<String>,
}

/// Validated application configuration with defaults applied.
#[derive(Debug, Default)]
pub struct AppConfig {
    /// Developer dir override from `[tools] developer_dir`.
    pub developer_dir: Option<PathBuf>,

    /// Search ordering strategy.
    pub search_strategy: MatchStrategy,

    /// Log level from `[logging] level`.
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load and validate config.toml from `path`.
    ///
    /// A missing file is not an error -- defaults apply. Parse failures and
    /// out-of-range values are returned so main can log them; the caller
    /// then proceeds with defaults (configuration is never fatal).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;

        let search_strategy = match raw.search.strategy.as_deref() {
            None => MatchStrategy::default(),
            Some("walk") => MatchStrategy::WalkOrder,
            Some("newest") => MatchStrategy::NewestModified,
            Some(other) => {
                return Err(ConfigError::ValueOutOfRange {
                    field: "search.strategy".to_string(),
                    value: other.to_string(),
                    expected: "\"walk\" or \"newest\"".to_string(),
                });
            }
        };

        if let Some(level) = raw.logging.level.as_deref() {
            const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
            if !LEVELS.contains(&level) {
                return Err(ConfigError::ValueOutOfRange {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    expected: "one of error/warn/info/debug/trace".to_string(),
                });
            }
        }

        Ok(Self {
            developer_dir: raw.tools.developer_dir.map(PathBuf::from),
            search_strategy,
            log_level: raw.logging.level,
        })
    }
}
