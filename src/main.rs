// SymDrop - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Config loading and toolchain location
// 4. eframe GUI launch

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use symdrop::app;
pub use symdrop::core;
pub use symdrop::platform;
pub use symdrop::ui;
pub use symdrop::util;

use clap::Parser;
use std::path::PathBuf;

/// SymDrop - drag-and-drop crash log symbolication assistant.
///
/// Drop an .xcarchive, .xccrashpoint, .app, .dsym, or .crash file onto the
/// window; SymDrop resolves the related artifacts, runs Xcode's
/// symbolicatecrash helper, and saves the symbolicated log.
#[derive(Parser, Debug)]
#[command(name = "SymDrop", version, about)]
struct Cli {
    /// Artifact files to apply at startup (same set drag-and-drop accepts).
    files: Vec<PathBuf>,

    /// Developer dir override (skips running xcode-select).
    #[arg(long = "developer-dir")]
    developer_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging init so [logging] level can apply, but
    // config failures are only loggable afterwards -- collect, then report.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_error) = match platform::config::AppConfig::load(&platform_paths.config_file()) {
        Ok(config) => (config, None),
        Err(e) => (platform::config::AppConfig::default(), Some(e)),
    };

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "SymDrop starting"
    );

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Config ignored, using defaults");
    }

    // Locate the toolchain once. CLI override > config override > selector.
    let developer_dir_override = cli
        .developer_dir
        .as_deref()
        .or(config.developer_dir.as_deref());
    let locator = core::locate::ToolLocator::locate(developer_dir_override);

    // Create application state; queue CLI files for the first frame so they
    // flow through the same extension filter as drops.
    let mut state = app::state::AppState::new(locator, config.search_strategy);
    state.pending_files = cli.files;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([ui::theme::WINDOW_WIDTH, ui::theme::WINDOW_HEIGHT])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::SymDropApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch SymDrop GUI: {e}");
        std::process::exit(1);
    }
}
