//! Engine configuration
//!
//! Tunable defaults for the analysis engine, loaded from an optional YAML
//! file. Also owns the global verbose flag used for diagnostic output.

use crate::models::AnalysisMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["striplab.yml", "striplab.yaml"];

/// Public handle that stores the loaded configuration, its source path, and warnings.
pub struct EngineConfigHandle {
    pub config: EngineConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl EngineConfigHandle {
    fn with_config(config: EngineConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Complete configuration file structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub defaults: EngineDefaults,
}

impl EngineConfig {
    fn sanitize(mut self) -> Self {
        self.defaults.sanitize();
        self
    }
}

/// Default engine parameter values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineDefaults {
    /// Analysis mode used when the caller does not specify one
    pub mode: AnalysisMode,

    /// Side length of the square background reference patch, in pixels
    pub patch_size: u32,

    /// Per-channel mean at or below which the background patch is judged
    /// true black and normalization is suppressed
    pub black_threshold: f32,

    /// Cap on auto-placed sample points in quantifying modes
    pub max_auto_points: usize,

    /// Number of auto-placed sample points in scientific mode
    pub scientific_points: usize,
}

impl EngineDefaults {
    pub(crate) fn sanitize(&mut self) {
        self.patch_size = self.patch_size.clamp(1, 101);
        self.black_threshold = self.black_threshold.clamp(0.0, 255.0);
        self.max_auto_points = self.max_auto_points.clamp(1, 10);
        self.scientific_points = self.scientific_points.clamp(1, 10);
    }
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Default,
            patch_size: crate::analysis::background::DEFAULT_PATCH_SIZE,
            black_threshold: crate::analysis::background::DEFAULT_BLACK_THRESHOLD,
            max_auto_points: 10,
            scientific_points: 5,
        }
    }
}

/// Load configuration from disk, optionally forcing a specific path.
pub fn load_engine_config(custom_path: Option<&Path>) -> EngineConfigHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<EngineConfig>(&contents) {
                Ok(config) => {
                    let sanitized = config.sanitize();
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return EngineConfigHandle::with_config(sanitized, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse engine config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read engine config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No engine config found; using built-in defaults.".to_string());
    EngineConfigHandle::with_config(EngineConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("STRIPLAB_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("striplab").join(name));
        }
    }

    candidates
}

static ENGINE_CONFIG_HANDLE: OnceLock<EngineConfigHandle> = OnceLock::new();
static PRINT_CONFIG_ONCE: Once = Once::new();

/// Access the global engine configuration (loaded once per process).
pub fn engine_config_handle() -> &'static EngineConfigHandle {
    ENGINE_CONFIG_HANDLE.get_or_init(|| load_engine_config(None))
}

/// Print config source and warnings the first time it is requested (only in verbose mode).
pub fn log_config_usage() {
    PRINT_CONFIG_ONCE.call_once(|| {
        if !is_verbose() {
            return;
        }
        let handle = engine_config_handle();
        if let Some(source) = &handle.source {
            eprintln!("[striplab] Loaded engine config from {}", source.display());
        } else {
            eprintln!("[striplab] Using built-in engine defaults");
        }

        for warning in &handle.warnings {
            eprintln!("[striplab] Config warning: {}", warning);
        }
    });
}
