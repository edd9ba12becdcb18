// Configuration loading and parsing (config/lab.toml).

use crate::formula::{default_weights, validate_weights, FormulaWeights, WeightError};
use crate::scoring::ScoringMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// File name of the lab configuration inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "lab.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("invalid formula weights: {0}")]
    Weights(#[from] WeightError),

    #[error("failed to install default config at {path}: {source}")]
    DefaultsCopy {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub sliders: SliderConfig,
    pub data_paths: DataPaths,
    /// Preset formula with any per-position overrides from the file applied.
    pub weights: FormulaWeights,
}

// ---------------------------------------------------------------------------
// lab.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire lab.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LabFile {
    scoring: ScoringConfig,
    sliders: SliderConfig,
    data_paths: DataPaths,
    #[serde(default)]
    weights: FormulaWeights,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,
    pub leaderboard_size: usize,
}

/// Range and step of the interactive weight sliders.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        SliderConfig {
            min: -2.0,
            max: 2.0,
            step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub draft: String,
    /// Precomputed leaderboard table (optional).
    #[serde(default)]
    pub leaderboards: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse lab.toml text into a validated `Config`. `path` is only used in
/// error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: LabFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Overrides replace the preset vector for that position wholesale
    let mut weights = default_weights();
    for (position, vector) in file.weights.iter() {
        weights.insert(position, vector.clone());
    }

    let config = Config {
        scoring: file.scoring,
        sliders: file.sliders,
        data_paths: file.data_paths,
        weights,
    };

    validate(&config)?;

    Ok(config)
}

/// Load and validate configuration from `config/lab.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Copy `defaults/lab.toml` to `config/lab.toml` when the latter is missing.
///
/// Returns the path written, or `None` when a config file was already in
/// place. An existing `config/lab.toml` is never overwritten.
pub fn install_default_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::FileNotFound { path: source });
    }

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopy {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopy {
        path: target.clone(),
        source: e,
    })?;
    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Installs the default config first when none exists.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(path) = install_default_config(&cwd)? {
        info!("created {} from defaults", path.display());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.scoring.leaderboard_size == 0 {
        return Err(ConfigError::ValidationError {
            field: "scoring.leaderboard_size".into(),
            message: "must be greater than 0".into(),
        });
    }

    let sliders = &config.sliders;
    let slider_fields: &[(&str, f64)] = &[
        ("sliders.min", sliders.min),
        ("sliders.max", sliders.max),
        ("sliders.step", sliders.step),
    ];
    for (name, val) in slider_fields {
        if !val.is_finite() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be finite, got {val}"),
            });
        }
    }
    if sliders.min >= sliders.max {
        return Err(ConfigError::ValidationError {
            field: "sliders.max".into(),
            message: format!(
                "must be greater than sliders.min ({}), got {}",
                sliders.min, sliders.max
            ),
        });
    }
    if sliders.step <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "sliders.step".into(),
            message: format!("must be > 0, got {}", sliders.step),
        });
    }

    if config.data_paths.draft.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.draft".into(),
            message: "must not be empty".into(),
        });
    }

    // Omitted preset metrics are allowed (they score 0) but never silent
    for gap in validate_weights(&config.weights)? {
        warn!(
            "weights.{} omits {:?}; those metrics will contribute 0",
            gap.position, gap.metrics
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{default_weights_for, is_original_formula};
    use crate::player::{MetricKey, Position};
    use std::fs;

    const MINIMAL: &str = r#"
[scoring]
mode = "raw"
leaderboard_size = 10

[sliders]
min = -2.0
max = 2.0
step = 0.05

[data_paths]
draft = "data/DraftData.csv"
"#;

    /// Workspace root, where defaults/ lives.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    fn parse(text: &str) -> Result<Config, ConfigError> {
        parse_config(text, Path::new("test.toml"))
    }

    #[test]
    fn load_valid_config_from_project_defaults() {
        let root = project_root();
        let text = fs::read_to_string(root.join("defaults").join(CONFIG_FILE))
            .expect("defaults/lab.toml should exist");
        let config = parse(&text).expect("defaults should be valid");

        assert_eq!(config.scoring.mode, ScoringMode::Standardized);
        assert_eq!(config.scoring.leaderboard_size, 10);
        assert!((config.sliders.min + 2.0).abs() < f64::EPSILON);
        assert!((config.sliders.max - 2.0).abs() < f64::EPSILON);
        assert!((config.sliders.step - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.data_paths.draft, "data/DraftData.csv");
        assert_eq!(
            config.data_paths.leaderboards.as_deref(),
            Some("data/leaderboards.csv")
        );
        assert!(is_original_formula(&config.weights));
    }

    #[test]
    fn minimal_config_uses_preset_weights() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config.scoring.mode, ScoringMode::Raw);
        assert!(config.data_paths.leaderboards.is_none());
        assert!(is_original_formula(&config.weights));
    }

    #[test]
    fn mode_defaults_to_standardized() {
        let text = MINIMAL.replace("mode = \"raw\"\n", "");
        let config = parse(&text).unwrap();
        assert_eq!(config.scoring.mode, ScoringMode::Standardized);
    }

    #[test]
    fn weight_override_replaces_position() {
        let text = format!("{MINIMAL}\n[weights.F]\npts = 2.5\nblk = 1.0\n");
        let config = parse(&text).unwrap();
        let forward = config.weights.get(Position::Forward).unwrap();
        assert_eq!(forward.len(), 2);
        assert_eq!(forward.get(MetricKey::Pts), Some(2.5));
        // Other positions keep their presets
        assert_eq!(
            config.weights.get(Position::Guard),
            Some(&default_weights_for(Position::Guard))
        );
        assert!(!is_original_formula(&config.weights));
    }

    #[test]
    fn unknown_metric_rejected() {
        let text = format!("{MINIMAL}\n[weights.G]\ndunks = 1.0\n");
        assert!(matches!(parse(&text), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn unknown_position_rejected() {
        let text = format!("{MINIMAL}\n[weights.SF]\npts = 1.0\n");
        assert!(matches!(parse(&text), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn unknown_mode_rejected() {
        let text = MINIMAL.replace("\"raw\"", "\"quadratic\"");
        assert!(matches!(parse(&text), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn non_finite_weight_rejected() {
        let text = format!("{MINIMAL}\n[weights.C]\nblk = nan\n");
        assert!(matches!(parse(&text), Err(ConfigError::Weights(_))));
    }

    #[test]
    fn rejects_zero_leaderboard_size() {
        let text = MINIMAL.replace("leaderboard_size = 10", "leaderboard_size = 0");
        match parse(&text) {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "scoring.leaderboard_size");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_inverted_slider_range() {
        let text = MINIMAL.replace("min = -2.0", "min = 3.0");
        match parse(&text) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "sliders.max"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_step() {
        let text = MINIMAL.replace("step = 0.05", "step = 0.0");
        match parse(&text) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "sliders.step"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_section_is_parse_error() {
        let text = MINIMAL.replace("[sliders]", "[knobs]");
        assert!(matches!(parse(&text), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn missing_config_file_reports_path() {
        let tmp = std::env::temp_dir().join("draftlab_config_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match load_config_from(&tmp) {
            Err(ConfigError::FileNotFound { path }) => {
                assert!(path.ends_with(Path::new("config").join(CONFIG_FILE)));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn install_default_config_copies_once() {
        let tmp = std::env::temp_dir().join("draftlab_config_test_copy");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), MINIMAL).unwrap();

        let installed = install_default_config(&tmp).unwrap();
        assert_eq!(installed, Some(tmp.join("config").join(CONFIG_FILE)));

        // User edits survive a second run
        fs::write(
            tmp.join("config").join(CONFIG_FILE),
            MINIMAL.replace("leaderboard_size = 10", "leaderboard_size = 5"),
        )
        .unwrap();
        assert_eq!(install_default_config(&tmp).unwrap(), None);
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.scoring.leaderboard_size, 5);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn install_default_config_keeps_config_without_defaults() {
        let tmp = std::env::temp_dir().join("draftlab_config_test_no_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), MINIMAL).unwrap();

        assert_eq!(install_default_config(&tmp).unwrap(), None);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn install_default_config_without_defaults_reports_path() {
        let tmp = std::env::temp_dir().join("draftlab_config_test_empty");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match install_default_config(&tmp) {
            Err(ConfigError::FileNotFound { path }) => {
                assert!(path.ends_with(Path::new("defaults").join(CONFIG_FILE)));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
        assert!(!tmp.join("config").exists());

        let _ = fs::remove_dir_all(&tmp);
    }
}
