// Configuration loading and validation (kickoff.toml).

use kickoff_core::power::PowerConfig;
use kickoff_core::schedule::ScheduleConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

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

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Everything read from `config/kickoff.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub power: PowerConfig,
    #[serde(default)]
    pub random: RandomConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `":memory:"`.
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RandomConfig {
    /// Fixed seed for bracket draws and fixture ids. Entropy when absent.
    pub seed: Option<u64>,
}

impl Config {
    /// In-memory database with default tuning. Used by tests.
    pub fn in_memory() -> Self {
        Config {
            database: DatabaseConfig {
                path: ":memory:".into(),
            },
            schedule: ScheduleConfig::default(),
            power: PowerConfig::default(),
            random: RandomConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

const CONFIG_FILE: &str = "kickoff.toml";

/// Load and validate `config/kickoff.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/kickoff.toml` to `config/kickoff.toml` if the latter is
/// missing. Returns the path written, or `None` when a config already exists.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {CONFIG_FILE} in config/ or defaults/ under {}",
                base_dir.display()
            ),
        });
    }

    let copy_error = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    };
    std::fs::create_dir_all(&config_dir).map_err(copy_error)?;
    let content = std::fs::read(&source).map_err(copy_error)?;
    // never overwrite an existing config
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, &content).map_err(copy_error)?;
            Ok(Some(target.clone()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(copy_error(e)),
    }
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message,
    }
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.database.path.trim().is_empty() {
        return Err(invalid("database.path", "must not be empty".into()));
    }

    if config.schedule.round_interval_days <= 0 {
        return Err(invalid(
            "schedule.round_interval_days",
            format!("must be > 0, got {}", config.schedule.round_interval_days),
        ));
    }

    let power = &config.power;
    if power.salary_cap == 0 {
        return Err(invalid("power.salary_cap", "must be > 0".into()));
    }
    if power.ideal_cohesion_months <= 0.0 {
        return Err(invalid(
            "power.ideal_cohesion_months",
            format!("must be > 0, got {}", power.ideal_cohesion_months),
        ));
    }
    if power.ideal_squad_size == 0 {
        return Err(invalid("power.ideal_squad_size", "must be > 0".into()));
    }

    let w = &power.weights;
    let weight_fields: &[(&str, f64)] = &[
        ("power.weights.financial", w.financial),
        ("power.weights.tactical", w.tactical),
        ("power.weights.age_fit", w.age_fit),
        ("power.weights.cohesion", w.cohesion),
        ("power.weights.depth", w.depth),
    ];
    for (name, val) in weight_fields {
        if *val < 0.0 {
            return Err(invalid(name, format!("must be >= 0, got {val}")));
        }
    }
    let sum = w.sum();
    if (sum - 1.0).abs() > 1e-6 {
        return Err(invalid(
            "power.weights",
            format!("must sum to 1.0, got {sum}"),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
