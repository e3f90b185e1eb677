use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranking::ScoreWeights;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub weights: WeightsConfig,
    pub ranking: RankingConfig,
    pub logging: LoggingConfig,
}

/// Composite score weights. Must sum to 1.0; never renormalized.
#[derive(Clone, Debug)]
pub struct WeightsConfig {
    pub revenue: f64,
    pub popularity: f64,
    pub margin: f64,
}

/// How many entries each hierarchy level keeps.
#[derive(Clone, Debug)]
pub struct RankingConfig {
    pub principal_channels: usize,
    pub top_subcategories: usize,
    pub top_skus: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub weight_revenue: Option<f64>,
    pub weight_popularity: Option<f64>,
    pub weight_margin: Option<f64>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weights: WeightsConfig { revenue: 0.4, popularity: 0.3, margin: 0.3 },
            ranking: RankingConfig { principal_channels: 2, top_subcategories: 5, top_skus: 10 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("topshelf.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// Build validated [`ScoreWeights`] from the configured triple.
    pub fn score_weights(&self) -> Result<ScoreWeights, ConfigError> {
        ScoreWeights::new(self.weights.revenue, self.weights.popularity, self.weights.margin)
            .map_err(|err| ConfigError::Validation(err.to_string()))
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(weights) = patch.weights {
            if let Some(revenue) = weights.revenue {
                self.weights.revenue = revenue;
            }
            if let Some(popularity) = weights.popularity {
                self.weights.popularity = popularity;
            }
            if let Some(margin) = weights.margin {
                self.weights.margin = margin;
            }
        }

        if let Some(ranking) = patch.ranking {
            if let Some(principal_channels) = ranking.principal_channels {
                self.ranking.principal_channels = principal_channels;
            }
            if let Some(top_subcategories) = ranking.top_subcategories {
                self.ranking.top_subcategories = top_subcategories;
            }
            if let Some(top_skus) = ranking.top_skus {
                self.ranking.top_skus = top_skus;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("TOPSHELF_WEIGHT_REVENUE") {
            self.weights.revenue = parse_f64("TOPSHELF_WEIGHT_REVENUE", &value)?;
        }
        if let Some(value) = read_env("TOPSHELF_WEIGHT_POPULARITY") {
            self.weights.popularity = parse_f64("TOPSHELF_WEIGHT_POPULARITY", &value)?;
        }
        if let Some(value) = read_env("TOPSHELF_WEIGHT_MARGIN") {
            self.weights.margin = parse_f64("TOPSHELF_WEIGHT_MARGIN", &value)?;
        }

        if let Some(value) = read_env("TOPSHELF_RANKING_PRINCIPAL_CHANNELS") {
            self.ranking.principal_channels =
                parse_usize("TOPSHELF_RANKING_PRINCIPAL_CHANNELS", &value)?;
        }
        if let Some(value) = read_env("TOPSHELF_RANKING_TOP_SUBCATEGORIES") {
            self.ranking.top_subcategories =
                parse_usize("TOPSHELF_RANKING_TOP_SUBCATEGORIES", &value)?;
        }
        if let Some(value) = read_env("TOPSHELF_RANKING_TOP_SKUS") {
            self.ranking.top_skus = parse_usize("TOPSHELF_RANKING_TOP_SKUS", &value)?;
        }

        let log_level =
            read_env("TOPSHELF_LOGGING_LEVEL").or_else(|| read_env("TOPSHELF_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("TOPSHELF_LOGGING_FORMAT").or_else(|| read_env("TOPSHELF_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(weight_revenue) = overrides.weight_revenue {
            self.weights.revenue = weight_revenue;
        }
        if let Some(weight_popularity) = overrides.weight_popularity {
            self.weights.popularity = weight_popularity;
        }
        if let Some(weight_margin) = overrides.weight_margin {
            self.weights.margin = weight_margin;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_weights(&self.weights)?;
        validate_ranking(&self.ranking)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("topshelf.toml"), PathBuf::from("config/topshelf.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_weights(weights: &WeightsConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("weights.revenue", weights.revenue),
        ("weights.popularity", weights.popularity),
        ("weights.margin", weights.margin),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{name} must be a finite non-negative number, got {value}"
            )));
        }
    }

    // Same check ScoreWeights::new applies; weights are never renormalized.
    ScoreWeights::new(weights.revenue, weights.popularity, weights.margin)
        .map(|_| ())
        .map_err(|err| ConfigError::Validation(err.to_string()))
}

fn validate_ranking(ranking: &RankingConfig) -> Result<(), ConfigError> {
    if ranking.principal_channels == 0 {
        return Err(ConfigError::Validation(
            "ranking.principal_channels must be greater than zero".to_string(),
        ));
    }
    if ranking.top_subcategories == 0 {
        return Err(ConfigError::Validation(
            "ranking.top_subcategories must be greater than zero".to_string(),
        ));
    }
    if ranking.top_skus == 0 {
        return Err(ConfigError::Validation(
            "ranking.top_skus must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    weights: Option<WeightsPatch>,
    ranking: Option<RankingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct WeightsPatch {
    revenue: Option<f64>,
    popularity: Option<f64>,
    margin: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RankingPatch {
    principal_channels: Option<usize>,
    top_subcategories: Option<usize>,
    top_skus: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
