use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use topshelf_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "weights.revenue",
        &config.weights.revenue.to_string(),
        field_source(
            "weights.revenue",
            &["TOPSHELF_WEIGHT_REVENUE"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "weights.popularity",
        &config.weights.popularity.to_string(),
        field_source(
            "weights.popularity",
            &["TOPSHELF_WEIGHT_POPULARITY"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "weights.margin",
        &config.weights.margin.to_string(),
        field_source(
            "weights.margin",
            &["TOPSHELF_WEIGHT_MARGIN"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "ranking.principal_channels",
        &config.ranking.principal_channels.to_string(),
        field_source(
            "ranking.principal_channels",
            &["TOPSHELF_RANKING_PRINCIPAL_CHANNELS"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "ranking.top_subcategories",
        &config.ranking.top_subcategories.to_string(),
        field_source(
            "ranking.top_subcategories",
            &["TOPSHELF_RANKING_TOP_SUBCATEGORIES"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "ranking.top_skus",
        &config.ranking.top_skus.to_string(),
        field_source(
            "ranking.top_skus",
            &["TOPSHELF_RANKING_TOP_SKUS"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            &["TOPSHELF_LOGGING_LEVEL", "TOPSHELF_LOG_LEVEL"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source(
            "logging.format",
            &["TOPSHELF_LOGGING_FORMAT", "TOPSHELF_LOG_FORMAT"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("topshelf.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/topshelf.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    for env_key in env_keys {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
