use std::process::ExitCode;

use topshelf_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use topshelf_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // Reports go to stdout; diagnostics stay on stderr so `--json` output
    // remains pipeable.
    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_max_level(log_level)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_max_level(log_level)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_max_level(log_level)
                .json()
                .init();
        }
    }
}

fn main() -> ExitCode {
    // Commands load config themselves and report failures as structured
    // payloads; a failed load here only leaves logging uninitialized.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    topshelf_cli::run()
}
