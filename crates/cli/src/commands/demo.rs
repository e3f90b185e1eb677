use topshelf_core::config::{AppConfig, LoadOptions};
use topshelf_dataset::demo_dataset;

use crate::commands::{portfolio_analyst, CommandResult};
use crate::render;

pub fn run(json_output: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "demo",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    let analyst = match portfolio_analyst(&config) {
        Ok(analyst) => analyst,
        Err(error) => {
            return CommandResult::failure(
                "demo",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let (sales, customers) = demo_dataset();
    let report = analyst.analyze(&sales, &customers);

    if json_output {
        return match serde_json::to_string_pretty(&report) {
            Ok(output) => CommandResult::report(output),
            Err(error) => CommandResult::failure("demo", "serialization", error.to_string(), 4),
        };
    }

    CommandResult::report(render::portfolio_report(&report))
}
