use std::path::Path;

use topshelf_core::config::{AppConfig, LoadOptions};
use topshelf_dataset::loader;

use crate::commands::{portfolio_analyst, CommandResult};
use crate::render;

pub fn run(sales_path: &Path, customers_path: &Path, json_output: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "channels",
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
                "channels",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let sales = match loader::load_sales_file(sales_path) {
        Ok(sales) => sales,
        Err(error) => {
            return CommandResult::failure("channels", "dataset", error.to_string(), 3);
        }
    };
    let customers = match loader::load_customers_file(customers_path) {
        Ok(customers) => customers,
        Err(error) => {
            return CommandResult::failure("channels", "dataset", error.to_string(), 3);
        }
    };

    let summary = analyst.channel_summary(&sales, &customers);

    if json_output {
        return match serde_json::to_string_pretty(&summary) {
            Ok(output) => CommandResult::report(output),
            Err(error) => {
                CommandResult::failure("channels", "serialization", error.to_string(), 4)
            }
        };
    }

    CommandResult::report(render::channel_summary(&summary))
}
