use std::path::Path;

use topshelf_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use topshelf_dataset::loader;

use crate::commands::{portfolio_analyst, CommandResult};
use crate::render;

pub fn run(
    sales_path: &Path,
    customers_path: &Path,
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    json_output: bool,
) -> CommandResult {
    let options = LoadOptions {
        config_path: config_path.map(Path::to_path_buf),
        require_file: config_path.is_some(),
        overrides,
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "analyze",
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
                "analyze",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let sales = match loader::load_sales_file(sales_path) {
        Ok(sales) => sales,
        Err(error) => {
            return CommandResult::failure("analyze", "dataset", error.to_string(), 3);
        }
    };
    let customers = match loader::load_customers_file(customers_path) {
        Ok(customers) => customers,
        Err(error) => {
            return CommandResult::failure("analyze", "dataset", error.to_string(), 3);
        }
    };

    let report = analyst.analyze(&sales, &customers);

    if json_output {
        return match serde_json::to_string_pretty(&report) {
            Ok(output) => CommandResult::report(output),
            Err(error) => {
                CommandResult::failure("analyze", "serialization", error.to_string(), 4)
            }
        };
    }

    CommandResult::report(render::portfolio_report(&report))
}
