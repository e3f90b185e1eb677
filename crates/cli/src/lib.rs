pub mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use topshelf_core::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(
    name = "topshelf",
    about = "Topshelf portfolio ranking CLI",
    long_about = "Rank sales channels, product subcategories, and SKUs by a weighted composite of revenue, customer reach, and margin.",
    after_help = "Examples:\n  topshelf analyze --sales sales.csv --customers customers.csv\n  topshelf analyze --sales sales.csv --customers customers.csv --weight-revenue 0.5 --weight-popularity 0.25 --weight-margin 0.25\n  topshelf channels --sales sales.csv --customers customers.csv --json\n  topshelf demo\n  topshelf config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank top subcategories and SKUs for the principal sales channels")]
    Analyze {
        #[arg(long, help = "Path to the sales extract CSV")]
        sales: PathBuf,
        #[arg(long, help = "Path to the customer master CSV")]
        customers: PathBuf,
        #[arg(long, help = "Explicit config file (bypasses topshelf.toml discovery)")]
        config: Option<PathBuf>,
        #[arg(long, help = "Override the revenue weight (the triple must still sum to 1.0)")]
        weight_revenue: Option<f64>,
        #[arg(long, help = "Override the popularity weight")]
        weight_popularity: Option<f64>,
        #[arg(long, help = "Override the margin weight")]
        weight_margin: Option<f64>,
        #[arg(long, help = "Emit the full report as machine-readable JSON")]
        json: bool,
    },
    #[command(about = "Summarise revenue, customer reach, and margin per channel")]
    Channels {
        #[arg(long, help = "Path to the sales extract CSV")]
        sales: PathBuf,
        #[arg(long, help = "Path to the customer master CSV")]
        customers: PathBuf,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Run the full analysis over the built-in demo dataset")]
    Demo {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Analyze {
            sales,
            customers,
            config,
            weight_revenue,
            weight_popularity,
            weight_margin,
            json,
        } => {
            let overrides = ConfigOverrides {
                weight_revenue,
                weight_popularity,
                weight_margin,
                ..ConfigOverrides::default()
            };
            commands::analyze::run(&sales, &customers, config.as_deref(), overrides, json)
        }
        Command::Channels { sales, customers, json } => {
            commands::channels::run(&sales, &customers, json)
        }
        Command::Demo { json } => commands::demo::run(json),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
