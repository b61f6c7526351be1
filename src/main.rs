use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_view::api::HttpBudgetApi;
use budget_view::cli::{handle_budget_command, BudgetCommands};
use budget_view::config::{paths::BudgetPaths, settings::Settings};
use budget_view::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "budgets",
    version,
    about = "List and add budgets on a budget service",
    long_about = "budgets is a terminal client for a budget service. Run it without \
                  arguments to open the budget view, or use the subcommands for \
                  one-shot access from scripts."
)]
struct Cli {
    /// Base URL of the budget service
    #[arg(long, global = true, env = "BUDGET_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive budget view (default)
    #[command(alias = "ui")]
    Tui,

    #[command(flatten)]
    Budget(BudgetCommands),

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?.with_api_base_url(cli.api_url);
    init_logging(&paths)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let api = HttpBudgetApi::from_settings(&settings)?;
            budget_view::tui::run_tui(Arc::new(api), &settings).await?;
        }
        Commands::Budget(cmd) => {
            let api = HttpBudgetApi::from_settings(&settings)?;
            handle_budget_command(&api, cmd).await?;
        }
        Commands::Config => {
            println!("budget-view Configuration");
            println!("=========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Log file:         {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:      {}", settings.base_url()?);
            println!("  Request timeout:   {}s", settings.request_timeout().as_secs());
            println!("  Refresh after add: {}", settings.refresh_after_add);
        }
    }

    Ok(())
}
