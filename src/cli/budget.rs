//! Budget CLI commands
//!
//! Headless access to the same service calls the budget view makes.

use clap::Subcommand;

use crate::api::BudgetApi;
use crate::display::{format_budget_details, format_budget_list};
use crate::error::BudgetResult;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// List all budgets, most recent first
    #[command(alias = "ls")]
    List,
    /// Add a budget
    Add {
        /// Amount, sent to the service exactly as given
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Show one budget
    Show {
        /// Budget ID
        id: String,
    },
    /// Change the amount of a budget
    Update {
        /// Budget ID
        id: String,
        /// New amount, sent to the service exactly as given
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Delete a budget
    #[command(alias = "rm")]
    Delete {
        /// Budget ID
        id: String,
    },
}

/// Run a budget command and return what should be printed
pub async fn run_budget_command(api: &dyn BudgetApi, cmd: BudgetCommands) -> BudgetResult<String> {
    match cmd {
        BudgetCommands::List => {
            let records = api.list_budgets().await?;
            Ok(format_budget_list(&records))
        }
        BudgetCommands::Add { amount } => {
            let created = api.create_budget(&amount).await?;
            Ok(match created {
                Some(created) => format!("Added budget {} (id: {})", amount, created.id),
                None => format!("Added budget {}", amount),
            })
        }
        BudgetCommands::Show { id } => {
            let record = api.get_budget(&id).await?;
            Ok(format_budget_details(&record))
        }
        BudgetCommands::Update { id, amount } => {
            api.update_budget(&id, &amount).await?;
            Ok(format!("Updated budget {} to {}", id, amount))
        }
        BudgetCommands::Delete { id } => {
            api.delete_budget(&id).await?;
            Ok(format!("Deleted budget {}", id))
        }
    }
}

/// Handle a budget command, printing its output
pub async fn handle_budget_command(api: &dyn BudgetApi, cmd: BudgetCommands) -> BudgetResult<()> {
    let output = run_budget_command(api, cmd).await?;
    println!("{}", output.trim_end());
    Ok(())
}
