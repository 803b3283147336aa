pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::admin::NewListingArgs;
use crate::core::config::AppConfig;
use crate::core::currency::CurrencyTable;
use crate::core::opportunity::OpportunityPatch;
use crate::providers::PostgrestClient;
use anyhow::Result;
use tracing::{debug, info};

/// A fully-resolved application command, ready to run against the backend.
pub enum AppCommand {
    Opportunities {
        currency: Option<String>,
    },
    Invest {
        opportunity: Option<String>,
        shares: u32,
        currency: Option<String>,
    },
    Countries,
    Profile {
        user: Option<String>,
        currency: Option<String>,
        leaderboard: bool,
    },
    AdminAdd(Box<NewListingArgs>),
    AdminUpdate {
        id: String,
        patch: Box<OpportunityPatch>,
    },
    AdminRemove {
        id: String,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Nextribe CLI starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let currencies = CurrencyTable::with_overrides(&config.rates)?;
    let client = PostgrestClient::new(&config.backend.base_url, config.backend.api_key.as_deref());

    match command {
        AppCommand::Opportunities { currency } => {
            let currency = currency.as_deref().unwrap_or(&config.currency);
            cli::opportunities::run(&client, &currencies, currency).await
        }
        AppCommand::Invest {
            opportunity,
            shares,
            currency,
        } => {
            let currency = currency.as_deref().unwrap_or(&config.currency);
            cli::invest::run(
                &client,
                &currencies,
                cli::invest::Selection {
                    opportunity_id: opportunity.as_deref(),
                    share_count: shares,
                    currency,
                },
            )
            .await
        }
        AppCommand::Countries => cli::countries::run(&client).await,
        AppCommand::Profile {
            user,
            currency,
            leaderboard,
        } => {
            let currency = currency.as_deref().unwrap_or(&config.currency);
            let user_id = user
                .as_deref()
                .or(config.user_id.as_deref())
                .ok_or_else(|| {
                    anyhow::anyhow!("No user id given; pass --user or set user_id in the config")
                })?;
            cli::profile::run(&client, &currencies, user_id, currency, leaderboard).await
        }
        AppCommand::AdminAdd(args) => cli::admin::add(&client, &client, *args).await,
        AppCommand::AdminUpdate { id, patch } => cli::admin::update(&client, &id, *patch).await,
        AppCommand::AdminRemove { id } => cli::admin::remove(&client, &id).await,
    }
}
