use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use nextribe::cli::admin::NewListingArgs;
use nextribe::core::log::init_logging;
use nextribe::core::opportunity::OpportunityPatch;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List investment opportunities
    Opportunities {
        /// Display currency (USD, EUR, SOL, BTC, ETH)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Simulate returns for an opportunity
    Invest {
        /// Listing id; defaults to the first catalog entry
        #[arg(long)]
        opportunity: Option<String>,
        /// Number of shares to buy
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        shares: u32,
        /// Display currency (USD, EUR, SOL, BTC, ETH)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Show country expansion status
    Countries,
    /// Show a member profile and portfolio
    Profile {
        /// Member id; defaults to user_id from the config
        #[arg(long)]
        user: Option<String>,
        /// Display currency (USD, EUR, SOL, BTC, ETH)
        #[arg(long)]
        currency: Option<String>,
        /// Also show the community leaderboard
        #[arg(long)]
        leaderboard: bool,
    },
    /// Manage listings
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Create a new listing
    Add(AddArgs),
    /// Update fields of an existing listing
    Update(UpdateArgs),
    /// Delete a listing
    Remove {
        /// Listing id
        id: String,
    },
}

#[derive(Args)]
struct AddArgs {
    /// Listing title
    #[arg(long)]
    title: String,
    /// Location within the country
    #[arg(long)]
    location: String,
    /// Country id (alpha-3 code)
    #[arg(long)]
    country: String,
    /// Guest capacity
    #[arg(long)]
    capacity: Option<u32>,
    /// Full asset price in USD
    #[arg(long)]
    price: f64,
    /// Shares the property is divided into (default 12)
    #[arg(long)]
    shares: Option<u32>,
    /// Percentage of shares still available
    #[arg(long)]
    available_shares_pct: Option<f64>,
    /// Expected yearly ROI percentage
    #[arg(long)]
    roi: Option<f64>,
    /// Image URLs
    #[arg(long)]
    image: Vec<String>,
    /// Amenity labels
    #[arg(long)]
    amenity: Vec<String>,
}

#[derive(Args)]
struct UpdateArgs {
    /// Listing id
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Country id (alpha-3 code)
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    capacity: Option<u32>,
    /// Full asset price in USD
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    available_shares_pct: Option<f64>,
    /// Expected yearly ROI percentage
    #[arg(long)]
    roi: Option<f64>,
    /// Replace the image list
    #[arg(long)]
    image: Vec<String>,
    /// Replace the amenity list
    #[arg(long)]
    amenity: Vec<String>,
}

impl From<Commands> for nextribe::AppCommand {
    fn from(cmd: Commands) -> nextribe::AppCommand {
        match cmd {
            Commands::Opportunities { currency } => {
                nextribe::AppCommand::Opportunities { currency }
            }
            Commands::Invest {
                opportunity,
                shares,
                currency,
            } => nextribe::AppCommand::Invest {
                opportunity,
                shares,
                currency,
            },
            Commands::Countries => nextribe::AppCommand::Countries,
            Commands::Profile {
                user,
                currency,
                leaderboard,
            } => nextribe::AppCommand::Profile {
                user,
                currency,
                leaderboard,
            },
            Commands::Admin(AdminCommands::Add(args)) => {
                nextribe::AppCommand::AdminAdd(Box::new(NewListingArgs {
                    title: args.title,
                    location: args.location,
                    country_id: args.country,
                    capacity: args.capacity,
                    total_price: args.price,
                    total_shares: args.shares,
                    available_shares_pct: args.available_shares_pct,
                    expected_roi_pct: args.roi,
                    images: args.image,
                    amenities: args.amenity,
                }))
            }
            Commands::Admin(AdminCommands::Update(args)) => nextribe::AppCommand::AdminUpdate {
                id: args.id,
                patch: Box::new(OpportunityPatch {
                    title: args.title,
                    location: args.location,
                    country_id: args.country,
                    capacity: args.capacity,
                    total_price: args.price,
                    available_shares_pct: args.available_shares_pct,
                    expected_roi_pct: args.roi,
                    images: (!args.image.is_empty()).then_some(args.image),
                    amenities: (!args.amenity.is_empty()).then_some(args.amenity),
                }),
            },
            Commands::Admin(AdminCommands::Remove { id }) => {
                nextribe::AppCommand::AdminRemove { id }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => nextribe::cli::setup::setup(),
        Some(cmd) => nextribe::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
