use clap::{Args, Parser, Subcommand};
use estate_core::error::{AppError, CliError};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "estate")]
#[command(about = "Browse property listings, save favorites and estimate mortgages")]
#[command(version)]
#[command(after_help = "Examples:
  estate list --city Austin --bedrooms 3       # First page of matching listings
  estate list --query '?min_price=300000&page=2' --format table
  estate show 12                               # Detail view of listing 12
  estate favorite add 12                       # Save listing 12 for the configured user
  estate calc --price 300000 --down 20 --rate 6 --years 30
  estate query '?city=Austin&page=1' --set bedrooms=3
  estate browse                                # Interactive listing browser

Environment Variables:
  ESTATE_API_URL      Listings API base URL (default http://localhost:5000)
  ESTATE_USER_EMAIL   Identity used for favorites (default user@example.com)
  RUST_LOG            Log filter, e.g. estate_core=debug")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Listings API base URL
    #[arg(long, global = true, env = "ESTATE_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List properties matching filters
    List(ListArgs),
    /// Show one property in detail
    Show {
        /// Property ID
        id: u32,
        /// Output format: cards, html, or json
        #[arg(short, long, default_value = "cards")]
        format: String,
    },
    /// Manage favorite properties
    Favorite {
        /// User identity (defaults to the configured email)
        #[arg(long, env = "ESTATE_USER_EMAIL")]
        email: Option<String>,
        #[command(subcommand)]
        command: FavoriteCommands,
    },
    /// Estimate a monthly mortgage payment
    Calc(CalcArgs),
    /// Normalize and edit a listing query string without contacting the API
    Query(QueryArgs),
    /// Interactive listing browser reading commands from stdin
    Browse {
        /// Starting query string
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommands {
    /// Save a property as favorite
    Add { id: u32 },
    /// Remove a favorite (recorded locally; the API has no delete endpoint)
    Remove { id: u32 },
    /// List favorite properties
    List {
        /// Output format: cards, table, html, or json
        #[arg(short, long, default_value = "cards")]
        format: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Set configuration values
    #[command(after_help = "Examples:
  estate config set --url http://localhost:5000
  estate config set --email buyer@example.com --timeout 10")]
    Set {
        /// Listings API base URL
        #[arg(long)]
        url: Option<String>,
        /// Identity used for favorites
        #[arg(long)]
        email: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Attempts for read requests, first try included
        #[arg(long)]
        max_retries: Option<u32>,
    },
}

/// Filters for `estate list`; flags override values from `--query`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Starting query string, e.g. '?city=Austin&page=2'
    #[arg(long, default_value = "", help_heading = "Filters")]
    pub query: String,

    /// Free-text search
    #[arg(long, short = 's', help_heading = "Filters")]
    pub search: Option<String>,

    #[arg(long, help_heading = "Filters")]
    pub min_price: Option<String>,

    #[arg(long, help_heading = "Filters")]
    pub max_price: Option<String>,

    /// Minimum bedrooms
    #[arg(long, help_heading = "Filters")]
    pub bedrooms: Option<String>,

    /// Minimum bathrooms
    #[arg(long, help_heading = "Filters")]
    pub bathrooms: Option<String>,

    #[arg(long, help_heading = "Filters")]
    pub property_type: Option<String>,

    #[arg(long, help_heading = "Filters")]
    pub city: Option<String>,

    #[arg(long, help_heading = "Filters")]
    pub state: Option<String>,

    #[arg(long, help_heading = "Filters")]
    pub zipcode: Option<String>,

    /// price_asc, price_desc or newest
    #[arg(long, help_heading = "Filters")]
    pub sort: Option<String>,

    /// Page to show (1-based)
    #[arg(long, short = 'p', allow_negative_numbers = true, help_heading = "Paging")]
    pub page: Option<i64>,

    #[arg(long, help_heading = "Paging")]
    pub per_page: Option<String>,

    /// Output format: cards, table, html, or json
    #[arg(short, long, default_value = "cards", help_heading = "Output Options")]
    pub format: String,
}

/// Calculator inputs. Kept as text so that blank or non-numeric input gets
/// the calculator's own message.
#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    /// Home price in dollars
    #[arg(long, default_value = "")]
    pub price: String,

    /// Down payment percent
    #[arg(long, default_value = "20")]
    pub down: String,

    /// Annual interest rate percent
    #[arg(long, default_value = "")]
    pub rate: String,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub years: String,

    /// Take the home price from this listing
    #[arg(long)]
    pub property: Option<u32>,

    /// Output format: cards, html, or json
    #[arg(short, long, default_value = "cards")]
    pub format: String,
}

#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// Query string to start from
    #[arg(default_value = "")]
    pub query: String,

    /// Set a parameter, key=value (repeatable; resets the page)
    #[arg(long, action = clap::ArgAction::Append)]
    pub set: Vec<String>,

    /// Remove a parameter (repeatable; resets the page)
    #[arg(long, action = clap::ArgAction::Append)]
    pub unset: Vec<String>,

    /// Remove every filter
    #[arg(long)]
    pub clear: bool,

    /// Jump to a page
    #[arg(long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Advance one page (bounded by --pages when given)
    #[arg(long)]
    pub next: bool,

    /// Go back one page
    #[arg(long)]
    pub prev: bool,

    /// Known page count, used to clamp the page
    #[arg(long)]
    pub pages: Option<u32>,

    /// Print the API request query instead of the location
    #[arg(long)]
    pub api: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Cards,
    Table,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cards" | "text" => Ok(OutputFormat::Cards),
            "table" => Ok(OutputFormat::Table),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::Cli(CliError::InvalidArguments(format!(
                "Unknown format '{}': use cards, table, html, or json",
                other
            )))),
        }
    }
}
