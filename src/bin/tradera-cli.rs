use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use tradera_client::config::load_config;
use tradera_client::observability::logging;
use tradera_client::client::TokenGrant;
use tradera_client::{MarketplaceClient, SearchCriteria, Session};

#[derive(Parser)]
#[command(name = "tradera-cli")]
#[command(about = "Search, bid and fetch tokens against the Tradera SOAP API", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "tradera.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search listings
    Search {
        #[arg(short, long)]
        keywords: Option<String>,
        #[arg(long, default_value_t = 0)]
        category: u64,
        #[arg(long)]
        min_price: Option<u64>,
        #[arg(long)]
        max_price: Option<u64>,
        #[arg(long)]
        item_type: Option<String>,
        #[arg(long, default_value_t = 25)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Place a bid (needs --secret, or --user-id with --token)
    Bid {
        #[arg(long)]
        item_id: u64,
        #[arg(long)]
        amount: u64,
        #[arg(long, conflicts_with_all = ["user_id", "token"])]
        secret: Option<String>,
        #[arg(long, requires = "token")]
        user_id: Option<u64>,
        #[arg(long, requires = "user_id")]
        token: Option<String>,
    },
    /// Exchange a login secret for a user token
    FetchToken {
        #[arg(long)]
        secret: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    logging::init(&config.observability)?;

    let mut client = MarketplaceClient::from_config(&config)?;

    match cli.command {
        Commands::Search {
            keywords,
            category,
            min_price,
            max_price,
            item_type,
            per_page,
            page,
        } => {
            let criteria = SearchCriteria {
                keywords,
                category_id: category,
                price_minimum: min_price,
                price_maximum: max_price,
                item_type,
                items_per_page: per_page,
                page_number: page,
                ..SearchCriteria::default()
            };
            print_json(&client.search(&criteria).await?)?;
        }
        Commands::Bid {
            item_id,
            amount,
            secret,
            user_id,
            token,
        } => {
            if let Some(secret) = secret {
                require_usable(&client.fetch_token(&secret).await?)?;
            } else if let (Some(user_id), Some(token)) = (user_id, token) {
                client.set_session(Session::new(user_id, token));
            }
            print_json(&client.place_bid(item_id, amount).await?)?;
        }
        Commands::FetchToken { secret } => {
            print_json(&client.fetch_token(&secret).await?)?;
        }
    }

    Ok(())
}

/// A bid cannot proceed on a grant without both user id and token.
fn require_usable(grant: &TokenGrant) -> Result<(), Box<dyn std::error::Error>> {
    if grant.success {
        Ok(())
    } else {
        Err("token exchange did not return a usable token".into())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
