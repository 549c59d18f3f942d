// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info, warn};

use walle_card_gateway::{
    config::{GatewayConfig, API_BASE_URL_ENV, SIGNATURE_ENV},
    error::GatewayError,
    gateway::CardGateway,
    logging::{self, LogFormat},
    models::{CardRegistrationRequest, CardUpdate, GatewayResult},
};

/// Command-line client for the Walle tap2pay card API.
#[derive(Debug, Parser)]
#[command(name = "walle-gateway", version, about)]
struct Cli {
    /// Origin of the card backend.
    #[arg(long, env = "WALLE_API_BASE_URL")]
    base_url: Option<String>,

    /// Wallet signature forwarded with signed calls.
    #[arg(long, env = "WALLE_SIGNATURE", hide_env_values = true)]
    signature: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the wallet's cards.
    List,
    /// Show one card.
    Details { card_id: String },
    /// Page through a card's transactions.
    Transactions {
        card_id: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Analytics for one card, or the overview when no card is given.
    Analytics { card_id: Option<String> },
    /// Delete a card.
    Delete { card_id: String },
    /// Change a card's name, balance or currency.
    Update {
        card_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        balance: Option<f64>,
        #[arg(long)]
        currency: Option<String>,
    },
    /// Register a card.
    Register(RegistrationArgs),
    /// Open an access session for a card.
    Access(RegistrationArgs),
}

#[derive(Debug, Args)]
struct RegistrationArgs {
    #[arg(long)]
    signer_address: String,
    #[arg(long)]
    hash_card: String,
    #[arg(long)]
    hash_pin: String,
    #[arg(long)]
    eth_sign_message: String,
}

impl From<RegistrationArgs> for CardRegistrationRequest {
    fn from(args: RegistrationArgs) -> Self {
        CardRegistrationRequest {
            signer_address: args.signer_address,
            hash_card: args.hash_card,
            hash_pin: args.hash_pin,
            eth_sign_message: args.eth_sign_message,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init(LogFormat::from_env());
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "walle-gateway failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, GatewayError> {
    let base_url = cli.base_url.clone();
    let config = GatewayConfig::from_lookup(|name| {
        if name == API_BASE_URL_ENV {
            base_url.clone()
        } else {
            std::env::var(name).ok()
        }
    })?;
    let gateway = CardGateway::new(config)?;
    info!(base_url = %gateway.base_url(), "Card gateway ready");

    let signature = cli.signature.filter(|s| !s.trim().is_empty());
    let signature = || {
        signature
            .as_deref()
            .ok_or_else(|| GatewayError::MissingConfig(SIGNATURE_ENV.to_string()))
    };

    match cli.command {
        Command::Register(args) => report(gateway.register_card(&args.into()).await),
        Command::Access(args) => report(gateway.access_card(&args.into()).await),
        Command::List => print(&gateway.list_cards(signature()?).await?),
        Command::Details { card_id } => {
            print(&gateway.get_card_details(&card_id, signature()?).await?)
        }
        Command::Transactions {
            card_id,
            page,
            limit,
        } => print(
            &gateway
                .get_card_transactions(&card_id, signature()?, page, limit)
                .await?,
        ),
        Command::Analytics { card_id } => print(
            &gateway
                .get_card_analytics(card_id.as_deref(), signature()?)
                .await?,
        ),
        Command::Delete { card_id } => print(&gateway.delete_card(&card_id, signature()?).await?),
        Command::Update {
            card_id,
            name,
            balance,
            currency,
        } => {
            let updates = CardUpdate {
                name,
                balance,
                currency,
            };
            if updates.is_empty() {
                warn!(card_id = %card_id, "Card update carries no changes");
            }
            print(&gateway.update_card(&card_id, &updates, signature()?).await?)
        }
    }
}

fn report<T: Serialize>(result: GatewayResult<T>) -> Result<ExitCode, GatewayError> {
    let code = if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };
    print(&result)?;
    Ok(code)
}

fn print<T: Serialize>(value: &T) -> Result<ExitCode, GatewayError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| GatewayError::Serialize(e.to_string()))?;
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}
