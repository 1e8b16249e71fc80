use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use pchain_sdk::config::{load_config, SdkConfig};
use pchain_sdk::observability::init_logging;
use pchain_sdk::primitives::address::{decode_base64url, encode_base64url};
use pchain_sdk::primitives::PublicAddress;
use pchain_sdk::{Keypair, PChain};

#[derive(Parser)]
#[command(name = "pchain-cli")]
#[command(about = "Query accounts and blocks, and send transactions", long_about = None)]
struct Cli {
    /// Node RPC URL; overrides the config file.
    #[arg(short, long)]
    url: Option<String>,

    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an account's balance
    Balance { address: String },
    /// Show an account's next nonce
    Nonce { address: String },
    /// Show a contract's bytecode (base64url)
    Code { address: String },
    /// Show a block by height or base64url hash
    Block { id: String },
    /// Show the highest committed block
    LatestBlock,
    /// Show a committed transaction with its receipt
    Transaction { hash: String },
    /// Transfer tokens, signing with PCHAIN_PUBLIC_KEY / PCHAIN_PRIVATE_KEY
    Transfer { recipient: String, amount: u64 },
    /// Call a contract method without submitting a transaction
    View {
        target: String,
        method: String,
        /// Borsh-encoded argument as base64url; repeat for more
        #[arg(long = "arg")]
        args: Vec<String>,
    },
    /// Predict the address of a contract deployed at a nonce
    ContractAddress { deployer: String, nonce: i128 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SdkConfig::default(),
    };
    if let Some(url) = cli.url {
        config.rpc.url = url;
    }
    init_logging(&config.observability);

    let chain = PChain::from_config(&config)?;

    match cli.command {
        Commands::Balance { address } => {
            let balance = chain.get_account_balance(&address).await?;
            print_json(&json!({ "address": address, "balance": balance }))?;
        }
        Commands::Nonce { address } => {
            let nonce = chain.get_account_nonce(&address).await?;
            print_json(&json!({ "address": address, "nonce": nonce }))?;
        }
        Commands::Code { address } => {
            let code = chain.get_contract_code(&address).await?;
            print_json(&json!({
                "address": address,
                "code": code.map(|bytes| encode_base64url(&bytes)),
            }))?;
        }
        Commands::Block { id } => {
            let block = match id.parse::<u64>() {
                Ok(height) => chain.get_block(height).await?,
                Err(_) => chain.get_block(id).await?,
            };
            print_json(&block)?;
        }
        Commands::LatestBlock => {
            let block = chain.get_latest_committed_block().await?;
            print_json(&block)?;
        }
        Commands::Transaction { hash } => {
            let result = chain.get_transaction(&hash).await?;
            print_json(&result)?;
        }
        Commands::Transfer { recipient, amount } => {
            let keypair = Keypair::from_env()?;
            let tx_hash = chain.transfer_token(&recipient, amount, &keypair).await?;
            print_json(&json!({ "transaction_hash": tx_hash, "recipient": recipient, "amount": amount }))?;
        }
        Commands::View {
            target,
            method,
            args,
        } => {
            let arguments = args
                .iter()
                .map(|arg| decode_base64url(arg))
                .collect::<Result<Vec<_>, _>>()?;
            let arguments = (!arguments.is_empty()).then_some(arguments);
            let receipt = chain.call_contract_view(&target, &method, arguments).await?;
            print_json(&receipt)?;
        }
        Commands::ContractAddress { deployer, nonce } => {
            let deployer: PublicAddress = deployer.parse()?;
            let address = chain.derive_contract_address(&deployer, nonce)?;
            print_json(&json!({ "deployer": deployer, "nonce": nonce, "contract_address": address }))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
