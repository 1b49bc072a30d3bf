//! hlsig - sign (and optionally submit) exchange actions from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hlsig_core::{Cloid, OrderRequest, TimeInForce};
use hlsig_exchange::config::CONFIG_ENV_VAR;
use hlsig_exchange::{AppConfig, Exchange, HttpTransport};
use hlsig_registry::{AssetResolver, InstrumentTable, MetaClient, StaticMetadataSource};
use hlsig_signer::{Address, KeyManager, NonceManager, NonceSource, SigningContext};
use hlsig_telemetry::Metrics;
use tracing::info;

/// Sign exchange actions; print the request body or post it with --submit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via HLSIG_CONFIG env var)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Offline metadata snapshot (JSON), instead of fetching /info
    #[arg(long, global = true)]
    snapshot: Option<String>,

    /// Post the signed request to /exchange
    #[arg(long, global = true)]
    submit: bool,

    /// Print signing metrics (Prometheus text format) to stderr when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the signer address
    Address,
    /// Limit order, or IOC market order with --market (price = reference price)
    Order {
        #[arg(long)]
        coin: String,
        #[arg(long, value_enum)]
        side: Side,
        #[arg(long)]
        size: f64,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "Gtc")]
        tif: TimeInForce,
        #[arg(long)]
        reduce_only: bool,
        #[arg(long)]
        cloid: Option<Cloid>,
        #[arg(long)]
        market: bool,
        /// Market order slippage (default from config)
        #[arg(long)]
        slippage: Option<f64>,
    },
    /// Cancel an order by oid
    Cancel {
        #[arg(long)]
        coin: String,
        #[arg(long)]
        oid: u64,
    },
    /// Cancel all open orders
    CancelAll,
    /// Send USDC to another account
    UsdSend {
        #[arg(long)]
        destination: String,
        #[arg(long)]
        amount: f64,
    },
    /// Withdraw USDC through the bridge
    Withdraw {
        #[arg(long)]
        destination: String,
        #[arg(long)]
        amount: f64,
    },
    /// Approve an agent; generates a new key unless --agent-address is given
    ApproveAgent {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        agent_address: Option<String>,
        /// Where to write a generated agent key
        #[arg(long)]
        key_out: Option<PathBuf>,
    },
}

impl Command {
    fn needs_metadata(&self) -> bool {
        matches!(self, Self::Order { .. } | Self::Cancel { .. })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    Buy,
    Sell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config path: CLI arg > HLSIG_CONFIG env var > default
    let mut config = match args.config.or_else(|| std::env::var(CONFIG_ENV_VAR).ok()) {
        Some(path) => AppConfig::from_file(&path)?,
        None => AppConfig::load()?,
    };
    if args.snapshot.is_some() {
        config.snapshot_path = args.snapshot;
    }

    hlsig_telemetry::init_logging(config.log_format)?;
    info!(network = %config.network, "Starting hlsig v{}", env!("CARGO_PKG_VERSION"));

    let key = KeyManager::load(&config.key, None)?;
    let resolver = load_resolver(&config, args.command.needs_metadata()).await?;
    let exchange = Exchange::from_config(Arc::new(resolver), &config)?;

    let nonce = NonceManager::with_system_clock().next_nonce();
    let ctx = SigningContext::new(&key, nonce, config.network)
        .with_vault(config.vault()?)
        .with_expires_after(config.expires_after(nonce))
        .with_acting_account(config.acting_account()?);

    let request = match args.command {
        Command::Address => {
            println!("{:#x}", key.address());
            return Ok(());
        }
        Command::Order {
            coin,
            side,
            size,
            price,
            tif,
            reduce_only,
            cloid,
            market,
            slippage,
        } => {
            let is_buy = matches!(side, Side::Buy);
            if market {
                exchange.market_open(&coin, is_buy, size, price, slippage, cloid, &ctx)?
            } else {
                let order = OrderRequest::limit(coin, is_buy, size, price, tif)
                    .reduce_only(reduce_only)
                    .with_cloid(cloid);
                exchange.limit_order(&order, &ctx)?
            }
        }
        Command::Cancel { coin, oid } => exchange.cancel(&coin, oid, &ctx)?,
        Command::CancelAll => exchange.cancel_all(&ctx)?,
        Command::UsdSend {
            destination,
            amount,
        } => exchange.usd_send(parse_address(&destination)?, amount, &ctx)?,
        Command::Withdraw {
            destination,
            amount,
        } => exchange.withdraw(parse_address(&destination)?, amount, &ctx)?,
        Command::ApproveAgent {
            name,
            agent_address,
            key_out,
        } => match agent_address {
            Some(agent) => {
                exchange.approve_agent_address(parse_address(&agent)?, name.as_deref(), &ctx)?
            }
            None => {
                let Some(path) = key_out else {
                    bail!("--key-out is required when generating an agent key");
                };
                let approval = exchange.approve_agent(name.as_deref(), &ctx)?;
                std::fs::write(&path, approval.agent.secret_hex().as_bytes())
                    .with_context(|| format!("Failed to write agent key to {}", path.display()))?;
                info!(path = %path.display(), agent = %approval.agent.address(), "Agent key written");
                approval.request
            }
        },
    };

    if args.submit {
        let transport = HttpTransport::new(config.api_url(), config.http_timeout())?;
        let reply = exchange.submit(&transport, &request).await?;
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&request.to_json()?)?);
    }

    if args.metrics {
        eprint!("{}", Metrics::render()?);
    }

    Ok(())
}

async fn load_resolver(config: &AppConfig, needs_metadata: bool) -> Result<AssetResolver> {
    if !needs_metadata {
        return Ok(AssetResolver::new(InstrumentTable::default()));
    }

    let resolver = match &config.snapshot_path {
        Some(path) => {
            let source = StaticMetadataSource::from_file(path)?;
            AssetResolver::load(&source, &config.builder_dexs).await?
        }
        None => {
            let client = MetaClient::new(config.api_url(), config.http_timeout())?;
            AssetResolver::load(&client, &config.builder_dexs).await?
        }
    };
    Ok(resolver)
}

fn parse_address(raw: &str) -> Result<Address> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid address: {raw}"))
}
