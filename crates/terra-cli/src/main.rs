//! Terra CLI - query a Terra LCD node from the terminal.

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use serde::Serialize;
use terra_core::{Coins, Dec, ValAddress};
use terra_lcd::LcdClient;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::Overrides;

/// Terra CLI - query oracle state from a Terra LCD node.
#[derive(Parser, Debug)]
#[command(name = "terra")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// LCD base URL (default: https://lcd.terra.dev)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Chain ID (default: columbus-4)
    #[arg(long = "chain-id", global = true)]
    chain_id: Option<String>,

    /// Default gas prices, e.g. 0.015uluna,0.1ukrw
    #[arg(long = "gas-prices", global = true)]
    gas_prices: Option<Coins>,

    /// Default gas adjustment, e.g. 1.4
    #[arg(long = "gas-adjustment", global = true)]
    gas_adjustment: Option<Dec>,

    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange rate votes, filtered by denom and/or validator
    Votes {
        #[arg(long)]
        denom: Option<String>,
        #[arg(long)]
        validator: Option<ValAddress>,
    },
    /// Exchange rate prevotes, filtered by denom and/or validator
    Prevotes {
        #[arg(long)]
        denom: Option<String>,
        #[arg(long)]
        validator: Option<ValAddress>,
    },
    /// All registered exchange rates of LUNA
    ExchangeRates,
    /// Exchange rate of LUNA in one denomination
    ExchangeRate { denom: String },
    /// Denominations active in the oracle
    ActiveDenoms,
    /// Feeder account of a validator
    FeederAddress { validator: ValAddress },
    /// Missed votes of a validator in the current slash window
    Misses { validator: ValAddress },
    /// Aggregate prevote of a validator
    AggregatePrevote { validator: ValAddress },
    /// Aggregate vote of a validator
    AggregateVote { validator: ValAddress },
    /// Oracle module parameters
    Parameters,
    /// Parameters, active denoms and exchange rates in one call
    Summary,
}

#[derive(Serialize)]
struct Summary {
    chain_id: String,
    parameters: terra_core::OracleParams,
    active_denoms: Vec<String>,
    exchange_rates: Coins,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install()?;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("terra=info".parse()?)
        .add_directive("terra_lcd=info".parse()?)
        .add_directive("terra_extension=info".parse()?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let file_config = config::load_config(args.config.as_deref())?;
    let lcd_config = file_config.resolve(Overrides {
        url: args.url,
        chain_id: args.chain_id,
        gas_prices: args.gas_prices,
        gas_adjustment: args.gas_adjustment,
    })?;

    tracing::info!("Using {} ({})", lcd_config.url, lcd_config.chain_id);
    let lcd = LcdClient::new(lcd_config);

    run(&lcd, args.command).await
}

async fn run(lcd: &LcdClient, command: Command) -> Result<()> {
    let oracle = lcd.oracle();

    match command {
        Command::Votes { denom, validator } => {
            print_json(&oracle.votes(denom.as_deref(), validator.as_ref()).await?)
        }
        Command::Prevotes { denom, validator } => {
            print_json(&oracle.prevotes(denom.as_deref(), validator.as_ref()).await?)
        }
        Command::ExchangeRates => print_json(&oracle.exchange_rates().await?),
        Command::ExchangeRate { denom } => match oracle.exchange_rate(&denom).await? {
            Some(rate) => print_json(&rate),
            None => {
                tracing::warn!("No exchange rate registered for {}", denom);
                print_json(&serde_json::Value::Null)
            }
        },
        Command::ActiveDenoms => print_json(&oracle.active_denoms().await?),
        Command::FeederAddress { validator } => {
            print_json(&oracle.feeder_address(&validator).await?)
        }
        Command::Misses { validator } => print_json(&oracle.misses(&validator).await?),
        Command::AggregatePrevote { validator } => {
            print_json(&oracle.aggregate_prevote(&validator).await?)
        }
        Command::AggregateVote { validator } => {
            print_json(&oracle.aggregate_vote(&validator).await?)
        }
        Command::Parameters => print_json(&oracle.parameters().await?),
        Command::Summary => {
            let (parameters, active_denoms, exchange_rates) = futures::try_join!(
                oracle.parameters(),
                oracle.active_denoms(),
                oracle.exchange_rates()
            )?;
            print_json(&Summary {
                chain_id: lcd.config().chain_id.clone(),
                parameters,
                active_denoms,
                exchange_rates,
            })
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
