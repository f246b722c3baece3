use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use steam_market::config::log::{set_global_logging_config, set_console_logging};
use steam_market::config::{load_config, load_dotenv};
use steam_market::{sanitize, Market, MarketError, Options};
use thiserror::Error;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "steam-market", version, about = "스팀 커뮤니티 마켓 가격 개요 조회")]
struct Cli {
    /// 설정된 기본 통화 대신 사용할 통화 (코드, ISO 코드 또는 영문 이름)
    #[arg(short, long, global = true)]
    currency: Option<String>,

    /// 가격과 거래량을 숫자로 변환하지 않고 응답 문자열 그대로 출력
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 아이템 하나의 가격 개요
    Overview {
        app_id: u32,
        market_hash_name: String,
    },

    /// 아이템 하나의 가격
    Price {
        app_id: u32,
        market_hash_name: String,

        /// lowest_price, median_price 중 하나 이상
        #[arg(short = 'p', long = "price-type", num_args = 1.., default_value = "lowest_price")]
        price_types: Vec<String>,
    },

    /// 아이템 하나의 거래량
    Volume {
        app_id: u32,
        market_hash_name: String,
    },

    /// `{"앱 아이디": ["아이템 이름", ...]}` 형식의 JSON 파일에 있는 아이템들의 가격 개요
    Batch {
        file: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("설정을 읽을 수 없습니다: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error("파일을 읽을 수 없습니다: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 형식이 올바르지 않습니다: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    load_dotenv();
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let _guard = match config.logger() {
        Some(logger) => match set_global_logging_config(logger) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("{}", CliError::from(e));
                return ExitCode::FAILURE;
            }
        },
        None => {
            set_console_logging(tracing::Level::INFO);
            None
        }
    };

    let result = Market::from_config(&config)
        .map_err(CliError::from)
        .and_then(|market| run(&market, &cli));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(market: &Market, cli: &Cli) -> Result<(), CliError> {
    let mut options = Options::builder();
    if let Some(currency) = cli.currency.as_deref() {
        options = options.currency(currency);
    }
    let options = options.build()?;

    match &cli.command {
        Command::Overview { app_id, market_hash_name } => {
            if cli.raw {
                print_json(&market.get_raw_overview(*app_id, market_hash_name, &options)?)
            } else {
                print_json(&market.get_overview(*app_id, market_hash_name, &options)?)
            }
        }
        Command::Price { app_id, market_hash_name, price_types } => {
            let price_types = sanitize::price_types(price_types.as_slice())?;
            match (price_types.as_slice(), cli.raw) {
                ([price_type], true) => print_json(&market.get_raw_price(*app_id, market_hash_name, *price_type, &options)?),
                ([price_type], false) => print_json(&market.get_price(*app_id, market_hash_name, *price_type, &options)?),
                (_, true) => {
                    let overview = market.get_raw_overview(*app_id, market_hash_name, &options)?;
                    let prices: HashMap<&str, Option<&str>> = price_types.iter()
                        .map(|t| (t.key(), overview.as_ref().and_then(|o| o.price(*t))))
                        .collect();
                    print_json(&prices)
                }
                (_, false) => {
                    let overview = market.get_overview(*app_id, market_hash_name, &options)?;
                    print_json(&overview.map(|o| o.prices(&price_types)))
                }
            }
        }
        Command::Volume { app_id, market_hash_name } => {
            if cli.raw {
                print_json(&market.get_raw_volume(*app_id, market_hash_name, &options)?)
            } else {
                print_json(&market.get_volume(*app_id, market_hash_name, &options)?)
            }
        }
        Command::Batch { file } => {
            let items: HashMap<u32, Vec<String>> = serde_json::from_str(&std::fs::read_to_string(file)?)?;
            info!("Batch price overview. APP_IDS: {}, ITEMS: {}", items.len(), items.values().map(Vec::len).sum::<usize>());

            if cli.raw {
                print_json(&market.get_raw_overviews_from_dict(items, &options)?)
            } else {
                print_json(&market.get_overviews_from_dict(items, &options)?)
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
