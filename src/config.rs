pub mod log;

use crate::error::Result;
use crate::market::Market;
use crate::request::rate_limit::{ExponentialBackoff, DEFAULT_BACKOFF_BASE_SECONDS, DEFAULT_MAX_RETRIES};
use serde::Deserialize;
use std::env;
use std::time::Duration;

const ENV_PREFIX: &'static str = "STEAM_MARKET";

#[derive(Debug, Default, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    market: MarketSettings,
    logger: Option<log::Config>,
}

impl MarketConfig {
    pub fn market(&self) -> &MarketSettings {
        &self.market
    }

    pub fn logger(&self) -> Option<&log::Config> {
        self.logger.as_ref()
    }
}

/// 마켓 클라이언트 설정
///
/// 설정 되지 않은 값은 라이브러리 기본값을 사용한다.
#[derive(Debug, Default, Deserialize)]
pub struct MarketSettings {
    endpoint: Option<String>,
    currency: Option<String>,
    language: Option<String>,
    timeout_seconds: Option<u64>,
    max_retries: Option<u32>,
    backoff_base_seconds: Option<u64>,
}

impl MarketSettings {
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff::new(
            self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            Duration::from_secs(self.backoff_base_seconds.unwrap_or(DEFAULT_BACKOFF_BASE_SECONDS)),
        )
    }
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// `config/{RUN_MODE}.json` 파일과 `STEAM_MARKET__` 로 시작하는 환경 변수에서 설정을 읽는다.
///
/// 파일이 없으면 환경 변수와 기본값만 사용한다.
pub fn load_config() -> std::result::Result<MarketConfig, config::ConfigError> {
    let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = config::Config::builder()
        .add_source(config::File::with_name(&format!("config/{}.json", env)).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
        )
        .build()?;

    config.try_deserialize()
}

/// 설정으로 기본 HTTP 클라이언트를 사용하는 [`Market`]을 생성한다.
pub fn create_market(settings: &MarketSettings) -> Result<Market> {
    let mut builder = Market::builder()
        .backoff(settings.backoff());

    if let Some(currency) = settings.currency() {
        builder = builder.currency(currency);
    }
    if let Some(language) = settings.language() {
        builder = builder.language(language);
    }
    if let Some(endpoint) = settings.endpoint() {
        builder = builder.endpoint(endpoint);
    }
    if let Some(timeout) = settings.timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

impl Market {
    /// 이미 로드된 설정으로 생성한다. 환경 변수는 읽지 않는다.
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        create_market(config.market())
    }
}
