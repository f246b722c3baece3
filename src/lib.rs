//! 스팀 커뮤니티 마켓 가격 개요(`priceoverview`) 조회 클라이언트
//!
//! ```no_run
//! use steam_market::{AppId, Market, Options};
//!
//! let market = Market::new("EUR").unwrap();
//! let overview = market.get_overview(AppId::CSGO, "AK-47 | Redline (Field-Tested)", &Options::default());
//! ```

pub mod app_id;
pub mod config;
pub mod currency;
pub mod error;
pub mod language;
pub mod market;
pub mod overview;
pub mod price;
pub mod request;
pub mod sanitize;

pub use app_id::{AppId, AppIds};
pub use currency::{Currency, LegacyCurrency};
pub use error::{MarketError, Result};
pub use language::Language;
pub use market::{Market, MarketBuilder, Options, OptionsBuilder};
pub use overview::{Overview, Prices, RawOverview};
pub use price::PriceType;
pub use request::rate_limit::{ExponentialBackoff, RateLimitHandler, Sleeper, ThreadSleeper};
pub use request::transport::{HttpTransport, RawResponse, Transport};
