use crate::currency::LegacyCurrency;
use thiserror::Error;

/// 마켓 클라이언트에서 사용할 에러 열거
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketError {
    /// 인식할 수 없는 통화
    #[error("Currency \"{0}\" is considered invalid by the Steam Community Market.")]
    InvalidCurrency(String),

    /// 더 이상 지원 되지 않는 통화
    #[error("Currency \"{}\" is not supported by the Steam Community Market anymore.", .0.iso_code())]
    LegacyCurrency(LegacyCurrency),

    /// 인식할 수 없는 언어
    #[error("Language \"{0}\" is considered invalid by the Steam Community Market.")]
    InvalidLanguage(String),

    /// 마켓이 앱 아이디와 아이템 이름의 조합을 인식하지 못함
    #[error("Item \"{market_hash_name}\" with app ID \"{app_id}\" is considered invalid by the Steam Community Market.")]
    InvalidItemOrAppId {
        app_id: u32,
        market_hash_name: String,
    },

    /// 요청 한도 초과 (HTTP 429)
    #[error("Too many requests have been sent to the Steam Community Market.")]
    TooManyRequests,

    /// 앱 아이디 목록과 아이템 이름 목록의 길이가 다름
    #[error("Number of market hash names ({market_hash_names}) must match number of app IDs ({app_ids}).")]
    IndexMismatch {
        app_ids: usize,
        market_hash_names: usize,
    },

    #[error("Invalid price type: {0}. Valid price types: (lowest_price, median_price)")]
    InvalidPriceType(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid endpoint url")]
    InvalidBaseUrl,

    #[error("Failed to build http client: {0}")]
    ClientBuildFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to read response text: {0}")]
    ResponseTextExtractionFailed(String),

    /// 429, 500 이외의 성공하지 못한 응답
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),
}

pub type Result<T> = std::result::Result<T, MarketError>;
