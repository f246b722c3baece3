//! 공개 API의 인자들을 요청에 사용할 수 있는 형태로 정규화 한다.
//!
//! | 인자 | 함수 |
//! |------|------|
//! | currency | [`currency`] |
//! | language | [`language`] |
//! | app id | [`app_id`] |
//! | app ids + market hash names | [`app_ids`] |
//! | market hash name | [`market_hash_name`] |
//! | price type | [`price_types`], [`price_selection`] |

use crate::app_id::{AppId, AppIds};
use crate::currency::{Currency, LegacyCurrency};
use crate::error::{MarketError, Result};
use crate::language::Language;
use crate::price::PriceType;

/// 통화로 해석할 수 있는 입력 값
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencyValue {
    Supported(Currency),
    Legacy(LegacyCurrency),
    Code(u32),
    Name(String),
}

impl From<Currency> for CurrencyValue {
    fn from(value: Currency) -> Self {
        CurrencyValue::Supported(value)
    }
}

impl From<LegacyCurrency> for CurrencyValue {
    fn from(value: LegacyCurrency) -> Self {
        CurrencyValue::Legacy(value)
    }
}

impl From<u32> for CurrencyValue {
    fn from(value: u32) -> Self {
        CurrencyValue::Code(value)
    }
}

impl From<&str> for CurrencyValue {
    fn from(value: &str) -> Self {
        CurrencyValue::Name(value.to_owned())
    }
}

impl From<String> for CurrencyValue {
    fn from(value: String) -> Self {
        CurrencyValue::Name(value)
    }
}

/// 언어로 해석할 수 있는 입력 값
#[derive(Debug, Clone, PartialEq)]
pub enum LanguageValue {
    Language(Language),
    Name(String),
}

impl From<Language> for LanguageValue {
    fn from(value: Language) -> Self {
        LanguageValue::Language(value)
    }
}

impl From<&str> for LanguageValue {
    fn from(value: &str) -> Self {
        LanguageValue::Name(value.to_owned())
    }
}

impl From<String> for LanguageValue {
    fn from(value: String) -> Self {
        LanguageValue::Name(value)
    }
}

/// 지원 되는 통화로 정규화 한다.
///
/// 지원이 중단된 통화는 값을 찾았더라도 [`MarketError::LegacyCurrency`]로 거부한다.
pub fn currency(value: impl Into<CurrencyValue>) -> Result<Currency> {
    match value.into() {
        CurrencyValue::Supported(currency) => Ok(currency),
        CurrencyValue::Legacy(legacy) => Err(MarketError::LegacyCurrency(legacy)),
        CurrencyValue::Code(code) => {
            if let Some(legacy) = LegacyCurrency::from_code(code) {
                return Err(MarketError::LegacyCurrency(legacy));
            }
            Currency::from_code(code)
                .ok_or_else(|| MarketError::InvalidCurrency(code.to_string()))
        }
        CurrencyValue::Name(name) => {
            if let Some(legacy) = LegacyCurrency::from_name(&name) {
                return Err(MarketError::LegacyCurrency(legacy));
            }
            Currency::from_name(&name)
                .ok_or(MarketError::InvalidCurrency(name))
        }
    }
}

pub fn language(value: impl Into<LanguageValue>) -> Result<Language> {
    match value.into() {
        LanguageValue::Language(language) => Ok(language),
        LanguageValue::Name(name) => Language::from_name(&name)
            .ok_or(MarketError::InvalidLanguage(name)),
    }
}

pub fn app_id(value: impl Into<AppId>) -> Result<AppId> {
    let app_id = value.into();
    if app_id.value() == 0 {
        return Err(MarketError::InvalidArgument("app id must be a positive integer".to_owned()));
    }
    Ok(app_id)
}

/// 아이템 이름 목록의 길이에 맞춰 앱 아이디 목록을 만든다.
///
/// 하나의 앱 아이디는 모든 아이템에 사용되고, 목록은 길이가 같을 때만 허용된다.
pub fn app_ids(value: impl Into<AppIds>, market_hash_names: usize) -> Result<Vec<AppId>> {
    let ids = match value.into() {
        AppIds::Single(id) => vec![id; market_hash_names],
        AppIds::Many(ids) => {
            if ids.len() != market_hash_names {
                return Err(MarketError::IndexMismatch {
                    app_ids: ids.len(),
                    market_hash_names,
                });
            }
            ids
        }
    };

    ids.into_iter().map(app_id).collect()
}

/// 마켓은 `/`가 포함된 이름을 경로로 취급하기 때문에 `-`로 바꾼다.
pub fn market_hash_name(value: &str) -> String {
    value.replace('/', "-")
}

/// 문자열로 된 가격 종류 선택을 검증한다. 비어 있거나 알 수 없는 값이 있으면 에러.
pub fn price_types<S: AsRef<str>>(values: &[S]) -> Result<Vec<PriceType>> {
    let price_types = values.iter()
        .map(|v| PriceType::try_from(v.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    price_selection(&price_types)?;
    Ok(price_types)
}

/// 가격 종류를 하나 이상 선택했는지 확인한다.
pub fn price_selection(price_types: &[PriceType]) -> Result<()> {
    if price_types.is_empty() {
        return Err(MarketError::InvalidPriceType("()".to_owned()));
    }
    Ok(())
}
