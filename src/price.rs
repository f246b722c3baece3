use crate::error::MarketError;
use regex::Regex;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

/// 숫자 부분과 소수점 이하 두 자리를 찾는다.
///
/// 천 단위 구분자가 있는 숫자를 먼저 시도하고, 없으면 구분자 없는 숫자를 사용한다.
static PRICE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:[.,\s']\d{3})+|\d+)(?:([.,])(\d{2}))?").unwrap()
});

/// 가격 종류
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PriceType {
    Lowest,
    Median,
}

impl PriceType {
    pub const ALL: [PriceType; 2] = [PriceType::Lowest, PriceType::Median];

    /// 응답 필드 이름
    pub fn key(&self) -> &'static str {
        match self {
            PriceType::Lowest => "lowest_price",
            PriceType::Median => "median_price",
        }
    }
}

impl TryFrom<&str> for PriceType {
    type Error = MarketError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "lowest_price" => Ok(PriceType::Lowest),
            "median_price" => Ok(PriceType::Median),
            _ => Err(MarketError::InvalidPriceType(value.to_owned())),
        }
    }
}

impl Display for PriceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// 마켓 형식의 가격 문자열을 숫자로 바꾼다.
///
/// `.`과 `,` 중 어느 쪽이 소수점이든 같은 결과를 반환한다. 천 단위 구분자는
/// 한 종류만 사용할 수 있고 소수점과 같은 문자일 수 없다. 숫자를 찾지 못하면 `None`.
///
/// ```
/// use steam_market::price::parse_price;
///
/// assert_eq!(parse_price("2,25€"), Some(2.25));
/// assert_eq!(parse_price("1.234,56"), Some(1234.56));
/// assert_eq!(parse_price("1,234.56"), Some(1234.56));
/// ```
pub fn parse_price(value: &str) -> Option<f64> {
    let captures = PRICE_REGEX.captures(value)?;
    let integer = captures.get(1)?.as_str();

    let mut separators = integer.chars().filter(|c| !c.is_ascii_digit());
    let group_separator = separators.next();
    if let Some(sep) = group_separator {
        if separators.any(|c| c != sep) {
            return None;
        }
    }

    let fraction = match (captures.get(2), captures.get(3)) {
        (Some(sep), Some(digits)) => {
            if group_separator.is_some_and(|g| sep.as_str().starts_with(g)) {
                return None;
            }
            digits.as_str()
        }
        _ => "00",
    };

    let digits: String = integer.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{}.{}", digits, fraction).parse::<f64>().ok()
}

/// 천 단위 구분자를 제거하고 거래량을 정수로 바꾼다.
pub fn parse_volume(value: &str) -> Option<u64> {
    let digits: String = value.chars()
        .filter(|c| !matches!(c, ',' | '.' | ' ' | '\u{a0}' | '\''))
        .collect();
    digits.trim().parse::<u64>().ok()
}
