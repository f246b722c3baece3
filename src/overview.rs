use crate::price::{parse_price, parse_volume, PriceType};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::warn;

/// 마켓 API 응답 그대로의 아이템 개요
///
/// 가격은 통화 형식이 적용된 문자열(예: `"2,25€"`), 거래량은 천 단위 구분자가 포함된 문자열이다.
/// 필드가 없는 것은 해당 가격에 등록된 매물이 없다는 의미이며 에러가 아니다.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOverview {
    #[serde(default)]
    pub success: bool,
    pub lowest_price: Option<String>,
    pub median_price: Option<String>,
    pub volume: Option<String>,
}

impl RawOverview {
    pub fn price(&self, price_type: PriceType) -> Option<&str> {
        match price_type {
            PriceType::Lowest => self.lowest_price.as_deref(),
            PriceType::Median => self.median_price.as_deref(),
        }
    }

    pub fn volume(&self) -> Option<&str> {
        self.volume.as_deref()
    }

    /// 가격과 거래량을 숫자로 변환한다. 변환할 수 없는 값은 `None`이 된다.
    pub fn convert(&self) -> Overview {
        Overview {
            success: self.success,
            lowest_price: self.lowest_price.as_deref().and_then(convert_price),
            median_price: self.median_price.as_deref().and_then(convert_price),
            volume: self.volume.as_deref().and_then(convert_volume),
        }
    }
}

/// 숫자로 변환된 아이템 개요
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub success: bool,
    pub lowest_price: Option<f64>,
    pub median_price: Option<f64>,
    pub volume: Option<u64>,
}

impl Overview {
    pub fn price(&self, price_type: PriceType) -> Option<f64> {
        match price_type {
            PriceType::Lowest => self.lowest_price,
            PriceType::Median => self.median_price,
        }
    }

    /// 선택한 가격 종류만 남긴다.
    pub fn prices(&self, price_types: &[PriceType]) -> Prices {
        let mut prices = Prices::default();
        for price_type in price_types {
            match price_type {
                PriceType::Lowest => prices.lowest_price = self.lowest_price,
                PriceType::Median => prices.median_price = self.median_price,
            }
        }
        prices
    }
}

/// 선택한 가격 종류의 가격
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Prices {
    pub lowest_price: Option<f64>,
    pub median_price: Option<f64>,
}

fn convert_price(value: &str) -> Option<f64> {
    let price = parse_price(value);
    if price.is_none() {
        warn!("Failed to parse price: {}", value);
    }
    price
}

fn convert_volume(value: &str) -> Option<u64> {
    let volume = parse_volume(value);
    if volume.is_none() {
        warn!("Failed to parse volume: {}", value);
    }
    volume
}
