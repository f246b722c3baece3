use crate::currency::Currency;
use crate::error::Result;
use crate::request::rate_limit::RateLimitHandler;
use crate::sanitize;
use crate::sanitize::CurrencyValue;

/// 호출 단위로 바꿀 수 있는 조회 옵션
///
/// 설정하지 않은 값은 [`crate::Market`]의 기본값을 사용한다.
#[derive(Default, Clone, Copy)]
pub struct Options<'a> {
    currency: Option<Currency>,
    rate_limit_handler: Option<&'a dyn RateLimitHandler>,
}

impl<'a> Options<'a> {
    pub fn builder() -> OptionsBuilder<'a> {
        OptionsBuilder::new()
    }

    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    pub fn rate_limit_handler(&self) -> Option<&'a dyn RateLimitHandler> {
        self.rate_limit_handler
    }
}

#[derive(Default)]
pub struct OptionsBuilder<'a> {
    currency: Option<CurrencyValue>,
    rate_limit_handler: Option<&'a dyn RateLimitHandler>,
}

impl<'a> OptionsBuilder<'a> {
    pub fn new() -> Self {
        OptionsBuilder::default()
    }

    pub fn currency<C: Into<CurrencyValue>>(mut self, currency: C) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn rate_limit_handler(mut self, handler: &'a dyn RateLimitHandler) -> Self {
        self.rate_limit_handler = Some(handler);
        self
    }

    /// 통화는 이 단계에서 정규화 되며 지원 되지 않는 통화는 에러가 된다.
    pub fn build(self) -> Result<Options<'a>> {
        let currency = self.currency
            .map(sanitize::currency)
            .transpose()?;

        Ok(Options {
            currency,
            rate_limit_handler: self.rate_limit_handler,
        })
    }
}
