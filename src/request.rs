pub mod rate_limit;
pub mod transport;

use crate::app_id::AppId;
use crate::currency::Currency;
use crate::error::{MarketError, Result};
use crate::language::Language;
use crate::overview::RawOverview;
use crate::request::rate_limit::{RateLimitHandler, Sleeper};
use crate::request::transport::{RawResponse, Transport};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, REFERER};
use reqwest::Url;
use tracing::{debug, warn};

/// 가격 개요 API 엔드포인트 URL
pub const PRICE_OVERVIEW_ENDPOINT: &'static str = "https://steamcommunity.com/market/priceoverview/";

const MARKET_REFERER: &'static str = "https://steamcommunity.com/market/";

/// 브라우저에서 보낸 요청으로 보이기 위한 헤더
///
/// `Accept-Encoding`과 `User-Agent`는 HTTP 클라이언트가 설정한다.
pub fn market_headers(language: Language) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    if let Ok(value) = HeaderValue::from_str(&language.accept_language()) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(REFERER, HeaderValue::from_static(MARKET_REFERER));
    headers.insert(HeaderName::from_static("sec-fetch-dest"), HeaderValue::from_static("empty"));
    headers.insert(HeaderName::from_static("sec-fetch-mode"), HeaderValue::from_static("cors"));
    headers.insert(HeaderName::from_static("sec-fetch-site"), HeaderValue::from_static("same-origin"));
    headers.insert(HeaderName::from_static("x-requested-with"), HeaderValue::from_static("XMLHttpRequest"));
    headers
}

/// 가격 개요 요청 URL을 만든다. 아이템 이름은 이 단계에서 URL 인코딩 된다.
pub fn build_overview_url(endpoint: &Url, app_id: AppId, market_hash_name: &str, currency: Currency) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("appid", &app_id.to_string())
        .append_pair("market_hash_name", market_hash_name)
        .append_pair("currency", &currency.code().to_string());
    url
}

/// 가격 개요 API를 호출하고 상태 코드를 해석한다.
pub struct Requester<T, S>
where
    T: Transport,
    S: Sleeper,
{
    transport: T,
    sleeper: S,
    endpoint: Url,
    headers: HeaderMap,
}

impl<T, S> Requester<T, S>
where
    T: Transport,
    S: Sleeper,
{
    pub fn new(transport: T, sleeper: S, endpoint: &str, language: Language) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|_| MarketError::InvalidBaseUrl)?;

        Ok(Self {
            transport,
            sleeper,
            endpoint,
            headers: market_headers(language),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// 아이템 하나의 가격 개요를 요청한다.
    ///
    /// * 429 - `handler`가 없으면 즉시 [`MarketError::TooManyRequests`]. 있으면 정책이 거절할 때까지 대기 후 재시도.
    /// * 500 + `success: false` - `raise_exception`이면 [`MarketError::InvalidItemOrAppId`], 아니면 `None`.
    /// * 그 외 2xx 가 아닌 응답 - [`MarketError::HttpStatus`]
    ///
    /// 본문이 JSON이 아니면 데이터가 없는 것으로 보고 `None`을 반환한다.
    pub fn request_overview(
        &self,
        app_id: AppId,
        market_hash_name: &str,
        currency: Currency,
        raise_exception: bool,
        handler: Option<&dyn RateLimitHandler>,
    ) -> Result<Option<RawOverview>> {
        let url = build_overview_url(&self.endpoint, app_id, market_hash_name, currency);
        debug!("Request price overview. APP_ID: {}, ITEM: {}, CURRENCY: {}", app_id, market_hash_name, currency);

        let response = self.send_with_retry(&url, handler)?;
        let data = parse_body(&response);

        match response.status {
            200..=299 => Ok(data),
            500 if data.as_ref().is_some_and(|d| !d.success) => {
                if raise_exception {
                    Err(MarketError::InvalidItemOrAppId {
                        app_id: app_id.value(),
                        market_hash_name: market_hash_name.to_owned(),
                    })
                } else {
                    Ok(None)
                }
            }
            status => Err(MarketError::HttpStatus(status)),
        }
    }

    fn send_with_retry(&self, url: &Url, handler: Option<&dyn RateLimitHandler>) -> Result<RawResponse> {
        let mut retries = 0;
        loop {
            let response = self.transport.get(url, &self.headers)?;
            if response.status != 429 {
                return Ok(response);
            }

            let handler = handler.ok_or(MarketError::TooManyRequests)?;
            let (retry, wait) = handler.on_rate_limit(retries);
            if !retry {
                warn!("Rate limit retries exhausted. RETRIES: {}", retries);
                return Err(MarketError::TooManyRequests);
            }

            warn!("Rate limited, retry after {:?}. RETRIES: {}", wait, retries);
            self.sleeper.sleep(wait);
            retries += 1;
        }
    }
}

fn parse_body(response: &RawResponse) -> Option<RawOverview> {
    serde_json::from_str::<RawOverview>(&response.body)
        .inspect_err(|e| debug!("Response body is not a price overview. STATUS: {}, ERROR: {}", response.status, e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::rate_limit::ThreadSleeper;
    use std::cell::RefCell;
    use std::time::Duration;

    struct Scripted {
        responses: RefCell<Vec<RawResponse>>,
    }

    impl Scripted {
        fn new(responses: Vec<RawResponse>) -> Self {
            Self { responses: RefCell::new(responses) }
        }
    }

    impl Transport for Scripted {
        fn get(&self, _url: &Url, _headers: &HeaderMap) -> Result<RawResponse> {
            Ok(self.responses.borrow_mut().remove(0))
        }
    }

    fn requester(responses: Vec<RawResponse>) -> Requester<Scripted, ThreadSleeper> {
        Requester::new(Scripted::new(responses), ThreadSleeper, PRICE_OVERVIEW_ENDPOINT, Language::English).unwrap()
    }

    #[test]
    fn test_headers_has_required_fields() {
        let headers = market_headers(Language::English);
        for name in ["accept", "accept-language", "connection", "referer", "sec-fetch-dest",
            "sec-fetch-mode", "sec-fetch-site", "x-requested-with"] {
            assert!(headers.contains_key(name), "missing {}", name);
        }
    }

    #[test]
    fn test_build_overview_url_escapes_name() {
        let endpoint = Url::parse(PRICE_OVERVIEW_ENDPOINT).unwrap();
        let url = build_overview_url(&endpoint, AppId::CSGO, "AK-47 | Redline (Field-Tested)", Currency::EUR);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![
            ("appid".to_owned(), "730".to_owned()),
            ("market_hash_name".to_owned(), "AK-47 | Redline (Field-Tested)".to_owned()),
            ("currency".to_owned(), "3".to_owned()),
        ]);
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = Requester::new(Scripted::new(vec![]), ThreadSleeper, "not a url", Language::English);
        assert!(matches!(result, Err(MarketError::InvalidBaseUrl)));
    }

    #[test]
    fn test_rate_limited_without_handler_fails_immediately() {
        let requester = requester(vec![RawResponse::new(429, "")]);
        let result = requester.request_overview(AppId::TF2, "Key", Currency::USD, true, None);
        assert_eq!(result, Err(MarketError::TooManyRequests));
    }

    #[test]
    fn test_rate_limited_handler_declines() {
        let requester = requester(vec![RawResponse::new(429, ""), RawResponse::new(429, "")]);
        let handler = |retries: u32| (retries < 1, Duration::ZERO);
        let result = requester.request_overview(AppId::TF2, "Key", Currency::USD, true, Some(&handler));
        assert_eq!(result, Err(MarketError::TooManyRequests));
    }

    #[test]
    fn test_invalid_item_raises_or_returns_none() {
        let body = r#"{"success":false}"#;
        let raising = requester(vec![RawResponse::new(500, body)]);
        assert_eq!(
            raising.request_overview(AppId::TF2, "Nope", Currency::USD, true, None),
            Err(MarketError::InvalidItemOrAppId { app_id: 440, market_hash_name: "Nope".to_owned() })
        );

        let quiet = requester(vec![RawResponse::new(500, body)]);
        assert_eq!(quiet.request_overview(AppId::TF2, "Nope", Currency::USD, false, None), Ok(None));
    }

    #[test]
    fn test_non_json_body_is_no_data() {
        let requester = requester(vec![RawResponse::new(200, "<html></html>")]);
        assert_eq!(requester.request_overview(AppId::TF2, "Key", Currency::USD, true, None), Ok(None));
    }

    #[test]
    fn test_other_status_is_transport_error() {
        let requester = requester(vec![RawResponse::new(503, "")]);
        assert_eq!(
            requester.request_overview(AppId::TF2, "Key", Currency::USD, true, None),
            Err(MarketError::HttpStatus(503))
        );
    }
}
