use crate::error::{MarketError, Result};
use reqwest::header::HeaderMap;
use reqwest::{blocking, Url};
use std::time::Duration;

const AGENT: &'static str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// API 요청의 기본 타임아웃 시간(초)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 상태 코드와 본문만 남긴 HTTP 응답
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self { status, body: body.into() }
    }
}

/// GET 요청을 보내는 HTTP 계층
///
/// 상태 코드 해석은 호출하는 쪽의 몫이며, 구현체는 연결 실패 같은 전송 에러만 반환한다.
pub trait Transport {
    fn get(&self, url: &Url, headers: &HeaderMap) -> Result<RawResponse>;
}

/// reqwest blocking 클라이언트를 사용하는 기본 구현
pub struct HttpTransport {
    client: blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = blocking::Client::builder()
            .timeout(timeout)
            .user_agent(AGENT)
            .build()
            .map_err(|e| MarketError::ClientBuildFailed(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url, headers: &HeaderMap) -> Result<RawResponse> {
        let response = self.client.get(url.clone())
            .headers(headers.clone())
            .send()
            .map_err(|e| MarketError::RequestFailed(format!("URL: {}, ERROR: {:?}", url, e)))?;

        let status = response.status().as_u16();
        let body = response.text()
            .map_err(|e| MarketError::ResponseTextExtractionFailed(format!("URL: {}, ERROR: {:?}", url, e)))?;

        Ok(RawResponse { status, body })
    }
}
