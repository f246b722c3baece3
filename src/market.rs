mod options;

pub use options::{Options, OptionsBuilder};

use crate::app_id::{AppId, AppIds};
use crate::currency::Currency;
use crate::error::Result;
use crate::language::Language;
use crate::overview::{Overview, Prices, RawOverview};
use crate::price::PriceType;
use crate::request::rate_limit::{ExponentialBackoff, RateLimitHandler, Sleeper, ThreadSleeper};
use crate::request::transport::{HttpTransport, Transport, DEFAULT_TIMEOUT_SECONDS};
use crate::request::{Requester, PRICE_OVERVIEW_ENDPOINT};
use crate::sanitize;
use crate::sanitize::{CurrencyValue, LanguageValue};
use std::collections::HashMap;
use std::time::Duration;
use tracing::error;

/// 스팀 커뮤니티 마켓의 가격 개요 조회 클라이언트
///
/// 기본 통화와 언어는 생성 시점에 고정되며 [`Options`]로 호출 단위로만 바꿀 수 있다.
///
/// 아이템 하나를 조회하는 함수는 마켓이 앱 아이디와 아이템 이름의 조합을 인식하지 못하면
/// [`crate::MarketError::InvalidItemOrAppId`]를 반환하고, 여러 아이템을 조회하는 함수는 해당 아이템만
/// `None`으로 기록한 뒤 나머지 조회를 계속한다.
pub struct Market<T = HttpTransport, S = ThreadSleeper>
where
    T: Transport,
    S: Sleeper,
{
    requester: Requester<T, S>,
    currency: Currency,
    language: Option<Language>,
    backoff: ExponentialBackoff,
}

impl Market {
    /// 기본 HTTP 클라이언트와 주어진 통화로 생성한다.
    pub fn new<C: Into<CurrencyValue>>(currency: C) -> Result<Self> {
        Market::builder().currency(currency).build()
    }

    pub fn builder() -> MarketBuilder {
        MarketBuilder::new()
    }
}

impl<T, S> Market<T, S>
where
    T: Transport,
    S: Sleeper,
{
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn get_overview<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, options: &Options) -> Result<Option<Overview>> {
        self.single(app_id, market_hash_name, options)
            .map(|overview| overview.map(|o| o.convert()))
    }

    /// 응답 문자열을 변환하지 않고 그대로 반환한다.
    pub fn get_raw_overview<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, options: &Options) -> Result<Option<RawOverview>> {
        self.single(app_id, market_hash_name, options)
    }

    pub fn get_overviews<I: Into<AppIds>, N: AsRef<str>>(&self, app_ids: I, market_hash_names: &[N], options: &Options) -> Result<HashMap<String, Option<Overview>>> {
        self.batch(app_ids, market_hash_names, options, |o| Some(o.convert()))
    }

    pub fn get_raw_overviews<I: Into<AppIds>, N: AsRef<str>>(&self, app_ids: I, market_hash_names: &[N], options: &Options) -> Result<HashMap<String, Option<RawOverview>>> {
        self.batch(app_ids, market_hash_names, options, Some)
    }

    /// 앱 아이디 별로 묶인 아이템 이름들의 개요를 조회한다.
    pub fn get_overviews_from_dict<D, A, L, N>(&self, items: D, options: &Options) -> Result<HashMap<String, Option<Overview>>>
    where
        D: IntoIterator<Item = (A, L)>,
        A: Into<AppId>,
        L: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        self.batch_from_dict(items, options, |o| Some(o.convert()))
    }

    pub fn get_raw_overviews_from_dict<D, A, L, N>(&self, items: D, options: &Options) -> Result<HashMap<String, Option<RawOverview>>>
    where
        D: IntoIterator<Item = (A, L)>,
        A: Into<AppId>,
        L: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        self.batch_from_dict(items, options, Some)
    }

    pub fn get_price<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, price_type: PriceType, options: &Options) -> Result<Option<f64>> {
        self.single(app_id, market_hash_name, options)
            .map(|overview| overview.and_then(|o| o.convert().price(price_type)))
    }

    /// 통화 형식이 적용된 가격 문자열을 그대로 반환한다.
    pub fn get_raw_price<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, price_type: PriceType, options: &Options) -> Result<Option<String>> {
        self.single(app_id, market_hash_name, options)
            .map(|overview| overview.and_then(|o| o.price(price_type).map(str::to_owned)))
    }

    /// 선택한 가격 종류만 채운 [`Prices`]를 아이템 이름 별로 반환한다.
    pub fn get_prices<I: Into<AppIds>, N: AsRef<str>>(&self, app_ids: I, market_hash_names: &[N], price_types: &[PriceType], options: &Options) -> Result<HashMap<String, Option<Prices>>> {
        sanitize::price_selection(price_types)?;
        self.batch(app_ids, market_hash_names, options, |o| Some(o.convert().prices(price_types)))
    }

    pub fn get_prices_from_dict<D, A, L, N>(&self, items: D, price_types: &[PriceType], options: &Options) -> Result<HashMap<String, Option<Prices>>>
    where
        D: IntoIterator<Item = (A, L)>,
        A: Into<AppId>,
        L: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        sanitize::price_selection(price_types)?;
        self.batch_from_dict(items, options, |o| Some(o.convert().prices(price_types)))
    }

    pub fn get_lowest_price<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, options: &Options) -> Result<Option<f64>> {
        self.get_price(app_id, market_hash_name, PriceType::Lowest, options)
    }

    pub fn get_lowest_prices<I: Into<AppIds>, N: AsRef<str>>(&self, app_ids: I, market_hash_names: &[N], options: &Options) -> Result<HashMap<String, Option<f64>>> {
        self.batch(app_ids, market_hash_names, options, |o| o.convert().lowest_price)
    }

    pub fn get_lowest_prices_from_dict<D, A, L, N>(&self, items: D, options: &Options) -> Result<HashMap<String, Option<f64>>>
    where
        D: IntoIterator<Item = (A, L)>,
        A: Into<AppId>,
        L: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        self.batch_from_dict(items, options, |o| o.convert().lowest_price)
    }

    pub fn get_median_price<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, options: &Options) -> Result<Option<f64>> {
        self.get_price(app_id, market_hash_name, PriceType::Median, options)
    }

    pub fn get_median_prices<I: Into<AppIds>, N: AsRef<str>>(&self, app_ids: I, market_hash_names: &[N], options: &Options) -> Result<HashMap<String, Option<f64>>> {
        self.batch(app_ids, market_hash_names, options, |o| o.convert().median_price)
    }

    pub fn get_median_prices_from_dict<D, A, L, N>(&self, items: D, options: &Options) -> Result<HashMap<String, Option<f64>>>
    where
        D: IntoIterator<Item = (A, L)>,
        A: Into<AppId>,
        L: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        self.batch_from_dict(items, options, |o| o.convert().median_price)
    }

    /// 거래량이 없는 개요는 에러 없이 `None`을 반환한다.
    pub fn get_volume<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, options: &Options) -> Result<Option<u64>> {
        self.single(app_id, market_hash_name, options)
            .map(|overview| overview.and_then(|o| o.convert().volume))
    }

    pub fn get_raw_volume<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, options: &Options) -> Result<Option<String>> {
        self.single(app_id, market_hash_name, options)
            .map(|overview| overview.and_then(|o| o.volume))
    }

    pub fn get_volumes<I: Into<AppIds>, N: AsRef<str>>(&self, app_ids: I, market_hash_names: &[N], options: &Options) -> Result<HashMap<String, Option<u64>>> {
        self.batch(app_ids, market_hash_names, options, |o| o.convert().volume)
    }

    pub fn get_volumes_from_dict<D, A, L, N>(&self, items: D, options: &Options) -> Result<HashMap<String, Option<u64>>>
    where
        D: IntoIterator<Item = (A, L)>,
        A: Into<AppId>,
        L: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        self.batch_from_dict(items, options, |o| o.convert().volume)
    }

    fn single<A: Into<AppId>>(&self, app_id: A, market_hash_name: &str, options: &Options) -> Result<Option<RawOverview>> {
        let app_id = sanitize::app_id(app_id)?;
        self.fetch(app_id, market_hash_name, options, true, options.rate_limit_handler())
    }

    fn batch<I, N, F, R>(&self, app_ids: I, market_hash_names: &[N], options: &Options, project: F) -> Result<HashMap<String, Option<R>>>
    where
        I: Into<AppIds>,
        N: AsRef<str>,
        F: Fn(RawOverview) -> Option<R>,
    {
        let app_ids = sanitize::app_ids(app_ids, market_hash_names.len())?;
        let handler = options.rate_limit_handler().unwrap_or(&self.backoff);

        app_ids.into_iter()
            .zip(market_hash_names)
            .map(|(app_id, name)| {
                let name: &str = name.as_ref();
                let overview = self.fetch(app_id, name, options, false, Some(handler))?;
                Ok((name.to_owned(), overview.and_then(&project)))
            })
            .collect()
    }

    fn batch_from_dict<D, A, L, N, F, R>(&self, items: D, options: &Options, project: F) -> Result<HashMap<String, Option<R>>>
    where
        D: IntoIterator<Item = (A, L)>,
        A: Into<AppId>,
        L: IntoIterator<Item = N>,
        N: AsRef<str>,
        F: Fn(RawOverview) -> Option<R>,
    {
        let handler = options.rate_limit_handler().unwrap_or(&self.backoff);
        let mut result = HashMap::new();

        for (app_id, names) in items {
            let app_id = sanitize::app_id(app_id)?;
            for name in names {
                let name: &str = name.as_ref();
                let overview = self.fetch(app_id, name, options, false, Some(handler))?;
                result.insert(name.to_owned(), overview.and_then(&project));
            }
        }

        Ok(result)
    }

    fn fetch(
        &self,
        app_id: AppId,
        market_hash_name: &str,
        options: &Options,
        raise_exception: bool,
        handler: Option<&dyn RateLimitHandler>,
    ) -> Result<Option<RawOverview>> {
        let currency = options.currency().unwrap_or(self.currency);
        let name = sanitize::market_hash_name(market_hash_name);

        let overview = self.requester.request_overview(app_id, &name, currency, raise_exception, handler)?;
        if overview.is_none() && !raise_exception {
            error!("No price overview. APP_ID: {}, ITEM: {}", app_id, name);
        }
        Ok(overview)
    }
}

/// [`Market`] 생성기
#[derive(Default)]
pub struct MarketBuilder {
    currency: Option<CurrencyValue>,
    language: Option<LanguageValue>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    backoff: Option<ExponentialBackoff>,
}

impl MarketBuilder {
    pub fn new() -> Self {
        MarketBuilder::default()
    }

    pub fn currency<C: Into<CurrencyValue>>(mut self, currency: C) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn language<L: Into<LanguageValue>>(mut self, language: L) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 여러 아이템을 조회할 때 핸들러를 지정하지 않으면 사용되는 정책
    pub fn backoff(mut self, backoff: ExponentialBackoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    pub fn build(self) -> Result<Market> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        let transport = HttpTransport::with_timeout(timeout)?;
        self.build_with(transport, ThreadSleeper)
    }

    /// HTTP 계층과 대기 방식을 직접 지정해 생성한다.
    pub fn build_with<T: Transport, S: Sleeper>(self, transport: T, sleeper: S) -> Result<Market<T, S>> {
        let currency = self.currency
            .map(sanitize::currency)
            .transpose()?
            .unwrap_or_default();
        let language = self.language
            .map(sanitize::language)
            .transpose()?;
        let endpoint = self.endpoint.unwrap_or_else(|| PRICE_OVERVIEW_ENDPOINT.to_owned());

        let requester = Requester::new(transport, sleeper, &endpoint, language.unwrap_or_default())?;

        Ok(Market {
            requester,
            currency,
            language,
            backoff: self.backoff.unwrap_or_default(),
        })
    }
}
