use reqwest::header::HeaderMap;
use reqwest::Url;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use steam_market::{
    AppId, Currency, ExponentialBackoff, LegacyCurrency, Market, MarketError, Options, PriceType, RawResponse,
    Sleeper, Transport,
};

const ITEM: &str = r#"{"success":true,"lowest_price":"$1,234.56","median_price":"$1,200.00","volume":"1,024"}"#;
const NO_VOLUME: &str = r#"{"success":true,"lowest_price":"2,25€"}"#;
const INVALID: &str = r#"{"success":false}"#;

#[derive(Clone, Default)]
struct ScriptedTransport {
    responses: Rc<RefCell<VecDeque<RawResponse>>>,
    requests: Rc<RefCell<Vec<Url>>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<(u16, &str)>) -> Self {
        let responses = responses.into_iter()
            .map(|(status, body)| RawResponse::new(status, body))
            .collect();

        Self {
            responses: Rc::new(RefCell::new(responses)),
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn requests(&self) -> Vec<Url> {
        self.requests.borrow().clone()
    }

    fn query(&self, index: usize, key: &str) -> Option<String> {
        self.requests()[index].query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &Url, _headers: &HeaderMap) -> steam_market::Result<RawResponse> {
        self.requests.borrow_mut().push(url.clone());
        self.responses.borrow_mut()
            .pop_front()
            .ok_or_else(|| MarketError::RequestFailed(format!("unexpected request: {}", url)))
    }
}

#[derive(Clone, Default)]
struct RecordingSleeper {
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingSleeper {
    fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

fn market(transport: &ScriptedTransport, sleeper: &RecordingSleeper) -> Market<ScriptedTransport, RecordingSleeper> {
    Market::builder()
        .currency(Currency::USD)
        .backoff(ExponentialBackoff::new(5, Duration::from_millis(10)))
        .build_with(transport.clone(), sleeper.clone())
        .unwrap()
}

#[test]
fn test_get_overview_converts_prices_and_volume() {
    let transport = ScriptedTransport::new(vec![(200, ITEM)]);
    let sleeper = RecordingSleeper::default();
    let market = market(&transport, &sleeper);

    let overview = market.get_overview(AppId::CSGO, "AK-47 | Redline (Field-Tested)", &Options::default())
        .unwrap()
        .unwrap();

    assert!(overview.success);
    assert_eq!(overview.lowest_price, Some(1234.56));
    assert_eq!(overview.median_price, Some(1200.0));
    assert_eq!(overview.volume, Some(1024));

    assert_eq!(transport.query(0, "appid").as_deref(), Some("730"));
    assert_eq!(transport.query(0, "market_hash_name").as_deref(), Some("AK-47 | Redline (Field-Tested)"));
    assert_eq!(transport.query(0, "currency").as_deref(), Some("1"));
}

#[test]
fn test_get_raw_overview_keeps_strings() {
    let transport = ScriptedTransport::new(vec![(200, NO_VOLUME)]);
    let market = market(&transport, &RecordingSleeper::default());

    let overview = market.get_raw_overview(440u32, "Mann Co. Supply Crate Key", &Options::default())
        .unwrap()
        .unwrap();

    assert_eq!(overview.price(PriceType::Lowest), Some("2,25€"));
    assert_eq!(overview.price(PriceType::Median), None);
    assert_eq!(overview.volume(), None);
}

#[test]
fn test_raw_price_and_volume_keep_strings() {
    let transport = ScriptedTransport::new(vec![(200, ITEM), (200, ITEM), (200, NO_VOLUME)]);
    let market = market(&transport, &RecordingSleeper::default());
    let options = Options::default();

    assert_eq!(market.get_raw_price(440u32, "Key", PriceType::Median, &options), Ok(Some("$1,200.00".to_owned())));
    assert_eq!(market.get_raw_volume(440u32, "Key", &options), Ok(Some("1,024".to_owned())));
    assert_eq!(market.get_raw_volume(440u32, "Key", &options), Ok(None));
}

#[test]
fn test_default_backoff_sleeps_three_times_before_success() {
    let transport = ScriptedTransport::new(vec![(429, ""), (429, ""), (429, ""), (200, ITEM)]);
    let sleeper = RecordingSleeper::default();
    let market = market(&transport, &sleeper);

    let result = market.get_overviews(730u32, &["Item"], &Options::default()).unwrap();

    assert_eq!(result["Item"].as_ref().and_then(|o| o.volume), Some(1024));
    assert_eq!(transport.requests().len(), 4);

    let sleeps = sleeper.sleeps();
    assert_eq!(sleeps.len(), 3);
    assert!(sleeps[0] < sleeps[1] && sleeps[1] < sleeps[2], "{:?}", sleeps);
    assert!(sleeps[0] >= Duration::from_millis(10) && sleeps[0] < Duration::from_millis(20));
}

#[test]
fn test_single_item_uses_handler_from_options() {
    let transport = ScriptedTransport::new(vec![(429, ""), (200, ITEM)]);
    let sleeper = RecordingSleeper::default();
    let market = market(&transport, &sleeper);

    let handler = |_retries: u32| (true, Duration::from_millis(1));
    let options = Options::builder().rate_limit_handler(&handler).build().unwrap();

    assert_eq!(market.get_lowest_price(440u32, "Key", &options), Ok(Some(1234.56)));
    assert_eq!(sleeper.sleeps(), vec![Duration::from_millis(1)]);
}

#[test]
fn test_single_item_rate_limited_without_handler() {
    let transport = ScriptedTransport::new(vec![(429, "")]);
    let sleeper = RecordingSleeper::default();
    let market = market(&transport, &sleeper);

    let result = market.get_overview(440u32, "Key", &Options::default());

    assert_eq!(result, Err(MarketError::TooManyRequests));
    assert!(sleeper.sleeps().is_empty());
}

#[test]
fn test_batch_stops_when_backoff_is_exhausted() {
    let transport = ScriptedTransport::new(vec![(429, ""), (429, ""), (429, "")]);
    let sleeper = RecordingSleeper::default();
    let market = Market::builder()
        .backoff(ExponentialBackoff::new(2, Duration::from_millis(1)))
        .build_with(transport.clone(), sleeper.clone())
        .unwrap();

    let result = market.get_overviews(440u32, &["Key"], &Options::default());

    assert_eq!(result, Err(MarketError::TooManyRequests));
    assert_eq!(sleeper.sleeps().len(), 2);
}

#[test]
fn test_single_item_invalid_raises() {
    let transport = ScriptedTransport::new(vec![(500, INVALID)]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_overview(730u32, "Not an item", &Options::default());

    assert_eq!(result, Err(MarketError::InvalidItemOrAppId { app_id: 730, market_hash_name: "Not an item".to_owned() }));
}

#[test]
fn test_batch_invalid_item_maps_to_none() {
    let transport = ScriptedTransport::new(vec![(200, ITEM), (500, INVALID), (200, NO_VOLUME)]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_overviews(730u32, &["First", "Broken", "Third"], &Options::default()).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result["First"].as_ref().and_then(|o| o.lowest_price), Some(1234.56));
    assert_eq!(result["Broken"], None);
    assert_eq!(result["Third"].as_ref().and_then(|o| o.lowest_price), Some(2.25));
}

#[test]
fn test_batch_other_status_aborts() {
    let transport = ScriptedTransport::new(vec![(200, ITEM), (503, "")]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_volumes(730u32, &["First", "Second"], &Options::default());

    assert_eq!(result, Err(MarketError::HttpStatus(503)));
}

#[test]
fn test_batch_index_mismatch() {
    let transport = ScriptedTransport::new(vec![]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_overviews(vec![440u32, 730], &["a", "b", "c"], &Options::default());

    assert_eq!(result, Err(MarketError::IndexMismatch { app_ids: 2, market_hash_names: 3 }));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_batch_with_app_id_per_item() {
    let transport = ScriptedTransport::new(vec![(200, ITEM), (200, NO_VOLUME)]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_median_prices(vec![AppId::TF2, AppId::DOTA2], &["Key", "Arcana"], &Options::default())
        .unwrap();

    assert_eq!(result["Key"], Some(1200.0));
    assert_eq!(result["Arcana"], None);
    assert_eq!(transport.query(0, "appid").as_deref(), Some("440"));
    assert_eq!(transport.query(1, "appid").as_deref(), Some("570"));
}

#[test]
fn test_get_volume_without_volume_field() {
    let transport = ScriptedTransport::new(vec![(200, NO_VOLUME)]);
    let market = market(&transport, &RecordingSleeper::default());

    assert_eq!(market.get_volume(440u32, "Key", &Options::default()), Ok(None));
}

#[test]
fn test_currency_override_is_sent() {
    let transport = ScriptedTransport::new(vec![(200, NO_VOLUME)]);
    let market = market(&transport, &RecordingSleeper::default());
    let options = Options::builder().currency("euro").build().unwrap();

    let price = market.get_price(440u32, "Key", PriceType::Lowest, &options).unwrap();

    assert_eq!(price, Some(2.25));
    assert_eq!(transport.query(0, "currency").as_deref(), Some("3"));
    assert_eq!(market.currency(), Currency::USD);
}

#[test]
fn test_slash_in_name_is_replaced() {
    let transport = ScriptedTransport::new(vec![(200, ITEM)]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_overviews(AppId::STEAM, &["753/Sack of Gems"], &Options::default()).unwrap();

    assert!(result.contains_key("753/Sack of Gems"));
    assert_eq!(transport.query(0, "market_hash_name").as_deref(), Some("753-Sack of Gems"));
}

#[test]
fn test_get_prices_selects_requested_fields() {
    let transport = ScriptedTransport::new(vec![(200, ITEM)]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_prices(440u32, &["Key"], &[PriceType::Median], &Options::default()).unwrap();
    let prices = result["Key"].unwrap();

    assert_eq!(prices.lowest_price, None);
    assert_eq!(prices.median_price, Some(1200.0));
}

#[test]
fn test_get_prices_rejects_empty_selector() {
    let transport = ScriptedTransport::new(vec![]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_prices(440u32, &["Key"], &[], &Options::default());

    assert_eq!(result, Err(MarketError::InvalidPriceType("()".to_owned())));
}

#[test]
fn test_from_dict_groups_by_app_id() {
    let transport = ScriptedTransport::new(vec![(200, ITEM), (500, INVALID), (200, NO_VOLUME)]);
    let market = market(&transport, &RecordingSleeper::default());

    let items = vec![
        (440u32, vec!["Key", "Broken"]),
        (730u32, vec!["Case"]),
    ];
    let result = market.get_lowest_prices_from_dict(items, &Options::default()).unwrap();

    let expected: HashMap<String, Option<f64>> = HashMap::from([
        ("Key".to_owned(), Some(1234.56)),
        ("Broken".to_owned(), None),
        ("Case".to_owned(), Some(2.25)),
    ]);
    assert_eq!(result, expected);
    assert_eq!(transport.query(1, "appid").as_deref(), Some("440"));
    assert_eq!(transport.query(2, "appid").as_deref(), Some("730"));
}

#[test]
fn test_raw_overviews_from_dict() {
    let transport = ScriptedTransport::new(vec![(200, ITEM)]);
    let market = market(&transport, &RecordingSleeper::default());

    let items = HashMap::from([(AppId::TF2, vec!["Key".to_owned()])]);
    let result = market.get_raw_overviews_from_dict(items, &Options::default()).unwrap();

    assert_eq!(result["Key"].as_ref().and_then(|o| o.volume()), Some("1,024"));
}

#[test]
fn test_from_dict_rejects_zero_app_id() {
    let transport = ScriptedTransport::new(vec![]);
    let market = market(&transport, &RecordingSleeper::default());

    let result = market.get_volumes_from_dict(vec![(0u32, vec!["Key"])], &Options::default());

    assert!(matches!(result, Err(MarketError::InvalidArgument(_))));
}

#[test]
fn test_builder_rejects_legacy_currency() {
    let result = Market::builder()
        .currency("SEK")
        .build_with(ScriptedTransport::default(), RecordingSleeper::default());

    assert!(matches!(result, Err(MarketError::LegacyCurrency(LegacyCurrency::SEK))));
}

#[test]
fn test_builder_rejects_unknown_language() {
    let result = Market::builder()
        .language("klingon")
        .build_with(ScriptedTransport::default(), RecordingSleeper::default());

    assert!(matches!(result, Err(MarketError::InvalidLanguage(_))));
}
