use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

/// 스팀 커뮤니티 마켓에서 가격 조회에 사용할 수 있는 통화
///
/// 값은 마켓 API의 `currency` 파라미터로 전달 되는 통화 코드와 같다.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Currency {
    #[default]
    USD = 1,
    GBP = 2,
    EUR = 3,
    CHF = 4,
    RUB = 5,
    PLN = 6,
    BRL = 7,
    JPY = 8,
    NOK = 9,
    IDR = 10,
    MYR = 11,
    PHP = 12,
    SGD = 13,
    THB = 14,
    VND = 15,
    KRW = 16,
    TRY = 17,
    UAH = 18,
    MXN = 19,
    CAD = 20,
    AUD = 21,
    NZD = 22,
    CNY = 23,
    INR = 24,
    CLP = 25,
    PEN = 26,
    COP = 27,
    ZAR = 28,
    HKD = 29,
    TWD = 30,
    SAR = 31,
    AED = 32,
    ARS = 34,
    ILS = 35,
    KZT = 37,
    KWD = 38,
    QAR = 39,
    CRC = 40,
    UYU = 41,
}

impl Currency {
    pub const ALL: [Currency; 39] = [
        Currency::USD, Currency::GBP, Currency::EUR, Currency::CHF, Currency::RUB,
        Currency::PLN, Currency::BRL, Currency::JPY, Currency::NOK, Currency::IDR,
        Currency::MYR, Currency::PHP, Currency::SGD, Currency::THB, Currency::VND,
        Currency::KRW, Currency::TRY, Currency::UAH, Currency::MXN, Currency::CAD,
        Currency::AUD, Currency::NZD, Currency::CNY, Currency::INR, Currency::CLP,
        Currency::PEN, Currency::COP, Currency::ZAR, Currency::HKD, Currency::TWD,
        Currency::SAR, Currency::AED, Currency::ARS, Currency::ILS, Currency::KZT,
        Currency::KWD, Currency::QAR, Currency::CRC, Currency::UYU,
    ];

    /// 마켓 API에 전달 되는 통화 코드
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn iso_code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::EUR => "EUR",
            Currency::CHF => "CHF",
            Currency::RUB => "RUB",
            Currency::PLN => "PLN",
            Currency::BRL => "BRL",
            Currency::JPY => "JPY",
            Currency::NOK => "NOK",
            Currency::IDR => "IDR",
            Currency::MYR => "MYR",
            Currency::PHP => "PHP",
            Currency::SGD => "SGD",
            Currency::THB => "THB",
            Currency::VND => "VND",
            Currency::KRW => "KRW",
            Currency::TRY => "TRY",
            Currency::UAH => "UAH",
            Currency::MXN => "MXN",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::NZD => "NZD",
            Currency::CNY => "CNY",
            Currency::INR => "INR",
            Currency::CLP => "CLP",
            Currency::PEN => "PEN",
            Currency::COP => "COP",
            Currency::ZAR => "ZAR",
            Currency::HKD => "HKD",
            Currency::TWD => "TWD",
            Currency::SAR => "SAR",
            Currency::AED => "AED",
            Currency::ARS => "ARS",
            Currency::ILS => "ILS",
            Currency::KZT => "KZT",
            Currency::KWD => "KWD",
            Currency::QAR => "QAR",
            Currency::CRC => "CRC",
            Currency::UYU => "UYU",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            Currency::USD => "United States Dollar",
            Currency::GBP => "Great Britain Pound",
            Currency::EUR => "Euro",
            Currency::CHF => "Swiss Franc",
            Currency::RUB => "Russian Ruble",
            Currency::PLN => "Polish Złoty",
            Currency::BRL => "Brazilian Real",
            Currency::JPY => "Japanese Yen",
            Currency::NOK => "Norwegian Krone",
            Currency::IDR => "Indonesian Rupiah",
            Currency::MYR => "Malaysian Ringgit",
            Currency::PHP => "Philippine Peso",
            Currency::SGD => "Singapore Dollar",
            Currency::THB => "Thai Baht",
            Currency::VND => "Vietnamese Dong",
            Currency::KRW => "South Korean Won",
            Currency::TRY => "Turkish Lira",
            Currency::UAH => "Ukrainian Hryvnia",
            Currency::MXN => "Mexican Peso",
            Currency::CAD => "Canadian Dollar",
            Currency::AUD => "Australian Dollar",
            Currency::NZD => "New Zealand Dollar",
            Currency::CNY => "Chinese Yuan",
            Currency::INR => "Indian Rupee",
            Currency::CLP => "Chilean Peso",
            Currency::PEN => "Peruvian Sol",
            Currency::COP => "Colombian Peso",
            Currency::ZAR => "South African Rand",
            Currency::HKD => "Hong Kong Dollar",
            Currency::TWD => "New Taiwan Dollar",
            Currency::SAR => "Saudi Riyal",
            Currency::AED => "United Arab Emirates Dirham",
            Currency::ARS => "Argentine Peso",
            Currency::ILS => "Israeli New Sheqel",
            Currency::KZT => "Kazakhstani Tenge",
            Currency::KWD => "Kuwaiti Dinar",
            Currency::QAR => "Qatari Rial",
            Currency::CRC => "Costa Rican Colón",
            Currency::UYU => "Uruguayan Peso",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Currency::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// ISO 코드 혹은 영문 이름으로 통화를 찾는다. 대소문자는 구분하지 않는다.
    pub fn from_name(name: &str) -> Option<Self> {
        CURRENCY_LOOKUP.get(&name.trim().to_uppercase()).copied()
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso_code())
    }
}

/// 과거에는 지원 되었으나 현재 마켓에서 더 이상 지원 되지 않는 통화
///
/// 요청에 사용할 수 없으며 정규화 단계에서 [`crate::MarketError::LegacyCurrency`]로 거부 된다.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum LegacyCurrency {
    SEK = 33,
    BYN = 36,
    BGN = 42,
    HRK = 43,
    CZK = 44,
    DKK = 45,
    HUF = 46,
    RON = 47,
}

impl LegacyCurrency {
    pub const ALL: [LegacyCurrency; 8] = [
        LegacyCurrency::SEK, LegacyCurrency::BYN, LegacyCurrency::BGN, LegacyCurrency::HRK,
        LegacyCurrency::CZK, LegacyCurrency::DKK, LegacyCurrency::HUF, LegacyCurrency::RON,
    ];

    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn iso_code(&self) -> &'static str {
        match self {
            LegacyCurrency::SEK => "SEK",
            LegacyCurrency::BYN => "BYN",
            LegacyCurrency::BGN => "BGN",
            LegacyCurrency::HRK => "HRK",
            LegacyCurrency::CZK => "CZK",
            LegacyCurrency::DKK => "DKK",
            LegacyCurrency::HUF => "HUF",
            LegacyCurrency::RON => "RON",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            LegacyCurrency::SEK => "Swedish Krona",
            LegacyCurrency::BYN => "Belarusian Ruble",
            LegacyCurrency::BGN => "Bulgarian Lev",
            LegacyCurrency::HRK => "Croatian Kuna",
            LegacyCurrency::CZK => "Czech Koruna",
            LegacyCurrency::DKK => "Danish Krone",
            LegacyCurrency::HUF => "Hungarian Forint",
            LegacyCurrency::RON => "Romanian Leu",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        LegacyCurrency::ALL.iter().copied().find(|c| c.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        LEGACY_LOOKUP.get(&name.trim().to_uppercase()).copied()
    }
}

impl Display for LegacyCurrency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso_code())
    }
}

static CURRENCY_LOOKUP: LazyLock<HashMap<String, Currency>> = LazyLock::new(|| {
    Currency::ALL.iter()
        .flat_map(|c| [(c.iso_code().to_uppercase(), *c), (c.english_name().to_uppercase(), *c)])
        .collect()
});

static LEGACY_LOOKUP: LazyLock<HashMap<String, LegacyCurrency>> = LazyLock::new(|| {
    LegacyCurrency::ALL.iter()
        .flat_map(|c| [(c.iso_code().to_uppercase(), *c), (c.english_name().to_uppercase(), *c)])
        .collect()
});
