use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

/// 마켓에서 지원하는 언어
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Language {
    Arabic,
    Bulgarian,
    ChineseSimplified,
    ChineseTraditional,
    Czech,
    Danish,
    Dutch,
    #[default]
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Japanese,
    Korean,
    Norwegian,
    Polish,
    Portuguese,
    PortugueseBrazil,
    Romanian,
    Russian,
    SpanishSpain,
    SpanishLatinAmerica,
    Swedish,
    Thai,
    Turkish,
    Ukrainian,
    Vietnamese,
}

impl Language {
    pub const ALL: [Language; 29] = [
        Language::Arabic, Language::Bulgarian, Language::ChineseSimplified,
        Language::ChineseTraditional, Language::Czech, Language::Danish, Language::Dutch,
        Language::English, Language::Finnish, Language::French, Language::German,
        Language::Greek, Language::Hungarian, Language::Italian, Language::Japanese,
        Language::Korean, Language::Norwegian, Language::Polish, Language::Portuguese,
        Language::PortugueseBrazil, Language::Romanian, Language::Russian,
        Language::SpanishSpain, Language::SpanishLatinAmerica, Language::Swedish,
        Language::Thai, Language::Turkish, Language::Ukrainian, Language::Vietnamese,
    ];

    /// (변수 이름, 원어 이름, 스팀 API 이름, 언어 코드)
    fn attributes(&self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Language::Arabic => ("ARABIC", "العربية", "arabic", "ar"),
            Language::Bulgarian => ("BULGARIAN", "български език", "bulgarian", "bg"),
            Language::ChineseSimplified => ("CHINESE_SIMPLIFIED", "简体中文", "schinese", "zh-CN"),
            Language::ChineseTraditional => ("CHINESE_TRADITIONAL", "繁體中文", "tchinese", "zh-TW"),
            Language::Czech => ("CZECH", "čeština", "czech", "cs"),
            Language::Danish => ("DANISH", "Dansk", "danish", "da"),
            Language::Dutch => ("DUTCH", "Nederlands", "dutch", "nl"),
            Language::English => ("ENGLISH", "English", "english", "en"),
            Language::Finnish => ("FINNISH", "Suomi", "finnish", "fi"),
            Language::French => ("FRENCH", "Français", "french", "fr"),
            Language::German => ("GERMAN", "Deutsch", "german", "de"),
            Language::Greek => ("GREEK", "Ελληνικά", "greek", "el"),
            Language::Hungarian => ("HUNGARIAN", "Magyar", "hungarian", "hu"),
            Language::Italian => ("ITALIAN", "Italiano", "italian", "it"),
            Language::Japanese => ("JAPANESE", "日本語", "japanese", "ja"),
            Language::Korean => ("KOREAN", "한국어", "koreana", "ko"),
            Language::Norwegian => ("NORWEGIAN", "Norsk", "norwegian", "no"),
            Language::Polish => ("POLISH", "Polski", "polish", "pl"),
            Language::Portuguese => ("PORTUGUESE", "Português", "portuguese", "pt"),
            Language::PortugueseBrazil => ("PORTUGUESE_BRAZIL", "Português-Brasil", "brazilian", "pt-BR"),
            Language::Romanian => ("ROMANIAN", "Română", "romanian", "ro"),
            Language::Russian => ("RUSSIAN", "Русский", "russian", "ru"),
            Language::SpanishSpain => ("SPANISH_SPAIN", "Español-España", "spanish", "es"),
            Language::SpanishLatinAmerica => ("SPANISH_LATIN_AMERICA", "Español-Latinoamérica", "latam", "es-419"),
            Language::Swedish => ("SWEDISH", "Svenska", "swedish", "sv"),
            Language::Thai => ("THAI", "ไทย", "thai", "th"),
            Language::Turkish => ("TURKISH", "Türkçe", "turkish", "tr"),
            Language::Ukrainian => ("UKRAINIAN", "Українська", "ukrainian", "uk"),
            Language::Vietnamese => ("VIETNAMESE", "Tiếng Việt", "vietnamese", "vn"),
        }
    }

    pub fn native_name(&self) -> &'static str {
        self.attributes().1
    }

    /// 스팀 API에서 사용하는 언어 이름 (예: `schinese`, `koreana`)
    pub fn english_name(&self) -> &'static str {
        self.attributes().2
    }

    pub fn code(&self) -> &'static str {
        self.attributes().3
    }

    /// 변수 이름, 원어 이름, 스팀 API 이름, 언어 코드 중 하나로 언어를 찾는다.
    ///
    /// 변수 이름의 `_`는 공백으로 취급하며 대소문자는 구분하지 않는다.
    pub fn from_name(name: &str) -> Option<Self> {
        LANGUAGE_LOOKUP.get(&name.trim().to_uppercase()).copied()
    }

    /// `Accept-Language` 헤더 값
    pub fn accept_language(&self) -> String {
        match self {
            Language::English => "en-US,en;q=0.9".to_owned(),
            _ => format!("{},en;q=0.9", self.code()),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.english_name())
    }
}

static LANGUAGE_LOOKUP: LazyLock<HashMap<String, Language>> = LazyLock::new(|| {
    Language::ALL.iter()
        .flat_map(|language| {
            let (name, native, english, code) = language.attributes();
            [name.replace('_', " "), native.to_owned(), english.to_owned(), code.to_owned()]
                .into_iter()
                .map(move |key| (key.to_uppercase(), *language))
        })
        .collect()
});
