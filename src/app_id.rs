use std::fmt;
use std::fmt::{Display, Formatter};

/// 아이템이 속한 게임(앱)의 아이디
///
/// 자주 쓰이는 앱은 상수로 제공하지만 0 이 아닌 모든 값이 유효한 앱 아이디다.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct AppId(pub u32);

impl AppId {
    pub const TF2: AppId = AppId(440);
    pub const DOTA2: AppId = AppId(570);
    pub const CSGO: AppId = AppId(730);
    pub const STEAM: AppId = AppId(753);
    pub const DS: AppId = AppId(219740);
    pub const KF2: AppId = AppId(232090);
    pub const STEAMVR: AppId = AppId(250820);
    pub const RUST: AppId = AppId(252490);
    pub const UNTURNED: AppId = AppId(304930);
    pub const DST: AppId = AppId(322330);
    pub const PUBG: AppId = AppId(578080);

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for AppId {
    fn from(value: u32) -> Self {
        AppId(value)
    }
}

impl From<&u32> for AppId {
    fn from(value: &u32) -> Self {
        AppId(*value)
    }
}

impl From<&AppId> for AppId {
    fn from(value: &AppId) -> Self {
        *value
    }
}

impl Display for AppId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 여러 아이템을 조회할 때 사용하는 앱 아이디
///
/// 하나만 주어지면 모든 아이템에 같은 앱 아이디를 사용하고,
/// 목록이 주어지면 아이템 이름 목록과 길이가 같아야 한다.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AppIds {
    Single(AppId),
    Many(Vec<AppId>),
}

impl From<AppId> for AppIds {
    fn from(value: AppId) -> Self {
        AppIds::Single(value)
    }
}

impl From<u32> for AppIds {
    fn from(value: u32) -> Self {
        AppIds::Single(AppId(value))
    }
}

impl From<Vec<AppId>> for AppIds {
    fn from(value: Vec<AppId>) -> Self {
        AppIds::Many(value)
    }
}

impl From<Vec<u32>> for AppIds {
    fn from(value: Vec<u32>) -> Self {
        AppIds::Many(value.into_iter().map(AppId).collect())
    }
}

impl From<&[u32]> for AppIds {
    fn from(value: &[u32]) -> Self {
        AppIds::Many(value.iter().map(AppId::from).collect())
    }
}

impl From<&[AppId]> for AppIds {
    fn from(value: &[AppId]) -> Self {
        AppIds::Many(value.to_vec())
    }
}
