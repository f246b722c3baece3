use rand::Rng;
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_BACKOFF_BASE_SECONDS: u64 = 60;

/// 대기 시간이 `Duration`의 범위를 넘으면 `Duration::MAX`로 제한된다.
const MAX_EXPONENT: u32 = 63;

/// HTTP 429 응답을 받았을 때 재시도 여부와 대기 시간을 결정한다.
///
/// `retries`는 지금까지 시도한 재시도 횟수로 첫 429 응답에서는 0 이다.
pub trait RateLimitHandler {
    fn on_rate_limit(&self, retries: u32) -> (bool, Duration);
}

impl<F> RateLimitHandler for F
where
    F: Fn(u32) -> (bool, Duration),
{
    fn on_rate_limit(&self, retries: u32) -> (bool, Duration) {
        self(retries)
    }
}

/// 지수 백오프와 무작위 지터를 사용하는 기본 정책
///
/// `(2^retries + uniform(0, 1)) * base` 만큼 기다리며 `retries < max_retries` 인 동안만 재시도 한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    max_retries: u32,
    base: Duration,
}

impl ExponentialBackoff {
    pub fn new(max_retries: u32, base: Duration) -> Self {
        Self { max_retries, base }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn base(&self) -> Duration {
        self.base
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, Duration::from_secs(DEFAULT_BACKOFF_BASE_SECONDS))
    }
}

impl RateLimitHandler for ExponentialBackoff {
    fn on_rate_limit(&self, retries: u32) -> (bool, Duration) {
        if retries >= self.max_retries {
            return (false, Duration::ZERO);
        }

        let jitter: f64 = rand::thread_rng().gen_range(0.0..1.0);
        let factor = 2f64.powi(retries.min(MAX_EXPONENT) as i32) + jitter;
        let wait = Duration::try_from_secs_f64(self.base.as_secs_f64() * factor)
            .unwrap_or(Duration::MAX);
        (true, wait)
    }
}

/// 재시도 전에 호출 스레드를 멈춘다.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
