//! 時計の抽象化
//!
//! 進捗計算は現在時刻を直接読まず、`Clock` 経由で受け取る。
//! 実時計を使うのはアプリケーションの組み立て部分のみ。

use std::sync::{Arc, Mutex};

use chrono::{Duration, Local, NaiveDateTime};

/// 現在時刻（ローカルの壁時計時刻）を提供する
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// システムのローカル時刻
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// 手動で操作する時計
///
/// クローンは同じ時刻を共有する。
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// 時刻を設定
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// 時刻を進める
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// tokioの時刻に追従する時計
///
/// 作成時点を `base` とし、以降はtokioの経過時間を加算する。
/// `tokio::time::pause` 下では仮想時間で進む。
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    base: NaiveDateTime,
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub fn new(base: NaiveDateTime) -> Self {
        Self {
            base,
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = Duration::from_std(self.origin.elapsed()).unwrap_or_else(|_| Duration::zero());
        self.base + elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 13)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_fixed_clock_set_and_advance() {
        let clock = FixedClock::new(at(15, 0, 0));
        assert_eq!(clock.now(), at(15, 0, 0));

        clock.advance(Duration::minutes(27));
        assert_eq!(clock.now(), at(15, 27, 0));

        clock.set(at(9, 0, 0));
        assert_eq!(clock.now(), at(9, 0, 0));
    }

    #[test]
    fn test_fixed_clock_clones_share_time() {
        let clock = FixedClock::new(at(10, 0, 0));
        let other = clock.clone();
        clock.advance(Duration::seconds(30));
        assert_eq!(other.now(), at(10, 0, 30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_follows_virtual_time() {
        let clock = TokioClock::new(at(15, 0, 0));
        assert_eq!(clock.now(), at(15, 0, 0));

        tokio::time::advance(std::time::Duration::from_secs(90)).await;
        assert_eq!(clock.now(), at(15, 1, 30));
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
