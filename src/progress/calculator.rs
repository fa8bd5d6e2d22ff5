//! 進捗計算
//!
//! 開始・終了時刻と評価時点から進捗率と残り時間ラベルを求める純粋関数。

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Clock, ProgressError};
use crate::time_format::{format_remaining, Locale};
use crate::types::{ProgressSample, TimeOfDay};

/// 終了時刻が開始時刻以前の時間帯の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// 完了済み（100%、残り0分）として扱う
    #[default]
    Complete,
    /// `DegenerateWindow` エラーとする
    Reject,
}

/// 進捗計算機
///
/// 表示言語と縮退時間帯の扱い以外の状態は持たない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCalculator {
    locale: Locale,
    degenerate_policy: DegeneratePolicy,
}

impl ProgressCalculator {
    pub fn new(locale: Locale, degenerate_policy: DegeneratePolicy) -> Self {
        Self {
            locale,
            degenerate_policy,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn degenerate_policy(&self) -> DegeneratePolicy {
        self.degenerate_policy
    }

    /// 進捗を計算
    ///
    /// 開始・終了時刻は `now` と同じ日付に紐付ける。
    ///
    /// # 戻り値
    ///
    /// - `Ok(sample)`: 計算結果
    /// - `Err(DegenerateWindow)`: 終了時刻が開始時刻以前で、`Reject` が指定されている
    pub fn compute(
        &self,
        start: TimeOfDay,
        end: TimeOfDay,
        now: NaiveDateTime,
    ) -> Result<ProgressSample, ProgressError> {
        if end <= start && self.degenerate_policy == DegeneratePolicy::Reject {
            return Err(ProgressError::DegenerateWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let date = now.date();
        Ok(self.sample_window(start.on(date), end.on(date), now))
    }

    /// 文字列の時刻から進捗を計算
    ///
    /// 計算前に両方の時刻を検証する。
    pub fn compute_str(
        &self,
        start: &str,
        end: &str,
        now: NaiveDateTime,
    ) -> Result<ProgressSample, ProgressError> {
        let start = TimeOfDay::parse(start)?;
        let end = TimeOfDay::parse(end)?;
        self.compute(start, end, now)
    }

    /// 注入された時計の現在時刻で進捗を計算
    pub fn evaluate(
        &self,
        start: TimeOfDay,
        end: TimeOfDay,
        clock: &dyn Clock,
    ) -> Result<ProgressSample, ProgressError> {
        self.compute(start, end, clock.now())
    }

    fn sample_window(
        &self,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        now: NaiveDateTime,
    ) -> ProgressSample {
        let total_ms = (end_at - start_at).num_milliseconds();

        let (percent_complete, remaining_minutes) = if total_ms <= 0 {
            debug!("Degenerate window {} - {}, treating as complete", start_at, end_at);
            (100, 0)
        } else {
            let elapsed_ms = (now - start_at).num_milliseconds();
            let remaining_ms = (end_at - now).num_milliseconds().max(0);
            (
                percent_complete(elapsed_ms, total_ms),
                (remaining_ms / 60_000) as u32,
            )
        };

        ProgressSample {
            percent_complete,
            remaining_minutes,
            remaining_label: format_remaining(remaining_minutes, self.locale),
        }
    }
}

/// 既定の設定（韓国語、縮退時間帯は完了扱い）で進捗を計算
pub fn compute(start: TimeOfDay, end: TimeOfDay, now: NaiveDateTime) -> ProgressSample {
    let date = now.date();
    ProgressCalculator::default().sample_window(start.on(date), end.on(date), now)
}

/// 経過率を整数パーセントに丸める（0.5は切り上げ）
///
/// 時間帯の内側にある間は1-99に収める。
fn percent_complete(elapsed_ms: i64, total_ms: i64) -> u8 {
    if elapsed_ms <= 0 {
        return 0;
    }
    if elapsed_ms >= total_ms {
        return 100;
    }
    let rounded = (elapsed_ms * 200 + total_ms) / (2 * total_ms);
    rounded.clamp(1, 99) as u8
}
