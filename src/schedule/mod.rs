//! スケジュール選択
//!
//! 指定時刻に進行中のスケジュールと、これから始まるスケジュールを抽出する。

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::debug;

use crate::progress::ProgressCalculator;
use crate::types::{ProgressSample, Schedule};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("일정 파일을 읽을 수 없습니다: {0}")]
    Io(#[from] std::io::Error),
    #[error("일정 파일 형식이 올바르지 않습니다: {0}")]
    Parse(#[from] serde_json::Error),
}

/// JSON配列のスケジュールファイルを読み込む
pub fn load_schedules(path: &Path) -> Result<Vec<Schedule>, ScheduleError> {
    let content = fs::read_to_string(path)?;
    let schedules: Vec<Schedule> = serde_json::from_str(&content)?;
    debug!("Loaded {} schedules from {:?}", schedules.len(), path);
    Ok(schedules)
}

/// 進行中のスケジュールと進捗
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSchedule<'a> {
    pub schedule: &'a Schedule,
    pub progress: ProgressSample,
}

/// 指定時刻に進行中のスケジュール（開始 <= now < 終了）
///
/// 開始時刻の早い順。時間帯を持たない、または別の日付のスケジュールは除外する。
pub fn active_at<'a>(
    schedules: &'a [Schedule],
    now: NaiveDateTime,
    calculator: &ProgressCalculator,
) -> Vec<ActiveSchedule<'a>> {
    let time = now.time();
    let mut active: Vec<ActiveSchedule<'a>> = schedules
        .iter()
        .filter(|s| s.occurs_on(now.date()))
        .filter_map(|schedule| {
            let (start, end) = schedule.window()?;
            if start.to_naive_time() <= time && time < end.to_naive_time() {
                let progress = calculator.compute(start, end, now).ok()?;
                Some(ActiveSchedule { schedule, progress })
            } else {
                None
            }
        })
        .collect();

    active.sort_by_key(|a| a.schedule.start_time);
    active
}

/// 指定時刻より後に始まるスケジュール
///
/// 開始時刻の早い順。
pub fn upcoming_after(schedules: &[Schedule], now: NaiveDateTime) -> Vec<&Schedule> {
    let time = now.time();
    let mut upcoming: Vec<&Schedule> = schedules
        .iter()
        .filter(|s| s.occurs_on(now.date()))
        .filter(|s| s.start_time.is_some_and(|start| start.to_naive_time() > time))
        .collect();

    upcoming.sort_by_key(|s| s.start_time);
    upcoming
}
