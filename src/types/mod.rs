//! Momentumのデータ型定義
//!
//! 時刻、進捗サンプル、スケジュールなど、各モジュールが共有するデータ型を提供する。

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::progress::ProgressError;

// ============================================================================
// TimeOfDay
// ============================================================================

/// 日付を持たない壁時計の時刻（`HH:MM`）
///
/// 評価時点の日付に紐付けて使用する。タイムゾーンは持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// 時と分から作成
    ///
    /// 時は0-23、分は0-59の範囲外の場合はエラーを返す。
    pub fn new(hour: u8, minute: u8) -> Result<Self, ProgressError> {
        if hour > 23 || minute > 59 {
            return Err(ProgressError::InvalidTimeFormat {
                input: format!("{:02}:{:02}", hour, minute),
            });
        }
        Ok(Self { hour, minute })
    }

    /// `HH:MM` 形式の文字列をパース
    ///
    /// 2桁の時、コロン、2桁の分のみを受け付ける。
    pub fn parse(input: &str) -> Result<Self, ProgressError> {
        let invalid = || ProgressError::InvalidTimeFormat {
            input: input.to_string(),
        };

        let bytes = input.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }

        let digit = |b: u8| -> Result<u8, ProgressError> {
            if b.is_ascii_digit() {
                Ok(b - b'0')
            } else {
                Err(invalid())
            }
        };

        let hour = digit(bytes[0])? * 10 + digit(bytes[1])?;
        let minute = digit(bytes[3])? * 10 + digit(bytes[4])?;

        Self::new(hour, minute).map_err(|_| invalid())
    }

    /// 時（0-23）
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// 分（0-59）
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// 0時からの経過分数
    pub fn minutes_from_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// chronoの `NaiveTime` に変換
    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::MIN + Duration::minutes(i64::from(self.minutes_from_midnight()))
    }

    /// 指定した日付に紐付けた日時を返す
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// ProgressSample
// ============================================================================

/// 進捗の計算結果
///
/// 評価ごとに新しく生成される値型。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSample {
    /// 進捗率（0-100）
    pub percent_complete: u8,
    /// 残り時間（分、切り捨て）
    pub remaining_minutes: u32,
    /// 残り時間の表示文字列
    pub remaining_label: String,
}

impl ProgressSample {
    /// 完了しているかどうか
    pub fn is_complete(&self) -> bool {
        self.percent_complete >= 100
    }
}

// ============================================================================
// Schedule Types
// ============================================================================

/// スケジュールのカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Health,
    Study,
    Meeting,
}

impl Category {
    /// すべてのカテゴリ（選択肢の表示順）
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Study,
        Category::Meeting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Health => "health",
            Category::Study => "study",
            Category::Meeting => "meeting",
        }
    }

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Category::Work => "업무",
            Category::Personal => "개인",
            Category::Health => "건강",
            Category::Study => "학습",
            Category::Meeting => "회의",
        }
    }

    /// 表示色（16進カラーコード）
    pub fn color(&self) -> &'static str {
        match self {
            Category::Work => "#ad46ff",
            Category::Personal => "#ff6b6b",
            Category::Health => "#51cf66",
            Category::Study => "#ffd43b",
            Category::Meeting => "#339af0",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

/// スケジュールの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// 未着手
    Pending,
    /// 完了
    Completed,
    /// 失敗
    Failed,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Failed => "failed",
        }
    }

    /// 一覧表示用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "진행전",
            ScheduleStatus::Completed => "완료",
            ScheduleStatus::Failed => "실패",
        }
    }

    /// 編集フォームの選択肢ラベル
    ///
    /// 未着手のみ一覧表示と文言が異なる。
    pub fn option_label(&self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "대기 중",
            other => other.label(),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "#6a7282",
            ScheduleStatus::Completed => "#51cf66",
            ScheduleStatus::Failed => "#ff6b6b",
        }
    }
}

/// スケジュール
///
/// 外部から与えられる入力レコード。JSONのフィールド名はcamelCase。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: u32,
    /// 表示用の時間帯文字列（例: "15:00 - 16:00"）
    pub time: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
}

impl Schedule {
    /// 開始・終了時刻の組（両方ある場合のみ）
    pub fn window(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        self.start_time.zip(self.end_time)
    }

    /// 指定日に該当するスケジュールかどうか
    ///
    /// 日付を持たないスケジュールは毎日該当する。
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.date.map_or(true, |d| d == date)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // TimeOfDay Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_time_of_day_parse_valid() {
        let t = TimeOfDay::parse("09:05").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.minutes_from_midnight(), 545);

        assert!(TimeOfDay::parse("00:00").is_ok());
        assert!(TimeOfDay::parse("23:59").is_ok());
    }

    #[test]
    fn test_time_of_day_parse_invalid() {
        for input in ["9:00", "24:00", "12:60", "ab:cd", "12:000", "", "12-30", " 1:30"] {
            let err = TimeOfDay::parse(input).unwrap_err();
            assert_eq!(
                err,
                ProgressError::InvalidTimeFormat {
                    input: input.to_string()
                },
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_time_of_day_new_out_of_range() {
        assert!(TimeOfDay::new(23, 59).is_ok());
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(0, 60).is_err());
    }

    #[test]
    fn test_time_of_day_display() {
        let t = TimeOfDay::new(7, 3).unwrap();
        assert_eq!(t.to_string(), "07:03");
    }

    #[test]
    fn test_time_of_day_ordering() {
        let a: TimeOfDay = "09:00".parse().unwrap();
        let b: TimeOfDay = "15:30".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_time_of_day_on_date() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 13).unwrap();
        let t = TimeOfDay::parse("15:27").unwrap();
        let dt = t.on(date);
        assert_eq!(
            dt,
            date.and_hms_opt(15, 27, 0).unwrap()
        );
    }

    #[test]
    fn test_time_of_day_serde() {
        let t = TimeOfDay::parse("18:45").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"18:45\"");

        let err = serde_json::from_str::<TimeOfDay>("\"25:00\"");
        assert!(err.is_err());
    }

    // ------------------------------------------------------------------------
    // ProgressSample Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_progress_sample_serialize_camel_case() {
        let sample = ProgressSample {
            percent_complete: 45,
            remaining_minutes: 33,
            remaining_label: "33분 남음".to_string(),
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"percentComplete\":45"));
        assert!(json.contains("\"remainingMinutes\":33"));
        assert!(!sample.is_complete());
    }

    // ------------------------------------------------------------------------
    // Schedule Tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Work.label(), "업무");
        assert_eq!(Category::Meeting.color(), "#339af0");
        assert_eq!("study".parse::<Category>(), Ok(Category::Study));
        assert!("unknown".parse::<Category>().is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ScheduleStatus::Pending.label(), "진행전");
        assert_eq!(ScheduleStatus::Pending.option_label(), "대기 중");
        assert_eq!(ScheduleStatus::Failed.option_label(), "실패");
        assert_eq!(ScheduleStatus::Completed.color(), "#51cf66");
    }

    #[test]
    fn test_schedule_deserialize() {
        let json = r#"{
            "id": 1,
            "time": "15:00 - 16:00",
            "title": "디자인 리뷰",
            "date": "2025-12-13",
            "emoji": "🎨",
            "category": "work",
            "startTime": "15:00",
            "endTime": "16:00",
            "status": "pending"
        }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.category, Some(Category::Work));
        assert_eq!(schedule.status, Some(ScheduleStatus::Pending));

        let (start, end) = schedule.window().unwrap();
        assert_eq!(start.to_string(), "15:00");
        assert_eq!(end.to_string(), "16:00");

        let date = NaiveDate::from_ymd_opt(2025, 12, 13).unwrap();
        assert!(schedule.occurs_on(date));
        assert!(!schedule.occurs_on(date.succ_opt().unwrap()));
    }

    #[test]
    fn test_schedule_without_window() {
        let json = r#"{"id": 2, "time": "종일", "title": "독서"}"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert!(schedule.window().is_none());
        assert!(schedule.occurs_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    }
}
