use thiserror::Error;

use crate::time_format::Locale;

/// 進捗計算のエラー
///
/// `Display` は韓国語。英語表示は `message` を使う。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("시간 형식이 올바르지 않습니다 (HH:MM): {input:?}")]
    InvalidTimeFormat { input: String },
    #[error("종료 시각이 시작 시각보다 빠르거나 같습니다: {start} - {end}")]
    DegenerateWindow { start: String, end: String },
    #[error("비동기 런타임 밖에서는 진행률을 관찰할 수 없습니다")]
    RuntimeUnavailable,
}

impl ProgressError {
    /// 表示言語に合わせたメッセージ
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::Korean => self.to_string(),
            Locale::English => match self {
                ProgressError::InvalidTimeFormat { input } => {
                    format!("invalid time format (expected HH:MM): {:?}", input)
                }
                ProgressError::DegenerateWindow { start, end } => {
                    format!("end time is not after start time: {} - {}", start, end)
                }
                ProgressError::RuntimeUnavailable => {
                    "progress can only be observed inside an async runtime".to_string()
                }
            },
        }
    }
}
