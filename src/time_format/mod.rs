//! 時間表示フォーマット
//!
//! 残り時間ラベル、ストップウォッチ表示、累計時間表示の文字列を生成する。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 残り時間を「時間+分」形式で表示する境界（分）
///
/// これを超える場合のみ時間を併記する。
pub const HOUR_TIER_THRESHOLD_MINUTES: u32 = 60;

/// 表示言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// 韓国語
    #[default]
    #[serde(rename = "ko")]
    Korean,
    /// 英語
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Korean => "ko",
            Locale::English => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ko" => Ok(Locale::Korean),
            "en" => Ok(Locale::English),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

/// 分を（時間, 分）に分解
pub fn split_minutes(total_minutes: u32) -> (u32, u32) {
    (total_minutes / 60, total_minutes % 60)
}

/// 残り時間ラベルを生成
///
/// 60分を超える場合は「N시간 M분 남음」、それ以外は「M분 남음」。
pub fn format_remaining(remaining_minutes: u32, locale: Locale) -> String {
    if remaining_minutes > HOUR_TIER_THRESHOLD_MINUTES {
        let (hours, minutes) = split_minutes(remaining_minutes);
        match locale {
            Locale::Korean => format!("{}시간 {}분 남음", hours, minutes),
            Locale::English => format!("{}h {}m remaining", hours, minutes),
        }
    } else {
        match locale {
            Locale::Korean => format!("{}분 남음", remaining_minutes),
            Locale::English => format!("{}m remaining", remaining_minutes),
        }
    }
}

/// 秒を `HH:MM:SS` 形式に変換
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// 秒を日次累計の形式（例: "2h 35m"）に変換
pub fn format_daily(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

/// 秒をディープワーク時間の形式（例: "2시간 35분"）に変換
///
/// 0の単位は省略する。1時間未満は分のみ。
pub fn format_deep_work(total_seconds: u64, locale: Locale) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    let (h_unit, m_unit) = match locale {
        Locale::Korean => ("시간", "분"),
        Locale::English => ("h", "m"),
    };

    if hours == 0 {
        return format!("{}{}", minutes, m_unit);
    }
    if minutes == 0 {
        return format!("{}{}", hours, h_unit);
    }
    format!("{}{} {}{}", hours, h_unit, minutes, m_unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_remaining_minutes_only() {
        assert_eq!(format_remaining(33, Locale::Korean), "33분 남음");
        assert_eq!(format_remaining(0, Locale::Korean), "0분 남음");
        assert_eq!(format_remaining(60, Locale::Korean), "60분 남음");
    }

    #[test]
    fn test_format_remaining_hours_and_minutes() {
        assert_eq!(format_remaining(61, Locale::Korean), "1시간 1분 남음");
        assert_eq!(format_remaining(120, Locale::Korean), "2시간 0분 남음");
        assert_eq!(format_remaining(155, Locale::English), "2h 35m remaining");
    }

    #[test]
    fn test_format_remaining_english_minutes_only() {
        assert_eq!(format_remaining(45, Locale::English), "45m remaining");
    }

    #[test]
    fn test_split_minutes_recombines() {
        for m in [61, 90, 119, 120, 121, 599, 1439] {
            let (hours, minutes) = split_minutes(m);
            assert!(minutes < 60);
            assert_eq!(hours * 60 + minutes, m);
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(3), "00:00:03");
        assert_eq!(format_clock(2 * 3600 + 35 * 60 + 45), "02:35:45");
        assert_eq!(format_clock(100 * 3600), "100:00:00");
    }

    #[test]
    fn test_format_daily() {
        assert_eq!(format_daily(3 * 3600 + 25 * 60), "3h 25m");
        assert_eq!(format_daily(59), "0h 0m");
    }

    #[test]
    fn test_format_deep_work() {
        assert_eq!(format_deep_work(35 * 60, Locale::Korean), "35분");
        assert_eq!(format_deep_work(2 * 3600, Locale::Korean), "2시간");
        assert_eq!(format_deep_work(2 * 3600 + 35 * 60, Locale::Korean), "2시간 35분");
        assert_eq!(format_deep_work(2 * 3600 + 35 * 60, Locale::English), "2h 35m");
        assert_eq!(format_deep_work(0, Locale::Korean), "0분");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("ko".parse::<Locale>(), Ok(Locale::Korean));
        assert_eq!("en".parse::<Locale>(), Ok(Locale::English));
        assert!("jp".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::Korean);
    }

    #[test]
    fn test_locale_serde() {
        assert_eq!(serde_json::to_string(&Locale::English).unwrap(), "\"en\"");
        let locale: Locale = serde_json::from_str("\"ko\"").unwrap();
        assert_eq!(locale, Locale::Korean);
    }
}
