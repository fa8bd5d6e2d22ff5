//! ユーザー設定
//!
//! `~/.momentum/config.json` から読み込む。存在しない項目は既定値を使う。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progress::{DegeneratePolicy, ProgressCalculator, DEFAULT_SAMPLE_INTERVAL};
use crate::time_format::Locale;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("설정 파일을 찾을 수 없습니다: {0:?}")]
    FileNotFound(PathBuf),
    #[error("홈 디렉터리를 찾을 수 없습니다")]
    HomeDirectoryNotFound,
    #[error("설정 파일을 읽을 수 없습니다: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파일 형식이 올바르지 않습니다: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("설정 값이 올바르지 않습니다: {0}")]
    Invalid(String),
}

/// Momentum設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumConfig {
    /// 進捗の再計算間隔（秒）: 1-3600
    #[serde(default = "default_sample_interval_secs")]
    pub sample_interval_secs: u64,
    /// 表示言語
    #[serde(default)]
    pub locale: Locale,
    /// 終了時刻が開始時刻以前の時間帯の扱い
    #[serde(default)]
    pub degenerate_policy: DegeneratePolicy,
    /// 本日のディープワーク累計の初期値（秒）
    #[serde(default)]
    pub deep_work_daily_seconds: u64,
}

fn default_sample_interval_secs() -> u64 {
    DEFAULT_SAMPLE_INTERVAL.as_secs()
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            sample_interval_secs: default_sample_interval_secs(),
            locale: Locale::default(),
            degenerate_policy: DegeneratePolicy::default(),
            deep_work_daily_seconds: 0,
        }
    }
}

impl MomentumConfig {
    /// 設定ファイルのパス
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirectoryNotFound)?;
        Ok(home.join(".momentum").join("config.json"))
    }

    /// `~/.momentum/config.json` から読み込む
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file(&Self::default_path()?)
    }

    /// 指定したファイルから読み込む
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// 設定を検証
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_interval_secs < 1 || self.sample_interval_secs > 3600 {
            return Err("갱신 간격은 1-3600초 사이로 지정해 주세요".to_string());
        }
        if self.deep_work_daily_seconds > 24 * 3600 {
            return Err("딥워크 누적 시간은 24시간 이내로 지정해 주세요".to_string());
        }
        Ok(())
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }

    /// 設定に基づく進捗計算機
    pub fn calculator(&self) -> ProgressCalculator {
        ProgressCalculator::new(self.locale, self.degenerate_policy)
    }
}
