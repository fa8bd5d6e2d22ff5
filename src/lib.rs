//! Momentumコアライブラリ
//!
//! スケジュール時間帯の進捗計算、定期サンプリング、ディープワーク計測を提供する。

pub mod cli;
pub mod config;
pub mod deepwork;
pub mod logging;
pub mod progress;
pub mod schedule;
pub mod time_format;
pub mod types;
