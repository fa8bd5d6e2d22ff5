//! ディープワークモジュール
//!
//! 集中作業のストップウォッチと日次累計を提供する。

pub mod engine;
pub mod error;

pub use engine::{DeepWorkEngine, DeepWorkEvent, DeepWorkState};
pub use error::DeepWorkError;
