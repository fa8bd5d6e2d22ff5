//! 進捗計算モジュール
//!
//! スケジュールの時間帯に対する進捗率と残り時間を計算し、
//! 一定間隔で再計算して購読者に配信する。

pub mod calculator;
pub mod clock;
pub mod error;
pub mod sampler;

pub use calculator::{compute, DegeneratePolicy, ProgressCalculator};
pub use clock::{Clock, FixedClock, SystemClock, TokioClock};
pub use error::ProgressError;
pub use sampler::{
    PeriodicProgressSampler, ProgressSubscription, SamplerState, SamplerUpdate,
    DEFAULT_SAMPLE_INTERVAL,
};
