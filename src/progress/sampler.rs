//! 定期進捗サンプラー
//!
//! 一定間隔で進捗を再計算し、購読者に配信する。
//! 購読ハンドル（`ProgressSubscription`）がタイマータスクを所有し、
//! キャンセル・再設定・破棄のいずれでもタスクを停止する。

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::{Clock, ProgressCalculator, ProgressError};
use crate::types::{ProgressSample, TimeOfDay};

/// 既定のサンプリング間隔（1分）
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(60);

/// サンプラーが配信する更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamplerUpdate {
    /// 新しいサンプル
    Sample(ProgressSample),
    /// 計算に失敗した。直前の正常なサンプルを保持したまま古いものとして扱う
    Stale {
        last: Option<ProgressSample>,
        error: ProgressError,
    },
}

/// サンプラーの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    /// タイマー停止中
    Idle,
    /// タイマー実行中
    Sampling,
}

/// 定期進捗サンプラー
///
/// # 使用方法
///
/// ```ignore
/// let sampler = PeriodicProgressSampler::new(calculator, Arc::new(SystemClock));
/// let (subscription, mut updates) = sampler.observe("15:00", "16:00")?;
///
/// while let Some(update) = updates.recv().await {
///     // 表示を更新
/// }
/// ```
#[derive(Clone)]
pub struct PeriodicProgressSampler {
    calculator: ProgressCalculator,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl PeriodicProgressSampler {
    /// 既定の間隔（1分）でサンプラーを作成
    pub fn new(calculator: ProgressCalculator, clock: Arc<dyn Clock>) -> Self {
        Self {
            calculator,
            clock,
            interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }

    /// サンプリング間隔を変更
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 時間帯の観測を開始
    ///
    /// 時刻を検証し、最初のサンプルを即座に配信してからタイマーを起動する。
    ///
    /// # 戻り値
    ///
    /// - `Ok((subscription, receiver))`: 購読ハンドルと更新の受信側
    /// - `Err(RuntimeUnavailable)`: tokioランタイムの外で呼び出された（何も配信しない）
    /// - `Err(...)`: 時刻が不正、または縮退時間帯が拒否された
    pub fn observe(
        &self,
        start: &str,
        end: &str,
    ) -> Result<(ProgressSubscription, mpsc::UnboundedReceiver<SamplerUpdate>), ProgressError>
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscription = ProgressSubscription {
            sampler: self.clone(),
            tx,
            shared: Arc::new(Mutex::new(Shared::default())),
            task: None,
            window: None,
        };
        subscription.begin(start, end)?;
        Ok((subscription, rx))
    }
}

#[derive(Debug, Default)]
struct Shared {
    /// 実行中タスクの世代。キャンセル時に進める
    generation: u64,
    last: Option<ProgressSample>,
    stale: bool,
}

/// 購読ハンドル
///
/// タイマータスクを所有する。破棄時にタスクを停止する。
pub struct ProgressSubscription {
    sampler: PeriodicProgressSampler,
    tx: mpsc::UnboundedSender<SamplerUpdate>,
    shared: Arc<Mutex<Shared>>,
    task: Option<JoinHandle<()>>,
    window: Option<(TimeOfDay, TimeOfDay)>,
}

impl ProgressSubscription {
    /// 現在の状態
    pub fn state(&self) -> SamplerState {
        if self.task.is_some() {
            SamplerState::Sampling
        } else {
            SamplerState::Idle
        }
    }

    /// タイマータスクがまだ解放されていないかどうか
    ///
    /// タスクは共有状態の複製を保持するため、タスクが破棄されるまで参照数は1を超える。
    /// `cancel()` 直後はランタイムがタスクを回収するまで `true` のことがある。
    pub fn has_pending_timer(&self) -> bool {
        Arc::strong_count(&self.shared) > 1
    }

    /// 最後に計算できたサンプル
    pub fn last_sample(&self) -> Option<ProgressSample> {
        lock(&self.shared).last.clone()
    }

    /// 最後のサンプルが古いかどうか
    pub fn is_stale(&self) -> bool {
        lock(&self.shared).stale
    }

    /// 観測中の時間帯
    pub fn window(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        self.window
    }

    /// 時間帯を変更して観測し直す
    ///
    /// 既存のタイマーを停止してから新しい時間帯で開始する。
    /// 新しい時間帯が不正な場合はIdleのまま、直前のサンプルを古いものとして保持する。
    pub fn retarget(&mut self, start: &str, end: &str) -> Result<(), ProgressError> {
        self.cancel();

        if let Err(error) = self.begin(start, end) {
            warn!("Failed to retarget progress sampler: {}", error);
            let mut shared = lock(&self.shared);
            shared.stale = true;
            let _ = self.tx.send(SamplerUpdate::Stale {
                last: shared.last.clone(),
                error: error.clone(),
            });
            return Err(error);
        }

        Ok(())
    }

    /// 観測を停止
    ///
    /// 戻った時点で以降の配信は発生しない。
    pub fn cancel(&mut self) {
        {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
        }

        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Progress sampler cancelled");
        }
        self.window = None;
    }

    fn begin(&mut self, start: &str, end: &str) -> Result<(), ProgressError> {
        let start = TimeOfDay::parse(start)?;
        let end = TimeOfDay::parse(end)?;
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| ProgressError::RuntimeUnavailable)?;

        let calculator = self.sampler.calculator;
        let clock = Arc::clone(&self.sampler.clock);
        let period = self.sampler.interval;

        let sample = calculator.evaluate(start, end, clock.as_ref())?;

        let generation = {
            let mut shared = lock(&self.shared);
            shared.last = Some(sample.clone());
            shared.stale = false;
            let _ = self.tx.send(SamplerUpdate::Sample(sample));
            shared.generation
        };

        let shared = Arc::clone(&self.shared);
        let tx = self.tx.clone();

        let task = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                // 送信はロック保持中に行い、キャンセルとの競合を防ぐ
                let mut state = lock(&shared);
                if state.generation != generation {
                    break;
                }

                let update = match calculator.evaluate(start, end, clock.as_ref()) {
                    Ok(sample) => {
                        state.last = Some(sample.clone());
                        state.stale = false;
                        SamplerUpdate::Sample(sample)
                    }
                    Err(error) => {
                        warn!("Progress sample failed, keeping last sample: {}", error);
                        state.stale = true;
                        SamplerUpdate::Stale {
                            last: state.last.clone(),
                            error,
                        }
                    }
                };

                if tx.send(update).is_err() {
                    debug!("Progress subscriber dropped, stopping sampler");
                    break;
                }
            }
        });

        debug!(
            "Progress sampler started for {} - {} (interval: {:?})",
            start, end, period
        );

        self.task = Some(task);
        self.window = Some((start, end));
        Ok(())
    }
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

// ============================================================================
// Tests
// ============================================================================
