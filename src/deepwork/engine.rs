//! ディープワークエンジン
//!
//! 1秒ごとのティックで経過時間を数え、終了時にセッションを日次累計へ加算する。

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tracing::{debug, info};

use super::DeepWorkError;

/// ディープワークイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepWorkEvent {
    /// セッション開始
    Started,
    /// ティック（1秒経過）
    Tick { elapsed_seconds: u64 },
    /// セッション終了
    Stopped {
        session_seconds: u64,
        daily_total_seconds: u64,
    },
}

/// ディープワークの状態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepWorkState {
    /// 進行中かどうか
    pub active: bool,
    /// 現在のセッションの経過秒数
    pub elapsed_seconds: u64,
    /// 本日の累計秒数（進行中のセッションは含まない）
    pub daily_total_seconds: u64,
}

impl DeepWorkState {
    /// 進行中のセッションを含めた本日の累計秒数
    pub fn total_with_current(&self) -> u64 {
        self.daily_total_seconds + self.elapsed_seconds
    }
}

/// ディープワークエンジン
///
/// タイマーエンジンと同様に、呼び出し側のループからティックを受け取る。
///
/// ```ignore
/// let (event_tx, mut event_rx) = mpsc::unbounded_channel();
/// let mut engine = DeepWorkEngine::new(0, event_tx);
/// let mut ticker = DeepWorkEngine::create_ticker();
///
/// engine.start()?;
/// loop {
///     tokio::select! {
///         _ = ticker.tick() => { engine.process_tick()?; }
///         _ = tokio::signal::ctrl_c() => { engine.stop()?; break; }
///     }
/// }
/// ```
pub struct DeepWorkEngine {
    state: DeepWorkState,
    event_tx: mpsc::UnboundedSender<DeepWorkEvent>,
}

impl DeepWorkEngine {
    /// 本日の累計秒数を指定して作成
    pub fn new(daily_total_seconds: u64, event_tx: mpsc::UnboundedSender<DeepWorkEvent>) -> Self {
        Self {
            state: DeepWorkState {
                daily_total_seconds,
                ..DeepWorkState::default()
            },
            event_tx,
        }
    }

    /// 1秒間隔のIntervalを作成
    ///
    /// `MissedTickBehavior::Skip` を設定済み。
    pub fn create_ticker() -> Interval {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }

    /// セッションを開始
    pub fn start(&mut self) -> Result<(), DeepWorkError> {
        if self.state.active {
            return Err(DeepWorkError::AlreadyActive);
        }

        self.state.active = true;
        self.state.elapsed_seconds = 0;
        info!("Deep work session started");

        self.send(DeepWorkEvent::Started)
    }

    /// セッションを終了
    ///
    /// 経過時間を日次累計に加算し、経過時間をリセットする。
    /// 戻り値はセッションの秒数。
    pub fn stop(&mut self) -> Result<u64, DeepWorkError> {
        if !self.state.active {
            return Err(DeepWorkError::NotActive);
        }

        let session_seconds = self.state.elapsed_seconds;
        self.state.active = false;
        self.state.elapsed_seconds = 0;
        self.state.daily_total_seconds += session_seconds;
        info!(
            "Deep work session stopped after {}s (daily total: {}s)",
            session_seconds, self.state.daily_total_seconds
        );

        self.send(DeepWorkEvent::Stopped {
            session_seconds,
            daily_total_seconds: self.state.daily_total_seconds,
        })?;

        Ok(session_seconds)
    }

    /// 開始・終了を切り替え
    ///
    /// 戻り値は切り替え後に進行中かどうか。
    pub fn toggle(&mut self) -> Result<bool, DeepWorkError> {
        if self.state.active {
            self.stop()?;
        } else {
            self.start()?;
        }
        Ok(self.state.active)
    }

    /// 1ティック（1秒）を処理
    ///
    /// # 戻り値
    ///
    /// - `Ok(true)`: 進行中でティックを処理した
    /// - `Ok(false)`: 進行していない
    /// - `Err(...)`: イベント送信に失敗
    pub fn process_tick(&mut self) -> Result<bool, DeepWorkError> {
        if !self.state.active {
            return Ok(false);
        }

        self.state.elapsed_seconds += 1;
        self.send(DeepWorkEvent::Tick {
            elapsed_seconds: self.state.elapsed_seconds,
        })?;

        Ok(true)
    }

    /// 現在の状態を取得
    pub fn state(&self) -> &DeepWorkState {
        &self.state
    }

    fn send(&self, event: DeepWorkEvent) -> Result<(), DeepWorkError> {
        self.event_tx.send(event).map_err(|e| {
            debug!("Deep work event dropped: {:?}", e.0);
            DeepWorkError::EventChannelClosed
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
