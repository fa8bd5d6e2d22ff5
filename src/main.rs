//! Momentum CLI
//!
//! スケジュール時間帯の進捗表示とディープワーク計測を行うCLIツール。
//! 実時計（`SystemClock`）を組み立てるのはこのファイルのみ。

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use momentum::cli::{
    Cli, Commands, DeepWorkArgs, Display, ProgressArgs, ProgressView, SchedulesArgs, WatchArgs,
};
use momentum::config::{ConfigError, MomentumConfig};
use momentum::deepwork::{DeepWorkEngine, DeepWorkEvent};
use momentum::logging::init_logging;
use momentum::progress::{Clock, PeriodicProgressSampler, SamplerUpdate, SystemClock};
use momentum::schedule::{active_at, load_schedules, upcoming_after};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config();
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let display = Display::new(config.locale);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let result = match cli.command {
        Commands::Progress(args) => run_progress(args, &config, &display, clock.as_ref()),
        Commands::Watch(args) => run_watch(args, &config, &display, clock).await,
        Commands::Schedules(args) => run_schedules(args, &config, &display, clock.as_ref()),
        Commands::DeepWork(args) => run_deep_work(args, &config, &display).await,
    };

    if let Err(e) = result {
        display.show_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn load_config() -> MomentumConfig {
    match MomentumConfig::load() {
        Ok(config) => {
            debug!("Loaded config: {:?}", config);
            config
        }
        Err(ConfigError::FileNotFound(path)) => {
            debug!("Config file not found, using defaults: {:?}", path);
            MomentumConfig::default()
        }
        Err(e) => {
            warn!("Failed to load config, using defaults: {}", e);
            MomentumConfig::default()
        }
    }
}

fn run_progress(
    args: ProgressArgs,
    config: &MomentumConfig,
    display: &Display,
    clock: &dyn Clock,
) -> Result<()> {
    let now = clock.now();
    let now = args.at.map_or(now, |at| at.on(now.date()));

    let view = display
        .resolve_progress(config.calculator().compute(args.start, args.end, now))
        .map_err(|e| anyhow::anyhow!(e.message(display.locale())))
        .context("Failed to compute progress")?;

    match view {
        ProgressView::Ready(sample) => display.show_sample(args.start, args.end, &sample),
        ProgressView::Unknown(reason) => display.show_unknown_progress(&reason),
    }

    Ok(())
}

async fn run_watch(
    args: WatchArgs,
    config: &MomentumConfig,
    display: &Display,
    clock: Arc<dyn Clock>,
) -> Result<()> {
    let interval = args
        .interval
        .map_or_else(|| config.sample_interval(), std::time::Duration::from_secs);

    let sampler = PeriodicProgressSampler::new(config.calculator(), clock).with_interval(interval);
    let view = display
        .resolve_progress(sampler.observe(&args.start.to_string(), &args.end.to_string()))
        .map_err(|e| anyhow::anyhow!(e.message(display.locale())))
        .context("Failed to start progress sampler")?;

    let (mut subscription, mut updates) = match view {
        ProgressView::Ready(observed) => observed,
        ProgressView::Unknown(reason) => {
            display.show_unknown_progress(&reason);
            return Ok(());
        }
    };

    let bar = display.create_progress_bar(args.start, args.end);

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(SamplerUpdate::Sample(sample)) => {
                    display.update_progress_bar(&bar, &sample);
                    if sample.is_complete() {
                        subscription.cancel();
                        bar.finish();
                        break;
                    }
                }
                Some(SamplerUpdate::Stale { error, .. }) => {
                    display.mark_stale(&bar, &error);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                subscription.cancel();
                bar.abandon();
                break;
            }
        }
    }

    Ok(())
}

fn run_schedules(
    args: SchedulesArgs,
    config: &MomentumConfig,
    display: &Display,
    clock: &dyn Clock,
) -> Result<()> {
    let schedules = load_schedules(&args.file)
        .with_context(|| format!("Failed to load schedules from {:?}", args.file))?;

    let now = clock.now();
    let now = args.at.map_or(now, |at| at.on(now.date()));

    let calculator = config.calculator();
    let active = active_at(&schedules, now, &calculator);
    let upcoming = upcoming_after(&schedules, now);
    display.show_schedules(&active, &upcoming);

    Ok(())
}

async fn run_deep_work(args: DeepWorkArgs, config: &MomentumConfig, display: &Display) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut engine = DeepWorkEngine::new(config.deep_work_daily_seconds, event_tx);
    let mut ticker = DeepWorkEngine::create_ticker();
    // 最初のティックは即時に完了するので読み捨てる
    ticker.tick().await;

    engine.start().context("Failed to start deep work")?;
    let spinner = display.create_deep_work_spinner();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.process_tick()?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }

        while let Ok(event) = event_rx.try_recv() {
            if let DeepWorkEvent::Tick { elapsed_seconds } = event {
                display.update_deep_work(&spinner, elapsed_seconds);
            }
        }

        if args
            .limit
            .is_some_and(|limit| engine.state().elapsed_seconds >= limit)
        {
            break;
        }
    }

    let session_seconds = engine.stop().context("Failed to stop deep work")?;
    spinner.finish_and_clear();
    display.show_deep_work_summary(session_seconds, engine.state());

    Ok(())
}
