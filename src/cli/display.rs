//! Display utilities for CLI output
//!
//! Provides colored and formatted output for CLI commands.

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use crate::deepwork::DeepWorkState;
use crate::progress::ProgressError;
use crate::schedule::ActiveSchedule;
use crate::time_format::{format_clock, format_daily, format_deep_work, Locale};
use crate::types::{ProgressSample, Schedule, TimeOfDay};

/// Progress result as presented to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressView<T> {
    /// Progress is available
    Ready(T),
    /// Window has no meaningful progress; carries the localized reason
    Unknown(String),
}

/// Display handler for CLI output
pub struct Display {
    locale: Locale,
}

impl Default for Display {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl Display {
    /// Create a new Display instance
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Map a degenerate window to the neutral "unknown" view
    ///
    /// Any other error is passed through to the caller.
    pub fn resolve_progress<T>(
        &self,
        result: Result<T, ProgressError>,
    ) -> Result<ProgressView<T>, ProgressError> {
        match result {
            Ok(value) => Ok(ProgressView::Ready(value)),
            Err(e @ ProgressError::DegenerateWindow { .. }) => {
                Ok(ProgressView::Unknown(e.message(self.locale)))
            }
            Err(e) => Err(e),
        }
    }

    /// Create a progress bar sized in percent (0-100)
    pub fn create_progress_bar(&self, start: TimeOfDay, end: TimeOfDay) -> ProgressBar {
        let style = ProgressStyle::with_template(
            "{prefix} [{bar:40.magenta}] {pos:>3}%\n{msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█░");

        let bar = ProgressBar::new(100);
        bar.set_style(style);
        bar.set_prefix(format!("{} - {}", start, end).cyan().to_string());
        bar
    }

    /// Update a progress bar with the latest sample
    pub fn update_progress_bar(&self, bar: &ProgressBar, sample: &ProgressSample) {
        bar.set_position(u64::from(sample.percent_complete));
        bar.set_message(colorize_remaining(sample).to_string());
    }

    /// Mark a progress bar as stale, keeping its last position
    pub fn mark_stale(&self, bar: &ProgressBar, error: &ProgressError) {
        bar.set_message(
            format!("{} ({})", self.unknown_progress_label(), error.message(self.locale))
                .yellow()
                .to_string(),
        );
    }

    /// Show a single progress sample
    pub fn show_sample(&self, start: TimeOfDay, end: TimeOfDay, sample: &ProgressSample) {
        println!(
            "{} {}",
            format!("{} - {}", start, end).cyan(),
            render_bar(sample.percent_complete, 30)
        );
        println!(
            "  {:>3}%  {}",
            sample.percent_complete,
            colorize_remaining(sample)
        );
    }

    /// Show neutral indicator when progress is unavailable
    pub fn show_unknown_progress(&self, reason: &str) {
        println!("{} {}", "?".yellow().bold(), self.unknown_progress_label().yellow());
        println!("  {}", reason);
    }

    /// Show active and upcoming schedules
    pub fn show_schedules(&self, active: &[ActiveSchedule<'_>], upcoming: &[&Schedule]) {
        let (current_title, upcoming_title, empty) = match self.locale {
            Locale::Korean => ("현재 일정", "다가오는 일정", "일정이 없습니다"),
            Locale::English => ("Current", "Upcoming", "No schedules"),
        };

        println!("{}", format!("=== {} ===", current_title).bold());
        if active.is_empty() {
            println!("  {}", empty.dimmed());
        }
        for entry in active {
            let schedule = entry.schedule;
            println!(
                "  {} {} {}",
                schedule.emoji.as_deref().unwrap_or("•"),
                schedule.title.bold(),
                category_tag(schedule)
            );
            println!(
                "    {} {:>3}%  {}",
                render_bar(entry.progress.percent_complete, 20),
                entry.progress.percent_complete,
                colorize_remaining(&entry.progress)
            );
        }

        println!("{}", format!("=== {} ===", upcoming_title).bold());
        if upcoming.is_empty() {
            println!("  {}", empty.dimmed());
        }
        for schedule in upcoming {
            println!(
                "  {} {} {} {}",
                schedule.time.dimmed(),
                schedule.emoji.as_deref().unwrap_or("•"),
                schedule.title,
                category_tag(schedule)
            );
        }
    }

    /// Create a spinner for the deep work stopwatch
    pub fn create_deep_work_spinner(&self) -> ProgressBar {
        let style = ProgressStyle::with_template("{spinner:.magenta} {prefix} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_prefix(self.deep_work_active_label().magenta().bold().to_string());
        spinner.set_message(format_clock(0));
        spinner
    }

    /// Update the deep work stopwatch
    pub fn update_deep_work(&self, spinner: &ProgressBar, elapsed_seconds: u64) {
        spinner.set_message(format_clock(elapsed_seconds).magenta().to_string());
        spinner.tick();
    }

    /// Show deep work summary
    pub fn show_deep_work_summary(&self, session_seconds: u64, state: &DeepWorkState) {
        let (session_label, total_label) = match self.locale {
            Locale::Korean => ("이번 세션", "오늘 누적 딥워크"),
            Locale::English => ("This session", "Deep work today"),
        };

        println!(
            "{} {}: {}",
            "■".magenta().bold(),
            session_label,
            format_clock(session_seconds)
        );
        println!(
            "  {}: {} ({})",
            total_label,
            format_daily(state.daily_total_seconds).magenta(),
            format_deep_work(state.daily_total_seconds, self.locale)
        );
    }

    /// Show error message
    pub fn show_error(&self, msg: &str) {
        eprintln!("{} {}", "✗".red().bold(), msg.red());
    }

    fn unknown_progress_label(&self) -> &'static str {
        match self.locale {
            Locale::Korean => "진행률을 알 수 없음",
            Locale::English => "Progress unknown",
        }
    }

    fn deep_work_active_label(&self) -> &'static str {
        match self.locale {
            Locale::Korean => "딥워크 진행중",
            Locale::English => "Deep work",
        }
    }
}

/// Render a text progress bar of the given width
pub fn render_bar(percent: u8, width: usize) -> String {
    let percent = usize::from(percent.min(100));
    let filled = percent * width / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

fn colorize_remaining(sample: &ProgressSample) -> ColoredString {
    if sample.is_complete() {
        sample.remaining_label.green()
    } else if sample.remaining_minutes <= 10 {
        sample.remaining_label.red()
    } else {
        sample.remaining_label.normal()
    }
}

fn category_tag(schedule: &Schedule) -> String {
    schedule
        .category
        .map(|c| format!("[{}]", c.label()).dimmed().to_string())
        .unwrap_or_default()
}
