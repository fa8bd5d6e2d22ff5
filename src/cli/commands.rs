use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::time_format::Locale;
use crate::types::TimeOfDay;

/// Momentum CLI
#[derive(Parser, Debug)]
#[command(
    name = "momentum",
    version,
    about = "일정 진행률과 딥워크 타이머",
    long_about = "스케줄 시간대의 진행률과 남은 시간을 계산하고, 딥워크 세션을 측정합니다.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 표시 언어 (ko / en). 설정 파일보다 우선
    #[arg(long, global = true)]
    pub locale: Option<Locale>,
}

/// Subcommand definitions
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 시간대 진행률을 한 번 표시
    Progress(ProgressArgs),

    /// 시간대 진행률을 주기적으로 표시
    Watch(WatchArgs),

    /// 일정 파일에서 현재 일정과 다가오는 일정을 표시
    Schedules(SchedulesArgs),

    /// 딥워크 스톱워치 시작
    DeepWork(DeepWorkArgs),
}

/// progress command arguments
#[derive(Args, Debug, Clone)]
pub struct ProgressArgs {
    /// 시작 시각 (HH:MM)
    #[arg(short, long)]
    pub start: TimeOfDay,

    /// 종료 시각 (HH:MM)
    #[arg(short, long)]
    pub end: TimeOfDay,

    /// 기준 시각 (HH:MM). 생략하면 현재 시각
    #[arg(short, long)]
    pub at: Option<TimeOfDay>,
}

/// watch command arguments
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// 시작 시각 (HH:MM)
    #[arg(short, long)]
    pub start: TimeOfDay,

    /// 종료 시각 (HH:MM)
    #[arg(short, long)]
    pub end: TimeOfDay,

    /// 갱신 간격 (초). 생략하면 설정값
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub interval: Option<u64>,
}

/// schedules command arguments
#[derive(Args, Debug, Clone)]
pub struct SchedulesArgs {
    /// 일정 JSON 파일
    pub file: PathBuf,

    /// 기준 시각 (HH:MM). 생략하면 현재 시각
    #[arg(short, long)]
    pub at: Option<TimeOfDay>,
}

/// deep-work command arguments
#[derive(Args, Debug, Clone)]
pub struct DeepWorkArgs {
    /// 지정한 초가 지나면 자동 종료
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_progress_command() {
        let args = vec!["momentum", "progress", "--start", "15:00", "--end", "16:00"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Progress(progress_args) => {
                assert_eq!(progress_args.start.to_string(), "15:00");
                assert_eq!(progress_args.end.to_string(), "16:00");
                assert!(progress_args.at.is_none());
            }
            _ => panic!("Expected Progress command"),
        }
        assert!(!cli.verbose);
        assert!(cli.locale.is_none());
    }

    #[test]
    fn test_parse_progress_command_with_at() {
        let args = vec![
            "momentum", "progress", "-s", "15:00", "-e", "16:00", "--at", "15:27",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Progress(progress_args) => {
                assert_eq!(progress_args.at.map(|t| t.to_string()), Some("15:27".to_string()));
            }
            _ => panic!("Expected Progress command"),
        }
    }

    #[test]
    fn test_parse_progress_rejects_bad_time() {
        let args = vec!["momentum", "progress", "--start", "3pm", "--end", "16:00"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_watch_command() {
        let args = vec![
            "momentum", "watch", "-s", "09:00", "-e", "18:00", "--interval", "30",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Watch(watch_args) => {
                assert_eq!(watch_args.interval, Some(30));
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_parse_watch_rejects_zero_interval() {
        let args = vec!["momentum", "watch", "-s", "09:00", "-e", "18:00", "-i", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_schedules_command() {
        let args = vec!["momentum", "schedules", "today.json", "--locale", "en"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.locale, Some(Locale::English));
        match cli.command {
            Commands::Schedules(schedules_args) => {
                assert_eq!(schedules_args.file, PathBuf::from("today.json"));
            }
            _ => panic!("Expected Schedules command"),
        }
    }

    #[test]
    fn test_parse_deep_work_command() {
        let args = vec!["momentum", "deep-work", "--limit", "90", "-v"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::DeepWork(deep_work_args) => {
                assert_eq!(deep_work_args.limit, Some(90));
            }
            _ => panic!("Expected DeepWork command"),
        }
    }
}
