//! 起動オプション
//!
//! コマンドライン引数と環境変数から実行時の設定を組み立てる。

use crate::error::{NarratorError, Result};
use crate::logging::LogLevel;
use crate::settings::default_settings_path;
use std::path::PathBuf;

/// ログレベルを指定する環境変数
pub const LOG_LEVEL_ENV: &str = "PDFNARRATOR_LOG";
/// ログファイルを指定する環境変数
pub const LOG_FILE_ENV: &str = "PDFNARRATOR_LOG_FILE";

pub const USAGE: &str = "usage: pdfnarrator [--settings PATH] [--log-file PATH] [--log-level LEVEL] [FILE]";

/// 実行時オプション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// 起動時に開くファイル
    pub initial_file: Option<PathBuf>,
    /// 設定ファイル（未指定時は `<config_dir>/pdfnarrator/settings.json`）
    pub settings_path: Option<PathBuf>,
    /// ログファイル出力先
    pub log_path: Option<PathBuf>,
    /// ログレベル（未指定時は警告以上）
    pub log_level: Option<LogLevel>,
    /// 使い方の表示のみ
    pub show_help: bool,
}

impl RunOptions {
    /// コマンドライン引数を解析（先頭のプログラム名は含めない）
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = RunOptions::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => options.show_help = true,
                "--settings" => options.settings_path = Some(required(&mut args, &arg)?.into()),
                "--log-file" => options.log_path = Some(required(&mut args, &arg)?.into()),
                "--log-level" => {
                    let value = required(&mut args, &arg)?;
                    options.log_level = Some(LogLevel::parse(&value).ok_or_else(|| {
                        NarratorError::Application(format!("invalid log level: {}", value))
                    })?);
                }
                flag if flag.starts_with("--") => {
                    return Err(NarratorError::Application(format!(
                        "unknown option: {}",
                        flag
                    )))
                }
                _ => {
                    if options.initial_file.is_some() {
                        return Err(NarratorError::Application(
                            "only one file can be opened".to_string(),
                        ));
                    }
                    options.initial_file = Some(PathBuf::from(&arg));
                }
            }
        }

        Ok(options)
    }

    /// 環境変数から読み込んだ値
    pub fn from_env() -> Self {
        RunOptions {
            log_level: std::env::var(LOG_LEVEL_ENV)
                .ok()
                .and_then(|value| LogLevel::parse(&value)),
            log_path: std::env::var_os(LOG_FILE_ENV).map(PathBuf::from),
            ..RunOptions::default()
        }
    }

    /// `overrides` に指定がある項目を優先して統合
    pub fn merged_with(&self, overrides: &RunOptions) -> RunOptions {
        RunOptions {
            initial_file: overrides
                .initial_file
                .clone()
                .or_else(|| self.initial_file.clone()),
            settings_path: overrides
                .settings_path
                .clone()
                .or_else(|| self.settings_path.clone()),
            log_path: overrides.log_path.clone().or_else(|| self.log_path.clone()),
            log_level: overrides.log_level.or(self.log_level),
            show_help: self.show_help || overrides.show_help,
        }
    }

    /// 設定ファイルパスを解決
    pub fn resolve_settings_path(&self) -> Option<PathBuf> {
        match &self.settings_path {
            Some(path) => Some(path.clone()),
            None => default_settings_path(),
        }
    }

    /// ログレベルを解決
    pub fn resolve_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or(LogLevel::Warning)
    }
}

fn required<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| NarratorError::Application(format!("{} needs a value", flag)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_and_flags() {
        let options = RunOptions::from_args([
            "--settings",
            "/tmp/s.json",
            "--log-level",
            "debug",
            "book.pdf",
        ])
        .unwrap();
        assert_eq!(options.initial_file, Some(PathBuf::from("book.pdf")));
        assert_eq!(options.settings_path, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(options.log_level, Some(LogLevel::Debug));
        assert!(!options.show_help);
    }

    #[test]
    fn rejects_unknown_flag_and_missing_value() {
        assert!(RunOptions::from_args(["--bogus"]).is_err());
        assert!(RunOptions::from_args(["--settings"]).is_err());
        assert!(RunOptions::from_args(["--log-level", "loud"]).is_err());
        assert!(RunOptions::from_args(["a.pdf", "b.pdf"]).is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let base = RunOptions {
            log_level: Some(LogLevel::Info),
            log_path: Some(PathBuf::from("/var/log/a.log")),
            ..RunOptions::default()
        };
        let cli = RunOptions {
            log_level: Some(LogLevel::Error),
            ..RunOptions::default()
        };
        let merged = base.merged_with(&cli);
        assert_eq!(merged.log_level, Some(LogLevel::Error));
        assert_eq!(merged.log_path, Some(PathBuf::from("/var/log/a.log")));
        assert_eq!(merged.resolve_log_level(), LogLevel::Error);
    }

    #[test]
    fn explicit_settings_path_is_used() {
        let options = RunOptions {
            settings_path: Some(PathBuf::from("/tmp/x.json")),
            ..RunOptions::default()
        };
        assert_eq!(
            options.resolve_settings_path(),
            Some(PathBuf::from("/tmp/x.json"))
        );
    }
}
