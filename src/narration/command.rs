//! 外部コマンドによる読み上げ
//!
//! 音声合成プログラムを子プロセスとして起動し、テキストを標準入力へ流し込む。
//! 停止は子プロセスの終了で表現する。

use super::{NarrationConfig, Narrator, SpeechEngine};
use crate::error::{NarrationError, Result};
use std::io::{ErrorKind, Write};
use std::process::{Child, Command, Stdio};

/// 設定からプログラム名と引数を組み立てる
pub fn command_line(config: &NarrationConfig) -> (String, Vec<String>) {
    let config = config.validated();
    let program = config.engine.program().to_string();

    let args = match &config.engine {
        SpeechEngine::EspeakNg | SpeechEngine::Espeak => {
            // 振幅は 0〜200（既定 100）
            let amplitude = (config.volume * 100.0).round() as u32;
            let voice = config.voice.clone().unwrap_or_else(|| config.language.clone());
            vec![
                "-s".to_string(),
                config.rate.to_string(),
                "-a".to_string(),
                amplitude.to_string(),
                "-v".to_string(),
                voice,
                "--stdin".to_string(),
            ]
        }
        SpeechEngine::Say => {
            let mut args = vec!["-r".to_string(), config.rate.to_string()];
            if let Some(voice) = &config.voice {
                args.push("-v".to_string());
                args.push(voice.clone());
            }
            args.push("-f".to_string());
            args.push("-".to_string());
            args
        }
        SpeechEngine::Custom { args, .. } => args.clone(),
    };

    (program, args)
}

/// 子プロセスで読み上げるナレーター
#[derive(Debug, Default)]
pub struct CommandNarrator {
    child: Option<Child>,
}

impl CommandNarrator {
    pub fn new() -> Self {
        Self { child: None }
    }
}

impl Narrator for CommandNarrator {
    fn start(&mut self, text: &str, config: &NarrationConfig) -> Result<()> {
        if text.trim().is_empty() {
            return Err(NarrationError::NothingToRead.into());
        }

        self.stop()?;

        let (program, args) = command_line(config);
        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => NarrationError::EngineUnavailable {
                    program: program.clone(),
                },
                _ => NarrationError::EngineFailed {
                    message: e.to_string(),
                },
            })?;

        // 読み上げ速度でしか読み進まないため、書き込みは別スレッドで行う
        if let Some(mut stdin) = child.stdin.take() {
            let text = text.to_string();
            std::thread::spawn(move || {
                if let Err(e) = stdin.write_all(text.as_bytes()) {
                    // 停止による BrokenPipe は正常
                    if e.kind() != ErrorKind::BrokenPipe {
                        log::warn!("failed to feed speech engine: {}", e);
                    }
                }
            });
        }

        log::info!(
            "narration started with {} ({} chars)",
            program,
            text.chars().count()
        );
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        match child.kill() {
            Ok(()) => log::info!("narration stopped"),
            // 既に終了している
            Err(e) if e.kind() == ErrorKind::InvalidInput => {}
            Err(e) => {
                return Err(NarrationError::EngineFailed {
                    message: e.to_string(),
                }
                .into())
            }
        }

        child.wait().map_err(|e| NarrationError::EngineFailed {
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn is_busy(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };

        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                if !status.success() {
                    log::warn!("speech engine exited with {}", status);
                }
                self.child = None;
                false
            }
            Err(e) => {
                log::warn!("failed to poll speech engine: {}", e);
                self.child = None;
                false
            }
        }
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
