//! 読み上げモジュール
//!
//! 音声合成エンジンとの境界。読み上げの開始・停止と実行中かどうかの確認のみを扱う。

mod command;

pub use command::{command_line, CommandNarrator};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// 既定の読み上げ速度（語/分）
pub const DEFAULT_RATE: u32 = 150;
/// 読み上げ速度の下限
pub const MIN_RATE: u32 = 80;
/// 読み上げ速度の上限
pub const MAX_RATE: u32 = 450;

/// 読み上げサービスのトレイト
pub trait Narrator {
    /// テキストの読み上げを開始（読み上げ中なら先に停止する）
    fn start(&mut self, text: &str, config: &NarrationConfig) -> Result<()>;

    /// 読み上げを停止
    fn stop(&mut self) -> Result<()>;

    /// 読み上げ中か判定
    fn is_busy(&mut self) -> bool;
}

/// 音声合成エンジン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeechEngine {
    /// eSpeak NG
    EspeakNg,
    /// 旧来の eSpeak
    Espeak,
    /// macOS の say コマンド
    Say,
    /// 任意のコマンド（テキストは標準入力に渡す）
    Custom { program: String, args: Vec<String> },
}

impl SpeechEngine {
    /// 実行するプログラム名
    pub fn program(&self) -> &str {
        match self {
            SpeechEngine::EspeakNg => "espeak-ng",
            SpeechEngine::Espeak => "espeak",
            SpeechEngine::Say => "say",
            SpeechEngine::Custom { program, .. } => program,
        }
    }

    /// 名前からエンジンを解決
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "espeak-ng" => Some(SpeechEngine::EspeakNg),
            "espeak" => Some(SpeechEngine::Espeak),
            "say" => Some(SpeechEngine::Say),
            _ => None,
        }
    }
}

impl Default for SpeechEngine {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            SpeechEngine::Say
        } else {
            SpeechEngine::EspeakNg
        }
    }
}

/// 読み上げ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub engine: SpeechEngine,
    /// 語/分
    pub rate: u32,
    /// 0.0〜1.0
    pub volume: f32,
    pub voice: Option<String>,
    pub language: String,
}

impl NarrationConfig {
    /// 範囲外の値を丸めた設定
    pub fn validated(&self) -> Self {
        let volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            rate: self.rate.clamp(MIN_RATE, MAX_RATE),
            volume,
            ..self.clone()
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            engine: SpeechEngine::default(),
            rate: DEFAULT_RATE,
            volume: 1.0,
            voice: None,
            language: "en".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_clamps_out_of_range_values() {
        let config = NarrationConfig {
            rate: 10,
            volume: 3.5,
            ..NarrationConfig::default()
        };
        let fixed = config.validated();
        assert_eq!(fixed.rate, MIN_RATE);
        assert_eq!(fixed.volume, 1.0);

        let config = NarrationConfig {
            rate: 1000,
            volume: f32::NAN,
            ..NarrationConfig::default()
        };
        let fixed = config.validated();
        assert_eq!(fixed.rate, MAX_RATE);
        assert_eq!(fixed.volume, 1.0);
    }

    #[test]
    fn config_deserializes_with_missing_fields() {
        let config: NarrationConfig = serde_json::from_str(r#"{"rate": 200}"#).unwrap();
        assert_eq!(config.rate, 200);
        assert_eq!(config.language, "en");
        assert_eq!(config.volume, 1.0);
    }

    #[test]
    fn engine_serializes_with_kind_tag() {
        let json = serde_json::to_string(&SpeechEngine::EspeakNg).unwrap();
        assert_eq!(json, r#"{"kind":"espeak_ng"}"#);

        let custom: SpeechEngine =
            serde_json::from_str(r#"{"kind":"custom","program":"piper","args":["-q"]}"#).unwrap();
        assert_eq!(custom.program(), "piper");
    }

    #[test]
    fn engine_names_resolve() {
        assert_eq!(SpeechEngine::from_name("say"), Some(SpeechEngine::Say));
        assert_eq!(SpeechEngine::from_name("festival"), None);
    }
}
