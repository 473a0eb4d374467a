//! 設定の永続化
//!
//! 最近開いたファイルと読み上げ設定を JSON ファイルに保存する。

mod recent;

pub use recent::{RecentFiles, DEFAULT_RECENT_CAPACITY};

use crate::error::{Result, SettingsError};
use crate::narration::NarrationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 設定ファイルのフォーマットバージョン
pub const SETTINGS_VERSION: u32 = 1;

/// 設定ファイルのルート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    pub recent_files: RecentFiles,
    pub narration: NarrationConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            recent_files: RecentFiles::new(),
            narration: NarrationConfig::default(),
        }
    }
}

impl Settings {
    /// ファイルから読み込み（ファイルがなければ既定値）
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(SettingsError::Io {
                    message: e.to_string(),
                }
                .into())
            }
        };

        let settings: Settings =
            serde_json::from_str(&content).map_err(|e| SettingsError::InvalidFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(settings)
    }

    /// 読み込みに失敗した場合は警告を出して既定値を使う
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// ファイルへ保存（親ディレクトリを作成する）
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path).map_err(io_error)?;

        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Io {
            message: e.to_string(),
        })?;

        // 一時ファイルに書き込んでから置き換える
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(io_error)?;
        fs::rename(&temp_path, path).map_err(io_error)?;
        Ok(())
    }
}

/// 既定の設定ファイルパス（`<config_dir>/pdfnarrator/settings.json`）
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pdfnarrator").join("settings.json"))
}

/// ヘルパー：親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn io_error(e: std::io::Error) -> SettingsError {
    SettingsError::Io {
        message: e.to_string(),
    }
}
