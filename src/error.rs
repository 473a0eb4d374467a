//! エラーハンドリングシステム
//!
//! pdfnarrator 全体で使用される統一されたエラー型を定義。
//! 検索処理はエラーを返さない全域関数であり、ここに現れるのは外部連携（文書読み込み、
//! 読み上げ、設定保存）の失敗のみ。

use std::path::Path;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum NarratorError {
    /// 文書読み込みエラー
    #[error("Document loading failed: {0}")]
    Document(#[from] DocumentError),

    /// 読み上げエラー
    #[error("Narration failed: {0}")]
    Narration(#[from] NarrationError),

    /// 設定エラー
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// 文書読み込み固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}: {message}")]
    InvalidPath { path: String, message: String },

    #[error("Not a PDF file: {path}")]
    NotPdf { path: String },

    #[error("File too large: {path} ({size} bytes)")]
    TooLarge { path: String, size: u64 },

    #[error("Text extraction failed: {message}")]
    Extraction { message: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl DocumentError {
    /// I/Oエラーをパス付きで分類
    pub fn from_io(error: &std::io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => DocumentError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => DocumentError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => DocumentError::Encoding {
                message: error.to_string(),
            },
            _ => DocumentError::Io {
                message: error.to_string(),
            },
        }
    }
}

/// 読み上げ固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NarrationError {
    #[error("No text available to read")]
    NothingToRead,

    #[error("Speech engine unavailable: {program}")]
    EngineUnavailable { program: String },

    #[error("Speech engine failed: {message}")]
    EngineFailed { message: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid settings file: {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Warning,
    Error,
}

/// エラー表示情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
}

impl ErrorDisplay {
    pub fn new(error: &NarratorError) -> Self {
        let (message, level) = Self::format_error(error);
        Self { message, level }
    }

    fn format_error(error: &NarratorError) -> (String, ErrorLevel) {
        match error {
            NarratorError::Document(DocumentError::NotFound { path }) => {
                (format!("File not found: {}", path), ErrorLevel::Error)
            }
            NarratorError::Document(DocumentError::PermissionDenied { path }) => {
                (format!("Permission denied: {}", path), ErrorLevel::Error)
            }
            NarratorError::Document(DocumentError::NotPdf { path }) => {
                (format!("Not a PDF file: {}", path), ErrorLevel::Warning)
            }
            NarratorError::Narration(NarrationError::NothingToRead) => {
                ("No text available to read".to_string(), ErrorLevel::Warning)
            }
            NarratorError::Narration(NarrationError::EngineUnavailable { program }) => (
                format!(
                    "Speech engine not found: {} (install it or choose another engine)",
                    program
                ),
                ErrorLevel::Error,
            ),
            NarratorError::Settings(_) => {
                (format!("Settings could not be saved: {}", error), ErrorLevel::Warning)
            }
            _ => (format!("Error: {}", error), ErrorLevel::Error),
        }
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, NarratorError>;

// std::io::Error から NarratorError への変換
impl From<std::io::Error> for NarratorError {
    fn from(error: std::io::Error) -> Self {
        NarratorError::Document(DocumentError::Io {
            message: error.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_creation() {
        let error = NarratorError::Document(DocumentError::NotFound {
            path: "test.pdf".to_string(),
        });
        let display = ErrorDisplay::new(&error);

        assert_eq!(display.level, ErrorLevel::Error);
        assert!(display.message.contains("File not found"));
    }

    #[test]
    fn test_nothing_to_read_is_warning() {
        let error: NarratorError = NarrationError::NothingToRead.into();
        let display = ErrorDisplay::new(&error);
        assert_eq!(display.level, ErrorLevel::Warning);
    }

    #[test]
    fn test_io_error_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = DocumentError::from_io(&io, Path::new("/tmp/a.pdf"));
        assert_eq!(
            error,
            DocumentError::NotFound {
                path: "/tmp/a.pdf".to_string()
            }
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            DocumentError::from_io(&io, Path::new("x")),
            DocumentError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn test_error_message_includes_source() {
        let error: NarratorError = DocumentError::Extraction {
            message: "bad xref".to_string(),
        }
        .into();
        assert!(error.to_string().contains("bad xref"));
    }
}
