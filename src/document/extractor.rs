//! テキスト抽出
//!
//! ファイルから平文テキストを取り出すトレイトと、PDF・テキストファイル向けの実装

use crate::error::{DocumentError, Result};
use std::fs;
use std::path::Path;

/// PDFのマジックバイト
const PDF_MAGIC: &[u8] = b"%PDF";
/// 読み込み可能な最大ファイルサイズ（100 MiB）
pub const MAX_DOCUMENT_SIZE: u64 = 100 * 1024 * 1024;

/// テキスト抽出のトレイト
pub trait TextExtractor {
    /// ファイルから文書全体のテキストを抽出
    fn extract(&self, path: &Path) -> Result<String>;
}

/// PDFテキスト抽出（pdf-extract）
#[derive(Debug, Default, Clone)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// PDFとして読み込めるバイト列か検証
    pub fn validate(bytes: &[u8], path: &Path) -> std::result::Result<(), DocumentError> {
        if bytes.len() as u64 > MAX_DOCUMENT_SIZE {
            return Err(DocumentError::TooLarge {
                path: path.display().to_string(),
                size: bytes.len() as u64,
            });
        }
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(DocumentError::NotPdf {
                path: path.display().to_string(),
            });
        }
        Ok(())
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_bounded(path)?;
        Self::validate(&bytes, path)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            DocumentError::Extraction {
                message: e.to_string(),
            }
        })?;

        if text.trim().is_empty() {
            // 画像のみのPDF（スキャン文書）
            log::warn!("No extractable text in {}", path.display());
        }
        Ok(text)
    }
}

/// UTF-8テキストファイルの読み込み
#[derive(Debug, Default, Clone)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_bounded(path)?;
        let text = String::from_utf8(bytes).map_err(|e| DocumentError::Encoding {
            message: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        })?;
        Ok(text)
    }
}

/// 拡張子に応じた抽出器を選択
pub fn extractor_for(path: &Path) -> Box<dyn TextExtractor> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        Box::new(PdfTextExtractor::new())
    } else {
        Box::new(PlainTextExtractor::new())
    }
}

/// 既定の抽出器（拡張子で振り分け）
#[derive(Debug, Default, Clone)]
pub struct AutoExtractor;

impl TextExtractor for AutoExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        extractor_for(path).extract(path)
    }
}

fn read_bounded(path: &Path) -> std::result::Result<Vec<u8>, DocumentError> {
    if path.is_dir() {
        return Err(DocumentError::Io {
            message: format!("{} is a directory", path.display()),
        });
    }

    let metadata = fs::metadata(path).map_err(|e| DocumentError::from_io(&e, path))?;
    if metadata.len() > MAX_DOCUMENT_SIZE {
        return Err(DocumentError::TooLarge {
            path: path.display().to_string(),
            size: metadata.len(),
        });
    }

    fs::read(path).map_err(|e| DocumentError::from_io(&e, path))
}
