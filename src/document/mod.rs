//! 文書モジュール
//!
//! 読み込んだ文書のテキストと、抽出サービスとの境界を定義

mod extractor;
mod path;

pub use extractor::{
    extractor_for, AutoExtractor, PdfTextExtractor, PlainTextExtractor, TextExtractor,
    MAX_DOCUMENT_SIZE,
};
pub use path::expand_path;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// 読み込み済み文書
///
/// テキストは読み込み後に変更されない。新しいファイルを開くと文書ごと置き換える。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    text: String,
    char_count: usize,
}

impl Document {
    /// 抽出器を使ってファイルから読み込み
    pub fn load(path: &Path, extractor: &dyn TextExtractor) -> Result<Self> {
        let text = extractor.extract(path)?;
        let mut document = Self::from_text(text);
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// 文字列から作成
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            path: None,
            text,
            char_count,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 文字数
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 読み上げ対象となるテキストがあるか
    pub fn has_readable_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// 文字インデックス範囲の部分文字列（範囲外は切り詰める）
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.char_count);
        if start >= end {
            return "";
        }
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        &self.text[start_byte..end_byte]
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}
