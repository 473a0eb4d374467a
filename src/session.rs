//! 読み上げセッション
//!
//! 現在の文書、検索状態、設定、ナレーターを一箇所で所有する。
//! 表示層のイベントはすべてこの型のメソッドを通じて状態を変更する。

use crate::document::{expand_path, AutoExtractor, Document, TextExtractor};
use crate::error::{DocumentError, NarrationError, NarratorError, Result};
use crate::narration::{CommandNarrator, NarrationConfig, Narrator};
use crate::search::{HighlightSpan, MatchResult, SearchNavigator, SearchStatus};
use crate::settings::{RecentFiles, Settings};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// 単一の文書を扱うセッション
pub struct ReaderSession {
    document: Document,
    search: SearchNavigator,
    settings: Settings,
    settings_path: Option<PathBuf>,
    extractor: Box<dyn TextExtractor>,
    narrator: Box<dyn Narrator>,
}

impl ReaderSession {
    /// 既定の抽出器とナレーターで作成し、設定ファイルを読み込む
    pub fn new(settings_path: Option<PathBuf>) -> Self {
        let settings = settings_path
            .as_deref()
            .map(Settings::load_or_default)
            .unwrap_or_default();
        Self::with_parts(
            settings,
            settings_path,
            Box::new(AutoExtractor),
            Box::new(CommandNarrator::new()),
        )
    }

    /// 構成要素を指定して作成
    pub fn with_parts(
        settings: Settings,
        settings_path: Option<PathBuf>,
        extractor: Box<dyn TextExtractor>,
        narrator: Box<dyn Narrator>,
    ) -> Self {
        Self {
            document: Document::default(),
            search: SearchNavigator::new(),
            settings,
            settings_path,
            extractor,
            narrator,
        }
    }

    /// ファイルを開いて文書を置き換える
    ///
    /// パスは `~` と環境変数を展開した絶対パスとして扱う。
    /// 失敗した場合は現在の文書と検索状態をそのまま残す。
    pub fn open(&mut self, path: &Path) -> Result<&Document> {
        let expanded = expand_path(path).map_err(|e| {
            log::warn!("failed to open {}: {}", path.display(), e);
            e
        })?;
        let path = expanded.as_path();

        let document = match Document::load(path, self.extractor.as_ref()) {
            Ok(document) => document,
            Err(e) => {
                if matches!(e, NarratorError::Document(DocumentError::NotFound { .. }))
                    && self.settings.recent_files.remove(path)
                {
                    self.persist();
                }
                log::warn!("failed to open {}: {}", path.display(), e);
                return Err(e);
            }
        };

        log::info!(
            "opened {} ({} chars)",
            path.display(),
            document.char_count()
        );
        if !document.has_readable_text() {
            log::warn!("{} contains no readable text", path.display());
        }

        self.replace_document(document);
        self.settings.recent_files.push(path);
        self.persist();
        Ok(&self.document)
    }

    /// 文字列から文書を置き換える
    pub fn load_text(&mut self, text: impl Into<String>) {
        self.replace_document(Document::from_text(text));
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// 検索を実行（前回の結果は破棄される）
    pub fn search(&mut self, query: &str) -> SearchStatus {
        self.search.search(self.document.text(), query)
    }

    /// 次のマッチへ
    pub fn find_next(&mut self) -> Option<HighlightSpan> {
        self.search.find_next()
    }

    /// 前のマッチへ
    pub fn find_previous(&mut self) -> Option<HighlightSpan> {
        self.search.find_previous()
    }

    /// 検索を解除
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn search_status(&self) -> SearchStatus {
        self.search.status()
    }

    pub fn search_result(&self) -> &MatchResult {
        self.search.result()
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn highlights(&self) -> Vec<HighlightSpan> {
        self.search.highlights()
    }

    pub fn current_match(&self) -> Option<HighlightSpan> {
        self.search.current_span()
    }

    /// 選択範囲（なければ文書全体）を読み上げる
    pub fn read_aloud(&mut self, selection: Option<Range<usize>>) -> Result<()> {
        let text = match selection {
            Some(range) => {
                let selected = self.document.slice(range.start, range.end);
                if selected.trim().is_empty() {
                    self.document.text()
                } else {
                    selected
                }
            }
            None => self.document.text(),
        };

        if text.trim().is_empty() {
            return Err(NarrationError::NothingToRead.into());
        }
        self.narrator.start(text, &self.settings.narration)
    }

    /// 読み上げを停止
    pub fn stop_reading(&mut self) -> Result<()> {
        self.narrator.stop()
    }

    pub fn is_reading(&mut self) -> bool {
        self.narrator.is_busy()
    }

    pub fn recent_files(&self) -> &RecentFiles {
        &self.settings.recent_files
    }

    pub fn narration_config(&self) -> &NarrationConfig {
        &self.settings.narration
    }

    /// 読み上げ設定を変更して保存
    pub fn set_narration(&mut self, config: NarrationConfig) {
        self.settings.narration = config.validated();
        self.persist();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn replace_document(&mut self, document: Document) {
        if let Err(e) = self.narrator.stop() {
            log::warn!("failed to stop narration: {}", e);
        }
        // 古い文書のマッチ位置は新しい文書では無効
        self.search.clear();
        self.document = document;
    }

    fn persist(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save(path) {
            log::warn!("failed to save settings to {}: {}", path.display(), e);
        }
    }
}
