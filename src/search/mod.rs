//! 検索モジュール
//!
//! 文書テキストに対する大文字小文字を区別しない部分文字列検索と、
//! マッチ間の巡回ナビゲーションを提供する。表示層とは文字インデックスのみで連携する。

mod matcher;
mod state;
pub mod types;

pub use matcher::{LiteralMatcher, StringMatcher};
pub use state::{advance, clear, highlight_spans, retreat, search_with, MatchResult};
pub use types::{HighlightSpan, SearchStatus};

/// 既定のリテラルマッチャーで検索
pub fn search(text: &str, query: &str) -> MatchResult {
    search_with(&LiteralMatcher::new(), text, query)
}

/// 検索制御インターフェース
///
/// 最後に実行した検索語と `MatchResult` を保持し、各操作は状態関数へ委譲する。
#[derive(Debug)]
pub struct SearchNavigator<M: StringMatcher = LiteralMatcher> {
    matcher: M,
    query: String,
    result: MatchResult,
}

impl SearchNavigator<LiteralMatcher> {
    /// 既定のリテラルマッチャーで作成
    pub fn new() -> Self {
        Self::with_matcher(LiteralMatcher::new())
    }
}

impl<M: StringMatcher> SearchNavigator<M> {
    /// マッチャーを差し替えて作成
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            matcher,
            query: String::new(),
            result: clear(),
        }
    }

    /// 検索を実行し、現在位置を先頭マッチにリセット
    pub fn search(&mut self, text: &str, query: &str) -> SearchStatus {
        self.query = query.to_string();
        self.result = search_with(&self.matcher, text, query);
        log::debug!(
            "search {:?}: {} matches in {} chars",
            query,
            self.result.len(),
            text.chars().count()
        );
        self.status()
    }

    /// 次のマッチへ移動
    pub fn find_next(&mut self) -> Option<HighlightSpan> {
        self.result = advance(std::mem::take(&mut self.result));
        self.current_span()
    }

    /// 前のマッチへ移動
    pub fn find_previous(&mut self) -> Option<HighlightSpan> {
        self.result = retreat(std::mem::take(&mut self.result));
        self.current_span()
    }

    /// 検索状態を破棄
    pub fn clear(&mut self) {
        self.query.clear();
        self.result = clear();
    }

    /// 最後に実行した検索語
    pub fn query(&self) -> &str {
        &self.query
    }

    /// 現在の検索結果
    pub fn result(&self) -> &MatchResult {
        &self.result
    }

    /// 表示用ステータス
    pub fn status(&self) -> SearchStatus {
        SearchStatus::from_count(self.result.len(), &self.query)
    }

    /// 全マッチのハイライト範囲
    pub fn highlights(&self) -> Vec<HighlightSpan> {
        highlight_spans(&self.result, self.query_len())
    }

    /// 現在マッチのハイライト範囲
    pub fn current_span(&self) -> Option<HighlightSpan> {
        self.result.current_offset().map(|start| HighlightSpan {
            start,
            end: start + self.query_len(),
            is_current: true,
        })
    }

    fn query_len(&self) -> usize {
        self.query.chars().count()
    }
}

impl Default for SearchNavigator<LiteralMatcher> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigator_cycles_through_matches() {
        let mut nav = SearchNavigator::new();
        let status = nav.search("foo bar foo", "FOO");
        assert_eq!(status, SearchStatus::Found(2));
        assert_eq!(nav.current_span().map(|s| s.start), Some(0));

        assert_eq!(nav.find_next().map(|s| (s.start, s.end)), Some((8, 11)));
        assert_eq!(nav.find_next().map(|s| s.start), Some(0));
        assert_eq!(nav.find_previous().map(|s| s.start), Some(8));
    }

    #[test]
    fn navigator_reports_not_found() {
        let mut nav = SearchNavigator::new();
        assert_eq!(nav.search("abc", "xyz"), SearchStatus::NotFound);
        assert_eq!(nav.find_next(), None);
        assert!(nav.highlights().is_empty());
    }

    #[test]
    fn clear_resets_query_and_matches() {
        let mut nav = SearchNavigator::new();
        nav.search("abc abc", "abc");
        nav.clear();
        assert_eq!(nav.query(), "");
        assert!(nav.result().is_empty());
        assert_eq!(nav.status(), SearchStatus::Idle);
    }

    #[test]
    fn highlight_length_counts_characters() {
        let mut nav = SearchNavigator::new();
        nav.search("naïve NAÏVE", "naïve");
        let spans = nav.highlights();
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[1].start, spans[1].end), (6, 11));
    }
}
