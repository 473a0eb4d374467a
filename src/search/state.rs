//! マッチ集合と現在位置の状態
//!
//! `MatchResult` は値として受け渡され、各操作は新しい状態を返す。

use super::matcher::StringMatcher;
use super::types::HighlightSpan;

/// 検索結果（マッチ開始位置の集合と現在のマッチ）
///
/// `offsets` は常に狭義単調増加。`current_index` は `offsets` が空でなければ
/// `Some(i)`（`i < offsets.len()`）、空なら `None`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    offsets: Vec<usize>,
    current_index: Option<usize>,
}

impl MatchResult {
    /// マッチ開始位置の一覧
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// 現在のマッチ番号（0-based）
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// 現在のマッチ開始位置
    pub fn current_offset(&self) -> Option<usize> {
        self.current_index.and_then(|idx| self.offsets.get(idx).copied())
    }

    /// マッチ件数
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// マッチがないか判定
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// テキスト全体を走査して新しい検索結果を作成
pub fn search_with<M: StringMatcher + ?Sized>(
    matcher: &M,
    text: &str,
    query: &str,
) -> MatchResult {
    if query.is_empty() || text.is_empty() {
        return clear();
    }

    let offsets = matcher.find_matches(text, query);
    debug_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    let current_index = if offsets.is_empty() { None } else { Some(0) };

    MatchResult {
        offsets,
        current_index,
    }
}

/// 次のマッチへ（末尾から先頭へ折り返す）
pub fn advance(mut state: MatchResult) -> MatchResult {
    let len = state.offsets.len();
    if len == 0 {
        return state;
    }
    let next = state.current_index.map_or(0, |idx| (idx + 1) % len);
    state.current_index = Some(next);
    state
}

/// 前のマッチへ（先頭から末尾へ折り返す）
pub fn retreat(mut state: MatchResult) -> MatchResult {
    let len = state.offsets.len();
    if len == 0 {
        return state;
    }
    let prev = state.current_index.map_or(len - 1, |idx| (idx + len - 1) % len);
    state.current_index = Some(prev);
    state
}

/// 空の検索結果
pub fn clear() -> MatchResult {
    MatchResult::default()
}

/// 各マッチのハイライト範囲を作成
pub fn highlight_spans(state: &MatchResult, query_len: usize) -> Vec<HighlightSpan> {
    if query_len == 0 {
        return Vec::new();
    }

    state
        .offsets
        .iter()
        .enumerate()
        .map(|(idx, &start)| HighlightSpan {
            start,
            end: start + query_len,
            is_current: Some(idx) == state.current_index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::matcher::LiteralMatcher;

    fn run(text: &str, query: &str) -> MatchResult {
        search_with(&LiteralMatcher::new(), text, query)
    }

    #[test]
    fn new_search_starts_at_first_match() {
        let state = run("the cat sat on the mat", "at");
        assert_eq!(state.offsets(), &[5, 9, 20]);
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(state.current_offset(), Some(5));
    }

    #[test]
    fn no_match_has_no_current_index() {
        let state = run("abc", "x");
        assert!(state.is_empty());
        assert_eq!(state.current_index(), None);
        assert_eq!(state.current_offset(), None);
    }

    #[test]
    fn advance_wraps_to_first() {
        let state = run("foo foo foo", "foo");
        let state = advance(advance(state));
        assert_eq!(state.current_index(), Some(2));
        let state = advance(state);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn retreat_wraps_to_last() {
        let state = run("foo foo foo", "foo");
        let state = retreat(state);
        assert_eq!(state.current_index(), Some(2));
        let state = retreat(state);
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn navigation_on_empty_is_noop() {
        assert_eq!(advance(clear()), clear());
        assert_eq!(retreat(clear()), clear());
    }

    #[test]
    fn highlight_marks_current_span() {
        let state = advance(run("ab ab", "ab"));
        let spans = highlight_spans(&state, 2);
        assert_eq!(
            spans,
            vec![
                HighlightSpan { start: 0, end: 2, is_current: false },
                HighlightSpan { start: 3, end: 5, is_current: true },
            ]
        );
    }

    #[test]
    fn highlight_with_zero_length_is_empty() {
        let state = run("ab ab", "ab");
        assert!(highlight_spans(&state, 0).is_empty());
        assert!(highlight_spans(&clear(), 2).is_empty());
    }
}
