//! 検索とマッチ移動の公開API テスト

use pdfnarrator::search::{
    advance, clear, highlight_spans, retreat, search, HighlightSpan, SearchNavigator,
    SearchStatus,
};

#[test]
fn overlapping_occurrences_are_all_found() {
    assert_eq!(search("aaa", "aa").offsets(), &[0, 1]);
}

#[test]
fn matching_ignores_case() {
    assert_eq!(search("Hello World", "hello").offsets(), &[0]);
    assert_eq!(search("Hello World", "WORLD").offsets(), &[6]);
}

#[test]
fn case_folding_applies_to_the_whole_window() {
    assert_eq!(search("ΟΔΟΣ", "οδος").offsets(), &[0]);
    assert!(search("ΟΔΟΣ", "οδοσ").is_empty());
    assert_eq!(search("ΣΟΦΙΑ", "σοφια").offsets(), &[0]);
}

#[test]
fn empty_query_or_text_finds_nothing() {
    let result = search("some text", "");
    assert!(result.is_empty());
    assert_eq!(result.current_index(), None);

    let result = search("", "query");
    assert!(result.is_empty());
    assert_eq!(result.current_index(), None);
}

#[test]
fn cat_sat_mat_scenario() {
    let result = search("the cat sat on the mat", "at");
    assert_eq!(result.offsets(), &[5, 9, 20]);
    assert_eq!(result.current_index(), Some(0));

    let result = advance(result);
    assert_eq!(result.current_index(), Some(1));

    let result = clear();
    assert!(result.offsets().is_empty());
    assert_eq!(result.current_index(), None);
}

#[test]
fn advance_wraps_from_last_to_first() {
    let mut result = search("x x x x", "x");
    let last = result.len() - 1;
    for _ in 0..last {
        result = advance(result);
    }
    assert_eq!(result.current_index(), Some(last));

    let result = advance(result);
    assert_eq!(result.current_index(), Some(0));
}

#[test]
fn retreat_is_inverse_of_advance() {
    let result = search("ab ab ab", "ab");
    let moved = retreat(advance(result.clone()));
    assert_eq!(moved, result);
}

#[test]
fn clear_is_idempotent() {
    assert_eq!(clear(), clear());
    assert_eq!(advance(clear()), clear());
}

#[test]
fn highlight_spans_cover_each_match() {
    let result = advance(search("the cat sat on the mat", "at"));
    let spans = highlight_spans(&result, 2);
    assert_eq!(
        spans,
        vec![
            HighlightSpan { start: 5, end: 7, is_current: false },
            HighlightSpan { start: 9, end: 11, is_current: true },
            HighlightSpan { start: 20, end: 22, is_current: false },
        ]
    );
    assert_eq!(spans.iter().filter(|s| s.is_current).count(), 1);
}

#[test]
fn status_messages_follow_match_count() {
    let mut navigator = SearchNavigator::new();

    let status = navigator.search("the cat sat on the mat", "at");
    assert_eq!(status, SearchStatus::Found(3));
    assert_eq!(status.message().as_deref(), Some("Found 3 matches"));

    let status = navigator.search("the cat sat on the mat", "dog");
    assert_eq!(status.message().as_deref(), Some("No matches found"));

    let status = navigator.search("the cat sat on the mat", "");
    assert_eq!(status.message(), None);
}

#[test]
fn new_search_resets_current_index() {
    let mut navigator = SearchNavigator::new();
    navigator.search("a a a", "a");
    navigator.find_next();
    navigator.find_next();
    assert_eq!(navigator.result().current_index(), Some(2));

    navigator.search("a a a", "a");
    assert_eq!(navigator.result().current_index(), Some(0));
}
