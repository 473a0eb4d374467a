//! テキスト表示
//!
//! ハイライト範囲を文字インデックスから端末向けのマーカーに変換する。

use crate::search::HighlightSpan;

const MATCH_OPEN: &str = "[";
const MATCH_CLOSE: &str = "]";
const CURRENT_OPEN: &str = ">>";
const CURRENT_CLOSE: &str = "<<";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Match,
    Current,
}

impl Mark {
    fn open(self) -> &'static str {
        match self {
            Mark::None => "",
            Mark::Match => MATCH_OPEN,
            Mark::Current => CURRENT_OPEN,
        }
    }

    fn close(self) -> &'static str {
        match self {
            Mark::None => "",
            Mark::Match => MATCH_CLOSE,
            Mark::Current => CURRENT_CLOSE,
        }
    }
}

/// テキスト全体をマーカー付きで描画
///
/// 重なり合うマッチは1つの範囲にまとめ、現在マッチを優先する。
pub fn render_highlighted(text: &str, spans: &[HighlightSpan]) -> String {
    render_range(text, spans, 0, usize::MAX)
}

/// 現在マッチの前後を切り出して描画
pub fn excerpt(
    text: &str,
    spans: &[HighlightSpan],
    focus: HighlightSpan,
    context: usize,
) -> String {
    let start = focus.start.saturating_sub(context);
    let end = focus.end.saturating_add(context);
    let body = render_range(text, spans, start, end);
    let total = text.chars().count();

    let prefix = if start > 0 { "..." } else { "" };
    let suffix = if end < total { "..." } else { "" };
    format!("{}{}{}", prefix, body.replace('\n', " "), suffix)
}

/// `spans` は開始位置の昇順で、終了位置も単調非減少であること（`highlight_spans` の出力）
fn render_range(text: &str, spans: &[HighlightSpan], start: usize, end: usize) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 4);
    let mut cursor = SpanCursor::new(spans);
    let mut current = Mark::None;

    for (idx, ch) in text.chars().enumerate().skip(start) {
        if idx >= end {
            break;
        }
        let mark = cursor.mark_at(idx);
        if mark != current {
            out.push_str(current.close());
            out.push_str(mark.open());
            current = mark;
        }
        out.push(ch);
    }
    out.push_str(current.close());
    out
}

/// 位置を昇順に問い合わせる前提で、有効な範囲の窓 `[low, high)` を前進させる
struct SpanCursor<'a> {
    spans: &'a [HighlightSpan],
    current: Option<HighlightSpan>,
    low: usize,
    high: usize,
}

impl<'a> SpanCursor<'a> {
    fn new(spans: &'a [HighlightSpan]) -> Self {
        Self {
            spans,
            current: spans.iter().find(|s| s.is_current).copied(),
            low: 0,
            high: 0,
        }
    }

    fn mark_at(&mut self, idx: usize) -> Mark {
        while self.high < self.spans.len() && self.spans[self.high].start <= idx {
            self.high += 1;
        }
        while self.low < self.high && self.spans[self.low].end <= idx {
            self.low += 1;
        }

        if self.current.map_or(false, |span| span.contains(idx)) {
            Mark::Current
        } else if self.low < self.high {
            Mark::Match
        } else {
            Mark::None
        }
    }
}
