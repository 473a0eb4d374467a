//! 検索関連の共通型

/// 表示層向けのハイライト範囲（文字インデックス、半開区間）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// 開始位置（文字インデックス）
    pub start: usize,
    /// 終了位置（文字インデックス、排他的）
    pub end: usize,
    /// 現在のマッチであるか
    pub is_current: bool,
}

impl HighlightSpan {
    /// 指定位置を含むか判定
    pub fn contains(&self, char_index: usize) -> bool {
        self.start <= char_index && char_index < self.end
    }
}

/// 検索結果の表示ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// 検索語が空（検索未実行）
    Idle,
    /// マッチあり（件数）
    Found(usize),
    /// マッチが見つからない
    NotFound,
}

impl SearchStatus {
    /// マッチ件数と検索語からステータスを決定
    pub fn from_count(count: usize, query: &str) -> Self {
        if query.is_empty() {
            SearchStatus::Idle
        } else if count > 0 {
            SearchStatus::Found(count)
        } else {
            SearchStatus::NotFound
        }
    }

    /// ステータスバーに表示するメッセージ
    pub fn message(self) -> Option<String> {
        match self {
            SearchStatus::Idle => None,
            SearchStatus::Found(count) => Some(format!("Found {} matches", count)),
            SearchStatus::NotFound => Some("No matches found".to_string()),
        }
    }

    /// エラー表示すべき状態か判定
    pub fn is_error(self) -> bool {
        matches!(self, SearchStatus::NotFound)
    }
}
