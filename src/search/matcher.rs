//! 検索用マッチャー

/// 文字列マッチング戦略
pub trait StringMatcher {
    /// 文字列内のすべてのマッチ開始位置（文字インデックス）を昇順で返す
    fn find_matches(&self, text: &str, pattern: &str) -> Vec<usize>;
}

/// 大文字小文字を区別しない単純なリテラルマッチャー
///
/// 1文字ずつ開始位置をずらして走査するため、重なり合うマッチもすべて検出する。
#[derive(Debug, Default, Clone)]
pub struct LiteralMatcher;

impl LiteralMatcher {
    /// インスタンスを作成
    pub fn new() -> Self {
        Self
    }
}

impl StringMatcher for LiteralMatcher {
    fn find_matches(&self, text: &str, pattern: &str) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }

        // 各文字の開始バイト位置（末尾に番兵として全長を置く）
        let mut boundaries: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
        boundaries.push(text.len());

        let char_count = boundaries.len() - 1;
        let pattern_len = pattern.chars().count();
        if pattern_len > char_count {
            return Vec::new();
        }

        // 小文字化は窓全体に対して行う（語末のシグマなど文脈依存の規則があるため）
        let folded_pattern = pattern.to_lowercase();
        let mut matches = Vec::new();

        for start in 0..=char_count - pattern_len {
            let window = &text[boundaries[start]..boundaries[start + pattern_len]];
            if window == pattern || window.to_lowercase() == folded_pattern {
                matches.push(start);
            }
        }

        matches
    }
}
