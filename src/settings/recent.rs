//! 最近開いたファイルの履歴

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// 履歴の既定の最大保存数
pub const DEFAULT_RECENT_CAPACITY: usize = 5;

/// 最近開いたファイル（新しいものが先頭、重複なし）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PathBuf>", into = "Vec<PathBuf>")]
pub struct RecentFiles {
    entries: VecDeque<PathBuf>,
    max_size: usize,
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECENT_CAPACITY)
    }

    /// 指定した容量で作成
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// パスを先頭に追加（既存のエントリは移動）
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return;
        }

        self.entries.retain(|p| p != &path);
        self.entries.push_front(path);
        self.truncate();
    }

    /// パスを削除
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.entries.len();
        self.entries.retain(|p| p != path);
        before != self.entries.len()
    }

    /// 最新のエントリ
    pub fn most_recent(&self) -> Option<&Path> {
        self.entries.front().map(PathBuf::as_path)
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 新しいものから古いものへ
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    fn truncate(&mut self) {
        while self.entries.len() > self.max_size {
            self.entries.pop_back();
        }
    }
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<PathBuf>> for RecentFiles {
    fn from(paths: Vec<PathBuf>) -> Self {
        let mut recent = RecentFiles::new();
        // 保存順（新しい順）を保つため古いものから追加
        for path in paths.into_iter().rev() {
            recent.push(path);
        }
        recent
    }
}

impl From<RecentFiles> for Vec<PathBuf> {
    fn from(recent: RecentFiles) -> Self {
        recent.entries.into_iter().collect()
    }
}
