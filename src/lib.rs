//! pdfnarrator - PDF text reader with search and narration
//!
//! 文書の読み込み、部分文字列検索とマッチ間の移動、音声読み上げを提供する。

// コアモジュール
pub mod error;
pub mod logging;
pub mod options;

// データ層
pub mod document;
pub mod settings;

// ロジック層
pub mod narration;
pub mod search;
pub mod session;

// 表示層
pub mod app;

// 公開API
pub use app::App;
pub use error::{NarratorError, Result};
pub use search::{advance, clear, highlight_spans, search, HighlightSpan, MatchResult};
pub use session::ReaderSession;
