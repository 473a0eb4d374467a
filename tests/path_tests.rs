//! 入力パスの展開テスト
//!
//! カレントディレクトリと HOME を書き換えるため、テストは1つにまとめて順に実行する。

use pdfnarrator::document::PlainTextExtractor;
use pdfnarrator::narration::CommandNarrator;
use pdfnarrator::settings::Settings;
use pdfnarrator::ReaderSession;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn typed_paths_are_recorded_as_one_absolute_entry() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let paper = root.join("paper.txt");
    std::fs::write(&paper, "a short paper").unwrap();

    let mut session = ReaderSession::with_parts(
        Settings::default(),
        Some(root.join("settings.json")),
        Box::new(PlainTextExtractor::new()),
        Box::new(CommandNarrator::new()),
    );

    // 相対パスと ./ 付きのパスは同じファイルとして記録される
    std::env::set_current_dir(&root).unwrap();
    session.open(&PathBuf::from("paper.txt")).unwrap();
    session.open(&PathBuf::from("./paper.txt")).unwrap();

    let recent: Vec<PathBuf> = session.recent_files().iter().map(PathBuf::from).collect();
    assert_eq!(recent.len(), 1);
    assert!(recent[0].is_absolute());
    assert_eq!(recent[0], paper);
    assert_eq!(
        session.document().path().map(|p| p.to_path_buf()),
        Some(recent[0].clone())
    );

    // 別のディレクトリからでも記録済みのパスで開き直せる
    let elsewhere = TempDir::new().unwrap();
    std::env::set_current_dir(elsewhere.path()).unwrap();
    let recorded = recent[0].clone();
    session.open(&recorded).unwrap();
    assert_eq!(session.recent_files().len(), 1);

    // ~ はホームディレクトリに展開される
    std::env::set_var("HOME", &root);
    let document = session.open(&PathBuf::from("~/paper.txt")).unwrap();
    assert_eq!(document.text(), "a short paper");
    assert_eq!(session.recent_files().len(), 1);
}
