//! パス展開
//!
//! 入力されたパスの `~` と環境変数を展開し、`.` と `..` を畳んだ絶対パスにする。
//! 最近使ったファイルの一覧には常にこの形で記録する。

use crate::error::{DocumentError, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

/// `~` と `$VAR` を展開して絶対パスに変換
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let expanded = expand_variables(path)?;
    let absolute = to_absolute(&expanded)?;
    Ok(normalize_components(&absolute))
}

fn expand_variables(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => Ok(PathBuf::from(expanded.into_owned())),
        Err(e) => Err(invalid(path, e.to_string())),
    }
}

fn to_absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let current_dir = env::current_dir()
        .map_err(|e| invalid(path, format!("current directory unavailable: {}", e)))?;
    Ok(current_dir.join(path))
}

/// 字句的な正規化（シンボリックリンクは解決しない）
fn normalize_components(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => {
                // ルートより上には出ない
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

fn invalid(path: &Path, message: String) -> crate::error::NarratorError {
    DocumentError::InvalidPath {
        path: path.display().to_string(),
        message,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarratorError;

    #[test]
    fn collapses_dot_components() {
        let path = expand_path(Path::new("/books/./papers/../paper.pdf")).unwrap();
        assert_eq!(path, PathBuf::from("/books/paper.pdf"));
    }

    #[test]
    fn parent_of_root_stays_at_root() {
        let path = expand_path(Path::new("/../paper.pdf")).unwrap();
        assert_eq!(path, PathBuf::from("/paper.pdf"));
    }

    #[test]
    fn relative_path_becomes_absolute() {
        let path = expand_path(Path::new("notes/./paper.txt")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("notes/paper.txt"));
        assert!(!path.to_string_lossy().contains("/./"));
    }

    #[test]
    fn undefined_variable_is_rejected() {
        let err = expand_path(Path::new("$PDFNARRATOR_TEST_UNDEFINED_DIR/a.pdf")).unwrap_err();
        assert!(matches!(
            err,
            NarratorError::Document(DocumentError::InvalidPath { .. })
        ));
    }
}
