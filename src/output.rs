//! Turtle文書の書き出しと鮮度チェック

use crate::error::{GovLiftError, Result};
use dialoguer::Confirm;
use sha2::{Digest, Sha256};
use std::path::Path;

/// 書き出し結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// 既存ファイルと同一内容のため書き込み不要
    Unchanged,
}

/// 文書のSHA-256ダイジェスト（16進）
pub fn digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// ファイル内容のダイジェスト（存在しなければ None）
pub fn file_digest(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(digest(&content)))
}

/// 文書を書き出す
///
/// 既存ファイルと内容が異なる場合、`assume_yes` でなければ上書き確認する。
pub fn write_document(path: &Path, document: &str, assume_yes: bool) -> Result<WriteOutcome> {
    if let Some(existing) = file_digest(path)? {
        if existing == digest(document) {
            return Ok(WriteOutcome::Unchanged);
        }
        if !assume_yes && !confirm_overwrite(path)? {
            return Err(GovLiftError::Aborted(path.display().to_string()));
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, document)?;
    tracing::debug!(path = %path.display(), bytes = document.len(), "document written");
    Ok(WriteOutcome::Written)
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("{} を上書きしますか?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| GovLiftError::Io(std::io::Error::other(e.to_string())))
}

/// 既存ファイルが再生成結果と一致するか確認する
pub fn check_document(path: &Path, document: &str) -> Result<String> {
    let expected = digest(document);
    match file_digest(path)? {
        Some(actual) if actual == expected => Ok(expected),
        Some(actual) => Err(GovLiftError::Stale(format!(
            "{} (現在: {}, 再生成: {})",
            path.display(),
            &actual[..12],
            &expected[..12]
        ))),
        None => Err(GovLiftError::Stale(format!("{} (ファイルなし)", path.display()))),
    }
}
