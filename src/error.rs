use thiserror::Error;

#[derive(Error, Debug)]
pub enum GovLiftError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ワークシートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("ブック読み込みエラー: {0}")]
    Workbook(String),

    #[error("変換エラー: {0}")]
    Lift(#[from] govlift_common::Error),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("出力ファイルが最新ではありません: {0}")]
    Stale(String),

    #[error("中断しました: {0}")]
    Aborted(String),
}

pub type Result<T> = std::result::Result<T, GovLiftError>;
