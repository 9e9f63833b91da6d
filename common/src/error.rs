//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("No profiles found in the worksheet")]
    NoProfiles,

    #[error("Unknown schema: {0} (governance/datatype)")]
    UnknownSchema(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_profiles() {
        let error = Error::NoProfiles;
        assert_eq!(format!("{}", error), "No profiles found in the worksheet");
    }

    #[test]
    fn test_error_display_unknown_schema() {
        let error = Error::UnknownSchema("owl2".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Unknown schema"));
        assert!(display.contains("owl2"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
