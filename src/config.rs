use crate::cli::SchemaChoice;
use crate::error::{GovLiftError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: PathBuf,
    pub sheet: String,
    pub output: PathBuf,
    pub schema: String,
    pub data_columns: Vec<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("reference/DataTypes-brief-Sept2025.xlsx"),
            sheet: "Table".into(),
            output: PathBuf::from("ontology/modules/governance_sage_ref.ttl"),
            schema: SchemaChoice::default().to_string(),
            data_columns: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（存在しなければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GovLiftError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("govlift").join("config.json"))
    }

    /// 設定ファイルのスキーマ名を検証して返す
    pub fn schema_choice(&self) -> Result<SchemaChoice> {
        self.schema.parse().map_err(GovLiftError::Config)
    }
}
