use clap::{Parser, Subcommand};
use govlift_common::schema::{Schema, DATATYPE, GOVERNANCE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "govlift")]
#[command(about = "ガバナンス参照表（Excel）をTurtleオントロジーに変換するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 参照表をTurtleに変換して保存
    Convert {
        /// 入力Excelファイル（省略時は設定値）
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// ワークシート名
        #[arg(short, long)]
        sheet: Option<String>,

        /// 出力Turtleファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力スキーマ (governance/datatype)
        #[arg(long)]
        schema: Option<SchemaChoice>,

        /// 常にDataとして扱う列番号（複数指定可）
        #[arg(long = "data-column")]
        data_columns: Vec<usize>,

        /// 既存ファイルを確認なしで上書き
        #[arg(short, long)]
        yes: bool,
    },

    /// 収集したプロファイルをJSONで表示
    Inspect {
        /// 入力Excelファイル
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// ワークシート名
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// 出力ファイルが最新か確認（再生成してダイジェスト比較）
    Check {
        /// 入力Excelファイル
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// ワークシート名
        #[arg(short, long)]
        sheet: Option<String>,

        /// 比較対象のTurtleファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力スキーマ (governance/datatype)
        #[arg(long)]
        schema: Option<SchemaChoice>,

        /// 常にDataとして扱う列番号（複数指定可）
        #[arg(long = "data-column")]
        data_columns: Vec<usize>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の入力ファイルを設定
        #[arg(long)]
        set_input: Option<PathBuf>,

        /// 既定のワークシート名を設定
        #[arg(long)]
        set_sheet: Option<String>,

        /// 既定の出力ファイルを設定
        #[arg(long)]
        set_output: Option<PathBuf>,

        /// 既定のスキーマを設定
        #[arg(long)]
        set_schema: Option<SchemaChoice>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 出力スキーマの選択
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaChoice {
    /// セキュリティ基準・承認プロセスを含む完全版（デフォルト）
    #[default]
    Governance,
    /// データ種別中心の簡易版
    Datatype,
}

impl SchemaChoice {
    pub fn schema(&self) -> &'static Schema {
        match self {
            SchemaChoice::Governance => &GOVERNANCE,
            SchemaChoice::Datatype => &DATATYPE,
        }
    }
}

impl std::str::FromStr for SchemaChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "governance" | "gov" => Ok(SchemaChoice::Governance),
            "datatype" | "data-type" => Ok(SchemaChoice::Datatype),
            _ => Err(format!("Unknown schema: {}. Use governance or datatype", s)),
        }
    }
}

impl std::fmt::Display for SchemaChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.schema().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_schema_choice_from_str() {
        assert_eq!("governance".parse::<SchemaChoice>(), Ok(SchemaChoice::Governance));
        assert_eq!("GOV".parse::<SchemaChoice>(), Ok(SchemaChoice::Governance));
        assert_eq!("datatype".parse::<SchemaChoice>(), Ok(SchemaChoice::Datatype));
        assert!("owl".parse::<SchemaChoice>().is_err());
    }

    #[test]
    fn test_schema_choice_display_round_trip() {
        for choice in [SchemaChoice::Governance, SchemaChoice::Datatype] {
            assert_eq!(choice.to_string().parse::<SchemaChoice>(), Ok(choice));
        }
    }

    #[test]
    fn test_parse_convert_args() {
        let cli = Cli::parse_from([
            "govlift",
            "convert",
            "--input",
            "table.xlsx",
            "--schema",
            "datatype",
            "--data-column",
            "3",
            "--data-column",
            "5",
            "-y",
        ]);
        match cli.command {
            Commands::Convert { input, schema, data_columns, yes, .. } => {
                assert_eq!(input, Some(PathBuf::from("table.xlsx")));
                assert_eq!(schema, Some(SchemaChoice::Datatype));
                assert_eq!(data_columns, vec![3, 5]);
                assert!(yes);
            }
            _ => panic!("convert expected"),
        }
    }
}
