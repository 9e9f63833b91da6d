//! govlift - ガバナンス参照表のTurtle変換ツール
//!
//! 変換コアは `govlift_common`、このクレートはCLI・設定・Excel読み込み・出力を担当する。

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod source;

use error::Result;
use govlift_common::{LiftOptions, LiftReport, Schema};
use std::path::Path;

/// Excelブックを読み込んで変換する
pub fn lift_workbook(
    input: &Path,
    sheet: &str,
    schema: &Schema,
    data_columns: &[usize],
) -> Result<LiftReport> {
    let grid = source::load_grid(input, sheet)?;
    let options = LiftOptions {
        data_columns: data_columns.iter().copied().collect(),
    };
    Ok(govlift_common::lift(&grid, schema, &options)?)
}
