//! Excelブックの読み込み
//!
//! 指定ワークシートをA1起点のグリッドに変換する。セル値はすべて文字列として扱う。

use crate::error::{GovLiftError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use govlift_common::Grid;
use std::path::Path;

/// ブックを開いてワークシートをグリッドとして読み込む
pub fn load_grid(path: &Path, sheet: &str) -> Result<Grid> {
    if !path.exists() {
        return Err(GovLiftError::FileNotFound(path.display().to_string()));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| GovLiftError::Workbook(e.to_string()))?;

    let names = workbook.sheet_names();
    if !names.iter().any(|name| name == sheet) {
        return Err(GovLiftError::SheetNotFound(format!(
            "{} (候補: {})",
            sheet,
            names.join(", ")
        )));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| GovLiftError::Workbook(e.to_string()))?;

    let grid = range_to_grid(&range);
    tracing::debug!(
        sheet,
        rows = grid.height(),
        cols = grid.width(),
        "worksheet loaded"
    );
    Ok(grid)
}

/// セル範囲をグリッドに変換（範囲の開始位置までを空セルで埋める）
pub fn range_to_grid(range: &Range<Data>) -> Grid {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Option<String>>> = vec![Vec::new(); row_offset];
    for cells in range.rows() {
        let mut row = vec![None; col_offset];
        row.extend(cells.iter().map(cell_text));
        rows.push(row);
    }

    Grid::new(rows)
}

/// セル値の文字列表現（空セル・エラーセルは None）
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        // 整数値の浮動小数は「2.0」ではなく「2」
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some((*f as i64).to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
