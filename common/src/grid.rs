//! 入力グリッド
//!
//! 表計算シートを「省略可能なテキストセル」の2次元表として保持する。
//! 0列目が行ラベル、1列目以降が各プロファイル。

use serde::{Deserialize, Serialize};

/// 省略可能なテキストセルの2次元表（読み取り専用）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<String>>>,
    width: usize,
}

impl Grid {
    /// 行のリストからグリッドを作成（行ごとの長さは揃っていなくてよい）
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// 文字列スライスから作成（空文字列は空セル扱い）
    pub fn from_strs(rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_empty() {
                            None
                        } else {
                            Some((*cell).to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    /// 行数
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// 列数（最も長い行に合わせる）
    pub fn width(&self) -> usize {
        self.width
    }

    /// セルの値（範囲外・空セルは None）
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// 空白のみのセルも空として扱う
    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).map_or(true, |v| v.trim().is_empty())
    }
}
