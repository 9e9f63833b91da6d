//! プロファイル収集
//!
//! グリッドの0列目（行ラベル）を下方向に補完しながら、列ごとに
//! 「行ラベル → 値の並び」をまとめる。
//!
//! ## 「Data Type」行の二重定義
//! 元の表は「Data Type」ラベルを縦方向の2か所で使っており、それぞれ意味が違う。
//! 最後の出現だけを見ると列の分類を誤るため、1回目と2回目の行位置を
//! 別々のフラグとして記録する。

use crate::grid::Grid;
use crate::normalize::{is_placeholder, normalize_label_text, normalize_text};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// データ種別を示す行ラベル（表中に2回現れる）
pub const DATA_TYPE_LABEL: &str = "Data Type";

/// アクセスレベルの行ラベル
pub const ACCESS_LEVEL_LABEL: &str = "Access Level";

/// 節見出しとして無視する行ラベル
pub const SECTION_HEADER_LABELS: &[&str] = &[
    "Access Prerequisites",
    "Request Submission and Approval Steps",
];

/// 1列分の収集結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBucket {
    /// 元グリッドの列番号（1以上）
    pub column: usize,
    /// 行ラベルごとの値（行順・重複保持）
    pub fields: BTreeMap<String, Vec<String>>,
    /// 1つ目の「Data Type」行に値がある
    pub primary_type_marker: bool,
    /// 2つ目の「Data Type」行に値がある
    pub secondary_type_marker: bool,
}

impl ProfileBucket {
    /// ラベルの値一覧（なければ空）
    pub fn values(&self, label: &str) -> &[String] {
        self.fields.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// どちらかの「Data Type」行に値がある
    pub fn has_type_marker(&self) -> bool {
        self.primary_type_marker || self.secondary_type_marker
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }
}

/// 行ラベルを下方向に補完する
///
/// 見出し行のラベルも補完対象になるため、見出し直下のラベルなし行も無視される。
pub fn forward_fill_labels(grid: &Grid) -> Vec<Option<String>> {
    let mut current: Option<String> = None;
    (0..grid.height())
        .map(|row| {
            if !grid.is_empty_cell(row, 0) {
                current = grid.cell(row, 0).map(normalize_label_text);
            }
            current.clone()
        })
        .collect()
}

/// グリッドから空でないプロファイルを列順に収集する
pub fn collect_profiles(grid: &Grid) -> Vec<ProfileBucket> {
    let labels = forward_fill_labels(grid);

    let mut marker_rows = labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.as_deref() == Some(DATA_TYPE_LABEL))
        .map(|(row, _)| row);
    let primary_marker_row = marker_rows.next();
    let secondary_marker_row = marker_rows.next();

    let mut profiles = Vec::new();
    for col in 1..grid.width() {
        let mut bucket = ProfileBucket {
            column: col,
            ..Default::default()
        };

        for (row, label) in labels.iter().enumerate() {
            let Some(label) = label else { continue };
            if SECTION_HEADER_LABELS.contains(&label.as_str()) {
                continue;
            }
            let Some(raw) = grid.cell(row, col) else { continue };
            let value = normalize_text(raw);
            if value.is_empty() {
                continue;
            }
            if is_placeholder(&value) {
                tracing::debug!(row, col, "placeholder caveat skipped");
                continue;
            }

            bucket.fields.entry(label.clone()).or_default().push(value);

            if label == DATA_TYPE_LABEL {
                if Some(row) == primary_marker_row {
                    bucket.primary_type_marker = true;
                }
                if Some(row) == secondary_marker_row {
                    bucket.secondary_type_marker = true;
                }
            }
        }

        if bucket.is_empty() {
            tracing::debug!(col, "empty column dropped");
            continue;
        }
        profiles.push(bucket);
    }

    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_fill() {
        let grid = Grid::from_strs(&[
            &["Description", "a"],
            &["", "b"],
            &["Access  Level", "c"],
            &["", "d"],
        ]);
        let labels = forward_fill_labels(&grid);
        assert_eq!(
            labels,
            vec![
                Some("Description".to_string()),
                Some("Description".to_string()),
                Some("Access Level".to_string()),
                Some("Access Level".to_string()),
            ]
        );
    }

    #[test]
    fn test_leading_rows_without_label_are_ignored() {
        let grid = Grid::from_strs(&[&["", "Title"], &["Description", "x"]]);
        let profiles = collect_profiles(&grid);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].fields.len(), 1);
        assert_eq!(profiles[0].values("Description"), &["x".to_string()]);
    }

    #[test]
    fn test_values_keep_row_order_and_duplicates() {
        let grid = Grid::from_strs(&[
            &["Examples", "RNA-seq"],
            &["", "WGS"],
            &["", "RNA-seq"],
        ]);
        let profiles = collect_profiles(&grid);
        assert_eq!(profiles[0].values("Examples"), &["RNA-seq", "WGS", "RNA-seq"]);
    }

    #[test]
    fn test_section_headers_skipped() {
        let grid = Grid::from_strs(&[
            &["Access Prerequisites", "heading text"],
            &["", "still heading"],
            &["Synapse Account", "Yes"],
        ]);
        let profiles = collect_profiles(&grid);
        assert_eq!(profiles.len(), 1);
        assert!(profiles[0].values("Access Prerequisites").is_empty());
        assert_eq!(profiles[0].values("Synapse Account"), &["Yes"]);
    }

    #[test]
    fn test_placeholder_and_empty_columns_dropped() {
        let grid = Grid::from_strs(&[
            &["Access Level", "Open", "", "** with some exceptions at data contributor's discretion"],
            &["Description", "desc", "   ", ""],
        ]);
        let profiles = collect_profiles(&grid);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].column, 1);
    }

    #[test]
    fn test_marker_rows_tracked_separately() {
        let grid = Grid::from_strs(&[
            &["Access Level", "Controlled", "", "Registered"],
            &["Data Type", "", "Genomic", ""],
            &["Description", "tier", "seq", "reg"],
            &["Data Type", "", "", "Survey"],
        ]);
        let profiles = collect_profiles(&grid);
        assert_eq!(profiles.len(), 3);

        assert!(!profiles[0].primary_type_marker);
        assert!(!profiles[0].secondary_type_marker);

        assert!(profiles[1].primary_type_marker);
        assert!(!profiles[1].secondary_type_marker);

        assert!(!profiles[2].primary_type_marker);
        assert!(profiles[2].secondary_type_marker);
        assert!(profiles[2].has_type_marker());
    }

    #[test]
    fn test_marker_rows_follow_forward_fill() {
        // ラベルなし行は直前の「Data Type」を引き継ぐので2つ目のマーカー行になる
        let grid = Grid::from_strs(&[
            &["Data Type", "Clinical", ""],
            &["", "", "Imaging"],
        ]);
        let profiles = collect_profiles(&grid);
        assert!(profiles[0].primary_type_marker);
        assert!(profiles[1].secondary_type_marker);
        assert!(!profiles[1].primary_type_marker);
    }

    #[test]
    fn test_values_are_nfkc_normalized() {
        let grid = Grid::from_strs(&[&["Data Type", "  Ｇｅｎｏｍｉｃ  "]]);
        let profiles = collect_profiles(&grid);
        assert_eq!(profiles[0].values(DATA_TYPE_LABEL), &["Genomic"]);
    }
}
