//! Governance Lift Common Library
//!
//! ガバナンス参照表（行 = ポリシー項目、列 = アクセスプロファイル）を
//! 統制語彙つきのTurtle文書に変換する純粋な変換コア。
//! ファイル入出力は呼び出し側（CLI）が担当する。
//!
//! ## 処理フロー
//! 1. `collector`: 行ラベルを補完し、列ごとに値を収集
//! 2. `emitter`: 語彙解決・識別子割り当て・分類を行い、ノードを出力
//! 3. `schema`: 述語や語彙の差し替え可能なテーブル

pub mod collector;
pub mod emitter;
pub mod error;
pub mod grid;
pub mod identifier;
pub mod normalize;
pub mod schema;
pub mod vocabulary;

pub use collector::{collect_profiles, ProfileBucket};
pub use emitter::{build_nodes, render_document, LiftOptions, OutputNode};
pub use error::{Error, Result};
pub use grid::Grid;
pub use identifier::IdentifierAllocator;
pub use schema::Schema;

/// 変換結果
#[derive(Debug, Clone)]
pub struct LiftReport {
    /// Turtle文書
    pub document: String,
    /// 収集した空でないプロファイル数
    pub profiles: usize,
    /// 出力したノード数
    pub nodes: usize,
}

impl LiftReport {
    /// 主ラベルがなく出力されなかったプロファイル数
    pub fn skipped(&self) -> usize {
        self.profiles - self.nodes
    }
}

/// グリッドをTurtle文書に変換する
///
/// 空でないプロファイルが1つもなければ `Error::NoProfiles`。
///
/// # Examples
/// ```
/// use govlift_common::{lift, Grid, LiftOptions, Schema};
///
/// let grid = Grid::from_strs(&[
///     &["Data Type", "Genomic"],
///     &["Access Level", "Controlled"],
/// ]);
/// let schema = Schema::by_name("governance").unwrap();
/// let report = lift(&grid, schema, &LiftOptions::default()).unwrap();
/// assert_eq!(report.nodes, 1);
/// assert!(report.document.contains("sagegov:accessLevel sagegov:Controlled ;"));
/// ```
pub fn lift(grid: &Grid, schema: &Schema, options: &LiftOptions) -> Result<LiftReport> {
    let profiles = collect_profiles(grid);
    if profiles.is_empty() {
        return Err(Error::NoProfiles);
    }

    let nodes = build_nodes(&profiles, schema, options);
    let document = render_document(&nodes, schema);

    let report = LiftReport {
        document,
        profiles: profiles.len(),
        nodes: nodes.len(),
    };
    tracing::info!(
        schema = schema.name,
        profiles = report.profiles,
        nodes = report.nodes,
        skipped = report.skipped(),
        "lift complete"
    );
    Ok(report)
}

/// 収集結果をJSONにする（確認用）
pub fn profiles_to_json(profiles: &[ProfileBucket]) -> Result<String> {
    Ok(serde_json::to_string_pretty(profiles)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_empty_grid_fails() {
        let grid = Grid::from_strs(&[&["Data Type", ""], &["Access Level", ""]]);
        let result = lift(&grid, &schema::GOVERNANCE, &LiftOptions::default());
        assert!(matches!(result, Err(Error::NoProfiles)));
    }

    #[test]
    fn test_lift_reports_skipped() {
        let grid = Grid::from_strs(&[
            &["Data Type", "Genomic", ""],
            &["Description", "seq", "orphan"],
        ]);
        let report = lift(&grid, &schema::GOVERNANCE, &LiftOptions::default()).unwrap();
        assert_eq!(report.profiles, 2);
        assert_eq!(report.nodes, 1);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn test_profiles_to_json() {
        let grid = Grid::from_strs(&[&["Data Type", "Genomic"]]);
        let json = profiles_to_json(&collect_profiles(&grid)).unwrap();
        assert!(json.contains("\"column\": 1"));
        assert!(json.contains("\"primary_type_marker\": true"));
    }
}
