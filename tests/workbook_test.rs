//! Excelブックからの変換テスト
//!
//! rust_xlsxwriterで実ブックを作成し、読み込みから出力までを検証する

use govlift::error::GovLiftError;
use govlift::{lift_workbook, output, source};
use govlift_common::schema::GOVERNANCE;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 参照表に近い構成のブックを作成
fn write_reference_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("DataTypes-brief.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Table").unwrap();

    let rows: &[&[&str]] = &[
        &["Access Level", "Anonymous / Open", "Registered", "Controlled**", ""],
        &["Data Type", "", "", "", "Clinical"],
        &["Identifiability risks", "Low", "Some risks", "High", "High"],
        &["Access Prerequisites", "", "", "", ""],
        &["Synapse Account", "No", "Yes", "Yes**", ""],
        &["Technical environment security standards", "", "", "NIST 800-171 / ISO 27001", ""],
        &["Approval Process", "no", "Synapse account", "DAC", ""],
        &["Data Type", "", "", "", ""],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
    }
    // 2シート目は変換対象外
    workbook.add_worksheet().set_name("Notes").unwrap();
    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_load_grid_from_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_reference_workbook(dir.path());

    let grid = source::load_grid(&path, "Table").unwrap();
    assert_eq!(grid.cell(0, 0), Some("Access Level"));
    assert_eq!(grid.cell(1, 4), Some("Clinical"));
    assert_eq!(grid.cell(1, 1), None);
}

#[test]
fn test_missing_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_reference_workbook(dir.path());

    let result = source::load_grid(&path, "Sheet1");
    match result {
        Err(GovLiftError::SheetNotFound(message)) => {
            assert!(message.contains("Sheet1"));
            assert!(message.contains("Table"));
        }
        other => panic!("SheetNotFound expected: {:?}", other.map(|g| g.height())),
    }
}

#[test]
fn test_lift_workbook_end_to_end() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_reference_workbook(dir.path());

    let report = lift_workbook(&path, "Table", &GOVERNANCE, &[]).unwrap();
    assert_eq!(report.profiles, 4);
    assert_eq!(report.nodes, 4);

    let doc = &report.document;
    assert!(doc.contains("sagegov:AnonymousOrOpenProfile rdf:type sagegov:AccessProfile ;"));
    assert!(doc.contains("sagegov:RegisteredProfile rdf:type sagegov:AccessProfile ;"));
    assert!(doc.contains("sagegov:ControlledProfile rdf:type sagegov:AccessProfile ;"));
    assert!(doc.contains("sagegov:Clinical\n  skos:prefLabel \"Clinical\" ;\n  rdfs:subClassOf sagegov:Data ;"));

    assert!(doc.contains("  sagegov:identifiabilityRisk sagegov:SomeIdentifiabilityRisk ;"));
    assert!(doc.contains("  sagegov:requireSynapseAccount true ;\n  sagegov:allowsException true ;"));
    assert!(doc.contains("  sagegov:approvalProcess sagegov:SynapseAccountCheck ;"));
    assert!(doc.contains("  sagegov:approvalProcess sagegov:DataAccessCommitteeApproval ;"));
    assert!(doc.contains("  sagegov:requireSecurity sagegov:NIST800171 ;\n  sagegov:requireSecurity sagegov:ISO27001 ;"));

    // 見出し行は出力されない
    assert!(!doc.contains("Access Prerequisites"));
}

#[test]
fn test_write_then_check() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_reference_workbook(dir.path());
    let out = dir.path().join("ontology").join("governance.ttl");

    let report = lift_workbook(&path, "Table", &GOVERNANCE, &[]).unwrap();
    let outcome = output::write_document(&out, &report.document, true).unwrap();
    assert_eq!(outcome, output::WriteOutcome::Written);

    // 再変換しても同じ内容
    let again = lift_workbook(&path, "Table", &GOVERNANCE, &[]).unwrap();
    assert!(output::check_document(&out, &again.document).is_ok());
    assert_eq!(
        output::write_document(&out, &again.document, false).unwrap(),
        output::WriteOutcome::Unchanged
    );

    // 指定列を Data 扱いにすると内容が変わる
    let changed = lift_workbook(&path, "Table", &GOVERNANCE, &[1]).unwrap();
    assert!(matches!(
        output::check_document(&out, &changed.document),
        Err(GovLiftError::Stale(_))
    ));
}
