//! 出力スキーマ定義
//!
//! 述語名・語彙・分類の書き方など、変換パイプラインの差し替え可能な部分を
//! 静的なテーブルとして持つ。組み込みスキーマは2種類:
//! - `governance`: セキュリティ基準・承認プロセス・例外フラグを含む完全版
//! - `datatype`: データ種別中心の簡易版

use crate::error::{Error, Result};
use crate::vocabulary::{
    Vocabulary, DATATYPE_ACCESS_LEVELS, DATATYPE_IDENTIFIABILITY_RISKS, GOVERNANCE_ACCESS_LEVELS,
    GOVERNANCE_IDENTIFIABILITY_RISKS, SECURITY_STANDARDS,
};

/// 値の解釈方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 識別リスク語彙で解決（単一一致）
    IdentifiabilityRisk,
    /// アクセスレベル語彙で解決（最初の一致を正規値とする）
    AccessLevel,
    /// セキュリティ基準語彙で解決（複数一致）
    SecurityStandard,
    /// 承認プロセスの自由記述分類
    ApprovalProcess,
    /// 真偽値（変換できなければリテラル）
    Boolean,
    /// そのままリテラル
    Text,
}

/// 行ラベルと出力述語の対応
#[derive(Debug, Clone, Copy)]
pub struct PropertyField {
    pub label: &'static str,
    pub predicate: &'static str,
    pub kind: FieldKind,
}

/// `rdf:Property` 宣言
#[derive(Debug, Clone, Copy)]
pub struct PropertyDeclaration {
    pub iri: &'static str,
    pub label: &'static str,
    pub comment: &'static str,
}

/// 下位述語の公理（equivalent があれば同値述語も宣言する）
#[derive(Debug, Clone, Copy)]
pub struct SubPropertyAxiom {
    pub property: &'static str,
    pub parent: &'static str,
    pub equivalent: Option<&'static str>,
}

/// 承認プロセスの分類規則（全トークンを含めば一致）
#[derive(Debug, Clone, Copy)]
pub struct ApprovalRule {
    pub tokens: &'static [&'static str],
    pub term: &'static str,
}

/// ノード分類の書き方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassStyle {
    /// `a skos:Concept, sagegov:Data, ...`
    ConceptMembership,
    /// `rdf:type sagegov:AccessProfile` と `rdfs:subClassOf sagegov:Data`
    TypedSubClass,
}

/// 出力スキーマ
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub prefixes: &'static str,
    pub class_block: &'static str,
    /// 出力順の固定された述語一覧
    pub properties: &'static [PropertyField],
    pub access_levels: &'static Vocabulary,
    pub identifiability_risks: &'static Vocabulary,
    pub security_standards: Option<&'static Vocabulary>,
    pub property_declarations: &'static [PropertyDeclaration],
    pub sub_properties: &'static [SubPropertyAxiom],
    /// この値（小文字）の承認プロセスは出力しない
    pub approval_skip: &'static [&'static str],
    pub approval_rules: &'static [ApprovalRule],
    /// None なら例外マーカーを無視
    pub exception_predicate: Option<&'static str>,
    pub access_level_note_predicate: &'static str,
    pub class_style: ClassStyle,
    /// 識別子生成で `/` を ` Or ` に置き換える
    pub slash_as_or: bool,
    /// マーカー行に関係なく Data と AccessProfile の両方に分類するラベル（小文字）
    pub dual_class_labels: &'static [&'static str],
    pub source_note: &'static str,
}

pub const NAMESPACE_PREFIX: &str = "sagegov";

const PREFIX_BLOCK: &str = "@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix dct: <http://purl.org/dc/terms/> .
@prefix sagegov: <https://synapse.org/synbiont/governance/> .
";

const GOVERNANCE_CLASS_BLOCK: &str = r#"
sagegov:AccessProfile rdf:type owl:Class ;
  rdfs:label "Sage governance access profile" ;
  rdfs:comment "Profiles derived from the Sage governance reference spreadsheet." .

sagegov:Data rdf:type owl:Class ;
  rdfs:label "Sage data type" ;
  rdfs:comment "Data classifications referenced in governance policies." ;
  rdfs:subClassOf <http://purl.obolibrary.org/obo/IAO_0000027> .

sagegov:AccessLevel rdf:type owl:Class ;
  rdfs:label "Access level" ;
  rdfs:comment "Permitted usage tiers for Synapse data." .

sagegov:SecurityStandard rdf:type owl:Class ;
  rdfs:label "Security standard" ;
  rdfs:comment "Required technical environment controls for handling data." .

sagegov:AccessProcess
  rdfs:label "Access process" ;
  rdfs:comment "Named procedures used to approve or deny data access." .

sagegov:DataAccessCommitteeApproval rdfs:subClassOf sagegov:AccessProcess ;
  rdfs:label "Data Access Committee approval" ;
  rdfs:comment "Approval performed manually by the Sage Data Access Committee." .

sagegov:SynapseAccountCheck rdfs:subClassOf sagegov:AccessProcess ;
  rdfs:label "Synapse account check" ;
  rdfs:comment "Approval step that only validates the requester has an active Synapse account." .

sagegov:AutomatedClickwrap rdfs:subClassOf sagegov:AccessProcess ;
  rdfs:label "Automated clickwrap" ;
  rdfs:comment "Automatic approval that relies on a click-through agreement." .

sagegov:IdentifiabilityRisk rdf:type owl:Class ;
  rdfs:label "Identifiability risk" ;
  rdfs:comment "Relative likelihood that data could be used to re-identify individuals." .

sagegov:AccessProfileRule rdf:type owl:Class ;
  rdfs:label "Governance rule" ;
  rdfs:comment "Helper class for constraints referenced inside the governance module." ;
  rdfs:isDefinedBy sagegov:AccessProfile ."#;

const DATATYPE_CLASS_BLOCK: &str = r#"
sagegov:AccessProfile a owl:Class ;
  rdfs:label "Sage governance access profile" ;
  rdfs:comment "Profiles derived from the Sage governance reference spreadsheet." .

sagegov:Data a owl:Class ;
  rdfs:label "Sage data type" ;
  rdfs:comment "Data classifications referenced in governance policies." .

sagegov:AccessLevel a owl:Class ;
  rdfs:label "Access level" ;
  rdfs:comment "Permitted usage tiers for Synapse data." .

sagegov:IdentifiabilityRisk a owl:Class ;
  rdfs:label "Identifiability risk" ;
  rdfs:comment "Relative likelihood that data could be used to re-identify individuals." .

sagegov:AccessProfileRule a owl:Class ;
  rdfs:label "Governance rule" ;
  rdfs:comment "Helper class for constraints referenced inside the governance module." ;
  rdfs:isDefinedBy sagegov:AccessProfile ."#;

const SOURCE_NOTE: &str = "reference/DataTypes-brief-Sept2025.xlsx";

const DUAL_CLASS_LABELS: &[&str] = &["hipaa safe harbor"];

/// 行ラベルの並び（両スキーマ共通）と値の種類
macro_rules! property_fields {
    ($($label:literal => $predicate:literal : $kind:ident),* $(,)?) => {
        &[$(PropertyField { label: $label, predicate: $predicate, kind: FieldKind::$kind }),*]
    };
}

const GOVERNANCE_PROPERTIES: &[PropertyField] = property_fields![
    "Identifiability risks" => "sagegov:identifiabilityRisk": IdentifiabilityRisk,
    "Access Level" => "sagegov:accessLevel": AccessLevel,
    "Description" => "dct:description": Text,
    "Capabilities" => "sagegov:capabilities": Text,
    "Examples" => "sagegov:example": Text,
    "Downloadable data" => "sagegov:downloadable": Boolean,
    "Redistribution" => "sagegov:redistributable": Boolean,
    "Affiliation Requirement" => "sagegov:accessPrerequisite": Boolean,
    "Synapse Account" => "sagegov:requireSynapseAccount": Boolean,
    "Human Subjects Training" => "sagegov:requireHumanSubjectsTraining": Boolean,
    "Data Access Request" => "sagegov:requireDataAccessRequest": Boolean,
    "Data Use Certificate Signed by Signing Official" => "sagegov:requireDataUseCertificate": Boolean,
    "General description of research objectives (posted)" => "sagegov:requireResearchObjective": Boolean,
    "Proof of IRB approval" => "sagegov:requireIrbApproval": Boolean,
    "Technical environment security standards" => "sagegov:requireSecurity": SecurityStandard,
    "Approval Process" => "sagegov:approvalProcess": ApprovalProcess,
];

const DATATYPE_PROPERTIES: &[PropertyField] = property_fields![
    "Identifiability risks" => "sagegov:identifiabilityRisk": IdentifiabilityRisk,
    "Access Level" => "sagegov:accessLevel": AccessLevel,
    "Description" => "dct:description": Text,
    "Capabilities" => "sagegov:capabilities": Text,
    "Examples" => "sagegov:example": Text,
    "Downloadable data" => "sagegov:downloadable": Boolean,
    "Redistribution" => "sagegov:redistribution": Boolean,
    "Affiliation Requirement" => "sagegov:affiliationRequirement": Boolean,
    "Synapse Account" => "sagegov:synapseAccountRequirement": Boolean,
    "Human Subjects Training" => "sagegov:humanSubjectsTraining": Boolean,
    "Data Access Request" => "sagegov:dataAccessRequest": Boolean,
    "Data Use Certificate Signed by Signing Official" => "sagegov:dataUseCertificate": Boolean,
    "General description of research objectives (posted)" => "sagegov:researchObjectiveRequirement": Boolean,
    "Proof of IRB approval" => "sagegov:irbApproval": Boolean,
    "Technical environment security standards" => "sagegov:securityRequirements": Text,
    "Approval Process" => "sagegov:approvalProcess": Text,
];

const GOVERNANCE_PROPERTY_DECLARATIONS: &[PropertyDeclaration] = &[
    PropertyDeclaration {
        iri: "sagegov:hasCapability",
        label: "has capability",
        comment: "Generic capability fact derived from the governance reference table.",
    },
    PropertyDeclaration {
        iri: "sagegov:hasAccessPrerequisite",
        label: "has access prerequisite",
        comment: "Prerequisite requirement that must be satisfied before access is granted.",
    },
    PropertyDeclaration {
        iri: "sagegov:allowsException",
        label: "allows exception",
        comment: "Marks requirements that support limited contributor exceptions.",
    },
    PropertyDeclaration {
        iri: "sagegov:approvalProcess",
        label: "approval process",
        comment: "Describes how data access requests are reviewed.",
    },
    PropertyDeclaration {
        iri: "sagegov:requireSynapseAccount",
        label: "require Synapse account",
        comment: "Indicates whether requestors must hold an active Synapse account.",
    },
    PropertyDeclaration {
        iri: "sagegov:recommendedAccessLevel",
        label: "recommended access level",
        comment: "Heuristic access tier recommended by governance reasoning.",
    },
];

macro_rules! prerequisite {
    ($property:literal, $equivalent:literal) => {
        SubPropertyAxiom {
            property: $property,
            parent: "sagegov:hasAccessPrerequisite",
            equivalent: Some($equivalent),
        }
    };
}

const GOVERNANCE_SUB_PROPERTIES: &[SubPropertyAxiom] = &[
    prerequisite!("sagegov:requireHumanSubjectsTraining", "sagegov:humanSubjectsTraining"),
    prerequisite!("sagegov:requireDataAccessRequest", "sagegov:dataAccessRequest"),
    prerequisite!("sagegov:requireDataUseCertificate", "sagegov:dataUseCertificate"),
    prerequisite!("sagegov:requireResearchObjective", "sagegov:researchObjectiveRequirement"),
    prerequisite!("sagegov:requireIrbApproval", "sagegov:irbApproval"),
    prerequisite!("sagegov:requireSecurity", "sagegov:securityRequirements"),
    SubPropertyAxiom {
        property: "sagegov:requireSynapseAccount",
        parent: "sagegov:hasAccessPrerequisite",
        equivalent: None,
    },
];

const GOVERNANCE_APPROVAL_RULES: &[ApprovalRule] = &[
    ApprovalRule { tokens: &["dac"], term: "DataAccessCommitteeApproval" },
    ApprovalRule { tokens: &["automated", "clickwrap"], term: "AutomatedClickwrap" },
    ApprovalRule { tokens: &["synapse", "account"], term: "SynapseAccountCheck" },
];

pub static GOVERNANCE: Schema = Schema {
    name: "governance",
    prefixes: PREFIX_BLOCK,
    class_block: GOVERNANCE_CLASS_BLOCK,
    properties: GOVERNANCE_PROPERTIES,
    access_levels: &GOVERNANCE_ACCESS_LEVELS,
    identifiability_risks: &GOVERNANCE_IDENTIFIABILITY_RISKS,
    security_standards: Some(&SECURITY_STANDARDS),
    property_declarations: GOVERNANCE_PROPERTY_DECLARATIONS,
    sub_properties: GOVERNANCE_SUB_PROPERTIES,
    approval_skip: &["no"],
    approval_rules: GOVERNANCE_APPROVAL_RULES,
    exception_predicate: Some("sagegov:allowsException"),
    access_level_note_predicate: "sagegov:accessLevelNote",
    class_style: ClassStyle::TypedSubClass,
    slash_as_or: true,
    dual_class_labels: DUAL_CLASS_LABELS,
    source_note: SOURCE_NOTE,
};

pub static DATATYPE: Schema = Schema {
    name: "datatype",
    prefixes: PREFIX_BLOCK,
    class_block: DATATYPE_CLASS_BLOCK,
    properties: DATATYPE_PROPERTIES,
    access_levels: &DATATYPE_ACCESS_LEVELS,
    identifiability_risks: &DATATYPE_IDENTIFIABILITY_RISKS,
    security_standards: None,
    property_declarations: &[],
    sub_properties: &[],
    approval_skip: &[],
    approval_rules: &[],
    exception_predicate: None,
    access_level_note_predicate: "sagegov:accessLevelNote",
    class_style: ClassStyle::ConceptMembership,
    slash_as_or: false,
    dual_class_labels: DUAL_CLASS_LABELS,
    source_note: SOURCE_NOTE,
};

impl Schema {
    /// 名前から組み込みスキーマを取得（大文字小文字は無視）
    pub fn by_name(name: &str) -> Result<&'static Schema> {
        match name.trim().to_lowercase().as_str() {
            "governance" | "gov" => Ok(&GOVERNANCE),
            "datatype" | "data-type" => Ok(&DATATYPE),
            _ => Err(Error::UnknownSchema(name.to_string())),
        }
    }

    /// ノード識別子に使えない名前（全語彙の項目識別子）
    pub fn reserved_identifiers(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.access_levels.ids().collect();
        ids.extend(self.identifiability_risks.ids());
        if let Some(security) = self.security_standards {
            ids.extend(security.ids());
        }
        ids
    }

    /// アクセスレベルの述語
    pub fn access_level_predicate(&self) -> &'static str {
        self.properties
            .iter()
            .find(|p| p.kind == FieldKind::AccessLevel)
            .map(|p| p.predicate)
            .unwrap_or("sagegov:accessLevel")
    }

    /// 承認プロセスの自由記述を分類する
    ///
    /// * `None` - 出力しない値（"no" など）
    /// * `Some(Some(term))` - 規則に一致した語彙項目
    /// * `Some(None)` - どの規則にも当たらない（リテラル出力）
    pub fn classify_approval(&self, value: &str) -> Option<Option<&'static str>> {
        let lowered = value.to_lowercase();
        if self.approval_skip.contains(&lowered.as_str()) {
            return None;
        }
        let term = self
            .approval_rules
            .iter()
            .find(|rule| rule.tokens.iter().all(|token| lowered.contains(token)))
            .map(|rule| rule.term);
        Some(term)
    }

    /// 二重分類の対象ラベルか（大文字小文字・空白を無視）
    pub fn is_dual_class_label(&self, label: &str) -> bool {
        let normalized = crate::normalize::normalize_label_text(label).to_lowercase();
        self.dual_class_labels.contains(&normalized.as_str())
    }
}
