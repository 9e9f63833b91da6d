//! Turtle出力
//!
//! 収集したプロファイルを出力ノードに変換し、固定の宣言ブロックと合わせて
//! 1つのTurtle文書にまとめる。
//!
//! ## ノードの組み立て
//! 1. 主ラベル: 「Data Type」の最初の値、なければ「Access Level」の最初の値
//! 2. 残りの「Data Type」値は別名（主ラベルと同じものは除く）
//! 3. 分類: マーカー行・指定列なら Data、それ以外は AccessProfile。
//!    二重分類ラベルは常に両方
//! 4. 述語はスキーマの固定順で出力（値の内容で並べ替えない）
//! 5. Data ノードでアクセスレベルが1つも書かれなければ最も緩い階層を付与
//! 6. 最後に出典を付けて閉じる

use crate::collector::{ProfileBucket, ACCESS_LEVEL_LABEL, DATA_TYPE_LABEL};
use crate::identifier::IdentifierAllocator;
use crate::normalize::{has_exception_marker, literal, normalize_bool, normalize_label_text};
use crate::schema::{ClassStyle, FieldKind, PropertyField, Schema, NAMESPACE_PREFIX};
use crate::vocabulary::{TermStyle, Vocabulary, OPEN_ACCESS_TERM};
use std::collections::BTreeSet;

/// 目的語
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// 語彙項目（ローカル名）
    Term(String),
    /// 文字列リテラル（未エスケープの元テキスト）
    Literal(String),
    Boolean(bool),
}

impl Object {
    fn render(&self) -> String {
        match self {
            Object::Term(id) => format!("{}:{}", NAMESPACE_PREFIX, id),
            Object::Literal(text) => literal(text),
            Object::Boolean(b) => b.to_string(),
        }
    }
}

/// 述語と目的語の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub predicate: String,
    pub object: Object,
}

impl Statement {
    fn new(predicate: &str, object: Object) -> Self {
        Self {
            predicate: predicate.to_string(),
            object,
        }
    }
}

/// ノードの主分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Data,
    AccessProfile,
}

/// ノード分類（dual なら主分類に関係なく両方）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: NodeKind,
    pub dual: bool,
}

impl Classification {
    pub fn is_data(&self) -> bool {
        self.dual || self.kind == NodeKind::Data
    }

    pub fn is_access_profile(&self) -> bool {
        self.dual || self.kind == NodeKind::AccessProfile
    }
}

/// 出力ノード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNode {
    pub id: String,
    pub column: usize,
    pub pref_label: String,
    pub alt_labels: Vec<String>,
    pub classification: Classification,
    pub statements: Vec<Statement>,
}

impl OutputNode {
    /// 述語に一致する文の目的語一覧
    pub fn objects(&self, predicate: &str) -> Vec<&Object> {
        self.statements
            .iter()
            .filter(|s| s.predicate == predicate)
            .map(|s| &s.object)
            .collect()
    }
}

/// 変換オプション
#[derive(Debug, Clone, Default)]
pub struct LiftOptions {
    /// 常に Data として扱う列番号
    pub data_columns: BTreeSet<usize>,
}

/// プロファイルから出力ノードを組み立てる（主ラベルのない列は除外）
pub fn build_nodes(
    profiles: &[ProfileBucket],
    schema: &Schema,
    options: &LiftOptions,
) -> Vec<OutputNode> {
    let mut ids = IdentifierAllocator::new(schema.reserved_identifiers(), schema.slash_as_or);
    profiles
        .iter()
        .filter_map(|profile| build_node(profile, schema, options, &mut ids))
        .collect()
}

fn build_node(
    profile: &ProfileBucket,
    schema: &Schema,
    options: &LiftOptions,
    ids: &mut IdentifierAllocator,
) -> Option<OutputNode> {
    let mut names: Vec<String> = profile
        .values(DATA_TYPE_LABEL)
        .iter()
        .map(|name| normalize_label_text(name))
        .collect();
    if names.is_empty() {
        if let Some(first) = profile.values(ACCESS_LEVEL_LABEL).first() {
            names.push(normalize_label_text(first));
        }
    }
    if names.is_empty() {
        tracing::debug!(column = profile.column, "no primary label; column skipped");
        return None;
    }

    let pref_label = names.remove(0);
    let alt_labels: Vec<String> = names.into_iter().filter(|n| *n != pref_label).collect();
    let id = ids.allocate(&pref_label);

    let is_data = options.data_columns.contains(&profile.column) || profile.has_type_marker();
    let classification = Classification {
        kind: if is_data { NodeKind::Data } else { NodeKind::AccessProfile },
        dual: schema.is_dual_class_label(&pref_label),
    };

    let mut statements = Vec::new();
    let mut wrote_access_level = false;
    for field in schema.properties {
        let values = profile.values(field.label);
        if values.is_empty() {
            continue;
        }
        if field.kind == FieldKind::AccessLevel {
            wrote_access_level = true;
        }
        push_field(&mut statements, schema, field, values);
    }

    if classification.is_data() && !wrote_access_level {
        statements.push(Statement::new(
            schema.access_level_predicate(),
            Object::Term(OPEN_ACCESS_TERM.to_string()),
        ));
    }

    Some(OutputNode {
        id,
        column: profile.column,
        pref_label,
        alt_labels,
        classification,
        statements,
    })
}

/// 1フィールド分の文を追加する
fn push_field(out: &mut Vec<Statement>, schema: &Schema, field: &PropertyField, values: &[String]) {
    let predicate = field.predicate;
    match field.kind {
        FieldKind::AccessLevel => {
            // 最初に解決できた値だけを正規のアクセスレベルにする
            let canonical = values
                .iter()
                .enumerate()
                .find_map(|(idx, v)| schema.access_levels.resolve(v).map(|t| (idx, t.id)));
            match canonical {
                None => {
                    for value in values {
                        out.push(Statement::new(predicate, Object::Literal(value.clone())));
                        push_exception(out, schema, value);
                    }
                }
                Some((canonical_idx, term)) => {
                    out.push(Statement::new(predicate, Object::Term(term.to_string())));
                    push_exception(out, schema, &values[canonical_idx]);
                    for (idx, value) in values.iter().enumerate() {
                        if idx == canonical_idx {
                            continue;
                        }
                        out.push(Statement::new(
                            schema.access_level_note_predicate,
                            Object::Literal(value.clone()),
                        ));
                        push_exception(out, schema, value);
                    }
                }
            }
        }
        FieldKind::IdentifiabilityRisk => {
            for value in values {
                out.push(Statement::new(predicate, resolve_single(schema.identifiability_risks, value)));
                push_exception(out, schema, value);
            }
        }
        FieldKind::SecurityStandard => {
            for value in values {
                let terms = schema
                    .security_standards
                    .map(|v| v.resolve_all(value))
                    .unwrap_or_default();
                if terms.is_empty() {
                    out.push(Statement::new(predicate, Object::Literal(value.clone())));
                } else {
                    for term in terms {
                        out.push(Statement::new(predicate, Object::Term(term.id.to_string())));
                    }
                }
                push_exception(out, schema, value);
            }
        }
        FieldKind::ApprovalProcess => {
            for value in values {
                let object = match schema.classify_approval(value) {
                    None => continue,
                    Some(Some(term)) => Object::Term(term.to_string()),
                    Some(None) => Object::Literal(value.clone()),
                };
                out.push(Statement::new(predicate, object));
                push_exception(out, schema, value);
            }
        }
        FieldKind::Boolean => {
            for value in values {
                let object = match normalize_bool(value) {
                    Some(b) => Object::Boolean(b),
                    None => Object::Literal(value.clone()),
                };
                out.push(Statement::new(predicate, object));
                push_exception(out, schema, value);
            }
        }
        FieldKind::Text => {
            for value in values {
                out.push(Statement::new(predicate, Object::Literal(value.clone())));
                push_exception(out, schema, value);
            }
        }
    }
}

fn resolve_single(vocabulary: &Vocabulary, value: &str) -> Object {
    match vocabulary.resolve(value) {
        Some(term) => Object::Term(term.id.to_string()),
        None => Object::Literal(value.to_string()),
    }
}

/// 例外マーカー付きの値には「例外あり」を併記する
fn push_exception(out: &mut Vec<Statement>, schema: &Schema, value: &str) {
    if let Some(predicate) = schema.exception_predicate {
        if has_exception_marker(value) {
            out.push(Statement::new(predicate, Object::Boolean(true)));
        }
    }
}

/// 最後の ` ;` を ` .` に置き換えてブロックを閉じる
fn close_block(mut lines: Vec<String>) -> String {
    if let Some(last) = lines.last_mut() {
        let trimmed = last.trim_end_matches(" ;").to_string();
        *last = format!("{} .", trimmed);
    }
    lines.join("\n")
}

/// 語彙項目の宣言ブロック
pub fn vocabulary_block(vocabulary: &Vocabulary) -> String {
    let blocks: Vec<String> = vocabulary
        .terms
        .iter()
        .map(|term| {
            let mut lines = match vocabulary.style {
                TermStyle::Concept => vec![format!(
                    "{p}:{} a skos:Concept, {p}:{} ;",
                    term.id,
                    vocabulary.class,
                    p = NAMESPACE_PREFIX
                )],
                TermStyle::SubClass => vec![
                    format!("{}:{}", NAMESPACE_PREFIX, term.id),
                    format!("  rdfs:subClassOf {}:{} ;", NAMESPACE_PREFIX, vocabulary.class),
                ],
                TermStyle::Typed => vec![format!(
                    "{p}:{} rdf:type {p}:{} ;",
                    term.id,
                    vocabulary.class,
                    p = NAMESPACE_PREFIX
                )],
            };
            lines.push(format!("  skos:prefLabel {} ;", literal(term.label)));
            if !term.comment.is_empty() {
                lines.push(format!("  rdfs:comment {} ;", literal(term.comment)));
            }
            close_block(lines)
        })
        .collect();

    let separator = if vocabulary.style == TermStyle::Concept { "\n" } else { "\n\n" };
    blocks.join(separator)
}

/// 述語宣言と下位述語の公理
pub fn property_axioms_block(schema: &Schema) -> String {
    let mut blocks: Vec<String> = schema
        .property_declarations
        .iter()
        .map(|decl| {
            let mut lines = vec![
                format!("{} rdf:type rdf:Property ;", decl.iri),
                format!("  rdfs:label {} ;", literal(decl.label)),
            ];
            if !decl.comment.is_empty() {
                lines.push(format!("  rdfs:comment {} ;", literal(decl.comment)));
            }
            close_block(lines)
        })
        .collect();

    for axiom in schema.sub_properties {
        let block = match axiom.equivalent {
            Some(equivalent) => [
                format!("{} rdf:type rdf:Property ;", axiom.property),
                format!("  rdfs:subPropertyOf {} ;", axiom.parent),
                format!("  owl:equivalentProperty {} .", equivalent),
            ]
            .join("\n"),
            None => format!("{} rdfs:subPropertyOf {} .", axiom.property, axiom.parent),
        };
        blocks.push(block);
    }

    blocks.join("\n\n")
}

/// 1ノード分のブロック
pub fn render_node(node: &OutputNode, schema: &Schema) -> String {
    let subject = format!("{}:{}", NAMESPACE_PREFIX, node.id);
    let class = |name: &str| format!("{}:{}", NAMESPACE_PREFIX, name);
    let mut lines = Vec::new();

    match schema.class_style {
        ClassStyle::ConceptMembership => {
            let mut classes = vec!["skos:Concept".to_string()];
            let (primary, secondary) = match node.classification.kind {
                NodeKind::Data => ("Data", "AccessProfile"),
                NodeKind::AccessProfile => ("AccessProfile", "Data"),
            };
            classes.push(class(primary));
            if node.classification.dual {
                classes.push(class(secondary));
            }
            lines.push(format!("{} a {} ;", subject, classes.join(", ")));
        }
        ClassStyle::TypedSubClass => {
            if node.classification.is_access_profile() {
                lines.push(format!("{} rdf:type {} ;", subject, class("AccessProfile")));
            } else {
                lines.push(subject);
            }
        }
    }

    lines.push(format!("  skos:prefLabel {} ;", literal(&node.pref_label)));
    for alt in &node.alt_labels {
        lines.push(format!("  skos:altLabel {} ;", literal(alt)));
    }
    if schema.class_style == ClassStyle::TypedSubClass && node.classification.is_data() {
        lines.push(format!("  rdfs:subClassOf {} ;", class("Data")));
    }
    for statement in &node.statements {
        lines.push(format!("  {} {} ;", statement.predicate, statement.object.render()));
    }
    lines.push(format!("  dct:source {} .", literal(schema.source_note)));

    lines.join("\n")
}

/// 宣言ブロックとノードブロックを結合して文書にする
pub fn render_document(nodes: &[OutputNode], schema: &Schema) -> String {
    let mut blocks = vec![
        schema.prefixes.trim().to_string(),
        schema.class_block.trim().to_string(),
        vocabulary_block(schema.access_levels),
        vocabulary_block(schema.identifiability_risks),
    ];
    if let Some(security) = schema.security_standards {
        blocks.push(vocabulary_block(security));
    }
    blocks.push(property_axioms_block(schema));
    blocks.retain(|b| !b.trim().is_empty());

    blocks.extend(nodes.iter().map(|node| render_node(node, schema)));

    format!("{}\n", blocks.join("\n\n").trim())
}
