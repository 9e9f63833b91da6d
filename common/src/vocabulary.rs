//! 統制語彙
//!
//! アクセスレベル・識別リスク・セキュリティ基準の3語彙を静的に定義し、
//! 自由記述のセル値を語彙項目へ解決する。解決できない値は None を返し、
//! 呼び出し側でリテラルとして出力する。

use crate::normalize::{lookup_key, normalize_text};

/// 語彙項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyTerm {
    /// 識別子（`sagegov:` 以下のローカル名）
    pub id: &'static str,
    /// 表示ラベル
    pub label: &'static str,
    /// 説明
    pub comment: &'static str,
}

/// 語彙項目の宣言スタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermStyle {
    /// `sagegov:T a skos:Concept, sagegov:Class ;`（項目間に空行なし）
    Concept,
    /// `sagegov:T` + `rdfs:subClassOf sagegov:Class ;`
    SubClass,
    /// `sagegov:T rdf:type sagegov:Class ;`
    Typed,
}

/// 複数トークン包含によるキーワード規則（全トークンが含まれれば一致）
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub term: &'static str,
    pub patterns: &'static [&'static [&'static str]],
}

/// 統制語彙
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    /// 語彙クラス名（`AccessLevel` など）
    pub class: &'static str,
    pub terms: &'static [VocabularyTerm],
    pub style: TermStyle,
    /// 空ならラベル照合のみ
    pub keywords: &'static [KeywordRule],
}

impl Vocabulary {
    /// 識別子から項目を取得
    pub fn term(&self, id: &str) -> Option<&'static VocabularyTerm> {
        self.terms.iter().find(|t| t.id == id)
    }

    /// ラベル照合（単一一致）
    ///
    /// 句読点・大文字小文字を無視してラベルと完全一致する最初の項目を返す。
    pub fn resolve(&self, value: &str) -> Option<&'static VocabularyTerm> {
        let key = lookup_key(value);
        if key.is_empty() {
            return None;
        }
        self.terms.iter().find(|t| lookup_key(t.label) == key)
    }

    /// キーワード包含照合（複数一致）
    ///
    /// 1つのセルが複数の基準に一致しうる。返す順序は語彙の定義順。
    pub fn resolve_all(&self, value: &str) -> Vec<&'static VocabularyTerm> {
        let text = normalize_text(value).to_lowercase().replace('/', " ");
        self.keywords
            .iter()
            .filter(|rule| {
                rule.patterns
                    .iter()
                    .any(|tokens| tokens.iter().all(|token| text.contains(token)))
            })
            .filter_map(|rule| self.term(rule.term))
            .collect()
    }

    /// 項目の識別子一覧
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.terms.iter().map(|t| t.id)
    }
}

const IDENTIFIABILITY_RISK_TERMS: &[VocabularyTerm] = &[
    VocabularyTerm {
        id: "LowIdentifiabilityRisk",
        label: "Low",
        comment: "Data has low likelihood of re-identification.",
    },
    VocabularyTerm {
        id: "SomeIdentifiabilityRisk",
        label: "Some risks",
        comment: "Data could, in certain contexts, be used to re-identify individuals.",
    },
    VocabularyTerm {
        id: "HighIdentifiabilityRisk",
        label: "High",
        comment: "Data is likely to re-identify individuals if misused.",
    },
];

const SECURITY_STANDARD_TERMS: &[VocabularyTerm] = &[
    VocabularyTerm {
        id: "NoSecurityStandard",
        label: "No security standard required",
        comment: "No specific technical environment requirements declared.",
    },
    VocabularyTerm {
        id: "NIST800171",
        label: "NIST 800-171",
        comment: "Environment aligned with NIST Special Publication 800-171.",
    },
    VocabularyTerm {
        id: "ISO27001",
        label: "ISO 27001",
        comment: "Environment aligned with the ISO/IEC 27001 information security standard.",
    },
    VocabularyTerm {
        id: "SecureCompliantEnclave",
        label: "Secure compliant enclave",
        comment: "Data must remain inside a secured enclave that satisfies contributor requirements.",
    },
];

const SECURITY_STANDARD_KEYWORDS: &[KeywordRule] = &[
    KeywordRule { term: "NoSecurityStandard", patterns: &[&["no"]] },
    KeywordRule { term: "NIST800171", patterns: &[&["nist", "800", "171"]] },
    KeywordRule { term: "ISO27001", patterns: &[&["iso", "27001"]] },
    KeywordRule { term: "SecureCompliantEnclave", patterns: &[&["secure", "enclave"]] },
];

/// アクセスレベルの項目定義（制限付き階層の識別子だけがスキーマで異なる）
macro_rules! access_level_terms {
    ($restricted:literal) => {
        &[
            VocabularyTerm {
                id: "AnonymousOrOpen",
                label: "Anonymous / Open",
                comment: "Data is usable without registration or affiliation.",
            },
            VocabularyTerm {
                id: "Registered",
                label: "Registered",
                comment: "Data usage requires a Synapse account but not additional governance approvals.",
            },
            VocabularyTerm {
                id: $restricted,
                label: "Restricted / Limited",
                comment: "Data usage limited by contributor-defined contract terms.",
            },
            VocabularyTerm {
                id: "Controlled",
                label: "Controlled",
                comment: "Data potentially re-identifiable and subject to access review.",
            },
            VocabularyTerm {
                id: "Enclave",
                label: "Enclave",
                comment: "Sensitive data that must remain inside a secure compute enclave.",
            },
        ]
    };
}

/// 最も緩いアクセス階層（Data ノードの既定値）
pub const OPEN_ACCESS_TERM: &str = "AnonymousOrOpen";

pub static GOVERNANCE_ACCESS_LEVELS: Vocabulary = Vocabulary {
    class: "AccessLevel",
    terms: access_level_terms!("RestrictedOrLimited"),
    style: TermStyle::SubClass,
    keywords: &[],
};

pub static DATATYPE_ACCESS_LEVELS: Vocabulary = Vocabulary {
    class: "AccessLevel",
    terms: access_level_terms!("RestrictedLimited"),
    style: TermStyle::Concept,
    keywords: &[],
};

pub static GOVERNANCE_IDENTIFIABILITY_RISKS: Vocabulary = Vocabulary {
    class: "IdentifiabilityRisk",
    terms: IDENTIFIABILITY_RISK_TERMS,
    style: TermStyle::SubClass,
    keywords: &[],
};

pub static DATATYPE_IDENTIFIABILITY_RISKS: Vocabulary = Vocabulary {
    class: "IdentifiabilityRisk",
    terms: IDENTIFIABILITY_RISK_TERMS,
    style: TermStyle::Concept,
    keywords: &[],
};

pub static SECURITY_STANDARDS: Vocabulary = Vocabulary {
    class: "SecurityStandard",
    terms: SECURITY_STANDARD_TERMS,
    style: TermStyle::Typed,
    keywords: SECURITY_STANDARD_KEYWORDS,
};
