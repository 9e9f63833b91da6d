//! セル文字列の正規化
//!
//! - Unicode正規化（NFKC）と前後空白の除去
//! - ラベル比較用の空白圧縮
//! - 出力リテラル用のASCII化（ダイアクリティカルマーク除去）
//! - 真偽値への変換と例外マーカー（`**`）の扱い
//! - 提供者裁量の注記など、読み飛ばすべき定型文の判定

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// 「提供者の裁量で例外あり」を示す末尾マーカー
pub const EXCEPTION_MARKER: &str = "**";

/// 値として扱わない定型注記（引用符除去・小文字化後の形）
const PLACEHOLDER_VALUES: &[&str] = &[
    "** with some exceptions at data contributors discretion",
];

const TRUE_WORDS: &[&str] = &["yes", "y", "true"];
const FALSE_WORDS: &[&str] = &["no", "n", "false"];

lazy_static::lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_KEY_RE: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// NFKC正規化して前後の空白を除去
pub fn normalize_text(value: &str) -> String {
    value.nfkc().collect::<String>().trim().to_string()
}

/// ラベル比較用: 正規化した上で連続空白を1つにまとめる
pub fn normalize_label_text(value: &str) -> String {
    WHITESPACE_RE
        .replace_all(&normalize_text(value), " ")
        .into_owned()
}

/// 出力用: 分解してASCII以外の文字（結合記号など）を落とす
pub fn ascii_text(value: &str) -> String {
    value.nfkd().filter(char::is_ascii).collect()
}

/// 照合キー: 小文字化して英数字以外をすべて除去
///
/// `"Restricted / Limited"` → `"restrictedlimited"`
pub fn lookup_key(value: &str) -> String {
    NON_KEY_RE
        .replace_all(&normalize_text(value).to_lowercase(), "")
        .into_owned()
}

/// 真偽値への変換
///
/// 末尾の例外マーカーを除いてから yes/no 系の語と照合する。
/// どちらにも当たらなければ None（呼び出し側でリテラル扱い）。
pub fn normalize_bool(value: &str) -> Option<bool> {
    let collapsed = normalize_text(value);
    let lowered = collapsed.trim_end_matches('*').trim().to_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// 例外マーカーで終わっているか
pub fn has_exception_marker(value: &str) -> bool {
    value.ends_with(EXCEPTION_MARKER)
}

/// 定型注記（空セル扱い）かどうか
pub fn is_placeholder(value: &str) -> bool {
    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}'))
        .collect();
    let lowered = stripped.to_lowercase();
    PLACEHOLDER_VALUES.contains(&lowered.as_str())
}

/// Turtle用の文字列リテラル（ASCII化してJSON互換のエスケープ）
pub fn literal(value: &str) -> String {
    serde_json::Value::String(ascii_text(&normalize_text(value))).to_string()
}
