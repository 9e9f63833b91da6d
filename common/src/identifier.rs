//! ノード識別子の割り当て
//!
//! ラベルからキャメルケースの識別子を作り、1回の変換の中で一意にする。

use regex::Regex;
use std::collections::{HashMap, HashSet};

/// 部分が空だったときの基底名
const FALLBACK_BASE: &str = "Profile";

lazy_static::lazy_static! {
    static ref SEPARATOR_RE: Regex = Regex::new(r"[^0-9A-Za-z]+").unwrap();
}

/// 識別子アロケータ（1回の変換ごとに作り直す）
#[derive(Debug, Clone, Default)]
pub struct IdentifierAllocator {
    seen: HashMap<String, usize>,
    issued: HashSet<String>,
    reserved: HashSet<String>,
    slash_as_or: bool,
}

impl IdentifierAllocator {
    /// # Arguments
    /// * `reserved` - 語彙項目の識別子など、ノードに使えない名前
    /// * `slash_as_or` - `A/B` を `AOrB` として扱う
    pub fn new<I, S>(reserved: I, slash_as_or: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seen: HashMap::new(),
            issued: HashSet::new(),
            reserved: reserved.into_iter().map(Into::into).collect(),
            slash_as_or,
        }
    }

    /// ラベルから一意な識別子を割り当てる
    ///
    /// 同じ基底名の2回目以降は `Base2`, `Base3`, ... になる。
    /// 番号付きの名前が別ラベルで既に使われていれば次の番号に進む。
    pub fn allocate(&mut self, label: &str) -> String {
        let mut base = self.base_name(label);
        if self.reserved.contains(&base) {
            base.push_str(FALLBACK_BASE);
        }
        if base.starts_with(|c: char| c.is_ascii_digit()) {
            base = format!("{}{}", FALLBACK_BASE, base);
        }

        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        let mut id = if *count == 1 {
            base.clone()
        } else {
            format!("{}{}", base, count)
        };
        while self.issued.contains(&id) {
            *count += 1;
            id = format!("{}{}", base, count);
        }

        tracing::debug!(label, id = %id, suffixed = (id != base), "identifier allocated");
        self.issued.insert(id.clone());
        id
    }

    fn base_name(&self, label: &str) -> String {
        let source = if self.slash_as_or {
            label.replace('/', " Or ")
        } else {
            label.to_string()
        };

        let base: String = SEPARATOR_RE
            .split(source.trim())
            .filter(|part| !part.is_empty())
            .map(camel_part)
            .collect();

        if base.is_empty() {
            FALLBACK_BASE.to_string()
        } else {
            base
        }
    }
}

/// 全部大文字（略語）はそのまま、それ以外は先頭だけ大文字・残りは小文字
fn camel_part(part: &str) -> String {
    if is_acronym(part) {
        return part.to_string();
    }
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

/// 英字を1文字以上含み、英字がすべて大文字
fn is_acronym(part: &str) -> bool {
    part.chars().any(|c| c.is_ascii_alphabetic())
        && part.chars().all(|c| !c.is_ascii_lowercase())
}
