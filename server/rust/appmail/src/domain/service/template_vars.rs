//! テンプレート本文中の変数抽出とプレビュー用コンテキストの生成。

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::entity::EmailContent;

static TEMPLATE_VARS_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\{([ ._\[a-z]*)\}\}").ok());

/// `{{ }}` で囲まれた変数名を出現順に抽出する（重複や空の `{{ }}` はそのまま残す）。
pub fn extract_vars(content: &str) -> Vec<String> {
    let Some(re) = TEMPLATE_VARS_RE.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// ドット区切りの変数名を入れ子のマップに変換する。葉は空のマップになる。
///
/// `["a", "b.c"]` は `{"a": {}, "b": {"c": {}}}` になる。
pub fn vars_to_tree<S: AsRef<str>>(names: &[S]) -> Map<String, Value> {
    let mut tree = Map::new();
    for name in names {
        let mut node = &mut tree;
        for part in name.as_ref().split('.') {
            let entry = node
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(child) = entry else {
                break;
            };
            node = child;
        }
    }
    tree
}

/// 空マップの葉をキー名に f を適用した文字列で置き換える。
pub fn populate<F>(tree: &mut Map<String, Value>, f: &F)
where
    F: Fn(&str) -> String,
{
    for (key, value) in tree.iter_mut() {
        match value {
            Value::Object(child) if child.is_empty() => *value = Value::String(f(key)),
            Value::Object(child) => populate(child, f),
            _ => {}
        }
    }
}

/// 件名・HTML・テキストに現れる変数から、値を大文字のキー名としたプレビュー用コンテキストを作る。
pub fn sample_context(content: &EmailContent) -> Value {
    let mut names = extract_vars(&content.subject);
    names.extend(extract_vars(&content.html_template));
    names.extend(extract_vars(&content.text_template));

    let mut tree = vars_to_tree(&names);
    populate(&mut tree, &|key: &str| key.to_uppercase());
    Value::Object(tree)
}
