//! Free-text resolution against an index snapshot.
//!
//! Resolution never fails: a message that matches nothing resolves to the
//! index's fallback record. The scan order is fixed, so identical input
//! against the same snapshot always yields the same record.

use std::sync::Arc;

use serde_json::json;

use crate::{index::Index, record::Record, text_util};

/// Resolve a free-text message to the single best-matching record.
///
/// The message is split into word tokens which are scanned left to right.
/// Tokens whose lowercase form starts with one of `self_names` are skipped
/// (the chat layer uses this to drop its own mention token). The first
/// token found in the index decides the result: a plain record is returned
/// immediately; a category record triggers a second scan of all *other*
/// tokens against the category's children, returning the first child hit
/// or, failing that, the category itself with its synthesized listing.
pub fn resolve(
    text: &str,
    index: &Index,
    self_names: &[String],
) -> Arc<Record> {
    let tokens = text_util::tokenize(text);

    for (i, token) in tokens.iter().enumerate() {
        let word = token.to_lowercase();
        if is_self_name(&word, self_names) {
            continue;
        }
        let Some(record) = index.get(&word) else {
            continue;
        };
        if let Some(category) = record.category() {
            for (j, other) in tokens.iter().enumerate() {
                if j == i {
                    continue;
                }
                let word = other.to_lowercase();
                if is_self_name(&word, self_names) {
                    continue;
                }
                if let Some(child) = category.child(&word) {
                    return Arc::clone(child);
                }
            }
        }
        return Arc::clone(record);
    }

    Arc::clone(index.fallback())
}

fn is_self_name(word: &str, self_names: &[String]) -> bool {
    self_names
        .iter()
        .filter(|name| !name.is_empty())
        .any(|name| word.starts_with(&name.to_lowercase()))
}

/// Print a record for human-readable terminal output.
pub fn format_human(record: &Record) {
    println!("{}", record.title());
    println!("{}", record.body());
    for extra in record.extras() {
        println!("{} {}", extra.label, extra.content);
    }
}

/// Print a record as a single JSON object.
pub fn format_json(record: &Record) {
    let fields: Vec<_> = record
        .extras()
        .iter()
        .map(|e| json!({ "label": e.label, "content": e.content }))
        .collect();
    println!(
        "{}",
        json!({
            "key": record.key(),
            "title": record.title(),
            "body": record.body(),
            "fields": fields,
        })
    );
}
