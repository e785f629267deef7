//! Pattern-based extraction of entity entries from one wiki document.
//!
//! A document is a markdown-like page where every entry starts at a `##`
//! heading of the form ``## Title: `key` _modifier_`` and runs until the
//! next heading. Extraction scans for every non-overlapping match and
//! yields the entries lazily, in document order. A document with no
//! matches is simply an empty sequence.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Entry heading followed by an optional italicized modifier, then all
/// subsequent non-heading lines as the body.
static WITH_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*##[ \t]+([^:\n]+)[ \t]*:[ \t]*`([^`\n]+)`[ \t]*(_[^\n]+_)?[ \t\n]*((?:\n?[ \t]*[^\n#]*)+)$",
    )
    .expect("entry pattern with modifier")
});

/// Same shape without the modifier group.
static PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*##[ \t]+([^:\n]+)[ \t]*:[ \t]*`([^`\n]+)`[ \t\n]*((?:\n?[ \t]*[^\n#]*)+)$",
    )
    .expect("plain entry pattern")
});

/// Which entry shape a category's document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    /// Entries may carry an `_italicized_` modifier after the key.
    WithModifier,
    /// Entries are `title: key` only.
    Plain,
}

/// One extracted entry. Transient: consumed immediately by the index
/// builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub key: String,
    pub modifier: Option<String>,
    pub text: String,
}

impl Entry {
    fn from_captures(caps: &Captures<'_>, shape: EntryShape) -> Self {
        let title = caps[1].trim_end().to_string();
        let key = caps[2].to_string();
        let (modifier, text) = match shape {
            EntryShape::WithModifier => (
                caps.get(3).map(|m| m.as_str().trim_matches('_').to_string()),
                &caps[4],
            ),
            EntryShape::Plain => (None, &caps[3]),
        };
        Self {
            title,
            key,
            modifier,
            text: text.trim_end().to_string(),
        }
    }
}

/// Scan `document` for every entry of the given shape, in document order.
pub fn extract(
    document: &str,
    shape: EntryShape,
) -> impl Iterator<Item = Entry> + '_ {
    let pattern = match shape {
        EntryShape::WithModifier => &*WITH_MODIFIER,
        EntryShape::Plain => &*PLAIN,
    };
    pattern
        .captures_iter(document)
        .map(move |caps| Entry::from_captures(&caps, shape))
}
