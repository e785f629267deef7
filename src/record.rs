use std::{
    borrow::Cow,
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// A labeled supplementary field attached to a record, e.g. `("Link:", url)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extra {
    pub label: String,
    pub content: String,
}

/// One indexed knowledge entry.
///
/// A record is identified by a primary key plus any number of alternate
/// keys; all of them resolve to the same record, but only the primary key
/// participates in equality and hashing.
///
/// A record that describes a whole category additionally carries a
/// [`CategoryIndex`] of its children and synthesizes its body as a listing
/// of their keys instead of storing static text.
#[derive(Debug)]
pub struct Record {
    key: String,
    aliases: Vec<String>,
    title: String,
    text: Option<String>,
    extras: Vec<Extra>,
    category: Option<CategoryIndex>,
}

impl Record {
    /// Create a plain record with static body text.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            aliases: Vec::new(),
            title: title.into(),
            text: Some(text.into()),
            extras: Vec::new(),
            category: None,
        }
    }

    /// Create a category record owning the given children.
    ///
    /// `noun` is the plural noun used in the synthesized listing body
    /// ("Here is a list of all known {noun}: ...").
    pub fn new_category(
        title: impl Into<String>,
        key: impl Into<String>,
        noun: impl Into<String>,
        children: Vec<Arc<Record>>,
    ) -> Self {
        Self {
            key: key.into(),
            aliases: Vec::new(),
            title: title.into(),
            text: None,
            extras: Vec::new(),
            category: Some(CategoryIndex::new(noun.into(), children)),
        }
    }

    /// Add alternate keys that resolve to this record.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Attach a supplementary field.
    ///
    /// A field with an empty label or empty content is silently dropped.
    pub fn with_extra(mut self, label: &str, content: &str) -> Self {
        if !label.is_empty() && !content.is_empty() {
            self.extras.push(Extra {
                label: label.to_string(),
                content: content.to_string(),
            });
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The primary key followed by every alternate key.
    pub fn all_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str())
            .chain(self.aliases.iter().map(String::as_str))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The display body.
    ///
    /// Category records synthesize their body on read; plain records
    /// return their stored text.
    pub fn body(&self) -> Cow<'_, str> {
        match &self.category {
            Some(category) => Cow::Owned(category.listing()),
            None => Cow::Borrowed(self.text.as_deref().unwrap_or_default()),
        }
    }

    pub fn extras(&self) -> &[Extra] {
        &self.extras
    }

    pub fn category(&self) -> Option<&CategoryIndex> {
        self.category.as_ref()
    }

    pub fn is_category(&self) -> bool {
        self.category.is_some()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// The nested child index carried by a category record.
#[derive(Debug)]
pub struct CategoryIndex {
    noun: String,
    children: HashMap<String, Arc<Record>>,
    child_keys: Vec<String>,
}

impl CategoryIndex {
    fn new(noun: String, children: Vec<Arc<Record>>) -> Self {
        let mut map = HashMap::new();
        let mut child_keys = Vec::with_capacity(children.len());
        for child in children {
            child_keys.push(child.key().to_string());
            for key in child.all_keys() {
                map.insert(key.to_lowercase(), Arc::clone(&child));
            }
        }
        Self {
            noun,
            children: map,
            child_keys,
        }
    }

    /// Look up a child by any of its keys, case-insensitively.
    pub fn child(&self, key: &str) -> Option<&Arc<Record>> {
        self.children.get(&key.to_lowercase())
    }

    /// The primary keys of all children, in extraction order.
    pub fn child_keys(&self) -> &[String] {
        &self.child_keys
    }

    /// Render the listing body: a lead-in sentence plus the comma-joined
    /// child keys wrapped in a literal block.
    fn listing(&self) -> String {
        format!(
            "Here is a list of all known {}:\n```{}```",
            self.noun,
            self.child_keys.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_primary_key_only() {
        let a = Record::new("First", "one", "same");
        let b = Record::new("Second", "two", "same").with_aliases(["other"]);
        assert_eq!(a, b);

        let c = Record::new("First", "one", "different");
        assert_ne!(a, c);
    }

    #[test]
    fn all_keys_starts_with_primary() {
        let record =
            Record::new("T", "body", "main").with_aliases(["alt1", "alt2"]);
        let keys: Vec<_> = record.all_keys().collect();
        assert_eq!(keys, vec!["main", "alt1", "alt2"]);
    }

    #[test]
    fn plain_record_body_is_stored_text() {
        let record = Record::new("T", "the body", "k");
        assert_eq!(record.body(), "the body");
        assert!(!record.is_category());
    }

    #[test]
    fn empty_extras_are_dropped() {
        let record = Record::new("T", "b", "k")
            .with_extra("", "content")
            .with_extra("Label:", "")
            .with_extra("Kept:", "value");
        assert_eq!(record.extras().len(), 1);
        assert_eq!(record.extras()[0].label, "Kept:");
        assert_eq!(record.extras()[0].content, "value");
    }

    #[test]
    fn extras_keep_attach_order() {
        let record = Record::new("T", "b", "k")
            .with_extra("Attributes:", "static")
            .with_extra("Link:", "https://example.org");
        let labels: Vec<_> =
            record.extras().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Attributes:", "Link:"]);
    }

    #[test]
    fn category_body_lists_child_keys_in_order() {
        let children = vec![
            Arc::new(Record::new("Give Item event", "g", "give")),
            Arc::new(Record::new("Take Item event", "t", "take")),
        ];
        let category =
            Record::new_category("Events List", "event", "events", children);
        assert_eq!(
            category.body(),
            "Here is a list of all known events:\n```give, take```"
        );
    }

    #[test]
    fn empty_category_body_is_lead_in_plus_empty_block() {
        let category =
            Record::new_category("Events List", "event", "events", vec![]);
        assert_eq!(
            category.body(),
            "Here is a list of all known events:\n``````"
        );
    }

    #[test]
    fn category_children_resolve_by_any_key_any_case() {
        let child = Arc::new(
            Record::new("Point variable", "b", "point").with_aliases(["pt"]),
        );
        let category = Record::new_category(
            "Variables List",
            "variable",
            "variables",
            vec![child],
        );
        let index = category.category().unwrap();

        assert!(index.child("point").is_some());
        assert!(index.child("Point").is_some());
        assert!(index.child("PT").is_some());
        assert!(index.child("missing").is_none());

        // Alternate keys do not appear in the listing order.
        assert_eq!(index.child_keys(), ["point"]);
    }

    #[test]
    fn category_child_keys_share_one_instance() {
        let child = Arc::new(
            Record::new("Give Item event", "b", "give").with_aliases(["g"]),
        );
        let category = Record::new_category(
            "Events List",
            "event",
            "events",
            vec![child],
        );
        let index = category.category().unwrap();
        let a = index.child("give").unwrap();
        let b = index.child("g").unwrap();
        assert!(Arc::ptr_eq(a, b));
    }
}
