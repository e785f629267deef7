//! Index assembly and atomic publication.
//!
//! A rebuild produces a complete, immutable [`Index`] value; live lookups
//! keep reading the previously published index until the new one replaces
//! it with a single atomic swap on the [`IndexHandle`]. A published index
//! is never mutated.

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

use crate::{
    extract::{self, Entry},
    record::Record,
    source::CategorySource,
    text_util,
};

/// Reserved key of the always-present fallback help record.
pub const FALLBACK_KEY: &str = "help";

/// The full key→record mapping produced by one rebuild.
#[derive(Debug)]
pub struct Index {
    by_key: HashMap<String, Arc<Record>>,
    fallback: Arc<Record>,
}

impl Index {
    /// Build a fresh index from one document per category.
    ///
    /// Every category's document is scanned for entries; each entry
    /// becomes a child record, the children are wrapped into one category
    /// record, and every record is inserted under each of its lowercased
    /// keys. Categories are processed in order, so an identical key in a
    /// later category overwrites the earlier mapping.
    pub fn build(categories: &[(CategorySource, String)]) -> Self {
        let fallback = Arc::new(fallback_record());
        let mut by_key = HashMap::new();
        insert_record(&mut by_key, &fallback);

        for (source, document) in categories {
            let children: Vec<Arc<Record>> =
                extract::extract(document, source.shape())
                    .map(|entry| Arc::new(child_record(source, entry)))
                    .collect();

            for child in &children {
                insert_record(&mut by_key, child);
            }

            let category = Arc::new(
                Record::new_category(
                    &source.label,
                    &source.name,
                    &source.name,
                    children,
                )
                .with_aliases(source.alternate_keys())
                .with_extra("Link:", &source.page_url),
            );
            insert_record(&mut by_key, &category);
        }

        Self { by_key, fallback }
    }

    /// Look up a record by any of its keys, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&Arc<Record>> {
        self.by_key.get(&key.to_lowercase())
    }

    /// The record returned when nothing in a message matches.
    pub fn fallback(&self) -> &Arc<Record> {
        &self.fallback
    }

    /// Number of distinct keys in the index.
    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }
}

fn insert_record(map: &mut HashMap<String, Arc<Record>>, record: &Arc<Record>) {
    for key in record.all_keys() {
        map.insert(key.to_lowercase(), Arc::clone(record));
    }
}

/// Build one child record from an extracted entry.
///
/// The title gets the category noun appended ("Give Item" → "Give Item
/// event"); the modifier, when present, becomes an "Attributes:" field;
/// every child gets a "Link:" field pointing at its section of the
/// rendered page.
fn child_record(source: &CategorySource, entry: Entry) -> Record {
    let link = text_util::section_url(&source.page_url, &[
        entry.title.as_str(),
        entry.key.as_str(),
        entry.modifier.as_deref().unwrap_or(""),
    ]);
    Record::new(
        format!("{} {}", entry.title, source.singular),
        entry.text,
        entry.key,
    )
    .with_extra("Attributes:", entry.modifier.as_deref().unwrap_or(""))
    .with_extra("Link:", &link)
}

fn fallback_record() -> Record {
    Record::new(
        "Need help?",
        "This service knows the descriptions of every indexed entity.\n\
         Ask for a category together with the name of what you are looking \
         for, for example: `event message`.\n\
         A category on its own lists everything it knows, so `events` \
         prints every known event.\n\
         If nothing in your message matches, you get this text again.",
        FALLBACK_KEY,
    )
}

/// The currently published index.
///
/// Lookups load the current snapshot lock-free; a finished rebuild
/// publishes its index with one atomic swap. In-flight lookups keep the
/// snapshot they loaded alive until they drop it.
#[derive(Debug)]
pub struct IndexHandle {
    current: ArcSwap<Index>,
}

impl IndexHandle {
    pub fn new(initial: Index) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// The most recently published index snapshot.
    pub fn load(&self) -> Arc<Index> {
        self.current.load_full()
    }

    /// Replace the published index.
    pub fn publish(&self, next: Index) {
        self.current.store(Arc::new(next));
    }
}
