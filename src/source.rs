use std::path::Path;

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    extract::EntryShape,
};

/// One wiki category: where its document lives and how its entries are
/// shaped.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySource {
    /// Plural category name (e.g. `events`). This is the category
    /// record's primary key and the stem of its cache file name.
    pub name: String,
    /// Singular noun (e.g. `event`), appended to every child record's
    /// title. It also resolves to the category as an alternate key.
    pub singular: String,
    /// Additional alternate keys for the category.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Human-readable category title (e.g. `Events List`).
    pub label: String,
    /// URL of the raw markdown document.
    pub raw_url: String,
    /// URL of the rendered page; section links point into it.
    pub page_url: String,
    /// Whether entries carry an italicized modifier after the key.
    #[serde(default = "default_true")]
    pub has_modifier: bool,
}

fn default_true() -> bool {
    true
}

impl CategorySource {
    pub fn shape(&self) -> EntryShape {
        if self.has_modifier {
            EntryShape::WithModifier
        } else {
            EntryShape::Plain
        }
    }

    /// File name of the locally cached copy of this category's document.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.name)
    }

    /// Every alternate key of the category record: the singular noun
    /// followed by any configured extras.
    pub fn alternate_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.singular.as_str())
            .chain(self.aliases.iter().map(String::as_str))
    }
}

/// The full set of configured categories.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(rename = "source")]
    pub sources: Vec<CategorySource>,
}

impl SourceConfig {
    /// Load and validate a `sources.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::Config(
                "source configuration defines no categories".into(),
            ));
        }
        for source in &self.sources {
            if source.name.is_empty() || source.singular.is_empty() {
                return Err(Error::Config(
                    "category source has an empty name".into(),
                ));
            }
            if source.raw_url.is_empty() || source.page_url.is_empty() {
                return Err(Error::Config(format!(
                    "category '{}' is missing a document URL",
                    source.name
                )));
            }
        }
        Ok(())
    }

    /// The built-in category set, used when no `sources.toml` is present.
    ///
    /// These are the wiki pages of the BetonQuest quest plugin, one page
    /// per entity kind.
    pub fn builtin() -> Self {
        let wiki = "https://github.com/Co0sh/BetonQuest/wiki";
        let raw = "https://raw.githubusercontent.com/wiki/Co0sh/BetonQuest";
        let source = |name: &str, singular: &str, label: &str, page: &str| {
            CategorySource {
                name: name.to_string(),
                singular: singular.to_string(),
                aliases: Vec::new(),
                label: label.to_string(),
                raw_url: format!("{raw}/{page}.md"),
                page_url: format!("{wiki}/{page}"),
                has_modifier: true,
            }
        };
        let mut sources = vec![
            source("events", "event", "Events List", "Events-List"),
            source(
                "conditions",
                "condition",
                "Conditions List",
                "Conditions-List",
            ),
            source(
                "objectives",
                "objective",
                "Objectives List",
                "Objectives-List",
            ),
            source(
                "variables",
                "variable",
                "Variables List",
                "Variables-List",
            ),
        ];
        // Variable entries have no modifier column.
        sources[3].has_modifier = false;
        Self { sources }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_is_valid() {
        let config = SourceConfig::builtin();
        config.validate().unwrap();
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.sources[0].name, "events");
        assert_eq!(config.sources[0].singular, "event");
        assert_eq!(config.sources[0].shape(), EntryShape::WithModifier);
        assert_eq!(config.sources[3].shape(), EntryShape::Plain);
    }

    #[test]
    fn alternate_keys_start_with_the_singular() {
        let mut source = SourceConfig::builtin().sources.remove(0);
        source.aliases = vec!["happenings".to_string()];
        let keys: Vec<_> = source.alternate_keys().collect();
        assert_eq!(keys, vec!["event", "happenings"]);
    }

    #[test]
    fn load_from_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sources.toml");
        std::fs::write(
            &path,
            r#"
[[source]]
name = "spells"
singular = "spell"
label = "Spells List"
raw_url = "https://example.org/raw/Spells.md"
page_url = "https://example.org/wiki/Spells"

[[source]]
name = "runes"
singular = "rune"
label = "Runes List"
raw_url = "https://example.org/raw/Runes.md"
page_url = "https://example.org/wiki/Runes"
has_modifier = false
"#,
        )
        .unwrap();

        let config = SourceConfig::load(&path).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].file_name(), "spells.md");
        assert!(config.sources[0].has_modifier);
        assert!(!config.sources[1].has_modifier);
        assert!(config.sources[1].aliases.is_empty());
    }

    #[test]
    fn empty_source_list_is_rejected() {
        let config = SourceConfig { sources: vec![] };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn missing_url_is_rejected() {
        let mut config = SourceConfig::builtin();
        config.sources[0].raw_url.clear();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
[[source]]
name = "x"
singular = "x"
label = "X"
raw_url = "u"
page_url = "p"
surprise = true
"#;
        assert!(toml::from_str::<SourceConfig>(toml).is_err());
    }
}
