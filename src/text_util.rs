use std::sync::LazyLock;

use regex::Regex;

static WORD_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w]+").expect("word-break pattern"));

/// Split a free-text message into word tokens.
///
/// Tokens are the runs of word characters between runs of everything else;
/// empty tokens (e.g. from a leading `@`) are discarded.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD_BREAK.split(text).filter(|t| !t.is_empty()).collect()
}

/// Build a direct URL to a section of a rendered wiki page.
///
/// The anchor is derived GitHub-style from the section title parts:
/// lowercase, strip everything but ASCII alphanumerics and whitespace,
/// then turn each whitespace character into a dash. Empty parts are
/// skipped.
pub fn section_url(base_url: &str, parts: &[&str]) -> String {
    let title = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    format!("{base_url}#{}", anchor_slug(&title))
}

fn anchor_slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("event, give!"), vec!["event", "give"]);
    }

    #[test]
    fn tokenize_drops_empty_leading_token() {
        assert_eq!(tokenize("@Bot event give"), vec!["Bot", "event", "give"]);
    }

    #[test]
    fn tokenize_keeps_underscores() {
        assert_eq!(tokenize("my_key here"), vec!["my_key", "here"]);
    }

    #[test]
    fn tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("?!  ,").is_empty());
    }

    #[test]
    fn section_url_joins_parts() {
        assert_eq!(
            section_url("https://example.org/wiki/Events-List", &[
                "Give Item",
                "give",
                "static"
            ]),
            "https://example.org/wiki/Events-List#give-item-give-static"
        );
    }

    #[test]
    fn section_url_skips_empty_parts() {
        assert_eq!(
            section_url("https://example.org/p", &["Point", "point", ""]),
            "https://example.org/p#point-point"
        );
    }

    #[test]
    fn anchor_slug_strips_symbols() {
        assert_eq!(anchor_slug("Run Command: `command`"), "run-command-command");
    }

    #[test]
    fn anchor_slug_maps_each_whitespace_char() {
        // Two spaces become two dashes, as in GitHub's anchor scheme.
        assert_eq!(anchor_slug("a  b"), "a--b");
    }
}
