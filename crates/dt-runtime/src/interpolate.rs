use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::VariableStore;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\[(\w+)\]").expect("placeholder regex must compile"))
}

/// Replaces every `[identifier]` token with its captured value. Tokens with no
/// captured value are kept verbatim, brackets included.
pub fn interpolate(text: &str, variables: &VariableStore) -> String {
    placeholder_regex()
        .replace_all(text, |captures: &Captures<'_>| {
            match variables.get(&captures[1]) {
                Some(value) => value.to_string(),
                None => captures[0].to_string(),
            }
        })
        .into_owned()
}

/// Distinct placeholder identifiers in `text`, in order of first appearance.
pub fn placeholder_keys(text: &str) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for captures in placeholder_regex().captures_iter(text) {
        let Some(key) = captures.get(1) else {
            continue;
        };
        if !keys.contains(&key.as_str()) {
            keys.push(key.as_str());
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_tokens_is_unchanged() {
        let store = VariableStore::from_iter([("name", "Amy")]);
        assert_eq!(interpolate("Hello there", &store), "Hello there");
        assert_eq!(interpolate("", &store), "");
    }

    #[test]
    fn unknown_tokens_stay_verbatim() {
        assert_eq!(
            interpolate("Hello [name]", &VariableStore::new()),
            "Hello [name]"
        );
    }

    #[test]
    fn known_tokens_are_replaced() {
        let store = VariableStore::from_iter([("name", "Amy")]);
        assert_eq!(interpolate("Hello [name]", &store), "Hello Amy");
    }

    #[test]
    fn repeated_and_mixed_tokens() {
        let store = VariableStore::from_iter([("a", "1"), ("b", "2")]);
        assert_eq!(
            interpolate("[a]+[a]=[b], [c] unknown", &store),
            "1+1=2, [c] unknown"
        );
    }

    #[test]
    fn tokens_are_word_characters_only() {
        let store = VariableStore::from_iter([("Name?", "Amy"), ("first name", "Bea")]);
        assert_eq!(interpolate("Hi [Name?]", &store), "Hi [Name?]");
        assert_eq!(interpolate("Hi [first name]", &store), "Hi [first name]");
        assert_eq!(interpolate("Hi []", &store), "Hi []");
    }

    #[test]
    fn replaced_values_are_not_rescanned() {
        let store = VariableStore::from_iter([("a", "[b]"), ("b", "loop")]);
        assert_eq!(interpolate("[a]", &store), "[b]");
    }

    #[test]
    fn placeholder_keys_are_distinct_and_ordered() {
        assert_eq!(
            placeholder_keys("[b] [a] [b] [not valid] [c_1]"),
            vec!["b", "a", "c_1"]
        );
        assert!(placeholder_keys("no tokens").is_empty());
    }
}
