use dt_core::DialogTreeError;
use dt_runtime::ConversationObserver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    /// Only fire when leaving a node with exactly this text.
    pub node_text: Option<String>,
    pub answer_text: String,
    pub url: String,
}

impl RedirectRule {
    pub fn new(answer_text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            node_text: None,
            answer_text: answer_text.into(),
            url: url.into(),
        }
    }

    pub fn from_node(mut self, node_text: impl Into<String>) -> Self {
        self.node_text = Some(node_text.into());
        self
    }

    /// Parses `ANSWER_TEXT=URL`. Everything after the first `=` is the URL.
    pub fn parse(raw: &str) -> Result<Self, DialogTreeError> {
        let Some((answer, url)) = raw.split_once('=') else {
            return Err(DialogTreeError::state(
                "API_REDIRECT_RULE",
                format!("Redirect rule \"{}\" must look like ANSWER=URL.", raw),
            ));
        };
        let (answer, url) = (answer.trim(), url.trim());
        if answer.is_empty() || url.is_empty() {
            return Err(DialogTreeError::state(
                "API_REDIRECT_RULE",
                format!("Redirect rule \"{}\" has an empty side.", raw),
            ));
        }
        Ok(Self::new(answer, url))
    }

    fn matches(&self, previous_node_text: &str, answer_text: &str) -> bool {
        self.answer_text == answer_text
            && self
                .node_text
                .as_deref()
                .map_or(true, |node_text| node_text == previous_node_text)
    }
}

type Opener = Box<dyn Fn(&str) + Send + Sync>;

/// Observer that hands a URL to `opener` when a chosen answer matches a rule.
/// First matching rule wins.
pub struct RedirectRules {
    rules: Vec<RedirectRule>,
    opener: Opener,
}

impl RedirectRules {
    pub fn new(opener: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            rules: Vec::new(),
            opener: Box::new(opener),
        }
    }

    pub fn with_rule(mut self, rule: RedirectRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }

    pub fn resolve(&self, previous_node_text: &str, answer_text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(previous_node_text, answer_text))
            .map(|rule| rule.url.as_str())
    }
}

impl ConversationObserver for RedirectRules {
    fn on_answer_chosen(&self, previous_node_text: &str, answer_text: &str) {
        if let Some(url) = self.resolve(previous_node_text, answer_text) {
            log::info!("answer \"{}\" redirects to {}", answer_text, url);
            (self.opener)(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn parse_splits_on_first_equals() {
        let rule = RedirectRule::parse("Docs = https://example.com/?a=1").expect("rule");
        assert_eq!(rule.answer_text, "Docs");
        assert_eq!(rule.url, "https://example.com/?a=1");
        assert_eq!(rule.node_text, None);
    }

    #[test]
    fn parse_rejects_malformed_rules() {
        assert_eq!(
            RedirectRule::parse("no separator").expect_err("no =").code,
            "API_REDIRECT_RULE"
        );
        assert!(RedirectRule::parse("=https://x").is_err());
        assert!(RedirectRule::parse("Docs=").is_err());
    }

    #[test]
    fn resolve_respects_node_filter_and_order() {
        let rules = RedirectRules::new(|_| {})
            .with_rule(RedirectRule::new("Help", "https://a").from_node("Menu"))
            .with_rule(RedirectRule::new("Help", "https://b"));
        assert_eq!(rules.resolve("Menu", "Help"), Some("https://a"));
        assert_eq!(rules.resolve("Other", "Help"), Some("https://b"));
        assert_eq!(rules.resolve("Menu", "Quit"), None);
    }

    #[test]
    fn matching_answer_calls_opener() {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = opened.clone();
        let rules = RedirectRules::new(move |url| sink.lock().expect("lock").push(url.to_string()))
            .with_rule(RedirectRule::new("Docs", "https://docs"));

        rules.on_answer_chosen("Menu", "Docs");
        rules.on_answer_chosen("Menu", "Other");
        assert_eq!(*opened.lock().expect("lock"), vec!["https://docs".to_string()]);
    }
}
