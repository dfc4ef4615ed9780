use dt_core::{LogEntry, Speaker};

/// Append-only transcript in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    entries: Vec<LogEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::bot(text));
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::user(text));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    /// `(speaker, text)` pairs, handy for assertions and plain renderers.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.speaker.as_str(), entry.text.as_str()))
            .collect()
    }

    pub fn count_by(&self, speaker: Speaker) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.speaker == speaker)
            .count()
    }
}

impl<'a> IntoIterator for &'a ConversationLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_append_order() {
        let mut log = ConversationLog::new();
        log.push_bot("Hi");
        log.push_user("Go");
        log.push_bot("Bye");

        assert_eq!(log.pairs(), vec![("bot", "Hi"), ("user", "Go"), ("bot", "Bye")]);
        assert_eq!(log.count_by(Speaker::Bot), 2);
        assert_eq!(log.last(), Some(&LogEntry::bot("Bye")));
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let mut log = ConversationLog::new();
        log.push_bot("Hi");
        let snapshot = log.snapshot();
        log.push_user("later");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
