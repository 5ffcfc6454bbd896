//! Append-only scrollback of rendered shell lines.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Input,
    Output,
}

/// One rendered line.
///
/// Input entries keep the raw command text next to the formatted echo, so
/// `history` never has to recover it from the prompt-prefixed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbackEntry {
    pub kind: EntryKind,
    pub text: String,
    command: Option<String>,
}

impl ScrollbackEntry {
    pub fn input(prompt: &str, command: &str) -> Self {
        Self {
            kind: EntryKind::Input,
            text: format!("{} $ {}", prompt, command),
            command: Some(command.to_string()),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Output,
            text: text.into(),
            command: None,
        }
    }

    /// Raw command text for input entries.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn is_input(&self) -> bool {
        self.kind == EntryKind::Input
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scrollback {
    entries: Vec<ScrollbackEntry>,
    /// Bumped by every `clear`, so renderers can tell a wipe from no change.
    generation: u64,
}

impl Scrollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, prompt: &str, command: &str) {
        self.entries.push(ScrollbackEntry::input(prompt, command));
    }

    /// Append output, one entry per `\n`-separated line.
    pub fn push_output(&mut self, text: &str) {
        for line in text.split('\n') {
            self.entries.push(ScrollbackEntry::output(line));
        }
    }

    pub fn push_blank(&mut self) {
        self.entries.push(ScrollbackEntry::output(""));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entries(&self) -> &[ScrollbackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw text of every input entry, oldest first.
    pub fn commands(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|entry| entry.command().map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_echo_format() {
        let entry = ScrollbackEntry::input("ada@portfolio:~", "ls -l");
        assert_eq!(entry.text, "ada@portfolio:~ $ ls -l");
        assert_eq!(entry.command(), Some("ls -l"));
        assert!(entry.is_input());
    }

    #[test]
    fn test_push_output_splits_lines() {
        let mut scrollback = Scrollback::new();
        scrollback.push_output("one\ntwo\n");

        let texts: Vec<&str> = scrollback.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", ""]);
    }

    #[test]
    fn test_commands_keep_dollar_signs_intact() {
        let mut scrollback = Scrollback::new();
        scrollback.push_input("u@h:~", "echo a $ b");
        scrollback.push_output("a $ b");
        scrollback.push_input("u@h:~", "");

        assert_eq!(scrollback.commands(), vec!["echo a $ b".to_string(), String::new()]);
    }

    #[test]
    fn test_clear_empties() {
        let mut scrollback = Scrollback::new();
        scrollback.push_input("u@h:~", "help");
        scrollback.push_blank();
        assert_eq!(scrollback.generation(), 0);
        scrollback.clear();
        assert!(scrollback.is_empty());
        assert_eq!(scrollback.generation(), 1);
    }
}
