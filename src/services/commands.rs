use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Empty the transcript and leave a single notice.
    ClearTerminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Display(String),
    Action(CommandAction),
}

/// Local commands, keyed by lowercase name.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: HashMap<String, Command>,
}

impl Default for CommandTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("help", Command::Display("Available commands: help, clear, status".into()));
        table.insert("clear", Command::Action(CommandAction::ClearTerminal));
        table.insert(
            "status",
            Command::Display("System Status: ONLINE | Connection: ACTIVE | Neural Link: STABLE".into()),
        );
        table
    }
}

impl CommandTable {
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    pub fn insert(&mut self, name: &str, command: Command) {
        self.entries.insert(name.trim().to_lowercase(), command);
    }

    pub fn lookup(&self, input: &str) -> Option<&Command> {
        self.entries.get(&input.trim().to_lowercase())
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
