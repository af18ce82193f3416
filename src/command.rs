use serde_json::Value;
use std::fmt;

// One mutation against the variable store, addressed by a dotted key path.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set {
        path: String,
        value: Value,
        note: String,
    },
    Add {
        path: String,
        amount: i64,
        note: String,
    },
    Insert {
        path: String,
        key: String,
        value: Value,
        note: String,
    },
    Delete {
        path: String,
        key: String,
        note: String,
    },
}

impl Command {
    pub fn set(path: &str, value: Value, note: impl Into<String>) -> Self {
        Command::Set {
            path: path.to_string(),
            value,
            note: note.into(),
        }
    }

    pub fn add(path: &str, amount: i64, note: impl Into<String>) -> Self {
        Command::Add {
            path: path.to_string(),
            amount,
            note: note.into(),
        }
    }

    pub fn insert(path: &str, key: &str, value: Value, note: impl Into<String>) -> Self {
        Command::Insert {
            path: path.to_string(),
            key: key.to_string(),
            value,
            note: note.into(),
        }
    }

    pub fn delete(path: &str, key: &str, note: impl Into<String>) -> Self {
        Command::Delete {
            path: path.to_string(),
            key: key.to_string(),
            note: note.into(),
        }
    }

    pub fn note(&self) -> &str {
        match self {
            Command::Set { note, .. }
            | Command::Add { note, .. }
            | Command::Insert { note, .. }
            | Command::Delete { note, .. } => note,
        }
    }

    pub fn with_note(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Command::Set { note, .. }
            | Command::Add { note, .. }
            | Command::Insert { note, .. }
            | Command::Delete { note, .. } => *note = text.into(),
        }
        self
    }

    pub fn is_insert_into(&self, collection: &str) -> bool {
        matches!(self, Command::Insert { path, .. } if path == collection)
    }

    pub fn is_delete_from(&self, collection: &str) -> bool {
        matches!(self, Command::Delete { path, .. } if path == collection)
    }
}

// Single-quoted script literal.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Set { path, value, .. } => write!(f, "_.set({}, {});", quote(path), value)?,
            Command::Add { path, amount, .. } => write!(f, "_.add({}, {});", quote(path), amount)?,
            Command::Insert {
                path, key, value, ..
            } => write!(f, "_.insert({}, {}, {});", quote(path), quote(key), value)?,
            Command::Delete { path, key, .. } => {
                write!(f, "_.delete({}, {});", quote(path), quote(key))?
            }
        }

        let note = self.note();
        if note.is_empty() {
            return Ok(());
        }
        // The comment runs to the end of the line, so it must stay on one.
        let note = note.replace(['\n', '\r'], " ");
        write!(f, " // {note}")
    }
}

// Ordered batch of commands applied to the store in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandScript {
    commands: Vec<Command>,
}

impl CommandScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn inserts_into(&self, collection: &str) -> usize {
        self.commands
            .iter()
            .filter(|command| command.is_insert_into(collection))
            .count()
    }

    pub fn deletes_from(&self, collection: &str) -> usize {
        self.commands
            .iter()
            .filter(|command| command.is_delete_from(collection))
            .count()
    }
}

impl Extend<Command> for CommandScript {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

impl fmt::Display for CommandScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
