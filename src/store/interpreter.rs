// Reads command scripts back into commands and applies them to a snapshot.
use super::path_segments;
use crate::command::Command;
use crate::error::ScriptError;
use serde_json::{Map, Value};

// Runs the whole script against a copy of `snapshot`. Any bad line or failed
// mutation discards the copy, so the caller never sees a half-applied batch.
pub fn run_script(script: &str, snapshot: &Value) -> Option<Value> {
    let commands = match parse_script(script) {
        Ok(commands) => commands,
        Err(e) => {
            log::warn!("Rejected command script: {e}");
            return None;
        }
    };

    let mut updated = snapshot.clone();
    for command in &commands {
        if let Err(e) = apply_command(&mut updated, command) {
            log::warn!("Rejected command script: {e}");
            return None;
        }
    }
    Some(updated)
}

pub fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("//")
        })
        .map(|(index, line)| {
            parse_line(line).map_err(|reason| ScriptError::Syntax {
                line: index + 1,
                reason,
            })
        })
        .collect()
}

fn parse_line(line: &str) -> Result<Command, String> {
    let mut cursor = Cursor::new(line);
    cursor.expect("_.")?;
    let op = cursor.ident();
    cursor.expect("(")?;

    let command = match op {
        "set" => {
            let path = cursor.string()?;
            cursor.expect(",")?;
            let value = cursor.value()?;
            Command::set(&path, value, "")
        }
        "add" => {
            let path = cursor.string()?;
            cursor.expect(",")?;
            let amount = cursor
                .value()?
                .as_i64()
                .ok_or_else(|| "add expects an integer amount".to_string())?;
            Command::add(&path, amount, "")
        }
        "insert" => {
            let path = cursor.string()?;
            cursor.expect(",")?;
            let key = cursor.string()?;
            cursor.expect(",")?;
            let value = cursor.value()?;
            Command::insert(&path, &key, value, "")
        }
        "delete" => {
            let path = cursor.string()?;
            cursor.expect(",")?;
            let key = cursor.string()?;
            Command::delete(&path, &key, "")
        }
        other => return Err(format!("unknown command '{other}'")),
    };

    cursor.expect(")")?;
    cursor.eat(";");
    let note = cursor.comment()?;
    Ok(command.with_note(note))
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Cursor { rest: line }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), String> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(format!("expected '{token}' at '{}'", self.rest))
        }
    }

    fn ident(&mut self) -> &'a str {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(self.rest.len());
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        ident
    }

    // Single-quoted literal, or a double-quoted JSON string.
    fn string(&mut self) -> Result<String, String> {
        self.skip_whitespace();
        if self.rest.starts_with('"') {
            return match self.value()? {
                Value::String(text) => Ok(text),
                other => Err(format!("expected a string, found {other}")),
            };
        }

        let mut chars = self.rest.char_indices();
        match chars.next() {
            Some((_, '\'')) => {}
            _ => return Err(format!("expected a quoted string at '{}'", self.rest)),
        }

        let mut text = String::new();
        while let Some((index, c)) = chars.next() {
            match c {
                '\'' => {
                    self.rest = &self.rest[index + 1..];
                    return Ok(text);
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => text.push('\n'),
                    Some((_, 'r')) => text.push('\r'),
                    Some((_, 't')) => text.push('\t'),
                    Some((_, escaped)) => text.push(escaped),
                    None => break,
                },
                _ => text.push(c),
            }
        }
        Err("unterminated string".to_string())
    }

    // A JSON literal running up to the next top-level ',' or ')'.
    fn value(&mut self) -> Result<Value, String> {
        self.skip_whitespace();
        if self.rest.starts_with('\'') {
            return self.string().map(Value::String);
        }

        let end = value_extent(self.rest).ok_or_else(|| "unterminated value".to_string())?;
        let (literal, rest) = self.rest.split_at(end);
        let value = serde_json::from_str(literal.trim())
            .map_err(|e| format!("invalid value '{}': {e}", literal.trim()))?;
        self.rest = rest;
        Ok(value)
    }

    fn comment(&mut self) -> Result<String, String> {
        self.skip_whitespace();
        if self.rest.is_empty() {
            return Ok(String::new());
        }
        match self.rest.strip_prefix("//") {
            Some(comment) => Ok(comment.trim().to_string()),
            None => Err(format!("unexpected trailing input '{}'", self.rest)),
        }
    }
}

fn value_extent(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.checked_sub(1)?,
            ',' | ')' if depth == 0 => return Some(index),
            _ => {}
        }
    }
    None
}

fn mutation_error(path: &str, reason: impl Into<String>) -> ScriptError {
    ScriptError::Mutation {
        path: path.to_string(),
        reason: reason.into(),
    }
}

// Walks to the mapping at `path`, creating missing mappings on the way.
fn mapping_at<'v>(
    snapshot: &'v mut Value,
    path: &str,
) -> Result<&'v mut Map<String, Value>, ScriptError> {
    let mut node = snapshot;
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    for segment in path_segments(path) {
        let map = node
            .as_object_mut()
            .ok_or_else(|| mutation_error(path, format!("'{segment}' is not inside a mapping")))?;
        node = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    node.as_object_mut()
        .ok_or_else(|| mutation_error(path, "not a mapping"))
}

fn split_leaf(path: &str) -> Result<(String, &str), ScriptError> {
    let segments: Vec<&str> = path_segments(path).collect();
    match segments.split_last() {
        Some((leaf, parents)) => Ok((parents.join("."), *leaf)),
        None => Err(mutation_error(path, "empty path")),
    }
}

pub fn apply_command(snapshot: &mut Value, command: &Command) -> Result<(), ScriptError> {
    match command {
        Command::Set { path, value, .. } => {
            let (parent, leaf) = split_leaf(path)?;
            mapping_at(snapshot, &parent)?.insert(leaf.to_string(), value.clone());
        }
        Command::Add { path, amount, .. } => {
            let (parent, leaf) = split_leaf(path)?;
            let counter = mapping_at(snapshot, &parent)?
                .entry(leaf.to_string())
                .or_insert(Value::from(0));
            let updated = match &*counter {
                Value::Number(number) => match number.as_i64() {
                    Some(current) => current
                        .checked_add(*amount)
                        .map(Value::from)
                        .ok_or_else(|| mutation_error(path, "counter overflow"))?,
                    None => Value::from(number.as_f64().unwrap_or_default() + *amount as f64),
                },
                other => return Err(mutation_error(path, format!("{other} is not a number"))),
            };
            *counter = updated;
        }
        Command::Insert {
            path, key, value, ..
        } => {
            mapping_at(snapshot, path)?.insert(key.clone(), value.clone());
        }
        Command::Delete { path, key, .. } => {
            if super::lookup(snapshot, path).is_some() {
                mapping_at(snapshot, path)?.remove(key);
            }
        }
    }
    Ok(())
}
