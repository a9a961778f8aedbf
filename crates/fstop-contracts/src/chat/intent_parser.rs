use std::collections::BTreeMap;

use serde_json::Value;

use super::command_registry::{
    CommandSpec, COPY_COMMAND, EXPORT_COMMAND, FIELD_COMMANDS, NO_ARG_COMMANDS, RAW_ARG_COMMANDS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub action: String,
    pub raw: String,
    pub scene: Option<String>,
    pub command_args: BTreeMap<String, Value>,
}

impl Intent {
    fn new(action: &str, raw: &str) -> Self {
        Self {
            action: action.to_string(),
            raw: raw.to_string(),
            scene: None,
            command_args: BTreeMap::new(),
        }
    }

    fn with_arg(mut self, key: &str, value: Value) -> Self {
        self.command_args.insert(key.to_string(), value);
        self
    }

    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.command_args.get(key).and_then(Value::as_str)
    }
}

fn find_spec(command: &str, specs: &[CommandSpec]) -> Option<CommandSpec> {
    specs.iter().find(|spec| spec.command == command).copied()
}

fn split_words(arg: &str) -> Vec<String> {
    if arg.trim().is_empty() {
        return Vec::new();
    }
    match shell_words::split(arg) {
        Ok(parts) => parts
            .into_iter()
            .filter(|value| !value.is_empty())
            .collect(),
        Err(_) => arg.split_whitespace().map(str::to_string).collect(),
    }
}

/// First word names the field; the rest of the line is the value verbatim,
/// minus one pair of quotes wrapping all of it.
fn parse_field_args(arg: &str) -> (String, String) {
    let arg = arg.trim();
    let (field, rest) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
    (field.to_string(), unquote(rest.trim()).to_string())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        let inner = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote));
        if let Some(inner) = inner.filter(|inner| !inner.contains(quote)) {
            return inner;
        }
    }
    value
}

fn parse_copy_args(arg: &str) -> (String, Value) {
    let parts = split_words(arg);
    let target = parts
        .first()
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_else(|| "main".to_string());
    let index = parts
        .get(1)
        .and_then(|value| value.parse::<u64>().ok())
        .map(Value::from)
        .unwrap_or(Value::Null);
    (target, index)
}

pub fn parse_intent(text: &str) -> Intent {
    let raw_trimmed = text.trim();
    if raw_trimmed.is_empty() {
        return Intent::new("noop", text);
    }

    if let Some(slash_tail) = raw_trimmed.strip_prefix('/') {
        let command_len = slash_tail
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
            .count();
        if command_len > 0 {
            let command = slash_tail[..command_len].to_ascii_lowercase();
            let arg = slash_tail[command_len..].trim();

            if let Some(spec) = find_spec(&command, RAW_ARG_COMMANDS) {
                return Intent::new(spec.action, text)
                    .with_arg(spec.arg_key, Value::String(arg.to_string()));
            }

            if let Some(spec) = find_spec(&command, FIELD_COMMANDS) {
                let (field, value) = parse_field_args(arg);
                return Intent::new(spec.action, text)
                    .with_arg(spec.arg_key, Value::String(field))
                    .with_arg("value", Value::String(value));
            }

            if let Some(spec) = find_spec(&command, NO_ARG_COMMANDS) {
                return Intent::new(spec.action, text);
            }

            if command == COPY_COMMAND.command {
                let (target, index) = parse_copy_args(arg);
                return Intent::new(COPY_COMMAND.action, text)
                    .with_arg(COPY_COMMAND.arg_key, Value::String(target))
                    .with_arg("index", index);
            }

            if command == EXPORT_COMMAND.command {
                let dir = split_words(arg).join(" ");
                return Intent::new(EXPORT_COMMAND.action, text).with_arg(
                    EXPORT_COMMAND.arg_key,
                    if dir.is_empty() {
                        Value::Null
                    } else {
                        Value::String(dir)
                    },
                );
            }

            return Intent::new("unknown", text)
                .with_arg("command", Value::String(command))
                .with_arg("arg", Value::String(arg.to_string()));
        }
    }

    let mut intent = Intent::new("generate", text);
    intent.scene = Some(raw_trimmed.to_string());
    intent
}
