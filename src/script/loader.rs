//! Line-oriented rule file format.
//!
//! Each non-blank line is `tag: content`; the line is split at its first `:`.
//!
//! ```text
//! initial: hey, what's up?          greeting
//! final:   later!                   farewell
//! quit:    bye                      exit word
//! pre:     im i am                  pre substitution (word, replacement...)
//! post:    my your                  post substitution
//! synon:   sad unhappy blue         synonym class (root, members...)
//! key:     remember 5               trigger (term, optional priority)
//! decomp:  $ * i remember *         pattern; leading `$` = memory pattern
//! reasmb:  do you often think of (2) ?
//! ```
//!
//! Unknown tags are skipped. Errors carry the 1-based line number.

use super::{Script, ScriptBuilder};
use crate::DEFAULT_PRIORITY;
use crate::error::ScriptError;
use std::fs;
use std::path::Path;
use tracing::debug;

impl Script {
    /// Parse a script from rule-file text.
    pub fn parse(text: &str) -> Result<Script, ScriptError> {
        let mut builder = ScriptBuilder::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            apply_line(&mut builder, line)
                .map_err(|source| ScriptError::AtLine { line: index + 1, source: Box::new(source) })?;
        }
        builder.build()
    }

    /// Read and parse a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Script, ScriptError> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|source| ScriptError::Io { path: path.to_path_buf(), source })?;
        Script::parse(&text)
    }
}

fn apply_line(builder: &mut ScriptBuilder, line: &str) -> Result<(), ScriptError> {
    let (tag, content) = line.split_once(':').ok_or_else(|| ScriptError::MalformedLine(line.trim().to_string()))?;
    let (tag, content) = (tag.trim(), content.trim());

    match tag {
        "initial" => {
            builder.greeting(content);
        }
        "final" => {
            builder.farewell(content);
        }
        "quit" => {
            if content.is_empty() {
                return Err(ScriptError::EmptyDirective(tag.to_string()));
            }
            builder.exit_word(content);
        }
        "pre" | "post" | "synon" => {
            let (head, rest) = head_and_rest(tag, content)?;
            match tag {
                "pre" => builder.pre(head, &rest),
                "post" => builder.post(head, &rest),
                _ => builder.synonyms(head, &rest),
            };
        }
        "key" => {
            let (term, rest) = head_and_rest(tag, content)?;
            let priority = match rest.first() {
                Some(value) => value.parse().map_err(|_| ScriptError::InvalidPriority(value.to_string()))?,
                None => DEFAULT_PRIORITY,
            };
            builder.key(term, priority);
        }
        "decomp" => {
            builder.decomp(content)?;
        }
        "reasmb" => {
            builder.reasmb(content)?;
        }
        other => debug!(tag = other, "skipping unknown directive"),
    }
    Ok(())
}

fn head_and_rest<'a>(tag: &str, content: &'a str) -> Result<(&'a str, Vec<&'a str>), ScriptError> {
    let mut words = content.split_whitespace();
    let head = words.next().ok_or_else(|| ScriptError::EmptyDirective(tag.to_string()))?;
    Ok((head, words.collect()))
}
