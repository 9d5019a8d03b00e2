//! Script compilation and validation.
//!
//! `ScriptBuilder` receives the same directives the rule file carries and
//! turns them into the structures the engine runs on:
//!
//! - decomposition text (`* i am @sad *`) becomes a `Vec<Part>` plus a
//!   `PartMask` summarising which kinds of part occur;
//! - reassembly text (`why are you (2) ?`) becomes a `Template`, with `(N)`
//!   tokens pre-parsed into capture references;
//! - every pattern gets a dense `PatternId`, so a conversation can keep its
//!   response cursors in a plain vector.
//!
//! ## Invariants established by `build`
//!
//! - An `xnone` trigger exists.
//! - Every trigger has at least one pattern.
//! - Every pattern has at least one template, so `cursor % responses.len()`
//!   is always defined.

use super::{Script, Substitutions, Synonyms};
use crate::error::ScriptError;
use crate::{FALLBACK_TERM, Part, Pattern, PatternId, Template, TemplateItem, Trigger};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Leading `decomp` token marking a pattern whose matches go to memory.
const STORE_MARKER: &str = "$";

bitflags::bitflags! {
    /// Kinds of part present in a pattern.
    ///
    /// A pattern without `WILDCARD` consumes exactly one token per part, so
    /// the matcher can reject inputs of the wrong length up front. Only
    /// patterns with `SYNONYM` are checked for undeclared classes at build.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub(crate) struct PartMask: u8 {
        const WILDCARD = 1 << 0;
        const SYNONYM  = 1 << 1;
    }
}

/// Incrementally assembles a [`Script`].
///
/// Directive methods mirror the rule-file tags. `key` opens a trigger,
/// `decomp` opens a pattern under the current trigger and `reasmb` adds a
/// template to the current pattern.
///
/// ```
/// use rejoinder::ScriptBuilder;
///
/// let mut builder = ScriptBuilder::new();
/// builder.synonyms("sad", &["unhappy", "blue"]);
/// builder.key("xnone", 1).decomp("*")?.reasmb("go on")?;
/// builder.key("i", 1).decomp("* i am @sad *")?.reasmb("why so (2) ?")?;
/// let script = builder.build()?;
/// assert_eq!(script.trigger_count(), 2);
/// # Ok::<(), rejoinder::ScriptError>(())
/// ```
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    greetings: Vec<String>,
    farewells: Vec<String>,
    exit_words: Vec<String>,
    pre: Substitutions,
    post: Substitutions,
    synonyms: Synonyms,
    triggers: Vec<Trigger>,
    by_term: HashMap<String, usize>,
    current: Option<usize>,
    next_pattern: PatternId,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn greeting(&mut self, text: &str) -> &mut Self {
        self.greetings.push(text.to_string());
        self
    }

    pub fn farewell(&mut self, text: &str) -> &mut Self {
        self.farewells.push(text.to_string());
        self
    }

    /// Add a message that ends the conversation (compared case-insensitively).
    pub fn exit_word(&mut self, text: &str) -> &mut Self {
        self.exit_words.push(text.to_lowercase());
        self
    }

    /// Replace `word` in incoming messages by `replacement`.
    pub fn pre(&mut self, word: &str, replacement: &[&str]) -> &mut Self {
        self.pre.insert(word, replacement);
        self
    }

    /// Replace `word` inside captured spans by `replacement`.
    pub fn post(&mut self, word: &str, replacement: &[&str]) -> &mut Self {
        self.post.insert(word, replacement);
        self
    }

    /// Declare the synonym class `root` (the root is a member too).
    pub fn synonyms(&mut self, root: &str, members: &[&str]) -> &mut Self {
        self.synonyms.insert(root, members);
        self
    }

    /// Open a trigger. Re-declaring a term replaces the earlier trigger.
    pub fn key(&mut self, term: &str, priority: i32) -> &mut Self {
        let term = term.to_lowercase();
        let trigger = Trigger { term: term.clone(), priority, patterns: Vec::new() };
        let index = match self.by_term.get(&term) {
            Some(&index) => {
                warn!(term = %term, "key declared twice; keeping the later declaration");
                self.triggers[index] = trigger;
                index
            }
            None => {
                self.triggers.push(trigger);
                self.by_term.insert(term, self.triggers.len() - 1);
                self.triggers.len() - 1
            }
        };
        self.current = Some(index);
        self
    }

    /// Add a decomposition pattern to the current trigger.
    ///
    /// Words are whitespace-separated; `*` is a wildcard, `@root` a synonym
    /// reference, anything else a literal. A leading `$` marks the pattern as
    /// a memory pattern.
    pub fn decomp(&mut self, content: &str) -> Result<&mut Self, ScriptError> {
        let index = self.current.ok_or(ScriptError::OrphanPattern)?;
        let pattern = Pattern::compile(self.next_pattern, content);
        self.next_pattern += 1;
        self.triggers[index].patterns.push(pattern);
        Ok(self)
    }

    /// Add a reassembly template to the current pattern.
    pub fn reasmb(&mut self, content: &str) -> Result<&mut Self, ScriptError> {
        let pattern = self
            .current
            .and_then(|index| self.triggers[index].patterns.last_mut())
            .ok_or(ScriptError::OrphanTemplate)?;
        pattern.responses.push(compile_template(content));
        Ok(self)
    }

    /// Validate and freeze the script.
    pub fn build(self) -> Result<Script, ScriptError> {
        let fallback = *self.by_term.get(FALLBACK_TERM).ok_or(ScriptError::MissingFallback)?;

        for trigger in &self.triggers {
            if trigger.patterns.is_empty() {
                return Err(ScriptError::EmptyTrigger { term: trigger.term.clone() });
            }
            if let Some(pattern) = trigger.patterns.iter().position(|p| p.responses.is_empty()) {
                return Err(ScriptError::EmptyPattern { term: trigger.term.clone(), pattern });
            }
            for (index, pattern) in trigger.patterns.iter().enumerate() {
                for root in pattern.unknown_classes(&self.synonyms) {
                    warn!(
                        term = %trigger.term,
                        pattern = index,
                        class = root,
                        "pattern names an undeclared synonym class and can never match"
                    );
                }
            }
        }

        debug!(
            triggers = self.triggers.len(),
            patterns = self.next_pattern,
            pre = self.pre.len(),
            post = self.post.len(),
            synonyms = self.synonyms.len(),
            "script built"
        );

        Ok(Script {
            greetings: self.greetings,
            farewells: self.farewells,
            exit_words: self.exit_words,
            pre: self.pre,
            post: self.post,
            synonyms: self.synonyms,
            triggers: self.triggers,
            by_term: self.by_term,
            fallback,
            pattern_count: self.next_pattern,
        })
    }
}

impl Pattern {
    /// Compile decomposition text into a pattern with no templates yet.
    pub(crate) fn compile(id: PatternId, content: &str) -> Pattern {
        let mut words = content.split_whitespace().peekable();
        let store_memory = words.next_if_eq(&STORE_MARKER).is_some();
        let parts: Vec<Part> = words.map(Part::parse).collect();
        let mask = parts.iter().fold(PartMask::empty(), |mask, part| match part {
            Part::Wildcard => mask | PartMask::WILDCARD,
            Part::Synonym(_) => mask | PartMask::SYNONYM,
            Part::Literal(_) => mask,
        });
        Pattern { id, parts, mask, store_memory, responses: Vec::new() }
    }

    /// Roots of `@root` parts that `synonyms` does not declare.
    pub(crate) fn unknown_classes<'p>(&'p self, synonyms: &Synonyms) -> Vec<&'p str> {
        if !self.mask.contains(PartMask::SYNONYM) {
            return Vec::new();
        }
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Synonym(root) if synonyms.class(root).is_none() => Some(root.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Part {
    pub(crate) fn parse(word: &str) -> Part {
        if word == "*" {
            Part::Wildcard
        } else if let Some(root) = word.strip_prefix('@') {
            Part::Synonym(root.to_lowercase())
        } else {
            Part::Literal(word.to_lowercase())
        }
    }
}

/// Split template text into words, recognising `(N)` capture references.
///
/// Only parentheses around ASCII digits form a reference; `(x)`, `()` or
/// `(٣)` stay literal. An index too large for `usize` can never be in range and is kept
/// as `usize::MAX`.
pub(crate) fn compile_template(content: &str) -> Template {
    content
        .split_whitespace()
        .map(|word| match regex!(r"^\(([0-9]+)\)$").captures(word) {
            Some(caps) => TemplateItem::Capture(caps[1].parse().unwrap_or(usize::MAX)),
            None => TemplateItem::Word(word.to_string()),
        })
        .collect()
}
