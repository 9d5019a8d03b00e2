//! The knowledge base a conversation runs against.
//!
//! A [`Script`] is the immutable result of loading a rule file (or driving a
//! [`ScriptBuilder`] by hand). It carries:
//!
//! ```text
//! Script
//!   ├─ greetings / farewells / exit words
//!   ├─ pre substitutions   (applied to the whole message before lookup)
//!   ├─ post substitutions  (applied to every captured span)
//!   ├─ synonym classes     (for `@root` pattern parts)
//!   └─ triggers, by term
//!        └─ patterns (ordered)
//!             └─ reassembly templates (ordered, cycled round-robin)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `builder.rs`: accumulates directives, compiles patterns and templates,
//!   and validates the result (`ScriptBuilder::build`).
//! - `loader.rs`: the line-oriented `tag: content` file format on top of the
//!   builder (`Script::parse`, `Script::load`).
//! - `tables.rs`: substitution maps and the synonym table.
//!
//! A script never changes after it is built. All per-conversation state
//! (response cursors, memory bank, RNG) lives in
//! [`Conversation`](crate::Conversation), so one script can serve several
//! independent conversations.

#[path = "script/builder.rs"]
mod builder;
#[path = "script/loader.rs"]
mod loader;
#[path = "script/tables.rs"]
mod tables;

pub use builder::ScriptBuilder;
pub(crate) use builder::PartMask;
pub(crate) use tables::{Substitutions, Synonyms};

use crate::error::ScriptError;
use crate::{FALLBACK_TERM, Trigger};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

const BUNDLED_SCRIPT: &str = include_str!("../scripts/default.script");

/// A validated, immutable knowledge base.
#[derive(Debug, Clone)]
pub struct Script {
    greetings: Vec<String>,
    farewells: Vec<String>,
    /// Lowercased.
    exit_words: Vec<String>,
    pre: Substitutions,
    post: Substitutions,
    synonyms: Synonyms,
    triggers: Vec<Trigger>,
    by_term: HashMap<String, usize>,
    /// Index of the `xnone` trigger in `triggers`.
    fallback: usize,
    pattern_count: usize,
}

impl Script {
    /// Parse the script shipped with the crate.
    pub fn bundled() -> Result<Script, ScriptError> {
        Script::parse(BUNDLED_SCRIPT)
    }

    /// Lines an assistant may open a conversation with.
    pub fn greetings(&self) -> &[String] {
        &self.greetings
    }

    /// Lines an assistant may close a conversation with.
    pub fn farewells(&self) -> &[String] {
        &self.farewells
    }

    /// Messages that end the conversation (lowercased).
    pub fn exit_words(&self) -> &[String] {
        &self.exit_words
    }

    /// Number of distinct trigger terms.
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Number of pattern ids handed out while building, i.e. the size of a
    /// per-session cursor table.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// True when the whole message, case-folded, is one of the exit words.
    ///
    /// No punctuation stripping or trimming is applied: `"bye."` is not
    /// `"bye"`.
    pub fn is_exit(&self, message: &str) -> bool {
        let lower = message.to_lowercase();
        self.exit_words.iter().any(|word| *word == lower)
    }

    /// Pick a greeting uniformly at random.
    pub fn greeting<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.greetings.choose(rng).map(String::as_str)
    }

    /// Pick a farewell uniformly at random.
    pub fn farewell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.farewells.choose(rng).map(String::as_str)
    }

    pub(crate) fn trigger(&self, term: &str) -> Option<&Trigger> {
        self.by_term.get(term).map(|&index| &self.triggers[index])
    }

    pub(crate) fn fallback(&self) -> &Trigger {
        &self.triggers[self.fallback]
    }

    pub(crate) fn pre(&self) -> &Substitutions {
        &self.pre
    }

    pub(crate) fn post(&self) -> &Substitutions {
        &self.post
    }

    pub(crate) fn synonyms(&self) -> &Synonyms {
        &self.synonyms
    }
}
