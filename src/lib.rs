//! Rule-driven conversational response engine.
//!
//! A [`Script`] holds keyword triggers with ranked decomposition patterns and
//! reassembly templates. A [`Conversation`] borrows a script and turns each
//! incoming message into a [`Reply`].
//!
//! ```
//! use rejoinder::{Conversation, Reply, Script};
//!
//! let script = Script::parse(
//!     "key: xnone\n\
//!      decomp: *\n\
//!      reasmb: tell me more\n\
//!      key: sad\n\
//!      decomp: * i am *\n\
//!      reasmb: why are you (2) ?\n",
//! )
//! .unwrap();
//!
//! let mut chat = Conversation::new(&script);
//! assert_eq!(chat.reply("I am so sad"), Reply::Text("why are you so sad ?".into()));
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod script;

pub use api::{
    AttemptOutcome, AttemptSummary, CandidateSummary, Conversation, Options, Reply, ReplySource, ReplyVerbose,
    TurnDetails,
};
pub use error::ScriptError;
pub use script::{Script, ScriptBuilder};

use crate::script::PartMask;

// --- Internal types ---------------------------------------------------------

/// Dense index of a pattern inside its script. Sessions keep one response
/// cursor per id.
pub(crate) type PatternId = usize;

/// Term of the catch-all trigger used when nothing else replies.
pub(crate) const FALLBACK_TERM: &str = "xnone";

/// Priority of a `key:` line without an explicit value.
pub(crate) const DEFAULT_PRIORITY: i32 = 1;

/// One element of a decomposition pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Part {
    /// Matches exactly one token equal to this (lowercased) word.
    Literal(String),
    /// `*`: matches zero or more tokens, recorded as one capture.
    Wildcard,
    /// `@root`: matches one token belonging to the synonym class `root`,
    /// recorded as a single-token capture.
    Synonym(String),
}

/// One element of a reassembly template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TemplateItem {
    Word(String),
    /// `(N)`: splice the N-th capture (1-based).
    Capture(usize),
}

pub(crate) type Template = Vec<TemplateItem>;

/// A decomposition rule together with its reassembly templates.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    pub id: PatternId,
    pub parts: Vec<Part>,
    /// Summary of which part kinds occur in `parts`.
    pub mask: PartMask,
    /// A match is pushed to the memory bank instead of answering.
    pub store_memory: bool,
    /// Never empty once the owning script is built.
    pub responses: Vec<Template>,
}

/// A keyword plus its ordered patterns.
#[derive(Debug, Clone)]
pub(crate) struct Trigger {
    /// Lowercased keyword; unique within a script.
    pub term: String,
    pub priority: i32,
    pub patterns: Vec<Pattern>,
}
