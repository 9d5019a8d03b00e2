//! Per-turn trace.
//!
//! `Responder::run_with_metrics` records what the engine considered while
//! answering one message: the normalized tokens, the ordered trigger
//! candidates, every pattern attempt and where the reply finally came from.
//! `Responder::run` drops it. These records are public as they stand and
//! reach callers through [`Conversation::reply_verbose`](crate::Conversation::reply_verbose).

use crate::Reply;
use std::time::Duration;

/// Where a turn's reply came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    /// Pattern `pattern` (0-based, within the trigger) of trigger `term`.
    Trigger { term: String, pattern: usize },
    /// A reply stored earlier by a memory pattern.
    Memory,
    /// The first pattern of the `xnone` trigger.
    Fallback,
    /// The message was an exit word.
    Exit,
}

/// Result of trying one pattern against the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The decomposition did not match.
    NoMatch,
    /// Matched a memory pattern; the reply went to the memory bank.
    Stored,
    /// Matched and produced the turn's reply.
    Replied,
    /// Matched but the reassembled reply had no words, so the next trigger
    /// was tried.
    Empty,
}

/// A trigger considered for a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSummary {
    pub term: String,
    pub priority: i32,
}

/// One pattern tried for a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSummary {
    pub term: String,
    /// Index of the pattern within its trigger (0-based).
    pub pattern: usize,
    pub outcome: AttemptOutcome,
}

/// What happened while answering a message.
#[derive(Debug, Clone)]
pub struct TurnDetails {
    /// Tokens after punctuation stripping and pre substitution. Empty for an
    /// exit word.
    pub tokens: Vec<String>,
    /// Triggers in the order they were tried.
    pub candidates: Vec<CandidateSummary>,
    /// Patterns in the order they were tried.
    pub attempts: Vec<AttemptSummary>,
    pub source: ReplySource,
    /// Memory bank size once the turn is over.
    pub memory_len: usize,
    pub elapsed: Duration,
}

impl Default for TurnDetails {
    fn default() -> Self {
        TurnDetails {
            tokens: Vec::new(),
            candidates: Vec::new(),
            attempts: Vec::new(),
            source: ReplySource::Fallback,
            memory_len: 0,
            elapsed: Duration::ZERO,
        }
    }
}

/// A reply bundled with its trace.
#[derive(Debug, Clone)]
pub struct ReplyVerbose {
    pub reply: Reply,
    pub details: TurnDetails,
}
