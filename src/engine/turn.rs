//! The per-message driver.
//!
//! `Responder` borrows a script and one conversation's `SessionState` for the
//! length of a single turn:
//!
//! ```text
//! exit word? ─▶ Exit
//! normalize ─▶ TriggerScan ─▶ for trigger, for pattern:
//!                                decompose ─▶ post subs ─▶ reassemble
//!                                  memory pattern: store, keep going
//!                                  empty reply:    next trigger
//!                                  otherwise:      reply
//! memory draw ─▶ reply
//! xnone, first pattern, no captures ─▶ reply
//! ```
//!
//! Every path ends in a `Reply`; nothing in a turn can fail.

use super::matcher::decompose;
use super::memory::MemoryBank;
use super::metrics::{AttemptOutcome, AttemptSummary, CandidateSummary, ReplySource, ReplyVerbose, TurnDetails};
use super::normalize::normalize;
use super::reassembly::reassemble;
use super::trigger::TriggerScan;
use crate::{Options, Reply, Script, Trigger};
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, trace};

/// Everything one conversation mutates.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Response cursor per `PatternId`.
    pub cursors: Vec<usize>,
    pub memory: MemoryBank,
    pub rng: StdRng,
}

impl SessionState {
    pub fn new(script: &Script, rng: StdRng) -> Self {
        SessionState { cursors: vec![0; script.pattern_count()], memory: MemoryBank::new(), rng }
    }
}

/// Answers one message.
///
/// Usage: `Responder::new(&script, &mut state, &options).run(message)`.
#[derive(Debug)]
pub struct Responder<'a> {
    script: &'a Script,
    state: &'a mut SessionState,
    dedupe_triggers: bool,
}

impl<'a> Responder<'a> {
    pub fn new(script: &'a Script, state: &'a mut SessionState, options: &Options) -> Self {
        Responder { script, state, dedupe_triggers: options.dedupe_triggers }
    }

    /// Answer `message`, discarding the trace.
    pub fn run(self, message: &str) -> Reply {
        self.run_with_metrics(message).reply
    }

    /// Answer `message` and report what was tried along the way.
    pub fn run_with_metrics(mut self, message: &str) -> ReplyVerbose {
        let start = Instant::now();
        let mut details = TurnDetails::default();

        let reply = self.respond(message, &mut details);

        details.memory_len = self.state.memory.len();
        details.elapsed = start.elapsed();
        ReplyVerbose { reply, details }
    }

    fn respond(&mut self, message: &str, details: &mut TurnDetails) -> Reply {
        let script = self.script;

        // Checked on the raw message, before punctuation is stripped.
        if script.is_exit(message) {
            debug!("exit word received");
            details.source = ReplySource::Exit;
            return Reply::Exit;
        }

        let tokens = normalize(message, script.pre());
        trace!(?tokens, "normalized message");
        details.tokens = tokens.clone();

        let scan = TriggerScan::scan(&tokens, script, self.dedupe_triggers);
        if scan.is_empty() {
            debug!("message names no trigger");
        }
        details.candidates = scan
            .candidates
            .iter()
            .map(|t| CandidateSummary { term: t.term.clone(), priority: t.priority })
            .collect();

        for trigger in &scan.candidates {
            if let Some((pattern, words)) = self.try_trigger(trigger, &tokens, &mut details.attempts) {
                details.source = ReplySource::Trigger { term: trigger.term.clone(), pattern };
                return Reply::Text(words.join(" "));
            }
        }

        if let Some(words) = self.state.memory.draw(&mut self.state.rng) {
            debug!(remaining = self.state.memory.len(), "replying from memory");
            details.source = ReplySource::Memory;
            return Reply::Text(words.join(" "));
        }

        debug!("no trigger replied and memory is empty; using fallback");
        let pattern = &script.fallback().patterns[0];
        details.source = ReplySource::Fallback;
        Reply::Text(reassemble(pattern, &mut self.state.cursors[pattern.id], &[]).join(" "))
    }

    /// Try each pattern of `trigger` in order. Returns the index of the
    /// pattern that answered and its words.
    fn try_trigger(
        &mut self,
        trigger: &Trigger,
        tokens: &[String],
        attempts: &mut Vec<AttemptSummary>,
    ) -> Option<(usize, Vec<String>)> {
        let script = self.script;
        debug!(term = %trigger.term, priority = trigger.priority, "trying trigger");

        for (index, pattern) in trigger.patterns.iter().enumerate() {
            let record = |outcome| AttemptSummary { term: trigger.term.clone(), pattern: index, outcome };

            let Some(spans) = decompose(pattern, tokens, script.synonyms()) else {
                trace!(term = %trigger.term, pattern = index, "no match");
                attempts.push(record(AttemptOutcome::NoMatch));
                continue;
            };

            let captures: Vec<Vec<String>> = spans.iter().map(|span| script.post().apply(span.iter())).collect();
            let words = reassemble(pattern, &mut self.state.cursors[pattern.id], &captures);

            if pattern.store_memory {
                debug!(term = %trigger.term, pattern = index, stored = self.state.memory.len() + 1, "deferring reply to memory");
                self.state.memory.store(words);
                attempts.push(record(AttemptOutcome::Stored));
                continue;
            }

            if words.is_empty() {
                debug!(term = %trigger.term, pattern = index, "reply came out empty; trying next trigger");
                attempts.push(record(AttemptOutcome::Empty));
                return None;
            }

            debug!(term = %trigger.term, pattern = index, "pattern replied");
            attempts.push(record(AttemptOutcome::Replied));
            return Some((index, words));
        }

        None
    }
}
