//! Trigger selection.
//!
//! A message activates every trigger whose term equals one of its tokens
//! (case-insensitively). Candidates are collected in token order, one per
//! occurring token, so a term mentioned twice is tried twice. The list is
//! then stably sorted by descending priority: among equal priorities the
//! earlier mention goes first.
//!
//! ```text
//! tokens:     [ i , remember , my , dog , my ]
//! triggers:     i(1) remember(5) my(2)    my(2)
//! candidates: [ remember(5), my(2), my(2), i(1) ]
//! ```
//!
//! Repeated candidates matter: each attempt can advance response cursors and
//! store memories again. `Options::dedupe_triggers` keeps only the first
//! mention instead.

use crate::{Script, Trigger};
use std::cmp::Reverse;

/// Triggers named by one message, in the order they will be tried.
#[derive(Debug, Clone)]
pub(crate) struct TriggerScan<'s> {
    pub candidates: Vec<&'s Trigger>,
}

impl<'s> TriggerScan<'s> {
    pub fn scan(tokens: &[String], script: &'s Script, dedupe: bool) -> Self {
        let mut candidates: Vec<&'s Trigger> = Vec::new();
        for token in tokens {
            let Some(trigger) = script.trigger(&token.to_lowercase()) else {
                continue;
            };
            if dedupe && candidates.iter().any(|seen| std::ptr::eq(*seen, trigger)) {
                continue;
            }
            candidates.push(trigger);
        }
        // `sort_by_key` is stable.
        candidates.sort_by_key(|trigger| Reverse(trigger.priority));
        TriggerScan { candidates }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptBuilder;

    fn script() -> Script {
        let mut builder = ScriptBuilder::new();
        for (term, priority) in [("xnone", 1), ("i", 1), ("remember", 5), ("my", 2), ("dog", 2), ("cat", 2)] {
            builder.key(term, priority).decomp("*").unwrap().reasmb(term).unwrap();
        }
        builder.build().unwrap()
    }

    fn terms(scan: &TriggerScan<'_>) -> Vec<String> {
        scan.candidates.iter().map(|t| t.term.clone()).collect()
    }

    #[test]
    fn orders_by_priority_then_mention() {
        let script = script();
        let scan = TriggerScan::scan(&words!["I", "remember", "my", "dog"], &script, false);
        assert_eq!(terms(&scan), words!["remember", "my", "dog", "i"]);
    }

    #[test]
    fn equal_priorities_keep_mention_order() {
        let script = script();
        let scan = TriggerScan::scan(&words!["cat", "and", "dog"], &script, false);
        assert_eq!(terms(&scan), words!["cat", "dog"]);

        let scan = TriggerScan::scan(&words!["dog", "and", "cat"], &script, false);
        assert_eq!(terms(&scan), words!["dog", "cat"]);
    }

    #[test]
    fn repeated_terms_are_enumerated_per_mention() {
        let script = script();
        let scan = TriggerScan::scan(&words!["my", "dog", "MY", "i"], &script, false);
        assert_eq!(terms(&scan), words!["my", "dog", "my", "i"]);
    }

    #[test]
    fn dedupe_keeps_first_mention() {
        let script = script();
        let scan = TriggerScan::scan(&words!["my", "dog", "MY", "i"], &script, true);
        assert_eq!(terms(&scan), words!["my", "dog", "i"]);
    }

    #[test]
    fn no_trigger_words() {
        let script = script();
        assert!(TriggerScan::scan(&words!["nothing", "here"], &script, false).is_empty());
        assert!(TriggerScan::scan(&[], &script, false).is_empty());
    }
}
