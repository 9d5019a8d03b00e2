//! Decomposition matching.
//!
//! A pattern is matched against the whole token sequence. Each wildcard and
//! synonym part yields one capture, in pattern order; literals yield none.
//! Templates refer to captures by that 1-based position.
//!
//! ```text
//! parts:    [ *      , i , am , @sad     , *       ]
//! tokens:   [ Well   , I , am , unhappy  , today   ]
//! captures: [ [Well] ,          [unhappy], [today] ]
//!              (1)                 (2)       (3)
//! ```
//!
//! Wildcards are greedy: every split is tried from the longest prefix down to
//! the empty one, and the first split that lets the rest of the pattern match
//! wins. Once the tokens run out, only a single trailing `*` may remain, so
//! `i am * *` does not match `i am`.
//!
//! The recursion never mutates shared state. Each successful branch returns
//! its own capture list, built from the tail backwards (a level appends its
//! capture after the rest of the pattern has matched), and `decompose`
//! reverses it once at the top.

use crate::script::{PartMask, Synonyms};
use crate::{Part, Pattern};

/// One captured span, borrowed from the token sequence.
pub(crate) type Capture<'t> = &'t [String];

/// Match `pattern` against `tokens`, returning captures in pattern order.
pub(crate) fn decompose<'t>(pattern: &Pattern, tokens: &'t [String], synonyms: &Synonyms) -> Option<Vec<Capture<'t>>> {
    // Without a wildcard every part consumes exactly one token.
    if !pattern.mask.contains(PartMask::WILDCARD) && pattern.parts.len() != tokens.len() {
        return None;
    }
    let mut captures = match_parts(&pattern.parts, tokens, synonyms)?;
    captures.reverse();
    Some(captures)
}

/// Returns captures in reverse pattern order.
fn match_parts<'t>(parts: &[Part], tokens: &'t [String], synonyms: &Synonyms) -> Option<Vec<Capture<'t>>> {
    let Some((first, rest)) = parts.split_first() else {
        return tokens.is_empty().then(Vec::new);
    };
    if tokens.is_empty() && !matches!(parts, [Part::Wildcard]) {
        return None;
    }

    match first {
        Part::Wildcard => (0..=tokens.len()).rev().find_map(|taken| {
            let mut captures = match_parts(rest, &tokens[taken..], synonyms)?;
            captures.push(&tokens[..taken]);
            Some(captures)
        }),
        Part::Synonym(root) => {
            let (token, remaining) = tokens.split_first()?;
            if !synonyms.is_member(root, token) {
                return None;
            }
            let mut captures = match_parts(rest, remaining, synonyms)?;
            captures.push(&tokens[..1]);
            Some(captures)
        }
        Part::Literal(word) => {
            let (token, remaining) = tokens.split_first()?;
            if token.to_lowercase() != *word {
                return None;
            }
            match_parts(rest, remaining, synonyms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synonyms() -> Synonyms {
        let mut synonyms = Synonyms::default();
        synonyms.insert("sad", &["unhappy", "blue"]);
        synonyms
    }

    fn matches(decomp: &str, tokens: &[String]) -> Option<Vec<Vec<String>>> {
        let pattern = Pattern::compile(0, decomp);
        decompose(&pattern, tokens, &synonyms()).map(|caps| caps.into_iter().map(|c| c.to_vec()).collect())
    }

    #[test]
    fn literals_match_token_for_token_ignoring_case() {
        assert_eq!(matches("hello there", &words!["Hello", "THERE"]), Some(vec![]));
        assert_eq!(matches("hello there", &words!["hello"]), None);
        assert_eq!(matches("hello there", &words!["hello", "there", "friend"]), None);
        assert_eq!(matches("hello there", &words!["hello", "where"]), None);
        assert_eq!(matches("", &words![]), Some(vec![]));
        assert_eq!(matches("", &words!["hi"]), None);
    }

    #[test]
    fn wildcard_is_greedy() {
        let caps = matches("* bar", &words!["foo", "bar", "bar"]).unwrap();
        assert_eq!(caps, vec![words!["foo", "bar"]]);
    }

    #[test]
    fn wildcard_backtracks_until_rest_matches() {
        let caps = matches("* i am *", &words!["well", "i", "am", "so", "tired"]).unwrap();
        assert_eq!(caps, vec![words!["well"], words!["so", "tired"]]);
    }

    #[test]
    fn leading_wildcard_takes_everything_before_last_anchor() {
        let caps = matches("* you * me", &words!["you", "like", "you", "hate", "me"]).unwrap();
        assert_eq!(caps, vec![words!["you", "like"], words!["hate"]]);
    }

    #[test]
    fn wildcards_match_empty_spans() {
        assert_eq!(matches("*", &words![]), Some(vec![words![]]));
        assert_eq!(matches("* hi *", &words!["hi"]), Some(vec![words![], words![]]));
        // The first wildcard is greedy, so the second gets nothing.
        assert_eq!(matches("* *", &words!["a", "b"]), Some(vec![words!["a", "b"], words![]]));
    }

    #[test]
    fn exhausted_input_leaves_room_for_one_wildcard_only() {
        assert_eq!(matches("* *", &words![]), None);
        assert_eq!(matches("i am * *", &words!["i", "am"]), None);
        assert_eq!(matches("hi * *", &words!["HI"]), None);
        assert_eq!(matches("i am *", &words!["i", "am"]), Some(vec![words![]]));
        // A middle wildcard may still be empty while tokens remain.
        assert_eq!(matches("i * am *", &words!["i", "am", "ok"]), Some(vec![words![], words!["ok"]]));
    }

    #[test]
    fn synonym_matches_one_member_token() {
        let caps = matches("i am @sad", &words!["I", "am", "unhappy"]).unwrap();
        assert_eq!(caps, vec![words!["unhappy"]]);

        assert_eq!(matches("i am @sad", &words!["I", "am", "tired"]), None);
        assert_eq!(matches("i am @sad", &words!["I", "am"]), None);
        assert_eq!(matches("i am @sad", &words!["I", "am", "blue", "today"]), None);
    }

    #[test]
    fn synonym_capture_keeps_original_case() {
        let caps = matches("* @sad *", &words!["so", "BLUE", "rn"]).unwrap();
        assert_eq!(caps, vec![words!["so"], words!["BLUE"], words!["rn"]]);
    }

    #[test]
    fn unknown_synonym_class_never_matches() {
        assert_eq!(matches("@happy", &words!["happy"]), None);
        assert_eq!(matches("* @happy *", &words!["so", "happy"]), None);
    }

    #[test]
    fn captures_follow_pattern_order() {
        let caps = matches("* i @sad * because *", &words!["ok", "i", "blue", "today", "because", "rain"]).unwrap();
        assert_eq!(caps, vec![words!["ok"], words!["blue"], words!["today"], words!["rain"]]);
    }
}
