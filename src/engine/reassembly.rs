//! Reassembly: turn a match into output words.

use crate::{Pattern, TemplateItem};

/// Draw the pattern's next template and splice `captures` into it.
///
/// `cursor` is the session's cursor for this pattern. It selects
/// `responses[cursor % len]` and then advances, wrapping, so repeated matches
/// cycle through the templates in order.
///
/// `(N)` splices capture N (1-based). References outside `1..=captures.len()`
/// contribute nothing.
pub(crate) fn reassemble(pattern: &Pattern, cursor: &mut usize, captures: &[Vec<String>]) -> Vec<String> {
    let count = pattern.responses.len();
    let template = &pattern.responses[*cursor % count];
    *cursor = (*cursor + 1) % count;

    let mut output = Vec::new();
    for item in template {
        match item {
            TemplateItem::Word(word) => output.push(word.clone()),
            TemplateItem::Capture(index) => {
                if let Some(capture) = index.checked_sub(1).and_then(|i| captures.get(i)) {
                    output.extend(capture.iter().cloned());
                }
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptBuilder;

    fn pattern(templates: &[&str]) -> Pattern {
        let mut builder = ScriptBuilder::new();
        builder.key("xnone", 1).decomp("*").unwrap();
        for template in templates {
            builder.reasmb(template).unwrap();
        }
        builder.build().unwrap().fallback().patterns[0].clone()
    }

    #[test]
    fn cycles_round_robin() {
        let pattern = pattern(&["r0", "r1"]);
        let mut cursor = 0;
        let drawn: Vec<String> = (0..3).map(|_| reassemble(&pattern, &mut cursor, &[]).join(" ")).collect();
        assert_eq!(drawn, words!["r0", "r1", "r0"]);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn cursor_stays_in_range() {
        let pattern = pattern(&["a", "b", "c"]);
        let mut cursor = 7;
        assert_eq!(reassemble(&pattern, &mut cursor, &[]), words!["b"]);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn splices_captures() {
        let pattern = pattern(&["why do you feel (1)"]);
        let out = reassemble(&pattern, &mut 0, &[words!["so", "tired"]]);
        assert_eq!(out.join(" "), "why do you feel so tired");
    }

    #[test]
    fn out_of_range_references_are_dropped() {
        let pattern = pattern(&["(0) you said (3) (2) ok"]);
        let out = reassemble(&pattern, &mut 0, &[words!["one"], words!["two"]]);
        assert_eq!(out, words!["you", "said", "two", "ok"]);
    }

    #[test]
    fn non_numeric_parentheses_are_literal() {
        let pattern = pattern(&["(sigh) (1)"]);
        let out = reassemble(&pattern, &mut 0, &[words!["fine"]]);
        assert_eq!(out, words!["(sigh)", "fine"]);
    }

    #[test]
    fn empty_capture_contributes_nothing() {
        let pattern = pattern(&["(1)"]);
        assert!(reassemble(&pattern, &mut 0, &[words![]]).is_empty());
    }
}
