//! Message normalization.
//!
//! ```text
//! "Well, im   tired...  ok"
//!    │ strip `. , ;` runs (with surrounding whitespace) -> one space
//!    v
//! "Well im   tired ok"
//!    │ split on whitespace
//!    v
//! [Well, im, tired, ok]
//!    │ pre substitutions (im -> i am)
//!    v
//! [Well, i, am, tired, ok]
//! ```
//!
//! Other punctuation (`?`, `!`, quotes) stays attached to its word.

use crate::script::Substitutions;
use std::borrow::Cow;

/// Turn a raw message into the token sequence triggers and patterns see.
pub(crate) fn normalize(message: &str, pre: &Substitutions) -> Vec<String> {
    pre.apply(strip_punctuation(message).split_whitespace())
}

/// Replace every run of `.`, `,` and `;` (plus adjacent whitespace) by a
/// single space.
pub(crate) fn strip_punctuation(message: &str) -> Cow<'_, str> {
    regex!(r"\s*[.,;]+\s*").replace_all(message, " ")
}
