//! Word substitution maps and synonym classes.

use std::collections::HashMap;

/// Lowercase word -> replacement words.
///
/// Used twice per turn: `pre` over the whole message, `post` over every
/// captured span. A replacement may be empty, which deletes the word.
#[derive(Debug, Clone, Default)]
pub(crate) struct Substitutions {
    map: HashMap<String, Vec<String>>,
}

impl Substitutions {
    /// Register `word` (case-folded). A later entry for the same word wins.
    pub fn insert(&mut self, word: &str, replacement: &[&str]) {
        self.map.insert(word.to_lowercase(), replacement.iter().map(|w| w.to_string()).collect());
    }

    /// Expand every word whose lowercase form has an entry, in place and in
    /// order. Other words pass through with their case intact.
    pub fn apply<I, S>(&self, words: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for word in words {
            let word = word.as_ref();
            match self.map.get(&word.to_lowercase()) {
                Some(replacement) => out.extend(replacement.iter().cloned()),
                None => out.push(word.to_string()),
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

/// Class root -> member words (the root is always a member). Everything is
/// stored lowercased.
#[derive(Debug, Clone, Default)]
pub(crate) struct Synonyms {
    classes: HashMap<String, Vec<String>>,
}

impl Synonyms {
    pub fn insert(&mut self, root: &str, members: &[&str]) {
        let root = root.to_lowercase();
        let mut words = vec![root.clone()];
        for member in members {
            let member = member.to_lowercase();
            if !words.contains(&member) {
                words.push(member);
            }
        }
        self.classes.insert(root, words);
    }

    /// Members of `root`, or `None` for an unknown class.
    pub fn class(&self, root: &str) -> Option<&[String]> {
        self.classes.get(root).map(Vec::as_slice)
    }

    /// True when `root` is a known class and `word` (case-folded) is in it.
    pub fn is_member(&self, root: &str, word: &str) -> bool {
        let word = word.to_lowercase();
        self.class(root).is_some_and(|members| members.contains(&word))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_expands_in_place() {
        let mut subs = Substitutions::default();
        subs.insert("im", &["i", "am"]);
        subs.insert("ngl", &[]);
        subs.insert("U", &["you"]);

        let out = subs.apply(["ngl", "Im", "with", "u", "Today"]);
        assert_eq!(out, words!["i", "am", "with", "you", "Today"]);
    }

    #[test]
    fn later_substitution_wins() {
        let mut subs = Substitutions::default();
        subs.insert("r", &["are"]);
        subs.insert("r", &["our"]);
        assert_eq!(subs.apply(["r"]), words!["our"]);
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn synonym_class_includes_root() {
        let mut synonyms = Synonyms::default();
        synonyms.insert("Sad", &["unhappy", "BLUE"]);

        assert_eq!(synonyms.class("sad").unwrap(), &words!["sad", "unhappy", "blue"][..]);
        assert!(synonyms.is_member("sad", "Sad"));
        assert!(synonyms.is_member("sad", "blue"));
        assert!(!synonyms.is_member("sad", "tired"));
        assert!(!synonyms.is_member("happy", "sad"));
        assert_eq!(synonyms.len(), 1);
    }
}
