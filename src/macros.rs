/// Compile a regex literal on first use and return a `&'static Regex`.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build an owned token sequence: `words!["I", "am", "sad"]`.
#[cfg(test)]
macro_rules! words {
    ($($word:expr),* $(,)?) => {
        vec![$(String::from($word)),*] as Vec<String>
    };
}
