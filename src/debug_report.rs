use ansi::Style;
use rejoinder::{AttemptOutcome, ReplySource, TurnDetails};

mod ansi {
    /// SGR styles the trace uses.
    #[derive(Debug, Clone, Copy)]
    pub enum Style {
        Bold,
        Dim,
        Green,
        Yellow,
        Blue,
        Cyan,
        Gray,
    }

    impl Style {
        fn code(self) -> &'static str {
            match self {
                Style::Bold => "1",
                Style::Dim => "2",
                Style::Green => "32",
                Style::Yellow => "33",
                Style::Blue => "34",
                Style::Cyan => "36",
                Style::Gray => "90",
            }
        }
    }

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, text: impl AsRef<str>, style: Style) -> String {
            let text = text.as_ref();
            if self.enabled { format!("\x1b[{}m{text}\x1b[0m", style.code()) } else { text.to_string() }
        }
    }
}

/// Print how one message was answered.
pub fn print_turn(message: &str, details: &TurnDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    let header = palette.paint(format!("⚙  Message: \"{}\"", message), Style::Cyan);
    println!("\n{}", palette.paint(header, Style::Bold));

    println!("\n{}", palette.paint("━━━ Tokens ━━━", Style::Gray));
    if details.tokens.is_empty() {
        println!("{}", palette.paint("  (none)", Style::Dim));
    } else {
        println!("  {}", details.tokens.iter().map(|t| format!("[{t}]")).collect::<Vec<_>>().join(" "));
    }

    println!("\n{}", palette.paint("━━━ Triggers ━━━", Style::Gray));
    if details.candidates.is_empty() {
        println!("{}", palette.paint("  No trigger words in message", Style::Dim));
    }
    for (rank, candidate) in details.candidates.iter().enumerate() {
        println!(
            "  {}. {} {}",
            rank + 1,
            palette.paint(&candidate.term, Style::Blue),
            palette.paint(format!("(priority {})", candidate.priority), Style::Dim)
        );
    }

    if !details.attempts.is_empty() {
        println!("\n{}", palette.paint("━━━ Patterns ━━━", Style::Gray));
        for attempt in &details.attempts {
            let style = match attempt.outcome {
                AttemptOutcome::NoMatch => Style::Dim,
                AttemptOutcome::Stored | AttemptOutcome::Empty => Style::Yellow,
                AttemptOutcome::Replied => Style::Green,
            };
            println!("  {}#{}  {}", attempt.term, attempt.pattern, palette.paint(outcome_label(attempt.outcome), style));
        }
    }

    println!("\n{}", palette.paint("━━━ Reply ━━━", Style::Gray));
    println!("  source: {}", palette.paint(source_label(&details.source), Style::Green));
    println!("  memory: {} stored", details.memory_len);
    println!("  {}", palette.paint(format!("took {:?}", details.elapsed), Style::Dim));
}

fn outcome_label(outcome: AttemptOutcome) -> &'static str {
    match outcome {
        AttemptOutcome::NoMatch => "no match",
        AttemptOutcome::Stored => "stored in memory",
        AttemptOutcome::Replied => "replied",
        AttemptOutcome::Empty => "empty reply",
    }
}

fn source_label(source: &ReplySource) -> String {
    match source {
        ReplySource::Trigger { term, pattern } => format!("trigger '{term}', pattern #{pattern}"),
        ReplySource::Memory => "memory bank".to_string(),
        ReplySource::Fallback => "fallback (xnone)".to_string(),
        ReplySource::Exit => "exit word".to_string(),
    }
}
