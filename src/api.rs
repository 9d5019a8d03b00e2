use crate::Script;
use crate::engine::{Responder, SessionState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

pub use crate::engine::{AttemptOutcome, AttemptSummary, CandidateSummary, ReplySource, ReplyVerbose, TurnDetails};

/// Options that affect a conversation.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Seed for the session RNG (memory draws, greeting/farewell choice).
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Try each trigger at most once per message, even when its term occurs
    /// several times. Off by default: every mention is a separate attempt.
    pub dedupe_triggers: bool,
}

/// The answer to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Words joined by single spaces.
    Text(String),
    /// The message was an exit word; the conversation is over.
    Exit,
}

impl Reply {
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            Reply::Exit => None,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Reply::Exit)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Text(text) => f.write_str(text),
            Reply::Exit => f.write_str("<exit>"),
        }
    }
}

/// One conversation against a shared [`Script`].
///
/// The script is only read. Response cursors, the memory bank and the RNG
/// belong to the conversation, so two conversations over the same script do
/// not influence each other.
///
/// # Example
/// ```
/// use rejoinder::{Conversation, Options, Reply, Script};
///
/// let script = Script::bundled().unwrap();
/// let mut chat = Conversation::with_options(&script, Options { seed: Some(1), ..Options::default() });
///
/// assert!(matches!(chat.reply("hello"), Reply::Text(_)));
/// assert_eq!(chat.reply("bye"), Reply::Exit);
/// ```
#[derive(Debug, Clone)]
pub struct Conversation<'a> {
    script: &'a Script,
    options: Options,
    state: SessionState,
}

impl<'a> Conversation<'a> {
    /// Start a conversation with default options.
    pub fn new(script: &'a Script) -> Self {
        Self::with_options(script, Options::default())
    }

    pub fn with_options(script: &'a Script, options: Options) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Conversation { script, state: SessionState::new(script, rng), options }
    }

    /// Answer one message.
    pub fn reply(&mut self, message: &str) -> Reply {
        Responder::new(self.script, &mut self.state, &self.options).run(message)
    }

    /// Answer one message and report how the answer was found.
    pub fn reply_verbose(&mut self, message: &str) -> ReplyVerbose {
        Responder::new(self.script, &mut self.state, &self.options).run_with_metrics(message)
    }

    /// A random greeting from the script.
    pub fn greeting(&mut self) -> Option<&'a str> {
        self.script.greeting(&mut self.state.rng)
    }

    /// A random farewell from the script.
    pub fn farewell(&mut self) -> Option<&'a str> {
        self.script.farewell(&mut self.state.rng)
    }

    /// Number of deferred replies waiting in the memory bank.
    pub fn memory_len(&self) -> usize {
        self.state.memory.len()
    }

    pub fn script(&self) -> &'a Script {
        self.script
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptBuilder;
    use std::time::Duration;

    fn seeded() -> Options {
        Options { seed: Some(42), ..Options::default() }
    }

    fn memory_script() -> Script {
        Script::parse(
            "key: xnone
decomp: *
reasmb: fallback one
reasmb: fallback two
key: my 2
decomp: $ * my *
reasmb: earlier you mentioned your (2)
decomp: * my dog *
reasmb: tell me about your dog
key: note
decomp: $ *
reasmb: you said (1)
",
        )
        .unwrap()
    }

    #[test]
    fn exit_word_terminates() {
        let script = Script::bundled().unwrap();
        let mut chat = Conversation::new(&script);
        assert_eq!(chat.reply("Goodbye"), Reply::Exit);
        assert!(chat.reply("goodbye.").text().is_some());
    }

    #[test]
    fn memory_pattern_stores_and_scanning_continues() {
        let script = memory_script();
        let mut chat = Conversation::with_options(&script, seeded());

        assert_eq!(chat.reply("my dog ate my homework"), Reply::Text("tell me about your dog".into()));
        assert_eq!(chat.memory_len(), 1);
    }

    #[test]
    fn memory_is_drawn_before_fallback() {
        let script = memory_script();
        let mut chat = Conversation::with_options(&script, seeded());

        // Only the memory pattern of `my` matches, so the turn falls through
        // to the memory bank, which now holds this very reply.
        assert_eq!(chat.reply("my cat"), Reply::Text("earlier you mentioned your cat".into()));
        assert_eq!(chat.memory_len(), 0);
        assert_eq!(chat.reply("whatever"), Reply::Text("fallback one".into()));
        assert_eq!(chat.reply("whatever"), Reply::Text("fallback two".into()));
        assert_eq!(chat.reply("whatever"), Reply::Text("fallback one".into()));
    }

    #[test]
    fn memory_draw_returns_one_of_the_stored_replies() {
        let script = memory_script();
        let mut chat = Conversation::with_options(&script, seeded());

        chat.reply("my dog barks");
        chat.reply("my dog sleeps");
        assert_eq!(chat.memory_len(), 2);

        let reply = chat.reply("nothing to see");
        let text = reply.text().unwrap();
        assert!(
            text == "earlier you mentioned your dog barks" || text == "earlier you mentioned your dog sleeps",
            "unexpected memory reply {text:?}"
        );
        assert_eq!(chat.memory_len(), 1);
    }

    #[test]
    fn repeated_mentions_are_tried_again() {
        let script = memory_script();

        let mut chat = Conversation::with_options(&script, seeded());
        let verbose = chat.reply_verbose("note note");
        assert_eq!(verbose.reply, Reply::Text("you said note note".into()));
        assert_eq!(verbose.details.candidates.len(), 2);
        assert_eq!(verbose.details.source, ReplySource::Memory);
        // Stored twice, drawn once.
        assert_eq!(chat.memory_len(), 1);

        let mut chat = Conversation::with_options(&script, Options { dedupe_triggers: true, ..seeded() });
        let verbose = chat.reply_verbose("note note");
        assert_eq!(verbose.details.candidates.len(), 1);
        assert_eq!(chat.memory_len(), 0);
    }

    #[test]
    fn empty_reply_moves_on_to_next_trigger() {
        let mut builder = ScriptBuilder::new();
        builder.key("xnone", 1).decomp("*").unwrap().reasmb("nothing").unwrap();
        builder.key("a", 2).decomp("*").unwrap().reasmb("(5)").unwrap();
        builder.decomp("*").unwrap().reasmb("never reached").unwrap();
        builder.key("b", 1).decomp("*").unwrap().reasmb("b wins").unwrap();
        let script = builder.build().unwrap();

        let mut chat = Conversation::new(&script);
        let verbose = chat.reply_verbose("a b");
        assert_eq!(verbose.reply, Reply::Text("b wins".into()));
        assert_eq!(
            verbose.details.attempts,
            vec![
                AttemptSummary { term: "a".into(), pattern: 0, outcome: AttemptOutcome::Empty },
                AttemptSummary { term: "b".into(), pattern: 0, outcome: AttemptOutcome::Replied },
            ]
        );
        assert_eq!(verbose.details.source, ReplySource::Trigger { term: "b".into(), pattern: 0 });
    }

    #[test]
    fn conversations_do_not_share_state() {
        let script = memory_script();
        let mut first = Conversation::with_options(&script, seeded());
        let mut second = Conversation::with_options(&script, seeded());

        assert_eq!(first.reply("hm"), Reply::Text("fallback one".into()));
        assert_eq!(first.reply("my x"), Reply::Text("earlier you mentioned your x".into()));
        assert_eq!(second.reply("hm"), Reply::Text("fallback one".into()));
        assert_eq!(second.memory_len(), 0);
    }

    #[test]
    fn verbose_reports_tokens_and_priorities() {
        let script = memory_script();
        let mut chat = Conversation::with_options(&script, seeded());
        let verbose = chat.reply_verbose("Note, my dog.");

        assert_eq!(verbose.details.tokens, words!["Note", "my", "dog"]);
        assert_eq!(
            verbose.details.candidates,
            vec![
                CandidateSummary { term: "my".into(), priority: 2 },
                CandidateSummary { term: "note".into(), priority: 1 },
            ]
        );
        assert_eq!(verbose.details.source, ReplySource::Trigger { term: "my".into(), pattern: 1 });
        assert_eq!(verbose.details.memory_len, 1);
        assert!(verbose.details.elapsed >= Duration::ZERO);
    }

    #[test]
    fn verbose_exit() {
        let script = Script::bundled().unwrap();
        let mut chat = Conversation::new(&script);
        let verbose = chat.reply_verbose("QUIT");
        assert!(verbose.reply.is_exit());
        assert_eq!(verbose.details.source, ReplySource::Exit);
        assert!(verbose.details.tokens.is_empty());
    }

    #[test]
    fn seeded_greetings_repeat() {
        let script = Script::bundled().unwrap();
        let mut a = Conversation::with_options(&script, seeded());
        let mut b = Conversation::with_options(&script, seeded());
        assert_eq!(a.greeting(), b.greeting());
        assert!(a.farewell().is_some());
    }
}
