//! Matching and response-synthesis engine.
//!
//! ## How the parts work together
//!
//! One call to [`Responder::run_with_metrics`] handles one message:
//!
//! ```text
//! message ──┬─ exit word? ───────────────────────────────▶ Reply::Exit
//!           │
//!           └─ normalize (normalize.rs)
//!                - strip `. , ;` runs, split on whitespace
//!                - expand pre substitutions
//!                    │
//!                    v
//!              TriggerScan::scan (trigger.rs)
//!                - one candidate per token naming a trigger
//!                - stable sort by descending priority
//!                    │
//!                    v
//!              for each candidate, for each pattern:
//!                decompose (matcher.rs)      backtracking match -> captures
//!                post substitutions          per captured span
//!                reassemble (reassembly.rs)  round-robin template + splice
//!                  ├─ memory pattern -> MemoryBank::store, keep scanning
//!                  └─ otherwise      -> reply
//!                    │
//!                    v (nothing replied)
//!              MemoryBank::draw (memory.rs)  random stored reply, if any
//!                    │
//!                    v (bank empty)
//!              fallback: first pattern of `xnone`, no captures
//! ```
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: message text to tokens.
//! - `trigger.rs`: which triggers a message names and in what order they run.
//! - `matcher.rs`: decomposition of a token sequence by one pattern.
//! - `reassembly.rs`: template selection and capture splicing.
//! - `memory.rs`: the deferred-reply pool.
//! - `turn.rs`: the per-message driver tying the above together, including
//!   the fallback responder.
//! - `metrics.rs`: what happened during a turn, for tracing and debugging.
//!
//! ## State
//!
//! The script is read-only here. Everything a turn mutates (response cursors,
//! the memory bank, the RNG) is a `SessionState` owned by one conversation.
//!
//! ## Debugging
//!
//! Every stage emits `tracing` events; run the CLI with
//! `REJOINDER_LOG=rejoinder=debug` (or `trace`) to see them.

#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/memory.rs"]
mod memory;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/reassembly.rs"]
mod reassembly;
#[path = "engine/trigger.rs"]
mod trigger;
#[path = "engine/turn.rs"]
mod turn;


pub use metrics::{AttemptOutcome, AttemptSummary, CandidateSummary, ReplySource, ReplyVerbose, TurnDetails};
pub use turn::{Responder, SessionState};
