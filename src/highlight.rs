//! Highlighting engine
//!
//! Drives one or more lexer instances over an input and turns their scan events into
//! formatter calls.
//!
//! The active lexer is asked for one event at a time. Tokens are queued in an
//! [`OutputBuffer`] where an optional push parser may still re-classify them, and are
//! handed to the formatter when the buffer fills up, at lexing boundaries and at the
//! end. Consecutive tokens of the same kind share one `start_token`/`end_token` run.
//!
//! A delegation event hands the pending span (or the rest of the current range) to
//! another lexer. Active instances are kept on a lexer stack keyed by implementation,
//! so a grammar delegated to twice reuses its instance. Two bounds keep buggy grammars
//! from running away:
//!
//! - at most [`DELEGATION_CAPACITY`] nested delegations, beyond which the pending span
//!   is emitted with the delegation's fallback kind;
//! - at most [`STALL_LIMIT`] consecutive scan calls that make no progress, after which
//!   the call fails with [`HighlightError::EngineAborted`].

mod buffer;
mod context;
mod engine;
mod error;

pub use buffer::Span;
pub use engine::{highlight, Highlighter};
pub use error::HighlightError;

/// Nesting bound of delegations.
pub const DELEGATION_CAPACITY: usize = 16;

/// Maximum number of lexer instances active at the same time.
pub const LEXER_STACK_CAPACITY: usize = 32;

/// Consecutive non-advancing scan calls tolerated before aborting.
pub const STALL_LIMIT: usize = 8;
