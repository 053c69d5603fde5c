//! Lexers
//!
//! A lexer is split in two layers:
//!
//! - [`LexerImplementation`]: the static descriptor of one grammar (names, file patterns,
//!   option declarations) plus the [`Grammar`] doing the actual scanning. Descriptors are
//!   immutable and shared process-wide through [`LexerRegistry`].
//! - [`Lexer`]: an instance of a descriptor carrying its own option values and scanner
//!   state. Instances are configured by hosts and driven by the highlighting engine.
//!
//! Grammars never call formatters directly: each scan call reports a [`ScanEvent`]
//! (a finished token, a request to keep accumulating, the end of its range, or a
//! delegation to another grammar) and the engine turns those into formatter calls.

mod glob;
mod implementation;
mod instance;
mod parser;
mod registry;
mod scan;

pub use implementation::{Grammar, LexerImplementation};
pub use instance::{Lexer, Released};
pub use parser::{ParserStep, PushParser};
pub use registry::{LexerInfo, LexerRegistry, OptionInfo};
pub use scan::{Delegation, DelegationMode, ScanContext, ScanEvent, ScanState};

pub(crate) use implementation::ImplId;
pub(crate) use registry::shebang_line_end;
