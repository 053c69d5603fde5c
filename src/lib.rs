//! # hilite
//!
//! A syntax highlighting engine: lexers scan source bytes into classified tokens,
//! formatters render them, and the engine in between drives one or more cooperating
//! lexers and turns their events into formatter calls.
//!
//! ## Layout
//!
//! - [`token`]: the token kind taxonomy shared by every component
//! - [`options`]: typed option values lexers and formatters are configured with
//! - [`lexer`]: lexer descriptors, instances, the scan protocol and the registry
//! - [`lexers`]: the built-in grammars
//! - [`formatter`]: formatter descriptors, instances and the rendering protocol
//! - [`formats`]: the built-in output formats
//! - [`theme`]: color themes used by styled formats
//! - [`highlight`]: the orchestration engine
//! - [`config`]: engine configuration, layered over embedded defaults
//! - [`testing`]: a tracing formatter for tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hilite::{highlight, Formatter, Lexer};
//!
//! let mut lexer = Lexer::from_query("diff?content=json")?;
//! let formatter = Formatter::from_query("html?cssclass=diff")?;
//! let html = highlight(source, &formatter, &mut [&mut lexer])?;
//! ```

pub mod config;
pub mod formats;
pub mod formatter;
pub mod highlight;
pub mod lexer;
pub mod lexers;
pub mod options;
pub mod testing;
pub mod theme;
pub mod token;

pub use config::HighlightConfig;
pub use formatter::{Formatter, FormatterRegistry};
pub use highlight::{highlight, HighlightError, Highlighter};
pub use lexer::{Lexer, LexerRegistry};
pub use options::{OptionError, OptionValue};
pub use token::TokenKind;
