//! Formatters
//!
//! Symmetric to lexers: a static [`FormatterImplementation`] describes an output format
//! and carries the [`Renderer`] callbacks, a [`Formatter`] is a configured instance of
//! it. Formatters have no scanning state; everything they know about the input comes
//! through the rendering protocol:
//!
//! ```text
//! start_document
//!   start_token(k) write_token.. end_token(k)   one bracket per run of equal kinds
//!   start_lexing(name) ... end_lexing(name)     around output of a delegated lexer
//! end_document
//! ```

mod implementation;
mod instance;
mod registry;

pub use implementation::{FormatterImplementation, Renderer};
pub use instance::Formatter;
pub use registry::{FormatterInfo, FormatterRegistry};
