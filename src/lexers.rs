//! Built-in lexers
//!
//! Each submodule defines one [`LexerImplementation`] static and the grammar behind it.
//! [`builtin`] lists them in registration order, which is also the order
//! [`LexerRegistry::guess`](crate::lexer::LexerRegistry::guess) breaks ties in. `Text`
//! comes last so that any real grammar claiming an input beats it.

mod diff;
mod json;
mod text;

pub use diff::DIFF;
pub use json::JSON;
pub use text::TEXT;

use crate::lexer::LexerImplementation;

pub fn builtin() -> Vec<&'static LexerImplementation> {
    vec![&DIFF, &JSON, &TEXT]
}
