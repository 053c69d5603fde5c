//! Built-in formatters
//!
//! Each submodule defines one [`FormatterImplementation`] static and the renderer
//! behind it:
//!
//! - `Plain`: one `KIND: text` line per run, meant for tests and debugging
//! - `HTML`: `<span>` elements inside a `<pre>`
//! - `Terminal`: ANSI escape sequences
//! - `BBCode`: forum markup, colored after a theme

mod bbcode;
mod html;
mod plain;
mod terminal;

pub use bbcode::BBCODE;
pub use html::HTML;
pub use plain::PLAIN;
pub use terminal::TERMINAL;

use crate::formatter::FormatterImplementation;

pub fn builtin() -> Vec<&'static FormatterImplementation> {
    vec![&PLAIN, &HTML, &TERMINAL, &BBCODE]
}
