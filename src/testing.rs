//! Test support
//!
//! [`TRACE`] is a formatter that records the rendering protocol instead of rendering:
//! every callback appends one word followed by a space.
//!
//! ```text
//! document start(KEYWORD) write("if") end(KEYWORD) lexing(Json) ... /lexing(Json) /document
//! ```
//!
//! Written text is shown as a quoted, escaped string so that runs, boundaries and
//! content can all be asserted on from a single string.

use crate::formatter::{Formatter, FormatterImplementation, Renderer};
use crate::highlight::{HighlightError, Highlighter};
use crate::lexer::Lexer;
use crate::options::OptionSet;
use crate::token::TokenKind;

struct TraceRenderer;

impl TraceRenderer {
    fn word(out: &mut Vec<u8>, word: std::fmt::Arguments<'_>) {
        out.extend_from_slice(format!("{word} ").as_bytes());
    }
}

impl Renderer for TraceRenderer {
    fn start_document(&self, out: &mut Vec<u8>, _options: &OptionSet) {
        Self::word(out, format_args!("document"));
    }

    fn end_document(&self, out: &mut Vec<u8>, _options: &OptionSet) {
        Self::word(out, format_args!("/document"));
    }

    fn start_token(&self, kind: TokenKind, out: &mut Vec<u8>, _options: &OptionSet) {
        Self::word(out, format_args!("start({kind})"));
    }

    fn end_token(&self, kind: TokenKind, out: &mut Vec<u8>, _options: &OptionSet) {
        Self::word(out, format_args!("end({kind})"));
    }

    fn write_token(&self, text: &[u8], out: &mut Vec<u8>, _options: &OptionSet) {
        Self::word(out, format_args!("write({:?})", String::from_utf8_lossy(text)));
    }

    fn start_lexing(&self, lexer: &str, out: &mut Vec<u8>, _options: &OptionSet) {
        Self::word(out, format_args!("lexing({lexer})"));
    }

    fn end_lexing(&self, lexer: &str, out: &mut Vec<u8>, _options: &OptionSet) {
        Self::word(out, format_args!("/lexing({lexer})"));
    }
}

pub static TRACE: FormatterImplementation = FormatterImplementation {
    description: "Record formatter calls as text, for tests",
    ..FormatterImplementation::new("Trace", &TraceRenderer)
};

/// Highlight `source` with `highlighter` and return the trace of formatter calls.
pub fn trace(
    highlighter: &Highlighter,
    source: &[u8],
    lexers: &mut [&mut Lexer],
) -> Result<String, HighlightError> {
    let output = highlighter.highlight(source, &Formatter::new(&TRACE), lexers)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
