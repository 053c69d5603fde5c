use crate::options::{OptionDeclaration, OptionSet};
use crate::token::TokenKind;
use std::fmt;

/// Rendering callbacks of an output format.
///
/// Every callback appends to `out` and gets the option values of the formatter instance
/// being driven. Document and lexing boundaries are optional.
pub trait Renderer: Send + Sync {
    fn start_document(&self, _out: &mut Vec<u8>, _options: &OptionSet) {}

    fn end_document(&self, _out: &mut Vec<u8>, _options: &OptionSet) {}

    fn start_token(&self, kind: TokenKind, out: &mut Vec<u8>, options: &OptionSet);

    fn end_token(&self, kind: TokenKind, out: &mut Vec<u8>, options: &OptionSet);

    fn write_token(&self, text: &[u8], out: &mut Vec<u8>, options: &OptionSet);

    fn start_lexing(&self, _lexer: &str, _out: &mut Vec<u8>, _options: &OptionSet) {}

    fn end_lexing(&self, _lexer: &str, _out: &mut Vec<u8>, _options: &OptionSet) {}
}

/// Static descriptor of a formatter.
pub struct FormatterImplementation {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [OptionDeclaration],
    pub renderer: &'static dyn Renderer,
}

impl FormatterImplementation {
    pub const fn new(name: &'static str, renderer: &'static dyn Renderer) -> Self {
        FormatterImplementation {
            name,
            description: "",
            options: &[],
            renderer,
        }
    }
}

impl fmt::Debug for FormatterImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterImplementation")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl PartialEq for FormatterImplementation {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for FormatterImplementation {}
