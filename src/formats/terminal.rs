use crate::formatter::{FormatterImplementation, Renderer};
use crate::options::OptionSet;
use crate::token::TokenKind;

const RESET: &[u8] = b"\x1b[39;49;00m";

/// SGR sequence of a kind itself; lookups fall back to the parent kinds.
fn own_sequence(kind: TokenKind) -> Option<&'static str> {
    use TokenKind::*;
    let sequence = match kind {
        NameBuiltin | NameAttribute | KeywordType => "\x1b[36m",
        NameTag => "\x1b[36;01m",
        NameVariable => "\x1b[31m",
        NameFunction => "\x1b[32m",
        NameClass | NameNamespace => "\x1b[32;04m",
        Keyword | KeywordDeclaration => "\x1b[34m",
        Operator => "\x1b[35m",
        Number | LiteralSize | LiteralDuration => "\x1b[34m",
        Comment => "\x1b[37m",
        String => "\x1b[33m",
        SequenceEscaped => "\x1b[30;01;01m",
        SequenceInterpolated => "\x1b[30;01m",
        GenericHeading | GenericSubheading => "\x1b[37;01;01m",
        GenericInserted => "\x1b[34m",
        GenericDeleted => "\x1b[31m",
        _ => return None,
    };
    Some(sequence)
}

fn sequence(kind: TokenKind) -> Option<&'static str> {
    own_sequence(kind).or_else(|| match kind.parent() {
        // keywords only colored when listed
        Some(TokenKind::Keyword) => None,
        _ => kind.lineage().find_map(own_sequence),
    })
}

struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn start_token(&self, kind: TokenKind, out: &mut Vec<u8>, _options: &OptionSet) {
        if let Some(sequence) = sequence(kind) {
            out.extend_from_slice(sequence.as_bytes());
        }
    }

    fn end_token(&self, kind: TokenKind, out: &mut Vec<u8>, _options: &OptionSet) {
        if sequence(kind).is_some() {
            out.extend_from_slice(RESET);
        }
    }

    fn write_token(&self, text: &[u8], out: &mut Vec<u8>, _options: &OptionSet) {
        out.extend_from_slice(text);
    }
}

pub static TERMINAL: FormatterImplementation = FormatterImplementation {
    description: "Format tokens with ANSI color sequences, for output in a text console",
    ..FormatterImplementation::new("Terminal", &TerminalRenderer)
};
