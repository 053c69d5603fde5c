use crate::lexer::{Grammar, LexerImplementation, ScanContext, ScanEvent};
use crate::token::TokenKind;

/// Emits whatever is left of its range as a single `TEXT` token.
struct TextGrammar;

impl Grammar for TextGrammar {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        if cx.is_at_end() {
            return ScanEvent::Done;
        }
        cx.advance(cx.rest().len());
        ScanEvent::Token(TokenKind::Text)
    }
}

pub static TEXT: LexerImplementation = LexerImplementation {
    description: "A lexer that doesn't highlight anything",
    aliases: &["txt"],
    patterns: &["*.txt"],
    mimetypes: &["text/plain"],
    ..LexerImplementation::new("Text", &TextGrammar)
};
