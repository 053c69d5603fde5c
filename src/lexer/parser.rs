use crate::highlight::Span;
use crate::token::TokenKind;

/// Result of feeding one token to a push parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserStep {
    Continue,
    SyntaxError,
}

/// A push-style parser attached to a lexer instance.
///
/// The engine feeds it every token the instance produces, together with the spans not
/// yet handed to the formatter (the last one is the token just fed). The parser may
/// change the `kind` of any of those spans. After a syntax error it is never fed again
/// during the same highlighting call, and pending spans fall back to their default kinds.
pub trait PushParser {
    fn feed(&mut self, kind: TokenKind, text: &[u8], pending: &mut [Span]) -> ParserStep;
}
