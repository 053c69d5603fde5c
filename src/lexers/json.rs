//! JSON
//!
//! Tokenization is done by a logos lexer over the remaining bytes. With the `keys`
//! option on (the default), a small push parser follows the document structure and
//! re-classifies object keys as `NAME_TAG`, which the lexer alone cannot tell apart
//! from string values.

use crate::highlight::Span;
use crate::lexer::{Grammar, LexerImplementation, ParserStep, PushParser, ScanContext, ScanEvent};
use crate::options::{OptionDeclaration, OptionSet};
use crate::token::TokenKind;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(source = [u8])]
enum JsonToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token(":")]
    #[token(",")]
    Punctuation,
    #[regex(r#""([^"\\\x00-\x1F]|\\[^\x00-\x1F])*""#)]
    Str,
    #[regex(r"-?(0|[1-9][0-9]*)")]
    Integer,
    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)")]
    Float,
    #[token("true")]
    #[token("false")]
    #[token("null")]
    Constant,
}

impl JsonToken {
    fn kind(self) -> TokenKind {
        match self {
            JsonToken::Whitespace => TokenKind::Ignorable,
            JsonToken::Punctuation => TokenKind::Punctuation,
            JsonToken::Str => TokenKind::StringDouble,
            JsonToken::Integer => TokenKind::NumberDecimal,
            JsonToken::Float => TokenKind::NumberFloat,
            JsonToken::Constant => TokenKind::KeywordConstant,
        }
    }
}

struct JsonGrammar;

impl Grammar for JsonGrammar {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        let mut lexer = JsonToken::lexer(cx.rest());
        let kind = match lexer.next() {
            Some(Ok(token)) => token.kind(),
            // invalid input is passed through untouched
            Some(Err(_)) => TokenKind::Text,
            None => return ScanEvent::Done,
        };
        cx.advance(lexer.span().end.max(1));
        ScanEvent::Token(kind)
    }

    fn analyse(&self, input: &[u8]) -> i32 {
        let start = input.iter().position(|byte| !byte.is_ascii_whitespace());
        match start.map(|index| input[index]) {
            Some(b'{') => 200,
            Some(b'[') => 100,
            _ => 0,
        }
    }

    fn parser(&self, options: &OptionSet) -> Option<Box<dyn PushParser>> {
        if options.bool("keys") {
            Some(Box::new(KeyParser::default()))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the parser accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Expect {
    #[default]
    Value,
    ValueOrClose,
    KeyOrClose,
    Key,
    Colon,
    CommaOrClose,
    Nothing,
}

#[derive(Debug, Default)]
struct KeyParser {
    containers: Vec<Container>,
    expect: Expect,
}

impl KeyParser {
    fn after_value(&mut self) {
        self.expect = if self.containers.is_empty() {
            Expect::Nothing
        } else {
            Expect::CommaOrClose
        };
    }

    fn open(&mut self, container: Container) -> ParserStep {
        if !matches!(self.expect, Expect::Value | Expect::ValueOrClose) {
            return ParserStep::SyntaxError;
        }
        self.containers.push(container);
        self.expect = match container {
            Container::Object => Expect::KeyOrClose,
            Container::Array => Expect::ValueOrClose,
        };
        ParserStep::Continue
    }

    fn close(&mut self, container: Container) -> ParserStep {
        let allowed = match container {
            Container::Object => matches!(self.expect, Expect::KeyOrClose | Expect::CommaOrClose),
            Container::Array => matches!(self.expect, Expect::ValueOrClose | Expect::CommaOrClose),
        };
        if !allowed || self.containers.pop() != Some(container) {
            return ParserStep::SyntaxError;
        }
        self.after_value();
        ParserStep::Continue
    }

    fn punctuation(&mut self, text: &[u8]) -> ParserStep {
        match (text, self.expect) {
            (b"{", _) => self.open(Container::Object),
            (b"[", _) => self.open(Container::Array),
            (b"}", _) => self.close(Container::Object),
            (b"]", _) => self.close(Container::Array),
            (b":", Expect::Colon) => {
                self.expect = Expect::Value;
                ParserStep::Continue
            }
            (b",", Expect::CommaOrClose) => {
                self.expect = match self.containers.last() {
                    Some(Container::Object) => Expect::Key,
                    _ => Expect::Value,
                };
                ParserStep::Continue
            }
            _ => ParserStep::SyntaxError,
        }
    }
}

impl PushParser for KeyParser {
    fn feed(&mut self, kind: TokenKind, text: &[u8], pending: &mut [Span]) -> ParserStep {
        match kind {
            TokenKind::Ignorable => ParserStep::Continue,
            TokenKind::Punctuation => self.punctuation(text),
            TokenKind::StringDouble if matches!(self.expect, Expect::Key | Expect::KeyOrClose) => {
                if let Some(span) = pending.last_mut() {
                    span.kind = TokenKind::NameTag;
                }
                self.expect = Expect::Colon;
                ParserStep::Continue
            }
            TokenKind::StringDouble
            | TokenKind::NumberDecimal
            | TokenKind::NumberFloat
            | TokenKind::KeywordConstant
                if matches!(self.expect, Expect::Value | Expect::ValueOrClose) =>
            {
                self.after_value();
                ParserStep::Continue
            }
            _ => ParserStep::SyntaxError,
        }
    }
}

static OPTIONS: [OptionDeclaration; 1] = [OptionDeclaration::bool(
    "keys",
    true,
    "highlight object keys as tag names",
)];

pub static JSON: LexerImplementation = LexerImplementation {
    description: "Lexer for JSON documents",
    patterns: &["*.json"],
    mimetypes: &["application/json"],
    options: &OPTIONS,
    ..LexerImplementation::new("Json", &JsonGrammar)
};
