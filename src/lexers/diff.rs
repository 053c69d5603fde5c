//! Unified and context diffs
//!
//! Lines are classified by their first byte. When the `content` option names a lexer,
//! the body of added, removed and context lines is handed to it, one line at a time,
//! while the leading marker keeps its diff classification.

use crate::lexer::{Delegation, Grammar, LexerImplementation, ScanContext, ScanEvent};
use crate::options::{LexerRef, OptionDeclaration};
use crate::token::TokenKind;

const LINE_START: i32 = 0;
const INSERTED_BODY: i32 = 1;
const DELETED_BODY: i32 = 2;
const CONTEXT_BODY: i32 = 3;

struct DiffGrammar;

fn line_kind(line: &[u8]) -> TokenKind {
    match line.first() {
        Some(b'+') => TokenKind::GenericInserted,
        Some(b'-') => TokenKind::GenericDeleted,
        Some(b'!') => TokenKind::GenericStrong,
        Some(b'@') => TokenKind::GenericSubheading,
        Some(b'=') => TokenKind::GenericHeading,
        Some(b'i' | b'I') if line[1..].starts_with(b"ndex") => TokenKind::GenericHeading,
        Some(b'd') if line[1..].starts_with(b"iff") => TokenKind::GenericHeading,
        _ => TokenKind::Ignorable,
    }
}

fn body_kind(condition: i32) -> TokenKind {
    match condition {
        INSERTED_BODY => TokenKind::GenericInserted,
        DELETED_BODY => TokenKind::GenericDeleted,
        _ => TokenKind::Ignorable,
    }
}

impl Grammar for DiffGrammar {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        if cx.is_at_end() {
            return ScanEvent::Done;
        }
        let content = cx
            .options()
            .lexer("content")
            .and_then(LexerRef::implementation);

        let condition = cx.condition();
        if condition != LINE_START {
            cx.advance_line();
            cx.state().begin(LINE_START);
            let kind = body_kind(condition);
            return match content {
                Some(target) => Delegation::until(target, kind).into(),
                None => ScanEvent::Token(kind),
            };
        }

        if content.is_some() && !cx.starts_with(b"+++") && !cx.starts_with(b"---") {
            let body = match cx.peek() {
                Some(b'+') => Some((INSERTED_BODY, TokenKind::GenericInserted)),
                Some(b'-') => Some((DELETED_BODY, TokenKind::GenericDeleted)),
                Some(b' ') => Some((CONTEXT_BODY, TokenKind::Ignorable)),
                _ => None,
            };
            if let Some((condition, marker)) = body {
                cx.advance(1);
                cx.state().begin(condition);
                return ScanEvent::Token(marker);
            }
        }

        let line = cx.rest();
        if !cx.advance_line() {
            return ScanEvent::Token(TokenKind::Ignorable);
        }
        ScanEvent::Token(line_kind(line))
    }

    fn analyse(&self, input: &[u8]) -> i32 {
        if input.starts_with(b"Index: ") || input.starts_with(b"diff ") {
            999
        } else if input.starts_with(b"--- ") {
            600
        } else {
            0
        }
    }
}

static OPTIONS: [OptionDeclaration; 1] = [OptionDeclaration::lexer(
    "content",
    "lexer used to highlight the content of added, removed and context lines",
)];

pub static DIFF: LexerImplementation = LexerImplementation {
    description: "Lexer for unified or context-style diffs or patches",
    aliases: &["udiff"],
    patterns: &["*.diff", "*.patch"],
    mimetypes: &["text/x-diff", "text/x-patch"],
    options: &OPTIONS,
    ..LexerImplementation::new("Diff", &DiffGrammar)
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, ScanState};
    use crate::lexers::TEXT;
    use crate::options::{OptionSet, OptionValue};

    fn kinds(input: &[u8], options: &OptionSet) -> Vec<(String, String)> {
        let mut state = ScanState::default();
        let mut events = Vec::new();
        let mut start = 0;
        loop {
            let mut cx = ScanContext::new(input, start, input.len(), &mut state, options);
            let event = DIFF.grammar.scan(&mut cx);
            let text = String::from_utf8_lossy(cx.text()).into_owned();
            start = cx.cursor();
            match event {
                ScanEvent::Token(kind) => events.push((kind.name().to_string(), text)),
                ScanEvent::Delegate(delegation) => {
                    events.push((format!("->{}", delegation.target.name), text))
                }
                ScanEvent::Done => break,
                ScanEvent::Continue => unreachable!(),
            }
        }
        events
    }

    #[test]
    fn test_line_classification() {
        let options = OptionSet::new(DIFF.options);
        let events = kinds(b"diff a b\n--- a\n+++ b\n@@ -1 +1 @@\n-x\n+y\n same\nno newline", &options);
        let names: Vec<_> = events.iter().map(|(kind, _)| kind.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "GENERIC_HEADING",
                "GENERIC_DELETED",
                "GENERIC_INSERTED",
                "GENERIC_SUBHEADING",
                "GENERIC_DELETED",
                "GENERIC_INSERTED",
                "IGNORABLE",
                "IGNORABLE",
            ]
        );
        assert_eq!(events[3].1, "@@ -1 +1 @@\n");
    }

    #[test]
    fn test_content_lines_are_delegated() {
        let mut lexer = Lexer::new(&DIFF);
        lexer
            .set_option("content", OptionValue::lexer(Lexer::new(&TEXT)))
            .unwrap();
        let events = kinds(b"+++ b\n+y\n z\n", lexer.options());
        assert_eq!(
            events,
            vec![
                ("GENERIC_INSERTED".to_string(), "+++ b\n".to_string()),
                ("GENERIC_INSERTED".to_string(), "+".to_string()),
                ("->Text".to_string(), "y\n".to_string()),
                ("IGNORABLE".to_string(), " ".to_string()),
                ("->Text".to_string(), "z\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_analyse() {
        assert_eq!(DIFF.analyse(b"Index: foo"), 999);
        assert_eq!(DIFF.analyse(b"diff --git a b"), 999);
        assert_eq!(DIFF.analyse(b"--- a/x"), 600);
        assert_eq!(DIFF.analyse(b"hello"), 0);
    }
}
