//! Drive loop behaviour, observed through the trace formatter.

use hilite::config::{EngineConfig, HighlightConfig};
use hilite::formats::PLAIN;
use hilite::highlight::{HighlightError, Highlighter, DELEGATION_CAPACITY, STALL_LIMIT};
use hilite::lexer::{Delegation, Grammar, Lexer, LexerImplementation, ScanContext, ScanEvent, ScanState};
use hilite::lexers::{DIFF, JSON, TEXT};
use hilite::options::OptionSet;
use hilite::testing::trace;
use hilite::{highlight, Formatter, TokenKind};
use std::sync::atomic::{AtomicUsize, Ordering};

/// One token per byte: `a` is a keyword, `b` an operator, anything else text.
struct PerByte;

impl Grammar for PerByte {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        let kind = match cx.bump() {
            None => return ScanEvent::Done,
            Some(b'a') => TokenKind::Keyword,
            Some(b'b') => TokenKind::Operator,
            Some(_) => TokenKind::Text,
        };
        ScanEvent::Token(kind)
    }
}

static PER_BYTE: LexerImplementation = LexerImplementation::new("PerByte", &PerByte);

#[test]
fn consecutive_tokens_of_one_kind_share_a_run() {
    let mut lexer = Lexer::new(&PER_BYTE);
    let output = trace(&Highlighter::new(), b"aabbba", &mut [&mut lexer]).unwrap();
    assert_eq!(
        output,
        concat!(
            r#"document start(KEYWORD) write("a") write("a") end(KEYWORD) "#,
            r#"start(OPERATOR) write("b") write("b") write("b") end(OPERATOR) "#,
            r#"start(KEYWORD) write("a") end(KEYWORD) /document "#,
        )
    );
}

#[test]
fn runs_survive_buffer_flushes() {
    let mut config = HighlightConfig::default();
    config.engine.buffer_capacity = 1;
    let mut lexer = Lexer::new(&PER_BYTE);
    let small = trace(&Highlighter::with_config(config), b"aabbba", &mut [&mut lexer]).unwrap();
    let mut lexer = Lexer::new(&PER_BYTE);
    let large = trace(&Highlighter::new(), b"aabbba", &mut [&mut lexer]).unwrap();
    assert_eq!(small, large);
}

/// Text outside `<...>`; the inside is handed to [`INNER`] until it stops at `>`.
struct Outer;

const AFTER_OPEN: i32 = 1;

impl Grammar for Outer {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        if cx.condition() == AFTER_OPEN {
            return Delegation::full(&INNER, TokenKind::Text).resume_in(0).into();
        }
        match cx.bump() {
            None => ScanEvent::Done,
            Some(b'<') => {
                cx.state().begin(AFTER_OPEN);
                ScanEvent::Token(TokenKind::Punctuation)
            }
            Some(b'>') => ScanEvent::Token(TokenKind::Punctuation),
            Some(_) => {
                cx.advance_while(|byte| byte != b'<' && byte != b'>');
                ScanEvent::Token(TokenKind::Text)
            }
        }
    }
}

static INNER_FINALIZED: AtomicUsize = AtomicUsize::new(0);

struct Inner;

impl Grammar for Inner {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        if cx.advance_while(|byte| byte != b'>') == 0 {
            return ScanEvent::Done;
        }
        ScanEvent::Token(TokenKind::String)
    }

    fn finalize(&self, _state: &mut ScanState, _options: &OptionSet) {
        INNER_FINALIZED.fetch_add(1, Ordering::SeqCst);
    }
}

static OUTER: LexerImplementation = LexerImplementation::new("Outer", &Outer);
static INNER: LexerImplementation = LexerImplementation::new("Inner", &Inner);

#[test]
fn full_delegation_is_bracketed_and_released() {
    let mut lexer = Lexer::new(&OUTER);
    let output = trace(&Highlighter::new(), b"a<bc>d<e>", &mut [&mut lexer]).unwrap();
    assert_eq!(
        output,
        concat!(
            r#"document start(TEXT) write("a") end(TEXT) "#,
            r#"start(PUNCTUATION) write("<") end(PUNCTUATION) "#,
            r#"lexing(Inner) start(STRING) write("bc") end(STRING) /lexing(Inner) "#,
            r#"start(PUNCTUATION) write(">") end(PUNCTUATION) "#,
            r#"start(TEXT) write("d") end(TEXT) "#,
            r#"start(PUNCTUATION) write("<") end(PUNCTUATION) "#,
            r#"lexing(Inner) start(STRING) write("e") end(STRING) /lexing(Inner) "#,
            r#"start(PUNCTUATION) write(">") end(PUNCTUATION) /document "#,
        )
    );
    // one instance per delegation, each destroyed when its range is done
    assert_eq!(INNER_FINALIZED.load(Ordering::SeqCst), 2);
    assert_eq!(lexer.state().condition(), 0);
}

/// Hands everything to [`PER_BYTE`] without lexing anything itself.
struct Handover;

impl Grammar for Handover {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        if cx.is_at_end() {
            return ScanEvent::Done;
        }
        Delegation::full(&PER_BYTE, TokenKind::Text).into()
    }
}

static HANDOVER: LexerImplementation = LexerImplementation::new("Handover", &Handover);

#[test]
fn full_delegation_to_listed_lexer_leaves_nothing_to_the_outer() {
    let mut outer = Lexer::new(&HANDOVER);
    let mut inner = Lexer::new(&PER_BYTE);
    let output = trace(&Highlighter::new(), b"aaa", &mut [&mut outer, &mut inner]).unwrap();
    assert_eq!(
        output,
        concat!(
            r#"document lexing(PerByte) "#,
            r#"start(KEYWORD) write("a") write("a") write("a") end(KEYWORD) "#,
            r#"/lexing(PerByte) /document "#,
        )
    );
}

#[test]
fn top_level_lexer_is_not_bracketed() {
    let mut lexer = Lexer::new(&TEXT);
    let output = trace(&Highlighter::new(), b"x", &mut [&mut lexer]).unwrap();
    assert!(!output.contains("lexing("));
}

#[test]
fn shebang_passes_through_as_ignorable() {
    let mut lexer = Lexer::new(&TEXT);
    let output = highlight(
        b"#!/usr/bin/env text\nhello\n",
        &Formatter::new(&PLAIN),
        &mut [&mut lexer],
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "IGNORABLE: #!/usr/bin/env text\\n\nTEXT: hello\\n\n"
    );
}

#[test]
fn shebang_without_line_end_is_lexed() {
    let mut lexer = Lexer::new(&TEXT);
    let output = highlight(b"#!/bin/sh", &Formatter::new(&PLAIN), &mut [&mut lexer]).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "TEXT: #!/bin/sh\n");
}

#[test]
fn bom_is_not_rendered() {
    let mut lexer = Lexer::new(&TEXT);
    let output = trace(&Highlighter::new(), b"\xEF\xBB\xBFok", &mut [&mut lexer]).unwrap();
    assert_eq!(output, r#"document start(TEXT) write("ok") end(TEXT) /document "#);
}

/// Delegates its whole range to the next lexer of the ring, forever.
struct Ring(usize);

impl Grammar for Ring {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        if cx.is_at_end() {
            return ScanEvent::Done;
        }
        cx.advance(cx.rest().len());
        let next = &RING[(self.0 + 1) % RING.len()];
        Delegation::until(next, TokenKind::Text).into()
    }
}

macro_rules! ring {
    ($($index:literal),*) => {
        [$(LexerImplementation::new(concat!("Ring", $index), &Ring($index)),)*]
    };
}

static RING: [LexerImplementation; 17] = ring!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16);

#[test]
fn delegation_depth_is_bounded() {
    let mut lexer = Lexer::new(&RING[0]);
    let output = trace(&Highlighter::new(), b"xy", &mut [&mut lexer]).unwrap();

    let mut expected = String::from("document ");
    for index in 1..=DELEGATION_CAPACITY {
        expected.push_str(&format!("lexing(Ring{index}) "));
    }
    expected.push_str(r#"start(TEXT) write("xy") end(TEXT) "#);
    for index in (1..=DELEGATION_CAPACITY).rev() {
        expected.push_str(&format!("/lexing(Ring{index}) "));
    }
    expected.push_str("/document ");
    assert_eq!(output, expected);
}

static STUCK_CALLS: AtomicUsize = AtomicUsize::new(0);

/// Claims a token without ever moving the cursor.
struct Stuck;

impl Grammar for Stuck {
    fn scan(&self, _cx: &mut ScanContext<'_>) -> ScanEvent {
        STUCK_CALLS.fetch_add(1, Ordering::SeqCst);
        ScanEvent::Token(TokenKind::Text)
    }
}

static STUCK: LexerImplementation = LexerImplementation::new("Stuck", &Stuck);

#[test]
fn stalled_lexer_aborts_after_exactly_eight_calls() {
    let mut lexer = Lexer::new(&STUCK);
    let err = trace(&Highlighter::new(), b"abc", &mut [&mut lexer]).unwrap_err();
    assert_eq!(
        err,
        HighlightError::EngineAborted {
            lexer: "Stuck",
            position: 0,
            iterations: STALL_LIMIT,
        }
    );
    assert_eq!(STUCK_CALLS.load(Ordering::SeqCst), 8);
    assert_eq!(
        err.to_string(),
        "lexer Stuck made no progress at byte 0 after 8 iterations"
    );
}

/// Keeps accumulating without consuming anything.
struct Hesitant;

impl Grammar for Hesitant {
    fn scan(&self, _cx: &mut ScanContext<'_>) -> ScanEvent {
        ScanEvent::Continue
    }
}

static HESITANT: LexerImplementation = LexerImplementation::new("Hesitant", &Hesitant);

#[test]
fn endless_continue_aborts() {
    let mut lexer = Lexer::new(&HESITANT);
    let err = trace(&Highlighter::new(), b"abc", &mut [&mut lexer]).unwrap_err();
    assert!(matches!(err, HighlightError::EngineAborted { lexer: "Hesitant", .. }));
}

/// Reads one byte per call and only reports the token at a newline.
struct Lines;

impl Grammar for Lines {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        match cx.bump() {
            None => ScanEvent::Done,
            Some(b'\n') => ScanEvent::Token(TokenKind::Comment),
            Some(_) => ScanEvent::Continue,
        }
    }
}

static LINES: LexerImplementation = LexerImplementation::new("Lines", &Lines);

#[test]
fn continue_extends_the_pending_span() {
    let mut lexer = Lexer::new(&LINES);
    let output = trace(&Highlighter::new(), b"ab\ncd\n", &mut [&mut lexer]).unwrap();
    assert_eq!(
        output,
        r#"document start(COMMENT) write("ab\n") write("cd\n") end(COMMENT) /document "#
    );
}

#[test]
fn span_open_at_end_is_emitted_as_text() {
    let mut lexer = Lexer::new(&LINES);
    let output = trace(&Highlighter::new(), b"ab\ncd", &mut [&mut lexer]).unwrap();
    assert_eq!(
        output,
        concat!(
            r#"document start(COMMENT) write("ab\n") end(COMMENT) "#,
            r#"start(TEXT) write("cd") end(TEXT) /document "#,
        )
    );
}

/// Moves one byte ahead and hands that byte to [`REFUSER`].
struct Eager;

impl Grammar for Eager {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent {
        if cx.is_at_end() {
            return ScanEvent::Done;
        }
        cx.advance(1);
        Delegation::until(&REFUSER, TokenKind::Text).into()
    }
}

/// Gives back every range it is handed.
struct Refuser;

impl Grammar for Refuser {
    fn scan(&self, _cx: &mut ScanContext<'_>) -> ScanEvent {
        ScanEvent::Done
    }
}

static EAGER: LexerImplementation = LexerImplementation::new("Eager", &Eager);
static REFUSER: LexerImplementation = LexerImplementation::new("Refuser", &Refuser);

#[test]
fn delegation_that_consumes_nothing_aborts() {
    let mut lexer = Lexer::new(&EAGER);
    let err = trace(&Highlighter::new(), b"abc", &mut [&mut lexer]).unwrap_err();
    assert_eq!(
        err,
        HighlightError::EngineAborted {
            lexer: "Refuser",
            position: 0,
            iterations: STALL_LIMIT,
        }
    );
}

#[test]
fn parser_syntax_error_falls_back_to_lexer_kinds() {
    let mut lexer = Lexer::new(&JSON);
    let output = highlight(
        br#"{"a" 1, "b": 2}"#,
        &Formatter::new(&PLAIN),
        &mut [&mut lexer],
    )
    .unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(!output.contains("NAME_TAG"), "{output}");
    assert!(output.contains("STRING_DOUBLE: \"a\"\n"));
    assert!(output.contains("STRING_DOUBLE: \"b\"\n"));
}

#[test]
fn parser_reclassifies_keys() {
    let mut lexer = Lexer::new(&JSON);
    let output = highlight(br#"{"a": "b"}"#, &Formatter::new(&PLAIN), &mut [&mut lexer]).unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("NAME_TAG: \"a\"\n"));
    assert!(output.contains("STRING_DOUBLE: \"b\"\n"));
}

#[test]
fn until_delegation_reuses_preactivated_instance() {
    let source = b"+{\"a\": 1}\n";

    let mut diff = Lexer::from_query("diff?content=json").unwrap();
    let fresh = trace(&Highlighter::new(), source, &mut [&mut diff]).unwrap();
    assert!(fresh.contains("start(NAME_TAG)"), "{fresh}");

    let mut diff = Lexer::from_query("diff?content=json").unwrap();
    let mut json = Lexer::from_query("json?keys=off").unwrap();
    let reused = trace(&Highlighter::new(), source, &mut [&mut diff, &mut json]).unwrap();
    assert!(!reused.contains("NAME_TAG"), "{reused}");
    assert!(reused.contains("lexing(Json) "));
}

#[test]
fn delegated_body_keeps_diff_marker() {
    let mut diff = Lexer::from_query("diff?content=json").unwrap();
    let output = trace(&Highlighter::new(), b" 1\n-2\n", &mut [&mut diff]).unwrap();
    assert_eq!(
        output,
        concat!(
            r#"document start(IGNORABLE) write(" ") end(IGNORABLE) "#,
            r#"lexing(Json) start(NUMBER_DECIMAL) write("1") end(NUMBER_DECIMAL) "#,
            r#"start(IGNORABLE) write("\n") end(IGNORABLE) /lexing(Json) "#,
            r#"start(GENERIC_DELETED) write("-") end(GENERIC_DELETED) "#,
            r#"lexing(Json) start(NUMBER_DECIMAL) write("2") end(NUMBER_DECIMAL) "#,
            r#"start(IGNORABLE) write("\n") end(IGNORABLE) /lexing(Json) /document "#,
        )
    );
}

#[test]
fn caller_lexers_are_left_to_the_caller() {
    let mut diff = Lexer::new(&DIFF);
    let mut json = Lexer::new(&JSON);
    let config = HighlightConfig {
        engine: EngineConfig {
            parser_bridge: false,
            ..EngineConfig::default()
        },
    };
    Highlighter::with_config(config)
        .highlight(b"-x\n", &Formatter::new(&PLAIN), &mut [&mut diff, &mut json])
        .unwrap();
    assert_eq!(json.name(), "Json");
    assert_eq!(diff.destroy(&mut |_| {}).strings, 0);
}

#[test]
fn empty_lexer_list_is_rejected() {
    let err = highlight(b"x", &Formatter::new(&PLAIN), &mut []).unwrap_err();
    assert_eq!(err, HighlightError::NoLexer);
}
