use crate::formatter::Renderer;
use crate::options::OptionSet;
use crate::token::TokenKind;

/// A queued token: a byte range of the input and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// Kind reported by the lexer
    pub default_kind: TokenKind,
    /// Kind to render, possibly changed by a push parser
    pub kind: TokenKind,
}

impl Span {
    pub fn new(start: usize, end: usize, kind: TokenKind) -> Self {
        Span {
            start,
            end,
            default_kind: kind,
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Bounded queue of spans not yet handed to the formatter.
#[derive(Debug)]
pub(crate) struct OutputBuffer {
    spans: Vec<Span>,
    capacity: usize,
}

impl OutputBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        OutputBuffer {
            spans: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub fn is_full(&self) -> bool {
        self.spans.len() >= self.capacity
    }

    pub fn pending_mut(&mut self) -> &mut [Span] {
        &mut self.spans
    }

    /// Drop every re-classification made on the queued spans.
    pub fn reset_kinds(&mut self) {
        for span in &mut self.spans {
            span.kind = span.default_kind;
        }
    }

    /// Hand every queued span to the emitter. The open run stays open.
    pub fn flush(&mut self, input: &[u8], emitter: &mut Emitter<'_>) {
        for span in self.spans.drain(..) {
            emitter.emit(span.kind, &input[span.start..span.end]);
        }
    }
}

/// Turns a stream of classified slices into coalesced formatter calls.
pub(crate) struct Emitter<'f> {
    renderer: &'static dyn Renderer,
    options: &'f OptionSet,
    out: Vec<u8>,
    run: Option<TokenKind>,
}

impl<'f> Emitter<'f> {
    pub fn new(renderer: &'static dyn Renderer, options: &'f OptionSet) -> Self {
        Emitter {
            renderer,
            options,
            out: Vec::new(),
            run: None,
        }
    }

    pub fn start_document(&mut self) {
        self.renderer.start_document(&mut self.out, self.options);
    }

    pub fn end_document(&mut self) {
        self.close_run();
        self.renderer.end_document(&mut self.out, self.options);
    }

    pub fn emit(&mut self, kind: TokenKind, text: &[u8]) {
        if text.is_empty() {
            return;
        }
        if self.run != Some(kind) {
            self.close_run();
            self.renderer.start_token(kind, &mut self.out, self.options);
            self.run = Some(kind);
        }
        self.renderer.write_token(text, &mut self.out, self.options);
    }

    /// Close the open run, if any.
    pub fn close_run(&mut self) {
        if let Some(kind) = self.run.take() {
            self.renderer.end_token(kind, &mut self.out, self.options);
        }
    }

    pub fn start_lexing(&mut self, lexer: &str) {
        self.close_run();
        self.renderer.start_lexing(lexer, &mut self.out, self.options);
    }

    pub fn end_lexing(&mut self, lexer: &str) {
        self.close_run();
        self.renderer.end_lexing(lexer, &mut self.out, self.options);
    }

    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}
