use super::implementation::LexerImplementation;
use crate::options::OptionSet;
use crate::token::TokenKind;

/// Mutable scanner state of a lexer instance: the current condition (lexical state)
/// and a stack of saved conditions for nested constructs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanState {
    condition: i32,
    stack: Vec<i32>,
}

impl ScanState {
    pub fn condition(&self) -> i32 {
        self.condition
    }

    /// Switch to `condition` without saving the current one.
    pub fn begin(&mut self, condition: i32) {
        self.condition = condition;
    }

    /// Save the current condition and switch to `condition`.
    pub fn push(&mut self, condition: i32) {
        self.stack.push(self.condition);
        self.condition = condition;
    }

    /// Restore the last saved condition. Returns false when nothing was saved.
    pub fn pop(&mut self) -> bool {
        match self.stack.pop() {
            Some(condition) => {
                self.condition = condition;
                true
            }
            None => false,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// How a delegated grammar's range ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationMode {
    /// The delegate decides on its own where to stop.
    Full,
    /// The delegate scans exactly the pending span.
    Until,
}

/// A request to hand the pending span to another grammar.
#[derive(Debug, Clone, Copy)]
pub struct Delegation {
    pub mode: DelegationMode,
    pub target: &'static LexerImplementation,
    /// Kind given to the pending span if the delegation cannot take place
    pub fallback: TokenKind,
    /// Condition the delegating lexer resumes in once the delegate is done
    pub resume: Option<i32>,
}

impl Delegation {
    pub fn full(target: &'static LexerImplementation, fallback: TokenKind) -> Self {
        Delegation {
            mode: DelegationMode::Full,
            target,
            fallback,
            resume: None,
        }
    }

    pub fn until(target: &'static LexerImplementation, fallback: TokenKind) -> Self {
        Delegation {
            mode: DelegationMode::Until,
            target,
            fallback,
            resume: None,
        }
    }

    pub fn resume_in(mut self, condition: i32) -> Self {
        self.resume = Some(condition);
        self
    }
}

/// Outcome of one scan call.
#[derive(Debug, Clone, Copy)]
pub enum ScanEvent {
    /// The span from the token start to the cursor is a token of this kind.
    Token(TokenKind),
    /// Keep the span open; the next call extends it.
    Continue,
    /// The grammar has nothing more to scan in its range.
    Done,
    Delegate(Delegation),
}

impl From<Delegation> for ScanEvent {
    fn from(delegation: Delegation) -> Self {
        ScanEvent::Delegate(delegation)
    }
}

/// The view a grammar gets of the input during one scan call.
///
/// Positions are byte offsets into the whole input. The grammar may move the cursor
/// anywhere between the token start and the limit; the pending span is
/// `token_start..cursor`.
pub struct ScanContext<'a> {
    input: &'a [u8],
    token_start: usize,
    cursor: usize,
    limit: usize,
    state: &'a mut ScanState,
    options: &'a OptionSet,
}

impl<'a> ScanContext<'a> {
    pub fn new(
        input: &'a [u8],
        token_start: usize,
        limit: usize,
        state: &'a mut ScanState,
        options: &'a OptionSet,
    ) -> Self {
        let limit = limit.min(input.len());
        let token_start = token_start.min(limit);
        ScanContext {
            input,
            token_start,
            cursor: token_start,
            limit,
            state,
            options,
        }
    }

    /// Start with the cursor already past the token start (span still open).
    pub(crate) fn resuming(mut self, cursor: usize) -> Self {
        self.cursor = cursor.clamp(self.token_start, self.limit);
        self
    }

    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    pub fn token_start(&self) -> usize {
        self.token_start
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes of the pending span.
    pub fn text(&self) -> &'a [u8] {
        &self.input[self.token_start..self.cursor]
    }

    /// Bytes left to scan.
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.cursor..self.limit]
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.limit
    }

    /// True when the cursor sits at the start of a line.
    pub fn at_line_start(&self) -> bool {
        self.cursor == 0 || self.input[self.cursor - 1] == b'\n'
    }

    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.rest().get(offset).copied()
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.cursor += 1;
        Some(byte)
    }

    /// Move forward `count` bytes, stopping at the limit.
    pub fn advance(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_add(count).min(self.limit);
    }

    /// Move forward while `pred` holds. Returns the number of bytes skipped.
    pub fn advance_while(&mut self, mut pred: impl FnMut(u8) -> bool) -> usize {
        let count = self.rest().iter().take_while(|byte| pred(**byte)).count();
        self.cursor += count;
        count
    }

    /// Move past the end of the current line, including its terminator (`\n`, `\r`
    /// or `\r\n`). Returns false if the line has no terminator before the limit.
    pub fn advance_line(&mut self) -> bool {
        self.advance_while(|byte| byte != b'\n' && byte != b'\r');
        match self.peek() {
            Some(b'\r') => {
                self.cursor += 1;
                if self.peek() == Some(b'\n') {
                    self.cursor += 1;
                }
                true
            }
            Some(b'\n') => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    /// Move the cursor back or forth, within the pending span and the limit.
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.clamp(self.token_start, self.limit);
    }

    pub fn state(&mut self) -> &mut ScanState {
        self.state
    }

    pub fn condition(&self) -> i32 {
        self.state.condition()
    }

    pub fn options(&self) -> &'a OptionSet {
        self.options
    }
}
