use super::buffer::{Emitter, OutputBuffer, Span};
use super::context::{Frame, ProcessingContext};
use super::error::HighlightError;
use super::{DELEGATION_CAPACITY, STALL_LIMIT};
use crate::config::{HighlightConfig, ShebangMode};
use crate::formatter::Formatter;
use crate::lexer::{shebang_line_end, Delegation, DelegationMode, Lexer, ParserStep, ScanEvent};
use crate::token::TokenKind;
use tracing::{debug, error, trace, warn};

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Highlight `source` with the default configuration.
///
/// `lexers[0]` is the top-level lexer, the others are made available to delegations
/// from the start. All of them stay owned by the caller.
pub fn highlight(
    source: &[u8],
    formatter: &Formatter,
    lexers: &mut [&mut Lexer],
) -> Result<Vec<u8>, HighlightError> {
    Highlighter::new().highlight(source, formatter, lexers)
}

/// Runs highlighting calls with a given configuration.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    config: HighlightConfig,
}

impl Highlighter {
    pub fn new() -> Self {
        Highlighter::default()
    }

    pub fn with_config(config: HighlightConfig) -> Self {
        Highlighter { config }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Highlight `source`, returning the rendered document.
    pub fn highlight(
        &self,
        source: &[u8],
        formatter: &Formatter,
        lexers: &mut [&mut Lexer],
    ) -> Result<Vec<u8>, HighlightError> {
        let (top, others) = lexers
            .split_first_mut()
            .ok_or(HighlightError::NoLexer)?;
        let engine = &self.config.engine;

        let input = if engine.strip_bom {
            source.strip_prefix(BOM).unwrap_or(source)
        } else {
            source
        };

        let mut run = Run {
            input,
            context: ProcessingContext::new(
                &mut **top,
                others.iter_mut().map(|lexer| &mut **lexer),
                engine.parser_bridge,
            ),
            buffer: OutputBuffer::new(engine.buffer_capacity),
            emitter: Emitter::new(formatter.renderer(), formatter.options()),
            text: 0,
            cursor: 0,
            limit: input.len(),
            accumulating: false,
            stalls: 0,
        };
        run.emitter.start_document();

        if engine.shebang == ShebangMode::PassThrough {
            if let Some(end) = shebang_line_end(input) {
                run.buffer.push(Span::new(0, end, TokenKind::Ignorable));
                run.cursor = end;
            }
        }

        run.drive()?;
        Ok(run.finish())
    }
}

/// State of one highlighting call.
struct Run<'i, 'l, 'f> {
    input: &'i [u8],
    context: ProcessingContext<'l>,
    buffer: OutputBuffer,
    emitter: Emitter<'f>,
    /// Start of the pending span
    text: usize,
    cursor: usize,
    limit: usize,
    accumulating: bool,
    stalls: usize,
}

impl Run<'_, '_, '_> {
    fn drive(&mut self) -> Result<(), HighlightError> {
        loop {
            if !self.accumulating {
                self.text = self.cursor;
            }
            self.accumulating = false;

            let before = self.cursor;
            let Some(scanned) = self
                .context
                .scan(self.input, self.text, self.cursor, self.limit)
            else {
                break;
            };
            self.cursor = scanned.cursor;
            trace!(lexer = scanned.lexer.name, event = ?scanned.event, cursor = self.cursor, "scan");

            match scanned.event {
                ScanEvent::Token(kind) => self.token(kind),
                ScanEvent::Continue => self.accumulating = true,
                ScanEvent::Done => {
                    self.unterminated(scanned.lexer.name);
                    match self.context.pop_frame() {
                        // a child that consumed nothing counts as a stall
                        Some(frame) => {
                            let consumed = self.cursor > frame.start;
                            self.leave(frame);
                            if !consumed {
                                self.stall(scanned.lexer.name)?;
                            }
                            continue;
                        }
                        None => break,
                    }
                }
                ScanEvent::Delegate(delegation) => {
                    if self.delegate(delegation) {
                        continue;
                    }
                }
            }

            if self.cursor > before {
                self.stalls = 0;
            } else {
                self.stall(scanned.lexer.name)?;
            }
        }
        Ok(())
    }

    fn stall(&mut self, lexer: &'static str) -> Result<(), HighlightError> {
        self.stalls += 1;
        if self.stalls < STALL_LIMIT {
            return Ok(());
        }
        error!(lexer, position = self.cursor, "lexer made no progress, aborting");
        Err(HighlightError::EngineAborted {
            lexer,
            position: self.cursor,
            iterations: self.stalls,
        })
    }

    /// Emit a span left open by `Continue` events as plain text.
    fn unterminated(&mut self, lexer: &'static str) {
        if self.cursor <= self.text {
            return;
        }
        warn!(lexer, start = self.text, end = self.cursor, "lexer finished inside a token");
        self.buffer.push(Span::new(self.text, self.cursor, TokenKind::Text));
        if self.buffer.is_full() {
            self.buffer.flush(self.input, &mut self.emitter);
        }
        self.text = self.cursor;
    }

    fn token(&mut self, kind: TokenKind) {
        if self.cursor <= self.text {
            return;
        }
        self.buffer.push(Span::new(self.text, self.cursor, kind));

        if let Some(parser) = self.context.parser() {
            let text = &self.input[self.text..self.cursor];
            if parser.feed(kind, text, self.buffer.pending_mut()) == ParserStep::SyntaxError {
                debug!(position = self.text, "syntax error, falling back to lexer output");
                self.context.disable_parser_bridge();
                self.buffer.reset_kinds();
            }
        }

        if self.buffer.is_full() {
            self.buffer.flush(self.input, &mut self.emitter);
        }
    }

    /// Returns whether a frame was pushed; a refused delegation falls back instead.
    fn delegate(&mut self, delegation: Delegation) -> bool {
        let target = delegation.target;
        let id = target.id();
        let reuse = self.context.contains(id);
        if self.context.depth() >= DELEGATION_CAPACITY || (!reuse && self.context.stack_is_full()) {
            warn!(
                lexer = target.name,
                depth = self.context.depth(),
                "delegation refused, emitting fallback token"
            );
            self.fallback(delegation);
            return false;
        }
        if !reuse {
            self.context.activate(target);
        }
        self.context.push_frame(Frame {
            mode: delegation.mode,
            parent: self.context.active(),
            child: id,
            start: self.text,
            saved_limit: self.limit,
            resume: delegation.resume,
            activated: !reuse,
        });
        if delegation.mode == DelegationMode::Until {
            self.limit = self.cursor;
        }
        self.cursor = self.text;
        debug!(lexer = target.name, mode = ?delegation.mode, start = self.text, limit = self.limit, "delegating");

        self.buffer.flush(self.input, &mut self.emitter);
        self.emitter.start_lexing(target.name);
        self.context.set_active(id);
        true
    }

    /// Emit the pending span as the delegation's fallback kind instead.
    fn fallback(&mut self, delegation: Delegation) {
        if delegation.mode == DelegationMode::Full && self.cursor == self.text {
            self.cursor = self.limit;
        }
        self.token(delegation.fallback);
    }

    fn leave(&mut self, frame: Frame) {
        self.buffer.flush(self.input, &mut self.emitter);
        self.emitter.end_lexing(self.context.name(frame.child));
        debug!(lexer = self.context.name(frame.child), position = self.cursor, "delegation done");

        self.limit = frame.saved_limit;
        if let Some(condition) = frame.resume {
            self.context.resume(frame.parent, condition);
        }
        self.context.set_active(frame.parent);
        if frame.mode == DelegationMode::Full && frame.activated {
            self.context.deactivate(frame.child);
        }
    }

    fn finish(mut self) -> Vec<u8> {
        self.buffer.flush(self.input, &mut self.emitter);
        self.emitter.end_document();
        self.emitter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::formats::PLAIN;
    use crate::lexers::{JSON, TEXT};
    use crate::testing::TRACE;

    fn plain(source: &[u8], lexer: &mut Lexer) -> String {
        let output = highlight(source, &Formatter::new(&PLAIN), &mut [lexer]).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_no_lexer() {
        let err = highlight(b"x", &Formatter::new(&PLAIN), &mut []).unwrap_err();
        assert_eq!(err, HighlightError::NoLexer);
    }

    #[test]
    fn test_empty_input() {
        let mut text = Lexer::new(&TEXT);
        let output = highlight(b"", &Formatter::new(&TRACE), &mut [&mut text]).unwrap();
        assert_eq!(output, b"document /document ");
    }

    #[test]
    fn test_text_is_one_run() {
        let mut text = Lexer::new(&TEXT);
        assert_eq!(plain(b"a\tb", &mut text), "TEXT: a\\tb\n");
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut text = Lexer::new(&TEXT);
        assert_eq!(plain(b"\xEF\xBB\xBFhi", &mut text), "TEXT: hi\n");
    }

    #[test]
    fn test_bom_kept_when_configured() {
        let mut config = HighlightConfig::default();
        config.engine.strip_bom = false;
        let mut text = Lexer::new(&TEXT);
        let output = Highlighter::with_config(config)
            .highlight(b"\xEF\xBB\xBFhi", &Formatter::new(&PLAIN), &mut [&mut text])
            .unwrap();
        assert_eq!(output, b"TEXT: \\xEF\\xBB\\xBFhi\n");
    }

    #[test]
    fn test_shebang_lexed_when_configured() {
        let config = HighlightConfig {
            engine: EngineConfig {
                shebang: ShebangMode::Lex,
                ..EngineConfig::default()
            },
        };
        let mut text = Lexer::new(&TEXT);
        let output = Highlighter::with_config(config)
            .highlight(b"#!/bin/sh\nls\n", &Formatter::new(&PLAIN), &mut [&mut text])
            .unwrap();
        assert_eq!(output, b"TEXT: #!/bin/sh\\nls\\n\n");
    }

    #[test]
    fn test_json_keys() {
        let mut json = Lexer::new(&JSON);
        assert_eq!(
            plain(br#"{"a":1}"#, &mut json),
            "PUNCTUATION: {\nNAME_TAG: \"a\"\nPUNCTUATION: :\nNUMBER_DECIMAL: 1\nPUNCTUATION: }\n"
        );
    }

    #[test]
    fn test_json_without_bridge() {
        let mut config = HighlightConfig::default();
        config.engine.parser_bridge = false;
        let mut json = Lexer::new(&JSON);
        let output = Highlighter::with_config(config)
            .highlight(br#"{"a":1}"#, &Formatter::new(&PLAIN), &mut [&mut json])
            .unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("STRING_DOUBLE: \"a\"\n"));
        assert!(!output.contains("NAME_TAG"));
    }
}
