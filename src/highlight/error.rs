use std::fmt;

/// Errors that abort a highlighting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// A grammar stopped making progress; this is a bug in that grammar.
    EngineAborted {
        lexer: &'static str,
        position: usize,
        iterations: usize,
    },
    /// No lexer was given.
    NoLexer,
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::EngineAborted {
                lexer,
                position,
                iterations,
            } => write!(
                f,
                "lexer {lexer} made no progress at byte {position} after {iterations} iterations"
            ),
            HighlightError::NoLexer => write!(f, "no lexer to highlight with"),
        }
    }
}

impl std::error::Error for HighlightError {}
