use super::declaration::OptionType;
use std::fmt;

/// Error raised while configuring a lexer or formatter instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// The value's variant differs from the declared option type
    TypeMismatch {
        option: String,
        expected: OptionType,
        found: OptionType,
    },
    /// A lexer name did not resolve
    UnknownLexer(String),
    /// A theme name did not resolve
    UnknownTheme(String),
    /// A string-encoded value could not be parsed, or the type is not allowed here
    InvalidValue { option: String, value: String },
    /// Unknown option name, or a lexer referring to itself
    InvalidOption(String),
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::TypeMismatch {
                option,
                expected,
                found,
            } => write!(f, "Option '{option}' expects a {expected} value, got {found}"),
            OptionError::UnknownLexer(name) => write!(f, "Unknown lexer '{name}'"),
            OptionError::UnknownTheme(name) => write!(f, "Unknown theme '{name}'"),
            OptionError::InvalidValue { option, value } => {
                write!(f, "Invalid value '{value}' for option '{option}'")
            }
            OptionError::InvalidOption(name) => write!(f, "Invalid option '{name}'"),
        }
    }
}

impl std::error::Error for OptionError {}
