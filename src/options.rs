//! Option values
//!
//! Lexers and formatters are configured through named, typed options. Each
//! implementation declares its options statically ([`OptionDeclaration`]); every
//! instance then carries an [`OptionSet`] holding one [`OptionValue`] per declaration,
//! initialised from the declared defaults.
//!
//! Values follow explicit ownership rules:
//!
//! - string values borrow the static default until they are overwritten, at which point
//!   the instance owns its copy ([`StrValue`])
//! - lexer values either own their sub-lexer or borrow it through a [`LexerHandle`]
//!   supplied by a host ([`LexerRef`]); borrowed sub-lexers are never destroyed here
//! - theme values always borrow a static [`Theme`](crate::theme::Theme)

mod declaration;
mod error;
mod parse;
mod set;
mod value;

pub use declaration::{OptionDeclaration, OptionDefault, OptionType};
pub use error::OptionError;
pub use set::OptionSet;
pub use value::{LexerHandle, LexerRef, OptionValue, StrValue};

pub(crate) use parse::{parse_query, parse_value, LexerValues};
