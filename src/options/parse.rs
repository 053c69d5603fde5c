//! String-encoded option values
//!
//! Hosts (command lines, bindings) configure instances with text. The declared option
//! type directs the parse; theme and lexer names resolve against the built-in
//! registries.

use super::declaration::{OptionDeclaration, OptionType};
use super::error::OptionError;
use super::value::OptionValue;
use crate::lexer::{Lexer, LexerRegistry};
use crate::theme::ThemeRegistry;

/// Whether a lexer-typed value may be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexerValues {
    Allowed,
    Forbidden,
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.is_empty() || text.eq_ignore_ascii_case("on") || text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("off") || text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        text.parse::<i64>().ok().map(|number| number != 0)
    }
}

pub(crate) fn parse_value(
    decl: &OptionDeclaration,
    text: &str,
    lexers: LexerValues,
) -> Result<OptionValue, OptionError> {
    let invalid = || OptionError::InvalidValue {
        option: decl.name.to_string(),
        value: text.to_string(),
    };
    match decl.kind() {
        OptionType::Bool => parse_bool(text).map(OptionValue::Bool).ok_or_else(invalid),
        OptionType::Int => text
            .parse::<i64>()
            .map(OptionValue::Int)
            .map_err(|_| invalid()),
        OptionType::Str => Ok(OptionValue::string(text)),
        OptionType::Theme => ThemeRegistry::builtin()
            .by_name(text)
            .map(|theme| OptionValue::Theme(Some(theme)))
            .ok_or_else(|| OptionError::UnknownTheme(text.to_string())),
        OptionType::Lexer => {
            if lexers == LexerValues::Forbidden {
                return Err(invalid());
            }
            LexerRegistry::builtin()
                .by_name(text)
                .map(|imp| OptionValue::lexer(Lexer::new(imp)))
                .ok_or_else(|| OptionError::UnknownLexer(text.to_string()))
        }
    }
}

/// Split `name?opt=value&flag;other=value` into the name and its option pairs.
///
/// Pairs are separated by `;` or `&`; a pair without `=` has the empty string as value.
pub(crate) fn parse_query(query: &str) -> (&str, Vec<(&str, &str)>) {
    let (name, rest) = query.split_once('?').unwrap_or((query, ""));
    let pairs = rest
        .split([';', '&'])
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .collect();
    (name, pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FLAG: OptionDeclaration = OptionDeclaration::bool("flag", false, "");
    const COUNT: OptionDeclaration = OptionDeclaration::int("count", 0, "");
    const THEME: OptionDeclaration = OptionDeclaration::theme("theme", None, "");
    const SUB: OptionDeclaration = OptionDeclaration::lexer("sub", "");

    #[rstest]
    #[case("", true)]
    #[case("on", true)]
    #[case("TRUE", true)]
    #[case("Off", false)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("12", true)]
    fn test_bool_values(#[case] text: &str, #[case] expected: bool) {
        let value = parse_value(&FLAG, text, LexerValues::Allowed).unwrap();
        assert_eq!(value.as_bool(), Some(expected));
    }

    #[rstest]
    #[case("maybe")]
    #[case("yes")]
    fn test_bool_rejects(#[case] text: &str) {
        assert!(matches!(
            parse_value(&FLAG, text, LexerValues::Allowed),
            Err(OptionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_int_values() {
        let value = parse_value(&COUNT, "-42", LexerValues::Allowed).unwrap();
        assert_eq!(value.as_int(), Some(-42));
        assert!(parse_value(&COUNT, "4x", LexerValues::Allowed).is_err());
    }

    #[test]
    fn test_theme_lookup() {
        let value = parse_value(&THEME, "molokai", LexerValues::Allowed).unwrap();
        assert_eq!(value.as_theme().map(|t| t.name), Some("molokai"));
        assert_eq!(
            parse_value(&THEME, "dracula", LexerValues::Allowed).unwrap_err(),
            OptionError::UnknownTheme("dracula".to_string())
        );
    }

    #[test]
    fn test_lexer_lookup() {
        let value = parse_value(&SUB, "txt", LexerValues::Allowed).unwrap();
        let lexer = value.as_lexer().unwrap();
        assert!(lexer.is_owned());
        assert_eq!(lexer.implementation().map(|imp| imp.name), Some("Text"));
        assert_eq!(
            parse_value(&SUB, "cobol", LexerValues::Allowed).unwrap_err(),
            OptionError::UnknownLexer("cobol".to_string())
        );
    }

    #[test]
    fn test_lexer_forbidden() {
        assert!(matches!(
            parse_value(&SUB, "text", LexerValues::Forbidden),
            Err(OptionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_query_split() {
        let (name, pairs) = parse_query("json?keys=off&indent;mode=a=b");
        assert_eq!(name, "json");
        assert_eq!(pairs, vec![("keys", "off"), ("indent", ""), ("mode", "a=b")]);
        assert_eq!(parse_query("text"), ("text", vec![]));
    }
}
