use super::implementation::{FormatterImplementation, Renderer};
use super::registry::FormatterRegistry;
use crate::options::{
    parse_value, LexerValues, OptionError, OptionSet, OptionType, OptionValue, StrValue,
};

/// A configured instance of a formatter implementation.
#[derive(Debug)]
pub struct Formatter {
    imp: &'static FormatterImplementation,
    options: OptionSet,
}

impl Formatter {
    pub fn new(imp: &'static FormatterImplementation) -> Self {
        Formatter {
            imp,
            options: OptionSet::new(imp.options),
        }
    }

    /// Create a built-in formatter from `name?option=value&option;...`.
    pub fn from_query(query: &str) -> Result<Self, OptionError> {
        FormatterRegistry::builtin().create_from_query(query)
    }

    pub fn implementation(&self) -> &'static FormatterImplementation {
        self.imp
    }

    pub fn name(&self) -> &'static str {
        self.imp.name
    }

    pub fn renderer(&self) -> &'static dyn Renderer {
        self.imp.renderer
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Set an option and hand back the value it replaces. Formatters never hold lexers.
    pub fn set_option(
        &mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<OptionValue, OptionError> {
        let value = value.into();
        if value.kind() == OptionType::Lexer {
            return Err(OptionError::InvalidValue {
                option: name.to_string(),
                value: format!("{value:?}"),
            });
        }
        self.options.replace(name, value)
    }

    pub fn set_option_from_str(&mut self, name: &str, text: &str) -> Result<OptionValue, OptionError> {
        let decl = self
            .options
            .declaration(name)
            .ok_or_else(|| OptionError::InvalidOption(name.to_string()))?;
        let value = parse_value(decl, text, LexerValues::Forbidden)?;
        self.options.replace(name, value)
    }

    /// Destroy the instance; returns the number of owned string values released.
    pub fn destroy(self) -> usize {
        self.options
            .into_values()
            .into_iter()
            .filter(|value| matches!(value, OptionValue::Str(StrValue::Owned(_))))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{BBCODE, HTML};
    use crate::lexer::Lexer;
    use crate::lexers::TEXT;

    #[test]
    fn test_defaults() {
        let formatter = Formatter::new(&HTML);
        assert_eq!(formatter.name(), "HTML");
        assert_eq!(formatter.options().str("cssclass"), Some(""));
    }

    #[test]
    fn test_lexer_values_rejected() {
        let mut formatter = Formatter::new(&HTML);
        let err = formatter
            .set_option("cssclass", OptionValue::lexer(Lexer::new(&TEXT)))
            .unwrap_err();
        assert!(matches!(err, OptionError::InvalidValue { .. }));
    }

    #[test]
    fn test_set_from_str() {
        let mut formatter = Formatter::new(&BBCODE);
        formatter.set_option_from_str("theme", "molokai").unwrap();
        assert_eq!(formatter.options().theme("theme").map(|t| t.name), Some("molokai"));
        assert_eq!(
            formatter.set_option_from_str("theme", "zenburn").unwrap_err(),
            OptionError::UnknownTheme("zenburn".to_string())
        );
        assert_eq!(
            formatter.set_option_from_str("nope", "x").unwrap_err(),
            OptionError::InvalidOption("nope".to_string())
        );
    }

    #[test]
    fn test_destroy_counts_owned_strings() {
        let mut formatter = Formatter::from_query("html?cssclass=code").unwrap();
        assert_eq!(formatter.options().str("cssclass"), Some("code"));
        formatter.set_option("cssclass", "listing").unwrap();
        assert_eq!(formatter.destroy(), 1);
        assert_eq!(Formatter::new(&HTML).destroy(), 0);
    }
}
