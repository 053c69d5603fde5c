use super::declaration::OptionDeclaration;
use super::error::OptionError;
use super::value::{LexerRef, OptionValue};
use crate::theme::Theme;

/// The option slots of one lexer or formatter instance.
#[derive(Debug)]
pub struct OptionSet {
    declarations: &'static [OptionDeclaration],
    values: Vec<OptionValue>,
}

impl OptionSet {
    /// One slot per declaration, each holding its declared default.
    pub fn new(declarations: &'static [OptionDeclaration]) -> Self {
        let values = declarations
            .iter()
            .map(|decl| OptionValue::from_default(decl.default))
            .collect();
        OptionSet {
            declarations,
            values,
        }
    }

    pub fn declarations(&self) -> &'static [OptionDeclaration] {
        self.declarations
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Slot index of the option called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.declarations.iter().position(|decl| decl.name == name)
    }

    pub fn declaration(&self, name: &str) -> Option<&'static OptionDeclaration> {
        let declarations = self.declarations;
        declarations.iter().find(|decl| decl.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.position(name).and_then(|index| self.values.get(index))
    }

    /// Value of a boolean option; `false` when absent.
    pub fn bool(&self, name: &str) -> bool {
        self.get(name)
            .and_then(OptionValue::as_bool)
            .unwrap_or(false)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_int)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    pub fn theme(&self, name: &str) -> Option<&'static Theme> {
        self.get(name).and_then(OptionValue::as_theme)
    }

    pub fn lexer(&self, name: &str) -> Option<&LexerRef> {
        self.get(name).and_then(OptionValue::as_lexer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static OptionDeclaration, &OptionValue)> + '_ {
        self.declarations.iter().zip(self.values.iter())
    }

    /// Store `value` in the slot called `name` and hand back the value it replaces.
    ///
    /// The value must have the declared type; nothing changes on error.
    pub fn replace(&mut self, name: &str, value: OptionValue) -> Result<OptionValue, OptionError> {
        let index = self
            .position(name)
            .ok_or_else(|| OptionError::InvalidOption(name.to_string()))?;
        let expected = self.declarations[index].kind();
        if value.kind() != expected {
            return Err(OptionError::TypeMismatch {
                option: name.to_string(),
                expected,
                found: value.kind(),
            });
        }
        tracing::trace!(option = name, "option replaced");
        Ok(std::mem::replace(&mut self.values[index], value))
    }

    pub(crate) fn into_values(self) -> Vec<OptionValue> {
        self.values
    }
}
