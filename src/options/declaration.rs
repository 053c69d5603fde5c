use serde::Serialize;
use std::fmt;

/// The type of an option slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Bool,
    Int,
    #[serde(rename = "string")]
    Str,
    Lexer,
    Theme,
}

impl OptionType {
    pub fn name(self) -> &'static str {
        match self {
            OptionType::Bool => "bool",
            OptionType::Int => "int",
            OptionType::Str => "string",
            OptionType::Lexer => "lexer",
            OptionType::Theme => "theme",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared default of an option. The variant also fixes the option's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDefault {
    Bool(bool),
    Int(i64),
    Str(&'static str),
    /// Lexer options always default to "no sub-lexer".
    Lexer,
    /// Name of a built-in theme, or none.
    Theme(Option<&'static str>),
}

impl Serialize for OptionDefault {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionDefault::Bool(value) => serializer.serialize_bool(*value),
            OptionDefault::Int(value) => serializer.serialize_i64(*value),
            OptionDefault::Str(value) => serializer.serialize_str(value),
            OptionDefault::Lexer | OptionDefault::Theme(None) => serializer.serialize_none(),
            OptionDefault::Theme(Some(name)) => serializer.serialize_str(name),
        }
    }
}

/// Static description of one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionDeclaration {
    pub name: &'static str,
    pub default: OptionDefault,
    pub doc: &'static str,
}

impl OptionDeclaration {
    pub const fn bool(name: &'static str, default: bool, doc: &'static str) -> Self {
        OptionDeclaration {
            name,
            default: OptionDefault::Bool(default),
            doc,
        }
    }

    pub const fn int(name: &'static str, default: i64, doc: &'static str) -> Self {
        OptionDeclaration {
            name,
            default: OptionDefault::Int(default),
            doc,
        }
    }

    pub const fn string(name: &'static str, default: &'static str, doc: &'static str) -> Self {
        OptionDeclaration {
            name,
            default: OptionDefault::Str(default),
            doc,
        }
    }

    pub const fn lexer(name: &'static str, doc: &'static str) -> Self {
        OptionDeclaration {
            name,
            default: OptionDefault::Lexer,
            doc,
        }
    }

    pub const fn theme(name: &'static str, default: Option<&'static str>, doc: &'static str) -> Self {
        OptionDeclaration {
            name,
            default: OptionDefault::Theme(default),
            doc,
        }
    }

    pub fn kind(&self) -> OptionType {
        match self.default {
            OptionDefault::Bool(_) => OptionType::Bool,
            OptionDefault::Int(_) => OptionType::Int,
            OptionDefault::Str(_) => OptionType::Str,
            OptionDefault::Lexer => OptionType::Lexer,
            OptionDefault::Theme(_) => OptionType::Theme,
        }
    }
}
