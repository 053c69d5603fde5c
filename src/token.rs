//! Token kinds
//!
//! Every span a lexer produces is classified by a [`TokenKind`]. Kinds form a shallow
//! hierarchy (`NUMBER_HEXADECIMAL` is a `NUMBER`), carry a canonical name used by
//! textual formatters, a human description and the short class tag used in HTML
//! output. The table is fixed at compile time and shared by every component; per-kind
//! tables elsewhere are sized with [`TOKEN_COUNT`].

use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! token_kinds {
    ($( $variant:ident => $name:literal, $class:literal, $parent:expr, $doc:literal; )*) => {
        /// Classification of a lexical span.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TokenKind {
            $(
                #[doc = $doc]
                $variant,
            )*
        }

        impl TokenKind {
            /// Every kind, in value order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant,)*];

            /// Canonical upper-case name, e.g. `NUMBER_FLOAT`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name,)*
                }
            }

            /// Short class tag, e.g. `mf`.
            pub const fn css_class(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $class,)*
                }
            }

            pub const fn description(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $doc,)*
                }
            }

            /// Direct parent in the hierarchy, if any.
            pub const fn parent(self) -> Option<TokenKind> {
                match self {
                    $(TokenKind::$variant => $parent,)*
                }
            }
        }
    };
}

token_kinds! {
    Eos => "EOS", "", None, "end of stream";
    Ignorable => "IGNORABLE", "", None, "ignorable like spaces";
    Text => "TEXT", "", None, "regular text";
    TagPreproc => "TAG_PREPROC", "tp", None, "tag PI";
    Name => "NAME", "n", None, "any kind of name";
    NameBuiltin => "NAME_BUILTIN", "nb", Some(TokenKind::Name), "builtin names; names that are available in the global namespace";
    NameBuiltinPseudo => "NAME_BUILTIN_PSEUDO", "bp", Some(TokenKind::Name), "builtin names that are implicit";
    NameTag => "NAME_TAG", "nt", Some(TokenKind::Name), "tag name";
    NameEntity => "NAME_ENTITY", "ne", Some(TokenKind::Name), "HTML/XML name entity";
    NameAttribute => "NAME_ATTRIBUTE", "na", Some(TokenKind::Name), "tag attribute's name";
    NameVariable => "NAME_VARIABLE", "v", Some(TokenKind::Name), "variable name";
    NameVariableClass => "NAME_VARIABLE_CLASS", "vc", Some(TokenKind::NameVariable), "name of a class variable";
    NameVariableInstance => "NAME_VARIABLE_INSTANCE", "vi", Some(TokenKind::NameVariable), "name of a variable instance";
    NameVariableGlobal => "NAME_VARIABLE_GLOBAL", "vg", Some(TokenKind::NameVariable), "name of a global variable";
    NameFunction => "NAME_FUNCTION", "nf", Some(TokenKind::Name), "a function name";
    NameClass => "NAME_CLASS", "nc", Some(TokenKind::Name), "a class name";
    NameNamespace => "NAME_NAMESPACE", "nn", Some(TokenKind::Name), "a namespace name";
    Punctuation => "PUNCTUATION", "p", None, "syntax element like ';' in C";
    Keyword => "KEYWORD", "k", None, "keyword";
    KeywordDefault => "KEYWORD_DEFAULT", "kd", Some(TokenKind::Keyword), "default keyword";
    KeywordBuiltin => "KEYWORD_BUILTIN", "kb", Some(TokenKind::Keyword), "builtin keyword";
    KeywordConstant => "KEYWORD_CONSTANT", "kc", Some(TokenKind::Keyword), "keyword for constants";
    KeywordDeclaration => "KEYWORD_DECLARATION", "kd", Some(TokenKind::Keyword), "declaration keyword";
    KeywordNamespace => "KEYWORD_NAMESPACE", "kn", Some(TokenKind::Keyword), "namespace keyword";
    KeywordPseudo => "KEYWORD_PSEUDO", "kp", Some(TokenKind::Keyword), "pseudo keyword";
    KeywordReserved => "KEYWORD_RESERVED", "kr", Some(TokenKind::Keyword), "reserved keyword";
    KeywordType => "KEYWORD_TYPE", "kt", Some(TokenKind::Keyword), "builtin type";
    Operator => "OPERATOR", "o", None, "operator";
    Number => "NUMBER", "m", None, "any kind of number";
    NumberFloat => "NUMBER_FLOAT", "mf", Some(TokenKind::Number), "float number";
    NumberDecimal => "NUMBER_DECIMAL", "md", Some(TokenKind::Number), "decimal number";
    NumberBinary => "NUMBER_BINARY", "mb", Some(TokenKind::Number), "binary number";
    NumberOctal => "NUMBER_OCTAL", "mo", Some(TokenKind::Number), "octal number";
    NumberHexadecimal => "NUMBER_HEXADECIMAL", "mh", Some(TokenKind::Number), "hexadecimal number";
    Comment => "COMMENT", "c", None, "any kind of comment";
    CommentSingle => "COMMENT_SINGLE", "cs", Some(TokenKind::Comment), "comment which ends at the end of the line";
    CommentMultiline => "COMMENT_MULTILINE", "cm", Some(TokenKind::Comment), "multiline comment";
    CommentDocumentation => "COMMENT_DOCUMENTATION", "cd", Some(TokenKind::Comment), "comment with documentation value";
    String => "STRING", "s", None, "any kind of string";
    StringSingle => "STRING_SINGLE", "ss", Some(TokenKind::String), "single quoted string";
    StringDouble => "STRING_DOUBLE", "sd", Some(TokenKind::String), "double quoted string";
    StringBacktick => "STRING_BACKTICK", "sb", Some(TokenKind::String), "string enclosed in backticks";
    StringRegex => "STRING_REGEX", "sr", Some(TokenKind::String), "regular expression";
    StringInterned => "STRING_INTERNED", "si", Some(TokenKind::String), "interned string";
    Sequence => "SEQUENCE", "sq", None, "special sequence inside a string";
    SequenceEscaped => "SEQUENCE_ESCAPED", "es", Some(TokenKind::Sequence), "escaped sequence in string like \\n, \\x32, \\u1234, etc";
    SequenceInterpolated => "SEQUENCE_INTERPOLATED", "is", Some(TokenKind::Sequence), "sequence in string for interpolated variables";
    Literal => "LITERAL", "l", None, "any other literal";
    LiteralSize => "LITERAL_SIZE", "ls", Some(TokenKind::Literal), "size literals (eg: 3ko)";
    LiteralDuration => "LITERAL_DURATION", "ld", Some(TokenKind::Literal), "duration literals (eg: 23s)";
    Generic => "GENERIC", "g", None, "generic markup";
    GenericStrong => "GENERIC_STRONG", "gb", Some(TokenKind::Generic), "the token value as bold";
    GenericHeading => "GENERIC_HEADING", "gh", Some(TokenKind::Generic), "the token value is a headline";
    GenericSubheading => "GENERIC_SUBHEADING", "gs", Some(TokenKind::Generic), "the token value is a subheadline";
    GenericDeleted => "GENERIC_DELETED", "gd", Some(TokenKind::Generic), "marks the token value as deleted";
    GenericInserted => "GENERIC_INSERTED", "gi", Some(TokenKind::Generic), "marks the token value as inserted";
}

/// Number of token kinds; bounds every per-kind table.
pub const TOKEN_COUNT: usize = TokenKind::ALL.len();

impl TokenKind {
    /// Stable integer value, usable as an index into per-kind tables.
    pub const fn value(self) -> usize {
        self as usize
    }

    /// Look up a kind by its stable integer value.
    pub fn from_value(value: usize) -> Option<TokenKind> {
        TokenKind::ALL.get(value).copied()
    }

    /// Look up a kind by canonical name, ignoring case.
    pub fn from_name(name: &str) -> Option<TokenKind> {
        TokenKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// True if `self` is `ancestor` or one of its descendants.
    pub fn is_a(self, ancestor: TokenKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Iterate over `self` and its ancestors, nearest first.
    pub fn lineage(self) -> impl Iterator<Item = TokenKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
