use super::declaration::{OptionDefault, OptionType};
use crate::lexer::{Lexer, LexerImplementation};
use crate::theme::{Theme, ThemeRegistry};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A string option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrValue {
    /// Borrowed declared default.
    Default(&'static str),
    /// Copy owned by the instance.
    Owned(Box<str>),
}

impl StrValue {
    pub fn as_str(&self) -> &str {
        match self {
            StrValue::Default(text) => text,
            StrValue::Owned(text) => text,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, StrValue::Owned(_))
    }
}

/// Capability through which a host exposes a lexer it keeps ownership of.
pub trait LexerHandle {
    /// The lexer behind the handle, if it is still alive.
    fn resolve(&self) -> Option<Rc<RefCell<Lexer>>>;
}

impl LexerHandle for Weak<RefCell<Lexer>> {
    fn resolve(&self) -> Option<Rc<RefCell<Lexer>>> {
        self.upgrade()
    }
}

/// A sub-lexer stored in a lexer-typed option.
pub enum LexerRef {
    /// Released together with the lexer holding it.
    Owned(Box<Lexer>),
    /// Owned by the host; only ever resolved, never destroyed.
    Borrowed(Rc<dyn LexerHandle>),
}

impl LexerRef {
    pub fn owned(lexer: Lexer) -> Self {
        LexerRef::Owned(Box::new(lexer))
    }

    pub fn borrowed(handle: impl LexerHandle + 'static) -> Self {
        LexerRef::Borrowed(Rc::new(handle))
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, LexerRef::Owned(_))
    }

    /// Run `f` against the referenced lexer.
    ///
    /// Returns `None` when a borrowed handle no longer resolves or the lexer is
    /// currently mutably borrowed by its host.
    pub fn with_lexer<R>(&self, f: impl FnOnce(&Lexer) -> R) -> Option<R> {
        match self {
            LexerRef::Owned(lexer) => Some(f(lexer)),
            LexerRef::Borrowed(handle) => {
                let shared = handle.resolve()?;
                let lexer = shared.try_borrow().ok()?;
                Some(f(&lexer))
            }
        }
    }

    /// Implementation of the referenced lexer.
    pub fn implementation(&self) -> Option<&'static LexerImplementation> {
        self.with_lexer(|lexer| lexer.implementation())
    }

    /// True when this reference designates the lexer at `target`.
    pub(crate) fn designates(&self, target: *const Lexer) -> bool {
        match self {
            LexerRef::Owned(lexer) => std::ptr::eq(&**lexer, target),
            LexerRef::Borrowed(handle) => handle
                .resolve()
                .map(|shared| std::ptr::eq(RefCell::as_ptr(&shared) as *const Lexer, target))
                .unwrap_or(false),
        }
    }
}

impl fmt::Debug for LexerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.implementation().map(|imp| imp.name).unwrap_or("?");
        match self {
            LexerRef::Owned(_) => write!(f, "Owned({name})"),
            LexerRef::Borrowed(_) => write!(f, "Borrowed({name})"),
        }
    }
}

/// A typed option value.
#[derive(Debug)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(StrValue),
    Lexer(Option<LexerRef>),
    Theme(Option<&'static Theme>),
}

impl OptionValue {
    /// An owned string value.
    pub fn string(text: impl Into<String>) -> Self {
        OptionValue::Str(StrValue::Owned(text.into().into_boxed_str()))
    }

    /// A lexer value owning `lexer`.
    pub fn lexer(lexer: Lexer) -> Self {
        OptionValue::Lexer(Some(LexerRef::owned(lexer)))
    }

    /// Value a freshly created instance holds for a declaration.
    pub(crate) fn from_default(default: OptionDefault) -> Self {
        match default {
            OptionDefault::Bool(value) => OptionValue::Bool(value),
            OptionDefault::Int(value) => OptionValue::Int(value),
            OptionDefault::Str(text) => OptionValue::Str(StrValue::Default(text)),
            OptionDefault::Lexer => OptionValue::Lexer(None),
            OptionDefault::Theme(name) => {
                OptionValue::Theme(name.and_then(|name| ThemeRegistry::builtin().by_name(name)))
            }
        }
    }

    pub fn kind(&self) -> OptionType {
        match self {
            OptionValue::Bool(_) => OptionType::Bool,
            OptionValue::Int(_) => OptionType::Int,
            OptionValue::Str(_) => OptionType::Str,
            OptionValue::Lexer(_) => OptionType::Lexer,
            OptionValue::Theme(_) => OptionType::Theme,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_theme(&self) -> Option<&'static Theme> {
        match self {
            OptionValue::Theme(theme) => *theme,
            _ => None,
        }
    }

    pub fn as_lexer(&self) -> Option<&LexerRef> {
        match self {
            OptionValue::Lexer(lexer) => lexer.as_ref(),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::string(value)
    }
}

impl From<&'static Theme> for OptionValue {
    fn from(theme: &'static Theme) -> Self {
        OptionValue::Theme(Some(theme))
    }
}

impl From<LexerRef> for OptionValue {
    fn from(lexer: LexerRef) -> Self {
        OptionValue::Lexer(Some(lexer))
    }
}
