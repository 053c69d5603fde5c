use super::parser::PushParser;
use super::scan::{ScanContext, ScanEvent, ScanState};
use crate::options::{OptionDeclaration, OptionSet};
use std::fmt;

/// The scanning behaviour of one language.
///
/// Only [`scan`](Grammar::scan) is required. Each call examines the input from the
/// context's cursor, advances it over what it recognised and reports what happened.
pub trait Grammar: Send + Sync {
    fn scan(&self, cx: &mut ScanContext<'_>) -> ScanEvent;

    /// Score how likely `input` is written in this language; 0 means "not at all".
    fn analyse(&self, _input: &[u8]) -> i32 {
        0
    }

    /// Called once when an instance is created.
    fn init(&self, _state: &mut ScanState, _options: &OptionSet) {}

    /// Called once when an instance is destroyed.
    fn finalize(&self, _state: &mut ScanState, _options: &OptionSet) {}

    /// Optional push parser refining the tokens of an instance configured with `options`.
    fn parser(&self, _options: &OptionSet) -> Option<Box<dyn PushParser>> {
        None
    }
}

/// Static descriptor of a lexer.
pub struct LexerImplementation {
    pub name: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    /// Filename globs, matched against basenames
    pub patterns: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
    /// Interpreter globs, matched against the program named by a shebang line
    pub interpreters: &'static [&'static str],
    pub options: &'static [OptionDeclaration],
    /// Implementations this grammar may delegate to
    pub dependencies: &'static [&'static LexerImplementation],
    pub grammar: &'static dyn Grammar,
}

impl LexerImplementation {
    /// A descriptor with no aliases, patterns or options; meant as the base of a
    /// struct update expression.
    pub const fn new(name: &'static str, grammar: &'static dyn Grammar) -> Self {
        LexerImplementation {
            name,
            description: "",
            aliases: &[],
            patterns: &[],
            mimetypes: &[],
            interpreters: &[],
            options: &[],
            dependencies: &[],
            grammar,
        }
    }

    pub fn analyse(&self, input: &[u8]) -> i32 {
        self.grammar.analyse(input)
    }

    pub fn option(&self, name: &str) -> Option<&'static OptionDeclaration> {
        let options = self.options;
        options.iter().find(|decl| decl.name == name)
    }

    /// True if `name` is the name or an alias of this lexer, ignoring case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }

    pub(crate) fn id(&'static self) -> ImplId {
        ImplId(self as *const LexerImplementation as usize)
    }
}

impl fmt::Debug for LexerImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexerImplementation")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("patterns", &self.patterns)
            .field("mimetypes", &self.mimetypes)
            .field("interpreters", &self.interpreters)
            .finish_non_exhaustive()
    }
}

impl PartialEq for LexerImplementation {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for LexerImplementation {}

/// Identity of a descriptor, used to key live instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ImplId(usize);
