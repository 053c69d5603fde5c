use super::implementation::LexerImplementation;
use super::registry::LexerRegistry;
use super::scan::ScanState;
use crate::options::{
    parse_value, LexerRef, LexerValues, OptionError, OptionSet, OptionValue, StrValue,
};

/// What [`Lexer::destroy`] released, sub-lexers included.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Released {
    /// Owned string values
    pub strings: usize,
    /// Owned sub-lexers destroyed along the way
    pub sublexers: usize,
}

/// A configured instance of a lexer implementation.
#[derive(Debug)]
pub struct Lexer {
    imp: &'static LexerImplementation,
    options: OptionSet,
    state: ScanState,
}

impl Lexer {
    /// Create an instance with every option at its default.
    pub fn new(imp: &'static LexerImplementation) -> Self {
        let options = OptionSet::new(imp.options);
        let mut state = ScanState::default();
        imp.grammar.init(&mut state, &options);
        tracing::trace!(lexer = imp.name, "lexer created");
        Lexer {
            imp,
            options,
            state,
        }
    }

    /// Create a built-in lexer from `name?option=value&option;...`.
    pub fn from_query(query: &str) -> Result<Self, OptionError> {
        LexerRegistry::builtin().create_from_query(query)
    }

    pub fn implementation(&self) -> &'static LexerImplementation {
        self.imp
    }

    pub fn name(&self) -> &'static str {
        self.imp.name
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ScanState {
        &mut self.state
    }

    /// Set an option and hand back the value it replaces.
    ///
    /// A lexer-valued option may not designate this very instance; such a request
    /// fails with [`OptionError::InvalidOption`] and leaves the option untouched.
    pub fn set_option(
        &mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<OptionValue, OptionError> {
        let value = value.into();
        let decl = self
            .options
            .declaration(name)
            .ok_or_else(|| OptionError::InvalidOption(name.to_string()))?;
        if value.kind() != decl.kind() {
            return Err(OptionError::TypeMismatch {
                option: name.to_string(),
                expected: decl.kind(),
                found: value.kind(),
            });
        }
        if let OptionValue::Lexer(Some(reference)) = &value {
            if reference.designates(self as *const Lexer) {
                tracing::debug!(lexer = self.imp.name, option = name, "rejected self reference");
                return Err(OptionError::InvalidOption(name.to_string()));
            }
        }
        self.options.replace(name, value)
    }

    /// Parse `text` according to the option's declared type, then set it.
    pub fn set_option_from_str(&mut self, name: &str, text: &str) -> Result<OptionValue, OptionError> {
        let decl = self
            .options
            .declaration(name)
            .ok_or_else(|| OptionError::InvalidOption(name.to_string()))?;
        let value = parse_value(decl, text, LexerValues::Allowed)?;
        self.set_option(name, value)
    }

    /// Visit every sub-lexer held in a lexer-typed option.
    pub fn each_sublexer(&self, mut f: impl FnMut(&Lexer)) {
        for (_, value) in self.options.iter() {
            if let Some(reference) = value.as_lexer() {
                reference.with_lexer(&mut f);
            }
        }
    }

    /// Destroy the instance.
    ///
    /// `on_sublexer` sees every sub-lexer this instance refers to. Owned sub-lexers are
    /// then destroyed recursively; borrowed ones are left to their owner.
    pub fn destroy(self, on_sublexer: &mut dyn FnMut(&Lexer)) -> Released {
        let Lexer {
            imp,
            options,
            mut state,
        } = self;
        imp.grammar.finalize(&mut state, &options);

        let mut released = Released::default();
        for value in options.into_values() {
            match value {
                OptionValue::Str(StrValue::Owned(_)) => released.strings += 1,
                OptionValue::Lexer(Some(reference)) => {
                    reference.with_lexer(|sublexer| on_sublexer(sublexer));
                    if let LexerRef::Owned(sublexer) = reference {
                        let nested = (*sublexer).destroy(on_sublexer);
                        released.strings += nested.strings;
                        released.sublexers += nested.sublexers + 1;
                    }
                }
                _ => {}
            }
        }
        tracing::trace!(
            lexer = imp.name,
            strings = released.strings,
            sublexers = released.sublexers,
            "lexer destroyed"
        );
        released
    }

    pub(crate) fn scan_parts(&mut self) -> (&'static LexerImplementation, &mut ScanState, &OptionSet) {
        (self.imp, &mut self.state, &self.options)
    }
}
