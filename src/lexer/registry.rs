//! Lexer registry
//!
//! An ordered, immutable table of lexer descriptors. Registration order matters: when
//! several lexers claim the same input with the same confidence, the one registered
//! first wins.

use super::glob::Glob;
use super::implementation::LexerImplementation;
use super::instance::Lexer;
use crate::lexers;
use crate::options::{parse_query, OptionDeclaration, OptionDefault, OptionError, OptionType};
use once_cell::sync::Lazy;
use serde::Serialize;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SHEBANG: &[u8] = b"#!";

static BUILTIN: Lazy<LexerRegistry> = Lazy::new(|| LexerRegistry::new(lexers::builtin()));

struct Entry {
    imp: &'static LexerImplementation,
    patterns: Vec<Glob>,
    interpreters: Vec<Glob>,
}

impl Entry {
    fn new(imp: &'static LexerImplementation) -> Self {
        let compile =
            |globs: &[&str]| -> Vec<Glob> { globs.iter().filter_map(|glob| Glob::new(glob)).collect() };
        Entry {
            imp,
            patterns: compile(imp.patterns),
            interpreters: compile(imp.interpreters),
        }
    }
}

/// Serializable summary of one option declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub default: OptionDefault,
    pub doc: &'static str,
}

impl From<&OptionDeclaration> for OptionInfo {
    fn from(decl: &OptionDeclaration) -> Self {
        OptionInfo {
            name: decl.name,
            kind: decl.kind(),
            default: decl.default,
            doc: decl.doc,
        }
    }
}

/// Serializable summary of one lexer implementation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexerInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    pub patterns: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
    pub interpreters: &'static [&'static str],
    pub options: Vec<OptionInfo>,
}

impl From<&LexerImplementation> for LexerInfo {
    fn from(imp: &LexerImplementation) -> Self {
        LexerInfo {
            name: imp.name,
            description: imp.description,
            aliases: imp.aliases,
            patterns: imp.patterns,
            mimetypes: imp.mimetypes,
            interpreters: imp.interpreters,
            options: imp.options.iter().map(OptionInfo::from).collect(),
        }
    }
}

/// Registry of lexer implementations
pub struct LexerRegistry {
    entries: Vec<Entry>,
}

impl LexerRegistry {
    /// Build a registry; globs are compiled once, here.
    pub fn new(implementations: Vec<&'static LexerImplementation>) -> Self {
        LexerRegistry {
            entries: implementations.into_iter().map(Entry::new).collect(),
        }
    }

    /// The process-wide registry of built-in lexers.
    pub fn builtin() -> &'static LexerRegistry {
        &BUILTIN
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Implementations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static LexerImplementation> + '_ {
        self.entries.iter().map(|entry| entry.imp)
    }

    /// Match the name or any alias, ignoring case.
    pub fn by_name(&self, name: &str) -> Option<&'static LexerImplementation> {
        self.iter().find(|imp| imp.answers_to(name))
    }

    /// Match the basename of `path` against filename globs.
    pub fn for_filename(&self, path: &str) -> Option<&'static LexerImplementation> {
        let basename = basename(path);
        self.entries
            .iter()
            .find(|entry| entry.patterns.iter().any(|glob| glob.matches(basename)))
            .map(|entry| entry.imp)
    }

    pub fn for_mimetype(&self, mimetype: &str) -> Option<&'static LexerImplementation> {
        self.iter().find(|imp| imp.mimetypes.contains(&mimetype))
    }

    /// Match the basename of an interpreter path against interpreter globs.
    pub fn for_interpreter(&self, interpreter: &str) -> Option<&'static LexerImplementation> {
        let basename = basename(interpreter);
        self.entries
            .iter()
            .find(|entry| entry.interpreters.iter().any(|glob| glob.matches(basename)))
            .map(|entry| entry.imp)
    }

    /// Guess the language of `input`.
    ///
    /// A shebang line naming a known interpreter decides immediately. Otherwise every
    /// lexer scores the input and the best strictly positive score wins, the earliest
    /// registered one on ties.
    pub fn guess(&self, input: &[u8]) -> Option<&'static LexerImplementation> {
        let mut input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        if input.len() > SHEBANG.len() && input.starts_with(SHEBANG) {
            let line_end = shebang_line_end(input).unwrap_or(input.len());
            let line = String::from_utf8_lossy(&input[SHEBANG.len()..line_end]);
            for candidate in interpreter_candidates(&line) {
                if let Some(imp) = self.for_interpreter(candidate) {
                    tracing::debug!(lexer = imp.name, interpreter = candidate, "guessed from shebang");
                    return Some(imp);
                }
            }
            input = &input[line_end..];
        }

        let mut best: Option<(&'static LexerImplementation, i32)> = None;
        for imp in self.iter() {
            let score = imp.analyse(input);
            if score > best.map_or(0, |(_, best_score)| best_score) {
                best = Some((imp, score));
            }
        }
        if let Some((imp, score)) = best {
            tracing::debug!(lexer = imp.name, score, "guessed from content");
        }
        best.map(|(imp, _)| imp)
    }

    /// Create a lexer from `name?option=value&option;...`.
    ///
    /// Options are applied in order; the first one failing aborts creation.
    pub fn create_from_query(&self, query: &str) -> Result<Lexer, OptionError> {
        let (name, pairs) = parse_query(query);
        let imp = self
            .by_name(name)
            .ok_or_else(|| OptionError::UnknownLexer(name.to_string()))?;
        let mut lexer = Lexer::new(imp);
        for (option, value) in pairs {
            lexer.set_option_from_str(option, value)?;
        }
        Ok(lexer)
    }

    pub fn describe(&self) -> Vec<LexerInfo> {
        self.iter().map(LexerInfo::from).collect()
    }
}

impl Default for LexerRegistry {
    fn default() -> Self {
        LexerRegistry::new(lexers::builtin())
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// End of the shebang line including its terminator, if `input` starts with one.
///
/// A lone `#!`, or a shebang not followed by a line terminator, does not count.
pub(crate) fn shebang_line_end(input: &[u8]) -> Option<usize> {
    if input.len() <= SHEBANG.len() || !input.starts_with(SHEBANG) {
        return None;
    }
    let eol = input.iter().position(|&byte| byte == b'\n' || byte == b'\r')?;
    if input[eol] == b'\r' && input.get(eol + 1) == Some(&b'\n') {
        Some(eol + 2)
    } else {
        Some(eol + 1)
    }
}

/// Interpreters named by a shebang line (without the `#!`), in the order to try them.
///
/// `env` is followed through to the program it launches, skipping its flags.
fn interpreter_candidates(line: &str) -> Vec<&str> {
    let mut words = line.split_ascii_whitespace();
    let Some(program) = words.next() else {
        return Vec::new();
    };
    if basename(program) == "env" {
        words.filter(|word| !word.starts_with('-') && !word.contains('=')).collect()
    } else {
        vec![program]
    }
}
