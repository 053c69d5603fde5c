//! Engine configuration
//!
//! `defaults/hilite.default.toml` is embedded into the library. Hosts layer their own
//! files and key overrides on top of it via [`Loader`] before deserializing into
//! [`HighlightConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/hilite.default.toml");

/// Top-level configuration of highlighting calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct HighlightConfig {
    pub engine: EngineConfig,
}

/// Knobs of the drive loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    pub strip_bom: bool,
    pub shebang: ShebangMode,
    pub buffer_capacity: usize,
    pub parser_bridge: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strip_bom: true,
            shebang: ShebangMode::PassThrough,
            buffer_capacity: 4096,
            parser_bridge: true,
        }
    }
}

/// Treatment of a leading `#!` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShebangMode {
    /// Emit the line as a single `IGNORABLE` token.
    #[default]
    PassThrough,
    /// Scan it with the top-level lexer.
    Lex,
}

/// Builds a [`HighlightConfig`] from the embedded engine defaults, then any TOML files
/// and single-key overrides, later layers winning.
///
/// Keys are dotted paths into the `[engine]` table: `engine.strip_bom`,
/// `engine.shebang` (`"pass-through"` or `"lex"`), `engine.buffer_capacity` and
/// `engine.parser_bridge`.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file; `build` fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists, e.g. a per-user `hilite.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Force one engine setting, e.g. `set_override("engine.buffer_capacity", 64i64)`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<HighlightConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The engine settings of `defaults/hilite.default.toml`.
pub fn load_defaults() -> Result<HighlightConfig, ConfigError> {
    Loader::new().build()
}
