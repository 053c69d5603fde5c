//! Formatter registry

use super::implementation::FormatterImplementation;
use super::instance::Formatter;
use crate::formats;
use crate::lexer::OptionInfo;
use crate::options::{parse_query, OptionError};
use once_cell::sync::Lazy;
use serde::Serialize;

static BUILTIN: Lazy<FormatterRegistry> =
    Lazy::new(|| FormatterRegistry::new(formats::builtin()));

/// Serializable summary of one formatter implementation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatterInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionInfo>,
}

/// Registry of formatter implementations
pub struct FormatterRegistry {
    formatters: Vec<&'static FormatterImplementation>,
}

impl FormatterRegistry {
    pub fn new(formatters: Vec<&'static FormatterImplementation>) -> Self {
        FormatterRegistry { formatters }
    }

    pub fn builtin() -> &'static FormatterRegistry {
        &BUILTIN
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static FormatterImplementation> + '_ {
        self.formatters.iter().copied()
    }

    /// Find a formatter by name, ignoring case.
    pub fn by_name(&self, name: &str) -> Option<&'static FormatterImplementation> {
        self.iter().find(|imp| imp.name.eq_ignore_ascii_case(name))
    }

    pub fn create_from_query(&self, query: &str) -> Result<Formatter, OptionError> {
        let (name, pairs) = parse_query(query);
        let imp = self
            .by_name(name)
            .ok_or_else(|| OptionError::InvalidValue {
                option: "formatter".to_string(),
                value: name.to_string(),
            })?;
        let mut formatter = Formatter::new(imp);
        for (option, value) in pairs {
            formatter.set_option_from_str(option, value)?;
        }
        Ok(formatter)
    }

    pub fn describe(&self) -> Vec<FormatterInfo> {
        self.iter()
            .map(|imp| FormatterInfo {
                name: imp.name,
                description: imp.description,
                options: imp.options.iter().map(OptionInfo::from).collect(),
            })
            .collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        FormatterRegistry::new(formats::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let names: Vec<_> = FormatterRegistry::builtin().iter().map(|imp| imp.name).collect();
        assert_eq!(names, vec!["Plain", "HTML", "Terminal", "BBCode"]);
    }

    #[test]
    fn test_by_name_ignores_case() {
        let registry = FormatterRegistry::builtin();
        assert_eq!(registry.by_name("html").map(|imp| imp.name), Some("HTML"));
        assert_eq!(registry.by_name("bbcode").map(|imp| imp.name), Some("BBCode"));
        assert!(registry.by_name("rtf").is_none());
    }

    #[test]
    fn test_unknown_formatter_query() {
        let err = FormatterRegistry::builtin()
            .create_from_query("rtf?x=1")
            .unwrap_err();
        assert!(matches!(err, OptionError::InvalidValue { .. }));
    }

    #[test]
    fn test_describe() {
        let info = FormatterRegistry::builtin().describe();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json[1]["options"][0]["name"], "cssclass");
        assert_eq!(json[1]["options"][0]["type"], "string");
        assert_eq!(json[3]["options"][0]["default"], "monokai");
    }
}
