use crate::formatter::{FormatterImplementation, Renderer};
use crate::options::{OptionDeclaration, OptionSet};
use crate::theme::{Style, Theme, MONOKAI};
use crate::token::TokenKind;
use std::io::Write;

struct BBCodeRenderer;

fn theme(options: &OptionSet) -> &'static Theme {
    options.theme("theme").unwrap_or(&MONOKAI)
}

/// Style of `kind` if it translates to any markup. Backgrounds have no BBCode tag.
fn markup(kind: TokenKind, options: &OptionSet) -> Option<&'static Style> {
    theme(options)
        .style(kind)
        .filter(|style| style.bold || style.italic || style.fg.is_some())
}

impl Renderer for BBCodeRenderer {
    fn start_token(&self, kind: TokenKind, out: &mut Vec<u8>, options: &OptionSet) {
        let Some(style) = markup(kind, options) else {
            return;
        };
        if style.bold {
            out.extend_from_slice(b"[b]");
        }
        if style.italic {
            out.extend_from_slice(b"[i]");
        }
        if let Some(color) = style.fg {
            // writing into a Vec cannot fail
            let _ = write!(out, "[color={color}]");
        }
    }

    fn end_token(&self, kind: TokenKind, out: &mut Vec<u8>, options: &OptionSet) {
        let Some(style) = markup(kind, options) else {
            return;
        };
        if style.fg.is_some() {
            out.extend_from_slice(b"[/color]");
        }
        if style.italic {
            out.extend_from_slice(b"[/i]");
        }
        if style.bold {
            out.extend_from_slice(b"[/b]");
        }
    }

    fn write_token(&self, text: &[u8], out: &mut Vec<u8>, _options: &OptionSet) {
        out.extend_from_slice(text);
    }
}

static OPTIONS: [OptionDeclaration; 1] = [OptionDeclaration::theme(
    "theme",
    Some("monokai"),
    "the theme to use",
)];

pub static BBCODE: FormatterImplementation = FormatterImplementation {
    description: "Format tokens for forums using BBCode markup",
    options: &OPTIONS,
    ..FormatterImplementation::new("BBCode", &BBCodeRenderer)
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::test_support::{render, render_with};
    use crate::formatter::Formatter;

    #[test]
    fn test_monokai_json() {
        let output = render(&BBCODE, "json", br#"{"a": true}"#);
        insta::assert_snapshot!(output, @r###"{[color=#f92672]"a"[/color]: [b][color=#66d9ef]true[/color][/b]}"###);
    }

    #[test]
    fn test_molokai_diff() {
        let formatter = Formatter::from_query("bbcode?theme=molokai").unwrap();
        let output = render_with(&formatter, "diff", b"+x\n");
        assert_eq!(output, "[color=#a6e22e]+x\n[/color]");
    }

    #[test]
    fn test_italic_comment_nesting() {
        let options = OptionSet::new(BBCODE.options);
        let mut out = Vec::new();
        BBCodeRenderer.start_token(TokenKind::CommentDocumentation, &mut out, &options);
        BBCodeRenderer.end_token(TokenKind::CommentDocumentation, &mut out, &options);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[b][i][color=#75715e][/color][/i][/b]"
        );
    }
}
