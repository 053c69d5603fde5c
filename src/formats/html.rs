use crate::formatter::{FormatterImplementation, Renderer};
use crate::options::{OptionDeclaration, OptionSet};
use crate::token::TokenKind;

struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn start_document(&self, out: &mut Vec<u8>, options: &OptionSet) {
        match options.str("cssclass").filter(|class| !class.is_empty()) {
            Some(class) => {
                out.extend_from_slice(b"<pre class=\"");
                escape(class.as_bytes(), out);
                out.extend_from_slice(b"\">");
            }
            None => out.extend_from_slice(b"<pre>"),
        }
    }

    fn end_document(&self, out: &mut Vec<u8>, _options: &OptionSet) {
        out.extend_from_slice(b"</pre>");
    }

    fn start_token(&self, kind: TokenKind, out: &mut Vec<u8>, _options: &OptionSet) {
        if let Some(class) = class_of(kind) {
            out.extend_from_slice(b"<span class=\"");
            out.extend_from_slice(class.as_bytes());
            out.extend_from_slice(b"\">");
        }
    }

    fn end_token(&self, kind: TokenKind, out: &mut Vec<u8>, _options: &OptionSet) {
        if class_of(kind).is_some() {
            out.extend_from_slice(b"</span>");
        }
    }

    fn write_token(&self, text: &[u8], out: &mut Vec<u8>, _options: &OptionSet) {
        escape(text, out);
    }

    fn start_lexing(&self, lexer: &str, out: &mut Vec<u8>, _options: &OptionSet) {
        out.extend_from_slice(b"<span class=\"");
        escape(lexer.as_bytes(), out);
        out.extend_from_slice(b"\">");
    }

    fn end_lexing(&self, _lexer: &str, out: &mut Vec<u8>, _options: &OptionSet) {
        out.extend_from_slice(b"</span>");
    }
}

/// Class of the `<span>` wrapping `kind`; unstyled kinds get no element.
fn class_of(kind: TokenKind) -> Option<&'static str> {
    Some(kind.css_class()).filter(|class| kind != TokenKind::Ignorable && !class.is_empty())
}

fn escape(text: &[u8], out: &mut Vec<u8>) {
    for &byte in text {
        match byte {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            b'"' => out.extend_from_slice(b"&quot;"),
            _ => out.push(byte),
        }
    }
}

static OPTIONS: [OptionDeclaration; 1] = [OptionDeclaration::string(
    "cssclass",
    "",
    "if set to `foo`, ` class=\"foo\"` is added to the <pre> tag",
)];

pub static HTML: FormatterImplementation = FormatterImplementation {
    description: "Format tokens as HTML <span> tags within a <pre> tag",
    options: &OPTIONS,
    ..FormatterImplementation::new("HTML", &HtmlRenderer)
};
