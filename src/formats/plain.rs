use crate::formatter::{FormatterImplementation, Renderer};
use crate::options::OptionSet;
use crate::token::TokenKind;

struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn start_token(&self, kind: TokenKind, out: &mut Vec<u8>, _options: &OptionSet) {
        out.extend_from_slice(kind.name().as_bytes());
        out.extend_from_slice(b": ");
    }

    fn end_token(&self, _kind: TokenKind, out: &mut Vec<u8>, _options: &OptionSet) {
        out.push(b'\n');
    }

    fn write_token(&self, text: &[u8], out: &mut Vec<u8>, _options: &OptionSet) {
        dump(text, out);
    }
}

/// Append `text` with line breaks, tabs and non-printable bytes escaped.
fn dump(text: &[u8], out: &mut Vec<u8>) {
    for &byte in text {
        match byte {
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b' '..=b'~' => out.push(byte),
            _ => out.extend_from_slice(format!("\\x{byte:02X}").as_bytes()),
        }
    }
}

pub static PLAIN: FormatterImplementation = FormatterImplementation {
    description: "Format tokens in plain text, one run per line as <token name>: <token value>",
    ..FormatterImplementation::new("Plain", &PlainRenderer)
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::test_support::render;
    use rstest::rstest;

    #[rstest]
    #[case(b"abc", "abc")]
    #[case(b"a\nb", "a\\nb")]
    #[case(b"\r\n\t", "\\r\\n\\t")]
    #[case(b"c:\\dir", "c:\\\\dir")]
    #[case(b"\x00\x7F\xE9", "\\x00\\x7F\\xE9")]
    fn test_dump(#[case] input: &[u8], #[case] expected: &str) {
        let mut out = Vec::new();
        dump(input, &mut out);
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_diff_runs() {
        let output = render(&PLAIN, "diff", b"--- a\n+++ b\n@@ -1 +1 @@\n-x\n+y\n");
        insta::assert_snapshot!(output, @r###"
        GENERIC_DELETED: --- a\n
        GENERIC_INSERTED: +++ b\n
        GENERIC_SUBHEADING: @@ -1 +1 @@\n
        GENERIC_DELETED: -x\n
        GENERIC_INSERTED: +y\n
        "###);
    }
}
