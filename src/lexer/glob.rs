//! Shell-style glob patterns (`*`, `?`, `[abc]`, `[!abc]`) compiled to anchored regexes.

use regex::Regex;

#[derive(Debug, Clone)]
pub(crate) struct Glob {
    regex: Regex,
}

impl Glob {
    /// Compile `pattern`; `None` if it cannot be translated.
    pub(crate) fn new(pattern: &str) -> Option<Glob> {
        let mut translated = String::with_capacity(pattern.len() * 2 + 8);
        translated.push_str("^(?s:");
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '*' => translated.push_str(".*"),
                '?' => translated.push('.'),
                '[' => match class_end(&chars, i) {
                    Some(end) => {
                        translated.push('[');
                        let mut j = i + 1;
                        if chars[j] == '!' {
                            translated.push('^');
                            j += 1;
                        }
                        // a leading ']' is literal
                        if chars[j] == ']' {
                            translated.push_str("\\]");
                            j += 1;
                        }
                        for &c in &chars[j..end] {
                            match c {
                                '\\' | '[' | '^' | '&' | '~' => {
                                    translated.push('\\');
                                    translated.push(c);
                                }
                                _ => translated.push(c),
                            }
                        }
                        translated.push(']');
                        i = end;
                    }
                    None => translated.push_str("\\["),
                },
                c => translated.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
            i += 1;
        }
        translated.push_str(")$");
        match Regex::new(&translated) {
            Ok(regex) => Some(Glob { regex }),
            Err(err) => {
                tracing::warn!(pattern, %err, "ignoring invalid glob");
                None
            }
        }
    }

    pub(crate) fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// Index of the `]` closing the class opened at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}
