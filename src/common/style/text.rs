//! Inline rich-text parsing.
//!
//! Content strings may carry lightweight emphasis markers: `**bold**`,
//! `*italic*`, and `__underline__`. This module splits a single line of such
//! markup into a flat sequence of styled runs that the format builders
//! translate into their native run representations.
//!
//! The grammar is deliberately small: delimiters do not nest, do not escape,
//! and an unterminated delimiter is ordinary text. Concatenating the text of
//! all parsed runs always reproduces the input with the delimiters of
//! well-formed spans removed.

/// A single styled span of text.
///
/// Runs are ephemeral: they are produced for one paragraph, consumed by the
/// builder rendering that paragraph, and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichTextRun {
    /// The span text, delimiters stripped
    pub text: String,
    /// Bold (`**...**`)
    pub bold: bool,
    /// Italic (`*...*`)
    pub italic: bool,
    /// Underline (`__...__`)
    pub underline: bool,
}

impl RichTextRun {
    /// Create a plain (unstyled) run.
    #[inline]
    pub fn plain<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// Whether this run carries no styling at all.
    #[inline]
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline
    }
}

/// Split one line of inline markup into styled runs.
///
/// Delimiters are matched first-wins in the order `**`, `*`, `__`, scanning
/// left to right. A delimiter with no matching terminator is treated as
/// literal text.
///
/// # Examples
///
/// ```rust
/// use pitaya::common::parse_inline;
///
/// let runs = parse_inline("a **b** c");
/// assert_eq!(runs.len(), 3);
/// assert_eq!(runs[1].text, "b");
/// assert!(runs[1].bold);
/// ```
pub fn parse_inline(text: &str) -> Vec<RichTextRun> {
    let mut runs = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        match match_delimited(rest) {
            Some((inner, style, consumed)) => {
                if !plain.is_empty() {
                    runs.push(RichTextRun::plain(std::mem::take(&mut plain)));
                }
                runs.push(RichTextRun {
                    text: inner.to_string(),
                    bold: style == Style::Bold,
                    italic: style == Style::Italic,
                    underline: style == Style::Underline,
                });
                rest = &rest[consumed..];
            },
            None => {
                // Advance one character; delimiters are ASCII so any
                // multi-byte character is always literal text.
                let ch = rest.chars().next().unwrap_or('\0');
                let len = ch.len_utf8();
                plain.push_str(&rest[..len]);
                rest = &rest[len..];
            },
        }
    }

    if !plain.is_empty() {
        runs.push(RichTextRun::plain(plain));
    }

    runs
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Bold,
    Italic,
    Underline,
}

/// Try to match a complete delimited span at the start of `s`.
///
/// Returns the inner text, the style, and the total number of bytes
/// consumed (delimiters included).
fn match_delimited(s: &str) -> Option<(&str, Style, usize)> {
    for (delim, style) in [
        ("**", Style::Bold),
        ("*", Style::Italic),
        ("__", Style::Underline),
    ] {
        if let Some(after) = s.strip_prefix(delim) {
            if let Some(end) = after.find(delim) {
                let inner = &after[..end];
                return Some((inner, style, delim.len() * 2 + inner.len()));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_single_run() {
        let runs = parse_inline("hello world");
        assert_eq!(runs, vec![RichTextRun::plain("hello world")]);
    }

    #[test]
    fn test_bold_italic_underline() {
        let runs = parse_inline("**b** *i* __u__");
        assert_eq!(runs.len(), 5);
        assert!(runs[0].bold);
        assert_eq!(runs[0].text, "b");
        assert_eq!(runs[1], RichTextRun::plain(" "));
        assert!(runs[2].italic);
        assert_eq!(runs[2].text, "i");
        assert!(runs[4].underline);
        assert_eq!(runs[4].text, "u");
    }

    #[test]
    fn test_unterminated_delimiter_is_literal() {
        let runs = parse_inline("plain *unclosed");
        assert_eq!(runs, vec![RichTextRun::plain("plain *unclosed")]);
    }

    #[test]
    fn test_lone_double_star_is_empty_italic() {
        // "**" cannot open a bold span without a terminator, but it is a
        // well-formed empty italic span, which wins next in match order.
        let runs = parse_inline("a **b");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], RichTextRun::plain("a "));
        assert!(runs[1].italic);
        assert_eq!(runs[1].text, "");
        assert_eq!(runs[2], RichTextRun::plain("b"));
    }

    #[test]
    fn test_bold_takes_precedence_over_italic() {
        let runs = parse_inline("**x**");
        assert_eq!(runs.len(), 1);
        assert!(runs[0].bold);
        assert!(!runs[0].italic);
    }

    #[test]
    fn test_reassembly_strips_delimiters() {
        let runs = parse_inline("start **bold** mid *it* __und__ end");
        let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(joined, "start bold mid it und end");
    }

    #[test]
    fn test_non_ascii_text_preserved() {
        let runs = parse_inline("héllo **wörld**");
        let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(joined, "héllo wörld");
    }

    proptest::proptest! {
        /// Concatenating parsed run text reproduces any sequence of
        /// well-formed spans with the delimiters stripped.
        #[test]
        fn prop_reassembly_strips_delimiters(
            segments in proptest::collection::vec(
                (0..4usize, "[a-zA-Z0-9 .,]{1,8}"),
                0..8,
            )
        ) {
            let mut input = String::new();
            let mut expected = String::new();
            for (style, text) in &segments {
                match style {
                    0 => input.push_str(text),
                    1 => {
                        input.push_str("**");
                        input.push_str(text);
                        input.push_str("**");
                    },
                    2 => {
                        input.push('*');
                        input.push_str(text);
                        input.push('*');
                    },
                    _ => {
                        input.push_str("__");
                        input.push_str(text);
                        input.push_str("__");
                    },
                }
                expected.push_str(text);
            }

            let joined: String = parse_inline(&input)
                .iter()
                .map(|r| r.text.as_str())
                .collect();
            proptest::prop_assert_eq!(joined, expected);
        }
    }
}
