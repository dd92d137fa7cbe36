//! Line-oriented flow-markup classification.
//!
//! Flow documents (word-processing and portable-document targets) accept a
//! Markdown-like content string. The word-processing builder consumes the
//! small line-oriented classification implemented here; the
//! portable-document builder runs the same content through a full Markdown
//! expansion instead (see [`crate::pdf`]).
//!
//! The classification is deliberately flat: heading levels 1-3, bulleted
//! items, and plain paragraphs. No nesting, no inline code blocks, no
//! ordered lists.

/// One classified line of flow content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `# ` / `## ` / `### ` line, prefix stripped; level is 1-3
    Heading { level: u8, text: String },
    /// `- ` or `* ` line, prefix stripped
    Bullet(String),
    /// Any other non-blank line
    Paragraph(String),
}

/// Classify flow content line by line.
///
/// Blank lines are skipped. Lines are trimmed before classification, so
/// indentation does not affect the result.
///
/// # Examples
///
/// ```rust
/// use pitaya::markup::{Block, classify_lines};
///
/// let blocks = classify_lines("# Title\n\n- item\nplain");
/// assert_eq!(blocks.len(), 3);
/// assert_eq!(blocks[0], Block::Heading { level: 1, text: "Title".to_string() });
/// ```
pub fn classify_lines(content: &str) -> Vec<Block> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            Some(classify_line(line))
        })
        .collect()
}

fn classify_line(line: &str) -> Block {
    if let Some(text) = line.strip_prefix("# ") {
        Block::Heading {
            level: 1,
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix("## ") {
        Block::Heading {
            level: 2,
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix("### ") {
        Block::Heading {
            level: 3,
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        Block::Bullet(text.to_string())
    } else {
        Block::Paragraph(line.to_string())
    }
}
