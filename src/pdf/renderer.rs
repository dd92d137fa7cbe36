//! Markdown expansion and page layout for portable documents.
//!
//! Two passes: the Markdown source is expanded into a flat list of styled
//! blocks (headings, paragraphs, bullets, code blocks, quotes, table rows),
//! then the blocks are laid out top-down onto pages using the fixed
//! stylesheet and the standard built-in fonts.

use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt,
    Rgb, TextItem,
};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::common::error::Result;

use super::stylesheet::{Shade, Stylesheet};

/// One styled inline span.
#[derive(Debug, Clone, Default, PartialEq)]
struct Span {
    text: String,
    bold: bool,
    italic: bool,
    code: bool,
}

/// One block of the expanded document tree.
#[derive(Debug, Clone, PartialEq)]
enum DocBlock {
    Heading { level: usize, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    Bullet(Vec<Span>),
    Quote(Vec<Span>),
    CodeBlock(String),
    TableRow { cells: Vec<String>, header: bool },
}

/// Render Markdown content into PDF bytes with the default stylesheet.
pub fn render_document(markup: &str, title: &str) -> Result<Vec<u8>> {
    let blocks = expand_markdown(markup);
    let stylesheet = Stylesheet::default();
    Ok(layout_blocks(&blocks, &stylesheet, title))
}

/// Expand Markdown source into styled blocks.
fn expand_markdown(markup: &str) -> Vec<DocBlock> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markup, options);

    let mut blocks = Vec::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut quote_depth = 0usize;
    let mut in_code_block = false;
    let mut code_buf = String::new();
    let mut heading_level: Option<usize> = None;
    let mut in_item = false;
    let mut table_cells: Option<Vec<String>> = None;
    let mut in_table_head = false;

    let flush =
        |spans: &mut Vec<Span>, heading: Option<usize>, item: bool, quoted: bool, out: &mut Vec<DocBlock>| {
            if spans.is_empty() {
                return;
            }
            let taken = std::mem::take(spans);
            let block = if let Some(level) = heading {
                DocBlock::Heading {
                    level,
                    spans: taken,
                }
            } else if item {
                DocBlock::Bullet(taken)
            } else if quoted {
                DocBlock::Quote(taken)
            } else {
                DocBlock::Paragraph(taken)
            };
            out.push(block);
        };

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading_level = Some(level as usize);
            },
            Event::End(TagEnd::Heading(_)) => {
                flush(&mut spans, heading_level, false, quote_depth > 0, &mut blocks);
                heading_level = None;
            },
            Event::Start(Tag::Paragraph) => {},
            Event::End(TagEnd::Paragraph) => {
                flush(&mut spans, None, in_item, quote_depth > 0, &mut blocks);
            },
            Event::Start(Tag::Item) => {
                in_item = true;
            },
            Event::End(TagEnd::Item) => {
                flush(&mut spans, None, true, quote_depth > 0, &mut blocks);
                in_item = false;
            },
            Event::Start(Tag::BlockQuote(_)) => quote_depth += 1,
            Event::End(TagEnd::BlockQuote(_)) => quote_depth = quote_depth.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                code_buf.clear();
            },
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                blocks.push(DocBlock::CodeBlock(std::mem::take(&mut code_buf)));
            },
            Event::Start(Tag::Table(_)) => {},
            Event::End(TagEnd::Table) => {},
            Event::Start(Tag::TableHead) => in_table_head = true,
            // Header cells arrive inside TableHead with no enclosing row
            Event::End(TagEnd::TableHead) => {
                in_table_head = false;
                if let Some(cells) = table_cells.take() {
                    blocks.push(DocBlock::TableRow {
                        cells,
                        header: true,
                    });
                }
            },
            Event::Start(Tag::TableRow) | Event::Start(Tag::TableCell) => {
                if table_cells.is_none() {
                    table_cells = Some(Vec::new());
                }
            },
            Event::End(TagEnd::TableCell) => {
                let cell: String = spans.drain(..).map(|s| s.text).collect();
                if let Some(cells) = table_cells.as_mut() {
                    cells.push(cell);
                }
            },
            Event::End(TagEnd::TableRow) => {
                if let Some(cells) = table_cells.take() {
                    blocks.push(DocBlock::TableRow {
                        cells,
                        header: in_table_head,
                    });
                }
            },
            Event::Start(Tag::Strong) => bold += 1,
            Event::End(TagEnd::Strong) => bold = bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => italic += 1,
            Event::End(TagEnd::Emphasis) => italic = italic.saturating_sub(1),
            Event::Text(text) => {
                if in_code_block {
                    code_buf.push_str(&text);
                } else {
                    spans.push(Span {
                        text: text.to_string(),
                        bold: bold > 0,
                        italic: italic > 0,
                        code: false,
                    });
                }
            },
            Event::Code(text) => {
                spans.push(Span {
                    text: text.to_string(),
                    bold: bold > 0,
                    italic: italic > 0,
                    code: true,
                });
            },
            Event::SoftBreak | Event::HardBreak => {
                spans.push(Span {
                    text: " ".to_string(),
                    bold: bold > 0,
                    italic: italic > 0,
                    code: false,
                });
            },
            _ => {},
        }
    }

    flush(&mut spans, heading_level, in_item, quote_depth > 0, &mut blocks);

    blocks
}

/// Pick the built-in font matching a span's styling.
fn span_font(span: &Span) -> BuiltinFont {
    if span.code {
        BuiltinFont::Courier
    } else {
        match (span.bold, span.italic) {
            (true, true) => BuiltinFont::HelveticaBoldOblique,
            (true, false) => BuiltinFont::HelveticaBold,
            (false, true) => BuiltinFont::HelveticaOblique,
            (false, false) => BuiltinFont::Helvetica,
        }
    }
}

/// Rough advance width of one character, in points.
///
/// Helvetica averages about half the em size; Courier is fixed at 0.6em.
fn char_width(font: BuiltinFont, size: f32) -> f32 {
    match font {
        BuiltinFont::Courier => size * 0.6,
        _ => size * 0.5,
    }
}

/// A word tagged with its source span styling, the unit of line filling.
#[derive(Debug, Clone)]
struct StyledWord {
    text: String,
    font: BuiltinFont,
}

/// Split spans into styled words for greedy line filling.
fn styled_words(spans: &[Span], size: f32) -> Vec<(StyledWord, f32)> {
    let mut words = Vec::new();
    for span in spans {
        let font = span_font(span);
        for word in span.text.split_whitespace() {
            let width = word.chars().count() as f32 * char_width(font, size);
            words.push((
                StyledWord {
                    text: word.to_string(),
                    font,
                },
                width,
            ));
        }
    }
    words
}

/// Greedily fill lines of styled words up to the given width.
fn wrap_words(words: Vec<(StyledWord, f32)>, size: f32, max_width: f32) -> Vec<Vec<StyledWord>> {
    let space = char_width(BuiltinFont::Helvetica, size);
    let mut lines: Vec<Vec<StyledWord>> = Vec::new();
    let mut current: Vec<StyledWord> = Vec::new();
    let mut current_width = 0.0f32;

    for (word, width) in words {
        let needed = if current.is_empty() {
            width
        } else {
            current_width + space + width
        };
        if !current.is_empty() && needed > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = width;
        } else {
            current_width = needed;
        }
        current.push(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn shade_color(shade: Shade) -> Color {
    Color::Rgb(Rgb {
        r: shade.0.into(),
        g: shade.0.into(),
        b: shade.0.into(),
        icc_profile: None,
    })
}

/// Tracks the layout cursor across pages.
struct PageLayout<'a> {
    stylesheet: &'a Stylesheet,
    pages: Vec<Vec<Op>>,
    ops: Vec<Op>,
    /// Current baseline, in points from the bottom of the page
    y_pt: f32,
}

impl<'a> PageLayout<'a> {
    fn new(stylesheet: &'a Stylesheet) -> Self {
        Self {
            stylesheet,
            pages: Vec::new(),
            ops: Vec::new(),
            y_pt: Self::top_y(stylesheet),
        }
    }

    fn top_y(stylesheet: &Stylesheet) -> f32 {
        (stylesheet.page_height_mm - stylesheet.margin_mm) * 72.0 / 25.4
    }

    fn bottom_y(&self) -> f32 {
        self.stylesheet.margin_mm * 72.0 / 25.4
    }

    fn left_x(&self) -> f32 {
        self.stylesheet.margin_mm * 72.0 / 25.4
    }

    /// Reserve room for one line of the given height, breaking the page
    /// when the baseline would drop below the bottom margin.
    fn advance(&mut self, line_height: f32) {
        if self.y_pt - line_height < self.bottom_y() {
            self.break_page();
        }
        self.y_pt -= line_height;
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.y_pt = Self::top_y(self.stylesheet);
    }

    /// Write wrapped lines at the current cursor with a uniform size/color.
    fn write_lines(
        &mut self,
        lines: &[Vec<StyledWord>],
        size: f32,
        color: Color,
        indent_pt: f32,
    ) {
        let line_height = size * self.stylesheet.line_factor;
        for line in lines {
            self.advance(line_height);
            let mut ops = vec![
                Op::StartTextSection,
                Op::SetTextCursor {
                    pos: Point {
                        x: Pt((self.left_x() + indent_pt).into()),
                        y: Pt(self.y_pt.into()),
                    },
                },
                Op::SetFillColor { col: color.clone() },
            ];
            let mut first = true;
            for word in line {
                let text = if first {
                    word.text.clone()
                } else {
                    format!(" {}", word.text)
                };
                first = false;
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(size.into()),
                    font: word.font,
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text)],
                    font: word.font,
                });
            }
            ops.push(Op::EndTextSection);
            self.ops.extend(ops);
        }
    }

    /// Draw a horizontal rule across the text width at the current cursor.
    fn write_rule(&mut self) {
        self.advance(self.stylesheet.block_gap);
        let y = Pt(self.y_pt.into());
        let rule = Line {
            points: vec![
                LinePoint {
                    p: Point {
                        x: Pt(self.left_x().into()),
                        y,
                    },
                    bezier: false,
                },
                LinePoint {
                    p: Point {
                        x: Pt((self.left_x() + self.stylesheet.text_width_pt()).into()),
                        y,
                    },
                    bezier: false,
                },
            ],
            is_closed: false,
        };
        self.ops.push(Op::SetOutlineColor {
            col: shade_color(Shade(0.8)),
        });
        self.ops.push(Op::SetOutlineThickness { pt: Pt(0.75) });
        self.ops.push(Op::DrawLine { line: rule });
    }

    fn gap(&mut self) {
        self.y_pt -= self.stylesheet.block_gap;
    }

    fn finish(mut self) -> Vec<Vec<Op>> {
        self.pages.push(std::mem::take(&mut self.ops));
        self.pages
    }
}

/// Lay the expanded blocks out onto pages and encode the document.
fn layout_blocks(blocks: &[DocBlock], stylesheet: &Stylesheet, title: &str) -> Vec<u8> {
    let mut layout = PageLayout::new(stylesheet);
    let black = shade_color(Shade(0.0));
    let text_width = stylesheet.text_width_pt();

    for block in blocks {
        match block {
            DocBlock::Heading { level, spans } => {
                let size = stylesheet.heading_size(*level);
                let color = shade_color(stylesheet.heading_shade(*level));
                // Headings render bold regardless of inline styling
                let bold_spans: Vec<Span> = spans
                    .iter()
                    .map(|span| Span {
                        bold: !span.code,
                        ..span.clone()
                    })
                    .collect();
                let lines = wrap_words(styled_words(&bold_spans, size), size, text_width);
                layout.write_lines(&lines, size, color, 0.0);
                if *level == 1 {
                    layout.write_rule();
                }
                layout.gap();
            },
            DocBlock::Paragraph(spans) => {
                let size = stylesheet.body_size;
                let lines = wrap_words(styled_words(spans, size), size, text_width);
                layout.write_lines(&lines, size, black.clone(), 0.0);
                layout.gap();
            },
            DocBlock::Bullet(spans) => {
                let size = stylesheet.body_size;
                let indent = size * 1.5;
                let mut words = vec![(
                    StyledWord {
                        text: "\u{2022}".to_string(),
                        font: BuiltinFont::Helvetica,
                    },
                    char_width(BuiltinFont::Helvetica, size),
                )];
                words.extend(styled_words(spans, size));
                let lines = wrap_words(words, size, text_width - indent);
                layout.write_lines(&lines, size, black.clone(), indent);
            },
            DocBlock::Quote(spans) => {
                let size = stylesheet.body_size;
                let indent = size * 2.0;
                let color = shade_color(stylesheet.quote_shade);
                let lines = wrap_words(styled_words(spans, size), size, text_width - indent);
                layout.write_lines(&lines, size, color, indent);
                layout.gap();
            },
            DocBlock::CodeBlock(code) => {
                let size = stylesheet.code_size;
                let color = shade_color(Shade(0.15));
                // Code keeps its own line structure; no wrapping by words
                let lines: Vec<Vec<StyledWord>> = code
                    .lines()
                    .map(|line| {
                        vec![StyledWord {
                            text: line.to_string(),
                            font: BuiltinFont::Courier,
                        }]
                    })
                    .collect();
                layout.write_lines(&lines, size, color, size);
                layout.gap();
            },
            DocBlock::TableRow { cells, header } => {
                let size = stylesheet.body_size;
                let font = if *header {
                    BuiltinFont::HelveticaBold
                } else {
                    BuiltinFont::Helvetica
                };
                let text = cells.join("  |  ");
                let lines = vec![vec![StyledWord { text, font }]];
                layout.write_lines(&lines, size, black.clone(), 0.0);
                if *header {
                    layout.write_rule();
                }
            },
        }
    }

    let pages: Vec<PdfPage> = layout
        .finish()
        .into_iter()
        .map(|ops| {
            PdfPage::new(
                Mm(stylesheet.page_width_mm.into()),
                Mm(stylesheet.page_height_mm.into()),
                ops,
            )
        })
        .collect();

    let mut warnings = Vec::new();
    PdfDocument::new(title)
        .with_pages(pages)
        .save(&PdfSaveOptions::default(), &mut warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_classifies_blocks() {
        let blocks = expand_markdown("# Title\n\nBody with **bold** and `code`.\n\n- item\n");
        assert!(matches!(
            blocks[0],
            DocBlock::Heading { level: 1, .. }
        ));
        match &blocks[1] {
            DocBlock::Paragraph(spans) => {
                assert!(spans.iter().any(|s| s.bold && s.text == "bold"));
                assert!(spans.iter().any(|s| s.code && s.text == "code"));
            },
            other => panic!("expected paragraph, got {other:?}"),
        }
        assert!(matches!(blocks[2], DocBlock::Bullet(_)));
    }

    #[test]
    fn test_expand_quotes_and_code_blocks() {
        let blocks = expand_markdown("> quoted text\n\n```\nlet x = 1;\n```\n");
        assert!(matches!(blocks[0], DocBlock::Quote(_)));
        match &blocks[1] {
            DocBlock::CodeBlock(code) => assert!(code.contains("let x = 1;")),
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_expand_tables() {
        let blocks = expand_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        let rows: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                DocBlock::TableRow { cells, header } => Some((cells.clone(), *header)),
                _ => None,
            })
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].1);
        assert_eq!(rows[1].0, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_wrap_words_fills_lines() {
        let size = 12.0;
        let words = styled_words(
            &[Span {
                text: "one two three four five six seven eight".to_string(),
                ..Default::default()
            }],
            size,
        );
        let lines = wrap_words(words, size, 100.0);
        assert!(lines.len() > 1);
        let total: usize = lines.iter().map(Vec::len).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_render_produces_pdf_magic() {
        let bytes = render_document("# Report\n\nHello world.\n", "Report").unwrap();
        assert_eq!(&bytes[0..4], b"%PDF");
    }
}
