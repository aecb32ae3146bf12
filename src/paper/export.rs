//! PDF rendering of an assumed paper.
//!
//! The output is a plain A4 document built with `lopdf`: a centred title
//! followed by one `Q{i}: ...` entry per question. Long questions wrap at
//! the right margin and a new page starts when the current one fills.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use super::error::PaperError;
use super::sampler::AssumedPaper;

/// Title line used when none is configured.
pub const DEFAULT_TITLE: &str = "Assumed Paper";

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const TITLE_FONT_SIZE: i64 = 16;
const BODY_FONT_SIZE: i64 = 12;
const LINE_HEIGHT: i64 = 18;
const ENTRY_SPACING: i64 = 6;

/// Average Helvetica glyph width as a fraction of the font size, in
/// thousandths.
const AVERAGE_GLYPH_WIDTH: i64 = 500;

/// A positioned line of text on a page.
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    font: &'static str,
    size: i64,
    x: i64,
    y: i64,
    text: String,
}

/// Renders the paper to PDF bytes.
///
/// # Errors
///
/// Returns [`PaperError::EmptyPaper`] when there is nothing to render and
/// [`PaperError::PdfWriteError`] if the document cannot be serialised.
pub fn render_pdf(paper: &AssumedPaper, title: &str) -> Result<Vec<u8>, PaperError> {
    if paper.is_empty() {
        return Err(PaperError::EmptyPaper);
    }

    let pages = layout_pages(paper, title);
    debug!(
        "Rendering {} questions across {} page(s)",
        paper.len(),
        pages.len()
    );

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let title_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => body_font_id,
            "F2" => title_font_id,
        },
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for lines in &pages {
        let content = Content {
            operations: page_operations(lines),
        };
        let encoded = content
            .encode()
            .map_err(|e| PaperError::PdfWriteError {
                message: e.to_string(),
            })?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| (*id).into()).collect();
    let media_box: Vec<Object> = vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_ids.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PaperError::PdfWriteError {
            message: e.to_string(),
        })?;

    Ok(buffer)
}

fn page_operations(lines: &[PlacedLine]) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.font.into(), line.size.into()],
        ));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    operations
}

/// Positions the title and question lines, splitting them into pages.
fn layout_pages(paper: &AssumedPaper, title: &str) -> Vec<Vec<PlacedLine>> {
    let mut pages: Vec<Vec<PlacedLine>> = Vec::new();
    let mut current: Vec<PlacedLine> = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN - TITLE_FONT_SIZE;

    for title_line in wrap_text(title, max_chars_per_line(TITLE_FONT_SIZE)) {
        let title_width = text_width(&title_line, TITLE_FONT_SIZE);
        current.push(PlacedLine {
            font: "F2",
            size: TITLE_FONT_SIZE,
            x: ((PAGE_WIDTH - title_width) / 2).max(MARGIN),
            y,
            text: title_line,
        });
        y -= LINE_HEIGHT;
    }
    y -= LINE_HEIGHT;

    let max_chars = max_chars_per_line(BODY_FONT_SIZE);
    for entry in paper.numbered_lines() {
        for wrapped in wrap_text(&entry, max_chars) {
            if y < MARGIN {
                pages.push(std::mem::take(&mut current));
                y = PAGE_HEIGHT - MARGIN - BODY_FONT_SIZE;
            }
            current.push(PlacedLine {
                font: "F1",
                size: BODY_FONT_SIZE,
                x: MARGIN,
                y,
                text: wrapped,
            });
            y -= LINE_HEIGHT;
        }
        y -= ENTRY_SPACING;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

fn text_width(text: &str, size: i64) -> i64 {
    text.chars().count() as i64 * size * AVERAGE_GLYPH_WIDTH / 1000
}

fn max_chars_per_line(size: i64) -> usize {
    let usable = PAGE_WIDTH - 2 * MARGIN;
    (usable * 1000 / (size * AVERAGE_GLYPH_WIDTH)).max(1) as usize
}

/// Greedy word wrap; words longer than a line are split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line_len == 0 { word.len() } else { word.len() + 1 };
        if line_len + needed > max_chars {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Maps text onto single-byte WinAnsi codes. Characters outside Latin-1 become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ if c.is_whitespace() => b' ',
            _ => b'?',
        })
        .collect()
}
