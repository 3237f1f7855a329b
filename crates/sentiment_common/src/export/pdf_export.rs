//! Tabular PDF export built directly with lopdf.
//!
//! A4 portrait, Helvetica 8pt, green header row, grid lines. Rows that do not
//! fit on the current page move to a new one with the header repeated.

use crate::error::ExportError;
use crate::types::AnalysisResult;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

pub const PDF_TITLE: &str = "Sentiment Analysis Results";
pub const PDF_COLUMNS: [&str; 4] = ["Text", "Sentiment", "Confidence", "Explanation"];

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const TITLE_SIZE: f32 = 14.0;
const FONT_SIZE: f32 = 8.0;
const LINE_HEIGHT: f32 = 10.0;
const CELL_PADDING: f32 = 4.0;
/// Text, Sentiment, Confidence, Explanation
const COLUMN_WIDTHS: [f32; 4] = [200.0, 57.0, 57.0, 201.0];
const HEADER_FILL: [f32; 3] = [22.0 / 255.0, 163.0 / 255.0, 74.0 / 255.0];
const GRID_GRAY: f32 = 0.6;
/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Render the result table as PDF bytes
pub fn to_pdf(results: &[AnalysisResult]) -> Result<Vec<u8>, ExportError> {
    let rows: Vec<[String; 4]> = results
        .iter()
        .map(|r| {
            [
                r.original_text.clone(),
                r.sentiment.as_str().to_string(),
                format!("{:.2}", r.confidence),
                r.explanation.clone(),
            ]
        })
        .collect();

    let pages = layout(&rows);
    write_document(pages)
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

/// Latin-1 bytes for the standard fonts; anything else becomes '?'
fn encode_text(text: &str) -> Object {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| if (c as u32) < 256 { c as u32 as u8 } else { b'?' })
        .collect();
    Object::String(bytes, StringFormat::Literal)
}

fn wrap_cell(text: &str, width: f32) -> Vec<String> {
    let chars = ((width - 2.0 * CELL_PADDING) / (FONT_SIZE * AVG_GLYPH_WIDTH)).max(1.0) as usize;
    let lines: Vec<String> = text
        .lines()
        .flat_map(|line| {
            textwrap::wrap(line, chars)
                .into_iter()
                .map(|l| l.into_owned())
                .collect::<Vec<_>>()
        })
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

struct PageBuilder {
    ops: Vec<Operation>,
    cursor_y: f32,
}

impl PageBuilder {
    fn new(with_title: bool) -> Self {
        let mut page = Self {
            ops: Vec::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        };
        if with_title {
            page.text("F2", TITLE_SIZE, MARGIN, page.cursor_y - TITLE_SIZE, PDF_TITLE);
            page.cursor_y -= TITLE_SIZE + 10.0;
        }
        page
    }

    fn text(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), real(size)]));
        self.ops.push(Operation::new("Td", vec![real(x), real(y)]));
        self.ops.push(Operation::new("Tj", vec![encode_text(text)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn remaining(&self) -> f32 {
        self.cursor_y - MARGIN
    }

    fn row(&mut self, cells: &[Vec<String>; 4], header: bool) {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
        let height = lines as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING;
        let top = self.cursor_y;
        let bottom = top - height;
        let width: f32 = COLUMN_WIDTHS.iter().sum();

        if header {
            self.ops.push(Operation::new(
                "rg",
                HEADER_FILL.iter().map(|c| real(*c)).collect(),
            ));
            self.ops.push(Operation::new(
                "re",
                vec![real(MARGIN), real(bottom), real(width), real(height)],
            ));
            self.ops.push(Operation::new("f", vec![]));
        }

        self.ops.push(Operation::new("RG", vec![real(GRID_GRAY); 3]));
        self.ops.push(Operation::new("w", vec![real(0.5)]));
        let mut x = MARGIN;
        for w in COLUMN_WIDTHS {
            self.ops.push(Operation::new(
                "re",
                vec![real(x), real(bottom), real(w), real(height)],
            ));
            x += w;
        }
        self.ops.push(Operation::new("S", vec![]));

        let (font, gray) = if header { ("F2", 1.0) } else { ("F1", 0.0) };
        self.ops.push(Operation::new("rg", vec![real(gray); 3]));
        let mut x = MARGIN;
        for (cell, w) in cells.iter().zip(COLUMN_WIDTHS) {
            for (i, line) in cell.iter().enumerate() {
                let y = top - CELL_PADDING - FONT_SIZE - i as f32 * LINE_HEIGHT;
                self.text(font, FONT_SIZE, x + CELL_PADDING, y, line);
            }
            x += w;
        }

        self.cursor_y = bottom;
    }
}

fn header_cells() -> [Vec<String>; 4] {
    PDF_COLUMNS.map(|c| vec![c.to_string()])
}

/// Lay rows out over as many pages as needed
fn layout(rows: &[[String; 4]]) -> Vec<Vec<Operation>> {
    let header = header_cells();
    let header_height = LINE_HEIGHT + 2.0 * CELL_PADDING;
    let max_lines =
        ((PAGE_HEIGHT - 2.0 * MARGIN - header_height - 2.0 * CELL_PADDING) / LINE_HEIGHT) as usize;

    let mut pages = Vec::new();
    let mut page = PageBuilder::new(true);
    page.row(&header, true);

    for row in rows {
        let mut cells: [Vec<String>; 4] = Default::default();
        for (i, (text, w)) in row.iter().zip(COLUMN_WIDTHS).enumerate() {
            let mut lines = wrap_cell(text, w);
            if lines.len() > max_lines {
                lines.truncate(max_lines);
                if let Some(last) = lines.last_mut() {
                    last.push_str("...");
                }
            }
            cells[i] = lines;
        }

        let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
        let height = lines as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING;
        if height > page.remaining() {
            pages.push(std::mem::take(&mut page.ops));
            page = PageBuilder::new(false);
            page.row(&header, true);
        }
        page.row(&cells, false);
    }

    pages.push(page.ops);
    pages
}

fn write_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
