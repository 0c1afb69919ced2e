//! Patient summary → PDF export.
//!
//! PDF generation via `printpdf`. A4 portrait with 20 mm margins on every
//! side, builtin Helvetica, word-wrapped body text that continues onto new
//! pages when the bottom margin is reached.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use printpdf::*;
use thiserror::Error;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;

const TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 9.0;
const TITLE_LEADING_MM: f32 = 10.0;
const HEADER_LEADING_MM: f32 = 6.0;
const BODY_LEADING_MM: f32 = 4.5;
const BLANK_LINE_MM: f32 = 2.5;

/// Characters per body line at 9 pt inside the 170 mm text column.
const BODY_WRAP_CHARS: usize = 95;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("Invalid export filename: {0}")]
    InvalidFilename(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Running cursor over the current page; adds a page when the column is full.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: Mm(PAGE_HEIGHT_MM - MARGIN_MM),
            pages: 1,
        }
    }

    fn ensure_room(&mut self, leading: f32) {
        if self.y - Mm(leading) < Mm(MARGIN_MM) {
            self.pages += 1;
            let (page, layer) = self.doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Layer {}", self.pages),
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = Mm(PAGE_HEIGHT_MM - MARGIN_MM);
        }
    }

    fn line(&mut self, text: &str, size: f32, leading: f32, font: &IndirectFontRef) {
        self.ensure_room(leading);
        self.y -= Mm(leading);
        self.layer.use_text(text, size, Mm(MARGIN_MM), self.y, font);
    }

    fn gap(&mut self, mm: f32) {
        self.y -= Mm(mm);
    }
}

/// Render `text` (one summary document) into PDF bytes.
///
/// Lines that look like section headers (`== ... ==`, `-- ... --`) are set
/// in bold; everything else is wrapped body text keeping its indentation.
pub fn summary_pdf(title: &str, text: &str) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    let pages = {
        let mut writer = PageWriter::new(&doc, doc.get_page(page1).get_layer(layer1));
        writer.line(title, TITLE_SIZE, TITLE_LEADING_MM, &bold);
        writer.gap(2.0);
        write_body(&mut writer, text, &font, &bold);
        writer.pages
    };
    tracing::debug!(pages, "Summary PDF laid out");

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

fn write_body(
    writer: &mut PageWriter<'_>,
    text: &str,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for raw in text.lines() {
        let line = raw.trim_end();
        if line.is_empty() {
            writer.gap(BLANK_LINE_MM);
        } else if is_header(line) {
            writer.line(line.trim(), HEADER_SIZE, HEADER_LEADING_MM, bold);
        } else {
            let indent_len = line.len() - line.trim_start().len();
            let indent = &line[..indent_len];
            for (i, wrapped) in wrap_text(line.trim_start(), BODY_WRAP_CHARS.saturating_sub(indent_len))
                .into_iter()
                .enumerate()
            {
                let continuation = if i == 0 { "" } else { "  " };
                writer.line(
                    &format!("{indent}{continuation}{wrapped}"),
                    BODY_SIZE,
                    BODY_LEADING_MM,
                    font,
                );
            }
        }
    }
}

/// Save PDF bytes as `dir/filename`, creating `dir` when needed.
pub fn write_pdf(pdf_bytes: &[u8], dir: &Path, filename: &str) -> Result<PathBuf, ExportError> {
    if filename.is_empty()
        || filename.contains(['/', '\\'])
        || filename == "."
        || filename == ".."
    {
        return Err(ExportError::InvalidFilename(filename.to_string()));
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, pdf_bytes)?;
    tracing::info!(path = %path.display(), bytes = pdf_bytes.len(), "Summary PDF written");
    Ok(path)
}

/// `summary-asha-rao-2024-06-10.pdf`
pub fn summary_pdf_filename(patient_name: &str, date: NaiveDate) -> String {
    let slug = patient_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "patient".to_string() } else { slug };
    format!("summary-{slug}-{}.pdf", date.format("%Y-%m-%d"))
}

fn is_header(line: &str) -> bool {
    let line = line.trim();
    (line.starts_with("== ") && line.ends_with(" =="))
        || (line.starts_with("-- ") && line.ends_with(" --"))
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(10);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        let word_len = word.chars().count();
        if current_len + word_len + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
