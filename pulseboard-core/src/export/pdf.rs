//! Paginated PDF report rendering.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocumentReference, PdfLayerReference};

use super::ExportSection;
use crate::error::{Error, Result};

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 20.0;
const ROW_HEIGHT_MM: f64 = 6.0;
/// Start a new page once the cursor drops below this line.
const PAGE_BREAK_MM: f64 = 30.0;

const TITLE_SIZE: f64 = 20.0;
const SECTION_SIZE: f64 = 16.0;
const HEADER_SIZE: f64 = 11.0;
const BODY_SIZE: f64 = 10.0;

struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    bold: IndirectFontRef,
    regular: IndirectFontRef,
    y: f64,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            printpdf::PdfDocument::new(title, Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::Export(format!("failed to load font: {}", e)))?;
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Export(format!("failed to load font: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            bold,
            regular,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < PAGE_BREAK_MM {
            self.new_page();
        }
    }

    fn text(&mut self, text: &str, size: f64, x: f64, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size as f32, Mm(x as f32), Mm(self.y as f32), font);
    }

    fn advance(&mut self, by: f64) {
        self.y -= by;
    }

    /// Write one table row with columns spread evenly across the page.
    fn row(&mut self, fields: &[String], size: f64, bold: bool) {
        let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let col_width = usable / fields.len() as f64;
        for (i, field) in fields.iter().enumerate() {
            self.text(field, size, MARGIN_MM + col_width * i as f64, bold);
        }
        self.advance(ROW_HEIGHT_MM);
    }

    fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| Error::Export(format!("failed to save PDF: {}", e)))
    }
}

/// Write all sections into one paginated PDF report.
///
/// Layout mirrors the CSV renderer: document header with the generation
/// date, then one table per section. A section heading always starts on a
/// page with room for at least its header row.
pub fn write_pdf_report(
    sections: &[ExportSection],
    path: &Path,
    generated_on: NaiveDate,
) -> Result<()> {
    let mut writer = ReportWriter::new("Pulseboard Dashboard Report")?;

    writer.text("Pulseboard Dashboard Report", TITLE_SIZE, MARGIN_MM, true);
    writer.advance(10.0);
    writer.text(
        &format!("Generated on: {}", generated_on.format("%Y-%m-%d")),
        BODY_SIZE,
        MARGIN_MM,
        false,
    );
    writer.advance(14.0);

    for section in sections {
        // Heading plus header row plus one data row
        writer.ensure_room(ROW_HEIGHT_MM * 3.0 + 8.0);

        writer.text(&section.title, SECTION_SIZE, MARGIN_MM, true);
        writer.advance(8.0);

        let headers: Vec<String> = section.headers().iter().map(|h| h.to_string()).collect();
        writer.row(&headers, HEADER_SIZE, true);

        for row in section.rows() {
            writer.ensure_room(ROW_HEIGHT_MM);
            writer.row(&row, BODY_SIZE, false);
        }

        writer.advance(8.0);
    }

    writer.save(path)?;
    tracing::info!(path = %path.display(), sections = sections.len(), "Wrote PDF report");
    Ok(())
}
