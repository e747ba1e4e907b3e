//! PDF report rendering with `printpdf` built-in fonts.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use vidpulse_nlp::Analysis;

use crate::{timestamped_path, ExportError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const HEADING_PT: f32 = 14.0;
const BODY_PT: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 6.0;
// Rough A4 line budget for Helvetica at body size; long comments are
// hard-wrapped rather than measured glyph by glyph.
const WRAP_COLUMNS: usize = 95;

/// Renders the report as a paginated PDF and returns its path.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created, or
/// [`ExportError::Pdf`] when document assembly fails.
pub fn export_pdf(analysis: &Analysis, output_dir: &Path) -> Result<PathBuf, ExportError> {
    let path = timestamped_path(output_dir, "pdf")?;

    let (doc, page, layer) = PdfDocument::new(
        "Comment Analysis Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "report",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut cursor = Cursor {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    cursor.heading(&bold, "Comment Analysis Report");
    cursor.blank_line();

    cursor.heading(&bold, "Summary");
    for line in wrap(&analysis.report.summary) {
        cursor.body(&font, &line);
    }
    cursor.blank_line();

    cursor.heading(&bold, "Sentiment Summary");
    let summary = &analysis.report.sentiment_summary;
    cursor.body(&font, &format!("Positive: {:.2}%", summary.positive));
    cursor.body(&font, &format!("Neutral: {:.2}%", summary.neutral));
    cursor.body(&font, &format!("Negative: {:.2}%", summary.negative));
    cursor.blank_line();

    let buckets = &analysis.report.categorized_comments;
    for (title, comments) in [
        ("Most Interesting Comments", &buckets.most_interesting),
        ("Hot Takes", &buckets.hot_takes),
        ("Questions", &buckets.questions),
    ] {
        cursor.heading(&bold, title);
        if comments.is_empty() {
            cursor.body(&font, "(none)");
        }
        for comment in comments {
            for (i, line) in wrap(comment).into_iter().enumerate() {
                let prefix = if i == 0 { "- " } else { "  " };
                cursor.body(&font, &format!("{prefix}{line}"));
            }
        }
        cursor.blank_line();
    }

    cursor.heading(&bold, "Actionable Insights");
    for insight in &analysis.report.actionable_insights {
        for (i, line) in wrap(insight).into_iter().enumerate() {
            let prefix = if i == 0 { "- " } else { "  " };
            cursor.body(&font, &format!("{prefix}{line}"));
        }
    }

    let file = File::create(&path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    tracing::info!(path = %path.display(), "exported PDF");
    Ok(path)
}

struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn heading(&mut self, font: &IndirectFontRef, text: &str) {
        self.write(font, text, HEADING_PT);
    }

    fn body(&mut self, font: &IndirectFontRef, text: &str) {
        self.write(font, text, BODY_PT);
    }

    fn blank_line(&mut self) {
        self.y -= LINE_HEIGHT_MM;
    }

    fn write(&mut self, font: &IndirectFontRef, text: &str, size: f32) {
        if self.y < MARGIN_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "report");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= LINE_HEIGHT_MM;
    }
}

/// Word-wraps text to the page's line budget. Words longer than a full
/// line are emitted on their own line untouched.
fn wrap(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > WRAP_COLUMNS
        {
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
