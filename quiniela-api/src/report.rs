//! Report Formatter
//!
//! Renders the current prediction store into a fixed-layout PDF,
//! entirely in memory: a title line, then one line per participant
//! with name, outcome triple, date, and time, in the order given.
//!
//! The document is a minimal PDF 1.4 with a single Helvetica font and
//! WinAnsi-encoded text, which covers the product's accented strings.
//! The formatter performs no validation; its only failure mode is a
//! write error.

use std::io::Write;

use quiniela_core::Prediction;
use thiserror::Error;

/// Title line at the top of the first page.
pub const REPORT_TITLE: &str = "Predicciones Semanales";

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN_X: u32 = 50;
const TITLE_Y: u32 = 800;
const FIRST_LINE_Y: u32 = 770;
const LINE_STEP: u32 = 14;
const LINES_PER_PAGE: usize = 48;

/// Report generation failure.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the prediction list into PDF bytes.
pub fn render_report(predictions: &[Prediction]) -> Result<Vec<u8>, ReportError> {
    let lines: Vec<String> = predictions.iter().map(format_line).collect();
    let mut chunks: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    if chunks.is_empty() {
        // Empty store still yields a one-page document with the title
        chunks.push(&[]);
    }

    let mut doc = PdfBuilder::new();

    // Fixed low object ids: catalog, page tree, font. Each page then
    // takes two ids (page, content stream).
    let page_count = chunks.len();
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();

    doc.object(1, b"<< /Type /Catalog /Pages 2 0 R >>")?;
    doc.object(
        2,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .as_bytes(),
    )?;
    doc.object(
        3,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    )?;

    for (i, chunk) in chunks.iter().enumerate() {
        let page_id = 4 + 2 * i;
        let content_id = page_id + 1;
        doc.object(
            page_id,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT, content_id
            )
            .as_bytes(),
        )?;
        let content = page_content(chunk, i == 0)?;
        doc.stream_object(content_id, &content)?;
    }

    doc.finish()
}

/// One report line per prediction, matching the printed layout of the
/// weekly summary.
fn format_line(p: &Prediction) -> String {
    let o = p.forecast.outcomes();
    format!(
        "Usuario: {}; Resultados: [{}, {}, {}]; Fecha: {}; Hora: {}",
        p.name, o[0], o[1], o[2], p.date, p.time
    )
}

/// Content stream for one page: the title on the first page, then the
/// lines walking down from the top margin.
fn page_content(lines: &[String], with_title: bool) -> Result<Vec<u8>, ReportError> {
    let mut content = Vec::new();
    if with_title {
        write!(content, "BT /F1 14 Tf {} {} Td (", MARGIN_X + 140, TITLE_Y)?;
        content.extend_from_slice(&escape_text(REPORT_TITLE));
        content.extend_from_slice(b") Tj ET\n");
    }
    let mut y = FIRST_LINE_Y;
    for line in lines {
        write!(content, "BT /F1 10 Tf {} {} Td (", MARGIN_X, y)?;
        content.extend_from_slice(&escape_text(line));
        content.extend_from_slice(b") Tj ET\n");
        y = y.saturating_sub(LINE_STEP);
    }
    Ok(content)
}

/// Encode to WinAnsi (Latin-1 superset) with PDF string escaping.
/// Characters outside the encoding degrade to '?'.
fn escape_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(ch as u8);
            }
            '\n' | '\r' => out.push(b' '),
            c if (c as u32) <= 0xFF => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Tracks byte offsets while writing numbered objects, then closes the
/// document with the cross-reference table and trailer.
struct PdfBuilder {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfBuilder {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n");
        // Binary marker comment, per the spec's recommendation for
        // documents carrying non-ASCII text.
        buf.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) -> Result<(), ReportError> {
        self.offsets.push((id, self.buf.len()));
        write!(self.buf, "{} 0 obj\n", id)?;
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
        Ok(())
    }

    fn stream_object(&mut self, id: usize, content: &[u8]) -> Result<(), ReportError> {
        self.offsets.push((id, self.buf.len()));
        write!(
            self.buf,
            "{} 0 obj\n<< /Length {} >>\nstream\n",
            id,
            content.len()
        )?;
        self.buf.extend_from_slice(content);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, ReportError> {
        self.offsets.sort_by_key(|(id, _)| *id);
        let xref_start = self.buf.len();
        write!(self.buf, "xref\n0 {}\n", self.offsets.len() + 1)?;
        self.buf.extend_from_slice(b"0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            write!(self.buf, "{:010} 00000 n \n", offset)?;
        }
        write!(
            self.buf,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.offsets.len() + 1,
            xref_start
        )?;
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiniela_core::Forecast;

    fn prediction(name: &str) -> Prediction {
        Prediction {
            name: name.to_string(),
            forecast: Forecast::new(["1-0".to_string(), "X".to_string(), "2-2".to_string()]),
            date: "07/03/2026".to_string(),
            time: "18:30".to_string(),
            modifications: 0,
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_report_is_pdf() {
        let bytes = render_report(&[prediction("alice")]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_report_contains_one_line_per_prediction() {
        let bytes = render_report(&[prediction("alice"), prediction("bob")]).unwrap();
        assert!(contains(&bytes, b"Usuario: alice"));
        assert!(contains(&bytes, b"Usuario: bob"));
        assert!(contains(&bytes, b"Resultados: [1-0, X, 2-2]"));
        assert!(contains(&bytes, b"Fecha: 07/03/2026"));
    }

    #[test]
    fn test_empty_store_still_renders_title_page() {
        let bytes = render_report(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        // Title is present, WinAnsi-encoded
        assert!(contains(&bytes, b"Predicciones Semanales"));
    }

    #[test]
    fn test_long_store_paginates() {
        let predictions: Vec<Prediction> = (0..LINES_PER_PAGE + 1)
            .map(|i| prediction(&format!("user{}", i)))
            .collect();
        let bytes = render_report(&predictions).unwrap();
        let pages = bytes
            .windows(b"/Type /Page /Parent".len())
            .filter(|w| *w == b"/Type /Page /Parent")
            .count();
        assert_eq!(pages, 2);
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(escape_text("a(b)c"), b"a\\(b\\)c".to_vec());
        assert_eq!(escape_text("a\\b"), b"a\\\\b".to_vec());
        // ó is 0xF3 in WinAnsi
        assert_eq!(escape_text("ó"), vec![0xF3]);
        // Outside Latin-1 degrades instead of corrupting the stream
        assert_eq!(escape_text("☃"), b"?".to_vec());
    }
}
