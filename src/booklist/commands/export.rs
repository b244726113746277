//! # Export
//!
//! Both formats read the full collection in persisted order; search and paging have no
//! effect on what gets exported.
//!
//! ## CSV
//!
//! A `Title,Author` header followed by one `title,author` row per book, rows separated
//! by `\n`. Fields are written verbatim: commas or quotes inside a title are **not**
//! escaped, so files written by older versions of the tool read back identically.
//!
//! ## PDF
//!
//! A single-file PDF 1.4 document: "Book List" heading, then a gridded two-column table
//! with a shaded header row. Rows flow onto further A4 pages as needed and the header
//! row is repeated on each page. Text uses the built-in Helvetica fonts with
//! WinAnsi encoding; characters WinAnsi cannot represent are replaced by `?`.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BooklistError, Result};
use crate::model::Book;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 2] = ["Title", "Author"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn default_filename(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "books.csv",
            ExportFormat::Pdf => "books.pdf",
        }
    }
}

pub fn run(books: &[Book], format: ExportFormat, output: Option<&Path>) -> Result<CmdResult> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format.default_filename()));

    let file = File::create(&path).map_err(BooklistError::Io)?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => writer
            .write_all(to_csv(books).as_bytes())
            .map_err(BooklistError::Io)?,
        ExportFormat::Pdf => write_pdf(&mut writer, books, Utc::now())?,
    }
    writer.flush().map_err(BooklistError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} book{} to {}",
        books.len(),
        if books.len() == 1 { "" } else { "s" },
        path.display()
    )));
    Ok(result.with_exported_to(path))
}

pub fn to_csv(books: &[Book]) -> String {
    let mut rows = Vec::with_capacity(books.len() + 1);
    rows.push(CSV_HEADER.join(","));
    for book in books {
        rows.push([book.title.as_str(), book.author.as_str()].join(","));
    }
    rows.join("\n")
}

// --- PDF ---

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN_X: f32 = 28.0;
const MARGIN_BOTTOM: f32 = 40.0;
const TITLE_X: f32 = 40.0;
const TITLE_Y: f32 = 785.0;
const FIRST_TABLE_TOP: f32 = 757.0;
const NEXT_TABLE_TOP: f32 = 802.0;
const ROW_HEIGHT: f32 = 20.0;
const FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 18.0;
const CELL_PADDING: f32 = 5.0;
/// Helvetica glyphs average a little over half the font size in width.
const AVG_GLYPH_WIDTH: f32 = 0.55;

// Fixed object numbers; pages and their content streams follow from 6 on.
const CATALOG_OBJ: usize = 1;
const PAGES_OBJ: usize = 2;
const FONT_REGULAR_OBJ: usize = 3;
const FONT_BOLD_OBJ: usize = 4;
const INFO_OBJ: usize = 5;
const FIRST_PAGE_OBJ: usize = 6;

fn rows_per_page(top: f32) -> usize {
    // One row goes to the repeated header.
    (((top - MARGIN_BOTTOM) / ROW_HEIGHT) as usize).saturating_sub(1)
}

fn paginate(books: &[Book]) -> Vec<&[Book]> {
    let first = rows_per_page(FIRST_TABLE_TOP).min(books.len());
    let mut pages = vec![&books[..first]];
    let rest = &books[first..];
    pages.extend(rest.chunks(rows_per_page(NEXT_TABLE_TOP)));
    pages
}

pub fn write_pdf<W: Write>(mut writer: W, books: &[Book], created: DateTime<Utc>) -> Result<()> {
    let pages = paginate(books);
    let mut pdf = PdfBuilder::default();

    pdf.object(
        CATALOG_OBJ,
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_OBJ).as_bytes(),
    );

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJ + 2 * i))
        .collect();
    pdf.object(
        PAGES_OBJ,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .as_bytes(),
    );

    pdf.object(FONT_REGULAR_OBJ, font_dict("Helvetica").as_bytes());
    pdf.object(FONT_BOLD_OBJ, font_dict("Helvetica-Bold").as_bytes());

    let mut info = b"<< /Title (Book List) /Producer (booklist) /CreationDate (".to_vec();
    info.extend_from_slice(created.format("D:%Y%m%d%H%M%SZ").to_string().as_bytes());
    info.extend_from_slice(b") >>");
    pdf.object(INFO_OBJ, &info);

    for (i, rows) in pages.iter().enumerate() {
        let page_obj = FIRST_PAGE_OBJ + 2 * i;
        let content_obj = page_obj + 1;
        pdf.object(
            page_obj,
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> /Contents {} 0 R >>",
                PAGES_OBJ, PAGE_WIDTH, PAGE_HEIGHT, FONT_REGULAR_OBJ, FONT_BOLD_OBJ, content_obj
            )
            .as_bytes(),
        );
        let content = page_content(rows, i == 0);
        pdf.stream(content_obj, &content);
    }

    let bytes = pdf.finish();
    writer.write_all(&bytes).map_err(BooklistError::Io)?;
    Ok(())
}

fn font_dict(base: &str) -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        base
    )
}

fn page_content(rows: &[Book], first_page: bool) -> Vec<u8> {
    let mut out = Vec::new();
    let top = if first_page {
        text(&mut out, "F2", TITLE_FONT_SIZE, TITLE_X, TITLE_Y, "Book List");
        FIRST_TABLE_TOP
    } else {
        NEXT_TABLE_TOP
    };

    let col_width = (PAGE_WIDTH - 2.0 * MARGIN_X) / 2.0;
    let columns = [MARGIN_X, MARGIN_X + col_width];
    out.extend_from_slice(b"0.5 w\n");

    // Header row
    let y = top - ROW_HEIGHT;
    for (x, label) in columns.iter().zip(CSV_HEADER) {
        out.extend_from_slice(
            format!("0.85 g {} {} {} {} re f 0 g\n", x, y, col_width, ROW_HEIGHT).as_bytes(),
        );
        cell(&mut out, "F2", *x, y, col_width, label);
    }

    for (i, book) in rows.iter().enumerate() {
        let y = top - ROW_HEIGHT * (i as f32 + 2.0);
        cell(&mut out, "F1", columns[0], y, col_width, &book.title);
        cell(&mut out, "F1", columns[1], y, col_width, &book.author);
    }
    out
}

fn cell(out: &mut Vec<u8>, font: &str, x: f32, y: f32, width: f32, value: &str) {
    out.extend_from_slice(format!("{} {} {} {} re S\n", x, y, width, ROW_HEIGHT).as_bytes());
    let max_chars = ((width - 2.0 * CELL_PADDING) / (FONT_SIZE * AVG_GLYPH_WIDTH)) as usize;
    let value = fit(value, max_chars);
    text(
        out,
        font,
        FONT_SIZE,
        x + CELL_PADDING,
        y + (ROW_HEIGHT - FONT_SIZE) / 2.0 + 2.0,
        &value,
    );
}

fn text(out: &mut Vec<u8>, font: &str, size: f32, x: f32, y: f32, value: &str) {
    out.extend_from_slice(format!("BT /{} {} Tf {} {} Td (", font, size, x, y).as_bytes());
    out.extend_from_slice(&pdf_string(value));
    out.extend_from_slice(b") Tj ET\n");
}

fn fit(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

/// Escapes a literal string body and maps it to single-byte WinAnsi codes.
fn pdf_string(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\n' | '\r' | '\t' => out.push(b' '),
            c if (c as u32) < 0x20 || (0x7F..=0x9F).contains(&(c as u32)) => {}
            c if (c as u32) <= 0xFF => out.push(c as u32 as u8),
            c => out.push(win_ansi_extra(c).unwrap_or(b'?')),
        }
    }
    out
}

/// WinAnsi codes in 0x80..=0x9F, which differ from Latin-1.
fn win_ansi_extra(c: char) -> Option<u8> {
    let code = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Accumulates numbered objects and writes the cross-reference table at the end.
#[derive(Default)]
struct PdfBuilder {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfBuilder {
    fn ensure_header(&mut self) {
        if self.buf.is_empty() {
            self.buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        }
    }

    fn object(&mut self, num: usize, body: &[u8]) {
        self.ensure_header();
        self.offsets.push((num, self.buf.len()));
        self.buf
            .extend_from_slice(format!("{} 0 obj\n", num).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, num: usize, data: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.object(num, &body);
    }

    fn finish(mut self) -> Vec<u8> {
        self.ensure_header();
        self.offsets.sort_by_key(|(num, _)| *num);
        let size = self.offsets.len() + 1;
        let xref_at = self.buf.len();

        self.buf
            .extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", size).as_bytes());
        for (_, offset) in &self.offsets {
            self.buf
                .extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        self.buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
                size, CATALOG_OBJ, INFO_OBJ, xref_at
            )
            .as_bytes(),
        );
        self.buf
    }
}
