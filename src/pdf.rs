//! A minimal PDF writer for the tabular transaction export.
//!
//! Emits plain PDF 1.4 with uncompressed content streams and the built-in
//! Helvetica font, which every reader supports. Only what the export needs
//! is implemented: a title line, a header row, and left-aligned text columns
//! paginated onto A4 pages.

use crate::export::TransactionRow;

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 50.0;
const TITLE_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 10.0;
const LINE_HEIGHT: f64 = 14.0;

/// Rows per page, leaving room for the title and header lines.
const ROWS_PER_PAGE: usize = 48;

/// Column x-offsets from the left margin: date, type, label, amount,
/// description.
const COLUMNS: [f64; 5] = [0.0, 75.0, 135.0, 280.0, 350.0];

/// Render the transaction rows as a paginated PDF document.
pub fn render_transactions_pdf(title: &str, rows: &[TransactionRow]) -> Vec<u8> {
    let pages: Vec<&[TransactionRow]> = if rows.is_empty() {
        vec![&[]]
    } else {
        rows.chunks(ROWS_PER_PAGE).collect()
    };

    let streams: Vec<Vec<u8>> = pages
        .iter()
        .enumerate()
        .map(|(index, page_rows)| page_content(title, page_rows, index == 0))
        .collect();

    assemble_document(&streams)
}

/// Build the content stream for one page.
fn page_content(title: &str, rows: &[TransactionRow], first_page: bool) -> Vec<u8> {
    let mut ops = String::from("BT\n");
    let mut y = PAGE_HEIGHT - MARGIN;

    if first_page {
        ops.push_str(&text_at(MARGIN, y, TITLE_SIZE, title));
        y -= LINE_HEIGHT * 2.0;
    }

    for (column, heading) in COLUMNS
        .iter()
        .zip(["Date", "Type", "Category/Source", "Amount", "Description"])
    {
        ops.push_str(&text_at(MARGIN + column, y, BODY_SIZE, heading));
    }
    y -= LINE_HEIGHT;

    for row in rows {
        let cells = [
            row.date.to_string(),
            row.kind.to_string(),
            row.label.clone(),
            format!("{:.2}", row.amount),
            row.description.clone(),
        ];
        for (column, cell) in COLUMNS.iter().zip(cells) {
            ops.push_str(&text_at(MARGIN + column, y, BODY_SIZE, &cell));
        }
        y -= LINE_HEIGHT;
    }

    ops.push_str("ET\n");
    ops.into_bytes()
}

fn text_at(x: f64, y: f64, size: f64, text: &str) -> String {
    format!(
        "/F1 {size} Tf 1 0 0 1 {x:.1} {y:.1} Tm ({}) Tj\n",
        escape_text(text)
    )
}

/// Escape the characters with special meaning inside a PDF literal string.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(character);
            }
            '\n' | '\r' => escaped.push(' '),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Assemble the page content streams into a complete PDF file.
///
/// Object layout: 1 = catalog, 2 = page tree, 3 = font, then alternating
/// page and content-stream objects.
fn assemble_document(streams: &[Vec<u8>]) -> Vec<u8> {
    let page_count = streams.len();
    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(3 + page_count * 2);

    let page_ids: Vec<usize> = (0..page_count).map(|index| 4 + index * 2).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>").into_bytes(),
    );
    objects.push(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec());

    for (index, stream) in streams.iter().enumerate() {
        let content_id = 5 + index * 2;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R \
                /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                /Resources << /Font << /F1 3 0 R >> >> \
                /Contents {content_id} 0 R >>"
            )
            .into_bytes(),
        );

        let mut content = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        content.extend_from_slice(stream);
        content.extend_from_slice(b"\nendstream");
        objects.push(content);
    }

    let mut document = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());

    for (index, body) in objects.iter().enumerate() {
        offsets.push(document.len());
        document.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        document.extend_from_slice(body);
        document.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = document.len();
    document.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    document.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        document.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    document.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );

    document
}

#[cfg(test)]
mod pdf_tests {
    use time::macros::date;

    use crate::{
        export::TransactionRow,
        pdf::{escape_text, render_transactions_pdf},
    };

    fn row(day: u8, description: &str) -> TransactionRow {
        TransactionRow {
            date: date!(2024 - 03 - 01).replace_day(day).unwrap(),
            kind: "Expense",
            label: "Food".to_string(),
            amount: 12.5,
            description: description.to_string(),
        }
    }

    #[test]
    fn document_has_pdf_header_and_trailer() {
        let bytes = render_transactions_pdf("Expense Tracker Report", &[row(1, "Lunch")]);

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));

        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Expense Tracker Report) Tj"));
        assert!(text.contains("(12.50) Tj"));
    }

    #[test]
    fn empty_export_still_produces_one_page() {
        let bytes = render_transactions_pdf("Expense Tracker Report", &[]);
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Count 1"));
        assert!(text.contains("(Date) Tj"));
    }

    #[test]
    fn long_exports_paginate() {
        let rows: Vec<_> = (0..100u8).map(|index| row(1 + (index % 28), "x")).collect();
        let bytes = render_transactions_pdf("Expense Tracker Report", &rows);
        let text = String::from_utf8_lossy(&bytes);

        // 100 rows at 48 per page.
        assert!(text.contains("/Count 3"));
    }

    #[test]
    fn parentheses_and_backslashes_are_escaped() {
        assert_eq!(escape_text("a(b)c\\d"), "a\\(b\\)c\\\\d");
        assert_eq!(escape_text("two\nlines"), "two lines");
    }
}
