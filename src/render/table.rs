//! Grid preview of extracted records.

use crate::model::OutputRecord;
use unicode_width::UnicodeWidthStr;

/// How the preview grid is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// Markdown pipe table
    #[default]
    Markdown,
    /// ASCII box table
    Ascii,
}

/// Render records as a grid with an `id | packId | amount | status` header.
///
/// An empty list renders as the header alone.
pub fn to_table(records: &[OutputRecord], style: TableStyle) -> String {
    let header: Vec<String> = OutputRecord::COLUMNS.iter().map(|c| c.to_string()).collect();
    let body: Vec<Vec<String>> = records.iter().map(record_cells).collect();

    match style {
        TableStyle::Markdown => render_markdown(&header, &body),
        TableStyle::Ascii => render_ascii(&header, &body),
    }
}

fn record_cells(record: &OutputRecord) -> Vec<String> {
    vec![
        record.id.clone(),
        record.pack_id.to_string(),
        record.amount_text(),
        record.status.clone(),
    ]
}

fn render_markdown(header: &[String], body: &[Vec<String>]) -> String {
    let mut output = String::new();
    push_markdown_row(&mut output, header);
    output.push('|');
    for _ in header {
        output.push_str(" --- |");
    }
    output.push('\n');
    for row in body {
        push_markdown_row(&mut output, row);
    }
    output
}

fn push_markdown_row(output: &mut String, cells: &[String]) {
    output.push('|');
    for cell in cells {
        output.push(' ');
        output.push_str(&cell.replace('|', "\\|").replace('\n', " "));
        output.push_str(" |");
    }
    output.push('\n');
}

fn render_ascii(header: &[String], body: &[Vec<String>]) -> String {
    // Minimum width of 3 for readability
    let mut widths: Vec<usize> = header.iter().map(|h| h.width().max(3)).collect();
    for row in body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let border = |fill: char| {
        let mut line = String::from("+");
        for w in &widths {
            line.extend(std::iter::repeat_n(fill, w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut output = border('-');
    push_ascii_row(&mut output, header, &widths);
    output.push_str(&border('='));
    for row in body {
        push_ascii_row(&mut output, row, &widths);
    }
    output.push_str(&border('-'));
    output
}

fn push_ascii_row(output: &mut String, cells: &[String], widths: &[usize]) {
    output.push('|');
    for (cell, w) in cells.iter().zip(widths) {
        let text = cell.replace('\n', " ");
        // pad by display width so wide characters stay aligned
        let pad = w.saturating_sub(text.width());
        output.push(' ');
        output.push_str(&text);
        output.push_str(&" ".repeat(pad));
        output.push_str(" |");
    }
    output.push('\n');
}
