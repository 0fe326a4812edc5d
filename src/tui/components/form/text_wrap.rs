//! Row layout helpers and dimensional constants for the `Form`.
//!
//! Rows are byte ranges into the buffer so the rendered lines and the cursor
//! position come from one layout.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to the first content cell (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Offset from area edge to the first content row (border)
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// One visual row of the buffer, as a byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Build textwrap options for the form's inner width.
/// Matches the options `Message` uses, so a draft wraps the way it will once sent.
pub(super) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Calculate the inner content width after subtracting border/padding overhead.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Split `text` into visual rows no wider than `width` display columns.
///
/// Every `\n` starts a new row; an empty buffer is a single empty row.
/// Spaces textwrap drops at a wrap point fall between two rows.
pub(super) fn layout_rows(text: &str, width: u16) -> Vec<Row> {
    let options = wrap_options(width);
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let first_row = rows.len();
        let mut search_from = 0;
        for segment in textwrap::wrap(line, &options) {
            // Segments come back in order, separated only by dropped spaces
            let Some(offset) = line[search_from..].find(&*segment) else {
                continue;
            };
            let start = search_from + offset;
            let end = start + segment.len();
            rows.push(Row {
                start: line_start + start,
                end: line_start + end,
            });
            search_from = end;
        }
        if rows.len() == first_row {
            rows.push(Row {
                start: line_start,
                end: line_start,
            });
        }
        line_start += line.len() + 1;
    }

    rows
}

/// Row index and display column of byte offset `pos` within `rows`.
///
/// The column counts trailing spaces after the row's last word, which textwrap
/// leaves out of the row itself.
pub(super) fn cursor_cell(text: &str, rows: &[Row], pos: usize) -> (usize, usize) {
    let row_idx = rows
        .iter()
        .rposition(|row| row.start <= pos)
        .unwrap_or(0);
    let col = rows
        .get(row_idx)
        .map(|row| text[row.start..pos.max(row.start)].width())
        .unwrap_or(0);
    (row_idx, col)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
