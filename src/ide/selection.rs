//! Extracting selected text from a document.

use tower_lsp::lsp_types::{
    Position,
    Range,
};

/// Returns the text covered by `range`.
///
/// Positions are in UTF-16 code units as LSP mandates. Characters past the
/// end of a line clamp to the line end; a reversed range is normalized.
#[must_use]
pub fn text_in_range(text: &str, range: Range) -> Option<String> {
    let start = byte_offset(text, range.start)?;
    let end = byte_offset(text, range.end)?;
    let (start, end) = if start <= end { (start, end) } else { (end, start) };

    text.get(start..end).map(ToString::to_string)
}

/// Converts an LSP position into a byte offset into `text`.
///
/// Returns `None` when the line does not exist.
fn byte_offset(text: &str, position: Position) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        let newline = text.get(line_start..)?.find('\n')?;
        line_start += newline + 1;
    }

    let rest = text.get(line_start..)?;
    let line = rest.find('\n').and_then(|end| rest.get(..end)).unwrap_or(rest);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut units = 0;
    for (index, ch) in line.char_indices() {
        if units >= position.character {
            return Some(line_start + index);
        }
        units += u32::try_from(ch.len_utf16()).unwrap_or(2);
    }

    Some(line_start + line.len())
}
