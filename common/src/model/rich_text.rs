//! Flat-string encoding for the logbook's rich-text fields.
//!
//! Activity and output descriptions are entered as multi-line text but stored
//! in a single cell. Lines are joined with [`DELIMITER`] (`" ### "`); reading
//! a cell back splits on the bare `###` token and trims each piece, so cells
//! whose surrounding spaces were stripped by the store still decode.
//!
//! Escaping rules: there are none. A literal `###` typed by a user is
//! indistinguishable from a line break and is read back as one. [`encode`]
//! applies the same rule, which makes it idempotent on already-flat input.
//! Blank lines are dropped, so encoded cells never start or end with a
//! delimiter.

/// Separator written between lines.
pub const DELIMITER: &str = " ### ";

const TOKEN: &str = "###";

fn pieces(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .flat_map(|line| line.split(TOKEN))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}

/// Encodes multi-line text into the flat storage form.
pub fn encode(text: &str) -> String {
    pieces(text).collect::<Vec<_>>().join(DELIMITER)
}

/// Splits a stored cell back into display lines.
pub fn decode_lines(flat: &str) -> Vec<String> {
    pieces(flat).map(str::to_string).collect()
}

/// Renders a stored cell with a line break at each delimiter.
pub fn to_display(flat: &str) -> String {
    decode_lines(flat).join("\n")
}
