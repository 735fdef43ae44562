//! Constants for parsing and writing Newick strings.

/// Newick label delimiters: parentheses, comma, colon, semicolon, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"(),:; \n\t\r";

/// File endings recognised as Newick files
pub(crate) const NEWICK_FILE_EXTENSIONS: &[&str] = &["nwk", "newick"];

/// Extra buffer in Newick string length/capacity estimate
pub(crate) const BUFFER_CHARS: usize = 10;
