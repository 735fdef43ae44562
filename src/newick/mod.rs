//! Newick notation parser and writer.
//!
//! This module provides [NewickParser] to parse Newick strings into nested
//! [NewickTree](crate::model::NewickTree)s, and quick functions that go
//! straight to a flattened [TreeArray].
//!
//! # Quick API
//! * [`parse_str`] - parses a single string into a [TreeArray]
//! * [`parse_file`] - parses the first tree of a file into a [TreeArray]
//! * [`is_newick_path`] - whether a path looks like a Newick file
//!
//! # Format
//! The Newick format has the following grammar:
//! * `tree ::= node ';'`
//! * `node ::= leaf | internal`
//! * `internal ::= '(' node (',' node)* ')' label?`
//! * `leaf ::= label`
//! * `label ::= name? (':' number)?`
//!
//! Furthermore:
//! * Whitespace can occur between elements, just not within an unquoted
//!   name or a number
//! * Names may be single quoted, with `''` for a literal quote
//! * Comments are square brackets and can occur wherever whitespace can
//! * Numbers are non-negative and may use scientific notation

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::{to_newick, write_newick_file};

use crate::error::DendroError;
use crate::model::{Flattener, TreeArray};
use crate::newick::defs::NEWICK_FILE_EXTENSIONS;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string into a [TreeArray] using default settings.
///
/// Missing root length becomes 0, as does any other missing length
/// (configure a [Flattener] for a different default).
///
/// # Errors
/// [DendroError::MalformedNotation] if the string is not valid Newick.
///
/// # Example
/// ```
/// use dendrick::newick::parse_str;
///
/// let tree = parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);")?;
/// assert_eq!(tree.signed_parents(), vec![-1, 0, 0, 0, 3, 3]);
///
/// # Ok::<(), dendrick::DendroError>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<TreeArray, DendroError> {
    let nested = NewickParser::new().parse_str(newick.as_ref())?;
    Flattener::new().flatten(&nested)
}

/// Parses the first tree of a Newick file into a [TreeArray] using default settings.
///
/// # Errors
/// [DendroError::Io] if the file cannot be read,
/// [DendroError::MalformedNotation] if its first tree is not valid Newick.
///
/// # Example
/// ```no_run
/// use dendrick::newick::parse_file;
///
/// let tree = parse_file("clusters.nwk")?;
/// println!("Loaded {} nodes", tree.len());
///
/// # Ok::<(), dendrick::DendroError>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<TreeArray, DendroError> {
    let mut byte_parser = ByteParser::from_file(path)?;
    let nested = NewickParser::new().parse_tree(&mut byte_parser)?;
    Flattener::new().flatten(&nested)
}

/// Returns whether `path` has a Newick file ending (`.nwk` or `.newick`,
/// case-insensitive).
///
/// # Example
/// ```
/// use dendrick::newick::is_newick_path;
///
/// assert!(is_newick_path("clusters.nwk"));
/// assert!(!is_newick_path("clusters.csv"));
/// ```
pub fn is_newick_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            NEWICK_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
