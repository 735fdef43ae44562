//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] with support for peeking, consuming,
//! comment skipping and quote-aware label parsing. It is the foundation of
//! the [NewickParser](crate::newick::NewickParser).

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking, consuming,
/// and skipping.
///
/// # Features
/// - Works with any [ByteSource]
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes with `''` escaping)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use dendrick::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [a comment] (A:1,B:2);");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.parse_label(b"(),:;").unwrap(), "A");
/// ```
#[derive(Debug)]
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a string by copying it.
    ///
    /// # Arguments
    /// * `input` - The string to parse
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }

    /// Creates a new `ByteParser` over the whole content of the file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Returns whether the current byte equals `ch`.
    #[inline]
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a comment enclosed in square brackets `[...]` if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.consume_if(b'[') {
            if !self.consume_until(b']', ConsumeMode::Inclusive) {
                return Err(ParsingError::unclosed_comment(self));
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Consumes the current byte if it equals `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == ConsumeMode::Inclusive {
                    self.next_byte();
                }
                return true;
            }
            self.next_byte();
        }
        false
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(&self.source.get_context(k)).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set.
    ///
    /// Leading whitespace and comments are skipped first. An empty string is
    /// returned if a delimiter follows immediately.
    ///
    /// # Arguments
    /// * `delimiters` - Bytes that end an unquoted label
    ///
    /// # Errors
    /// Returns an error if a quoted label is not closed before EOF.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a label enclosed in single quotes.
    ///
    /// Assumes the parser is at the opening quote. Single quotes within the
    /// label are escaped by doubling them (e.g. `'Wilson''s'` becomes `Wilson's`).
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // opening '

        let mut label = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    if self.consume_if(b'\'') {
                        label.push(b'\'');
                    } else {
                        break;
                    }
                }
                Some(b) => label.push(b),
                None => return Err(ParsingError::unclosed_quote(self)),
            }
        }

        Ok(String::from_utf8_lossy(&label).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters
    /// (or a comment start, or EOF) is encountered.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut label = Vec::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) || b == b'[' {
                break;
            }
            label.push(b);
            self.next_byte();
        }

        String::from_utf8_lossy(&label).into_owned()
    }
}

/// Specifies whether to consume or leave the target when using `consume_until`.
///
/// # Examples
/// ```
/// use dendrick::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("[root length] (A,B):0.0;");
/// parser.consume_until(b']', ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b' '));
///
/// parser.consume_until(b':', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b':'));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConsumeMode {
    /// Consume the target byte along with everything before it.
    Inclusive,

    /// Stop before the target byte without consuming it.
    Exclusive,
}
