//! Byte source abstractions for parsing.
//!
//! This module provides the [ByteSource] trait, which decouples the
//! [ByteParser](crate::parser::ByteParser) from where its bytes come from,
//! and the [InMemoryByteSource] used for strings and (small) Newick files.

use std::fs;
use std::path::Path;

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for byte sources used by
/// [ByteParser](crate::parser::ByteParser).
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns a slice of up to `k` bytes from the current position without allocating.
    fn peek_slice(&self, k: usize) -> &[u8];

    /// Returns up to `k` bytes from the current position for error context.
    fn get_context(&self, k: usize) -> Vec<u8> {
        self.peek_slice(k).to_vec()
    }

    /// Returns the current position in the byte stream.
    fn position(&self) -> usize;

    /// Check if at end of data.
    fn is_eof(&self) -> bool;
}

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// An in-memory byte source that owns its data.
///
/// Newick strings describing a single dendrogram are small,
/// so holding them fully in memory is the simplest and fastest option.
#[derive(Debug, Clone)]
pub struct InMemoryByteSource {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the byte slice
    pos: usize,
}

impl InMemoryByteSource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    ///
    /// # Arguments
    /// * `bytes` - The byte vector to parse
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Reads the entire file at `path` into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        let contents = fs::read(path)?;
        Ok(Self::from_vec(contents))
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline(always)]
    fn peek_slice(&self, k: usize) -> &[u8] {
        let start = self.pos.min(self.input.len());
        let end = (self.pos + k).min(self.input.len());
        &self.input[start..end]
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
