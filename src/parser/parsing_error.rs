//! Error types for the Newick parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting malformed notation encountered while parsing Newick strings.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Kinds of malformed notation that can occur during Newick parsing.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("Unexpected end of input")]
    UnexpectedEOF,
    #[error("Unclosed comment")]
    UnclosedComment,
    #[error("Unclosed quoted label")]
    UnclosedQuote,
    #[error("Unbalanced parentheses - {0}")]
    UnbalancedParentheses(String),
    #[error("Invalid branch length: {0:?}")]
    InvalidBranchLength(String),
    #[error("Invalid newick string: {0}")]
    InvalidNewickString(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (position and upcoming bytes).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at position {position}{}", format_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    /// Convenience constructor for UnclosedQuote
    pub fn unclosed_quote<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedQuote, parser)
    }

    /// Convenience constructor for UnbalancedParentheses
    pub fn unbalanced_parentheses<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::UnbalancedParentheses(msg), parser)
    }

    /// Convenience constructor for InvalidBranchLength
    pub fn invalid_branch_length<S: ByteSource>(parser: &ByteParser<S>, raw: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidBranchLength(raw), parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the input following the error position
    pub fn context(&self) -> &str {
        &self.context
    }
}
