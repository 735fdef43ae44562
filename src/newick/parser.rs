//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses single
//! Newick strings or every tree of an input into [NewickTree]s.

use crate::model::node::{NewickNode, NewickTree};
use crate::model::NodeIndex;
use crate::newick::defs::NEWICK_LABEL_DELIMITERS;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use crate::parser::utils::unescape_label;
use tracing::debug;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick strings with arbitrary branching.
///
/// Nodes are consumed iteratively with an explicit stack of open clades,
/// so deeply nested (e.g. caterpillar) trees do not exhaust the call stack.
///
/// # Configuration
/// * [`with_label_unescaping()`](Self::with_label_unescaping)
///     - Turns underscores in unquoted names into spaces.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse the first tree of a string
/// * [`parse_tree`](Self::parse_tree) - Parse the next tree from a [ByteParser]
/// * [`parse_all`](Self::parse_all) - Parse all trees until EOF
///
/// # Example
/// ```
/// use dendrick::newick::NewickParser;
///
/// let tree = NewickParser::new()
///     .parse_str("(A:0.1,B:0.2,(C:0.3,D:0.4):0.5);")
///     .unwrap();
/// assert_eq!(tree.num_nodes(), 6);
/// assert_eq!(tree.num_leaves(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewickParser {
    unescape_labels: bool,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] keeping names verbatim.
    pub fn new() -> Self {
        Self {
            unescape_labels: false,
        }
    }

    /// Configures the parser to turn underscores in unquoted names into spaces.
    pub fn with_label_unescaping(mut self) -> Self {
        self.unescape_labels = true;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses the first Newick tree of `newick`; anything after its `;` is ignored.
    ///
    /// # Errors
    /// [ParsingError] if the notation is malformed.
    pub fn parse_str(&self, newick: &str) -> Result<NewickTree, ParsingError> {
        let mut byte_parser = ByteParser::for_str(newick);
        self.parse_tree(&mut byte_parser)
    }

    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser whose source contains only Newick
    ///   strings, except for whitespace and `[...]` comments.
    pub fn parse_all<B: ByteSource>(
        &self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<NewickTree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_tree(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree, consuming input up to and including its `;`.
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at (whitespace before) a tree
    ///
    /// # Errors
    /// [ParsingError] on unbalanced parentheses, invalid branch lengths,
    /// unexpected characters, or input ending before `;`. No partial tree
    /// is returned.
    pub fn parse_tree<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<NewickTree, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        let mut tree = NewickTree::new();
        // Internal nodes whose ')' has not been consumed yet
        let mut open: Vec<NodeIndex> = Vec::new();

        loop {
            // Start of a node: either a clade or a leaf
            parser.skip_comment_and_whitespace()?;
            let parent = open.last().copied();
            if parser.consume_if(b'(') {
                let index = tree.add_node(NewickNode::new_internal(), parent);
                open.push(index);
                continue;
            }
            let index = tree.add_node(NewickNode::new_leaf(), parent);
            self.parse_label_and_length(parser, &mut tree, index)?;

            // Node complete: close clades until the next sibling or the end
            loop {
                parser.skip_comment_and_whitespace()?;
                match parser.next_byte() {
                    Some(b',') => {
                        if open.is_empty() {
                            return Err(ParsingError::unbalanced_parentheses(
                                parser,
                                "',' outside of parentheses".to_string(),
                            ));
                        }
                        break;
                    }
                    Some(b')') => {
                        let Some(closed) = open.pop() else {
                            return Err(ParsingError::unbalanced_parentheses(
                                parser,
                                "')' without matching '('".to_string(),
                            ));
                        };
                        self.parse_label_and_length(parser, &mut tree, closed)?;
                    }
                    Some(b';') => {
                        if !open.is_empty() {
                            return Err(ParsingError::unbalanced_parentheses(
                                parser,
                                format!("{} '(' not closed before ';'", open.len()),
                            ));
                        }
                        debug!(
                            nodes = tree.num_nodes(),
                            leaves = tree.num_leaves(),
                            "parsed newick tree"
                        );
                        return Ok(tree);
                    }
                    Some(other) => {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            format!("Unexpected {:?} after node", char::from(other)),
                        ));
                    }
                    None if open.is_empty() => {
                        return Err(ParsingError::unexpected_eof(parser));
                    }
                    None => {
                        return Err(ParsingError::unbalanced_parentheses(
                            parser,
                            format!("input ended with {} '(' not closed", open.len()),
                        ));
                    }
                }
            }
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses `[name][:length]` and stores it on the node at `index`.
    fn parse_label_and_length<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut NewickTree,
        index: NodeIndex,
    ) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        let quoted = parser.peek_is(b'\'');
        let mut label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if self.unescape_labels && !quoted {
            label = unescape_label(&label);
        }
        // `''` names a node with the empty name
        let label = (quoted || !label.is_empty()).then_some(label);
        let branch_length = self.parse_branch_length(parser)?;
        tree.node_mut(index).set_label(label, branch_length);
        Ok(())
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a valid branch length
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if the value is missing, not a number, negative or not finite
    fn parse_branch_length<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<f64>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                branch_length_str.push(char::from(b));
                parser.next_byte();
            } else {
                break;
            }
        }

        match branch_length_str.parse::<f64>() {
            // `-0` passes the sign check and is stored as 0
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value.abs())),
            _ => Err(ParsingError::invalid_branch_length(parser, branch_length_str)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_caterpillar_does_not_recurse() {
        let depth = 50_000;
        let mut newick = "(".repeat(depth);
        newick.push('A');
        for _ in 0..depth {
            newick.push_str(",B)");
        }
        newick.push(';');

        let tree = NewickParser::new().parse_str(&newick).unwrap();
        assert_eq!(tree.num_nodes(), 2 * depth + 1);
        assert_eq!(tree.num_leaves(), depth + 1);
    }

    #[test]
    fn test_negative_zero_length_is_zero() {
        let tree = NewickParser::new().parse_str("(A:-0,B:-0.0e1);").unwrap();
        assert!(tree[1].length().unwrap().is_sign_positive());
        assert!(tree[2].length().unwrap().is_sign_positive());
    }

    #[test]
    fn test_quoted_empty_name_is_kept() {
        let tree = NewickParser::new().parse_str("('',B)'';").unwrap();
        assert_eq!(tree[0].name(), Some(""));
        assert_eq!(tree[1].name(), Some(""));
        assert_eq!(tree[2].name(), Some("B"));
    }

    #[test]
    fn test_names_on_internal_nodes() {
        let tree = NewickParser::new().parse_str("((A,B)AB:1,C)root;").unwrap();
        assert_eq!(tree[0].name(), Some("root"));
        assert_eq!(tree[1].name(), Some("AB"));
        assert_eq!(tree[1].length(), Some(1.0));
    }
}
