//! Newick string and file writing for [TreeArray]s.

use crate::model::{NodeIndex, TreeArray};
use crate::newick::defs::BUFFER_CHARS;
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Writes given list of trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick_file(file: File, trees: &[TreeArray]) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Returns the Newick representation of `tree` with closing semicolon.
///
/// Names are escaped where needed, every non-root edge gets its length, and
/// the root's length is only written when non-zero. Children appear in array
/// order, so a [reordered](crate::reorder) tree is written in its new order.
///
/// # Example
/// ```
/// use dendrick::newick::{parse_str, to_newick};
///
/// let tree = parse_str("(A:1,(B:2,C:3)BC:0.5);").unwrap();
/// assert_eq!(to_newick(&tree), "(A:1,(B:2,C:3)BC:0.5);");
/// ```
pub fn to_newick(tree: &TreeArray) -> String {
    enum Step {
        Enter(NodeIndex),
        Separator,
        Exit(NodeIndex),
    }

    let topology = tree.topology();
    let mut newick = String::with_capacity(estimate_newick_len(tree));
    let mut stack = vec![Step::Enter(tree.root())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(index) if topology.is_leaf(index) => {
                push_label(&mut newick, tree, index);
            }
            Step::Enter(index) => {
                newick.push('(');
                stack.push(Step::Exit(index));
                for (k, &child) in topology.children(index).iter().enumerate().rev() {
                    stack.push(Step::Enter(child));
                    if k > 0 {
                        stack.push(Step::Separator);
                    }
                }
            }
            Step::Separator => newick.push(','),
            Step::Exit(index) => {
                newick.push(')');
                push_label(&mut newick, tree, index);
            }
        }
    }

    newick.push(';');
    newick
}

/// Appends `name:length` of the node at `index`.
fn push_label(newick: &mut String, tree: &TreeArray, index: NodeIndex) {
    if let Some(name) = tree.name(index) {
        newick.push_str(&escape_label(name));
    }
    let length = tree.length(index);
    if tree.parent(index).is_some() || length != 0.0 {
        newick.push(':');
        newick.push_str(&length.to_string());
    }
}

/// Rough upper estimate of the Newick string length of `tree`.
fn estimate_newick_len(tree: &TreeArray) -> usize {
    let name_chars: usize = tree.names().iter().flatten().map(String::len).sum();
    name_chars + tree.len() * BUFFER_CHARS
}
