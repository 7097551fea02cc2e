//! Block-level parser for outline markup.
//!
//! The block parser is line-oriented and builds an arena tree of:
//! - Headings
//! - Paragraphs
//! - Lists (nested through list-item bodies)
//! - Tables with header promotion
//! - Quote, example and source blocks

mod node;
mod parser;

pub use node::{Block, BlockKind, ListKind, Node, NodeId, Tree};
pub use parser::BlockParser;
