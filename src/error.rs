//! Parser-state errors.
//!
//! Malformed markup never produces an error: every line has a weaker rule
//! that absorbs it. The variants here signal a broken cursor invariant inside
//! the block parser, which no input text should be able to trigger.

use crate::block::{BlockKind, NodeId};

/// Unrecoverable block-parser state fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A close was requested for a node whose open flag is not set.
    #[error("cannot close {kind:?} node {node:?}: it is not open")]
    NotOpen {
        /// The node the cursor pointed at.
        node: NodeId,
        /// Its block kind.
        kind: BlockKind,
    },

    /// The cursor pointed at a different block kind than the close expected.
    #[error("cursor kind mismatch on node {node:?}: expected {expected:?}, found {found:?}")]
    KindMismatch {
        /// The node the cursor pointed at.
        node: NodeId,
        /// Kind the caller tried to close.
        expected: BlockKind,
        /// Kind actually under the cursor.
        found: BlockKind,
    },

    /// A close was requested on a document with no open child.
    #[error("document {document:?} has no open block to close")]
    NoCursor {
        /// The document whose cursor was empty.
        document: NodeId,
    },

    /// A block was opened while the document's cursor still held another.
    #[error("document {document:?} already has open block {open:?}")]
    CursorOccupied {
        /// The document being appended to.
        document: NodeId,
        /// The block still under its cursor.
        open: NodeId,
    },

    /// Continuation was routed to a node that holds no lines.
    #[error("node {node:?} of kind {kind:?} is not a container")]
    NotAContainer {
        /// The node the line was routed to.
        node: NodeId,
        /// Its block kind.
        kind: BlockKind,
    },

    /// A list reached continuation routing without any item.
    #[error("list {0:?} has no current item")]
    EmptyList(NodeId),

    /// A node id was used where a document node was required.
    #[error("node {0:?} is not a document")]
    NotADocument(NodeId),
}

/// Result alias used across the parser.
pub type Result<T> = std::result::Result<T, ParseError>;
