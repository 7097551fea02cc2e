//! Arena-backed block tree.
//!
//! Every node of a parse lives in one `Vec`; containers refer to their
//! children by [`NodeId`]. Documents (the root, list-item bodies and quote
//! bodies) own a cursor: the id of their currently open child, if any.

use smallvec::SmallVec;

pub use crate::pattern::ListKind;

/// Index of a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root document of every tree.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Discriminant of a [`Block`], used in error reports and close checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Document,
    Heading,
    Paragraph,
    List,
    ListItem,
    Table,
    TableRow,
    BlockQuote,
    Example,
    Source,
    Blank,
}

impl BlockKind {
    /// Multi-line blocks that route continuation lines themselves.
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::List | Self::Table | Self::BlockQuote | Self::Example | Self::Source
        )
    }

    /// Containers closed only by an explicit end marker.
    #[inline]
    pub fn is_delimited(self) -> bool {
        matches!(self, Self::BlockQuote | Self::Example | Self::Source)
    }
}

/// A block in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A sequence of blocks with its own cursor.
    Document {
        /// Added to every heading level in this document.
        heading_offset: usize,
        /// Zero for the root, one more per enclosing list item or quote.
        depth: usize,
        children: Vec<NodeId>,
        cursor: Option<NodeId>,
    },
    Heading {
        /// Marker count plus the document's heading offset.
        level: usize,
        title: String,
    },
    /// Raw lines, inline-resolved at render time.
    Paragraph { lines: Vec<String> },
    List {
        kind: ListKind,
        indent: usize,
        /// The last item is the current one.
        items: Vec<NodeId>,
    },
    ListItem {
        indent: usize,
        /// Nested [`Block::Document`].
        body: NodeId,
    },
    Table {
        rows: Vec<NodeId>,
        /// Rows before the last separator line render as header cells.
        header_rows: usize,
    },
    TableRow { cells: SmallVec<[String; 4]> },
    BlockQuote {
        /// Nested [`Block::Document`].
        body: NodeId,
    },
    /// Verbatim lines, never inline-resolved.
    Example { lines: Vec<String> },
    /// Verbatim lines plus the language from the begin marker.
    Source { language: String, lines: Vec<String> },
    Blank,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Document { .. } => BlockKind::Document,
            Self::Heading { .. } => BlockKind::Heading,
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::List { .. } => BlockKind::List,
            Self::ListItem { .. } => BlockKind::ListItem,
            Self::Table { .. } => BlockKind::Table,
            Self::TableRow { .. } => BlockKind::TableRow,
            Self::BlockQuote { .. } => BlockKind::BlockQuote,
            Self::Example { .. } => BlockKind::Example,
            Self::Source { .. } => BlockKind::Source,
            Self::Blank => BlockKind::Blank,
        }
    }
}

/// A block plus its open flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub block: Block,
    open: bool,
}

impl Node {
    /// Whether the node still accepts lines.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// The block tree of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding an empty, open root document.
    pub fn new(heading_offset: usize) -> Self {
        let root = Node {
            block: Block::Document {
                heading_offset,
                depth: 0,
                children: Vec::new(),
                cursor: None,
            },
            open: true,
        };
        Self { nodes: vec![root] }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes, the root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is never true.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// Kind of a node. Ids always come from this tree.
    #[inline]
    pub fn kind(&self, id: NodeId) -> BlockKind {
        self.nodes[id.index()].block.kind()
    }

    #[inline]
    pub fn block(&self, id: NodeId) -> &Block {
        &self.nodes[id.index()].block
    }

    /// Children of a document, or an empty slice for other nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.block(id) {
            Block::Document { children, .. } => children,
            _ => &[],
        }
    }

    /// The open child of a document.
    pub fn cursor(&self, id: NodeId) -> Option<NodeId> {
        match self.block(id) {
            Block::Document { cursor, .. } => *cursor,
            _ => None,
        }
    }

    /// The chain of open nodes from the root: each document's cursor, and
    /// through open lists and quotes into their current body.
    pub fn open_path(&self) -> Vec<NodeId> {
        let mut path = vec![self.root()];
        let mut doc = self.root();
        while let Some(open) = self.cursor(doc) {
            path.push(open);
            match self.current_body(open) {
                Some(body) => {
                    path.push(body);
                    doc = body;
                }
                None => break,
            }
        }
        path
    }

    /// The nested document lines are routed into: the current item's body
    /// for a list, the body for a quote.
    pub fn current_body(&self, id: NodeId) -> Option<NodeId> {
        match self.block(id) {
            Block::List { items, .. } => items.last().and_then(|&item| match self.block(item) {
                Block::ListItem { body, .. } => Some(*body),
                _ => None,
            }),
            Block::BlockQuote { body } => Some(*body),
            _ => None,
        }
    }

    /// Whether an explicitly delimited block (quote, example, source) is
    /// open anywhere on the cursor chain below `doc`.
    pub fn has_open_delimited(&self, doc: NodeId) -> bool {
        let mut doc = doc;
        while let Some(open) = self.cursor(doc) {
            if self.kind(open).is_delimited() {
                return true;
            }
            match self.current_body(open) {
                Some(body) => doc = body,
                None => return false,
            }
        }
        false
    }

    #[inline]
    pub(crate) fn block_mut(&mut self, id: NodeId) -> &mut Block {
        &mut self.nodes[id.index()].block
    }

    #[inline]
    pub(crate) fn set_open(&mut self, id: NodeId, open: bool) {
        self.nodes[id.index()].open = open;
    }

    /// Allocate a node that is not yet linked anywhere.
    pub(crate) fn alloc(&mut self, block: Block, open: bool) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node { block, open });
        id
    }

    /// Allocate an empty document nested one level below `parent`.
    pub(crate) fn alloc_document(&mut self, parent: NodeId) -> NodeId {
        let (heading_offset, depth) = match self.block(parent) {
            Block::Document {
                heading_offset,
                depth,
                ..
            } => (*heading_offset, *depth + 1),
            _ => (0, 1),
        };
        self.alloc(
            Block::Document {
                heading_offset,
                depth,
                children: Vec::new(),
                cursor: None,
            },
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_open_root() {
        let tree = Tree::new(2);
        assert_eq!(tree.len(), 1);
        assert!(tree.get(tree.root()).is_some_and(Node::is_open));
        assert_eq!(tree.open_path(), vec![NodeId::ROOT]);
        assert!(matches!(
            tree.block(tree.root()),
            Block::Document {
                heading_offset: 2,
                depth: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_nested_document_inherits_offset() {
        let mut tree = Tree::new(3);
        let body = tree.alloc_document(tree.root());
        match tree.block(body) {
            Block::Document {
                heading_offset,
                depth,
                ..
            } => {
                assert_eq!(*heading_offset, 3);
                assert_eq!(*depth, 1);
            }
            other => panic!("expected document, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_classes() {
        assert!(BlockKind::List.is_container());
        assert!(BlockKind::Table.is_container());
        assert!(!BlockKind::Paragraph.is_container());
        assert!(BlockKind::Source.is_delimited());
        assert!(!BlockKind::List.is_delimited());
    }

    #[test]
    fn test_node_id_roundtrip() {
        assert_eq!(NodeId::new(7).index(), 7);
        assert_eq!(NodeId::ROOT.index(), 0);
    }
}
