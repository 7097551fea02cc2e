//! Line-driven block parser.
//!
//! Each line is dispatched against a document in a fixed priority order:
//! the open container first, then headings, list items, table rows, block
//! begin markers, blank lines, directives and finally paragraph text.
//! Lists and quotes own nested documents, and lines routed into them go
//! through the same dispatch one level down.

use crate::error::{ParseError, Result};
use crate::limits::MAX_BLOCK_NESTING;
use crate::pattern::{self, BlockBegin, BlockEnd, ListKind};

use super::node::{Block, BlockKind, Node, NodeId, Tree};

/// Incremental block parser.
///
/// # Example
/// ```
/// use orgmark::{Block, BlockParser};
///
/// let mut parser = BlockParser::new(0);
/// parser.feed_line("* Notes").unwrap();
/// parser.feed_line("first line").unwrap();
/// let tree = parser.finish().unwrap();
///
/// let children = tree.children(tree.root());
/// assert_eq!(children.len(), 2);
/// assert!(matches!(tree.block(children[0]), Block::Heading { level: 1, .. }));
/// ```
#[derive(Debug)]
pub struct BlockParser {
    tree: Tree,
}

impl BlockParser {
    /// Create a parser whose headings are shifted by `heading_offset` levels.
    pub fn new(heading_offset: usize) -> Self {
        Self {
            tree: Tree::new(heading_offset),
        }
    }

    /// Parse a whole document and return the finished tree.
    pub fn parse(mut self, input: &str) -> Result<Tree> {
        for line in input.lines() {
            self.feed_line(line)?;
        }
        self.finish()
    }

    /// Feed one line. Trailing whitespace is ignored.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim_end();
        let root = self.tree.root();
        self.dispatch(root, line)
    }

    /// The tree built so far.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Close everything still open and hand out the tree.
    pub fn finish(mut self) -> Result<Tree> {
        let root = self.tree.root();
        self.close_document(root)?;
        Ok(self.tree)
    }

    fn dispatch(&mut self, doc: NodeId, line: &str) -> Result<()> {
        while let Some(open) = self.open_container(doc) {
            if !self.terminates(open, line) {
                return self.continue_container(doc, open, line);
            }

            let kind = self.tree.kind(open);
            trace!("{kind:?} {open:?} terminated by {line:?}");
            self.close(doc, kind)?;

            // The line that ends a list also starts what follows.
            if kind != BlockKind::List {
                return Ok(());
            }
        }
        self.start_or_extend(doc, line)
    }

    fn open_container(&self, doc: NodeId) -> Option<NodeId> {
        self.tree
            .cursor(doc)
            .filter(|&open| self.tree.kind(open).is_container())
    }

    fn terminates(&self, open: NodeId, line: &str) -> bool {
        match self.tree.block(open) {
            Block::List { kind, indent, .. } => {
                if pattern::is_blank(line) {
                    return false;
                }
                let delimited_below = self
                    .tree
                    .current_body(open)
                    .is_some_and(|body| self.tree.has_open_delimited(body));
                if delimited_below {
                    return false;
                }
                let line_indent = pattern::indent_of(line);
                line_indent < *indent
                    || (line_indent <= *indent && starts_outer_block(line, *kind))
            }
            Block::Table { .. } => pattern::table_row(line).is_none(),
            Block::BlockQuote { body } => {
                pattern::block_end(line) == Some(BlockEnd::Quote)
                    && !self.tree.has_open_delimited(*body)
            }
            Block::Example { .. } => pattern::block_end(line) == Some(BlockEnd::Example),
            Block::Source { .. } => pattern::block_end(line) == Some(BlockEnd::Source),
            _ => false,
        }
    }

    fn continue_container(&mut self, doc: NodeId, open: NodeId, line: &str) -> Result<()> {
        match self.tree.kind(open) {
            BlockKind::List => {
                let (kind, indent) = self.list_shape(open)?;
                let delimited_below = self
                    .tree
                    .current_body(open)
                    .is_some_and(|body| self.tree.has_open_delimited(body));
                match pattern::list_item(line) {
                    Some(item) if !delimited_below && item.kind == kind && item.indent == indent => {
                        self.start_item(doc, open, item.title)
                    }
                    _ => {
                        let body = self
                            .tree
                            .current_body(open)
                            .ok_or(ParseError::EmptyList(open))?;
                        self.dispatch(body, line)
                    }
                }
            }
            BlockKind::Table => {
                self.push_table_row(open, line);
                Ok(())
            }
            BlockKind::BlockQuote => match self.tree.current_body(open) {
                Some(body) => self.dispatch(body, line),
                None => Err(ParseError::NotADocument(open)),
            },
            BlockKind::Example | BlockKind::Source => {
                if let Block::Example { lines } | Block::Source { lines, .. } =
                    self.tree.block_mut(open)
                {
                    lines.push(line.to_string());
                }
                Ok(())
            }
            kind => Err(ParseError::NotAContainer { node: open, kind }),
        }
    }

    /// Rules for a line that no open container claimed.
    fn start_or_extend(&mut self, doc: NodeId, line: &str) -> Result<()> {
        let (heading_offset, depth) = self.document_info(doc)?;
        let can_nest = depth < MAX_BLOCK_NESTING;

        if let Some(heading) = pattern::heading(line) {
            self.close_paragraph(doc)?;
            let node = self.tree.alloc(
                Block::Heading {
                    level: heading.level + heading_offset,
                    title: heading.title.to_string(),
                },
                false,
            );
            return self.append_child(doc, node);
        }

        if can_nest {
            if let Some(item) = pattern::list_item(line) {
                self.close_paragraph(doc)?;
                let list = self.tree.alloc(
                    Block::List {
                        kind: item.kind,
                        indent: item.indent,
                        items: Vec::new(),
                    },
                    true,
                );
                self.open_child(doc, list)?;
                trace!("open {:?} list {list:?} at indent {}", item.kind, item.indent);
                return self.start_item(doc, list, item.title);
            }
        }

        if pattern::table_row(line).is_some() {
            self.close_paragraph(doc)?;
            let table = self.tree.alloc(
                Block::Table {
                    rows: Vec::new(),
                    header_rows: 0,
                },
                true,
            );
            self.open_child(doc, table)?;
            self.push_table_row(table, line);
            return Ok(());
        }

        if let Some(begin) = pattern::block_begin(line) {
            let block = match begin {
                BlockBegin::Quote if can_nest => Some(Block::BlockQuote {
                    body: self.tree.alloc_document(doc),
                }),
                BlockBegin::Quote => None,
                BlockBegin::Example => Some(Block::Example { lines: Vec::new() }),
                BlockBegin::Source { language } => Some(Block::Source {
                    language: language.to_string(),
                    lines: Vec::new(),
                }),
            };
            if let Some(block) = block {
                self.close_paragraph(doc)?;
                let node = self.tree.alloc(block, true);
                trace!("open {:?} {node:?}", self.tree.kind(node));
                return self.open_child(doc, node);
            }
        }

        if pattern::is_blank(line) {
            self.close_paragraph(doc)?;
            let node = self.tree.alloc(Block::Blank, false);
            return self.append_child(doc, node);
        }

        if pattern::is_directive(line) {
            return Ok(());
        }

        let text = line.trim().to_string();
        if let Some(open) = self.tree.cursor(doc) {
            if let Block::Paragraph { lines } = self.tree.block_mut(open) {
                lines.push(text);
                return Ok(());
            }
        }

        let paragraph = self.tree.alloc(Block::Paragraph { lines: vec![text] }, true);
        self.open_child(doc, paragraph)
    }

    /// Begin a new item in `list`, sealing the previous item's body.
    fn start_item(&mut self, doc: NodeId, list: NodeId, title: &str) -> Result<()> {
        if let Some(previous) = self.current_item(list) {
            if let Some(body) = self.tree.current_body(list) {
                self.close_document(body)?;
            }
            self.tree.set_open(previous, false);
        }

        let (_, indent) = self.list_shape(list)?;
        let body = self.tree.alloc_document(doc);
        let item = self.tree.alloc(Block::ListItem { indent, body }, true);
        if let Block::List { items, .. } = self.tree.block_mut(list) {
            items.push(item);
        }
        self.dispatch(body, title)
    }

    fn push_table_row(&mut self, table: NodeId, line: &str) {
        if pattern::is_table_separator(line) {
            if let Block::Table { rows, header_rows } = self.tree.block_mut(table) {
                *header_rows = rows.len();
            }
            return;
        }

        let Some(cells) = pattern::table_row(line) else {
            return;
        };
        let row = self.tree.alloc(
            Block::TableRow {
                cells: cells.iter().map(|cell| cell.to_string()).collect(),
            },
            false,
        );
        if let Block::Table { rows, .. } = self.tree.block_mut(table) {
            rows.push(row);
        }
    }

    fn close_paragraph(&mut self, doc: NodeId) -> Result<()> {
        match self.tree.cursor(doc) {
            Some(open) if self.tree.kind(open) == BlockKind::Paragraph => {
                self.close(doc, BlockKind::Paragraph)
            }
            _ => Ok(()),
        }
    }

    /// Close the document's open child, which must be of kind `expected`.
    fn close(&mut self, doc: NodeId, expected: BlockKind) -> Result<()> {
        let open = self
            .tree
            .cursor(doc)
            .ok_or(ParseError::NoCursor { document: doc })?;
        let found = self.tree.kind(open);
        if found != expected {
            return Err(ParseError::KindMismatch {
                node: open,
                expected,
                found,
            });
        }
        if !self.tree.get(open).is_some_and(Node::is_open) {
            return Err(ParseError::NotOpen {
                node: open,
                kind: found,
            });
        }

        match found {
            BlockKind::List => {
                if let Some(body) = self.tree.current_body(open) {
                    self.close_document(body)?;
                }
                if let Some(item) = self.current_item(open) {
                    self.tree.set_open(item, false);
                }
            }
            BlockKind::BlockQuote => {
                if let Some(body) = self.tree.current_body(open) {
                    self.close_document(body)?;
                }
            }
            _ => {}
        }

        self.tree.set_open(open, false);
        self.set_cursor(doc, None)
    }

    /// Close whatever is open in `doc`, then the document itself.
    fn close_document(&mut self, doc: NodeId) -> Result<()> {
        if let Some(open) = self.tree.cursor(doc) {
            let kind = self.tree.kind(open);
            self.close(doc, kind)?;
        }
        self.tree.set_open(doc, false);
        Ok(())
    }

    fn append_child(&mut self, doc: NodeId, node: NodeId) -> Result<()> {
        match self.tree.block_mut(doc) {
            Block::Document { children, .. } => {
                children.push(node);
                Ok(())
            }
            _ => Err(ParseError::NotADocument(doc)),
        }
    }

    fn open_child(&mut self, doc: NodeId, node: NodeId) -> Result<()> {
        if let Some(open) = self.tree.cursor(doc) {
            return Err(ParseError::CursorOccupied { document: doc, open });
        }
        self.append_child(doc, node)?;
        self.set_cursor(doc, Some(node))
    }

    fn set_cursor(&mut self, doc: NodeId, value: Option<NodeId>) -> Result<()> {
        match self.tree.block_mut(doc) {
            Block::Document { cursor, .. } => {
                *cursor = value;
                Ok(())
            }
            _ => Err(ParseError::NotADocument(doc)),
        }
    }

    fn document_info(&self, doc: NodeId) -> Result<(usize, usize)> {
        match self.tree.block(doc) {
            Block::Document {
                heading_offset,
                depth,
                ..
            } => Ok((*heading_offset, *depth)),
            _ => Err(ParseError::NotADocument(doc)),
        }
    }

    fn list_shape(&self, list: NodeId) -> Result<(ListKind, usize)> {
        match self.tree.block(list) {
            Block::List { kind, indent, .. } => Ok((*kind, *indent)),
            _ => Err(ParseError::KindMismatch {
                node: list,
                expected: BlockKind::List,
                found: self.tree.kind(list),
            }),
        }
    }

    fn current_item(&self, list: NodeId) -> Option<NodeId> {
        match self.tree.block(list) {
            Block::List { items, .. } => items.last().copied(),
            _ => None,
        }
    }
}

/// A line that opens an unrelated block and so ends a list at the same
/// or deeper indent.
fn starts_outer_block(line: &str, list_kind: ListKind) -> bool {
    pattern::heading(line).is_some()
        || pattern::block_begin(line).is_some()
        || pattern::list_item(line).is_some_and(|item| item.kind != list_kind)
}
