//! Assembles lexed lines into a hierarchical line tree.
//!
//! The tree is an index-based arena: nodes live in one `Vec` and refer to
//! each other by [`NodeId`], so parent back-references are plain indices and
//! never own anything. A synthetic root node holds the level-0 records as
//! children; the semantic pass walks the tree and the arena is dropped once
//! the typed document has been built.

use crate::{lexer::GedcomLine, GedcomError};

/// Index of a node within a [`LineTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

/// The synthetic root of every tree.
const ROOT: NodeId = NodeId(0);

/// One line of the source file, linked into the hierarchy.
#[derive(Debug)]
pub struct LineNode {
    /// Depth of this line. Children always sit one level below their parent.
    pub level: u8,
    /// Cross-reference identifier of a record declaration.
    pub xref_id: Option<String>,
    /// The uppercased tag. Empty only on the synthetic root.
    pub tag: String,
    /// The line value, possibly empty.
    pub value: Option<String>,
    /// 1-based source line number. Zero on the synthetic root.
    pub line: u32,
    /// The enclosing node. `None` only on the synthetic root.
    pub parent: Option<NodeId>,
    /// Child nodes in source order.
    pub children: Vec<NodeId>,
}

/// An arena of [`LineNode`]s forming one parsed file.
#[derive(Debug)]
pub struct LineTree {
    nodes: Vec<LineNode>,
}

impl LineTree {
    /// Builds the tree from lexed lines using their level numbers.
    ///
    /// # Errors
    ///
    /// Returns a `GedcomError::ParseError` when the first line is not at
    /// level 0 or when a line's level skips past its parent's level + 1.
    pub fn build(lines: Vec<GedcomLine>) -> Result<LineTree, GedcomError> {
        let mut nodes = vec![LineNode {
            level: 0,
            xref_id: None,
            tag: String::new(),
            value: None,
            line: 0,
            parent: None,
            children: Vec::new(),
        }];
        let mut stack: Vec<NodeId> = vec![ROOT];

        for line in lines {
            while stack.len() > 1 && nodes[stack[stack.len() - 1].0].level >= line.level {
                stack.pop();
            }
            let parent = stack.last().copied().unwrap_or(ROOT);

            if line.level > 0 {
                if parent == ROOT {
                    return Err(GedcomError::ParseError {
                        line: line.line,
                        message: format!("level {} line has no level 0 ancestor", line.level),
                    });
                }
                let parent_level = nodes[parent.0].level;
                if parent_level + 1 != line.level {
                    return Err(GedcomError::ParseError {
                        line: line.line,
                        message: format!(
                            "level {} skips a generation (enclosing line is level {parent_level})",
                            line.level
                        ),
                    });
                }
            }

            let id = NodeId(nodes.len());
            nodes.push(LineNode {
                level: line.level,
                xref_id: line.xref_id,
                tag: line.tag,
                value: line.value,
                line: line.line,
                parent: Some(parent),
                children: Vec::new(),
            });
            nodes[parent.0].children.push(id);
            stack.push(id);
        }

        Ok(LineTree { nodes })
    }

    /// The synthetic root whose children are the top-level records.
    #[must_use]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Borrows a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &LineNode {
        &self.nodes[id.0]
    }

    /// The children of a node, in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Renders the chain of enclosing tags down to `id`, with line numbers,
    /// for diagnostics. The synthetic root is omitted.
    #[must_use]
    pub fn tag_chain(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ROOT {
                break;
            }
            let node = self.node(cur);
            parts.push(format!("{} (line {})", node.tag, node.line));
            current = node.parent;
        }
        parts.reverse();
        parts.join(" > ")
    }
}
