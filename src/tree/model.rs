//! Node and bounds types shared by the allocator, engine and store

use serde::{Deserialize, Serialize};

/// Node identifier (global across trees, assigned by the store)
pub type NodeId = i64;

/// Tree identifier (groups the nodes of one logical tree)
pub type TreeId = i64;

/// A stored tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, immutable
    pub id: NodeId,

    /// Owning tree, immutable after creation
    pub tree_id: TreeId,

    /// Display label
    pub name: String,

    /// Left bound
    pub lft: i64,

    /// Right bound
    pub rgt: i64,

    /// Depth, root = 0
    pub level: i64,
}

impl Node {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            lft: self.lft,
            rgt: self.rgt,
            level: self.level,
        }
    }

    /// Number of nodes strictly below this one
    pub fn descendant_count(&self) -> i64 {
        (self.rgt - self.lft - 1) / 2
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }
}

/// A node about to be inserted (no id yet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode {
    pub tree_id: TreeId,
    pub name: String,
    pub lft: i64,
    pub rgt: i64,
    pub level: i64,
}

/// `lft`/`rgt`/`level` of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub lft: i64,
    pub rgt: i64,
    pub level: i64,
}

impl Bounds {
    /// Bounds of a freshly created root
    pub const ROOT: Bounds = Bounds {
        lft: 1,
        rgt: 2,
        level: 0,
    };

    /// Whole bound range covered by this node and its descendants
    pub fn span(&self) -> Span {
        Span::new(self.lft, self.rgt)
    }

    /// Bound units consumed by the subtree (2 per node)
    pub fn width(&self) -> i64 {
        self.rgt - self.lft + 1
    }

    /// True if `other` is this node or lies inside its subtree
    pub fn encloses(&self, other: &Bounds) -> bool {
        self.lft <= other.lft && other.rgt <= self.rgt
    }
}

/// Bounds plus the tree they belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtreeBounds {
    pub lft: i64,
    pub rgt: i64,
    pub level: i64,
    pub tree_id: TreeId,
}

impl SubtreeBounds {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            lft: self.lft,
            rgt: self.rgt,
            level: self.level,
        }
    }
}

impl From<&Node> for SubtreeBounds {
    fn from(node: &Node) -> Self {
        Self {
            lft: node.lft,
            rgt: node.rgt,
            level: node.level,
            tree_id: node.tree_id,
        }
    }
}

/// Inclusive range of bound values
///
/// An empty span has `start > end` and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Where a new or moved node lands relative to the target node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// First child of the target
    FirstChild,

    /// Last child of the target
    #[default]
    LastChild,

    /// Sibling immediately before the target
    #[serde(alias = "left")]
    Before,

    /// Sibling immediately after the target
    #[serde(alias = "right")]
    After,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::FirstChild => "first-child",
            Position::LastChild => "last-child",
            Position::Before => "before",
            Position::After => "after",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first-child" => Some(Position::FirstChild),
            "last-child" => Some(Position::LastChild),
            "before" | "left" => Some(Position::Before),
            "after" | "right" => Some(Position::After),
            _ => None,
        }
    }

    /// True for the two child positions
    pub fn is_child(&self) -> bool {
        matches!(self, Position::FirstChild | Position::LastChild)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
