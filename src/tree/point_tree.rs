//! Arena-indexed tree over a raw point table

use super::iter::{IterMode, RowIter};
use crate::data::{RawData, Row};
use crate::error::{MorphError, Result};
use std::fmt;

/// Structural role of a node
///
/// When several apply, the first listed wins: a root with two children is a
/// `Root`, not a `Fork`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// No linked parent
    Root,
    /// Two or more children
    Fork,
    /// No children
    Leaf,
    /// Exactly one child
    Simple,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Fork => write!(f, "Fork"),
            NodeKind::Leaf => write!(f, "Leaf"),
            NodeKind::Simple => write!(f, "Simple"),
        }
    }
}

/// Parent/children index over a [`RawData`] table.
///
/// Node IDs are `offset + position`. Adjacency is built once on
/// construction and never changes.
///
/// # Linking
/// A row is linked under its parent only if the parent's position lies in
/// the table and before the row itself. Rows with the root sentinel become
/// roots; forward, self and dangling references are left unlinked (and
/// also act as roots) without touching the stored ParentID, so
/// [`PointTree::parent`] still reports what the file says. Since every link
/// points backwards, the structure is a forest and all walks terminate.
#[derive(Debug, Clone)]
pub struct PointTree {
    data: RawData,
    children: Vec<Vec<i64>>,
    linked: Vec<bool>,
    fork_points: Vec<i64>,
    end_points: Vec<i64>,
    roots: Vec<i64>,
    unlinked: Vec<i64>,
}

impl PointTree {
    /// Build the adjacency index over `data`
    pub fn new(data: RawData) -> Self {
        let offset = data.id_offset();
        let n = data.len();
        let mut children: Vec<Vec<i64>> = vec![Vec::new(); n];
        let mut linked = vec![false; n];
        let mut roots = Vec::new();
        let mut unlinked = Vec::new();

        for (pos, row) in data.iter().enumerate() {
            let node_id = offset + pos as i64;
            if row.has_root_parent() {
                roots.push(node_id);
                continue;
            }
            match data.position_of(row.parent_id) {
                Some(parent_pos) if parent_pos < pos => {
                    children[parent_pos].push(node_id);
                    linked[pos] = true;
                }
                _ => {
                    log::warn!(
                        "point {} has invalid parent {}; left unlinked",
                        node_id,
                        row.parent_id
                    );
                    roots.push(node_id);
                    unlinked.push(node_id);
                }
            }
        }

        let fork_points = Self::ids_where(offset, &children, |c| c.len() >= 2);
        let end_points = Self::ids_where(offset, &children, |c| c.is_empty());

        log::debug!(
            "reconstructed {} points: {} roots, {} forks, {} ends",
            n,
            roots.len(),
            fork_points.len(),
            end_points.len()
        );

        PointTree {
            data,
            children,
            linked,
            fork_points,
            end_points,
            roots,
            unlinked,
        }
    }

    fn ids_where(offset: i64, children: &[Vec<i64>], pred: impl Fn(&[i64]) -> bool) -> Vec<i64> {
        children
            .iter()
            .enumerate()
            .filter(|(_, c)| pred(c.as_slice()))
            .map(|(pos, _)| offset + pos as i64)
            .collect()
    }

    /// Table position of `id`, or a lookup error
    pub(crate) fn position(&self, id: i64) -> Result<usize> {
        self.data.position_of(id).ok_or(MorphError::Lookup {
            id,
            first: self.offset(),
            end: self.offset() + self.len() as i64,
        })
    }

    /// Position of a node ID produced by this tree
    pub(crate) fn position_unchecked(&self, id: i64) -> usize {
        (id - self.offset()) as usize
    }

    /// The underlying table
    pub fn data(&self) -> &RawData {
        &self.data
    }

    /// Give back the underlying table
    pub fn into_data(self) -> RawData {
        self.data
    }

    /// ID of the first node
    pub fn offset(&self) -> i64 {
        self.data.id_offset()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row of node `id`
    pub fn row(&self, id: i64) -> Result<&Row> {
        Ok(&self.data.rows()[self.position(id)?])
    }

    /// ParentID recorded for node `id`, exactly as read
    pub fn parent(&self, id: i64) -> Result<i64> {
        self.row(id).map(|r| r.parent_id)
    }

    /// Children of node `id` in ascending ID order
    pub fn children(&self, id: i64) -> Result<&[i64]> {
        Ok(&self.children[self.position(id)?])
    }

    /// Nodes with two or more children, ascending
    pub fn fork_points(&self) -> &[i64] {
        &self.fork_points
    }

    /// Nodes without children, ascending
    pub fn end_points(&self) -> &[i64] {
        &self.end_points
    }

    /// Nodes without a linked parent, ascending
    pub fn roots(&self) -> &[i64] {
        &self.roots
    }

    /// Roots whose ParentID was not the root sentinel
    pub fn unlinked(&self) -> &[i64] {
        &self.unlinked
    }

    /// Whether node `id` hangs under its recorded parent
    pub fn is_linked(&self, id: i64) -> Result<bool> {
        Ok(self.linked[self.position(id)?])
    }

    /// Structural role of node `id`
    pub fn node_kind(&self, id: i64) -> Result<NodeKind> {
        let pos = self.position(id)?;
        Ok(if !self.linked[pos] {
            NodeKind::Root
        } else {
            match self.children[pos].len() {
                0 => NodeKind::Leaf,
                1 => NodeKind::Simple,
                _ => NodeKind::Fork,
            }
        })
    }

    /// Lazily walk rows starting at `start_id`
    pub fn iter_row(&self, start_id: i64, mode: IterMode) -> Result<RowIter<'_>> {
        let start = self.position(start_id)?;
        Ok(RowIter::new(self, start, mode))
    }

    pub(crate) fn children_at(&self, pos: usize) -> &[i64] {
        &self.children[pos]
    }
}

impl From<RawData> for PointTree {
    fn from(data: RawData) -> Self {
        PointTree::new(data)
    }
}
