//! Cell-level view: soma points and neurite trees

use crate::data::{RawData, Row};
use crate::error::Result;
use crate::tree::{IterMode, PointTree, RowIter};
use crate::types::{BoundingBox3D, PointType, Vector3};

/// A reconstructed neuron.
///
/// A neurite starts at every neurite-type point with no neurite-type point
/// among its linked ancestors, usually the first point after the soma.
/// Points of other types inside a neurite (undefined, fork or end markers)
/// belong to the neurite above them and never start a new one.
#[derive(Debug, Clone)]
pub struct Neuron {
    tree: PointTree,
    neurite_roots: Vec<i64>,
}

impl Neuron {
    /// Wrap a reconstructed tree
    pub fn new(tree: PointTree) -> Self {
        let data = tree.data();
        // in_neurite[i]: some linked ancestor of row i is a neurite point
        let mut in_neurite = vec![false; data.len()];
        let mut neurite_roots = Vec::new();

        for (pos, row) in data.iter().enumerate() {
            let parent = data.position_of(row.parent_id).filter(|&p| p < pos);
            if let Some(p) = parent {
                in_neurite[pos] = in_neurite[p] || data.rows()[p].point_type.is_neurite();
            }
            if row.point_type.is_neurite() && !in_neurite[pos] {
                neurite_roots.push(tree.offset() + pos as i64);
            }
        }

        Neuron {
            tree,
            neurite_roots,
        }
    }

    /// Reconstruct a neuron from a raw table
    pub fn from_data(data: RawData) -> Self {
        Neuron::new(PointTree::new(data))
    }

    /// The underlying tree
    pub fn tree(&self) -> &PointTree {
        &self.tree
    }

    /// Soma-type rows in table order
    pub fn soma_points(&self) -> impl Iterator<Item = &Row> + '_ {
        self.tree.data().rows_of_type(PointType::Soma)
    }

    /// Mean position of the soma points
    pub fn soma_center(&self) -> Option<Vector3> {
        let (sum, count) = self
            .soma_points()
            .fold((Vector3::ZERO, 0usize), |(sum, n), r| (sum + r.position(), n + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// All neurites, ordered by root ID
    pub fn neurites(&self) -> Vec<Neurite<'_>> {
        self.neurite_roots
            .iter()
            .map(|&root| Neurite {
                tree: &self.tree,
                root,
            })
            .collect()
    }

    /// Number of neurites
    pub fn neurite_count(&self) -> usize {
        self.neurite_roots.len()
    }

    /// Extent of all points
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        self.tree.data().bounding_box()
    }
}

impl From<RawData> for Neuron {
    fn from(data: RawData) -> Self {
        Neuron::from_data(data)
    }
}

/// One neurite: the subtree below a neurite root point
#[derive(Debug, Clone, Copy)]
pub struct Neurite<'a> {
    tree: &'a PointTree,
    root: i64,
}

impl<'a> Neurite<'a> {
    /// Neurite rooted at `root` of `tree`
    pub fn new(tree: &'a PointTree, root: i64) -> Result<Self> {
        tree.row(root)?;
        Ok(Neurite { tree, root })
    }

    /// Tree the neurite belongs to
    pub fn tree(&self) -> &'a PointTree {
        self.tree
    }

    /// ID of the root point
    pub fn root_id(&self) -> i64 {
        self.root
    }

    /// Row of the root point
    pub fn root_row(&self) -> &'a Row {
        &self.tree.data().rows()[self.tree.position_unchecked(self.root)]
    }

    /// Type of the root point
    pub fn point_type(&self) -> PointType {
        self.root_row().point_type
    }

    /// All rows of the neurite, depth first
    pub fn rows(&self) -> RowIter<'a> {
        RowIter::new(
            self.tree,
            self.tree.position_unchecked(self.root),
            IterMode::DepthFirst,
        )
    }
}
