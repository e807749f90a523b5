//! Lazy row walks over a [`PointTree`]

use super::point_tree::PointTree;
use crate::data::Row;
use std::iter::FusedIterator;

/// How [`PointTree::iter_row`] advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IterMode {
    /// Follow the only child until a fork or leaf, which is yielded last
    #[default]
    Forward,
    /// Pre-order over all descendants, children in ascending ID order
    DepthFirst,
}

/// Iterator over rows of a [`PointTree`].
///
/// Cloning yields an independent cursor at the same place.
#[derive(Debug, Clone)]
pub struct RowIter<'a> {
    tree: &'a PointTree,
    mode: IterMode,
    stack: Vec<usize>,
}

impl<'a> RowIter<'a> {
    pub(crate) fn new(tree: &'a PointTree, start: usize, mode: IterMode) -> Self {
        RowIter {
            tree,
            mode,
            stack: vec![start],
        }
    }

    /// Walk mode
    pub fn mode(&self) -> IterMode {
        self.mode
    }
}

impl<'a> Iterator for RowIter<'a> {
    type Item = &'a Row;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let pos = self.stack.pop()?;
        let children = tree.children_at(pos);

        match self.mode {
            IterMode::Forward => {
                if let [only] = children {
                    self.stack.push(tree.position_unchecked(*only));
                }
            }
            IterMode::DepthFirst => {
                self.stack.extend(
                    children
                        .iter()
                        .rev()
                        .map(|&c| tree.position_unchecked(c)),
                );
            }
        }

        Some(&tree.data().rows()[pos])
    }
}

impl FusedIterator for RowIter<'_> {}
