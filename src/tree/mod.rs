//! Tree reconstruction over raw point tables

mod iter;
mod point_tree;

pub use iter::{IterMode, RowIter};
pub use point_tree::{NodeKind, PointTree};
