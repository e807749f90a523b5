//! Integration tests for tree reconstruction and row walks

mod common;

use common::{chain, fixture_neuron, row, y_tree};
use neuromorph::{IterMode, MorphError, NodeKind, PointTree, PointType, RawData, ROOT_PARENT};

#[test]
fn test_y_tree_points() {
    let tree = PointTree::new(y_tree());
    assert_eq!(tree.fork_points(), &[2]);
    assert_eq!(tree.end_points(), &[3, 4]);
    assert_eq!(tree.roots(), &[0]);
}

#[test]
fn test_end_and_fork_children() {
    let tree = fixture_neuron().tree().clone();
    for &id in tree.end_points() {
        assert!(tree.children(id).unwrap().is_empty());
        assert_eq!(tree.node_kind(id).unwrap(), NodeKind::Leaf);
    }
    for &id in tree.fork_points() {
        assert!(tree.children(id).unwrap().len() >= 2);
    }
}

#[test]
fn test_chain_with_offset() {
    let tree = PointTree::new(chain(100, 5));
    assert_eq!(tree.offset(), 100);
    assert!(tree.fork_points().is_empty());
    assert_eq!(tree.end_points(), &[104]);

    let ids: Vec<i64> = tree
        .iter_row(100, IterMode::Forward)
        .unwrap()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![100, 101, 102, 103, 104]);
}

#[test]
fn test_iter_row_bounds() {
    let tree = PointTree::new(chain(100, 5));
    for id in [0, 99, 105] {
        match tree.iter_row(id, IterMode::DepthFirst) {
            Err(MorphError::Lookup { first, end, .. }) => assert_eq!((first, end), (100, 105)),
            other => panic!("unexpected {:?}", other.map(|it| it.count())),
        }
    }
}

#[test]
fn test_depth_first_from_root_visits_all() {
    let tree = PointTree::new(y_tree());
    let ids: Vec<i64> = tree
        .iter_row(0, IterMode::DepthFirst)
        .unwrap()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_cycle_does_not_hang() {
    // 1 and 2 claim each other as parent
    let tree = PointTree::new(RawData::from_rows(vec![
        row(0, ROOT_PARENT, PointType::Soma),
        row(1, 2, PointType::Axon),
        row(2, 1, PointType::Axon),
    ]));
    assert_eq!(tree.unlinked(), &[1]);
    let total: usize = tree
        .roots()
        .iter()
        .map(|&r| tree.iter_row(r, IterMode::DepthFirst).unwrap().count())
        .sum();
    assert_eq!(total, 3);
}
