//! Shared test utilities for neuromorph integration tests.
//!
//! Fixture morphologies exist in every supported layout so tests can assert
//! that readers agree with each other.

#![allow(dead_code)]

use neuromorph::io::h5::{Dataset, MemoryH5};
use neuromorph::{Neuron, PointType, RawData, Row, SwcReader, Vector3, ROOT_PARENT};

// ===========================================================================
// Row builders
// ===========================================================================

/// Unit-radius row at `(id, 0, 0)`
pub fn row(id: i64, parent: i64, point_type: PointType) -> Row {
    Row::new(Vector3::new(id as f64, 0.0, 0.0), 1.0, point_type, id, parent)
}

/// Linear chain of `n` axon points, IDs starting at `first`
pub fn chain(first: i64, n: usize) -> RawData {
    let rows = (0..n as i64)
        .map(|i| {
            let parent = if i == 0 { ROOT_PARENT } else { first + i - 1 };
            row(first + i, parent, PointType::Axon)
        })
        .collect();
    RawData::from_rows(rows)
}

/// Y-shaped tree: soma 0, axon trunk 1-2 forking into 3 and 4
pub fn y_tree() -> RawData {
    RawData::from_rows(vec![
        row(0, ROOT_PARENT, PointType::Soma),
        row(1, 0, PointType::Axon),
        row(2, 1, PointType::Axon),
        row(3, 2, PointType::Axon),
        row(4, 2, PointType::Axon),
    ])
}

// ===========================================================================
// Cross-format fixture
// ===========================================================================
//
// Sections:
//   0: soma          points 0-1, root
//   1: basal         points 2-3, parent 0
//   2: basal         points 4-5, parent 0
//   3: axon          point  6,   parent 1

/// Expected ParentIDs of the cross-format fixture
pub const FIXTURE_PARENTS: [i64; 7] = [-1, 0, 1, 2, 1, 4, 3];

/// Fixture point table, `(X, Y, Z, Diameter)`
pub const FIXTURE_POINTS: [[f64; 4]; 7] = [
    [0.0, 0.0, 0.0, 4.0],
    [0.0, 1.0, 0.0, 4.0],
    [0.0, 2.0, 0.0, 1.0],
    [0.0, 3.0, 0.0, 1.0],
    [1.0, 2.0, 0.0, 1.0],
    [2.0, 2.0, 0.0, 1.0],
    [0.0, 4.0, 0.0, 0.5],
];

/// The fixture as SWC text, with a header comment and a trailing comment
pub fn fixture_swc() -> String {
    let types = [1, 1, 3, 3, 3, 3, 2];
    let mut text = String::from("# fixture morphology\n# ID T X Y Z R P\n");
    for (i, p) in FIXTURE_POINTS.iter().enumerate() {
        text.push_str(&format!(
            "{} {} {} {} {} {} {}\n",
            i,
            types[i],
            p[0],
            p[1],
            p[2],
            p[3] / 2.0,
            FIXTURE_PARENTS[i]
        ));
    }
    text.push_str("\n# end\n");
    text
}

/// The fixture in the V1 HDF5 layout
pub fn fixture_v1() -> MemoryH5 {
    MemoryH5::new()
        .with_dataset("points", Dataset::from_rows(&FIXTURE_POINTS))
        .with_dataset(
            "structure",
            Dataset::from_rows(&[
                [0.0, 1.0, -1.0],
                [2.0, 3.0, 0.0],
                [4.0, 3.0, 0.0],
                [6.0, 2.0, 1.0],
            ]),
        )
}

/// The fixture in the V2 HDF5 layout, raw stage only
pub fn fixture_v2() -> MemoryH5 {
    MemoryH5::new()
        .with_dataset(
            "neuron1/structure/raw",
            Dataset::from_rows(&[[0.0, -1.0], [2.0, 0.0], [4.0, 0.0], [6.0, 1.0]]),
        )
        .with_dataset(
            "neuron1/structure/sectiontype",
            Dataset::from_rows(&[[1.0], [3.0], [3.0], [2.0]]),
        )
        .with_dataset("neuron1/raw/points", Dataset::from_rows(&FIXTURE_POINTS))
}

/// Fixture neuron read from SWC
pub fn fixture_neuron() -> Neuron {
    Neuron::from_data(read_swc(&fixture_swc()))
}

/// Read SWC text, panicking on failure
pub fn read_swc(text: &str) -> RawData {
    SwcReader::from_text(text)
        .read()
        .unwrap_or_else(|e| panic!("failed to read SWC: {e}"))
}

/// IDs of rows in order
pub fn ids(data: &RawData) -> Vec<i64> {
    data.iter().map(|r| r.id).collect()
}
