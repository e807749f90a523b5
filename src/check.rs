//! Structural integrity checks over a raw table.
//!
//! Checks never fail: each returns a [`CheckResult`] naming the offending
//! IDs, and [`report`] turns failed checks into a [`DefectCollection`].

use crate::data::RawData;
use crate::defect::{DefectCollection, DefectKind};
use crate::types::PointType;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub is_valid: bool,
    pub offending_ids: Vec<i64>,
}

impl CheckResult {
    /// Valid iff nothing offends
    pub fn from_offending(offending_ids: Vec<i64>) -> Self {
        CheckResult {
            is_valid: offending_ids.is_empty(),
            offending_ids,
        }
    }

    /// `(is_valid, offending_ids)`
    pub fn into_tuple(self) -> (bool, Vec<i64>) {
        (self.is_valid, self.offending_ids)
    }
}

/// Check that IDs increase by exactly one from row to row.
///
/// Offending IDs are the first ID after each broken step, so `[0, 1, 2, 4, 5]`
/// reports `[4]`.
pub fn has_sequential_ids(data: &RawData) -> CheckResult {
    let offending = data
        .rows()
        .windows(2)
        .filter(|w| w[1].id - w[0].id != 1)
        .map(|w| w[1].id)
        .collect();
    CheckResult::from_offending(offending)
}

/// Check that at least one row is of soma type.
pub fn has_soma(data: &RawData) -> CheckResult {
    CheckResult {
        is_valid: data.iter().any(|r| r.point_type == PointType::Soma),
        offending_ids: Vec::new(),
    }
}

/// Check that every neurite-type row has a non-zero radius.
pub fn finite_radius_neurites(data: &RawData) -> CheckResult {
    let offending = data
        .iter()
        .filter(|r| r.point_type.is_neurite() && r.radius == 0.0)
        .map(|r| r.id)
        .collect();
    CheckResult::from_offending(offending)
}

/// Check that each non-root row points at an earlier row of the table.
///
/// Forward references, self references and parents outside the table are
/// reported by the ID of the row carrying them.
pub fn has_valid_parents(data: &RawData) -> CheckResult {
    let offending = data
        .iter()
        .enumerate()
        .filter(|(pos, row)| {
            !row.has_root_parent()
                && data.position_of(row.parent_id).map_or(true, |p| p >= *pos)
        })
        .map(|(_, row)| row.id)
        .collect();
    CheckResult::from_offending(offending)
}

/// Run every check and collect one defect per failed check.
pub fn report(data: &RawData) -> DefectCollection {
    let mut defects = DefectCollection::new();

    let seq = has_sequential_ids(data);
    if !seq.is_valid {
        let message = format!("non-sequential IDs at {:?}", seq.offending_ids);
        defects.report(DefectKind::NonSequentialIds, seq.offending_ids, message);
    }

    if !has_soma(data).is_valid {
        defects.report(DefectKind::MissingSoma, Vec::new(), "no soma points");
    }

    let radius = finite_radius_neurites(data);
    if !radius.is_valid {
        let message = format!("zero-radius neurite points {:?}", radius.offending_ids);
        defects.report(DefectKind::ZeroRadiusNeurite, radius.offending_ids, message);
    }

    let parents = has_valid_parents(data);
    if !parents.is_valid {
        let message = format!("invalid parent references at {:?}", parents.offending_ids);
        defects.report(DefectKind::InvalidParent, parents.offending_ids, message);
    }

    defects
}
