//! Structural defect reporting.
//!
//! Non-fatal problems found in readable data are collected as [`Defect`]
//! items instead of aborting the load. A tree is still built over defective
//! data; callers that need trustworthy results inspect the collection
//! returned by [`crate::check::report`] (or by a failsafe reader) first.

use std::fmt;

/// Category of a structural defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectKind {
    /// IDs do not increase by exactly one from row to row.
    NonSequentialIds,
    /// No soma-type point in the table.
    MissingSoma,
    /// Neurite-type point with zero radius.
    ZeroRadiusNeurite,
    /// Parent ID refers forward, to the row itself, or to no row at all.
    InvalidParent,
    /// Data line that could not be parsed and was skipped.
    SkippedLine,
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonSequentialIds => write!(f, "NonSequentialIds"),
            Self::MissingSoma => write!(f, "MissingSoma"),
            Self::ZeroRadiusNeurite => write!(f, "ZeroRadiusNeurite"),
            Self::InvalidParent => write!(f, "InvalidParent"),
            Self::SkippedLine => write!(f, "SkippedLine"),
        }
    }
}

/// A single defect with the IDs (or line numbers) it concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct Defect {
    /// The category.
    pub kind: DefectKind,
    /// Offending point IDs; line numbers for [`DefectKind::SkippedLine`].
    pub ids: Vec<i64>,
    /// A human-readable description.
    pub message: String,
}

impl Defect {
    /// Create a new defect.
    pub fn new(kind: DefectKind, ids: Vec<i64>, message: impl Into<String>) -> Self {
        Self {
            kind,
            ids,
            message: message.into(),
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Collects defects found while reading or checking a table.
#[derive(Debug, Clone, Default)]
pub struct DefectCollection {
    items: Vec<Defect>,
}

impl DefectCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a defect.
    pub fn push(&mut self, defect: Defect) {
        log::warn!("{}", defect);
        self.items.push(defect);
    }

    /// Record a defect from its parts.
    pub fn report(&mut self, kind: DefectKind, ids: Vec<i64>, message: impl Into<String>) {
        self.push(Defect::new(kind, ids, message));
    }

    /// Check if there are any defects.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of defects.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all defects.
    pub fn iter(&self) -> std::slice::Iter<'_, Defect> {
        self.items.iter()
    }

    /// Get all defects of a specific kind.
    pub fn of_kind(&self, kind: DefectKind) -> Vec<&Defect> {
        self.items.iter().filter(|d| d.kind == kind).collect()
    }

    /// Check whether any defect of the given kind exists.
    pub fn has_kind(&self, kind: DefectKind) -> bool {
        self.items.iter().any(|d| d.kind == kind)
    }

    /// Append all defects of another collection.
    pub fn extend(&mut self, other: DefectCollection) {
        self.items.extend(other.items);
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Defect> {
        self.items
    }
}

impl IntoIterator for DefectCollection {
    type Item = Defect;
    type IntoIter = std::vec::IntoIter<Defect>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a DefectCollection {
    type Item = &'a Defect;
    type IntoIter = std::slice::Iter<'a, Defect>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
