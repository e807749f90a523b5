//! Section and segment iteration over neurites, neurons and populations.
//!
//! A section runs from just after a fork (or from a neurite root) down to the
//! next fork or end point, inclusive. Sections are built on demand while
//! iterating; nothing is stored on the tree.

use crate::data::Row;
use crate::morphmath;
use crate::neuron::{Neurite, Neuron};
use crate::tree::PointTree;
use crate::types::TypeFilter;
use std::iter::FusedIterator;

/// What to iterate sections of
#[derive(Debug, Clone, Copy)]
pub enum Owner<'a> {
    /// A single neurite, unfiltered unless a filter is given
    Neurite(Neurite<'a>),
    /// All neurites of one neuron
    Cell(&'a Neuron),
    /// All neurites of several neurons, neuron by neuron
    Population(&'a [Neuron]),
}

impl<'a> Owner<'a> {
    /// Flatten to the neurites whose root type passes the filter
    pub fn neurites(&self, filter: Option<TypeFilter>) -> Vec<Neurite<'a>> {
        let (candidates, filter) = match *self {
            Owner::Neurite(neurite) => (vec![neurite], filter),
            Owner::Cell(neuron) => (neuron.neurites(), Some(filter.unwrap_or_default())),
            Owner::Population(neurons) => (
                neurons.iter().flat_map(Neuron::neurites).collect(),
                Some(filter.unwrap_or_default()),
            ),
        };
        match filter {
            Some(filter) => candidates
                .into_iter()
                .filter(|n| filter.matches(n.point_type()))
                .collect(),
            None => candidates,
        }
    }
}

impl<'a> From<Neurite<'a>> for Owner<'a> {
    fn from(neurite: Neurite<'a>) -> Self {
        Owner::Neurite(neurite)
    }
}

impl<'a> From<&'a Neuron> for Owner<'a> {
    fn from(neuron: &'a Neuron) -> Self {
        Owner::Cell(neuron)
    }
}

impl<'a> From<&'a [Neuron]> for Owner<'a> {
    fn from(neurons: &'a [Neuron]) -> Self {
        Owner::Population(neurons)
    }
}

impl<'a> From<&'a Vec<Neuron>> for Owner<'a> {
    fn from(neurons: &'a Vec<Neuron>) -> Self {
        Owner::Population(neurons.as_slice())
    }
}

/// Consecutive point pair
pub type Segment<'a> = (&'a Row, &'a Row);

/// A non-empty run of points
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    points: Vec<&'a Row>,
}

impl<'a> Section<'a> {
    /// Section over `points`, `None` if there are none
    pub fn new(points: Vec<&'a Row>) -> Option<Self> {
        (!points.is_empty()).then_some(Section { points })
    }

    /// Points in order
    pub fn points(&self) -> &[&'a Row] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point
    pub fn first(&self) -> &'a Row {
        self.points[0]
    }

    /// Last point, the fork or end point closing the section
    pub fn last(&self) -> &'a Row {
        self.points[self.points.len() - 1]
    }

    /// Point IDs in order
    pub fn ids(&self) -> Vec<i64> {
        self.points.iter().map(|r| r.id).collect()
    }

    /// Consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = Segment<'a>> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Consume into consecutive point pairs
    pub fn into_segments(self) -> impl Iterator<Item = Segment<'a>> {
        let points = self.points;
        (1..points.len()).map(move |i| (points[i - 1], points[i]))
    }

    /// Summed point-to-point distance
    pub fn length(&self) -> f64 {
        morphmath::section_length(self)
    }

    /// Summed lateral frustum area
    pub fn area(&self) -> f64 {
        morphmath::section_area(self)
    }

    /// Summed frustum volume
    pub fn volume(&self) -> f64 {
        morphmath::section_volume(self)
    }
}

/// Pre-order sections of a sequence of neurites
#[derive(Debug, Clone)]
pub struct SectionIter<'a> {
    neurites: std::vec::IntoIter<Neurite<'a>>,
    pending: Vec<(&'a PointTree, usize)>,
}

impl<'a> SectionIter<'a> {
    fn new(neurites: Vec<Neurite<'a>>) -> Self {
        SectionIter {
            neurites: neurites.into_iter(),
            pending: Vec::new(),
        }
    }
}

impl<'a> Iterator for SectionIter<'a> {
    type Item = Section<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((tree, start)) = self.pending.pop() {
                let rows = tree.data().rows();
                let mut pos = start;
                let mut points = vec![&rows[pos]];
                while let [only] = tree.children_at(pos) {
                    pos = tree.position_unchecked(*only);
                    points.push(&rows[pos]);
                }

                let children = tree.children_at(pos);
                self.pending.extend(
                    children
                        .iter()
                        .rev()
                        .map(|&c| (tree, tree.position_unchecked(c))),
                );
                return Section::new(points);
            }

            let neurite = self.neurites.next()?;
            let tree = neurite.tree();
            self.pending
                .push((tree, tree.position_unchecked(neurite.root_id())));
        }
    }
}

impl FusedIterator for SectionIter<'_> {}

/// Segments of every section, section by section
#[derive(Debug, Clone)]
pub struct SegmentIter<'a> {
    sections: SectionIter<'a>,
    current: Option<Section<'a>>,
    index: usize,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(section) = &self.current {
                let points = section.points();
                if self.index < points.len() {
                    let segment = (points[self.index - 1], points[self.index]);
                    self.index += 1;
                    return Some(segment);
                }
            }
            self.current = Some(self.sections.next()?);
            self.index = 1;
        }
    }
}

impl FusedIterator for SegmentIter<'_> {}

/// Sections of every neurite of `owner` that passes `filter`.
///
/// With no filter, a single neurite is iterated as is while cells and
/// populations default to [`TypeFilter::NEURITES`].
pub fn sections<'a>(owner: impl Into<Owner<'a>>, filter: Option<TypeFilter>) -> SectionIter<'a> {
    SectionIter::new(owner.into().neurites(filter))
}

/// Apply `f` to every section.
///
/// `f` may return a `Result`; errors reach the caller unchanged, e.g. through
/// `collect::<Result<Vec<_>, _>>()`.
pub fn map_sections<'a, T, F>(
    owner: impl Into<Owner<'a>>,
    filter: Option<TypeFilter>,
    f: F,
) -> std::iter::Map<SectionIter<'a>, F>
where
    F: FnMut(Section<'a>) -> T,
{
    sections(owner, filter).map(f)
}

/// Consecutive point pairs within every section
pub fn segments<'a>(owner: impl Into<Owner<'a>>, filter: Option<TypeFilter>) -> SegmentIter<'a> {
    SegmentIter {
        sections: sections(owner, filter),
        current: None,
        index: 0,
    }
}

/// Number of sections
pub fn count_sections<'a>(owner: impl Into<Owner<'a>>) -> usize {
    sections(owner, None).count()
}
