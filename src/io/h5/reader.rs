//! HDF5 morphology reader
//!
//! Both layouts store points as `(X, Y, Z, Diameter)` with the ID implied by
//! position, plus a section table giving each section's first point, type and
//! parent section. Unpacking resolves every point's parent from that table:
//!
//! * V1: `points`, `structure` = `(first_point, type, parent_section)`
//! * V2: `neuron1/<stage>/points`, `neuron1/structure/<stage>` =
//!   `(first_point, parent_section)`, types in `neuron1/structure/sectiontype`

use super::source::{Dataset, H5Source};
use crate::data::{DataFormat, RawData, Row, ROOT_PARENT};
use crate::error::{MorphError, Result};
use crate::types::{PointType, Vector3};
use std::fmt;
use std::str::FromStr;

/// Parent section value of the root section
const NO_PARENT_SECTION: i64 = -1;

/// HDF5 morphology layout version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum H5Version {
    V1,
    V2,
}

impl H5Version {
    /// Table format tag for this layout
    pub fn data_format(&self) -> DataFormat {
        match self {
            H5Version::V1 => DataFormat::H5V1,
            H5Version::V2 => DataFormat::H5V2,
        }
    }
}

/// Processing stage stored in a V2 file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum H5Stage {
    #[default]
    Raw,
    Repaired,
    Unraveled,
}

impl H5Stage {
    /// Name used in dataset paths
    pub fn as_str(&self) -> &'static str {
        match self {
            H5Stage::Raw => "raw",
            H5Stage::Repaired => "repaired",
            H5Stage::Unraveled => "unraveled",
        }
    }

    /// Stage whose section table this stage uses; unraveled reuses raw
    fn structure_stage(&self) -> H5Stage {
        match self {
            H5Stage::Unraveled => H5Stage::Raw,
            other => *other,
        }
    }
}

impl fmt::Display for H5Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for H5Stage {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(H5Stage::Raw),
            "repaired" => Ok(H5Stage::Repaired),
            "unraveled" => Ok(H5Stage::Unraveled),
            other => Err(MorphError::Format(format!("unknown HDF5 stage '{}'", other))),
        }
    }
}

/// Configuration for the HDF5 reader.
#[derive(Debug, Clone, Default)]
pub struct H5ReaderConfiguration {
    /// Stage read from V2 files. Ignored for V1.
    ///
    /// Default: [`H5Stage::Raw`].
    pub stage: H5Stage,
}

/// One row of the section table
#[derive(Debug, Clone, Copy, PartialEq)]
struct SectionGroup {
    first_point: i64,
    point_type: PointType,
    parent_group: i64,
}

/// Detect the layout of an HDF5 morphology container
pub fn get_version<S: H5Source>(source: &S) -> Result<H5Version> {
    if source.has_dataset("points") && source.has_dataset("structure") {
        Ok(H5Version::V1)
    } else if source.has_dataset("neuron1/structure/raw") {
        Ok(H5Version::V2)
    } else {
        Err(MorphError::Format(
            "not an HDF5 morphology: neither V1 nor V2 tables found".into(),
        ))
    }
}

/// HDF5 morphology reader
///
/// The source is owned for the duration of the read and dropped with the
/// reader; pass `&source` to keep using it afterwards.
pub struct H5Reader<S: H5Source> {
    source: S,
    config: H5ReaderConfiguration,
}

impl<S: H5Source> H5Reader<S> {
    /// Create a reader over an opened container
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            config: H5ReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: H5ReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Layout of the underlying container
    pub fn version(&self) -> Result<H5Version> {
        get_version(&self.source)
    }

    /// Read the container, detecting its layout
    pub fn read(self) -> Result<RawData> {
        match self.version()? {
            H5Version::V1 => self.read_v1(),
            H5Version::V2 => self.read_v2(),
        }
    }

    /// Read the container as a V1 layout
    pub fn read_v1(self) -> Result<RawData> {
        let (points, groups) = unpack_v1(&self.source)?;
        Self::finish(&points, &groups, H5Version::V1)
    }

    /// Read the configured stage of a V2 layout
    pub fn read_v2(self) -> Result<RawData> {
        let (points, groups) = unpack_v2(&self.source, self.config.stage)?;
        Self::finish(&points, &groups, H5Version::V2)
    }

    fn finish(points: &Dataset, groups: &[SectionGroup], version: H5Version) -> Result<RawData> {
        let rows = unpack_data(points, groups)?;
        log::debug!(
            "unpacked {} points in {} sections ({:?})",
            rows.len(),
            groups.len(),
            version
        );
        Ok(RawData::new(rows, 0, version.data_format()))
    }
}

fn unpack_v1<S: H5Source>(source: &S) -> Result<(Dataset, Vec<SectionGroup>)> {
    let points = source.read_dataset("points")?;
    points.require_columns("points", 4)?;

    let structure = source.read_dataset("structure")?;
    structure.require_columns("structure", 3)?;

    let groups = structure
        .iter_rows()
        .map(|r| SectionGroup {
            first_point: r[0] as i64,
            point_type: PointType::from_value(r[1]),
            parent_group: r[2] as i64,
        })
        .collect();
    Ok((points, groups))
}

fn unpack_v2<S: H5Source>(source: &S, stage: H5Stage) -> Result<(Dataset, Vec<SectionGroup>)> {
    let points_path = format!("neuron1/{}/points", stage);
    let points = source.read_dataset(&points_path)?;
    points.require_columns(&points_path, 4)?;

    let structure_path = format!("neuron1/structure/{}", stage.structure_stage());
    let structure = source.read_dataset(&structure_path)?;
    structure.require_columns(&structure_path, 2)?;

    let types_path = "neuron1/structure/sectiontype";
    let types = source.read_dataset(types_path)?;
    types.require_columns(types_path, 1)?;

    if types.rows() != structure.rows() {
        return Err(MorphError::Format(format!(
            "'{}' has {} rows but '{}' has {}",
            types_path,
            types.rows(),
            structure_path,
            structure.rows()
        )));
    }

    let groups = structure
        .iter_rows()
        .zip(types.iter_rows())
        .map(|(r, t)| SectionGroup {
            first_point: r[0] as i64,
            point_type: PointType::from_value(t[0]),
            parent_group: r[1] as i64,
        })
        .collect();
    Ok((points, groups))
}

fn validate_groups(groups: &[SectionGroup], n_points: usize) -> Result<()> {
    if n_points == 0 {
        return Ok(());
    }
    let first = groups
        .first()
        .ok_or_else(|| MorphError::Format("points present but section table is empty".into()))?;
    if first.first_point != 0 {
        return Err(MorphError::Format(format!(
            "first section starts at point {}, expected 0",
            first.first_point
        )));
    }
    if let Some(pair) = groups.windows(2).find(|w| w[1].first_point <= w[0].first_point) {
        return Err(MorphError::Format(format!(
            "section start points not ascending: {} then {}",
            pair[0].first_point, pair[1].first_point
        )));
    }
    if let Some(last) = groups.last().filter(|g| g.first_point >= n_points as i64) {
        return Err(MorphError::Format(format!(
            "section starts at point {} but only {} points exist",
            last.first_point, n_points
        )));
    }
    let n_groups = groups.len() as i64;
    if let Some((index, group)) = groups.iter().enumerate().find(|(_, g)| {
        g.parent_group != NO_PARENT_SECTION && !(0..n_groups).contains(&g.parent_group)
    }) {
        return Err(MorphError::Format(format!(
            "section {} has parent section {} outside [0, {})",
            index, group.parent_group, n_groups
        )));
    }
    Ok(())
}

/// ID of the last point of section `group`
fn last_point(groups: &[SectionGroup], group: usize, n_points: usize) -> i64 {
    groups
        .get(group + 1)
        .map_or(n_points as i64, |next| next.first_point)
        - 1
}

/// Resolve type and parent of every point, producing rows with ID = position
fn unpack_data(points: &Dataset, groups: &[SectionGroup]) -> Result<Vec<Row>> {
    let n_points = points.rows();
    validate_groups(groups, n_points)?;

    let rows = points
        .iter_rows()
        .enumerate()
        .map(|(i, p)| {
            let id = i as i64;
            let owner = groups
                .partition_point(|g| g.first_point <= id)
                .saturating_sub(1);
            let group = &groups[owner];

            let parent_id = if id != group.first_point {
                id - 1
            } else if group.parent_group == NO_PARENT_SECTION {
                ROOT_PARENT
            } else {
                last_point(groups, group.parent_group as usize, n_points)
            };

            Row::new(
                Vector3::new(p[0], p[1], p[2]),
                p[3] / 2.0,
                group.point_type,
                id,
                parent_id,
            )
        })
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::h5::MemoryH5;

    // soma (0-1), two dendrite sections off the soma, one axon off the first
    fn v1() -> MemoryH5 {
        MemoryH5::new()
            .with_dataset(
                "points",
                Dataset::from_rows(&[
                    [0.0, 0.0, 0.0, 4.0],
                    [0.0, 1.0, 0.0, 4.0],
                    [0.0, 2.0, 0.0, 1.0],
                    [0.0, 3.0, 0.0, 1.0],
                    [1.0, 2.0, 0.0, 1.0],
                    [2.0, 2.0, 0.0, 1.0],
                    [0.0, 4.0, 0.0, 0.5],
                ]),
            )
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

    #[test]
    fn test_get_version() {
        assert_eq!(get_version(&v1()).unwrap(), H5Version::V1);
        let v2 = MemoryH5::new().with_dataset(
            "neuron1/structure/raw",
            Dataset::from_rows(&[[0.0, -1.0]]),
        );
        assert_eq!(get_version(&v2).unwrap(), H5Version::V2);
        assert!(get_version(&MemoryH5::new()).is_err());
    }

    #[test]
    fn test_stage_names() {
        assert_eq!("repaired".parse::<H5Stage>().unwrap(), H5Stage::Repaired);
        assert_eq!(H5Stage::Unraveled.to_string(), "unraveled");
        assert!(matches!("final".parse::<H5Stage>(), Err(MorphError::Format(_))));
    }

    #[test]
    fn test_unpack_v1_parents() {
        let data = H5Reader::from_source(v1()).read().unwrap();
        assert_eq!(data.format(), DataFormat::H5V1);
        assert_eq!(data.id_offset(), 0);
        let parents: Vec<i64> = data.iter().map(|r| r.parent_id).collect();
        assert_eq!(parents, vec![-1, 0, 1, 2, 1, 4, 3]);
        let ids: Vec<i64> = data.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_unpack_v1_types_and_radius() {
        let data = H5Reader::from_source(v1()).read().unwrap();
        let types: Vec<PointType> = data.iter().map(|r| r.point_type).collect();
        assert_eq!(
            types,
            vec![
                PointType::Soma,
                PointType::Soma,
                PointType::BasalDendrite,
                PointType::BasalDendrite,
                PointType::BasalDendrite,
                PointType::BasalDendrite,
                PointType::Axon,
            ]
        );
        assert_eq!(data.rows()[0].radius, 2.0);
        assert_eq!(data.rows()[6].radius, 0.25);
    }

    #[test]
    fn test_parent_group_out_of_range() {
        let mut h5 = v1();
        h5.insert(
            "structure",
            Dataset::from_rows(&[[0.0, 1.0, -1.0], [2.0, 3.0, 7.0]]),
        );
        let err = H5Reader::from_source(h5).read().unwrap_err();
        assert!(matches!(err, MorphError::Format(_)));
    }

    #[test]
    fn test_bad_section_starts() {
        let mut h5 = v1();
        h5.insert("structure", Dataset::from_rows(&[[1.0, 1.0, -1.0]]));
        assert!(H5Reader::from_source(&h5).read().is_err());

        h5.insert(
            "structure",
            Dataset::from_rows(&[[0.0, 1.0, -1.0], [4.0, 3.0, 0.0], [2.0, 3.0, 0.0]]),
        );
        assert!(H5Reader::from_source(&h5).read().is_err());

        h5.insert(
            "structure",
            Dataset::from_rows(&[[0.0, 1.0, -1.0], [9.0, 3.0, 0.0]]),
        );
        assert!(H5Reader::from_source(&h5).read().is_err());
    }

    #[test]
    fn test_missing_points_columns() {
        let mut h5 = v1();
        h5.insert("points", Dataset::from_rows(&[[0.0, 0.0, 0.0]]));
        assert!(matches!(
            H5Reader::from_source(h5).read(),
            Err(MorphError::Format(_))
        ));
    }

    #[test]
    fn test_v2_missing_stage() {
        let h5 = MemoryH5::new()
            .with_dataset("neuron1/structure/raw", Dataset::from_rows(&[[0.0, -1.0]]))
            .with_dataset("neuron1/structure/sectiontype", Dataset::from_rows(&[[1.0]]))
            .with_dataset("neuron1/raw/points", Dataset::from_rows(&[[0.0, 0.0, 0.0, 1.0]]));
        let repaired = H5ReaderConfiguration {
            stage: H5Stage::Repaired,
        };
        let err = H5Reader::from_source(&h5)
            .with_configuration(repaired)
            .read()
            .unwrap_err();
        assert!(matches!(err, MorphError::Format(_)));

        let data = H5Reader::from_source(&h5).read().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.format(), DataFormat::H5V2);
    }
}
