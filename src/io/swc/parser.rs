//! nom grammar for one SWC data line

use nom::{
    character::complete::{char, space0, space1},
    combinator::{all_consuming, opt, rest},
    multi::count,
    number::complete::double,
    sequence::{pair, preceded},
    IResult,
};

/// Columns of a data line, in file order
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SwcColumns {
    pub id: i64,
    pub point_type: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
    pub parent_id: i64,
}

/// What a line holds once whitespace and comments are accounted for
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SwcLine {
    /// Blank or comment-only
    Skip,
    Data(SwcColumns),
}

fn columns(input: &str) -> IResult<&str, Vec<f64>> {
    let (input, first) = preceded(space0, double)(input)?;
    let (input, mut values) = count(preceded(space1, double), 6)(input)?;
    values.insert(0, first);
    Ok((input, values))
}

fn trailer(input: &str) -> IResult<&str, Option<&str>> {
    preceded(space0, opt(preceded(char('#'), rest)))(input)
}

/// Integral value of an ID column; `2.0` is accepted, `2.7` and `nan` are not
fn integral(column: &str, value: f64) -> Result<i64, String> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(format!("{} '{}' is not an integer", column, value))
    }
}

fn data_line(input: &str) -> IResult<&str, (Vec<f64>, Option<&str>)> {
    all_consuming(pair(columns, trailer))(input)
}

/// Classify and parse one line (without its terminator).
///
/// Returns a short description of the problem for malformed data lines.
pub(crate) fn parse_line(line: &str) -> Result<SwcLine, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(SwcLine::Skip);
    }

    let (_, (values, _comment)) = data_line(trimmed).map_err(|_| {
        format!(
            "expected 'ID Type X Y Z Radius ParentID', found '{}'",
            trimmed
        )
    })?;

    Ok(SwcLine::Data(SwcColumns {
        id: integral("ID", values[0])?,
        point_type: values[1],
        x: values[2],
        y: values[3],
        z: values[4],
        radius: values[5],
        parent_id: integral("ParentID", values[6])?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(line: &str) -> SwcColumns {
        match parse_line(line) {
            Ok(SwcLine::Data(cols)) => cols,
            other => panic!("expected data line, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_data_line() {
        let cols = data("1 1 0.5 -2.0 3e1 4.25 -1");
        assert_eq!(cols.id, 1);
        assert_eq!(cols.point_type, 1.0);
        assert_eq!(cols.x, 0.5);
        assert_eq!(cols.y, -2.0);
        assert_eq!(cols.z, 30.0);
        assert_eq!(cols.radius, 4.25);
        assert_eq!(cols.parent_id, -1);
    }

    #[test]
    fn test_tabs_and_padding() {
        let cols = data("  7\t3\t1\t2\t3\t0.5\t6  \r");
        assert_eq!(cols.id, 7);
        assert_eq!(cols.parent_id, 6);
    }

    #[test]
    fn test_trailing_comment() {
        let cols = data("2 2 0 0 0 1 1 # first axon point");
        assert_eq!(cols.parent_id, 1);
    }

    #[test]
    fn test_skip_lines() {
        assert_eq!(parse_line(""), Ok(SwcLine::Skip));
        assert_eq!(parse_line("   \t"), Ok(SwcLine::Skip));
        assert_eq!(parse_line("# ORIGINAL_SOURCE Neurolucida"), Ok(SwcLine::Skip));
        assert_eq!(parse_line("   #indented comment"), Ok(SwcLine::Skip));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(parse_line("1 1 0 0 0 1").is_err());
        assert!(parse_line("1 1 0 0 0 1 -1 9").is_err());
        assert!(parse_line("1 soma 0 0 0 1 -1").is_err());
    }

    #[test]
    fn test_integral_ids() {
        let cols = data("3.0 2 0 0 0 1 2.0");
        assert_eq!((cols.id, cols.parent_id), (3, 2));

        let err = parse_line("2.7 2 0 0 0 1 1").unwrap_err();
        assert!(err.contains("ID '2.7'"));
        assert!(parse_line("2 2 0 0 0 1 nan").is_err());
        assert!(parse_line("2 2 0 0 0 1 inf").is_err());
    }
}
