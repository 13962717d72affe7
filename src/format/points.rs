use crate::core::error::{GraphError, Result};
use crate::core::point::{Point, PointSet};
use crate::format::PREALLOC_LIMIT;
use csv::{ReaderBuilder, StringRecord};
use std::io::{Read, Write};
use std::str::FromStr;

const DIMENSIONS: usize = 3;
pub const TRAILER: &str = "# Generated by spatialgraph";

/// Writes a node file: `<N> 3 0 0`, then `<index> <x> <y> <z>` per point,
/// then a comment trailer. Coordinates use shortest round-trip formatting.
pub fn write_points<W: Write>(points: &PointSet, mut writer: W) -> Result<()> {
    writeln!(writer, "{} {DIMENSIONS} 0 0", points.len())?;
    for (i, p) in points.iter().enumerate() {
        writeln!(writer, "{i} {} {} {}", p.x, p.y, p.z)?;
    }
    writeln!(writer, "{TRAILER}")?;
    writer.flush()?;
    Ok(())
}

pub fn read_points<R: Read>(reader: R) -> Result<PointSet> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();

    let header = loop {
        match records.next() {
            Some(record) => {
                let record = record?;
                if !is_comment(&record) {
                    break record;
                }
            }
            None => return Err(GraphError::format(1, "missing point header")),
        }
    };
    let header_line = line_of(&header);
    if header.len() < 2 {
        return Err(GraphError::format(header_line, "point header needs a count and a dimension"));
    }
    let count: usize = field(&header, 0, "point count")?;
    let dims: usize = field(&header, 1, "dimension")?;
    if dims != DIMENSIONS {
        return Err(GraphError::format(
            header_line,
            format!("expected {DIMENSIONS} dimensions, found {dims}"),
        ));
    }

    let mut points = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for maybe_record in records {
        let record = maybe_record?;
        // an unterminated final comment line comes through as a record
        if is_comment(&record) {
            continue;
        }
        if record.len() != 1 + DIMENSIONS {
            return Err(GraphError::format(
                line_of(&record),
                format!("expected index and {DIMENSIONS} coordinates, found {} fields", record.len()),
            ));
        }
        let index: usize = field(&record, 0, "point index")?;
        if index != points.len() {
            return Err(GraphError::format(
                line_of(&record),
                format!("point index {index} out of sequence, expected {}", points.len()),
            ));
        }
        points.push(Point::new(
            field(&record, 1, "x")?,
            field(&record, 2, "y")?,
            field(&record, 3, "z")?,
        ));
    }

    if points.len() != count {
        return Err(GraphError::format(
            header_line,
            format!("header declares {count} points, file has {}", points.len()),
        ));
    }

    Ok(PointSet::new(points))
}

fn is_comment(record: &StringRecord) -> bool {
    record.get(0).is_some_and(|f| f.starts_with('#'))
}

fn line_of(record: &StringRecord) -> usize {
    record.position().map_or(0, |pos| pos.line() as usize)
}

fn field<T: FromStr>(record: &StringRecord, i: usize, what: &str) -> Result<T> {
    let raw = record.get(i).unwrap_or_default();
    raw.parse()
        .map_err(|_| GraphError::format(line_of(record), format!("invalid {what}: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn decode(text: &str) -> Result<PointSet> {
        read_points(text.as_bytes())
    }

    #[test]
    fn test_write_layout() {
        let points = PointSet::new(vec![Point::new(1.5, 0.0, 1023.0), Point::new(2.0, 3.25, 4.0)]);
        let mut out = Vec::new();
        write_points(&points, &mut out).unwrap();

        assert_eq!(
            "2 3 0 0\n0 1.5 0 1023\n1 2 3.25 4\n# Generated by spatialgraph\n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn test_round_trip_precision() {
        let original = PointSet::new(vec![
            Point::new(0.1, 1.0 / 3.0, 1022.999_999_999_9),
            Point::new(std::f64::consts::PI, 512.000_000_1, 7e-12),
        ]);
        let mut out = Vec::new();
        write_points(&original, &mut out).unwrap();
        let decoded = read_points(out.as_slice()).unwrap();

        assert_eq!(original.len(), decoded.len());
        for (a, b) in original.iter().zip(decoded.iter()) {
            assert_relative_eq!(a.x, b.x);
            assert_relative_eq!(a.y, b.y);
            assert_relative_eq!(a.z, b.z);
        }
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_read_empty() {
        let points = decode("0 3 0 0\n# Generated by graphgen.py").unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_read_unterminated_trailer() {
        let points = decode("1 3 0 0\n0 1 2 3\n# Generated by graphgen.py").unwrap();
        assert_eq!(1, points.len());
        assert_eq!(Point::new(1.0, 2.0, 3.0), points.as_slice()[0]);

        let points = decode("1 3 0 0\n0 1 2 3\n# Generated by graphgen.py\n").unwrap();
        assert_eq!(1, points.len());
    }

    #[test]
    fn test_read_huge_declared_count() {
        let err = decode("100000000000000 3 0 0\n").unwrap_err();
        assert!(matches!(err, GraphError::Format { line: 1, .. }));
    }

    #[test]
    fn test_read_wrong_dimension() {
        let err = decode("1 2 0 0\n0 1 2\n").unwrap_err();
        assert!(matches!(err, GraphError::Format { line: 1, .. }));
    }

    #[test]
    fn test_read_count_mismatch() {
        let err = decode("2 3 0 0\n0 1 2 3\n").unwrap_err();
        assert!(matches!(err, GraphError::Format { .. }));
    }

    #[test]
    fn test_read_out_of_sequence() {
        let err = decode("2 3 0 0\n1 1 2 3\n0 1 2 3\n").unwrap_err();
        assert!(matches!(err, GraphError::Format { line: 2, .. }));
    }

    #[test]
    fn test_read_bad_coordinate() {
        let err = decode("1 3 0 0\n0 1 abc 3\n").unwrap_err();
        assert!(matches!(err, GraphError::Format { line: 2, .. }));
    }

    #[test]
    fn test_read_missing_header() {
        let err = decode("# only a comment\n").unwrap_err();
        assert!(matches!(err, GraphError::Format { line: 1, .. }));
    }
}
