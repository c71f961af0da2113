//! Coastline outlines from a line-oriented text file.
//!
//! Each non-blank line is `<lon>,<lat>`; a blank line ends the current
//! polyline. Points come out as `(lat, lon)`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polarmap_projection::GeoPoint;

use crate::error::DataError;

/// One continuous coastline segment.
pub type Polyline = Vec<GeoPoint>;

/// Parse coastline polylines from a reader.
///
/// Lines that do not hold exactly two numeric fields are skipped without
/// breaking the current polyline. Runs of blank lines never yield empty
/// polylines.
pub fn parse_coastlines<R: BufRead>(reader: R) -> Result<Vec<Polyline>, DataError> {
    let mut polylines = Vec::new();
    let mut current = Polyline::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                polylines.push(std::mem::take(&mut current));
            }
            continue;
        }
        match parse_point(line) {
            Some(point) => current.push(point),
            None => tracing::trace!(line = index + 1, "skipping malformed coastline row"),
        }
    }
    if !current.is_empty() {
        polylines.push(current);
    }
    Ok(polylines)
}

fn parse_point(line: &str) -> Option<GeoPoint> {
    let mut fields = line.split(',');
    let lon = fields.next()?.trim().parse::<f64>().ok()?;
    let lat = fields.next()?.trim().parse::<f64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(GeoPoint::new(lat, lon))
}

/// Load coastline polylines from a file.
pub fn load_coastlines(path: &Path) -> Result<Vec<Polyline>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let polylines = parse_coastlines(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        polylines = polylines.len(),
        points = polylines.iter().map(Vec::len).sum::<usize>(),
        "loaded coastlines"
    );
    Ok(polylines)
}
