//! City markers from a CSV table.
//!
//! The header must name `city`, `lat`, and either `lng` or `lon`. Column order
//! is free and extra columns are ignored. Fields may be double-quoted, with
//! `""` standing for a literal quote.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polarmap_projection::GeoPoint;

use crate::error::DataError;

/// A named point on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub point: GeoPoint,
}

struct Columns {
    count: usize,
    name: usize,
    lat: usize,
    lon: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, DataError> {
        let find = |names: &[&str]| {
            header
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        Ok(Self {
            count: header.len(),
            name: find(&["city"]).ok_or(DataError::MissingColumn("city"))?,
            lat: find(&["lat"]).ok_or(DataError::MissingColumn("lat"))?,
            lon: find(&["lng", "lon"]).ok_or(DataError::MissingColumn("lng"))?,
        })
    }

    fn parse_row(&self, fields: &[String]) -> Option<City> {
        if fields.len() != self.count {
            return None;
        }
        let lat = fields[self.lat].trim().parse::<f64>().ok()?;
        let lon = fields[self.lon].trim().parse::<f64>().ok()?;
        Some(City {
            name: fields[self.name].trim().to_string(),
            point: GeoPoint::new(lat, lon),
        })
    }
}

/// Split one CSV record. Quoted fields may contain commas.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse cities from a CSV reader.
///
/// Rows with the wrong number of fields or non-numeric coordinates are
/// skipped. A missing header or required column is an error.
pub fn parse_cities<R: BufRead>(reader: R) -> Result<Vec<City>, DataError> {
    let mut lines = reader.lines();
    let header = loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break split_record(line.trim_start_matches('\u{feff}'));
                }
            }
            None => return Err(DataError::MissingHeader),
        }
    };
    let columns = Columns::from_header(&header)?;

    let mut cities = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match columns.parse_row(&split_record(&line)) {
            Some(city) => cities.push(city),
            None => tracing::trace!(row = index + 1, "skipping malformed city row"),
        }
    }
    Ok(cities)
}

/// Load cities from a CSV file.
pub fn load_cities(path: &Path) -> Result<Vec<City>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cities = parse_cities(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), cities = cities.len(), "loaded cities");
    Ok(cities)
}
