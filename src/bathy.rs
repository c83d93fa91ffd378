//! Bathymetry side-channel: a premade text file with one line per station
//! in the paired OCL file, read in lockstep with it.
//!
//! Each line carries `lon lat ordinal depth`, whitespace-separated, with
//! depth negative-down as bathymetry grids store it. Exactly one record is
//! consumed per station decode, including skipped and filtered stations, so
//! the two streams stay aligned.

use std::io::BufRead;

use crate::{OclError, Result};

/// Latitude band (degrees, symmetric about the equator) covered by the
/// bathymetry database. Outside it the database value is not trusted.
pub const COVERED_LAT_BAND: f64 = 72.0;

/// Whether a latitude lies inside the database's covered band.
///
/// NaN is outside.
pub fn within_covered_band(lat: f64) -> bool {
    (-COVERED_LAT_BAND..=COVERED_LAT_BAND).contains(&lat)
}

/// One bathymetry line. `depth` is sign-flipped to positive-down on read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BathyRecord {
    pub lon: f64,
    pub lat: f64,
    pub ordinal: i64,
    pub depth: f64,
}

/// Forward-only reader over a bathymetry side-channel file.
pub struct BathyReader {
    input: Box<dyn BufRead>,
}

impl BathyReader {
    pub fn new<B: BufRead + 'static>(input: B) -> Self {
        Self {
            input: Box::new(input),
        }
    }

    /// Read the next record, skipping blank lines.
    ///
    /// Running out of records while stations remain is an error: the streams
    /// would fall out of lockstep.
    pub fn next_record(&mut self) -> Result<BathyRecord> {
        loop {
            let mut line = String::new();
            let n = self.input.read_line(&mut line)?;
            if n == 0 {
                return Err(OclError::BadBathyRecord {
                    line: String::from("<end of bathymetry stream>"),
                });
            }
            if line.trim().is_empty() {
                continue;
            }
            return parse_line(line.trim_end());
        }
    }
}

fn parse_line(line: &str) -> Result<BathyRecord> {
    let bad = || OclError::BadBathyRecord {
        line: line.to_owned(),
    };

    let mut fields = line.split_whitespace();
    let lon = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
    let lat = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
    let ordinal = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
    let depth: f64 = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
    if fields.next().is_some() {
        return Err(bad());
    }

    Ok(BathyRecord {
        lon,
        lat,
        ordinal,
        depth: -depth,
    })
}
