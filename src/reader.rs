//! Iterator-based reader for multi-station OCL streams.
//!
//! Use [`StationReader`] to drive [`decode_station`](crate::decode_station)
//! over a whole file. Each call to `next()` decodes (or skips) one station
//! and realigns past it. Iteration stops at end of stream or on the first
//! decode error; the format offers no per-station recovery.

use std::io::BufRead;

use crate::bathy::BathyReader;
use crate::decode::{decode_station, DecodeOptions, Outcome};
use crate::filter::Criteria;
use crate::Result;

/// Iterator over stations in an OCL stream.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use std::io::BufReader;
/// use oclfilt_rs::{Criteria, Outcome, StationReader};
///
/// let input = BufReader::new(File::open("nbds1106.ocl")?);
/// let criteria = Criteria::new().with_years(1976, 1980);
///
/// for result in StationReader::new(input).with_criteria(criteria) {
///     if let Outcome::Decoded { station, flags } = result? {
///         if flags.pass() {
///             println!("{station}");
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StationReader<R> {
    input: R,
    options: DecodeOptions,
    criteria: Criteria,
    bathy: Option<BathyReader>,
    next_ordinal: u64,
    failed: bool,
}

impl<R: BufRead> StationReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            options: DecodeOptions::default(),
            criteria: Criteria::default(),
            bathy: None,
            next_ordinal: 0,
            failed: false,
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Pair a bathymetry side-channel, advanced one record per station.
    pub fn with_bathy(mut self, bathy: BathyReader) -> Self {
        self.bathy = Some(bathy);
        self
    }

    /// Ordinal the next `next()` call will decode.
    pub fn next_ordinal(&self) -> u64 {
        self.next_ordinal
    }

    fn at_end(&mut self) -> Result<bool> {
        Ok(self.input.fill_buf()?.is_empty())
    }
}

impl<R: BufRead> Iterator for StationReader<R> {
    type Item = Result<Outcome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.at_end() {
            Ok(true) => return None,
            Ok(false) => {}
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        }

        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        let result = decode_station(
            &mut self.input,
            ordinal,
            &self.options,
            &self.criteria,
            self.bathy.as_mut(),
        );
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}
