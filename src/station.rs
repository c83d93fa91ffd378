//! Decoded station data: one measurement event at a location and time with a
//! depth-indexed set of variables.

use std::fmt;

use crate::depth::BottomDepth;

/// Whether a station's level depths are individually recorded or taken from
/// the canonical standard-level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationType {
    /// Depths are encoded per level (type digit 0).
    Observed,
    /// Depths come from [`STANDARD_LEVEL_DEPTHS`](crate::codes::STANDARD_LEVEL_DEPTHS)
    /// by level index (any other type digit).
    Standard,
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Observed => write!(f, "observed"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

/// One declared variable column: its WOD variable code (e.g. 1 = temperature)
/// and the error code covering the whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableColumn {
    pub code: i64,
    pub err_code: i64,
}

/// One secondary-header entry, e.g. code 10 = bottom depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecHeaderEntry {
    pub code: i64,
    pub value: f64,
}

/// One measured value within a profile level. A missing value is NaN with
/// error code 0 (the format carries no error digit for missing values).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarValue {
    pub value: f64,
    pub err_code: i64,
}

/// One depth sample within a station, carrying one value per declared
/// variable column.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLevel {
    pub depth: f64,
    pub depth_err: i64,
    pub values: Vec<VarValue>,
}

/// One fully decoded station.
///
/// Integer identifier fields use `-1` for a missing value; floating-point
/// fields use NaN. `declared_levels` is the level count from the header,
/// which may exceed `levels.len()` when the profile was truncated at the
/// level cap or not read at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Ordinal assigned by the driver loop (0-based position in the file).
    pub ordinal: u64,
    /// Declared total content byte count of this station, 0 when absent.
    pub total_bytes: i64,
    /// Native station number from the file, -1 when absent.
    pub station_number: i64,
    pub country_code: i64,
    pub cruise_number: i64,
    pub year: i64,
    pub month: i64,
    pub day: i64,
    /// Time of day in hours.
    pub time: f64,
    pub lat: f64,
    pub lon: f64,
    pub declared_levels: i64,
    pub station_type: StationType,
    pub variables: Vec<VariableColumn>,
    /// Declared byte count of the skipped character/PI block.
    pub char_pi_bytes: i64,
    /// Declared byte count of the secondary header block.
    pub sec_header_bytes: i64,
    pub sec_header: Vec<SecHeaderEntry>,
    /// Declared byte count of the skipped biological block.
    pub bio_header_bytes: i64,
    pub levels: Vec<ProfileLevel>,
    /// Bathymetry depth for this location from the side-channel, positive
    /// down, present whenever the bathymetry stream is enabled.
    pub database_depth: Option<f64>,
    /// Authoritative bottom depth with provenance, `None` when no source
    /// exists.
    pub bottom_depth: Option<BottomDepth>,
}

impl Station {
    /// An empty station shell for the given ordinal; the decoder fills it in.
    pub fn new(ordinal: u64) -> Self {
        Self {
            ordinal,
            total_bytes: 0,
            station_number: -1,
            country_code: -1,
            cruise_number: -1,
            year: -1,
            month: -1,
            day: -1,
            time: f64::NAN,
            lat: f64::NAN,
            lon: f64::NAN,
            declared_levels: 0,
            station_type: StationType::Observed,
            variables: Vec::new(),
            char_pi_bytes: 0,
            sec_header_bytes: 0,
            sec_header: Vec::new(),
            bio_header_bytes: 0,
            levels: Vec::new(),
            database_depth: None,
            bottom_depth: None,
        }
    }

    /// Depth of the deepest retained profile level, if any were decoded.
    ///
    /// The value may be NaN for an observed station whose last level carried
    /// no depth.
    pub fn deepest_depth(&self) -> Option<f64> {
        self.levels.last().map(|level| level.depth)
    }

    /// Whether the given variable code appears among the declared columns.
    pub fn has_variable(&self, code: i64) -> bool {
        self.variables.iter().any(|column| column.code == code)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {:04}-{:02}-{:02} ({:.4}, {:.4}) | {} levels ({}) | bottom ",
            self.ordinal,
            self.year,
            self.month,
            self.day,
            self.lat,
            self.lon,
            self.declared_levels,
            self.station_type,
        )?;
        match &self.bottom_depth {
            Some(bottom) => write!(f, "{:.1} m ({})", bottom.value, bottom.source),
            None => write!(f, "--"),
        }
    }
}
