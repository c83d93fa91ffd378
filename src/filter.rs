//! Station filtering: caller criteria and the per-station flags computed
//! from them.
//!
//! Every check is independently toggleable and trivially passes when its
//! criterion is absent. The station reader ANDs the flags (via
//! [`FilterFlags::pass`]) to decide whether decoding the profile is worth
//! the I/O; callers apply the same conjunction for output eligibility.

use std::fmt;

use crate::station::{Station, VariableColumn};

/// Near-zero threshold for the zero-lat/lon plausibility check; exact
/// floating-point equality cannot be relied on.
const ZERO_EPSILON: f64 = 1e-7;

/// Inclusive lat/lon box, in decimal degrees.
///
/// NaN coordinates compare false against every bound and therefore pass:
/// a station with no recorded position is not cut by the box filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Region {
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Self {
        Self {
            west,
            east,
            south,
            north,
        }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        !(lon < self.west || lon > self.east || lat < self.south || lat > self.north)
    }
}

/// A 10-degree WMO square designator, four ASCII characters.
///
/// Its fixed character positions say whether the square straddles the
/// equator (2nd character `0`) or the prime meridian (3rd and 4th
/// characters `0`), which is what makes a recorded zero latitude or
/// longitude plausible.
///
/// # Examples
///
/// ```
/// use oclfilt_rs::WmoSquare;
///
/// let square = WmoSquare::new("1000").unwrap();
/// assert!(square.zero_lat_plausible());
/// assert!(!WmoSquare::new("1200").unwrap().zero_lat_plausible());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmoSquare([u8; 4]);

impl WmoSquare {
    /// Build from a 4-character designator; `None` for any other length.
    pub fn new(designator: &str) -> Option<Self> {
        let bytes = designator.as_bytes();
        Some(Self(bytes.try_into().ok()?))
    }

    /// A zero latitude is plausible when the square lies along the equator.
    pub fn zero_lat_plausible(&self) -> bool {
        self.0[1] == b'0'
    }

    /// A zero longitude is plausible when the square lies along the prime
    /// meridian.
    pub fn zero_lon_plausible(&self) -> bool {
        self.0[2] == b'0' && self.0[3] == b'0'
    }
}

impl fmt::Display for WmoSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}

/// Caller-supplied filter criteria. All absent by default.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    /// Variable codes that must all be present among a station's declared
    /// columns, none with a nonzero column error code.
    pub required_variables: Option<Vec<i64>>,
    /// Minimum declared profile level count, inclusive.
    pub min_levels: Option<i64>,
    pub region: Option<Region>,
    /// Inclusive (min, max) year range.
    pub years: Option<(i64, i64)>,
    /// Inclusive (min, max) month range.
    pub months: Option<(i64, i64)>,
    /// Enables the zero-lat/lon plausibility check against this square.
    pub wmo_square: Option<WmoSquare>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_variables(mut self, codes: Vec<i64>) -> Self {
        self.required_variables = Some(codes);
        self
    }

    pub fn with_min_levels(mut self, min: i64) -> Self {
        self.min_levels = Some(min);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_years(mut self, min: i64, max: i64) -> Self {
        self.years = Some((min, max));
        self
    }

    pub fn with_months(mut self, min: i64, max: i64) -> Self {
        self.months = Some((min, max));
        self
    }

    pub fn with_wmo_square(mut self, square: WmoSquare) -> Self {
        self.wmo_square = Some(square);
        self
    }

    /// Compute all filter flags for a station's header data.
    ///
    /// Runs before any profile is read; every check uses header fields only.
    pub fn evaluate(&self, station: &Station) -> FilterFlags {
        let variables_ok = match &self.required_variables {
            Some(required) => covers_required(required, &station.variables),
            None => true,
        };

        let latlon_plausible = match &self.wmo_square {
            Some(square) => {
                let bad_lat = station.lat.abs() < ZERO_EPSILON && !square.zero_lat_plausible();
                let bad_lon = station.lon.abs() < ZERO_EPSILON && !square.zero_lon_plausible();
                !(bad_lat || bad_lon)
            }
            None => true,
        };

        let in_region = self
            .region
            .map_or(true, |region| region.contains(station.lat, station.lon));

        let year_ok = self
            .years
            .map_or(true, |(min, max)| station.year >= min && station.year <= max);

        let month_ok = self.months.map_or(true, |(min, max)| {
            station.month >= min && station.month <= max
        });

        let enough_levels = self
            .min_levels
            .map_or(true, |min| station.declared_levels >= min);

        FilterFlags {
            variables_ok,
            latlon_plausible,
            in_region,
            year_ok,
            month_ok,
            enough_levels,
        }
    }
}

/// Whether every requested code appears among the declared columns and no
/// matching column carries a nonzero error code. An empty request passes.
fn covers_required(required: &[i64], declared: &[VariableColumn]) -> bool {
    let mut matched = 0usize;
    let mut flagged = 0usize;
    for code in required {
        for column in declared {
            if column.code == *code {
                matched += 1;
                if column.err_code > 0 {
                    flagged += 1;
                }
            }
        }
    }
    matched >= required.len() && flagged == 0
}

/// Independent pass/fail flags from one station's filter evaluation.
/// Transient: computed per station, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterFlags {
    pub variables_ok: bool,
    pub latlon_plausible: bool,
    pub in_region: bool,
    pub year_ok: bool,
    pub month_ok: bool,
    pub enough_levels: bool,
}

impl FilterFlags {
    /// The conjunction of all checks. The station reader uses this for
    /// early exit and callers must use it identically for output decisions.
    pub fn pass(&self) -> bool {
        self.variables_ok
            && self.latlon_plausible
            && self.in_region
            && self.year_ok
            && self.month_ok
            && self.enough_levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::Station;

    fn station_with(lat: f64, lon: f64, year: i64, month: i64, levels: i64) -> Station {
        let mut station = Station::new(0);
        station.lat = lat;
        station.lon = lon;
        station.year = year;
        station.month = month;
        station.declared_levels = levels;
        station
    }

    #[test]
    fn absent_criteria_trivially_pass() {
        let station = station_with(f64::NAN, f64::NAN, -1, -1, 0);
        let flags = Criteria::new().evaluate(&station);
        assert!(flags.pass());
    }

    #[test]
    fn region_bounds_are_inclusive() {
        let criteria = Criteria::new().with_region(Region::new(-130.0, -120.0, 40.0, 50.0));
        assert!(criteria.evaluate(&station_with(40.0, -130.0, 1980, 6, 5)).in_region);
        assert!(criteria.evaluate(&station_with(50.0, -120.0, 1980, 6, 5)).in_region);
        assert!(!criteria.evaluate(&station_with(39.9, -125.0, 1980, 6, 5)).in_region);
        assert!(!criteria.evaluate(&station_with(45.0, -119.0, 1980, 6, 5)).in_region);
    }

    #[test]
    fn nan_position_passes_region() {
        let criteria = Criteria::new().with_region(Region::new(-130.0, -120.0, 40.0, 50.0));
        assert!(criteria.evaluate(&station_with(f64::NAN, f64::NAN, 1980, 6, 5)).in_region);
    }

    #[test]
    fn year_and_month_ranges() {
        let criteria = Criteria::new().with_years(1976, 1980).with_months(1, 3);
        let flags = criteria.evaluate(&station_with(45.0, -125.0, 1976, 3, 5));
        assert!(flags.year_ok && flags.month_ok);
        let flags = criteria.evaluate(&station_with(45.0, -125.0, 1981, 4, 5));
        assert!(!flags.year_ok && !flags.month_ok);
    }

    #[test]
    fn required_variables_subset_and_error_free() {
        let mut station = station_with(45.0, -125.0, 1980, 6, 5);
        station.variables = vec![
            VariableColumn { code: 1, err_code: 0 },
            VariableColumn { code: 2, err_code: 0 },
            VariableColumn { code: 25, err_code: 0 },
        ];
        let criteria = Criteria::new().with_required_variables(vec![1, 25]);
        assert!(criteria.evaluate(&station).variables_ok);

        // Missing variable.
        let criteria = Criteria::new().with_required_variables(vec![1, 3]);
        assert!(!criteria.evaluate(&station).variables_ok);

        // Column-wide error code on a required variable.
        station.variables[0].err_code = 2;
        let criteria = Criteria::new().with_required_variables(vec![1, 2]);
        assert!(!criteria.evaluate(&station).variables_ok);
    }

    #[test]
    fn zero_lat_checked_against_wmo_square() {
        let station = station_with(0.0, -125.0, 1980, 6, 5);

        let equator = Criteria::new().with_wmo_square(WmoSquare::new("1000").unwrap());
        assert!(equator.evaluate(&station).latlon_plausible);

        let off_equator = Criteria::new().with_wmo_square(WmoSquare::new("1200").unwrap());
        assert!(!off_equator.evaluate(&station).latlon_plausible);
    }

    #[test]
    fn zero_lon_checked_against_wmo_square() {
        let station = station_with(45.0, 0.0, 1980, 6, 5);

        let meridian = Criteria::new().with_wmo_square(WmoSquare::new("1700").unwrap());
        assert!(meridian.evaluate(&station).latlon_plausible);

        let off_meridian = Criteria::new().with_wmo_square(WmoSquare::new("1712").unwrap());
        assert!(!off_meridian.evaluate(&station).latlon_plausible);
    }

    #[test]
    fn min_levels_uses_declared_count() {
        let criteria = Criteria::new().with_min_levels(10);
        assert!(!criteria.evaluate(&station_with(45.0, -125.0, 1980, 6, 9)).enough_levels);
        assert!(criteria.evaluate(&station_with(45.0, -125.0, 1980, 6, 10)).enough_levels);
    }

    #[test]
    fn wmo_square_requires_four_characters() {
        assert!(WmoSquare::new("1000").is_some());
        assert!(WmoSquare::new("100").is_none());
        assert!(WmoSquare::new("10000").is_none());
    }
}
