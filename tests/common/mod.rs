//! Builders for synthetic OCL station streams.
//!
//! The encoders here mirror the field formats the decoder consumes: a
//! variable-length integer is a length digit followed by that many digits;
//! a variable-length float is three one-digit controls followed by the
//! scaled integer digits. The station's leading total-byte field is solved
//! for so that the declared count covers the whole station including the
//! total field itself.

/// Encode a variable-length integer field.
pub fn vint(value: i64) -> String {
    let digits = value.to_string();
    assert!(digits.len() <= 9, "field too wide for one length digit");
    format!("{}{}", digits.len(), digits)
}

/// Encode a variable-length float with the given implied-decimal precision.
pub fn vfloat(value: f64, precision: u32) -> String {
    let scaled = (value * 10f64.powi(precision as i32)).round() as i64;
    let digits = scaled.to_string();
    assert!(digits.len() <= 9, "field too wide for one digit control");
    format!("{}{}{}{}", digits.len(), digits.len(), precision, digits)
}

/// The format's "no value" marker.
pub const MISSING: &str = "-";

/// Builder for one synthetic station.
pub struct StationBuilder {
    pub station_number: i64,
    pub country: i64,
    pub cruise: i64,
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub time: f64,
    pub lat: f64,
    pub lon: f64,
    pub declared_levels: i64,
    pub standard: bool,
    pub missing_position: bool,
    /// (code, error code) per declared variable column.
    pub variables: Vec<(i64, i64)>,
    /// (code, value) secondary-header entries.
    pub sec_header: Vec<(i64, f64)>,
    /// (depth, values) rows actually encoded; for standard-level stations
    /// the depth is ignored and not encoded.
    pub levels: Vec<(f64, Vec<f64>)>,
}

impl Default for StationBuilder {
    fn default() -> Self {
        Self {
            station_number: 1,
            country: 90,
            cruise: 123,
            year: 1988,
            month: 6,
            day: 15,
            time: 12.5,
            lat: 47.25,
            lon: -122.5,
            declared_levels: 0,
            standard: false,
            missing_position: false,
            variables: vec![(1, 0)],
            sec_header: vec![],
            levels: vec![],
        }
    }
}

impl StationBuilder {
    pub fn new(station_number: i64) -> Self {
        Self {
            station_number,
            ..Self::default()
        }
    }

    /// Encode levels at the given depths with one value per variable column,
    /// and set the declared count to match.
    pub fn with_levels(mut self, depths: &[f64]) -> Self {
        self.levels = depths
            .iter()
            .map(|&depth| (depth, vec![7.5; self.variables.len()]))
            .collect();
        self.declared_levels = depths.len() as i64;
        self
    }

    pub fn with_bottom_depth(mut self, depth: f64) -> Self {
        self.sec_header.push((10, depth));
        self
    }

    /// Encode the station content followed by its trailing newline.
    pub fn encode(&self) -> String {
        let mut body = String::new();
        body += &vint(self.station_number);
        body += &format!("{:02}", self.country);
        body += &vint(self.cruise);
        body += &format!("{:04}{:02}{:02}", self.year, self.month, self.day);
        body += &vfloat(self.time, 2);
        if self.missing_position {
            body += MISSING;
            body += MISSING;
        } else {
            body += &vfloat(self.lat, 4);
            body += &vfloat(self.lon, 4);
        }
        body += &vint(self.declared_levels);
        body += if self.standard { "1" } else { "0" };
        body += &format!("{:02}", self.variables.len());
        for (code, err) in &self.variables {
            body += &vint(*code);
            body += &err.to_string();
        }

        // No character/PI block.
        body += MISSING;

        if self.sec_header.is_empty() {
            body += MISSING;
        } else {
            let mut sec = vint(self.sec_header.len() as i64);
            for (code, value) in &self.sec_header {
                sec += &vint(*code);
                sec += &vfloat(*value, 1);
            }
            body += &vint(sec.len() as i64);
            body += &sec;
        }

        // No biological block.
        body += MISSING;

        for (depth, values) in &self.levels {
            if !self.standard {
                body += &vfloat(*depth, 1);
                body += "0";
            }
            for value in values {
                body += &vfloat(*value, 2);
                body += "0";
            }
        }

        // Solve for a total count that covers the total field itself.
        let body_len = body.len() as i64;
        let mut total = body_len + 2;
        while total != body_len + 1 + total.to_string().len() as i64 {
            total += 1;
        }

        format!("{}{}\n", vint(total), body)
    }
}

/// Concatenate stations into one stream.
pub fn stream(builders: &[StationBuilder]) -> String {
    builders.iter().map(StationBuilder::encode).collect()
}

/// Re-wrap content into 80-column lines the way distributed OCL files are,
/// preserving the trailing newline.
pub fn wrap80(content: &str) -> String {
    let flat: String = content.chars().filter(|&c| c != '\n').collect();
    let mut wrapped = String::with_capacity(flat.len() + flat.len() / 80 + 1);
    for (i, c) in flat.chars().enumerate() {
        if i > 0 && i % 80 == 0 {
            wrapped.push('\n');
        }
        wrapped.push(c);
    }
    wrapped.push('\n');
    wrapped
}
