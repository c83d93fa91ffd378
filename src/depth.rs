//! Bottom-depth reconciliation.
//!
//! A station's bottom depth can come from up to three conflicting sources:
//! a secondary-header entry (code 10), the bathymetry side-channel, and the
//! deepest decoded profile level. Reconciliation runs in two passes: a
//! preliminary pass after the secondary header (so early-terminated stations
//! still get a depth), and a final pass after the profile that guarantees the
//! selection is never shallower than the deepest retained level.

use std::fmt;

use crate::bathy;
use crate::station::SecHeaderEntry;

/// Secondary-header code carrying the recorded bottom depth.
pub const BOTTOM_DEPTH_CODE: i64 = 10;

/// Largest tolerated disagreement, in meters, between a header bottom depth
/// and the bathymetry database value before the database wins.
pub const HEADER_DB_TOLERANCE: f64 = 80.0;

/// Where an authoritative bottom depth came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthSource {
    /// Secondary-header entry (code 10).
    Header,
    /// Bathymetry database side-channel.
    Database,
    /// Deepest retained profile level.
    Profile,
}

impl fmt::Display for DepthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Database => write!(f, "database"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

/// Selected bottom depth and its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BottomDepth {
    pub value: f64,
    pub source: DepthSource,
}

impl BottomDepth {
    fn header(value: f64) -> Self {
        Self {
            value,
            source: DepthSource::Header,
        }
    }

    fn database(value: f64) -> Self {
        Self {
            value,
            source: DepthSource::Database,
        }
    }

    fn profile(value: f64) -> Self {
        Self {
            value,
            source: DepthSource::Profile,
        }
    }
}

/// Pass 1, before the profile is read.
///
/// Prefers the last secondary-header bottom-depth entry. When a bathymetry
/// value exists and the station sits inside the database's covered latitude
/// band, the database value wins if no header value exists or if the two
/// disagree by more than [`HEADER_DB_TOLERANCE`].
pub fn resolve_preliminary(
    sec_header: &[SecHeaderEntry],
    database_depth: Option<f64>,
    lat: f64,
) -> Option<BottomDepth> {
    let mut decision = sec_header
        .iter()
        .filter(|entry| entry.code == BOTTOM_DEPTH_CODE)
        .next_back()
        .map(|entry| BottomDepth::header(entry.value));

    if let Some(db) = database_depth {
        if bathy::within_covered_band(lat) {
            let disagrees = match &decision {
                Some(current) if current.source == DepthSource::Header => {
                    (current.value - db).abs() > HEADER_DB_TOLERANCE
                }
                _ => true,
            };
            if disagrees {
                decision = Some(BottomDepth::database(db));
            }
        }
    }

    decision
}

/// Pass 2, after at least one profile level was decoded.
///
/// `deepest` is the depth of the deepest retained level. A selection
/// shallower than the profile is replaced: a too-shallow header value falls
/// back to the database (when available and not itself shallower), otherwise
/// to the profile; a too-shallow database value falls back to the profile.
/// The header is checked before the database when both are candidates.
pub fn resolve_final(
    current: Option<BottomDepth>,
    database_depth: Option<f64>,
    deepest: f64,
) -> Option<BottomDepth> {
    match current {
        None => Some(BottomDepth::profile(deepest)),
        Some(bottom) if bottom.source == DepthSource::Header && bottom.value < deepest => {
            match database_depth {
                Some(db) if db < deepest => Some(BottomDepth::profile(deepest)),
                Some(db) => Some(BottomDepth::database(db)),
                None => Some(BottomDepth::profile(deepest)),
            }
        }
        Some(bottom) if bottom.source == DepthSource::Database && bottom.value < deepest => {
            Some(BottomDepth::profile(deepest))
        }
        keep => keep,
    }
}
