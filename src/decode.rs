//! Decode one OCL station from a stream.
//!
//! [`decode_station`] is the core state machine. It reads the header fields
//! in their fixed order, evaluates the caller's filter criteria as soon as
//! enough of the header is in hand, and only decodes the (potentially large)
//! profile payload when the station both passes the filters and the profile
//! is actually wanted. Whatever path is taken, the remaining declared bytes
//! are discarded as an opaque run so the stream is realigned on the next
//! station.
//!
//! For driving a whole file, see [`StationReader`](crate::StationReader).

use std::io::BufRead;

use tracing::warn;

use crate::bathy::BathyReader;
use crate::codes::STANDARD_LEVEL_DEPTHS;
use crate::depth::{resolve_final, resolve_preliminary};
use crate::field::FieldCursor;
use crate::filter::{Criteria, FilterFlags};
use crate::station::{ProfileLevel, SecHeaderEntry, Station, StationType, VarValue, VariableColumn};
use crate::Result;

/// Default cap on decoded profile levels per station. Observed-level WOD
/// casts run to a few thousand levels; standard-level casts to 40.
pub const MAX_LEVELS: usize = 6000;

/// Per-call decode controls (distinct from filter [`Criteria`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Whether the caller wants profile data at all. Even when false, the
    /// profile is still read if the bottom depth is otherwise unresolved.
    pub want_profile: bool,
    /// Skip-ahead target: stations with a smaller ordinal are skipped after
    /// only their two leading fields are read.
    pub skip_to: Option<u64>,
    /// Cap on decoded levels; beyond it the profile is truncated with a
    /// diagnostic, never an error.
    pub max_levels: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            want_profile: true,
            skip_to: None,
            max_levels: MAX_LEVELS,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only read header data; skip profiles wherever the bottom depth is
    /// already resolved.
    pub fn without_profile(mut self) -> Self {
        self.want_profile = false;
        self
    }

    pub fn with_skip_to(mut self, ordinal: u64) -> Self {
        self.skip_to = Some(ordinal);
        self
    }

    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }
}

/// Result of one [`decode_station`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The station was decoded (fully, or header-only when a filter cut it).
    /// `flags` is the filter evaluation; callers must check
    /// [`FilterFlags::pass`] before using the station.
    Decoded {
        station: Station,
        flags: FilterFlags,
    },
    /// A station before the skip-ahead target; only its byte count and
    /// native number were read.
    Skipped,
}

/// Decode one station from `input`.
///
/// `ordinal` is the station's 0-based position in the file, maintained by
/// the caller's loop. When `bathy` is supplied, exactly one bathymetry
/// record is consumed regardless of the decode outcome, keeping the two
/// streams in lockstep.
///
/// Errors are fatal for the whole run: the stream is unseekable and strictly
/// sequential, so there is no per-station recovery.
pub fn decode_station<R: BufRead>(
    input: &mut R,
    ordinal: u64,
    options: &DecodeOptions,
    criteria: &Criteria,
    mut bathy: Option<&mut BathyReader>,
) -> Result<Outcome> {
    let mut cur = FieldCursor::new(input);
    let mut station = Station::new(ordinal);

    // The first field declares the station's total content byte count and
    // initializes the byte budget.
    station.total_bytes = cur.varlen_int()?.unwrap_or(0);
    station.station_number = cur.varlen_int()?.unwrap_or(-1);

    if let Some(target) = options.skip_to {
        if ordinal < target {
            cur.skip_to_next_station()?;
            if let Some(bathy) = bathy {
                bathy.next_record()?;
            }
            return Ok(Outcome::Skipped);
        }
    }

    station.country_code = cur.fixed_int(2)?.unwrap_or(-1);
    station.cruise_number = cur.varlen_int()?.unwrap_or(-1);
    station.year = cur.fixed_int(4)?.unwrap_or(-1);
    station.month = cur.fixed_int(2)?.unwrap_or(-1);
    station.day = cur.fixed_int(2)?.unwrap_or(-1);
    station.time = cur.varlen_float()?.unwrap_or(f64::NAN);
    station.lat = cur.varlen_float()?.unwrap_or(f64::NAN);
    station.lon = cur.varlen_float()?.unwrap_or(f64::NAN);
    station.declared_levels = cur.varlen_int()?.unwrap_or(0);
    station.station_type = match cur.fixed_int(1)? {
        Some(0) => StationType::Observed,
        _ => StationType::Standard,
    };

    let variable_count = cur.fixed_int(2)?.unwrap_or(0).max(0);
    station.variables.reserve(variable_count as usize);
    for _ in 0..variable_count {
        let code = cur.varlen_int()?.unwrap_or(-1);
        let err_code = cur.fixed_int(1)?.unwrap_or(0);
        station.variables.push(VariableColumn { code, err_code });
    }

    // Character/PI block: contents discarded byte-by-byte.
    if let Some(bytes) = cur.varlen_int()? {
        station.char_pi_bytes = bytes;
        cur.discard(bytes)?;
    }

    // Secondary header.
    if let Some(bytes) = cur.varlen_int()? {
        station.sec_header_bytes = bytes;
        let entries = cur.varlen_int()?.unwrap_or(0).max(0);
        station.sec_header.reserve(entries as usize);
        for _ in 0..entries {
            let code = cur.varlen_int()?.unwrap_or(-1);
            let value = cur.varlen_float()?.unwrap_or(f64::NAN);
            station.sec_header.push(SecHeaderEntry { code, value });
        }
    }

    // Bottom-depth pass 1. The paired bathymetry record is consumed here no
    // matter what the filters decide below.
    if let Some(bathy) = bathy.as_deref_mut() {
        station.database_depth = Some(bathy.next_record()?.depth);
    }
    station.bottom_depth =
        resolve_preliminary(&station.sec_header, station.database_depth, station.lat);

    let flags = criteria.evaluate(&station);

    // Even a header-only caller needs the profile when the bottom depth is
    // still unresolved: the deepest level is the last remaining source.
    let really_want_profile = options.want_profile || station.bottom_depth.is_none();

    if really_want_profile && flags.pass() {
        // Biological header: contents discarded like the character/PI block.
        if let Some(bytes) = cur.varlen_int()? {
            station.bio_header_bytes = bytes;
            cur.discard(bytes)?;
        }

        read_profile(&mut cur, &mut station, options)?;

        if let Some(deepest) = station.deepest_depth() {
            station.bottom_depth =
                resolve_final(station.bottom_depth.take(), station.database_depth, deepest);
        }
    }

    // Realign on the next station whichever path was taken.
    cur.skip_to_next_station()?;

    Ok(Outcome::Decoded { station, flags })
}

fn read_profile<R: BufRead>(
    cur: &mut FieldCursor<'_, R>,
    station: &mut Station,
    options: &DecodeOptions,
) -> Result<()> {
    let declared = station.declared_levels.max(0) as usize;
    if declared > options.max_levels {
        warn!(
            ordinal = station.ordinal,
            declared_levels = declared,
            max_levels = options.max_levels,
            "declared level count exceeds cap; profile truncated, bottom depth may be wrong"
        );
    }
    let retained = declared.min(options.max_levels);
    station.levels.reserve(retained);

    let mut table_overrun = false;
    for index in 0..retained {
        let (depth, depth_err) = match station.station_type {
            StationType::Observed => match cur.varlen_float()? {
                // A missing depth carries no trailing error digit.
                Some(depth) => (depth, cur.fixed_int(1)?.unwrap_or(0)),
                None => (f64::NAN, 0),
            },
            StationType::Standard => {
                let depth = STANDARD_LEVEL_DEPTHS.get(index).copied();
                if depth.is_none() {
                    table_overrun = true;
                }
                (depth.unwrap_or(f64::NAN), 0)
            }
        };

        let mut values = Vec::with_capacity(station.variables.len());
        for _ in 0..station.variables.len() {
            match cur.varlen_float()? {
                Some(value) => {
                    let err_code = cur.fixed_int(1)?.unwrap_or(0);
                    values.push(VarValue { value, err_code });
                }
                None => values.push(VarValue {
                    value: f64::NAN,
                    err_code: 0,
                }),
            }
        }

        station.levels.push(ProfileLevel {
            depth,
            depth_err,
            values,
        });
    }

    if table_overrun {
        warn!(
            ordinal = station.ordinal,
            declared_levels = declared,
            "standard-level station declares more levels than the canonical table; extra depths are NaN"
        );
    }

    Ok(())
}
