//! Pure Rust reader and filter for NODC OCL (World Ocean Database) station
//! profile data.
//!
//! OCL files hold oceanographic "stations": one measurement event at a
//! location and time with a depth-indexed set of variables (temperature,
//! salinity, ...). The format is a self-describing ASCII digit stream in
//! which every field declares its own byte length, so it can only be read
//! strictly sequentially. This crate decodes one station at a time, applies
//! caller-supplied filter criteria early enough to skip the bulk of rejected
//! stations' bytes, and reconciles an authoritative bottom depth from the
//! secondary header, an optional bathymetry side-channel, and the deepest
//! profile level.
//!
//! # Decoding a single station
//!
//! ```
//! use std::io::Cursor;
//! use oclfilt_rs::{decode_station, Criteria, DecodeOptions, DepthSource, Outcome};
//!
//! // One observed-level station: a single level at 55.0 m with one
//! // temperature value, and a secondary-header bottom depth.
//! let data = concat!(
//!     "278",                    // declared total byte count
//!     "17",                     // native station number 7
//!     "90",                     // country code
//!     "3123",                   // cruise number 123
//!     "19880615",               // 1988-06-15
//!     "331125",                 // time 12.5 h
//!     "4424725",                // latitude 47.25
//!     "551-1225",               // longitude -122.5
//!     "11",                     // one level
//!     "0",                      // observed-level station
//!     "01",                     // one variable column
//!     "110",                    // variable code 1 (Temp), error code 0
//!     "-",                      // no character/PI block
//!     "211", "11", "210331550", // secondary header: code 10 = 55.0 m
//!     "-",                      // no biological block
//!     "3315500",                // level depth 55.0, error 0
//!     "3327500",                // temperature 7.5, error 0
//!     "\n",
//! );
//!
//! let mut input = Cursor::new(data.as_bytes());
//! let outcome = decode_station(
//!     &mut input,
//!     0,
//!     &DecodeOptions::default(),
//!     &Criteria::default(),
//!     None,
//! )?;
//!
//! let Outcome::Decoded { station, flags } = outcome else { unreachable!() };
//! assert!(flags.pass());
//! assert_eq!(station.station_number, 7);
//! assert_eq!((station.year, station.month, station.day), (1988, 6, 15));
//! assert_eq!((station.lat, station.lon), (47.25, -122.5));
//! assert_eq!(station.levels.len(), 1);
//! assert_eq!(station.levels[0].values[0].value, 7.5);
//!
//! let bottom = station.bottom_depth.unwrap();
//! assert_eq!(bottom.value, 55.0);
//! assert_eq!(bottom.source, DepthSource::Header);
//! # Ok::<(), oclfilt_rs::OclError>(())
//! ```
//!
//! # Iterating and filtering a stream
//!
//! ```
//! use std::io::Cursor;
//! use oclfilt_rs::{Criteria, Outcome, StationReader};
//!
//! # let station = concat!(
//! #     "278", "17", "90", "3123", "19880615", "331125", "4424725",
//! #     "551-1225", "11", "0", "01", "110", "-", "211", "11", "210331550",
//! #     "-", "3315500", "3327500", "\n",
//! # );
//! // Two back-to-back stations.
//! let data = format!("{station}{station}");
//! let criteria = Criteria::new().with_years(1976, 1990);
//!
//! let mut accepted = 0;
//! for result in StationReader::new(Cursor::new(data)).with_criteria(criteria) {
//!     if let Outcome::Decoded { station, flags } = result? {
//!         if flags.pass() {
//!             accepted += 1;
//!             assert_eq!(station.year, 1988);
//!         }
//!     }
//! }
//! assert_eq!(accepted, 2);
//! # Ok::<(), oclfilt_rs::OclError>(())
//! ```

pub mod bathy;
pub mod codes;
pub mod decode;
pub mod depth;
pub mod error;
pub mod field;
pub mod filter;
pub mod reader;
pub mod station;

pub use bathy::{BathyReader, BathyRecord};
pub use decode::{decode_station, DecodeOptions, Outcome, MAX_LEVELS};
pub use depth::{BottomDepth, DepthSource};
pub use error::{OclError, Result};
pub use field::{ByteBudget, FieldCursor};
pub use filter::{Criteria, FilterFlags, Region, WmoSquare};
pub use reader::StationReader;
pub use station::{ProfileLevel, SecHeaderEntry, Station, StationType, VarValue, VariableColumn};
