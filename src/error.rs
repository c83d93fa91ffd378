//! Error types for OCL station decoding.
//!
//! Zero-length ("no value") fields are a legitimate part of the format and
//! are *not* errors; the primitive decoders report them as `None`. The
//! variants here cover the genuinely unrecoverable cases: the stream is
//! strictly sequential, so one misread byte corrupts everything after it and
//! no per-station recovery is attempted.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OclError {
    /// End of stream in the middle of a fixed-digit field. Fatal: the rest
    /// of the stream cannot be realigned.
    #[error("unexpected end of stream inside a {wanted}-digit field")]
    UnexpectedEof { wanted: usize },

    /// The terminal byte of a field is neither a digit nor the `-` missing
    /// value marker.
    #[error("malformed field: terminal byte {byte:#04x} is not a digit or missing-value marker")]
    BadField { byte: u8 },

    /// A bathymetry side-channel line did not have the expected four
    /// whitespace-separated fields.
    #[error("malformed bathymetry record: {line:?}")]
    BadBathyRecord { line: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OclError>;
