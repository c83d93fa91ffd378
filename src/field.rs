//! Primitive field decoding over a byte-budgeted character stream.
//!
//! OCL files are ASCII digit streams in which every field declares its own
//! length, so a station can only be read strictly sequentially. [`FieldCursor`]
//! couples the input stream with the [`ByteBudget`] for the current station:
//! every consuming read charges the budget, which is what lets the station
//! reader abandon a station mid-stream by discarding the remaining declared
//! bytes as an opaque run.
//!
//! Line terminators (`\n`, `\r`) may appear anywhere inside a field and are
//! never content; they are skipped without counting.

use std::io::BufRead;

use crate::{OclError, Result};

/// Remaining content-byte allowance for the current station.
///
/// Uninitialized until the station's own total-byte field sets it; a station
/// whose total-byte field is missing leaves it uninitialized, in which case
/// the realignment skip only consumes the trailing whitespace line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteBudget {
    remaining: Option<i64>,
}

impl ByteBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for `n` consumed content bytes. No-op while uninitialized.
    pub fn charge(&mut self, n: i64) {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= n;
        }
    }

    /// Set the budget from the station's declared total byte count.
    ///
    /// `field_len` is the digit count of the total field itself; together
    /// with its one length digit those bytes are already consumed.
    pub fn init(&mut self, total: i64, field_len: i64) {
        self.remaining = Some(total - field_len - 1);
    }

    pub fn is_set(&self) -> bool {
        self.remaining.is_some()
    }

    /// Remaining content bytes, or `None` while uninitialized.
    pub fn remaining(&self) -> Option<i64> {
        self.remaining
    }
}

/// Cursor over one station's worth of bytes in an OCL stream.
pub struct FieldCursor<'a, R: BufRead> {
    input: &'a mut R,
    budget: ByteBudget,
}

impl<'a, R: BufRead> FieldCursor<'a, R> {
    pub fn new(input: &'a mut R) -> Self {
        Self {
            input,
            budget: ByteBudget::new(),
        }
    }

    pub fn budget(&self) -> ByteBudget {
        self.budget
    }

    fn raw_byte(&mut self) -> Result<Option<u8>> {
        let buf = self.input.fill_buf()?;
        let Some(&byte) = buf.first() else {
            return Ok(None);
        };
        self.input.consume(1);
        Ok(Some(byte))
    }

    /// Next content byte, skipping line terminators. `None` at end of stream.
    fn content_byte(&mut self) -> Result<Option<u8>> {
        loop {
            match self.raw_byte()? {
                Some(b'\n') | Some(b'\r') => continue,
                other => return Ok(other),
            }
        }
    }

    /// Read exactly `n` content digits as an integer, without charging the
    /// budget.
    ///
    /// Returns `None` for the format's "no value" encodings: `n == 0`, or
    /// `n == 1` with the sole character being `-`. Leading characters may be
    /// spaces. End of stream mid-field is fatal.
    pub fn fixed_digits(&mut self, n: usize) -> Result<Option<i64>> {
        let mut text = String::with_capacity(n);
        let mut last = 0u8;
        for _ in 0..n {
            let byte = self
                .content_byte()?
                .ok_or(OclError::UnexpectedEof { wanted: n })?;
            last = byte;
            text.push(byte as char);
        }

        if n > 0 && last.is_ascii_digit() {
            let value = text
                .trim_start()
                .parse::<i64>()
                .map_err(|_| OclError::BadField { byte: last })?;
            Ok(Some(value))
        } else if n == 0 || (n == 1 && last == b'-') {
            Ok(None)
        } else {
            Err(OclError::BadField { byte: last })
        }
    }

    /// Read a fixed-width integer field and charge its `n` bytes.
    pub fn fixed_int(&mut self, n: usize) -> Result<Option<i64>> {
        let value = self.fixed_digits(n)?;
        self.budget.charge(n as i64);
        Ok(value)
    }

    /// Read a variable-length integer field: one length digit, then that
    /// many content digits.
    ///
    /// A successful read either initializes the budget (first field of a
    /// station, which declares the station's total byte count) or charges it.
    pub fn varlen_int(&mut self) -> Result<Option<i64>> {
        let len = self.fixed_digits(1)?;
        self.budget.charge(1);
        let Some(len) = len else {
            return Ok(None);
        };

        let len = len.max(0) as usize;
        match self.fixed_digits(len)? {
            None => Ok(None),
            Some(value) => {
                if self.budget.is_set() {
                    self.budget.charge(len as i64);
                } else {
                    self.budget.init(value, len as i64);
                }
                Ok(Some(value))
            }
        }
    }

    /// Read a variable-length float field: three one-digit controls
    /// (significant digits, total digits, implied-decimal precision), then
    /// the digits themselves as an integer scaled by the precision.
    ///
    /// The significant-digit count is carried by the format but unused here.
    /// A zero-length first control means the whole field is absent.
    pub fn varlen_float(&mut self) -> Result<Option<f64>> {
        let sig = self.fixed_digits(1)?;
        self.budget.charge(1);
        if sig.is_none() {
            return Ok(None);
        }

        let total = self.fixed_digits(1)?;
        self.budget.charge(1);
        let precision = self.fixed_digits(1)?;
        self.budget.charge(1);

        let total = total.unwrap_or(0).max(0) as usize;
        let digits = self.fixed_digits(total)?;
        self.budget.charge(total as i64);

        match (digits, precision) {
            (Some(digits), Some(precision)) => {
                Ok(Some(digits as f64 / 10f64.powi(precision as i32)))
            }
            _ => Ok(None),
        }
    }

    /// Consume and discard `n` content bytes, charging the budget.
    ///
    /// Used for the character/PI and biological blocks, whose contents are
    /// skipped byte-by-byte without interpretation.
    pub fn discard(&mut self, n: i64) -> Result<()> {
        for _ in 0..n.max(0) {
            self.content_byte()?
                .ok_or(OclError::UnexpectedEof { wanted: 1 })?;
            self.budget.charge(1);
        }
        Ok(())
    }

    /// Discard the remaining budgeted content bytes, then consume the
    /// trailing whitespace line to realign on the next station.
    ///
    /// With a negative or uninitialized budget only the realignment happens.
    pub fn skip_to_next_station(mut self) -> Result<()> {
        if let Some(remaining) = self.budget.remaining() {
            for _ in 0..remaining.max(0) {
                self.content_byte()?
                    .ok_or(OclError::UnexpectedEof { wanted: 1 })?;
            }
        }

        // Trailing blank space up to and including the newline (or EOF).
        while let Some(byte) = self.raw_byte()? {
            if byte == b'\n' {
                break;
            }
        }
        Ok(())
    }
}
