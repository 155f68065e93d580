//! Low-level bit read and write utilities for byte slices.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.

use crate::errors::BitError;

/// Reads `n` bits starting at `bit_pos` as an unsigned value (max 64 bits). MSB-first.
///
/// Works a byte at a time: each overlapping byte contributes the slice of its
/// bits that falls inside `[bit_pos, bit_pos + n)`.
pub fn read_bits_at(data: &[u8], bit_pos: usize, n: usize) -> Result<u64, BitError> {
    if n > 64 {
        return Err(BitError::TooManyBits);
    }

    let end = match bit_pos.checked_add(n) {
        Some(end) if end <= data.len() * 8 => end,
        _ => return Err(BitError::OutOfBounds),
    };

    let mut value = 0u64;
    let mut pos = bit_pos;

    while pos < end {
        let bit_in_byte = pos % 8;
        let take = (8 - bit_in_byte).min(end - pos);
        let byte = data[pos / 8];

        let chunk = (byte >> (8 - bit_in_byte - take)) & low_mask(take) as u8;
        value = (value << take) | chunk as u64;
        pos += take;
    }

    Ok(value)
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: usize) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Mask with the low `n` bits set (n <= 64).
pub fn low_mask(n: usize) -> u64 {
    if n >= 64 { u64::MAX } else { (1u64 << n) - 1 }
}

/// Widest value accepted by a single [BitWriter::write_bits] call.
pub const MAX_WRITE_BITS: usize = 32;

/// MSB-first bit accumulator that appends values of arbitrary width to a byte buffer.
///
/// Pending bits live in a 64-bit accumulator. At most 7 bits are carried
/// between writes, so a 32-bit write never needs more than 39.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    acc: u64,
    acc_bits: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer whose buffer can hold `bytes` without reallocating.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Number of bits written so far, including the pending partial byte.
    pub fn bit_len(&self) -> usize {
        self.buf.len() * 8 + self.acc_bits
    }

    /// Appends the low `n` bits of `value`, MSB-first. Higher bits of `value` are ignored.
    pub fn write_bits(&mut self, value: u64, n: usize) -> Result<(), BitError> {
        if n > MAX_WRITE_BITS {
            return Err(BitError::TooManyBits);
        }

        self.acc = (self.acc << n) | (value & low_mask(n));
        self.acc_bits += n;

        while self.acc_bits >= 8 {
            self.acc_bits -= 8;
            self.buf.push((self.acc >> self.acc_bits) as u8);
        }
        self.acc &= low_mask(self.acc_bits);

        Ok(())
    }

    /// Flushes the pending partial byte, left-justified and zero-padded, and returns the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.acc_bits > 0 {
            self.buf.push((self.acc << (8 - self.acc_bits)) as u8);
        }

        self.buf
    }
}
