//! BitReader: reads a packed bitstream produced by the BitWriter.
//!
//! Reads from an in-memory slice. A request that asks for more bits than remain fails with
//! `OutOfData` and leaves the cursor where it was.
//!
use crate::error::{CmprError, Result};

const BIT_MASK: u8 = 0xff;

/// Reads bits, most significant first, from a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader positioned at the first bit of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Number of unread bits.
    pub fn remaining(&self) -> usize {
        (self.buffer.len() - self.cursor) * 8 - self.bit_index
    }

    /// Return the next bit, *true* if it is 1.
    pub fn bit(&mut self) -> Result<bool> {
        if self.remaining() == 0 {
            return Err(CmprError::OutOfData {
                requested: 1,
                remaining: 0,
            });
        }
        let bit =
            (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Ok(bit == 1)
    }

    /// Return the next `n` bits (0-64) as an integer.
    pub fn read_bits(&mut self, n: u8) -> Result<u64> {
        /*
        First take whatever is left of a partially read byte, then full bytes, then the
        leading bits of one more byte to complete the request.
        */
        let mut n = n as usize;
        if n > 64 || n > self.remaining() {
            return Err(CmprError::OutOfData {
                requested: n.min(u8::MAX as usize) as u8,
                remaining: self.remaining(),
            });
        }
        let mut result = 0_u64;

        // Test if we have a partial byte of data. If we do, read from it.
        if self.bit_index > 0 && n > 0 {
            let needed = n.min(8 - self.bit_index);
            let byte = self.buffer[self.cursor] & (BIT_MASK >> self.bit_index);
            result = (byte >> (8 - self.bit_index - needed)) as u64;
            self.bit_index += needed;
            if self.bit_index == 8 {
                self.bit_index = 0;
                self.cursor += 1;
            }
            n -= needed;
        }
        // Get as many full bytes as we need.
        while n >= 8 {
            result = result << 8 | self.buffer[self.cursor] as u64;
            self.cursor += 1;
            n -= 8;
        }
        // If we still need a partial byte, get whatever bits we still need.
        if n > 0 {
            result = result << n | (self.buffer[self.cursor] >> (8 - n)) as u64;
            self.bit_index = n;
        }
        Ok(result)
    }

    /// Returns the next 8 bits as a byte.
    pub fn byte(&mut self) -> Result<u8> {
        self.read_bits(8).map(|byte| byte as u8)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
