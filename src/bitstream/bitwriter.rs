/// Creates a bitstream for output. Bits are queued in a u64 and moved to the output
/// buffer a byte at a time as soon as a full byte is available.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
}

impl BitWriter {
    /// Create a new BitWriter with an output buffer of the capacity specified (in bytes).
    /// Call flush() to pad the last byte and take the buffer.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all write functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Append the low `width` bits of `value`, most significant bit first. Width may be 0-64.
    pub fn write_bits(&mut self, value: u64, width: u8) {
        debug_assert!(width <= 64, "width {} is wider than a u64", width);
        // The queue never holds more than 7 bits between calls, so 32 bits at a time always fit.
        let mut remaining = width.min(64);
        while remaining > 0 {
            let take = remaining.min(32);
            remaining -= take;
            let chunk = (value >> remaining) & ((1_u64 << take) - 1);
            self.queue <<= take; //shift queue by bit length
            self.queue |= chunk; //add data portion to queue
            self.q_bits += take; //update depth of queue bits
            self.write_stream();
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u64, 1);
    }

    /// Append a full byte. Convenience for write_bits(byte, 8).
    pub fn write_u8(&mut self, byte: u8) {
        self.write_bits(byte as u64, 8);
    }

    /// Number of bits written so far, including any still waiting in the queue.
    pub fn bits_written(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits, and returns the packed bytes.
    pub fn flush(mut self) -> Vec<u8> {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.write_stream(); // write out all that is left
        }
        self.output
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bits_written() / 8, self.bits_written() % 8)
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;

    #[test]
    fn write_u8_test() {
        let mut bw = BitWriter::new(1);
        bw.write_u8(b'x');
        assert_eq!(bw.flush(), "x".as_bytes());
    }

    #[test]
    fn last_bits_test() {
        let mut bw = BitWriter::new(5);
        bw.write_u8(255);
        bw.write_u8(1);
        bw.write_u8(128);
        bw.write_u8(255);
        bw.write_bits(7, 3);
        assert_eq!(bw.flush(), vec![255, 1, 128, 255, 224]);
    }

    #[test]
    fn odd_widths_test() {
        let mut bw = BitWriter::new(4);
        // 9 bits of 0x141 then 9 bits of 0x0ff -> 1010_0000 1011_1111 11..
        bw.write_bits(0x141, 9);
        bw.write_bits(0x0ff, 9);
        assert_eq!(bw.bits_written(), 18);
        assert_eq!(bw.loc(), "[2.2]");
        assert_eq!(bw.flush(), vec![0b1010_0000, 0b1011_1111, 0b1100_0000]);
    }

    #[test]
    fn only_low_bits_are_written_test() {
        let mut bw = BitWriter::new(1);
        bw.write_bits(0xfff0, 4);
        bw.write_bits(0b1, 4);
        assert_eq!(bw.flush(), vec![0b0000_0001]);
    }

    #[test]
    fn wide_values_test() {
        let mut bw = BitWriter::new(9);
        bw.write_bit(true);
        bw.write_bits(u64::MAX, 64);
        let out = bw.flush();
        assert_eq!(out.len(), 9);
        assert!(out[..8].iter().all(|&b| b == 0xff));
        assert_eq!(out[8], 0b1000_0000);
    }

    #[test]
    fn empty_flush_test() {
        let bw = BitWriter::new(0);
        assert!(bw.flush().is_empty());
    }
}
