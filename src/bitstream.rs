/// MSB-first bit packing over byte buffers.
///
/// The compressed stream format packs header fields and Golomb codewords
/// bit by bit, most significant bit first within each byte. The final byte
/// of a written stream is zero-padded.

pub struct BitWriter {
    bytes: Vec<u8>,
    buffer: u8,
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter {
            bytes: Vec::new(),
            buffer: 0,
            bit_count: 0,
        }
    }

    pub fn write_bit(&mut self, bit: u8) {
        self.buffer |= (bit & 1) << (7 - self.bit_count);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.buffer);
            self.buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write the low `n` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, n: u8) {
        for i in (0..n).rev() {
            self.write_bit(((value >> i) & 1) as u8);
        }
    }

    /// Flush any partial byte (zero-padded) and return the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.buffer);
        }
        self.bytes
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        BitWriter::new()
    }
}

pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    buffer: u8,
    bits_left: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitReader {
            bytes,
            pos: 0,
            buffer: 0,
            bits_left: 0,
        }
    }

    /// Read one bit, or None at end of input.
    pub fn read_bit(&mut self) -> Option<u8> {
        if self.bits_left == 0 {
            if self.pos >= self.bytes.len() {
                return None;
            }
            self.buffer = self.bytes[self.pos];
            self.pos += 1;
            self.bits_left = 8;
        }
        let bit = (self.buffer >> 7) & 1;
        self.buffer <<= 1;
        self.bits_left -= 1;
        Some(bit)
    }

    /// Read `n` bits as an unsigned value, most significant first.
    pub fn read_bits(&mut self, n: u8) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..n {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_single_bits_packs_msb_first() {
        let mut w = BitWriter::new();
        for bit in [1, 0, 1, 1, 0, 0, 0, 1] {
            w.write_bit(bit);
        }
        assert_eq!(w.finish(), vec![0b10110001]);
    }

    #[test]
    fn test_partial_byte_is_zero_padded() {
        let mut w = BitWriter::new();
        w.write_bit(1);
        w.write_bit(1);
        w.write_bit(1);
        assert_eq!(w.finish(), vec![0b11100000]);
    }

    #[test]
    fn test_write_bits_crosses_byte_boundary() {
        let mut w = BitWriter::new();
        w.write_bits(0xABC, 12);
        assert_eq!(w.finish(), vec![0xAB, 0xC0]);
    }

    #[test]
    fn test_read_bits_round_trip() {
        let mut w = BitWriter::new();
        w.write_bits(512, 32);
        w.write_bits(768, 32);
        w.write_bits(7, 16);
        w.write_bits(3, 8);
        let bytes = w.finish();

        let mut r = BitReader::new(&bytes);
        assert_eq!(r.read_bits(32), Some(512));
        assert_eq!(r.read_bits(32), Some(768));
        assert_eq!(r.read_bits(16), Some(7));
        assert_eq!(r.read_bits(8), Some(3));
        assert_eq!(r.read_bit(), None);
    }

    #[test]
    fn test_read_past_end_returns_none() {
        let bytes = vec![0xFF];
        let mut r = BitReader::new(&bytes);
        assert_eq!(r.read_bits(8), Some(0xFF));
        assert_eq!(r.read_bit(), None);
        assert_eq!(r.read_bits(4), None);
    }

    #[test]
    fn test_bit_len_tracks_writes() {
        let mut w = BitWriter::new();
        assert_eq!(w.bit_len(), 0);
        w.write_bits(0, 10);
        assert_eq!(w.bit_len(), 10);
    }
}
