use crate::bitstream::{BitReader, BitWriter};

/// Golomb coder with truncated-binary remainders.
///
/// A value n is split into quotient q = n / m and remainder r = n % m. The
/// quotient is written in unary (q zeros then a one). The remainder uses
/// b - 1 bits when it falls below the cutoff 2^b - m, and b bits (shifted up
/// by the cutoff) otherwise, where b = ceil(log2 m). With m = 1 the code
/// degenerates to pure unary.
///
/// Signed values go through zig-zag interleaving first:
/// 0, -1, 1, -2, 2, ... map to 0, 1, 2, 3, 4, ...
pub struct Golomb {
    m: u32,
    b: u8,
    cutoff: u32,
}

impl Golomb {
    /// Panics if `m` is zero.
    pub fn new(m: u32) -> Self {
        assert!(m >= 1, "Golomb parameter m must be positive");
        let b = if m == 1 {
            0
        } else {
            (u32::BITS - (m - 1).leading_zeros()) as u8
        };
        let cutoff = (1u32 << b) - m;
        Golomb { m, b, cutoff }
    }

    pub fn parameter(&self) -> u32 {
        self.m
    }

    /// Encode a non-negative value into the writer.
    pub fn encode(&self, n: u32, out: &mut BitWriter) {
        let q = n / self.m;
        let r = n % self.m;

        for _ in 0..q {
            out.write_bit(0);
        }
        out.write_bit(1);

        if self.m == 1 {
            return;
        }
        if r < self.cutoff {
            out.write_bits(r, self.b - 1);
        } else {
            out.write_bits(r + self.cutoff, self.b);
        }
    }

    pub fn encode_signed(&self, n: i32, out: &mut BitWriter) {
        self.encode(zigzag(n), out);
    }

    /// Decode one value from the reader. None means the stream ended inside
    /// a codeword.
    pub fn decode(&self, input: &mut BitReader) -> Option<u32> {
        let mut q = 0u32;
        loop {
            match input.read_bit()? {
                0 => q += 1,
                _ => break,
            }
        }

        if self.m == 1 {
            return Some(q);
        }

        let mut r = input.read_bits(self.b - 1)?;
        if r >= self.cutoff {
            let extra = input.read_bit()?;
            r = (r << 1) | extra as u32;
            r -= self.cutoff;
        }
        Some(q * self.m + r)
    }

    pub fn decode_signed(&self, input: &mut BitReader) -> Option<i32> {
        self.decode(input).map(unzigzag)
    }
}

fn zigzag(n: i32) -> u32 {
    if n >= 0 {
        2 * n as u32
    } else {
        (-2i64 * n as i64 - 1) as u32
    }
}

fn unzigzag(mapped: u32) -> i32 {
    if mapped % 2 == 0 {
        (mapped / 2) as i32
    } else {
        -(((mapped as i64 + 1) / 2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_bits(g: &Golomb, n: u32) -> String {
        let mut w = BitWriter::new();
        g.encode(n, &mut w);
        let len = w.bit_len();
        let bytes = w.finish();
        let mut s = String::new();
        for i in 0..len {
            let bit = (bytes[i / 8] >> (7 - i % 8)) & 1;
            s.push(if bit == 1 { '1' } else { '0' });
        }
        s
    }

    #[test]
    fn test_known_codewords_m4() {
        // m = 4 is a power of two, so the remainder is plain 2-bit binary
        let g = Golomb::new(4);
        assert_eq!(encode_to_bits(&g, 0), "100");
        assert_eq!(encode_to_bits(&g, 1), "101");
        assert_eq!(encode_to_bits(&g, 4), "0100");
        assert_eq!(encode_to_bits(&g, 9), "00101");
    }

    #[test]
    fn test_truncated_binary_m3() {
        // m = 3: b = 2, cutoff = 1. r = 0 takes one bit, r = 1, 2 take two.
        let g = Golomb::new(3);
        assert_eq!(encode_to_bits(&g, 0), "10");
        assert_eq!(encode_to_bits(&g, 1), "110");
        assert_eq!(encode_to_bits(&g, 2), "111");
        assert_eq!(encode_to_bits(&g, 3), "010");
    }

    #[test]
    fn test_m1_is_pure_unary() {
        let g = Golomb::new(1);
        assert_eq!(encode_to_bits(&g, 0), "1");
        assert_eq!(encode_to_bits(&g, 3), "0001");
    }

    #[test]
    fn test_zigzag_mapping() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(-2), 3);
        assert_eq!(zigzag(2), 4);
        for n in -300..=300 {
            assert_eq!(unzigzag(zigzag(n)), n);
        }
    }

    #[test]
    fn test_round_trip_various_parameters() {
        for m in [1, 2, 3, 4, 5, 7, 8, 13, 64, 255] {
            let g = Golomb::new(m);
            let mut w = BitWriter::new();
            let values: Vec<i32> = (-40..=40).collect();
            for &v in &values {
                g.encode_signed(v, &mut w);
            }
            let bytes = w.finish();
            let mut r = BitReader::new(&bytes);
            for &v in &values {
                assert_eq!(g.decode_signed(&mut r), Some(v), "m={}", m);
            }
        }
    }

    #[test]
    fn test_truncated_stream_yields_none() {
        let g = Golomb::new(5);
        let mut w = BitWriter::new();
        g.encode(23, &mut w);
        let mut bytes = w.finish();
        // All-zero padding after the last codeword reads as an unterminated
        // unary run, which must not decode as a value
        bytes.push(0x00);
        let mut r = BitReader::new(&bytes);
        assert_eq!(g.decode(&mut r), Some(23));
        assert_eq!(g.decode(&mut r), None);
    }

    #[test]
    #[should_panic]
    fn test_zero_parameter_panics() {
        Golomb::new(0);
    }
}
