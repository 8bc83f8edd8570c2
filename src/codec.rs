use std::fmt;

use image::GrayImage;

use crate::bitstream::{BitReader, BitWriter};
use crate::golomb::Golomb;
use crate::types::Predictor;

/// Lossless grayscale codec: per-pixel prediction, Golomb-coded residuals.
///
/// Stream layout, MSB-first: height (32 bits), width (32), Golomb parameter
/// m (16), predictor id (8), then one zig-zag Golomb codeword per residual
/// in row-major order. The trailing byte is zero-padded.

#[derive(Debug)]
pub enum CodecError {
    /// Stream ended inside the header or a residual codeword.
    Truncated,
    /// Header carries m = 0, which no encoder produces.
    InvalidParameter,
    /// Header names a predictor id outside 1..=5.
    UnknownPredictor(u8),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Truncated => write!(f, "compressed stream ended unexpectedly"),
            CodecError::InvalidParameter => write!(f, "invalid Golomb parameter m = 0 in header"),
            CodecError::UnknownPredictor(id) => write!(f, "unknown predictor id {} in header", id),
        }
    }
}

impl std::error::Error for CodecError {}

/// Prediction for pixel (row, col) from already-processed neighbors.
///
/// A is the left neighbor, B the one above, C the one above-left. The first
/// pixel is predicted as 128, the rest of the first row from A and the rest
/// of the first column from B, regardless of the selected predictor.
fn predict(img: &GrayImage, row: u32, col: u32, pred: Predictor) -> i32 {
    let a = if col > 0 {
        img.get_pixel(col - 1, row)[0] as i32
    } else {
        0
    };
    let b = if row > 0 {
        img.get_pixel(col, row - 1)[0] as i32
    } else {
        0
    };
    let c = if row > 0 && col > 0 {
        img.get_pixel(col - 1, row - 1)[0] as i32
    } else {
        0
    };

    if row == 0 && col == 0 {
        return 128;
    }
    if row == 0 {
        return a;
    }
    if col == 0 {
        return b;
    }

    match pred {
        Predictor::Left => a,
        Predictor::Above => b,
        Predictor::MeanLeftAbove => (a + b) / 2,
        Predictor::Linear => a + b - c,
        Predictor::JpegLs => {
            if c >= a.max(b) {
                a.min(b)
            } else if c <= a.min(b) {
                a.max(b)
            } else {
                a + b - c
            }
        }
    }
}

/// Estimate the Golomb parameter from the mean absolute residual over
/// interior pixels: m = ceil(E|residual| * ln 2), floored at 1.
pub fn estimate_m(img: &GrayImage, pred: Predictor) -> u32 {
    let (width, height) = img.dimensions();
    let mut sum_abs: u64 = 0;
    let mut count: u64 = 0;

    for row in 1..height {
        for col in 1..width {
            let prediction = predict(img, row, col, pred);
            let residual = img.get_pixel(col, row)[0] as i32 - prediction;
            sum_abs += residual.unsigned_abs() as u64;
            count += 1;
        }
    }

    if count == 0 {
        return 1;
    }
    let mean = sum_abs as f64 / count as f64;
    let m = (mean * std::f64::consts::LN_2).ceil() as u32;
    m.max(1)
}

/// Encode a grayscale image losslessly with the given predictor.
pub fn encode(img: &GrayImage, pred: Predictor) -> Vec<u8> {
    let (width, height) = img.dimensions();
    let m = estimate_m(img, pred);
    let golomb = Golomb::new(m);

    let mut out = BitWriter::new();
    out.write_bits(height, 32);
    out.write_bits(width, 32);
    out.write_bits(m, 16);
    out.write_bits(pred.id() as u32, 8);

    for row in 0..height {
        for col in 0..width {
            let prediction = predict(img, row, col, pred);
            let residual = img.get_pixel(col, row)[0] as i32 - prediction;
            golomb.encode_signed(residual, &mut out);
        }
    }
    out.finish()
}

/// Decode a compressed stream back into a grayscale image.
pub fn decode(bytes: &[u8]) -> Result<GrayImage, CodecError> {
    let mut input = BitReader::new(bytes);

    let height = input.read_bits(32).ok_or(CodecError::Truncated)?;
    let width = input.read_bits(32).ok_or(CodecError::Truncated)?;
    let m = input.read_bits(16).ok_or(CodecError::Truncated)?;
    let pred_id = input.read_bits(8).ok_or(CodecError::Truncated)? as u8;

    if m == 0 {
        return Err(CodecError::InvalidParameter);
    }
    let pred = Predictor::from_u8(pred_id).ok_or(CodecError::UnknownPredictor(pred_id))?;
    let golomb = Golomb::new(m);

    let mut img = GrayImage::new(width, height);
    for row in 0..height {
        for col in 0..width {
            let prediction = predict(&img, row, col, pred);
            let residual = golomb
                .decode_signed(&mut input)
                .ok_or(CodecError::Truncated)?;
            let value = (prediction + residual).clamp(0, 255) as u8;
            img.put_pixel(col, row, image::Luma([value]));
        }
    }
    Ok(img)
}

/// Residuals offset by 128 and clamped, for visual inspection of how well
/// a predictor fits an image.
pub fn residual_image(img: &GrayImage, pred: Predictor) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut out = GrayImage::new(width, height);
    for row in 0..height {
        for col in 0..width {
            let prediction = predict(img, row, col, pred);
            let residual = img.get_pixel(col, row)[0] as i32 - prediction;
            let value = (residual + 128).clamp(0, 255) as u8;
            out.put_pixel(col, row, image::Luma([value]));
        }
    }
    out
}
