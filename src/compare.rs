use std::fmt;
use std::path::Path;

use image::GrayImage;
use serde::Serialize;

use crate::luma::load_gray;

/// Cap on how many differing pixels a report carries.
pub const MAX_DIFF_SAMPLES: usize = 10;

/// One differing pixel, in row-major scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffSample {
    pub row: u32,
    pub col: u32,
    pub value_a: u8,
    pub value_b: u8,
}

/// Result of an exact pixel-level comparison of two equally-shaped
/// grayscale images.
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub identical: bool,
    pub diff_count: u64,
    pub samples: Vec<DiffSample>,
}

#[derive(Debug)]
pub enum CompareError {
    /// An input could not be read or decoded as a raster image.
    Load {
        path: String,
        source: image::ImageError,
    },
    /// Decoded shapes disagree. Shapes are (height, width).
    ShapeMismatch {
        shape_a: (u32, u32),
        shape_b: (u32, u32),
    },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Load { path, source } => {
                write!(f, "failed to load image {}: {}", path, source)
            }
            CompareError::ShapeMismatch { shape_a, shape_b } => {
                write!(
                    f,
                    "images have different dimensions: {}x{} vs {}x{}",
                    shape_a.0, shape_a.1, shape_b.0, shape_b.1
                )
            }
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::Load { source, .. } => Some(source),
            CompareError::ShapeMismatch { .. } => None,
        }
    }
}

/// Compare two grayscale images pixel by pixel.
///
/// Scans in row-major order, counts every differing position and keeps the
/// first [`MAX_DIFF_SAMPLES`] of them with both values. Pure function of
/// its inputs.
pub fn compare_rasters(a: &GrayImage, b: &GrayImage) -> Result<DiffReport, CompareError> {
    let (width_a, height_a) = a.dimensions();
    let (width_b, height_b) = b.dimensions();

    if (width_a, height_a) != (width_b, height_b) {
        return Err(CompareError::ShapeMismatch {
            shape_a: (height_a, width_a),
            shape_b: (height_b, width_b),
        });
    }

    let mut diff_count = 0u64;
    let mut samples = Vec::new();

    for row in 0..height_a {
        for col in 0..width_a {
            let value_a = a.get_pixel(col, row)[0];
            let value_b = b.get_pixel(col, row)[0];
            if value_a != value_b {
                diff_count += 1;
                if samples.len() < MAX_DIFF_SAMPLES {
                    samples.push(DiffSample {
                        row,
                        col,
                        value_a,
                        value_b,
                    });
                }
            }
        }
    }

    Ok(DiffReport {
        identical: diff_count == 0,
        diff_count,
        samples,
    })
}

/// Load both paths through the fixed luma pipeline and compare them.
pub fn compare_files<P: AsRef<Path>>(path_a: P, path_b: P) -> Result<DiffReport, CompareError> {
    let a = load_gray(path_a.as_ref()).map_err(|source| CompareError::Load {
        path: path_a.as_ref().display().to_string(),
        source,
    })?;
    let b = load_gray(path_b.as_ref()).map_err(|source| CompareError::Load {
        path: path_b.as_ref().display().to_string(),
        source,
    })?;
    compare_rasters(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(pixels: &[&[u8]]) -> GrayImage {
        let height = pixels.len() as u32;
        let width = if height > 0 { pixels[0].len() as u32 } else { 0 };
        GrayImage::from_fn(width, height, |x, y| {
            image::Luma([pixels[y as usize][x as usize]])
        })
    }

    #[test]
    fn test_identical_images_report_zero_differences() {
        let img = gray(&[&[1, 2, 3], &[4, 5, 6]]);
        let report = compare_rasters(&img, &img.clone()).unwrap();
        assert!(report.identical);
        assert_eq!(report.diff_count, 0);
        assert!(report.samples.is_empty());
    }

    #[test]
    fn test_single_difference_reports_exact_sample() {
        let a = gray(&[&[0, 0], &[0, 5]]);
        let b = gray(&[&[0, 0], &[0, 7]]);
        let report = compare_rasters(&a, &b).unwrap();
        assert!(!report.identical);
        assert_eq!(report.diff_count, 1);
        assert_eq!(
            report.samples,
            vec![DiffSample {
                row: 1,
                col: 1,
                value_a: 5,
                value_b: 7
            }]
        );
    }

    #[test]
    fn test_comparison_is_symmetric() {
        let a = gray(&[&[1, 2], &[3, 4]]);
        let b = gray(&[&[1, 9], &[8, 4]]);
        let ab = compare_rasters(&a, &b).unwrap();
        let ba = compare_rasters(&b, &a).unwrap();
        assert_eq!(ab.diff_count, ba.diff_count);
        assert_eq!(ab.identical, ba.identical);
        for (s_ab, s_ba) in ab.samples.iter().zip(ba.samples.iter()) {
            assert_eq!((s_ab.row, s_ab.col), (s_ba.row, s_ba.col));
            assert_eq!(s_ab.value_a, s_ba.value_b);
            assert_eq!(s_ab.value_b, s_ba.value_a);
        }
    }

    #[test]
    fn test_shape_mismatch_reports_both_shapes() {
        let a = GrayImage::new(4, 4);
        let b = GrayImage::new(5, 4); // 4 rows, 5 columns
        match compare_rasters(&a, &b) {
            Err(CompareError::ShapeMismatch { shape_a, shape_b }) => {
                assert_eq!(shape_a, (4, 4));
                assert_eq!(shape_b, (4, 5));
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_sample_list_is_bounded() {
        // 40x25 = 1000 differing pixels
        let a = GrayImage::from_fn(40, 25, |_, _| image::Luma([0]));
        let b = GrayImage::from_fn(40, 25, |_, _| image::Luma([255]));
        let report = compare_rasters(&a, &b).unwrap();
        assert_eq!(report.diff_count, 1000);
        assert_eq!(report.samples.len(), MAX_DIFF_SAMPLES);
        // First samples come from the top row, scan order
        assert_eq!((report.samples[0].row, report.samples[0].col), (0, 0));
        assert_eq!((report.samples[9].row, report.samples[9].col), (0, 9));
    }

    #[test]
    fn test_samples_follow_row_major_order() {
        let a = gray(&[&[0, 0, 0], &[0, 0, 0]]);
        let b = gray(&[&[0, 1, 0], &[1, 0, 1]]);
        let report = compare_rasters(&a, &b).unwrap();
        let coords: Vec<_> = report.samples.iter().map(|s| (s.row, s.col)).collect();
        assert_eq!(coords, vec![(0, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let missing = "no-such-image-anywhere.png";
        match compare_files(missing, missing) {
            Err(CompareError::Load { path, .. }) => {
                assert_eq!(path, missing);
            }
            other => panic!("expected load error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sized_images_are_identical() {
        let a = GrayImage::new(0, 0);
        let b = GrayImage::new(0, 0);
        let report = compare_rasters(&a, &b).unwrap();
        assert!(report.identical);
        assert_eq!(report.diff_count, 0);
    }
}
