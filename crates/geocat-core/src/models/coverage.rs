//! Grid metadata carried by coverage resources.

use serde::{Deserialize, Serialize};

use super::Crs;

/// Interpolation methods a coverage can be resampled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Interpolation {
    #[default]
    Nearest,
    Bilinear,
    Bicubic,
}

impl Interpolation {
    /// Name used in capabilities documents
    pub fn label(&self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest neighbor",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
        }
    }

    /// All supported methods, in advertising order
    pub fn all() -> Vec<Interpolation> {
        vec![Interpolation::Nearest, Interpolation::Bilinear, Interpolation::Bicubic]
    }
}

/// Raster index range, upper bounds exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRange {
    pub low: [i64; 2],
    pub high: [i64; 2],
}

impl GridRange {
    pub fn new(width: usize, height: usize) -> Self {
        Self { low: [0, 0], high: [width as i64, height as i64] }
    }

    pub fn width(&self) -> usize {
        (self.high[0] - self.low[0]) as usize
    }

    pub fn height(&self) -> usize {
        (self.high[1] - self.low[1]) as usize
    }
}

/// Affine grid-to-world transform mapping pixel corners to world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub scale_x: f64,
    pub shear_x: f64,
    pub translate_x: f64,
    pub shear_y: f64,
    pub scale_y: f64,
    pub translate_y: f64,
}

impl AffineTransform {
    /// North-up transform anchored at the upper left corner
    pub fn north_up(upper_left_x: f64, upper_left_y: f64, res_x: f64, res_y: f64) -> Self {
        Self {
            scale_x: res_x,
            shear_x: 0.0,
            translate_x: upper_left_x,
            shear_y: 0.0,
            scale_y: -res_y,
            translate_y: upper_left_y,
        }
    }

    /// World coordinates of a grid position
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.scale_x * col + self.shear_x * row + self.translate_x,
            self.shear_y * col + self.scale_y * row + self.translate_y,
        )
    }
}

/// Grid geometry: raster extent plus its placement in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub range: GridRange,
    pub grid_to_world: AffineTransform,
    pub crs: Crs,
}

/// Description of one band of a coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageDimension {
    pub name: String,
    pub description: String,
    /// Minimum and maximum of the valid samples, if any
    pub range: Option<(f64, f64)>,
    pub null_values: Vec<f64>,
    pub unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_up_transform() {
        let tx = AffineTransform::north_up(145.0, -40.0, 0.5, 0.5);
        assert_eq!(tx.apply(0.0, 0.0), (145.0, -40.0));
        assert_eq!(tx.apply(2.0, 4.0), (146.0, -42.0));
    }

    #[test]
    fn test_grid_range_size() {
        let range = GridRange::new(7, 3);
        assert_eq!(range.width(), 7);
        assert_eq!(range.height(), 3);
    }
}
