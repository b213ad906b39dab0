//! In-memory ASCII raster shared by the text grid formats.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GeocatError, Result};
use crate::formats::{GridCoverage, GridCoverageReader};
use crate::models::{AffineTransform, Crs, GridRange, ReferencedEnvelope};
use crate::referencing;

/// A decoded single-band ASCII raster
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiGrid {
    pub cols: usize,
    pub rows: usize,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub no_data: Option<f64>,
    /// Row-major from the top row, `None` for no-data cells
    pub samples: Vec<Option<f64>>,
}

impl AsciiGrid {
    /// Parse the body of an ASCII raster: `rows * cols` whitespace separated values
    ///
    /// `null_token` is a literal token standing for no-data (GRASS uses `*`).
    pub fn parse_samples(
        format: &str,
        body: &str,
        cols: usize,
        rows: usize,
        no_data: Option<f64>,
        null_token: Option<&str>,
    ) -> Result<Vec<Option<f64>>> {
        let expected = cols.checked_mul(rows).ok_or_else(|| GeocatError::Format {
            format: format.to_string(),
            reason: format!("Grid of {} x {} cells is too large", cols, rows),
        })?;

        // every sample takes at least two bytes of the body
        let mut samples = Vec::with_capacity(expected.min(body.len() / 2 + 1));
        for token in body.split_whitespace() {
            if null_token == Some(token) {
                samples.push(None);
                continue;
            }
            let value: f64 = token.parse().map_err(|_| GeocatError::Format {
                format: format.to_string(),
                reason: format!("Invalid sample value '{}'", token),
            })?;
            samples.push(if no_data == Some(value) { None } else { Some(value) });
        }

        if samples.len() != expected {
            return Err(GeocatError::Format {
                format: format.to_string(),
                reason: format!("Expected {} samples, found {}", expected, samples.len()),
            });
        }
        Ok(samples)
    }

    pub fn resolution_x(&self) -> f64 {
        (self.max_x - self.min_x) / self.cols as f64
    }

    pub fn resolution_y(&self) -> f64 {
        (self.max_y - self.min_y) / self.rows as f64
    }
}

/// Reader over an ASCII raster already decoded in memory
#[derive(Debug, Clone)]
pub struct AsciiGridReader {
    format_name: String,
    source: PathBuf,
    crs: Crs,
    grid: AsciiGrid,
}

impl AsciiGridReader {
    /// Wrap a decoded grid; the CRS comes from a sibling `.prj` file if present
    pub fn new(format_name: impl Into<String>, source: &Path, grid: AsciiGrid) -> Result<Self> {
        let crs = read_sidecar_crs(source)?;
        Ok(Self { format_name: format_name.into(), source: source.to_path_buf(), crs, grid })
    }

    /// File the raster was read from
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl GridCoverageReader for AsciiGridReader {
    fn format_name(&self) -> &str {
        &self.format_name
    }

    fn crs(&self) -> &Crs {
        &self.crs
    }

    fn original_envelope(&self) -> ReferencedEnvelope {
        ReferencedEnvelope::new(
            self.grid.min_x,
            self.grid.min_y,
            self.grid.max_x,
            self.grid.max_y,
            self.crs.clone(),
        )
    }

    fn original_grid_range(&self) -> GridRange {
        GridRange::new(self.grid.cols, self.grid.rows)
    }

    fn grid_to_world(&self) -> AffineTransform {
        AffineTransform::north_up(
            self.grid.min_x,
            self.grid.max_y,
            self.grid.resolution_x(),
            self.grid.resolution_y(),
        )
    }

    fn no_data(&self) -> Option<f64> {
        self.grid.no_data
    }

    fn read(&self) -> Result<GridCoverage> {
        Ok(GridCoverage {
            width: self.grid.cols,
            height: self.grid.rows,
            samples: self.grid.samples.clone(),
        })
    }
}

/// Read the CRS from a `.prj` sidecar holding `EPSG:<code>`; EPSG:4326 when absent
fn read_sidecar_crs(source: &Path) -> Result<Crs> {
    let prj = source.with_extension("prj");
    if !prj.exists() {
        return Ok(Crs::wgs84());
    }
    let content = fs::read_to_string(&prj)?;
    referencing::parse_srs(content.trim())
}

/// Read the first non-empty line of a file, for cheap format sniffing
pub(crate) fn first_line(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    content.lines().map(str::trim).find(|line| !line.is_empty()).map(str::to_string)
}
