//! Esri ArcInfo ASCII grid format

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{GeocatError, Result};
use crate::formats::ascii_grid::{first_line, AsciiGrid, AsciiGridReader};
use crate::formats::{GridCoverageReader, GridFormat};

const FORMAT_NAME: &str = "ArcGrid";

/// ArcInfo ASCII grid (`ncols`, `nrows`, `xllcorner`, ... header)
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcGridFormat;

impl GridFormat for ArcGridFormat {
    fn name(&self) -> &str {
        FORMAT_NAME
    }

    fn description(&self) -> &str {
        "Arc Grid Coverage Format"
    }

    fn accepts(&self, path: &Path) -> bool {
        first_line(path)
            .map(|line| line.to_ascii_lowercase().starts_with("ncols"))
            .unwrap_or(false)
    }

    fn reader(&self, path: &Path) -> Result<Arc<dyn GridCoverageReader>> {
        let content = fs::read_to_string(path)?;
        let grid = parse(&content)?;
        Ok(Arc::new(AsciiGridReader::new(FORMAT_NAME, path, grid)?))
    }
}

/// Parse an ArcInfo ASCII grid document
pub fn parse(content: &str) -> Result<AsciiGrid> {
    let mut header = Header::default();
    let mut lines = content.lines().peekable();

    while let Some(&line) = lines.peek() {
        let mut parts = line.split_whitespace();
        let Some(key) = parts.next() else {
            lines.next();
            continue;
        };
        // the header ends at the first line starting with a number
        if key.parse::<f64>().is_ok() {
            break;
        }
        let value = parts.next().ok_or_else(|| invalid(format!("Missing value for {}", key)))?;
        header.set(&key.to_ascii_lowercase(), value)?;
        lines.next();
    }

    let body: Vec<&str> = lines.collect();
    let cols = header.ncols.ok_or_else(|| invalid("Missing ncols".to_string()))?;
    let rows = header.nrows.ok_or_else(|| invalid("Missing nrows".to_string()))?;
    let cellsize = header.cellsize.ok_or_else(|| invalid("Missing cellsize".to_string()))?;
    let (min_x, min_y) = header.lower_left(cellsize)?;

    let samples = AsciiGrid::parse_samples(FORMAT_NAME, &body.join("\n"), cols, rows, header.nodata, None)?;

    Ok(AsciiGrid {
        cols,
        rows,
        min_x,
        min_y,
        max_x: min_x + cols as f64 * cellsize,
        max_y: min_y + rows as f64 * cellsize,
        no_data: header.nodata,
        samples,
    })
}

#[derive(Debug, Default)]
struct Header {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xllcorner: Option<f64>,
    yllcorner: Option<f64>,
    xllcenter: Option<f64>,
    yllcenter: Option<f64>,
    cellsize: Option<f64>,
    nodata: Option<f64>,
}

impl Header {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "ncols" => self.ncols = Some(parse_number(key, value)?),
            "nrows" => self.nrows = Some(parse_number(key, value)?),
            "xllcorner" => self.xllcorner = Some(parse_number(key, value)?),
            "yllcorner" => self.yllcorner = Some(parse_number(key, value)?),
            "xllcenter" => self.xllcenter = Some(parse_number(key, value)?),
            "yllcenter" => self.yllcenter = Some(parse_number(key, value)?),
            "cellsize" => self.cellsize = Some(parse_number(key, value)?),
            "nodata_value" => self.nodata = Some(parse_number(key, value)?),
            other => return Err(invalid(format!("Unknown header key {}", other))),
        }
        Ok(())
    }

    fn lower_left(&self, cellsize: f64) -> Result<(f64, f64)> {
        match (self.xllcorner, self.yllcorner, self.xllcenter, self.yllcenter) {
            (Some(x), Some(y), _, _) => Ok((x, y)),
            (_, _, Some(x), Some(y)) => Ok((x - cellsize / 2.0, y - cellsize / 2.0)),
            _ => Err(invalid("Missing lower left corner".to_string())),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| invalid(format!("Invalid {} value '{}'", key, value)))
}

fn invalid(reason: String) -> GeocatError {
    GeocatError::Format { format: FORMAT_NAME.to_string(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DEM: &str = "ncols 3\nnrows 2\nxllcorner 145.0\nyllcorner -43.0\ncellsize 0.5\nNODATA_value -9999\n10 20 30\n40 -9999 60\n";

    #[test]
    fn test_parse_corner_header() {
        let grid = parse(DEM).unwrap();
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.rows, 2);
        assert_eq!((grid.min_x, grid.min_y), (145.0, -43.0));
        assert_eq!((grid.max_x, grid.max_y), (146.5, -42.0));
        assert_eq!(grid.no_data, Some(-9999.0));
        assert_eq!(grid.samples[4], None);
    }

    #[test]
    fn test_parse_center_header() {
        let content = "ncols 1\nnrows 1\nxllcenter 0.5\nyllcenter 0.5\ncellsize 1\n7\n";
        let grid = parse(content).unwrap();
        assert_eq!((grid.min_x, grid.min_y, grid.max_x, grid.max_y), (0.0, 0.0, 1.0, 1.0));
        assert_eq!(grid.no_data, None);
    }

    #[test]
    fn test_parse_missing_header() {
        assert!(parse("ncols 1\nnrows 1\ncellsize 1\n7\n").is_err());
        assert!(parse("ncols 1\nxllcorner 0\nyllcorner 0\ncellsize 1\n7\n").is_err());
    }

    #[test]
    fn test_parse_huge_header_is_format_error() {
        let overflow = format!("ncols {}\nnrows 4\nxllcorner 0\nyllcorner 0\ncellsize 1\n7\n", usize::MAX);
        assert!(matches!(parse(&overflow), Err(GeocatError::Format { .. })));

        let huge = "ncols 4000000000\nnrows 4000000000\nxllcorner 0\nyllcorner 0\ncellsize 1\n7\n";
        assert!(matches!(parse(huge), Err(GeocatError::Format { .. })));
    }

    #[test]
    fn test_accepts_and_reads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dem.asc");
        fs::write(&path, DEM).unwrap();

        let format = ArcGridFormat;
        assert!(format.accepts(&path));
        let reader = format.reader(&path).unwrap();
        assert_eq!(reader.format_name(), "ArcGrid");
        assert_eq!(reader.original_envelope().max_x, 146.5);
    }
}
