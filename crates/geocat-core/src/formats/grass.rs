//! GRASS ASCII raster format

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{GeocatError, Result};
use crate::formats::ascii_grid::{first_line, AsciiGrid, AsciiGridReader};
use crate::formats::{GridCoverageReader, GridFormat};

const FORMAT_NAME: &str = "GRASS";

/// Token GRASS writes for null cells unless the header overrides it
const DEFAULT_NULL_TOKEN: &str = "*";

/// GRASS ASCII raster (`north:`, `south:`, `east:`, `west:`, `rows:`, `cols:` header)
#[derive(Debug, Clone, Copy, Default)]
pub struct GrassFormat;

impl GridFormat for GrassFormat {
    fn name(&self) -> &str {
        FORMAT_NAME
    }

    fn description(&self) -> &str {
        "GRASS ASCII raster format"
    }

    fn accepts(&self, path: &Path) -> bool {
        first_line(path)
            .and_then(|line| line.split_once(':').map(|(key, _)| key.trim().to_ascii_lowercase()))
            .map(|key| matches!(key.as_str(), "north" | "south" | "east" | "west" | "rows" | "cols"))
            .unwrap_or(false)
    }

    fn reader(&self, path: &Path) -> Result<Arc<dyn GridCoverageReader>> {
        let content = fs::read_to_string(path)?;
        let grid = parse(&content)?;
        Ok(Arc::new(AsciiGridReader::new(FORMAT_NAME, path, grid)?))
    }
}

/// Parse a GRASS ASCII raster document
pub fn parse(content: &str) -> Result<AsciiGrid> {
    let mut north = None;
    let mut south = None;
    let mut east = None;
    let mut west = None;
    let mut rows = None;
    let mut cols = None;
    let mut null_token = DEFAULT_NULL_TOKEN.to_string();
    let mut body = Vec::new();

    for line in content.lines() {
        match line.split_once(':') {
            Some((key, value)) if body.is_empty() => {
                let value = value.trim();
                match key.trim().to_ascii_lowercase().as_str() {
                    "north" => north = Some(parse_number("north", value)?),
                    "south" => south = Some(parse_number("south", value)?),
                    "east" => east = Some(parse_number("east", value)?),
                    "west" => west = Some(parse_number("west", value)?),
                    "rows" => rows = Some(parse_number("rows", value)?),
                    "cols" => cols = Some(parse_number("cols", value)?),
                    "null" => null_token = value.to_string(),
                    // type and multiplier do not change the decoded values we expose
                    "type" | "multiplier" => {}
                    other => return Err(invalid(format!("Unknown header key {}", other))),
                }
            }
            _ => body.push(line),
        }
    }

    let require = |value: Option<f64>, key: &str| value.ok_or_else(|| invalid(format!("Missing {}", key)));
    let (north, south) = (require(north, "north")?, require(south, "south")?);
    let (east, west) = (require(east, "east")?, require(west, "west")?);
    let rows: usize = rows.ok_or_else(|| invalid("Missing rows".to_string()))?;
    let cols: usize = cols.ok_or_else(|| invalid("Missing cols".to_string()))?;

    let no_data = null_token.parse::<f64>().ok();
    let samples = AsciiGrid::parse_samples(
        FORMAT_NAME,
        &body.join("\n"),
        cols,
        rows,
        no_data,
        Some(null_token.as_str()),
    )?;

    Ok(AsciiGrid { cols, rows, min_x: west, min_y: south, max_x: east, max_y: north, no_data, samples })
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| invalid(format!("Invalid {} value '{}'", key, value)))
}

fn invalid(reason: String) -> GeocatError {
    GeocatError::Format { format: FORMAT_NAME.to_string(), reason }
}
