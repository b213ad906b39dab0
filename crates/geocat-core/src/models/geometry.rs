//! Referencing types shared by every catalog resource.

use geo::{coord, Rect};
use serde::{Deserialize, Serialize};

/// Coordinate Reference System identified by EPSG code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs {
    pub epsg: u32,
    pub name: String,
    /// Whether coordinates are longitude/latitude degrees
    pub geographic: bool,
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl Crs {
    pub fn new(epsg: u32, name: impl Into<String>, geographic: bool) -> Self {
        Self { epsg, name: name.into(), geographic }
    }

    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::new(4326, "WGS 84", true)
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Self::new(3857, "WGS 84 / Pseudo-Mercator", false)
    }

    /// Authority code in `EPSG:<code>` form
    pub fn srs(&self) -> String {
        format!("EPSG:{}", self.epsg)
    }
}

/// Axis-aligned bounding box in a given CRS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencedEnvelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub crs: Crs,
}

impl ReferencedEnvelope {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64, crs: Crs) -> Self {
        Self { min_x, min_y, max_x, max_y, crs }
    }

    /// The whole world in WGS 84, used when a resource declares no bounds
    pub fn world() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0, Crs::wgs84())
    }

    /// Build from a `geo` rectangle
    pub fn from_rect(rect: Rect<f64>, crs: Crs) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y, crs)
    }

    /// Convert to a `geo` rectangle (the CRS is dropped)
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(coord! { x: self.min_x, y: self.min_y }, coord! { x: self.max_x, y: self.max_y })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check whether a point falls inside the envelope (edges included)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Rule governing how the declared CRS relates to the native one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectionPolicy {
    /// Use the native CRS as is
    #[default]
    None,
    /// Ignore the native CRS and use the declared one
    ForceDeclared,
    /// Reproject from the native CRS to the declared one
    ReprojectToDeclared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_envelope() {
        let world = ReferencedEnvelope::world();
        assert_eq!(world.width(), 360.0);
        assert_eq!(world.height(), 180.0);
        assert_eq!(world.crs.epsg, 4326);
        assert!(world.contains(115.0, -8.5));
    }

    #[test]
    fn test_rect_conversion() {
        let env = ReferencedEnvelope::new(145.0, -43.5, 148.5, -40.0, Crs::wgs84());
        let rect = env.to_rect();
        assert_eq!(rect.min().x, 145.0);
        assert_eq!(rect.max().y, -40.0);
        assert_eq!(ReferencedEnvelope::from_rect(rect, Crs::wgs84()), env);
    }

    #[test]
    fn test_srs_string() {
        assert_eq!(Crs::wgs84().srs(), "EPSG:4326");
        assert_eq!(Crs::web_mercator().srs(), "EPSG:3857");
    }
}
