//! EPSG decoding and envelope transforms backed by PROJ.

use proj::Proj;

use crate::error::{GeocatError, Result};
use crate::models::{Crs, ReferencedEnvelope};

/// Display names of the codes used by the test corpus: (code, name, geographic)
const EPSG_NAMES: &[(u32, &str, bool)] = &[
    (4326, "WGS 84", true),
    (4269, "NAD83", true),
    (4267, "NAD27", true),
    (3857, "WGS 84 / Pseudo-Mercator", false),
    (32615, "WGS 84 / UTM zone 15N", false),
    (26713, "NAD27 / UTM zone 13N", false),
];

/// Legacy Google Mercator code, an alias of EPSG:3857
const GOOGLE_MERCATOR: u32 = 900913;

/// Decode an EPSG authority code into a CRS
///
/// Codes outside the name table are accepted when PROJ knows them.
pub fn decode(code: u32) -> Result<Crs> {
    let code = if code == GOOGLE_MERCATOR { 3857 } else { code };

    if let Some((epsg, name, geographic)) = EPSG_NAMES.iter().find(|(epsg, _, _)| *epsg == code) {
        return Ok(Crs::new(*epsg, *name, *geographic));
    }

    let definition = format!("EPSG:{}", code);
    let proj = Proj::new(&definition).map_err(|_| GeocatError::UnknownCrs { code })?;
    let geographic = proj.def().map(|def| def.contains("proj=longlat")).unwrap_or(false);

    Ok(Crs::new(code, definition, geographic))
}

/// Decode an `EPSG:<code>` string
pub fn parse_srs(srs: &str) -> Result<Crs> {
    let code = srs
        .trim()
        .strip_prefix("EPSG:")
        .or_else(|| srs.trim().strip_prefix("epsg:"))
        .and_then(|code| code.trim().parse::<u32>().ok())
        .ok_or_else(|| GeocatError::ConfigInvalid {
            key: "srs".to_string(),
            reason: format!("Expected EPSG:<code>, got '{}'", srs),
        })?;
    decode(code)
}

/// Transform an envelope into a WGS 84 longitude/latitude envelope
///
/// The four corners are reprojected and the result is their bounding box.
pub fn to_lat_lon(envelope: &ReferencedEnvelope) -> Result<ReferencedEnvelope> {
    let wgs84 = Crs::wgs84();
    if envelope.crs.epsg == wgs84.epsg {
        return Ok(ReferencedEnvelope { crs: wgs84, ..envelope.clone() });
    }

    let from_proj = envelope.crs.srs();
    let to_proj = wgs84.srs();
    let proj = Proj::new_known_crs(&from_proj, &to_proj, None).map_err(|e| GeocatError::Format {
        format: "referencing".to_string(),
        reason: format!("Failed to create projection from {} to {}: {}", from_proj, to_proj, e),
    })?;

    let corners = [
        (envelope.min_x, envelope.min_y),
        (envelope.min_x, envelope.max_y),
        (envelope.max_x, envelope.min_y),
        (envelope.max_x, envelope.max_y),
    ];
    let projected = corners
        .into_iter()
        .map(|corner| {
            proj.convert(corner).map_err(|e| GeocatError::Format {
                format: "referencing".to_string(),
                reason: format!("Projection failed: {}", e),
            })
        })
        .collect::<Result<Vec<(f64, f64)>>>()?;

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (x, y) in projected {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    Ok(ReferencedEnvelope::new(min_x, min_y, max_x, max_y, wgs84))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Semi-major axis of the WGS 84 ellipsoid, as used by Web Mercator
    const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

    #[test]
    fn test_decode_known_codes() {
        assert_eq!(decode(4326).unwrap(), Crs::wgs84());
        assert_eq!(decode(3857).unwrap(), Crs::web_mercator());
        assert!(!decode(32615).unwrap().geographic);
    }

    #[test]
    fn test_decode_google_mercator_alias() {
        assert_eq!(decode(900913).unwrap().epsg, 3857);
    }

    #[test]
    fn test_decode_code_outside_name_table() {
        let crs = decode(32633).unwrap();
        assert_eq!(crs.epsg, 32633);
        assert_eq!(crs.srs(), "EPSG:32633");
        assert!(!crs.geographic);
    }

    #[test]
    fn test_decode_unknown_code() {
        let err = decode(1234).unwrap_err();
        assert!(matches!(err, GeocatError::UnknownCrs { code: 1234 }));
    }

    #[test]
    fn test_parse_srs() {
        assert_eq!(parse_srs("EPSG:4326").unwrap().epsg, 4326);
        assert_eq!(parse_srs(" epsg:32615 ").unwrap().epsg, 32615);
        assert!(parse_srs("CRS:84").is_err());
    }

    #[test]
    fn test_wgs84_envelope_unchanged() {
        let env = ReferencedEnvelope::new(145.0, -43.5, 148.5, -40.0, Crs::wgs84());
        let lat_lon = to_lat_lon(&env).unwrap();
        assert_eq!(lat_lon, env);
    }

    #[test]
    fn test_geographic_envelope_stays_in_place() {
        let env = ReferencedEnvelope::new(-100.0, 30.0, -90.0, 40.0, decode(4269).unwrap());
        let lat_lon = to_lat_lon(&env).unwrap();
        assert_eq!(lat_lon.crs.epsg, 4326);
        assert!((lat_lon.min_x + 100.0).abs() < 1e-3);
        assert!((lat_lon.max_y - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_web_mercator_to_lat_lon() {
        let quarter = std::f64::consts::FRAC_PI_2 * WEB_MERCATOR_RADIUS;
        let env = ReferencedEnvelope::new(-quarter, 0.0, quarter, 0.0, Crs::web_mercator());
        let lat_lon = to_lat_lon(&env).unwrap();
        assert!((lat_lon.min_x + 90.0).abs() < 1e-6);
        assert!((lat_lon.max_x - 90.0).abs() < 1e-6);
        assert!(lat_lon.min_y.abs() < 1e-6);
    }

    #[test]
    fn test_utm_to_lat_lon() {
        // central meridian of zone 15N is 93W
        let env = ReferencedEnvelope::new(400_000.0, 4_400_000.0, 600_000.0, 4_600_000.0, decode(32615).unwrap());
        let lat_lon = to_lat_lon(&env).unwrap();
        assert_eq!(lat_lon.crs, Crs::wgs84());
        assert!(lat_lon.min_x < -93.0 && lat_lon.max_x > -93.0);
        assert!(lat_lon.min_y > 39.0 && lat_lon.max_y < 42.0);
    }
}
