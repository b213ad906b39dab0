//! Referencing module: CRS decoding and envelope transforms through PROJ.

pub mod crs;

pub use crs::{decode, parse_srs, to_lat_lon};
