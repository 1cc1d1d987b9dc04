//! Massif list (GeoJSON feature collection) source.

pub mod parser;
