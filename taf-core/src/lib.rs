//! Core library for the `taf` CLI.
//!
//! This crate defines:
//! - The decoded forecast model (groups, wind, visibility, cloud, weather)
//! - The decoder that builds that model from raw bulletin text
//! - Flight category, alternate-requirement and hazard classification
//! - Configuration handling (decode minima, output preferences)
//!
//! It is used by `taf-cli`, but can also be reused by other binaries or services.
//!
//! ```
//! let bulletin = taf_core::decode("TAF YPJT 061130Z 0612/0712 02012KT 9999 SCT010 BKN015");
//! assert_eq!(bulletin.station, "YPJT");
//! assert_eq!(bulletin.worst_category, taf_core::FlightCategory::Vfr);
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod model;
pub mod time;

pub use config::{Config, OutputFormat};
pub use decoder::{Decoder, Minima, normalize};
pub use error::TafError;
pub use model::{
    CloudCoverage, CloudLayer, ConvectiveType, DayTime, Decoded, FlightCategory, ForecastGroup,
    GroupKind, Impact, ImpactSeverity, ParsedBulletin, ValidityWindow, Visibility,
    WeatherPhenomenon, Wind, WindDirection, WindUnit,
};
pub use time::IssueMonth;

/// Decode a bulletin with the default minima (1,500 ft ceiling, 8,000 m visibility).
pub fn decode(raw: &str) -> ParsedBulletin {
    Decoder::default().decode(raw)
}
