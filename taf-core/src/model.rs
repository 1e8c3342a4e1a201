use serde::{Deserialize, Serialize};
use std::fmt;

/// Station identifier used when no four-letter code is found.
pub const UNKNOWN: &str = "UNKNOWN";

const KNOTS_PER_MPS: f64 = 1.943_844;

/// Coarse flyability classification of one group (or of a whole bulletin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightCategory {
    Vfr,
    Ifr,
}

impl FlightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Ifr => "IFR",
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindDirection {
    /// True heading in degrees.
    Heading(u16),
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindUnit {
    Knots,
    MetersPerSecond,
}

impl WindUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindUnit::Knots => "KT",
            WindUnit::MetersPerSecond => "MPS",
        }
    }
}

/// Forecast surface wind. `gust`, when present, is always above `speed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub direction: WindDirection,
    pub speed: u16,
    pub gust: Option<u16>,
    pub unit: WindUnit,
}

impl Wind {
    /// Mean speed expressed in knots.
    pub fn speed_knots(&self) -> u16 {
        to_knots(self.speed, self.unit)
    }

    /// Gust speed expressed in knots.
    pub fn gust_knots(&self) -> Option<u16> {
        self.gust.map(|g| to_knots(g, self.unit))
    }

    pub fn is_variable(&self) -> bool {
        self.direction == WindDirection::Variable
    }
}

fn to_knots(value: u16, unit: WindUnit) -> u16 {
    match unit {
        WindUnit::Knots => value,
        WindUnit::MetersPerSecond => (f64::from(value) * KNOTS_PER_MPS).round() as u16,
    }
}

/// Prevailing visibility normalized to meters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub meters: u32,
    /// Human-facing rendering of the reading, e.g. "5.4NM", "1 1/2SM" or "10km+".
    pub display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudCoverage {
    Few,
    Scattered,
    Broken,
    Overcast,
    VerticalVisibility,
    NoSignificantCloud,
    SkyClear,
}

impl CloudCoverage {
    pub fn code(&self) -> &'static str {
        match self {
            CloudCoverage::Few => "FEW",
            CloudCoverage::Scattered => "SCT",
            CloudCoverage::Broken => "BKN",
            CloudCoverage::Overcast => "OVC",
            CloudCoverage::VerticalVisibility => "VV",
            CloudCoverage::NoSignificantCloud => "NSC",
            CloudCoverage::SkyClear => "SKC",
        }
    }

    /// Coverages that can form a ceiling.
    pub fn is_ceiling(&self) -> bool {
        matches!(
            self,
            CloudCoverage::Broken | CloudCoverage::Overcast | CloudCoverage::VerticalVisibility
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvectiveType {
    Cumulonimbus,
    ToweringCumulus,
}

impl ConvectiveType {
    pub fn code(&self) -> &'static str {
        match self {
            ConvectiveType::Cumulonimbus => "CB",
            ConvectiveType::ToweringCumulus => "TCU",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub coverage: CloudCoverage,
    /// Base in hundreds of feet. Never set for SKC/NSC layers.
    pub altitude: Option<u16>,
    pub convective: Option<ConvectiveType>,
}

impl CloudLayer {
    pub fn clear(coverage: CloudCoverage) -> Self {
        Self { coverage, altitude: None, convective: None }
    }
}

impl fmt::Display for CloudLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.coverage.code())?;
        if let Some(altitude) = self.altitude {
            write!(f, "{altitude:03}")?;
        }
        if let Some(convective) = self.convective {
            f.write_str(convective.code())?;
        }
        Ok(())
    }
}

/// Outcome of decoding a weather code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decoded {
    Phrase(String),
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherPhenomenon {
    pub code: String,
    pub decoded: Decoded,
}

impl WeatherPhenomenon {
    /// Decoded phrase, or an empty string when the code was not recognized.
    pub fn description(&self) -> &str {
        match &self.decoded {
            Decoded::Phrase(phrase) => phrase,
            Decoded::Unrecognized => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Base,
    From,
    Becoming,
    Temporary,
    Prob30,
    Prob40,
}

impl GroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Base => "BASE",
            GroupKind::From => "FM",
            GroupKind::Becoming => "BECMG",
            GroupKind::Temporary => "TEMPO",
            GroupKind::Prob30 => "PROB30",
            GroupKind::Prob40 => "PROB40",
        }
    }

    pub fn is_probability(&self) -> bool {
        matches!(self, GroupKind::Prob30 | GroupKind::Prob40)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day-of-month / hour / minute in UTC, as carried by the bulletin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpactSeverity {
    Severe,
    Moderate,
}

/// Plain-language operational hazard derived for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    BelowVfrMinima,
    AlternateRequired,
    StrongWinds,
    /// Gust speed in knots.
    Gusts(u16),
    VariableWinds,
    Thunderstorms,
    FreezingPrecip,
    Hail,
    Fog,
    Snow,
    HeavyRain,
}

impl Impact {
    pub fn severity(&self) -> ImpactSeverity {
        match self {
            Impact::BelowVfrMinima
            | Impact::AlternateRequired
            | Impact::StrongWinds
            | Impact::Gusts(_)
            | Impact::Thunderstorms
            | Impact::FreezingPrecip => ImpactSeverity::Severe,
            Impact::VariableWinds | Impact::Hail | Impact::Fog | Impact::Snow | Impact::HeavyRain => {
                ImpactSeverity::Moderate
            }
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::BelowVfrMinima => f.write_str("Below VFR Minima"),
            Impact::AlternateRequired => f.write_str("Alternate Required"),
            Impact::StrongWinds => f.write_str("Strong Winds"),
            Impact::Gusts(kt) => write!(f, "Gusts {kt}kt"),
            Impact::VariableWinds => f.write_str("Variable Winds"),
            Impact::Thunderstorms => f.write_str("Thunderstorms"),
            Impact::FreezingPrecip => f.write_str("Freezing Precip"),
            Impact::Hail => f.write_str("Hail"),
            Impact::Fog => f.write_str("Fog"),
            Impact::Snow => f.write_str("Snow"),
            Impact::HeavyRain => f.write_str("Heavy Rain"),
        }
    }
}

/// One temporal segment of a bulletin with its derived classifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastGroup {
    pub kind: GroupKind,
    pub start: Option<DayTime>,
    pub end: Option<DayTime>,
    /// Percentage for PROB30/PROB40 groups.
    pub probability: Option<u8>,
    pub wind: Option<Wind>,
    pub visibility: Option<Visibility>,
    pub clouds: Vec<CloudLayer>,
    pub weather: Vec<WeatherPhenomenon>,
    pub raw_text: String,
    pub flight_category: FlightCategory,
    pub alternate_required: bool,
    pub impacts: Vec<Impact>,
}

/// Overall validity period (`DDHH/DDHH`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub start_day: u8,
    pub start_hour: u8,
    pub end_day: u8,
    pub end_hour: u8,
    pub raw: String,
}

impl ValidityWindow {
    pub fn unknown() -> Self {
        Self { start_day: 0, start_hour: 0, end_day: 0, end_hour: 0, raw: UNKNOWN.to_string() }
    }

    pub fn is_known(&self) -> bool {
        self.raw != UNKNOWN
    }
}

/// Fully decoded bulletin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBulletin {
    pub station: String,
    pub validity: ValidityWindow,
    /// Whitespace-normalized input.
    pub raw_text: String,
    pub groups: Vec<ForecastGroup>,
    /// IFR iff at least one group is IFR.
    pub worst_category: FlightCategory,
    pub alternate_required: bool,
}

impl ParsedBulletin {
    /// Impacts of every group with duplicates removed, in first-seen order.
    pub fn impacts(&self) -> Vec<Impact> {
        let mut seen = Vec::new();
        for impact in self.groups.iter().flat_map(|g| g.impacts.iter()) {
            if !seen.contains(impact) {
                seen.push(*impact);
            }
        }
        seen
    }

    /// Highest gust (or mean speed where no gust is given) across all groups, in knots.
    pub fn peak_wind_knots(&self) -> Option<u16> {
        self.groups
            .iter()
            .filter_map(|g| g.wind.as_ref())
            .map(|w| w.gust_knots().unwrap_or_else(|| w.speed_knots()))
            .max()
    }

    pub fn lowest_visibility(&self) -> Option<&Visibility> {
        self.groups.iter().filter_map(|g| g.visibility.as_ref()).min_by_key(|v| v.meters)
    }

    /// True when nothing usable could be extracted from the input.
    pub fn is_unparsed(&self) -> bool {
        self.groups.is_empty() && self.station == UNKNOWN
    }
}
