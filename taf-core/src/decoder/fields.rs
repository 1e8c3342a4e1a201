//! Extractors for the fields of one group.
//!
//! Every extractor works on whole tokens of the group text and returns
//! nothing (or an empty list) when its field is absent.

use crate::decoder::{phenomenon, segment};
use crate::model::{
    CloudCoverage, CloudLayer, ConvectiveType, DayTime, Visibility, WeatherPhenomenon, Wind,
    WindDirection, WindUnit,
};

/// Stored for `P6SM`/`CAVOK`; finite so comparisons stay well-defined.
pub const UNRESTRICTED_VISIBILITY_M: u32 = 10_000;
const METERS_PER_STATUTE_MILE: f64 = 1609.34;
const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

const WEATHER_INDICATORS: &[&str] = &["TS", "RA", "SN", "BR", "FG", "HZ"];
const GROUP_PREFIXES: &[&str] = &["FM", "BECMG", "TEMPO", "PROB"];
const MAX_WEATHER_TOKEN_LEN: usize = 8;

/// Non-empty run of ASCII digits. `str::parse` alone would accept a sign.
fn digits<T: std::str::FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn speed(s: &str) -> Option<u16> {
    if (2..=3).contains(&s.len()) { digits(s) } else { None }
}

fn parse_wind(token: &str) -> Option<Wind> {
    let (body, unit) = if let Some(body) = token.strip_suffix("KT") {
        (body, WindUnit::Knots)
    } else if let Some(body) = token.strip_suffix("MPS") {
        (body, WindUnit::MetersPerSecond)
    } else {
        return None;
    };

    let direction = match body.get(..3)? {
        "VRB" => WindDirection::Variable,
        heading => WindDirection::Heading(digits(heading)?),
    };

    let rest = body.get(3..)?;
    let (mean, gust) = match rest.split_once('G') {
        Some((mean, gust)) => (speed(mean)?, Some(speed(gust)?)),
        None => (speed(rest)?, None),
    };

    Some(Wind { direction, speed: mean, gust: gust.filter(|g| *g > mean), unit })
}

/// First wind token (`dddffKT`, `VRBffGggKT`, `dddffMPS`, ...).
pub fn wind(text: &str) -> Option<Wind> {
    text.split_whitespace().find_map(parse_wind)
}

fn fraction(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/')?;
    let num: u32 = digits(num)?;
    let den: u32 = digits(den)?;
    if den == 0 {
        return None;
    }
    Some(f64::from(num) / f64::from(den))
}

/// Statute-mile reading ending at `tokens[i]`: `10SM`, `1/2SM`, `M1/4SM` or `1 1/2SM`.
fn statute_miles(tokens: &[&str], i: usize) -> Option<Visibility> {
    let body = tokens[i].strip_suffix("SM")?;
    let body = body.strip_prefix('M').unwrap_or(body);

    let (miles, display) = if body.contains('/') {
        let part = fraction(body)?;
        let whole = i
            .checked_sub(1)
            .and_then(|p| tokens.get(p))
            .filter(|t| t.len() <= 2)
            .and_then(|t| digits::<u32>(t).map(|w| (w, *t)));
        match whole {
            Some((w, prefix)) => (f64::from(w) + part, format!("{prefix} {}", tokens[i])),
            None => (part, tokens[i].to_string()),
        }
    } else {
        (f64::from(digits::<u32>(body)?), tokens[i].to_string())
    };

    Some(Visibility { meters: (miles * METERS_PER_STATUTE_MILE).round() as u32, display })
}

/// `HHHH` made of two hours (00-24), as in a change period without days.
fn is_hour_pair(token: &str) -> bool {
    let hour = |s: Option<&str>| s.and_then(digits::<u8>).is_some_and(|h| h <= 24);
    token.len() == 4 && hour(token.get(..2)) && hour(token.get(2..))
}

/// An hour-pair period directly after `BECMG`/`TEMPO`/`PROBnn`.
fn is_change_period(tokens: &[&str], i: usize) -> bool {
    let follows_change = i
        .checked_sub(1)
        .and_then(|p| tokens.get(p))
        .is_some_and(|t| segment::is_marker(t) && !segment::is_from_time(t));
    follows_change && is_hour_pair(tokens[i])
}

fn nautical_display(meters: u32) -> String {
    let nm = (f64::from(meters) / METERS_PER_NAUTICAL_MILE * 10.0).round() / 10.0;
    format!("{nm}NM")
}

/// Prevailing visibility, checked in priority order: the unrestricted marker,
/// a statute-mile reading, then a bare four-digit meters token after the wind.
pub fn visibility(text: &str) -> Option<Visibility> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    if tokens.iter().any(|t| *t == "P6SM" || *t == "CAVOK") {
        return Some(Visibility {
            meters: UNRESTRICTED_VISIBILITY_M,
            display: "10km+".to_string(),
        });
    }

    if let Some(vis) = (0..tokens.len()).find_map(|i| statute_miles(&tokens, i)) {
        return Some(vis);
    }

    let after_wind = tokens.iter().position(|t| parse_wind(t).is_some()).map_or(0, |i| i + 1);
    (after_wind..tokens.len())
        .filter(|&i| tokens[i].len() == 4 && !is_change_period(&tokens, i))
        .find_map(|i| digits::<u32>(tokens[i]))
        .map(|meters| Visibility { meters, display: nautical_display(meters) })
}

fn parse_layer(token: &str) -> Option<CloudLayer> {
    const COVERAGES: &[(&str, CloudCoverage)] = &[
        ("FEW", CloudCoverage::Few),
        ("SCT", CloudCoverage::Scattered),
        ("BKN", CloudCoverage::Broken),
        ("OVC", CloudCoverage::Overcast),
        ("VV", CloudCoverage::VerticalVisibility),
    ];

    let (rest, coverage) = COVERAGES
        .iter()
        .find_map(|(code, coverage)| token.strip_prefix(code).map(|rest| (rest, *coverage)))?;

    let altitude: u16 = digits(rest.get(..3)?)?;
    let convective = match rest.get(3..)? {
        "" => None,
        "CB" => Some(ConvectiveType::Cumulonimbus),
        "TCU" => Some(ConvectiveType::ToweringCumulus),
        // type not observed
        "///" => None,
        _ => return None,
    };

    Some(CloudLayer { coverage, altitude: Some(altitude), convective })
}

/// Every numeric layer in order, then a single SKC/NSC layer if either appears.
pub fn clouds(text: &str) -> Vec<CloudLayer> {
    let mut layers: Vec<CloudLayer> = text.split_whitespace().filter_map(parse_layer).collect();

    let has = |code: &str| text.split_whitespace().any(|t| t == code);
    if has("SKC") {
        layers.push(CloudLayer::clear(CloudCoverage::SkyClear));
    } else if has("NSC") {
        layers.push(CloudLayer::clear(CloudCoverage::NoSignificantCloud));
    }

    layers
}

fn is_weather_token(token: &str) -> bool {
    token.len() < MAX_WEATHER_TOKEN_LEN
        && WEATHER_INDICATORS.iter().any(|code| token.contains(code))
        && !GROUP_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
        && !token.contains('/')
}

/// Significant weather tokens, decoded. Unrecognized codes are kept.
pub fn weather(text: &str) -> Vec<WeatherPhenomenon> {
    text.split_whitespace()
        .filter(|t| is_weather_token(t))
        .map(|code| WeatherPhenomenon { code: code.to_string(), decoded: phenomenon::decode(code) })
        .collect()
}

fn day_hour(s: &str) -> Option<DayTime> {
    if s.len() != 4 {
        return None;
    }
    Some(DayTime { day: digits(s.get(..2)?)?, hour: digits(s.get(2..)?)?, minute: 0 })
}

/// First `DDHH/DDHH` token, with the token itself.
pub fn window(text: &str) -> Option<(&str, DayTime, DayTime)> {
    text.split_whitespace().find_map(|token| {
        let (start, end) = token.split_once('/')?;
        Some((token, day_hour(start)?, day_hour(end)?))
    })
}

/// Start time carried by an `FMddhhmm` marker.
pub fn from_time(token: &str) -> Option<DayTime> {
    if !segment::is_from_time(token) {
        return None;
    }
    Some(DayTime {
        day: digits(&token[2..4])?,
        hour: digits(&token[4..6])?,
        minute: digits(&token[6..8])?,
    })
}
