use crate::model::{FlightCategory, Impact, WeatherPhenomenon, Wind};

const STRONG_WIND_KT: u16 = 20;
const GUST_KT: u16 = 25;

/// Hazard tags for one group. Duplicates are kept; see `ParsedBulletin::impacts`.
pub fn derive(
    category: FlightCategory,
    alternate_required: bool,
    wind: Option<&Wind>,
    weather: &[WeatherPhenomenon],
) -> Vec<Impact> {
    let mut impacts = Vec::new();

    if category == FlightCategory::Ifr {
        impacts.push(Impact::BelowVfrMinima);
    }
    if alternate_required {
        impacts.push(Impact::AlternateRequired);
    }

    if let Some(wind) = wind {
        if wind.speed_knots() > STRONG_WIND_KT {
            impacts.push(Impact::StrongWinds);
        }
        if let Some(gust) = wind.gust_knots().filter(|g| *g > GUST_KT) {
            impacts.push(Impact::Gusts(gust));
        }
        if wind.is_variable() {
            impacts.push(Impact::VariableWinds);
        }
    }

    for wx in weather {
        let code = wx.code.as_str();
        if code.contains("TS") {
            impacts.push(Impact::Thunderstorms);
        }
        if code.contains("FZ") {
            impacts.push(Impact::FreezingPrecip);
        }
        if code.contains("GR") || code.contains("GS") {
            impacts.push(Impact::Hail);
        }
        if code.contains("FG") {
            impacts.push(Impact::Fog);
        }
        if code.contains("SN") {
            impacts.push(Impact::Snow);
        }
        if code.contains("+RA") {
            impacts.push(Impact::HeavyRain);
        }
    }

    impacts
}
