//! Flight category and alternate-aerodrome rules.

use serde::{Deserialize, Serialize};

use crate::decoder::fields::UNRESTRICTED_VISIBILITY_M;
use crate::error::TafError;
use crate::model::{CloudLayer, FlightCategory, GroupKind, Visibility, WeatherPhenomenon};

/// Thresholds below which a group is IFR and forces alternate planning.
/// Both comparisons are strict: a reading equal to the minimum is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minima {
    /// Hundreds of feet.
    pub ceiling_hundreds_ft: u16,
    pub visibility_m: u32,
}

impl Default for Minima {
    fn default() -> Self {
        Self { ceiling_hundreds_ft: 15, visibility_m: 8_000 }
    }
}

impl Minima {
    pub fn new(ceiling_hundreds_ft: u16, visibility_m: u32) -> Result<Self, TafError> {
        let minima = Self { ceiling_hundreds_ft, visibility_m };
        minima.validate()?;
        Ok(minima)
    }

    pub fn validate(&self) -> Result<(), TafError> {
        if self.ceiling_hundreds_ft == 0 {
            return Err(TafError::InvalidMinima("ceiling must be above zero".into()));
        }
        if self.visibility_m == 0 {
            return Err(TafError::InvalidMinima("visibility must be above zero".into()));
        }
        Ok(())
    }
}

/// Ceiling and visibility of one group, computed once and shared by both rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CeilingVisibility {
    /// Lowest BKN/OVC/VV base in hundreds of feet; `None` means no ceiling.
    pub ceiling: Option<u16>,
    pub visibility_m: u32,
}

impl CeilingVisibility {
    pub fn of(visibility: Option<&Visibility>, clouds: &[CloudLayer]) -> Self {
        let ceiling = clouds
            .iter()
            .filter(|layer| layer.coverage.is_ceiling())
            .filter_map(|layer| layer.altitude)
            .min();
        let visibility_m = visibility.map_or(UNRESTRICTED_VISIBILITY_M, |v| v.meters);

        Self { ceiling, visibility_m }
    }

    pub fn below(&self, minima: &Minima) -> bool {
        self.visibility_m < minima.visibility_m
            || self.ceiling.is_some_and(|c| c < minima.ceiling_hundreds_ft)
    }
}

pub fn flight_category(cv: &CeilingVisibility, minima: &Minima) -> FlightCategory {
    if cv.below(minima) { FlightCategory::Ifr } else { FlightCategory::Vfr }
}

pub fn alternate_required(
    cv: &CeilingVisibility,
    minima: &Minima,
    kind: GroupKind,
    probability: Option<u8>,
    weather: &[WeatherPhenomenon],
) -> bool {
    let below_minima = cv.below(minima);
    let probable = kind.is_probability() && probability.is_some_and(|p| p >= 30);
    let thunderstorm = weather.iter().any(|wx| wx.code.contains("TS"));

    below_minima || probable || thunderstorm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CloudCoverage, Decoded};

    fn layer(coverage: CloudCoverage, altitude: u16) -> CloudLayer {
        CloudLayer { coverage, altitude: Some(altitude), convective: None }
    }

    fn vis(meters: u32) -> Visibility {
        Visibility { meters, display: String::new() }
    }

    #[test]
    fn ceiling_ignores_few_scattered_and_clear_layers() {
        let clouds = vec![
            layer(CloudCoverage::Few, 5),
            layer(CloudCoverage::Scattered, 8),
            CloudLayer::clear(CloudCoverage::SkyClear),
            layer(CloudCoverage::Overcast, 40),
            layer(CloudCoverage::Broken, 25),
        ];
        assert_eq!(CeilingVisibility::of(None, &clouds).ceiling, Some(25));
        assert_eq!(CeilingVisibility::of(None, &[]).ceiling, None);
        assert_eq!(CeilingVisibility::of(None, &[]).visibility_m, 10_000);
    }

    #[test]
    fn ceiling_boundary() {
        let minima = Minima::default();
        let at = CeilingVisibility::of(None, &[layer(CloudCoverage::Broken, 15)]);
        let below = CeilingVisibility::of(None, &[layer(CloudCoverage::VerticalVisibility, 14)]);

        assert_eq!(flight_category(&at, &minima), FlightCategory::Vfr);
        assert_eq!(flight_category(&below, &minima), FlightCategory::Ifr);
    }

    #[test]
    fn visibility_boundary() {
        let minima = Minima::default();
        let at = CeilingVisibility::of(Some(&vis(8000)), &[]);
        let below = CeilingVisibility::of(Some(&vis(7999)), &[]);

        assert_eq!(flight_category(&at, &minima), FlightCategory::Vfr);
        assert_eq!(flight_category(&below, &minima), FlightCategory::Ifr);
    }

    #[test]
    fn custom_minima_move_the_thresholds() {
        let minima = Minima::new(10, 5000).expect("valid minima");
        let cv = CeilingVisibility::of(Some(&vis(6000)), &[layer(CloudCoverage::Overcast, 12)]);
        assert_eq!(flight_category(&cv, &minima), FlightCategory::Vfr);
        assert!(!alternate_required(&cv, &minima, GroupKind::Base, None, &[]));
    }

    #[test]
    fn zero_minima_are_rejected() {
        assert!(matches!(Minima::new(0, 8000), Err(TafError::InvalidMinima(_))));
        assert!(Minima::new(15, 0).is_err());
    }

    #[test]
    fn alternate_triggers() {
        let minima = Minima::default();
        let clear = CeilingVisibility::of(Some(&vis(9999)), &[]);
        let ts = WeatherPhenomenon {
            code: "VCTS".into(),
            decoded: Decoded::Phrase("Vicinity".into()),
        };

        assert!(!alternate_required(&clear, &minima, GroupKind::Temporary, None, &[]));
        assert!(alternate_required(&clear, &minima, GroupKind::Prob30, Some(30), &[]));
        assert!(alternate_required(&clear, &minima, GroupKind::Prob40, Some(40), &[]));
        assert!(alternate_required(&clear, &minima, GroupKind::Base, None, &[ts]));

        let low = CeilingVisibility::of(Some(&vis(3000)), &[]);
        assert!(alternate_required(&low, &minima, GroupKind::Base, None, &[]));
    }

    #[test]
    fn probability_on_non_probability_kind_does_not_trigger() {
        let minima = Minima::default();
        let clear = CeilingVisibility::of(None, &[]);
        assert!(!alternate_required(&clear, &minima, GroupKind::Becoming, Some(40), &[]));
    }
}
