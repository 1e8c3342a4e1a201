use tracing::debug;

use crate::model::{
    CloudLayer, DayTime, FlightCategory, ForecastGroup, GroupKind, ParsedBulletin, UNKNOWN,
    ValidityWindow, Visibility, WeatherPhenomenon, Wind,
};

pub mod fields;
pub mod impacts;
pub mod phenomenon;
pub mod rules;
pub mod segment;

pub use rules::{CeilingVisibility, Minima};
pub use segment::normalize;

/// Turns raw bulletin text into a [`ParsedBulletin`].
///
/// Decoding never fails: anything that cannot be recognized is left out of
/// the model (or falls back to `"UNKNOWN"`), so a best-effort result is
/// always returned.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    minima: Minima,
}

impl Decoder {
    pub fn new(minima: Minima) -> Self {
        Self { minima }
    }

    pub fn minima(&self) -> &Minima {
        &self.minima
    }

    pub fn decode(&self, raw: &str) -> ParsedBulletin {
        let text = normalize(raw);

        let groups: Vec<ForecastGroup> = segment::segment(&text)
            .iter()
            .enumerate()
            .map(|(index, group)| GroupFields::extract(index, group).derive(&self.minima))
            .collect();

        let worst_category = if groups.iter().any(|g| g.flight_category == FlightCategory::Ifr) {
            FlightCategory::Ifr
        } else {
            FlightCategory::Vfr
        };
        let alternate_required = groups.iter().any(|g| g.alternate_required);

        let bulletin = ParsedBulletin {
            station: station(&text),
            validity: validity(&text),
            groups,
            worst_category,
            alternate_required,
            raw_text: text,
        };

        debug!(
            station = %bulletin.station,
            groups = bulletin.groups.len(),
            category = %bulletin.worst_category,
            alternate = bulletin.alternate_required,
            "decoded bulletin"
        );
        bulletin
    }
}

/// First bare four-letter uppercase token.
fn station(text: &str) -> String {
    text.split_whitespace()
        .find(|t| t.len() == 4 && t.bytes().all(|b| b.is_ascii_uppercase()))
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn validity(text: &str) -> ValidityWindow {
    match fields::window(text) {
        Some((raw, start, end)) => ValidityWindow {
            start_day: start.day,
            start_hour: start.hour,
            end_day: end.day,
            end_hour: end.hour,
            raw: raw.to_string(),
        },
        None => ValidityWindow::unknown(),
    }
}

fn kind_of(marker: &str) -> GroupKind {
    match marker {
        "BECMG" => GroupKind::Becoming,
        "TEMPO" => GroupKind::Temporary,
        "PROB30" => GroupKind::Prob30,
        "PROB40" => GroupKind::Prob40,
        m if segment::is_from_time(m) => GroupKind::From,
        // Segmentation only starts later groups on a marker.
        _ => GroupKind::Base,
    }
}

/// Group content read straight from the text, before any derivation.
#[derive(Debug)]
struct GroupFields {
    kind: GroupKind,
    start: Option<DayTime>,
    end: Option<DayTime>,
    probability: Option<u8>,
    wind: Option<Wind>,
    visibility: Option<Visibility>,
    clouds: Vec<CloudLayer>,
    weather: Vec<WeatherPhenomenon>,
    raw_text: String,
}

impl GroupFields {
    fn extract(index: usize, text: &str) -> Self {
        let marker = text.split_whitespace().next().unwrap_or_default();
        let kind = if index == 0 { GroupKind::Base } else { kind_of(marker) };

        let (start, end) = match kind {
            GroupKind::Base => (None, None),
            GroupKind::From => (fields::from_time(marker), None),
            _ => match fields::window(text) {
                Some((_, start, end)) => (Some(start), Some(end)),
                None => (None, None),
            },
        };

        let probability = if kind.is_probability() {
            marker.strip_prefix("PROB").and_then(|p| p.parse().ok())
        } else {
            None
        };

        Self {
            kind,
            start,
            end,
            probability,
            wind: fields::wind(text),
            visibility: fields::visibility(text),
            clouds: fields::clouds(text),
            weather: fields::weather(text),
            raw_text: text.to_string(),
        }
    }

    fn derive(self, minima: &Minima) -> ForecastGroup {
        let cv = CeilingVisibility::of(self.visibility.as_ref(), &self.clouds);
        let flight_category = rules::flight_category(&cv, minima);
        let alternate_required =
            rules::alternate_required(&cv, minima, self.kind, self.probability, &self.weather);
        let impacts =
            impacts::derive(flight_category, alternate_required, self.wind.as_ref(), &self.weather);

        debug!(
            kind = %self.kind,
            category = %flight_category,
            ceiling = ?cv.ceiling,
            visibility_m = cv.visibility_m,
            "decoded group"
        );

        ForecastGroup {
            kind: self.kind,
            start: self.start,
            end: self.end,
            probability: self.probability,
            wind: self.wind,
            visibility: self.visibility,
            clouds: self.clouds,
            weather: self.weather,
            raw_text: self.raw_text,
            flight_category,
            alternate_required,
            impacts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Impact;

    #[test]
    fn station_and_validity_are_found_anywhere() {
        let b = Decoder::default().decode("TAF AMD YSSY 061130Z 0612/0718 02012KT 9999 FEW030");
        assert_eq!(b.station, "YSSY");
        assert_eq!(b.validity.raw, "0612/0718");
        assert_eq!((b.validity.start_day, b.validity.start_hour), (6, 12));
        assert_eq!((b.validity.end_day, b.validity.end_hour), (7, 18));
    }

    #[test]
    fn garbage_degrades_to_unknown() {
        let b = Decoder::default().decode("hello there");
        assert_eq!(b.station, UNKNOWN);
        assert_eq!(b.validity, ValidityWindow::unknown());
        assert_eq!(b.groups.len(), 1);
        assert_eq!(b.worst_category, FlightCategory::Vfr);
    }

    #[test]
    fn empty_input_has_no_groups() {
        let b = Decoder::default().decode("  \n ");
        assert!(b.is_unparsed());
        assert!(!b.alternate_required);
        assert_eq!(b.raw_text, "");
    }

    #[test]
    fn group_kinds_and_times() {
        let b = Decoder::default().decode(
            "YPJT 0612/0712 02012KT 9999 FM061530 01015KT 9999 TEMPO 0700/0703 5000 SHRA \
             PROB40 0703/0705 3000 BECMG 0706/0708 VRB03KT",
        );
        let kinds: Vec<GroupKind> = b.groups.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![
                GroupKind::Base,
                GroupKind::From,
                GroupKind::Temporary,
                GroupKind::Prob40,
                GroupKind::Becoming
            ]
        );

        let base = &b.groups[0];
        assert_eq!((base.start, base.end), (None, None));

        let fm = &b.groups[1];
        assert_eq!(fm.start, Some(DayTime { day: 6, hour: 15, minute: 30 }));
        assert_eq!(fm.end, None);

        let tempo = &b.groups[2];
        assert_eq!(tempo.start, Some(DayTime { day: 7, hour: 0, minute: 0 }));
        assert_eq!(tempo.end, Some(DayTime { day: 7, hour: 3, minute: 0 }));
        assert_eq!(tempo.probability, None);

        let prob = &b.groups[3];
        assert_eq!(prob.probability, Some(40));
        assert!(prob.alternate_required);
        assert!(prob.impacts.contains(&Impact::BelowVfrMinima));

        let becmg = &b.groups[4];
        assert!(becmg.impacts.contains(&Impact::VariableWinds));
    }

    #[test]
    fn change_group_without_window_has_no_times() {
        let b = Decoder::default().decode("YPJT 0612/0712 02012KT BECMG 34020KT");
        assert_eq!(b.groups[1].kind, GroupKind::Becoming);
        assert_eq!((b.groups[1].start, b.groups[1].end), (None, None));
    }

    #[test]
    fn custom_minima_change_the_category() {
        let text = "YPJT 0612/0712 02012KT 6000 BKN012";
        assert_eq!(Decoder::default().decode(text).worst_category, FlightCategory::Ifr);

        let relaxed = Decoder::new(Minima::new(10, 5000).expect("valid minima"));
        assert_eq!(relaxed.decode(text).worst_category, FlightCategory::Vfr);
    }
}
