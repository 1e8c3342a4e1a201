use chrono::NaiveDateTime;
use std::fmt::Write;

use taf_core::decoder::fields::UNRESTRICTED_VISIBILITY_M;
use taf_core::{
    DayTime, FlightCategory, ForecastGroup, GroupKind, ImpactSeverity, IssueMonth, ParsedBulletin,
    Wind, WindDirection,
};

const ONE_NAUTICAL_MILE_M: u32 = 1852;

fn hh(t: Option<DayTime>) -> String {
    t.map_or_else(|| "--".to_string(), |t| format!("{:02}", t.hour))
}

/// Short time heading for a group, e.g. `FROM 15:00Z` or `TEMPO 00-04Z`.
pub fn time_label(group: &ForecastGroup, bulletin: &ParsedBulletin) -> String {
    match group.kind {
        GroupKind::Base => format!("VALID {}", bulletin.validity.raw),
        GroupKind::From => match group.start {
            Some(t) => format!("FROM {:02}:{:02}Z", t.hour, t.minute),
            None => "FROM --:--Z".to_string(),
        },
        GroupKind::Becoming => format!("BECOMING {}-{}Z", hh(group.start), hh(group.end)),
        kind => format!("{kind} {}-{}Z", hh(group.start), hh(group.end)),
    }
}

fn wind_text(wind: &Wind) -> String {
    let direction = match wind.direction {
        WindDirection::Heading(deg) => format!("{deg:03}°"),
        WindDirection::Variable => "VRB".to_string(),
    };
    let unit = wind.unit.as_str();
    match wind.gust {
        Some(gust) => format!("{direction} / {} gusting {gust}{unit}", wind.speed),
        None => format!("{direction} / {}{unit}", wind.speed),
    }
}

fn stamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%MZ").to_string()
}

fn resolved(
    month: Option<IssueMonth>,
    bulletin: &ParsedBulletin,
    t: Option<DayTime>,
) -> Option<String> {
    month?.resolve(bulletin.validity.start_day, t?).map(stamp)
}

/// Group-by-group timeline of the bulletin.
pub fn timeline(bulletin: &ParsedBulletin, month: Option<IssueMonth>) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "{}  VALID {}  {}",
        bulletin.station, bulletin.validity.raw, bulletin.worst_category
    );
    if bulletin.alternate_required {
        out.push_str("  ALTERNATE REQUIRED");
    }
    out.push('\n');
    if let Some((start, end)) = month.and_then(|m| m.validity(&bulletin.validity)) {
        let _ = writeln!(out, "{} -> {}", stamp(start), stamp(end));
    }

    for group in &bulletin.groups {
        out.push('\n');
        let _ = write!(out, "{:<18} {}", time_label(group, bulletin), group.flight_category);
        if group.alternate_required {
            out.push_str("  ALT REQ");
        }
        out.push('\n');

        if let Some(at) = resolved(month, bulletin, group.start) {
            let _ = writeln!(out, "  starts:  {at}");
        }
        if let Some(wind) = &group.wind {
            let _ = writeln!(out, "  wind:    {}", wind_text(wind));
        }
        if let Some(vis) = &group.visibility {
            let _ = writeln!(out, "  vis:     {} ({} m)", vis.display, vis.meters);
        }
        if !group.clouds.is_empty() {
            let layers: Vec<String> = group.clouds.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "  cloud:   {}", layers.join(" "));
        }
        for wx in &group.weather {
            match wx.description() {
                "" => {
                    let _ = writeln!(out, "  wx:      {} (unrecognized)", wx.code);
                }
                phrase => {
                    let _ = writeln!(out, "  wx:      {} ({phrase})", wx.code);
                }
            }
        }
        if !group.impacts.is_empty() {
            let tags: Vec<String> = group.impacts.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "  impacts: {}", tags.join(", "));
        }
    }

    out
}

/// Plain-language overview of the whole bulletin.
pub fn summary(bulletin: &ParsedBulletin) -> String {
    let Some(base) = bulletin.groups.first() else {
        return "No forecast data available.".to_string();
    };

    let mut text = format!(
        "Forecast for {}. Starts with {} conditions. ",
        bulletin.station, base.flight_category
    );

    match &base.wind {
        Some(wind) => {
            let from = match wind.direction {
                WindDirection::Heading(deg) => format!("{deg}°"),
                WindDirection::Variable => "variable directions".to_string(),
            };
            let _ = write!(text, "Winds from {from} at {} knots", wind.speed_knots());
            if let Some(gust) = wind.gust_knots() {
                let _ = write!(text, " gusting to {gust} knots");
            }
            text.push_str(". ");
        }
        None => text.push_str("Winds calm or not specified. "),
    }

    let mut phrases: Vec<&str> = Vec::new();
    for wx in bulletin.groups.iter().flat_map(|g| g.weather.iter()) {
        let phrase = wx.description();
        if !phrase.is_empty() && !phrases.contains(&phrase) {
            phrases.push(phrase);
        }
    }
    if phrases.is_empty() {
        text.push_str("No significant weather phenomena forecast. ");
    } else {
        let _ = write!(text, "Expect {} during the period. ", phrases.join(", ").to_lowercase());
    }

    if let Some(group) = bulletin.groups.iter().find(|g| g.flight_category == FlightCategory::Ifr) {
        let when = match (group.kind, group.start, group.end) {
            (GroupKind::From, Some(start), _) => {
                format!("after {:02}:{:02}Z", start.hour, start.minute)
            }
            (_, Some(start), Some(end)) => {
                format!("between {:02}Z and {:02}Z", start.hour, end.hour)
            }
            _ => "temporarily".to_string(),
        };
        let _ = write!(text, "Be alert for IFR conditions {when}. ");
    }

    if bulletin.alternate_required {
        text.push_str("A destination alternate aerodrome is required for this flight. ");
    }

    let mut out = text.trim_end().to_string();
    let impacts = bulletin.impacts();
    let headings = [(ImpactSeverity::Severe, "Severe"), (ImpactSeverity::Moderate, "Moderate")];
    for (severity, heading) in headings {
        let tags: Vec<String> =
            impacts.iter().filter(|i| i.severity() == severity).map(ToString::to_string).collect();
        if !tags.is_empty() {
            let _ = write!(out, "\n{heading}: {}", tags.join(", "));
        }
    }
    if impacts.is_empty() {
        out.push_str("\nNo significant operational hazards forecast.");
    }
    out.push('\n');
    out.push_str(&stats(bulletin));
    out
}

/// One-line figures for the whole period: peak wind, lowest visibility, weather.
fn stats(bulletin: &ParsedBulletin) -> String {
    let wind = bulletin
        .peak_wind_knots()
        .map_or_else(|| "--".to_string(), |kt| format!("{kt} KT"));
    let visibility = match bulletin.lowest_visibility() {
        Some(v) if v.meters < ONE_NAUTICAL_MILE_M => "< 1NM".to_string(),
        Some(v) if v.meters < UNRESTRICTED_VISIBILITY_M => v.display.clone(),
        _ => "P6NM".to_string(),
    };
    let any_weather = bulletin.groups.iter().any(|g| !g.weather.is_empty());
    let weather = if any_weather { "YES" } else { "NONE" };

    format!("Max wind: {wind} | Min vis: {visibility} | Weather: {weather}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const YPJT: &str = "YPJT 061130Z 0612/0712 02012KT 9999 SCT010 BKN015 FM061500 01015G25KT \
                        5000 -RA BR BKN010 BECMG 0620/0622 34020G30KT PROB30 0700/0704 2000 TSRA OVC009CB";

    #[test]
    fn time_labels_per_kind() {
        let b = taf_core::decode(YPJT);
        let labels: Vec<String> = b.groups.iter().map(|g| time_label(g, &b)).collect();
        assert_eq!(
            labels,
            vec!["VALID 0612/0712", "FROM 15:00Z", "BECOMING 20-22Z", "PROB30 00-04Z"]
        );
    }

    #[test]
    fn timeline_lists_every_group() {
        let b = taf_core::decode(YPJT);
        let out = timeline(&b, None);

        assert!(out.starts_with("YPJT  VALID 0612/0712  IFR  ALTERNATE REQUIRED\n"));
        assert!(out.contains("  wind:    340° / 20 gusting 30KT"));
        assert!(out.contains("  cloud:   OVC009CB"));
        assert!(out.contains("  wx:      TSRA (Thunderstorm With Rain)"));
        assert!(out.contains("  impacts: Gusts 30kt"));
    }

    #[test]
    fn timeline_resolves_absolute_times() {
        let b = taf_core::decode(YPJT);
        let month = IssueMonth::new(2026, 10);
        let out = timeline(&b, month);

        assert!(out.contains("2026-10-06 12:00Z -> 2026-10-07 12:00Z"));
        assert!(out.contains("  starts:  2026-10-06 15:00Z"));
    }

    #[test]
    fn summary_reads_like_a_briefing() {
        let b = taf_core::decode(YPJT);
        let out = summary(&b);

        assert!(out.starts_with("Forecast for YPJT. Starts with VFR conditions."));
        assert!(out.contains("Winds from 20° at 12 knots."));
        assert!(out.contains("Expect light rain, mist, thunderstorm with rain during the period."));
        assert!(out.contains("Be alert for IFR conditions after 15:00Z."));
        assert!(out.contains("Severe: Below VFR Minima, Alternate Required, Gusts 30kt, Thunderstorms"));
        assert!(out.ends_with("\nMax wind: 30 KT | Min vis: 1.1NM | Weather: YES\n"));
    }

    #[test]
    fn stats_for_quiet_and_poor_bulletins() {
        let quiet = taf_core::decode("YPJT 0612/0712 02012KT CAVOK");
        assert!(summary(&quiet).ends_with("Max wind: 12 KT | Min vis: P6NM | Weather: NONE\n"));

        let foggy = taf_core::decode("YPJT 0612/0712 0800 FG VV002");
        assert!(summary(&foggy).ends_with("Max wind: -- | Min vis: < 1NM | Weather: YES\n"));
    }

    #[test]
    fn summary_of_empty_bulletin() {
        assert_eq!(summary(&taf_core::decode("")), "No forecast data available.");
    }
}
