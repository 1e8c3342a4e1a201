//! Weather code → plain-language phrase.
//!
//! Codes are read strictly left to right: an optional intensity sign, at most
//! one descriptor, then any run of two-letter phenomenon codes.

use crate::model::Decoded;

const INTENSITIES: &[(&str, &str)] = &[("-", "Light"), ("+", "Heavy")];

struct Descriptor {
    code: &'static str,
    name: &'static str,
    /// Word linking the descriptor to the phenomena that follow it.
    joiner: Option<&'static str>,
}

/// Checked in this order; the first match wins.
const DESCRIPTORS: &[Descriptor] = &[
    Descriptor { code: "VC", name: "Vicinity", joiner: None },
    Descriptor { code: "MI", name: "Shallow", joiner: None },
    Descriptor { code: "BC", name: "Patches", joiner: Some("Of") },
    Descriptor { code: "DR", name: "Low Drifting", joiner: None },
    Descriptor { code: "BL", name: "Blowing", joiner: None },
    Descriptor { code: "SH", name: "Showers", joiner: Some("Of") },
    Descriptor { code: "TS", name: "Thunderstorm", joiner: Some("With") },
    Descriptor { code: "FZ", name: "Freezing", joiner: None },
];

const PHENOMENA: &[(&str, &str)] = &[
    ("RA", "Rain"),
    ("SN", "Snow"),
    ("SG", "Snow Grains"),
    ("DZ", "Drizzle"),
    ("GR", "Hail"),
    ("GS", "Small Hail"),
    ("PL", "Ice Pellets"),
    ("FG", "Fog"),
    ("BR", "Mist"),
    ("HZ", "Haze"),
    ("FU", "Smoke"),
    ("DU", "Dust"),
    ("SA", "Sand"),
    ("SQ", "Squall"),
    ("FC", "Funnel Cloud"),
    ("SS", "Sandstorm"),
    ("DS", "Duststorm"),
    ("VA", "Volcanic Ash"),
];

fn phenomenon(chunk: &str) -> Option<&'static str> {
    PHENOMENA.iter().find(|(code, _)| *code == chunk).map(|(_, phrase)| *phrase)
}

/// Decode a raw weather code such as `-SHRA` or `TSRA`.
pub fn decode(code: &str) -> Decoded {
    let mut words: Vec<&'static str> = Vec::new();
    let mut rest = code;

    if let Some((sign, phrase)) = INTENSITIES.iter().find(|(sign, _)| rest.starts_with(sign)) {
        words.push(*phrase);
        rest = &rest[sign.len()..];
    }

    let descriptor = DESCRIPTORS.iter().find(|d| rest.starts_with(d.code));
    if let Some(d) = descriptor {
        rest = &rest[d.code.len()..];
    }

    let mut phenomena = Vec::new();
    while let Some(phrase) = rest.get(..2).and_then(phenomenon) {
        phenomena.push(phrase);
        rest = &rest[2..];
    }

    if let Some(d) = descriptor {
        words.push(d.name);
        // A joiner with nothing after it is dropped: "TS" reads "Thunderstorm".
        if let Some(joiner) = d.joiner.filter(|_| !phenomena.is_empty()) {
            words.push(joiner);
        }
    }
    words.extend(phenomena);

    if words.is_empty() { Decoded::Unrecognized } else { Decoded::Phrase(words.join(" ")) }
}
