use regex::Regex;
use roxmltree::{Document, Node};
use std::sync::LazyLock;

use crate::types::{
    AvalancheSituation, Bulletin, DayTwoEstimate, DepthLevel, FreshSnow, Risk, RiskHistoryEntry,
    RiskZone, SlopeExposure, SnowDepth, SnowDepthDay, SnowMeasurement, Stability, Weather,
    WeatherForecast, Wind, BULLETIN_TYPE,
};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Integer placeholder the provider uses for "value not applicable".
const NOT_APPLICABLE: i32 = -1;

/// Collapses internal whitespace runs to single spaces and trims both ends
/// (the XSLT `normalize-space` behavior).
pub fn normalize_whitespace(input: &str) -> String {
    WHITESPACE_RE
        .replace_all(input.trim(), " ")
        .trim()
        .to_string()
}

/// Attribute value of `element`, or `""` when the element is absent or the
/// attribute is missing or empty. Never fails.
pub fn attr(element: Option<Node>, name: &str) -> String {
    element
        .and_then(|node| node.attribute(name))
        .filter(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Normalized text of the named child element, or `""` when either the
/// parent or the child is absent.
pub fn child_text(element: Option<Node>, tag: &str) -> String {
    let text = child(element, tag)
        .and_then(|node| node.text())
        .unwrap_or_default();
    normalize_whitespace(text)
}

/// Empty or non-numeric input is absent; valid integers pass through
/// unchanged, including negative sentinels like `-1`. Remapping a sentinel
/// to absent is the calling field's own convention, never done here.
pub fn to_int_or_null(raw: &str) -> Option<i32> {
    if raw.is_empty() {
        return None;
    }
    raw.trim().parse().ok()
}

/// Field-convention remap for codes where `-1` means "not applicable".
pub fn sentinel_to_absent(value: Option<i32>) -> Option<i32> {
    value.filter(|&v| v != NOT_APPLICABLE)
}

fn child<'a, 'input>(parent: Option<Node<'a, 'input>>, tag: &str) -> Option<Node<'a, 'input>> {
    parent.and_then(|node| node.children().find(|c| c.has_tag_name(tag)))
}

fn children<'a, 'input>(parent: Option<Node<'a, 'input>>, tag: &str) -> Vec<Node<'a, 'input>> {
    match parent {
        Some(node) => node.children().filter(|c| c.has_tag_name(tag)).collect(),
        None => Vec::new(),
    }
}

/// Risk cartouche (`CARTOUCHERISQUE`). Zone 2 and the altitude threshold are
/// only meaningful when the bulletin splits risk by elevation, but the zone
/// record is emitted regardless, with empty fields.
pub fn parse_risk(section: Option<Node>) -> Risk {
    let risk = child(section, "RISQUE");
    let slope = child(section, "PENTE");

    Risk {
        risque_max: attr(risk, "RISQUEMAXI"),
        risque_1: RiskZone {
            valeur: attr(risk, "RISQUE1"),
            evolution: attr(risk, "EVOLURISQUE1"),
            localisation: attr(risk, "LOC1"),
        },
        risque_2: RiskZone {
            valeur: attr(risk, "RISQUE2"),
            evolution: attr(risk, "EVOLURISQUE2"),
            localisation: attr(risk, "LOC2"),
        },
        altitude_limite: to_int_or_null(&attr(risk, "ALTITUDE")),
        commentaire: normalize_whitespace(&attr(risk, "COMMENTAIRE")),
        naturel: child_text(section, "NATUREL"),
        accidentel: child_text(section, "ACCIDENTEL"),
        resume: child_text(section, "RESUME"),
        estimation_j2: DayTwoEstimate {
            date: attr(risk, "DATE_RISQUE_J2"),
            risque_max: attr(risk, "RISQUEMAXIJ2"),
            description: child_text(section, "RisqueJ2"),
            commentaire: child_text(section, "CommentaireRisqueJ2"),
        },
        pentes_particulieres: SlopeExposure {
            ne: to_int_or_null(&attr(slope, "NE")),
            e: to_int_or_null(&attr(slope, "E")),
            se: to_int_or_null(&attr(slope, "SE")),
            s: to_int_or_null(&attr(slope, "S")),
            sw: to_int_or_null(&attr(slope, "SW")),
            w: to_int_or_null(&attr(slope, "W")),
            nw: to_int_or_null(&attr(slope, "NW")),
            n: to_int_or_null(&attr(slope, "N")),
            commentaire: normalize_whitespace(&attr(slope, "COMMENTAIRE")),
        },
        historique: Vec::new(),
    }
}

/// Stability (`STABILITE`): the situation list holds 0, 1 or 2 codes, each
/// appended only when present and non-empty, never padded.
pub fn parse_stability(section: Option<Node>) -> Stability {
    let situations = child(section, "SitAvalTyp");
    let mut situations_avalancheuses = Vec::new();
    for name in ["SAT1", "SAT2"] {
        let code = attr(situations, name);
        if !code.is_empty() {
            situations_avalancheuses.push(AvalancheSituation { type_: code });
        }
    }

    Stability {
        situations_avalancheuses,
        titre: child_text(section, "TITRE"),
        texte: child_text(section, "TEXTE"),
    }
}

fn depth_levels(section: Option<Node>) -> Vec<DepthLevel> {
    children(section, "NIVEAU")
        .into_iter()
        .map(|level| {
            let level = Some(level);
            DepthLevel {
                altitude: to_int_or_null(&attr(level, "ALTI")),
                nord: to_int_or_null(&attr(level, "N")),
                sud: to_int_or_null(&attr(level, "S")),
            }
        })
        .collect()
}

/// Snowpack depth (`ENNEIGEMENT`).
pub fn parse_snow_depth(section: Option<Node>) -> SnowDepth {
    SnowDepth {
        date: attr(section, "DATE"),
        limite_sud: to_int_or_null(&attr(section, "LimiteSud")),
        limite_nord: to_int_or_null(&attr(section, "LimiteNord")),
        niveaux: depth_levels(section),
        historique: Vec::new(),
    }
}

fn snow_measurements(section: Option<Node>) -> Vec<SnowMeasurement> {
    children(section, "NEIGE24H")
        .into_iter()
        .map(|measurement| {
            let measurement = Some(measurement);
            SnowMeasurement {
                date: attr(measurement, "DATE"),
                min: to_int_or_null(&attr(measurement, "SS24Min")),
                max: to_int_or_null(&attr(measurement, "SS24Max")),
            }
        })
        .collect()
}

/// Fresh snow (`NEIGEFRAICHE`).
pub fn parse_fresh_snow(section: Option<Node>) -> FreshSnow {
    FreshSnow {
        altitude_ss: to_int_or_null(&attr(section, "ALTITUDESS")),
        mesures: snow_measurements(section),
        historique: Vec::new(),
    }
}

fn forecast_entries(section: Option<Node>) -> Vec<WeatherForecast> {
    children(section, "ECHEANCE")
        .into_iter()
        .map(|entry| {
            let entry = Some(entry);
            WeatherForecast {
                date: attr(entry, "DATE"),
                vent: Wind {
                    force_1: to_int_or_null(&attr(entry, "FF1")),
                    direction_1: attr(entry, "DD1"),
                    force_2: to_int_or_null(&attr(entry, "FF2")),
                    direction_2: attr(entry, "DD2"),
                },
                iso_0: to_int_or_null(&attr(entry, "ISO0")),
                pluie_neige: to_int_or_null(&attr(entry, "PLUIENEIGE")),
                // The significant-weather code uses -1 for "not applicable";
                // the other integer fields keep the raw value.
                temps_sensible: sentinel_to_absent(to_int_or_null(&attr(entry, "TEMPSSENSIBLE"))),
                mer_nuages: to_int_or_null(&attr(entry, "MERNUAGES")),
            }
        })
        .collect()
}

/// Weather outlook (`METEO`).
pub fn parse_weather(section: Option<Node>) -> Weather {
    Weather {
        altitude_vent_1: to_int_or_null(&attr(section, "ALTITUDEVENT1")),
        altitude_vent_2: to_int_or_null(&attr(section, "ALTITUDEVENT2")),
        commentaire: child_text(section, "COMMENTAIRE"),
        echeances: forecast_entries(section),
        echeances_historique: Vec::new(),
    }
}

/// Risk history days under `BSH/RISQUES`.
pub fn parse_risk_history(summary: Option<Node>) -> Vec<RiskHistoryEntry> {
    children(child(summary, "RISQUES"), "RISQUE")
        .into_iter()
        .map(|day| {
            let day = Some(day);
            RiskHistoryEntry {
                date: attr(day, "DATE"),
                risque_max: attr(day, "RISQUEMAXI"),
            }
        })
        .collect()
}

/// Snow-depth history days under `BSH/ENNEIGEMENTS`.
pub fn parse_snow_depth_history(summary: Option<Node>) -> Vec<SnowDepthDay> {
    children(child(summary, "ENNEIGEMENTS"), "ENNEIGEMENT")
        .into_iter()
        .map(|day| {
            let day = Some(day);
            SnowDepthDay {
                date: attr(day, "DATE"),
                limite_sud: to_int_or_null(&attr(day, "LimiteSud")),
                limite_nord: to_int_or_null(&attr(day, "LimiteNord")),
                niveaux: depth_levels(day),
            }
        })
        .collect()
}

/// Fresh-snow history under `BSH/NEIGEFRAICHE`.
pub fn parse_fresh_snow_history(summary: Option<Node>) -> Vec<SnowMeasurement> {
    snow_measurements(child(summary, "NEIGEFRAICHE"))
}

/// Parses one bulletin document into its canonical form.
///
/// The only failure is malformed markup; any missing subsection, attribute
/// or history subtree degrades to defaults. Current sections are parsed
/// first, then the `BSH` summary subtree is folded into the per-topic
/// `historique` fields (empty vectors when `BSH` is absent).
pub fn parse_bulletin(xml: &str) -> Result<Bulletin, String> {
    let document =
        Document::parse(xml).map_err(|e| format!("Failed to parse bulletin XML: {e}"))?;
    let root = Some(document.root_element());
    let summary = child(root, "BSH");

    let mut risque = parse_risk(child(root, "CARTOUCHERISQUE"));
    risque.historique = parse_risk_history(summary);

    let mut enneigement = parse_snow_depth(child(root, "ENNEIGEMENT"));
    enneigement.historique = parse_snow_depth_history(summary);

    let mut neige_fraiche = parse_fresh_snow(child(root, "NEIGEFRAICHE"));
    neige_fraiche.historique = parse_fresh_snow_history(summary);

    let mut meteo = parse_weather(child(root, "METEO"));
    meteo.echeances_historique = forecast_entries(child(summary, "METEO"));

    Ok(Bulletin {
        type_: BULLETIN_TYPE.to_string(),
        id: attr(root, "ID"),
        massif: attr(root, "MASSIF"),
        date_bulletin: attr(root, "DATEBULLETIN"),
        date_echeance: attr(root, "DATEECHEANCE"),
        date_validite: attr(root, "DATEVALIDITE"),
        date_diffusion: attr(root, "DATEDIFFUSION"),
        amendement: attr(root, "AMENDEMENT") == "true",
        risque,
        stabilite: parse_stability(child(root, "STABILITE")),
        qualite: child_text(child(root, "QUALITE"), "TEXTE"),
        enneigement,
        neige_fraiche,
        meteo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_integers_and_preserves_sentinels() {
        assert_eq!(to_int_or_null(""), None);
        assert_eq!(to_int_or_null("42"), Some(42));
        assert_eq!(to_int_or_null("abc"), None);
        assert_eq!(to_int_or_null("-1"), Some(-1));
        assert_eq!(to_int_or_null("true"), None);
    }

    #[test]
    fn sentinel_remap_is_a_separate_policy() {
        assert_eq!(sentinel_to_absent(Some(-1)), None);
        assert_eq!(sentinel_to_absent(Some(0)), Some(0));
        assert_eq!(sentinel_to_absent(Some(61)), Some(61));
        assert_eq!(sentinel_to_absent(None), None);
    }

    #[test]
    fn normalizes_whitespace_runs() {
        assert_eq!(normalize_whitespace("  a \n  b\t c  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn accessors_default_on_absent_elements() {
        assert_eq!(attr(None, "ID"), "");
        assert_eq!(child_text(None, "TEXTE"), "");
    }

    #[test]
    fn section_parsers_return_default_records_for_absent_sections() {
        assert_eq!(parse_risk(None), crate::types::Risk::default());
        assert_eq!(parse_stability(None), crate::types::Stability::default());
        assert_eq!(parse_snow_depth(None), crate::types::SnowDepth::default());
        assert_eq!(parse_fresh_snow(None), crate::types::FreshSnow::default());
        assert_eq!(parse_weather(None), crate::types::Weather::default());
    }
}
