use serde::{Deserialize, Serialize};

/// `type` discriminator carried by every serialized bulletin.
pub const BULLETIN_TYPE: &str = "bulletins_neige_avalanche";

/// Canonical form of one avalanche/mountain-weather bulletin.
///
/// Serde field names are the wire contract consumed by presentation
/// components; they must not change even when the upstream XML evolves.
/// Every topic record is always populated — a missing XML subsection only
/// produces absent/default fields inside the record, never a missing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bulletin {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: String,
    pub massif: String,
    #[serde(rename = "dateBulletin")]
    pub date_bulletin: String,
    #[serde(rename = "dateEcheance")]
    pub date_echeance: String,
    #[serde(rename = "dateValidite")]
    pub date_validite: String,
    #[serde(rename = "dateDiffusion")]
    pub date_diffusion: String,
    pub amendement: bool,
    pub risque: Risk,
    pub stabilite: Stability,
    pub qualite: String,
    pub enneigement: SnowDepth,
    pub neige_fraiche: FreshSnow,
    pub meteo: Weather,
}

/// Risk cartouche: headline danger level, per-elevation zones, day-2
/// estimate, slope exposures and the recent-days history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub risque_max: String,
    pub risque_1: RiskZone,
    pub risque_2: RiskZone,
    pub altitude_limite: Option<i32>,
    pub commentaire: String,
    pub naturel: String,
    pub accidentel: String,
    pub resume: String,
    pub estimation_j2: DayTwoEstimate,
    pub pentes_particulieres: SlopeExposure,
    pub historique: Vec<RiskHistoryEntry>,
}

/// One elevation band of the risk cartouche. Zone 2 exists in every
/// bulletin; its fields stay empty when the bulletin has no elevation split
/// (downstream decides whether to show it based on `altitude_limite`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskZone {
    pub valeur: String,
    pub evolution: String,
    pub localisation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayTwoEstimate {
    pub date: String,
    pub risque_max: String,
    pub description: String,
    pub commentaire: String,
}

/// Danger indicators for the 8 compass directions of the slope rose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlopeExposure {
    #[serde(rename = "NE")]
    pub ne: Option<i32>,
    #[serde(rename = "E")]
    pub e: Option<i32>,
    #[serde(rename = "SE")]
    pub se: Option<i32>,
    #[serde(rename = "S")]
    pub s: Option<i32>,
    #[serde(rename = "SW")]
    pub sw: Option<i32>,
    #[serde(rename = "W")]
    pub w: Option<i32>,
    #[serde(rename = "NW")]
    pub nw: Option<i32>,
    #[serde(rename = "N")]
    pub n: Option<i32>,
    pub commentaire: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskHistoryEntry {
    pub date: String,
    pub risque_max: String,
}

/// Snowpack stability: up to two typical avalanche situation codes plus the
/// forecaster's narrative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stability {
    pub situations_avalancheuses: Vec<AvalancheSituation>,
    pub titre: String,
    pub texte: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvalancheSituation {
    #[serde(rename = "type")]
    pub type_: String,
}

/// Snowpack depth report: snow limits per aspect and depth readings per
/// altitude level, with per-day history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowDepth {
    pub date: String,
    pub limite_sud: Option<i32>,
    pub limite_nord: Option<i32>,
    pub niveaux: Vec<DepthLevel>,
    pub historique: Vec<SnowDepthDay>,
}

/// One historical day of the snow-depth report (same shape as the current
/// report, without further nesting).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowDepthDay {
    pub date: String,
    pub limite_sud: Option<i32>,
    pub limite_nord: Option<i32>,
    pub niveaux: Vec<DepthLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub altitude: Option<i32>,
    pub nord: Option<i32>,
    pub sud: Option<i32>,
}

/// Fresh-snow measurements at the reference altitude, with history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreshSnow {
    pub altitude_ss: Option<i32>,
    pub mesures: Vec<SnowMeasurement>,
    pub historique: Vec<SnowMeasurement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowMeasurement {
    pub date: String,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

/// Weather outlook: wind reference altitudes, narrative, and the forecast
/// entries (current horizon plus observed history).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub altitude_vent_1: Option<i32>,
    pub altitude_vent_2: Option<i32>,
    pub commentaire: String,
    pub echeances: Vec<WeatherForecast>,
    pub echeances_historique: Vec<WeatherForecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub date: String,
    pub vent: Wind,
    pub iso_0: Option<i32>,
    pub pluie_neige: Option<i32>,
    pub temps_sensible: Option<i32>,
    pub mer_nuages: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub force_1: Option<i32>,
    pub direction_1: String,
    pub force_2: Option<i32>,
    pub direction_2: String,
}

/// One massif entry of the department index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassifInfo {
    pub title: String,
    pub code: String,
}
