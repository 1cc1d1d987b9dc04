use std::collections::HashMap;

use crate::runtime::fetcher::Fetcher;
use crate::sources::{bra, massifs};
use crate::types::{Bulletin, MassifInfo};

/// Météo-France DPBRA portal.
pub const DEFAULT_BASE_URL: &str = "https://public-api.meteofrance.fr/public/DPBRA/v1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Image products exposed by the upstream API per massif.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    RosePentes,
    MontagneRisques,
    MontagneEnneigement,
    GrapheNeigeFraiche,
    ApercuMeteo,
    SeptDerniersJours,
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::RosePentes => "rose-pentes",
            ImageKind::MontagneRisques => "montagne-risques",
            ImageKind::MontagneEnneigement => "montagne-enneigement",
            ImageKind::GrapheNeigeFraiche => "graphe-neige-fraiche",
            ImageKind::ApercuMeteo => "apercu-meteo",
            ImageKind::SeptDerniersJours => "sept-derniers-jours",
        }
    }
}

/// Client for the avalanche-bulletin API. Fetching is delegated to the
/// `Fetcher` so tests can feed canned responses; the transformation itself
/// stays pure and memoization-free.
pub struct DpbraClient {
    base_url: String,
    fetcher: Box<dyn Fetcher>,
}

impl DpbraClient {
    pub fn new(base_url: impl Into<String>, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetcher,
        }
    }

    /// Fetches and parses the avalanche bulletin for one massif.
    pub async fn bulletin(&self, massif_id: &str) -> Result<Bulletin, String> {
        let url = format!(
            "{}/massif/BRA?id-massif={}&format=xml",
            self.base_url,
            urlencoding::encode(massif_id)
        );
        let xml = self.fetcher.fetch(&url).await?;
        bra::parser::parse_bulletin(&xml)
    }

    /// Fetches the massif list and groups it by department.
    pub async fn massifs(&self) -> Result<HashMap<String, Vec<MassifInfo>>, String> {
        let url = format!("{}/liste-massifs", self.base_url);
        let json = self.fetcher.fetch(&url).await?;
        massifs::parser::parse_massif_index(&json)
    }

    /// Fetches one of the per-massif image products.
    pub async fn image(&self, kind: ImageKind, massif_id: &str) -> Result<Vec<u8>, String> {
        let url = format!(
            "{}/massif/image/{}?id-massif={}",
            self.base_url,
            kind.as_str(),
            urlencoding::encode(massif_id)
        );
        self.fetcher.fetch_bytes(&url).await
    }
}
