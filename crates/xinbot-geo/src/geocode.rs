//! Geocoding client and the fallback ladder for imprecise addresses.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use xinbot_core::traits::Geocoder;

use crate::address::CITY_NAMES;

static HOUSE_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+號.*").expect("static pattern"));
static ALLEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+弄.*").expect("static pattern"));
static LANE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+巷.*").expect("static pattern"));
static CITY_DISTRICT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let cities = CITY_NAMES.join("|");
    Regex::new(&format!("^({cities})(.+?(區|市|鎮|鄉))")).expect("static pattern")
});

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Nominatim-style search client (`GET {base}/search?q=...&format=json`).
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("xin-bot/1.0")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, address: &str) -> anyhow::Result<Option<(f64, f64)>> {
        let resp = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?;
        let hits: Vec<NominatimHit> = resp.json().await?;
        let Some(hit) = hits.first() else {
            return Ok(None);
        };
        let lat: f64 = hit.lat.parse()?;
        let lon: f64 = hit.lon.parse()?;
        Ok(Some((lat, lon)))
    }
}

/// Progressively coarser variants of an address, tried in order: verbatim,
/// 臺→台, then stripping from the house number / alley / lane, finally the
/// bare city + district prefix.
pub fn fallback_variants(address: &str) -> Vec<String> {
    let mut variants = vec![address.to_string()];
    let mut push = |v: String| {
        if !v.is_empty() && !variants.contains(&v) {
            variants.push(v);
        }
    };

    if address.contains('臺') {
        push(address.replace('臺', "台"));
    }
    push(HOUSE_NO_RE.replace(address, "").into_owned());
    push(ALLEY_RE.replace(address, "").into_owned());
    push(LANE_RE.replace(address, "").into_owned());
    if let Some(caps) = CITY_DISTRICT_RE.captures(address) {
        push(format!("{}{}", &caps[1], &caps[2]));
    }
    variants
}

/// Try each fallback variant until the collaborator answers. `None` means
/// every variant missed; the caller turns that into a friendly message.
pub async fn geocode_with_fallbacks(
    geocoder: &dyn Geocoder,
    address: &str,
) -> Option<(f64, f64)> {
    for variant in fallback_variants(address) {
        match geocoder.geocode(&variant).await {
            Ok(Some(coords)) => {
                tracing::debug!(address, variant = variant.as_str(), "geocode hit");
                return Some(coords);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("geocode error for '{variant}': {e:#}");
            }
        }
    }
    tracing::debug!(address, "geocode exhausted all variants");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_get_progressively_coarser() {
        let v = fallback_variants("臺南市東區大學路18巷2弄1號");
        assert_eq!(v[0], "臺南市東區大學路18巷2弄1號");
        assert!(v.contains(&"台南市東區大學路18巷2弄1號".to_string()));
        assert!(v.contains(&"臺南市東區大學路18巷2弄".to_string()));
        assert!(v.contains(&"臺南市東區大學路18巷".to_string()));
        assert!(v.contains(&"臺南市東區大學路".to_string()));
        assert!(v.contains(&"臺南市東區".to_string()));
    }

    #[test]
    fn variants_deduplicate() {
        let v = fallback_variants("台南市東區");
        assert_eq!(v.iter().filter(|s| s.as_str() == "台南市東區").count(), 1);
    }
}
