//! Service-location store and distance ranking.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// One support-service location ("心據點"). Entries without coordinates
/// are kept for listing but never ranked.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicePoint {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tel: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PointsFile {
    #[serde(default)]
    data: Vec<ServicePoint>,
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1, lon2, lat2) = (
        lon1.to_radians(),
        lat1.to_radians(),
        lon2.to_radians(),
        lat2.to_radians(),
    );
    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * 6371.0
}

/// Read-only set of service locations, loaded once at startup.
pub struct PointStore {
    points: Vec<ServicePoint>,
}

impl PointStore {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: PointsFile = serde_json::from_str(&raw)?;
        tracing::info!("loaded {} service points from {}", file.data.len(), path.display());
        Ok(Self { points: file.data })
    }

    /// An empty store; nearby queries answer with no points.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points within `max_km` of the coordinates, nearest first, capped at
    /// `top_k`. The sort is stable so equal distances keep file order.
    pub fn nearby(&self, lat: f64, lon: f64, max_km: f64, top_k: usize) -> Vec<(&ServicePoint, f64)> {
        let mut hits: Vec<(&ServicePoint, f64)> = self
            .points
            .iter()
            .filter_map(|p| match (p.lat, p.lon) {
                (Some(plat), Some(plon)) => {
                    let d = haversine_km(lon, lat, plon, plat);
                    (d <= max_km).then_some((p, d))
                }
                _ => None,
            })
            .collect();
        hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(title: &str, lat: f64, lon: f64) -> ServicePoint {
        ServicePoint {
            title: title.into(),
            address: String::new(),
            tel: None,
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    #[test]
    fn haversine_matches_known_distance() {
        // Taipei Main Station to Taipei 101 is roughly 4 km.
        let d = haversine_km(121.5170, 25.0478, 121.5645, 25.0339);
        assert!((3.0..6.0).contains(&d), "got {d}");
    }

    #[test]
    fn nearby_filters_radius_and_caps_results() {
        let store = PointStore {
            points: vec![
                point("far", 24.0, 121.0),
                point("near-b", 25.0405, 121.5100),
                point("near-a", 25.0400, 121.5090),
                ServicePoint {
                    title: "no-coords".into(),
                    address: String::new(),
                    tel: None,
                    lat: None,
                    lon: None,
                },
            ],
        };
        let hits = store.nearby(25.0400, 121.5090, 5.0, 5);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0.title, "near-a", "nearest first");
        assert!(hits[0].1 <= hits[1].1);

        let capped = store.nearby(25.0400, 121.5090, 5.0, 1);
        assert_eq!(capped.len(), 1);
    }
}
